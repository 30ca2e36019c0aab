use clap::Subcommand;

/// Milestone commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MilestoneCommands {
    /// List a startup's milestones in sequence order.
    List { startup: String },
    /// Get a milestone by ID.
    Get { id: String },
    /// Append a milestone after the last one.
    Add {
        startup: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Edit a milestone.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Remove the highest-sequence milestone.
    RemoveLast { startup: String },
    /// Show whether a milestone is locked.
    Locked { startup: String, id: String },
    /// Re-derive a milestone's status from its deliverables.
    Recompute { id: String },
}

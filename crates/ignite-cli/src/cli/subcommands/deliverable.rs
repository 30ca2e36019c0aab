use clap::Subcommand;

/// Deliverable commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DeliverableCommands {
    /// Create a deliverable under a milestone.
    Create {
        milestone: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        requirements: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Get a deliverable with its readiness items and comments.
    Get { id: String },
    /// List a milestone's deliverables.
    List { milestone: String },
    /// Attach a file reference to a slot.
    Attach {
        id: String,
        /// admin or incubatee
        #[arg(long)]
        slot: String,
        #[arg(long)]
        file: String,
    },
    /// Approve or reject a submitted deliverable.
    Review {
        id: String,
        /// approve or reject
        #[arg(long)]
        decision: String,
    },
}

use clap::Subcommand;

/// Startup commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StartupCommands {
    /// Register a startup and lay out its milestones from the program template.
    Create {
        #[arg(long)]
        name: String,
        /// Owner user id
        #[arg(long)]
        owner: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        /// ideation, validation or scaling
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    /// Edit a startup's profile.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    /// Get a startup by ID.
    Get { id: String },
    /// List startups, or those a user owns or belongs to.
    List {
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete a startup and everything under it.
    Delete { id: String },
}

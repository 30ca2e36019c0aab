use clap::Subcommand;

/// Startup member commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// Add a user to a startup.
    Add {
        startup: String,
        user: String,
        /// e.g. CEO, CTO
        #[arg(long)]
        position: Option<String>,
    },
    /// Remove a user from a startup.
    Remove { startup: String, user: String },
    /// List a startup's members.
    List { startup: String },
}

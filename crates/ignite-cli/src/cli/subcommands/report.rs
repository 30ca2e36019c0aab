use clap::Subcommand;

/// Progress report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Submit a progress report for a startup.
    Submit {
        startup: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        achievements: Option<String>,
        #[arg(long)]
        challenges: Option<String>,
        #[arg(long)]
        next_steps: Option<String>,
    },
    /// List reports for a startup, or the latest across all startups.
    List { startup: Option<String> },
}

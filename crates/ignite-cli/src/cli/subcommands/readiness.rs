use clap::Subcommand;

/// Readiness checklist commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReadinessCommands {
    /// Mark a readiness item (idempotent).
    Toggle {
        deliverable: String,
        name: String,
        #[arg(long)]
        level: Option<String>,
    },
    /// Remove a readiness item.
    Remove { deliverable: String, name: String },
    /// List a deliverable's readiness items.
    List { deliverable: String },
}

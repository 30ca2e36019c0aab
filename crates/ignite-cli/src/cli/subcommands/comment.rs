use clap::Subcommand;

/// Comment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Comment on a deliverable.
    Add { deliverable: String, content: String },
    /// List a deliverable's comments, oldest first.
    List { deliverable: String },
}

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Startup { action } => commands::startup::handle(&action, ctx, flags).await,
        Commands::Member { action } => commands::member::handle(&action, ctx, flags).await,
        Commands::Milestone { action } => commands::milestone::handle(&action, ctx, flags).await,
        Commands::Deliverable { action } => {
            commands::deliverable::handle(&action, ctx, flags).await
        }
        Commands::Readiness { action } => commands::readiness::handle(&action, ctx, flags).await,
        Commands::Comment { action } => commands::comment::handle(&action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
        Commands::Progress { startup } => commands::progress::handle_progress(&startup, ctx, flags).await,
        Commands::Next { startup } => commands::progress::handle_next(&startup, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
    }
}

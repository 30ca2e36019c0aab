use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReadinessCommands;
use crate::context::AppContext;
use crate::output::{output, output_ack};

/// Handle `ignite readiness`.
pub async fn handle(
    action: &ReadinessCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReadinessCommands::Toggle {
            deliverable,
            name,
            level,
        } => {
            let item = ctx
                .service
                .toggle_readiness(&ctx.actor, deliverable, name, level.as_deref())
                .await?;
            output(&item, flags.format)
        }
        ReadinessCommands::Remove { deliverable, name } => {
            ctx.service
                .remove_readiness(&ctx.actor, deliverable, name)
                .await?;
            output_ack("removed", name, flags.format)
        }
        ReadinessCommands::List { deliverable } => {
            output(&ctx.service.list_readiness(deliverable).await?, flags.format)
        }
    }
}

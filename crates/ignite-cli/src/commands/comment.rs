use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ignite comment`.
pub async fn handle(
    action: &CommentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommentCommands::Add {
            deliverable,
            content,
        } => {
            let comment = ctx
                .service
                .add_comment(&ctx.actor, deliverable, content)
                .await?;
            output(&comment, flags.format)
        }
        CommentCommands::List { deliverable } => {
            output(&ctx.service.list_comments(deliverable).await?, flags.format)
        }
    }
}

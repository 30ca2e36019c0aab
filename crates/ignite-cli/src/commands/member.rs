use crate::cli::GlobalFlags;
use crate::cli::subcommands::MemberCommands;
use crate::context::AppContext;
use crate::output::{output, output_ack};

/// Handle `ignite member`.
pub async fn handle(
    action: &MemberCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MemberCommands::Add {
            startup,
            user,
            position,
        } => {
            let member = ctx
                .service
                .add_member(&ctx.actor, startup, user, position.as_deref())
                .await?;
            output(&member, flags.format)
        }
        MemberCommands::Remove { startup, user } => {
            ctx.service.remove_member(&ctx.actor, startup, user).await?;
            output_ack("removed", user, flags.format)
        }
        MemberCommands::List { startup } => {
            output(&ctx.service.list_members(startup).await?, flags.format)
        }
    }
}

use ignite_db::repos::milestone::NewMilestone;
use ignite_db::updates::milestone::MilestoneUpdateBuilder;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MilestoneCommands;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LockResponse<'a> {
    milestone_id: &'a str,
    locked: bool,
}

/// Handle `ignite milestone`.
pub async fn handle(
    action: &MilestoneCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MilestoneCommands::List { startup } => {
            output(&ctx.service.list_milestones(startup).await?, flags.format)
        }
        MilestoneCommands::Get { id } => output(&ctx.service.get_milestone(id).await?, flags.format),
        MilestoneCommands::Add {
            startup,
            title,
            description,
            due,
        } => {
            let new = NewMilestone {
                title: title.clone(),
                description: description.clone(),
                due_date: parse_date(due.as_deref(), "due")?,
            };
            let milestone = ctx.service.add_milestone(&ctx.actor, startup, &new).await?;
            output(&milestone, flags.format)
        }
        MilestoneCommands::Update {
            id,
            title,
            description,
            due,
        } => {
            let mut builder = MilestoneUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if let Some(due) = parse_date(due.as_deref(), "due")? {
                builder = builder.due_date(Some(due));
            }
            let milestone = ctx
                .service
                .update_milestone(&ctx.actor, id, builder.build())
                .await?;
            output(&milestone, flags.format)
        }
        MilestoneCommands::RemoveLast { startup } => {
            let removed = ctx.service.remove_last_milestone(&ctx.actor, startup).await?;
            output(&removed, flags.format)
        }
        MilestoneCommands::Locked { startup, id } => {
            let locked = ctx.service.is_locked(startup, id).await?;
            output(
                &LockResponse {
                    milestone_id: id,
                    locked,
                },
                flags.format,
            )
        }
        MilestoneCommands::Recompute { id } => {
            let milestone = ctx
                .service
                .recompute_milestone_status(&ctx.actor, id)
                .await?;
            output(&milestone, flags.format)
        }
    }
}

use ignite_core::enums::{FileSlot, ReviewDecision};
use ignite_db::repos::deliverable::NewDeliverable;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DeliverableCommands;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ignite deliverable`.
pub async fn handle(
    action: &DeliverableCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DeliverableCommands::Create {
            milestone,
            name,
            requirements,
            due,
        } => {
            let new = NewDeliverable {
                name: name.clone(),
                requirements: requirements.clone(),
                due_date: parse_date(due.as_deref(), "due")?,
            };
            let deliverable = ctx
                .service
                .create_deliverable(&ctx.actor, milestone, &new)
                .await?;
            output(&deliverable, flags.format)
        }
        DeliverableCommands::Get { id } => {
            output(&ctx.service.deliverable_detail(id).await?, flags.format)
        }
        DeliverableCommands::List { milestone } => {
            output(&ctx.service.list_deliverables(milestone).await?, flags.format)
        }
        DeliverableCommands::Attach { id, slot, file } => {
            let slot: FileSlot = parse_enum(slot, "slot")?;
            let deliverable = ctx.service.attach_file(&ctx.actor, id, slot, file).await?;
            output(&deliverable, flags.format)
        }
        DeliverableCommands::Review { id, decision } => {
            let decision: ReviewDecision = parse_enum(decision, "decision")?;
            let deliverable = ctx
                .service
                .review_deliverable(&ctx.actor, id, decision)
                .await?;
            output(&deliverable, flags.format)
        }
    }
}

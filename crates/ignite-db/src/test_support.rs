//! Shared test utilities for ignite-db unit tests.

use ignite_config::ProgramConfig;
use ignite_core::entities::{Deliverable, Milestone, Startup};
use ignite_core::enums::{FileSlot, ReviewDecision, Role};
use ignite_core::identity::Actor;

use crate::repos::startup::NewStartup;
use crate::service::IgniteService;

pub fn admin() -> Actor {
    Actor::new("usr-admin", Role::Admin)
}

pub fn founder() -> Actor {
    Actor::new("usr-founder", Role::Incubatee)
}

pub fn outsider() -> Actor {
    Actor::new("usr-outsider", Role::Incubatee)
}

/// In-memory service.
pub async fn test_service() -> IgniteService {
    IgniteService::new_local(":memory:").await.unwrap()
}

/// Startup owned by [`founder`] with the default four-milestone program.
pub async fn seeded_startup(svc: &IgniteService) -> (Startup, Vec<Milestone>) {
    let startup = svc
        .create_startup(
            &admin(),
            &NewStartup::new("Acme Robotics", &founder().actor_id),
            &ProgramConfig::default(),
        )
        .await
        .unwrap();
    let milestones = svc.list_milestones(&startup.id).await.unwrap();
    (startup, milestones)
}

/// Create a deliverable, upload the incubatee file and approve it.
pub async fn approved_deliverable(svc: &IgniteService, milestone_id: &str, name: &str) -> Deliverable {
    let deliverable = svc
        .create_deliverable(&admin(), milestone_id, &crate::repos::deliverable::NewDeliverable::new(name))
        .await
        .unwrap();
    svc.attach_file(&admin(), &deliverable.id, FileSlot::Incubatee, "files/upload.pdf")
        .await
        .unwrap();
    svc.review_deliverable(&admin(), &deliverable.id, ReviewDecision::Approve)
        .await
        .unwrap()
}

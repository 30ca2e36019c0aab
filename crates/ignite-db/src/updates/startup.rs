//! Startup profile update builder.

use serde::Serialize;
use ignite_core::enums::StartupStage;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StartupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<StartupStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<Option<String>>,
}

#[derive(Default)]
pub struct StartupUpdateBuilder(StartupUpdate);

impl StartupUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn industry(mut self, industry: Option<String>) -> Self {
        self.0.industry = Some(industry);
        self
    }

    #[must_use]
    pub fn stage(mut self, stage: StartupStage) -> Self {
        self.0.stage = Some(stage);
        self
    }

    #[must_use]
    pub fn email(mut self, email: Option<String>) -> Self {
        self.0.email = Some(email);
        self
    }

    #[must_use]
    pub fn contact_number(mut self, contact_number: Option<String>) -> Self {
        self.0.contact_number = Some(contact_number);
        self
    }

    #[must_use]
    pub fn build(self) -> StartupUpdate {
        self.0
    }
}

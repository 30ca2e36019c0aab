//! Milestone update builder.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MilestoneUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Default)]
pub struct MilestoneUpdateBuilder(MilestoneUpdate);

impl MilestoneUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn build(self) -> MilestoneUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_changed_fields_only() {
        let update = MilestoneUpdateBuilder::new().title("Launch").build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"title": "Launch"})
        );
    }

    #[test]
    fn explicit_clear_serializes_null() {
        let update = MilestoneUpdateBuilder::new().due_date(None).build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"due_date": null})
        );
    }
}

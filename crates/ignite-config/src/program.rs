//! Incubation program template: the milestone sequence every new startup
//! starts with.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Number of milestones in the default program.
const DEFAULT_MILESTONES: u32 = 4;

/// One milestone of the program template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MilestoneTemplate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Deliverables seeded into the milestone when a startup is created.
    #[serde(default)]
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgramConfig {
    /// Milestones in sequence order; the first entry becomes sequence 1.
    #[serde(default = "default_milestones")]
    pub milestones: Vec<MilestoneTemplate>,
}

fn default_milestones() -> Vec<MilestoneTemplate> {
    (1..=DEFAULT_MILESTONES)
        .map(|i| MilestoneTemplate {
            title: format!("Milestone {i}"),
            description: None,
            deliverables: Vec::new(),
        })
        .collect()
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            milestones: default_milestones(),
        }
    }
}

impl ProgramConfig {
    /// Check that every milestone has a title and that seeded deliverable
    /// names are non-empty and unique within their milestone.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, milestone) in self.milestones.iter().enumerate() {
            let field = format!("program.milestones[{i}]");
            if milestone.title.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("{field}.title"),
                    reason: "must not be empty".into(),
                });
            }
            let mut seen = HashSet::new();
            for name in &milestone.deliverables {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("{field}.deliverables"),
                        reason: "deliverable names must not be empty".into(),
                    });
                }
                if !seen.insert(name) {
                    return Err(ConfigError::InvalidValue {
                        field: format!("{field}.deliverables"),
                        reason: format!("duplicate deliverable '{name}'"),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_program_has_four_empty_milestones() {
        let program = ProgramConfig::default();
        let titles: Vec<_> = program.milestones.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Milestone 1", "Milestone 2", "Milestone 3", "Milestone 4"]
        );
        assert!(program.milestones.iter().all(|m| m.deliverables.is_empty()));
        assert!(program.validate().is_ok());
    }

    #[test]
    fn duplicate_seeded_deliverables_rejected() {
        let program = ProgramConfig {
            milestones: vec![MilestoneTemplate {
                title: "Discovery".into(),
                description: None,
                deliverables: vec!["Report".into(), " Report ".into()],
            }],
        };
        let err = program.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "program.milestones[0].deliverables")
        );
    }

    #[test]
    fn blank_title_rejected() {
        let program = ProgramConfig {
            milestones: vec![MilestoneTemplate {
                title: "  ".into(),
                description: None,
                deliverables: vec![],
            }],
        };
        assert!(program.validate().is_err());
    }
}

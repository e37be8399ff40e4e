//! The JSON plan document the CLI reads its inputs from.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tp_core::{CalendarEvent, Holiday, Milestone, Project, ProjectId, Settings};

/// Everything the scheduling core needs, as one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub projects: Vec<Project>,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    #[serde(default)]
    pub events: Vec<CalendarEvent>,

    #[serde(default)]
    pub holidays: Vec<Holiday>,

    #[serde(default)]
    pub settings: Settings,
}

impl PlanDocument {
    /// Reads and parses a plan file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan {}", path.display()))?;
        let plan: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse plan {}", path.display()))?;

        for milestone in &plan.milestones {
            if let Some(Err(err)) = milestone.recurrence().map(tp_core::RecurringConfig::validate) {
                tracing::warn!(milestone = %milestone.id, %err, "recurrence will be clamped");
            }
        }
        tracing::debug!(
            projects = plan.projects.len(),
            milestones = plan.milestones.len(),
            events = plan.events.len(),
            "loaded plan"
        );
        Ok(plan)
    }

    /// Looks up a project by its ID string.
    pub fn project(&self, id: &str) -> Result<&Project> {
        let id = ProjectId::new(id)?;
        self.projects
            .iter()
            .find(|p| p.id == id)
            .with_context(|| format!("unknown project: {id}"))
    }
}

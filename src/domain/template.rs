use super::enums::Pace;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One task within a routine template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateTask {
    pub id: Uuid,
    pub name: String,
    /// Planned duration in milliseconds
    pub duration_ms: i64,
    /// Position within the template (unique per template)
    pub order: u32,

    // Tri-flag pace visibility. After migration all three are Some.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_included: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steady_included: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_included: Option<bool>,

    // Legacy dual-flag visibility, cleared by migration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_safe: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_extra: Option<bool>,

    #[serde(default)]
    pub auto_advance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<String>>,
}

impl TemplateTask {
    pub fn new(name: impl Into<String>, duration_ms: i64, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration_ms,
            order,
            low_included: Some(false),
            steady_included: Some(true),
            flow_included: Some(false),
            low_safe: None,
            flow_extra: None,
            auto_advance: false,
            subtasks: None,
        }
    }

    /// Upgrade legacy dual-flag visibility to the tri-flag scheme.
    ///
    /// `lowSafe` implies the task suits every pace; `flowExtra` alone marks a
    /// flow-only stretch goal; a task with neither flag is steady-only.
    pub fn migrate_visibility(&mut self) {
        let has_tri_flags = self.low_included.is_some()
            || self.steady_included.is_some()
            || self.flow_included.is_some();

        if has_tri_flags {
            // Already on the new scheme; normalize missing flags to false
            self.low_included = Some(self.low_included.unwrap_or(false));
            self.steady_included = Some(self.steady_included.unwrap_or(false));
            self.flow_included = Some(self.flow_included.unwrap_or(false));
        } else {
            let low_safe = self.low_safe.unwrap_or(false);
            let flow_extra = self.flow_extra.unwrap_or(false);

            let (low, steady, flow) = if low_safe {
                (true, true, true)
            } else if flow_extra {
                (false, false, true)
            } else {
                (false, true, false)
            };

            self.low_included = Some(low);
            self.steady_included = Some(steady);
            self.flow_included = Some(flow);
        }

        self.low_safe = None;
        self.flow_extra = None;
    }

    /// Whether this task is visible when running at the given pace.
    ///
    /// A task with no flags set at all (should not occur post-migration)
    /// defaults to steady-only.
    pub fn included_for(&self, pace: Pace) -> bool {
        let low = self.low_included.unwrap_or(false);
        let steady = self.steady_included.unwrap_or(false);
        let flow = self.flow_included.unwrap_or(false);

        if !low && !steady && !flow {
            return pace == Pace::Steady;
        }

        match pace {
            Pace::Low => low,
            Pace::Steady => steady,
            Pace::Flow => flow,
        }
    }
}

/// A routine template. Immutable once a run has been created from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tasks: Vec<TemplateTask>,
}

impl Template {
    pub fn new(name: impl Into<String>, tasks: Vec<TemplateTask>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            tasks,
        }
    }

    /// One-time schema upgrade, applied when a template loads from disk
    pub fn migrate_visibility(&mut self) {
        for task in &mut self.tasks {
            task.migrate_visibility();
        }
    }
}

/// Filter a template's tasks down to those visible at the given pace.
///
/// Output is sorted by `order` ascending; `order` values are preserved, not
/// renumbered.
pub fn derive_visible_tasks(tasks: &[TemplateTask], pace: Pace) -> Vec<TemplateTask> {
    let mut visible: Vec<TemplateTask> = tasks
        .iter()
        .filter(|task| task.included_for(pace))
        .cloned()
        .collect();
    visible.sort_by_key(|task| task.order);
    visible
}

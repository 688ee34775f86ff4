use super::files::{atomic_write, read_file};
use crate::domain::{Template, TemplateTask};
use anyhow::{Context, Result};
use std::path::Path;

/// Load templates from templates.json.
///
/// A missing file is seeded with the starter templates. Legacy dual-flag
/// visibility is upgraded here, once, and written back — filtering never
/// re-runs the migration.
pub fn load_templates<P: AsRef<Path>>(path: P) -> Result<Vec<Template>> {
    let path = path.as_ref();

    let content = read_file(path)?;
    if content.is_empty() {
        let templates = seed_templates();
        save_templates(path, &templates)?;
        return Ok(templates);
    }

    let mut templates: Vec<Template> =
        serde_json::from_str(&content).context("Failed to parse templates.json")?;

    let before_migration = templates.clone();
    for template in &mut templates {
        template.migrate_visibility();
    }
    if templates != before_migration {
        save_templates(path, &templates)?;
    }

    Ok(templates)
}

/// Save templates to templates.json
pub fn save_templates<P: AsRef<Path>>(path: P, templates: &[Template]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(templates).context("Failed to serialize templates")?;
    atomic_write(path, &json)
}

/// Starter templates written on first launch
fn seed_templates() -> Vec<Template> {
    let mut wake_stretch = TemplateTask::new("Wake-up stretch", 5 * 60_000, 0);
    wake_stretch.low_included = Some(true);
    wake_stretch.flow_included = Some(true);
    wake_stretch.auto_advance = true;

    let mut shower = TemplateTask::new("Shower", 10 * 60_000, 1);
    shower.low_included = Some(true);
    shower.flow_included = Some(true);

    let mut breakfast = TemplateTask::new("Make breakfast", 15 * 60_000, 2);
    breakfast.flow_included = Some(true);
    breakfast.subtasks = Some(vec![
        "Put the kettle on".to_string(),
        "Eat at the table".to_string(),
    ]);

    let mut tidy = TemplateTask::new("Tidy the kitchen", 10 * 60_000, 3);
    tidy.steady_included = Some(false);
    tidy.flow_included = Some(true);

    let mut morning = Template::new(
        "Morning reset",
        vec![wake_stretch, shower, breakfast, tidy],
    );
    morning.description = Some("Ease into the day".to_string());

    let mut dishes = TemplateTask::new("Clear the sink", 10 * 60_000, 0);
    dishes.low_included = Some(true);
    dishes.flow_included = Some(true);

    let mut lay_out = TemplateTask::new("Lay out tomorrow's clothes", 5 * 60_000, 1);
    lay_out.low_included = Some(true);
    lay_out.flow_included = Some(true);
    lay_out.auto_advance = true;

    let mut wind_down = TemplateTask::new("Screens off, lights low", 5 * 60_000, 2);
    wind_down.flow_included = Some(true);

    let mut evening = Template::new("Evening wind-down", vec![dishes, lay_out, wind_down]);
    evening.description = Some("Land the day gently".to_string());

    vec![morning, evening]
}

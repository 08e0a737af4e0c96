use serde_json::Value;

/// Stage status reported once a stage has finished successfully
pub const PASSED: &str = "Passed";

/// Status of one stage in the latest instance of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageStatus {
    pub pipeline: String,
    pub stage: String,
    pub status: String,
}

impl StageStatus {
    pub fn is_passed(&self) -> bool {
        self.status == PASSED
    }
}

/// Resolve a stage status from an `/api/dashboard` payload.
///
/// Walks pipeline group, pipeline, latest instance and stage. With no names
/// the first entry is used at every level. Returns `None` while any level is
/// still missing, which is normal before the pipeline is first scheduled.
pub fn stage_status(
    dashboard: &Value,
    pipeline_name: Option<&str>,
    stage_name: Option<&str>,
) -> Option<StageStatus> {
    let pipeline = find_pipeline(dashboard, pipeline_name)?;
    let instance = embedded(pipeline, "instances")?.first()?;
    let stages = embedded(instance, "stages")?;
    let stage = match stage_name {
        Some(name) => stages.iter().find(|stage| name_of(stage) == Some(name))?,
        None => stages.first()?,
    };
    let status = stage.get("status")?.as_str()?;

    Some(StageStatus {
        pipeline: name_of(pipeline).unwrap_or_default().to_string(),
        stage: name_of(stage).unwrap_or_default().to_string(),
        status: status.to_string(),
    })
}

fn find_pipeline<'a>(dashboard: &'a Value, name: Option<&str>) -> Option<&'a Value> {
    let groups = embedded(dashboard, "pipeline_groups")?;

    // Pipelines nested inside their group
    let nested: Vec<&Value> = groups
        .iter()
        .filter_map(|group| embedded(group, "pipelines"))
        .flatten()
        .collect();
    if !nested.is_empty() {
        return match name {
            Some(name) => nested.into_iter().find(|p| name_of(p) == Some(name)),
            None => nested.into_iter().next(),
        };
    }

    // Pipelines listed once at the top level and referenced by name from groups
    let pipelines = embedded(dashboard, "pipelines")?;
    let wanted = match name {
        Some(name) => name,
        None => groups
            .first()?
            .get("pipelines")?
            .as_array()?
            .first()?
            .as_str()?,
    };
    pipelines.iter().find(|p| name_of(p) == Some(wanted))
}

fn embedded<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get("_embedded")?.get(key)?.as_array()
}

fn name_of(value: &Value) -> Option<&str> {
    value.get("name").and_then(|name| name.as_str())
}

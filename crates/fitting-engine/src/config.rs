use fitting_ops::BuildConfig;

use crate::types::EngineError;

/// Largest accepted relative tool margin.
pub const MAX_TOOL_MARGIN: f64 = 1.0;

/// Read a [`BuildConfig`] from JSON. Missing keys keep their defaults.
pub fn load_config(json: &str) -> Result<BuildConfig, EngineError> {
    let config: BuildConfig =
        serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig {
            reason: e.to_string(),
        })?;
    check_config(&config)?;
    Ok(config)
}

pub fn check_config(config: &BuildConfig) -> Result<(), EngineError> {
    let margin = config.tool_margin;
    if !margin.is_finite() || !(0.0..=MAX_TOOL_MARGIN).contains(&margin) {
        return Err(EngineError::InvalidConfig {
            reason: format!("tool_margin {margin} outside [0, {MAX_TOOL_MARGIN}]"),
        });
    }
    Ok(())
}

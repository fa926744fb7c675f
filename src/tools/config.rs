/// Tools for reading and changing settings
///
/// This module implements get_config and set_config.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use crate::domain::settings::KNOWN_KEYS;
use crate::domain::Settings;
use crate::storage::HabitStorage;
use crate::TrackerError;

/// Parameters for reading settings
#[derive(Debug, Default, Deserialize)]
pub struct GetConfigParams {
    /// A single key; every key when omitted
    pub key: Option<String>,
}

/// Response with effective settings (stored value or default)
#[derive(Debug, Serialize)]
pub struct GetConfigResponse {
    pub settings: BTreeMap<String, String>,
    pub message: String,
}

/// Parameters for changing a setting
#[derive(Debug, Deserialize)]
pub struct SetConfigParams {
    pub key: String,
    pub value: String,
}

/// Response from changing a setting
#[derive(Debug, Serialize)]
pub struct SetConfigResponse {
    pub success: bool,
    pub key: String,
    pub value: String,
    pub message: String,
}

/// Read one or all settings
pub fn get_config<S: HabitStorage>(
    storage: &S,
    params: GetConfigParams,
) -> Result<GetConfigResponse, TrackerError> {
    let mut settings = Settings::from_pairs(&storage.all_settings()?).to_pairs();

    if let Some(key) = params.key.as_deref().map(str::trim) {
        if !KNOWN_KEYS.contains(&key) {
            return Err(TrackerError::InvalidInput(format!(
                "Unknown setting '{}', expected one of: {}",
                key,
                KNOWN_KEYS.join(", ")
            )));
        }
        settings.retain(|k, _| k == key);
    }

    let message = settings
        .iter()
        .map(|(k, v)| format!("{} = {}", k, v))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(GetConfigResponse { settings, message })
}

/// Validate and store a setting
pub fn set_config<S: HabitStorage>(
    storage: &S,
    params: SetConfigParams,
) -> Result<SetConfigResponse, TrackerError> {
    let key = params.key.trim().to_string();
    let value = params.value.trim().to_string();

    Settings::validate(&key, &value)?;
    storage.set_setting(&key, &value)?;

    Ok(SetConfigResponse {
        success: true,
        message: format!("⚙️ Set {} = {}", key, value),
        key,
        value,
    })
}

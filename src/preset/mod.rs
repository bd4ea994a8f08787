use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::master::MasteringParams;

/// Load mastering parameters from a JSON file.
///
/// Partial files are accepted: fields the suggestion step left out take
/// their declared defaults.
pub fn load<P: AsRef<Path>>(path: P) -> Result<MasteringParams> {
    let content =
        fs::read_to_string(path.as_ref()).context("failed to read parameter file")?;
    serde_json::from_str(&content).context("failed to parse parameter JSON")
}

/// Save mastering parameters as pretty-printed JSON.
pub fn save<P: AsRef<Path>>(path: P, params: &MasteringParams) -> Result<()> {
    let json =
        serde_json::to_string_pretty(params).context("failed to serialize parameters")?;
    fs::write(path.as_ref(), json).context("failed to write parameter file")?;
    Ok(())
}

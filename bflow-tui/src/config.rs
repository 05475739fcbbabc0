// Scenario files: one network plus one backup request, as JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bflow_core_plus::{BackupNetwork, BackupRequest};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub network: BackupNetwork,
    pub request: BackupRequest,
}

impl Scenario {
    pub fn parse(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(text).context("malformed scenario")?;
        scenario
            .request
            .validate(&scenario.network)
            .context("invalid backup request")?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading scenario {}", path.display()))
    }
}

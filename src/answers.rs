//! Answers collected before the pipeline is built
//!
//! The values asked for interactively (monitoring keys, CI notification
//! credentials) are kept in an explicit `Answers` struct and passed to the
//! recipe builder. They can be saved to JSON so a run can be repeated
//! without prompting.

use crate::error::{RailyardError, Result as RailyardResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Values collected from the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answers {
    /// NewRelic license key, empty if the user has none
    pub newrelic_license_key: String,
    /// Honeybadger API key, empty if the user has none
    pub honeybadger_api_key: String,
    /// TravisCI Campfire notifications, if requested
    pub campfire: Option<CampfireNotifications>,
}

/// Campfire room that TravisCI reports build results to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampfireNotifications {
    pub subdomain: String,
    pub api_key: String,
    pub room_id: String,
}

impl CampfireNotifications {
    /// `subdomain:api_key@room_id`, the form Travis expects
    pub fn room_spec(&self) -> String {
        format!("{}:{}@{}", self.subdomain, self.api_key, self.room_id)
    }
}

impl Answers {
    /// Save answers to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize answers to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write answers to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load answers from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read answers from {:?}", path.as_ref()))?;

        let answers: Self =
            serde_json::from_str(&content).context("Failed to parse answers JSON")?;

        Ok(answers)
    }

    /// Validate the answers
    pub fn validate(&self) -> RailyardResult<()> {
        let Some(campfire) = &self.campfire else {
            return Ok(());
        };

        if campfire.subdomain.trim().is_empty() {
            return Err(RailyardError::validation("Campfire subdomain must be specified"));
        }
        if campfire.api_key.trim().is_empty() {
            return Err(RailyardError::validation("Campfire API key must be specified"));
        }
        let room_id = campfire.room_id.trim();
        if room_id.is_empty() {
            return Err(RailyardError::validation("Campfire room ID must be specified"));
        }
        if !room_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(RailyardError::validation(format!(
                "Campfire room ID must be numeric (the ID, not the name), got {:?}",
                room_id
            )));
        }

        Ok(())
    }

    pub fn has_newrelic(&self) -> bool {
        !self.newrelic_license_key.is_empty()
    }

    pub fn has_honeybadger(&self) -> bool {
        !self.honeybadger_api_key.is_empty()
    }

    /// One-line summary of which integrations get credentials,
    /// e.g. `newrelic: yes, honeybadger: no, campfire: no`
    pub fn integrations(&self) -> String {
        let flag = |on: bool| if on { "yes" } else { "no" };
        format!(
            "newrelic: {}, honeybadger: {}, campfire: {}",
            flag(self.has_newrelic()),
            flag(self.has_honeybadger()),
            flag(self.campfire.is_some())
        )
    }
}

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::config::SyncExpectation;

/// Business-continuity status as reported by the standby server.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SyncStatusPayload {
    #[serde(default, rename = "primaryServerDetails", alias = "primary_server_details")]
    pub primary_server_details: HashMap<String, Value>,
    #[serde(default, rename = "standbyServerDetails", alias = "standby_server_details")]
    pub standby_server_details: HashMap<String, Value>,
    #[serde(default, rename = "syncErrors", alias = "sync_errors")]
    pub sync_errors: Vec<Value>,
    #[serde(default, rename = "oauthSetupStatus", alias = "oauth_setup_status")]
    pub oauth_setup_status: Option<String>,
}

/// Comparison of primary and standby checksums against an expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncVerdict {
    pub matched: usize,
    pub expected: usize,
    pub mismatched: Vec<String>,
    pub sync_errors: Vec<String>,
    pub oauth_ready: bool,
}

impl SyncStatusPayload {
    /// Checksum of a primary artifact; only object entries carry one.
    fn primary_checksum(&self, key: &str) -> Option<&str> {
        self.primary_server_details
            .get(key)
            .filter(|value| value.is_object())
            .and_then(|value| value.get("md5"))
            .and_then(|md5| md5.as_str())
    }

    fn standby_checksum(&self, key: &str) -> Option<&str> {
        self.standby_server_details
            .get(key)
            .and_then(|value| value.as_str())
    }

    pub fn evaluate(&self, expectation: &SyncExpectation) -> SyncVerdict {
        let mut matched = 0;
        let mut mismatched = Vec::new();

        for key in self.primary_server_details.keys() {
            let Some(primary) = self.primary_checksum(key) else {
                continue;
            };
            if self.standby_checksum(key) == Some(primary) {
                matched += 1;
            } else {
                mismatched.push(key.clone());
            }
        }
        mismatched.sort();

        let sync_errors = self
            .sync_errors
            .iter()
            .map(|err| match err.as_str() {
                Some(message) => message.to_string(),
                None => err.to_string(),
            })
            .collect();

        let oauth_ready = !expectation.require_oauth_setup
            || self.oauth_setup_status.as_deref() == Some("success");

        SyncVerdict {
            matched,
            expected: expectation.expected_matches,
            mismatched,
            sync_errors,
            oauth_ready,
        }
    }
}

impl SyncVerdict {
    pub fn is_synchronized(&self) -> bool {
        self.matched == self.expected && self.sync_errors.is_empty() && self.oauth_ready
    }
}

impl fmt::Display for SyncVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} checksums match", self.matched, self.expected)?;
        if !self.mismatched.is_empty() {
            write!(f, ", out of sync: {}", self.mismatched.join(", "))?;
        }
        if !self.sync_errors.is_empty() {
            write!(f, ", errors: {}", self.sync_errors.join("; "))?;
        }
        if !self.oauth_ready {
            write!(f, ", OAuth setup incomplete")?;
        }
        Ok(())
    }
}

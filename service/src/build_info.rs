use chrono::{DateTime, Utc};
use serde::Serialize;
use std::env;
use utoipa::ToSchema;

/// Build metadata exposed over REST and in startup logs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub version: String,
    pub git_sha: String,
    pub build_time: String,
    pub message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct BuildInfoProvider {
    info: BuildInfo,
}

impl BuildInfoProvider {
    /// Read build metadata from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read build metadata through `lookup`. Missing values fall back to
    /// the crate version, `"unknown"` or `None`.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let info = BuildInfo {
            version: lookup("APP_VERSION")
                .or_else(|| lookup("VERSION"))
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            git_sha: lookup("GIT_SHA").unwrap_or_else(|| "unknown".to_string()),
            build_time: lookup("BUILD_TIME")
                .and_then(|value| normalize_build_time(&value))
                .unwrap_or_else(|| "unknown".to_string()),
            message: lookup("BUILD_MESSAGE"),
        };

        Self { info }
    }

    #[must_use]
    pub fn build_info(&self) -> BuildInfo {
        self.info.clone()
    }
}

/// RFC 3339 timestamps are re-rendered in UTC; a missing offset is read as UTC.
fn normalize_build_time(value: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc3339(&format!("{value}Z")))
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339())
        .ok()
}

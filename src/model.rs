use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

use crate::error::{DeployError, DeployResult};

/// Status reported by a pod that is serving traffic.
pub const HEALTHY: &str = "Healthy";

/// An entry of `gigalixir apps`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppRecord {
    pub unique_name: String,
}

/// An entry of `gigalixir releases`, newest first.
#[derive(Debug, Clone)]
pub struct Release {
    pub version: u64,
    pub status: Option<String>,
}

/// Release as the CLI prints it; the version may be a number or a
/// numeric string.
#[derive(Deserialize)]
struct RawRelease {
    version: RawVersion,
    #[serde(default)]
    status: Option<String>,
}

impl TryFrom<RawRelease> for Release {
    type Error = DeployError;

    fn try_from(raw: RawRelease) -> DeployResult<Self> {
        let version = match raw.version {
            RawVersion::Number(n) => n,
            RawVersion::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| DeployError::InvalidVersion(s))?,
        };
        Ok(Self {
            version,
            status: raw.status,
        })
    }
}

/// A running instance from `gigalixir ps`.
#[derive(Debug, Clone, Deserialize)]
pub struct Pod {
    #[serde(default, deserialize_with = "lenient_version")]
    pub version: Option<u64>,
    #[serde(default)]
    pub status: String,
}

/// Output of `gigalixir ps`.
#[derive(Debug, Clone, Deserialize)]
pub struct PodStatus {
    pub replicas_desired: usize,
    #[serde(default)]
    pub pods: Vec<Pod>,
}

impl PodStatus {
    pub fn parse(json: &str) -> DeployResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of healthy pods running `version`.
    #[must_use]
    pub fn healthy_at(&self, version: u64) -> usize {
        self.pods
            .iter()
            .filter(|pod| pod.version == Some(version) && pod.status == HEALTHY)
            .count()
    }

    /// True once enough healthy pods run `version` to satisfy the
    /// desired replica count.
    #[must_use]
    pub fn is_ready(&self, version: u64) -> bool {
        self.healthy_at(version) >= self.replicas_desired
    }
}

/// Unique names from `gigalixir apps` output.
pub fn parse_app_names(json: &str) -> DeployResult<HashSet<String>> {
    let apps: Vec<AppRecord> = serde_json::from_str(json)?;
    Ok(apps.into_iter().map(|a| a.unique_name).collect())
}

/// Version of the first release listed, or 0 when the app has
/// never been released.
pub fn parse_current_release(json: &str) -> DeployResult<u64> {
    Ok(parse_releases(json)?.first().map_or(0, |r| r.version))
}

/// Releases from `gigalixir releases` output, in CLI order.
pub fn parse_releases(json: &str) -> DeployResult<Vec<Release>> {
    let raw: Vec<RawRelease> = serde_json::from_str(json)?;
    raw.into_iter().map(Release::try_from).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Number(u64),
    Text(String),
}

fn lenient_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

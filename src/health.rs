use std::thread;
use std::time::Duration;

use tracing::info;

use crate::cmd::CommandRunner;
use crate::error::{DeployError, DeployResult};
use crate::gigalixir::Session;

/// How long to wait for a new release to become healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub const fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale `app` to one replica and poll until the release after
/// `baseline` is healthy on every desired replica.
///
/// Polls at most `policy.max_attempts` times, sleeping
/// `policy.interval` between polls.
pub fn wait_for_new_release<R: CommandRunner>(
    session: &Session<R>,
    app: &str,
    baseline: u64,
    policy: PollPolicy,
) -> DeployResult<()> {
    wait_for_new_release_with(session, app, baseline, policy, thread::sleep)
}

/// [`wait_for_new_release`] with the pause between polls supplied
/// by `sleep`. No pause follows the last poll.
pub fn wait_for_new_release_with<R: CommandRunner>(
    session: &Session<R>,
    app: &str,
    baseline: u64,
    policy: PollPolicy,
    mut sleep: impl FnMut(Duration),
) -> DeployResult<()> {
    session.scale(app, 1)?;

    let expected = baseline + 1;
    info!("Waiting for release {expected} of {app} to be healthy...");

    for attempt in 1..=policy.max_attempts {
        let status = session.pod_status(app)?;
        let healthy = status.healthy_at(expected);
        info!(
            "  Health check ({attempt}/{}): {healthy}/{} healthy",
            policy.max_attempts, status.replicas_desired
        );
        if status.is_ready(expected) {
            return Ok(());
        }
        if attempt < policy.max_attempts {
            sleep(policy.interval);
        }
    }

    Err(DeployError::HealthcheckTimeout(
        app.to_string(),
        policy.max_attempts,
    ))
}

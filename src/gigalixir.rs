use tracing::info;

use crate::cmd::CommandRunner;
use crate::error::{DeployError, DeployResult};
use crate::inputs::{ConfigValue, Credentials};
use crate::model::{self, PodStatus};

const CLI: &str = "gigalixir";

/// Handle to the `gigalixir` CLI before authentication.
pub struct Gigalixir<R> {
    runner: R,
}

impl<R: CommandRunner> Gigalixir<R> {
    #[must_use]
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Install the CLI with pip unless it is already on PATH.
    pub fn install(&self) -> DeployResult<()> {
        if self.runner.command_exists(CLI) {
            info!("gigalixir CLI already installed");
            return Ok(());
        }

        info!("Installing gigalixir CLI...");
        self.runner.run_interactive(
            "pip3",
            &["install", "gigalixir", "--ignore-installed", "six"],
        )
    }

    /// Log in and return an authenticated session.
    ///
    /// A failure never carries the command line, which holds the
    /// password.
    pub fn login(self, credentials: &Credentials) -> DeployResult<Session<R>> {
        info!("Logging in as {}...", credentials.username);
        self.runner
            .run(
                CLI,
                &[
                    "login",
                    "-e",
                    &credentials.username,
                    "-y",
                    "-p",
                    &credentials.password,
                ],
            )
            .map_err(|_| DeployError::LoginFailed(credentials.username.clone()))?;

        Ok(Session {
            runner: self.runner,
        })
    }
}

/// Authenticated `gigalixir` session. Every provider operation
/// after login goes through this handle.
pub struct Session<R> {
    runner: R,
}

impl<R: CommandRunner> Session<R> {
    /// The runner backing this session, for non-gigalixir calls
    /// made in the same run.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Point the `gigalixir` git remote at `app`.
    pub fn add_git_remote(&self, app: &str) -> DeployResult<()> {
        self.runner.run_interactive(CLI, &["git:remote", app])
    }

    pub fn app_exists(&self, app: &str) -> DeployResult<bool> {
        let output = self.runner.run(CLI, &["apps"])?;
        Ok(model::parse_app_names(&output)?.contains(app))
    }

    pub fn create_app(&self, app: &str) -> DeployResult<()> {
        info!("Creating app {app}...");
        self.runner
            .run_interactive(CLI, &["apps:create", "--name", app])
    }

    /// Request a free-tier Postgres database for `app`.
    pub fn create_database(&self, app: &str) -> DeployResult<()> {
        info!("Creating free database for {app}...");
        self.runner
            .run_interactive(CLI, &["pg:create", "--free", "-y", "-a", app])
    }

    /// Set one config value. A failure names only the key, since
    /// values are often secrets.
    pub fn set_config(&self, app: &str, value: &ConfigValue) -> DeployResult<()> {
        info!("Setting config {}", value.key);
        let pair = format!("{}={}", value.key, value.value);
        self.runner
            .run(CLI, &["config:set", "-a", app, &pair])
            .map(|_| ())
            .map_err(|_| DeployError::ConfigSetFailed {
                app: app.to_string(),
                key: value.key.clone(),
            })
    }

    /// Version of the newest release, 0 before the first deploy.
    pub fn current_release(&self, app: &str) -> DeployResult<u64> {
        let output = self.runner.run(CLI, &["releases", "-a", app])?;
        model::parse_current_release(&output)
    }

    pub fn pod_status(&self, app: &str) -> DeployResult<PodStatus> {
        let output = self.runner.run(CLI, &["ps", "-a", app])?;
        PodStatus::parse(&output)
    }

    pub fn scale(&self, app: &str, replicas: u32) -> DeployResult<()> {
        let flag = format!("--replicas={replicas}");
        self.runner
            .run_interactive(CLI, &["ps:scale", &flag, "-a", app])
    }

    pub fn migrate(&self, app: &str) -> DeployResult<()> {
        self.runner.run_interactive(CLI, &["ps:migrate", "-a", app])
    }

    /// Roll `app` back to the release before the current one.
    pub fn rollback(&self, app: &str) -> DeployResult<()> {
        self.runner
            .run_interactive(CLI, &["releases:rollback", "-a", app])
    }
}

use tracing::info;

use crate::actions;
use crate::cmd::CommandRunner;
use crate::error::DeployResult;
use crate::gigalixir::{Gigalixir, Session};
use crate::git::Push;
use crate::health::{self, PollPolicy};
use crate::inputs::{ConfigValue, DeploymentRequest};
use crate::ssh;

/// Deployment pipeline: session setup, app provisioning, push,
/// and the optional migration flow.
pub struct Pipeline<R> {
    request: DeploymentRequest,
    runner: R,
    poll: PollPolicy,
}

impl<R: CommandRunner> Pipeline<R> {
    #[must_use]
    pub const fn new(request: DeploymentRequest, runner: R) -> Self {
        Self {
            request,
            runner,
            poll: PollPolicy::new(),
        }
    }

    #[must_use]
    pub const fn poll(mut self, policy: PollPolicy) -> Self {
        self.poll = policy;
        self
    }

    /// Run every step in order. The first failure ends the run.
    pub fn run(&self) -> DeployResult<()> {
        let request = &self.request;
        let app = request.app.as_str();

        let cli = Gigalixir::new(&self.runner);
        actions::group("Installing gigalixir", || cli.install())?;
        let session = actions::group("Logging in to gigalixir", || {
            cli.login(&request.credentials)
        })?;

        actions::group("Setting git remote", || session.add_git_remote(app))?;

        let exists = actions::group("Checking if app exists", || session.app_exists(app))?;
        if exists {
            info!("App {app} already exists");
        } else {
            actions::group("Creating app", || self.provision(&session))?;
        }

        let baseline = actions::group("Getting current release", || {
            session.current_release(app)
        })?;
        info!("Current release: {baseline}");

        actions::group("Deploying to gigalixir", || {
            Push {
                clean_cache: request.clean_cache,
                subfolder: request.app_subfolder.as_deref(),
            }
            .run(session.runner())
        })?;

        if request.migrations {
            self.migrate(&session, baseline)?;
        }

        info!("Deployment of {app} complete");
        Ok(())
    }

    /// Create the app, its database, and initial config.
    ///
    /// Config values are applied one call each in input order;
    /// a failure leaves earlier values set.
    fn provision(&self, session: &Session<&R>) -> DeployResult<()> {
        let request = &self.request;
        let app = request.app.as_str();

        session.create_app(app)?;

        if request.create_database {
            session.create_database(app)?;
        }

        if request.set_url_host {
            session.set_config(app, &url_host(app))?;
        }

        for value in &request.config_values {
            session.set_config(app, value)?;
        }

        Ok(())
    }

    fn migrate(&self, session: &Session<&R>, baseline: u64) -> DeployResult<()> {
        let app = self.request.app.as_str();

        actions::group("Adding private key", || {
            ssh::install_private_key(session.runner(), &self.request.ssh_private_key)
        })?;

        actions::group("Waiting for new release to deploy", || {
            health::wait_for_new_release(session, app, baseline, self.poll)
        })?;

        let Err(err) = actions::group("Running migrations", || session.migrate(app)) else {
            return Ok(());
        };

        if baseline == 0 {
            actions::warning("Migration failed");
        } else {
            actions::group("Rolling back", || session.rollback(app))?;
            actions::warning(&format!(
                "Migration failed, rolling back to the previous release: {baseline}"
            ));
        }

        Err(err)
    }
}

/// `URL_HOST` pointing at the app's default gigalixirapp.com host.
#[must_use]
pub fn url_host(app: &str) -> ConfigValue {
    ConfigValue {
        key: "URL_HOST".to_string(),
        value: format!("{app}.gigalixirapp.com"),
    }
}

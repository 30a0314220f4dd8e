use std::fmt;

use clap::Parser;

use crate::error::{DeployError, DeployResult};

const REDACTED: &str = "<redacted>";

/// Raw action inputs.
///
/// The Actions runner exposes every input as `INPUT_<NAME>`;
/// each one can also be passed as a flag for local runs. Values
/// stay optional here so blank inputs are caught by
/// [`DeploymentRequest::from_inputs`] with a named error.
#[derive(Default, Parser)]
#[command(name = "gigalixir-deploy")]
#[command(about = "Deploy to Gigalixir and run migrations")]
#[command(version)]
pub struct Inputs {
    /// Gigalixir account email
    #[arg(long, env = "INPUT_GIGALIXIR_USERNAME")]
    pub gigalixir_username: Option<String>,

    /// Gigalixir account password
    #[arg(long, env = "INPUT_GIGALIXIR_PASSWORD", hide_env_values = true)]
    pub gigalixir_password: Option<String>,

    /// Private key used to reach the app for migrations
    #[arg(long, env = "INPUT_SSH_PRIVATE_KEY", hide_env_values = true)]
    pub ssh_private_key: Option<String>,

    /// Name of the Gigalixir app
    #[arg(long, env = "INPUT_GIGALIXIR_APP")]
    pub gigalixir_app: Option<String>,

    /// Run migrations after deploying ("true" to enable)
    #[arg(long, env = "INPUT_MIGRATIONS")]
    pub migrations: Option<String>,

    /// Create a free database when creating the app
    #[arg(long, env = "INPUT_CREATE_DATABASE")]
    pub create_database: Option<String>,

    /// Point the app's URL host config at gigalixirapp.com on creation
    #[arg(long, env = "INPUT_SET_URL_HOST")]
    pub set_url_host: Option<String>,

    /// Newline-separated KEY=VALUE pairs set on app creation
    #[arg(long, env = "INPUT_CONFIG_VALUES")]
    pub config_values: Option<String>,

    /// Rebuild without the build cache
    #[arg(long, env = "INPUT_GIGALIXIR_CLEAN")]
    pub gigalixir_clean: Option<String>,

    /// Deploy only this subdirectory of the repository
    #[arg(long, env = "INPUT_APP_SUBFOLDER")]
    pub app_subfolder: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A single `KEY=VALUE` entry from the config text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    pub key: String,
    pub value: String,
}

/// Validated deployment parameters for one run.
///
/// `Debug` output redacts the password and the private key.
#[derive(Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct DeploymentRequest {
    pub credentials: Credentials,
    pub ssh_private_key: String,
    pub app: String,
    pub migrations: bool,
    pub create_database: bool,
    pub set_url_host: bool,
    pub clean_cache: bool,
    pub app_subfolder: Option<String>,
    pub config_values: Vec<ConfigValue>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for DeploymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.config_values.iter().map(|v| v.key.as_str()).collect();
        f.debug_struct("DeploymentRequest")
            .field("credentials", &self.credentials)
            .field("ssh_private_key", &REDACTED)
            .field("app", &self.app)
            .field("migrations", &self.migrations)
            .field("create_database", &self.create_database)
            .field("set_url_host", &self.set_url_host)
            .field("clean_cache", &self.clean_cache)
            .field("app_subfolder", &self.app_subfolder)
            .field("config_keys", &keys)
            .finish()
    }
}

impl DeploymentRequest {
    /// Validate raw inputs. Fails on the first required input
    /// that is absent or blank.
    pub fn from_inputs(inputs: Inputs) -> DeployResult<Self> {
        let username = required(inputs.gigalixir_username, "GIGALIXIR_USERNAME")?;
        let password = required(inputs.gigalixir_password, "GIGALIXIR_PASSWORD")?;
        let ssh_private_key = required(inputs.ssh_private_key, "SSH_PRIVATE_KEY")?;
        let app = required(inputs.gigalixir_app, "GIGALIXIR_APP")?;
        let migrations = required(inputs.migrations, "MIGRATIONS")?;
        let create_database = required(inputs.create_database, "CREATE_DATABASE")?;

        Ok(Self {
            credentials: Credentials { username, password },
            ssh_private_key,
            app: app.trim().to_string(),
            migrations: is_true(&migrations),
            create_database: is_true(&create_database),
            set_url_host: inputs.set_url_host.as_deref().is_some_and(is_true),
            clean_cache: inputs.gigalixir_clean.as_deref().is_some_and(is_true),
            app_subfolder: optional(inputs.app_subfolder),
            config_values: inputs
                .config_values
                .as_deref()
                .map(parse_config_values)
                .unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, name: &str) -> DeployResult<String> {
    optional(value).ok_or_else(|| DeployError::InputMissing(name.to_string()))
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Action inputs are strings; only `"true"` enables a flag.
#[must_use]
pub fn is_true(value: &str) -> bool {
    value.trim() == "true"
}

/// Parse newline-delimited `KEY=VALUE` text.
///
/// Splits each line on the first `=`. Blank lines, lines without
/// `=`, and lines with an empty key are skipped.
///
/// ```
/// use gigalixir_deploy::inputs::parse_config_values;
///
/// let values = parse_config_values("A=1\nBAD_LINE\nURL=a=b");
/// assert_eq!(values.len(), 2);
/// assert_eq!(values[1].value, "a=b");
/// ```
#[must_use]
pub fn parse_config_values(text: &str) -> Vec<ConfigValue> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| ConfigValue {
            key: key.trim().to_string(),
            value: value.to_string(),
        })
        .collect()
}

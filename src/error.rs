pub type DeployResult<T> = Result<T, DeployError>;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("required input missing: {0}")]
    InputMissing(String),

    #[error("command failed: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("gigalixir login failed for {0}")]
    LoginFailed(String),

    #[error("failed to install the SSH private key")]
    KeyInstallFailed,

    #[error("failed to set config value {key} on {app}")]
    ConfigSetFailed { app: String, key: String },

    #[error("release version is not a number: {0}")]
    InvalidVersion(String),

    #[error(
        "Taking too long for new release of '{0}' to deploy \
         ({1} attempts)"
    )]
    HealthcheckTimeout(String, u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

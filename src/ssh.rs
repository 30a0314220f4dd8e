use tracing::info;

use crate::cmd::CommandRunner;
use crate::error::{DeployError, DeployResult};

/// Name the helper script runs under (`$0`).
pub const KEY_HELPER: &str = "add-private-key";

/// Install `private_key` as the SSH identity used by
/// `gigalixir ps:migrate`.
///
/// Runs the bundled helper script with the key as its only
/// argument. Errors never carry the key.
pub fn install_private_key<R: CommandRunner>(runner: &R, private_key: &str) -> DeployResult<()> {
    info!("Adding private key...");
    let script = include_str!("../scripts/add-private-key.sh");
    runner
        .run("sh", &["-c", script, KEY_HELPER, private_key])
        .map(|_| ())
        .map_err(|_| DeployError::KeyInstallFailed)
}

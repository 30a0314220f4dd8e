use tracing::info;

use crate::cmd::CommandRunner;
use crate::error::DeployResult;

/// Remote created by `gigalixir git:remote`.
pub const REMOTE: &str = "gigalixir";

/// Branch the provider builds from.
pub const DEPLOY_REF: &str = "refs/heads/master";

/// Header that tells the provider to skip its build cache.
pub const CLEAN_CACHE_HEADER: &str = "http.extraheader=GIGALIXIR-CLEAN: true";

/// What to push and how.
#[derive(Debug, Clone, Default)]
pub struct Push<'a> {
    pub clean_cache: bool,
    pub subfolder: Option<&'a str>,
}

impl Push<'_> {
    /// Force-push to the deploy branch, replacing whatever
    /// revision is deployed.
    pub fn run<R: CommandRunner>(&self, runner: &R) -> DeployResult<()> {
        let revision = match self.subfolder {
            Some(prefix) => {
                info!("Splitting subtree {prefix}...");
                runner.run("git", &["subtree", "split", "--prefix", prefix, "HEAD"])?
            }
            None => "HEAD".to_string(),
        };
        let refspec = format!("{revision}:{DEPLOY_REF}");

        let mut args: Vec<&str> = Vec::new();
        if self.clean_cache {
            args.extend(["-c", CLEAN_CACHE_HEADER]);
        }
        args.extend(["push", "-f", REMOTE, refspec.as_str()]);

        info!("Pushing {revision} to {REMOTE}...");
        runner.run_interactive("git", &args)
    }
}

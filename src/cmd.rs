use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use crate::error::{DeployError, DeployResult};

/// Executes external programs on behalf of the pipeline.
///
/// Every process the deployment touches goes through this trait
/// so the orchestration can be driven by a scripted runner in
/// tests.
pub trait CommandRunner {
    /// Run a command and capture its stdout. Fails if the
    /// command returns a non-zero exit code.
    fn run(&self, program: &str, args: &[&str]) -> DeployResult<String>;

    /// Run a command with stdin/stdout/stderr inherited.
    fn run_interactive(&self, program: &str, args: &[&str]) -> DeployResult<()>;

    /// Check if a command exists on PATH.
    fn command_exists(&self, program: &str) -> bool;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &str, args: &[&str]) -> DeployResult<String> {
        (**self).run(program, args)
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> DeployResult<()> {
        (**self).run_interactive(program, args)
    }

    fn command_exists(&self, program: &str) -> bool {
        (**self).command_exists(program)
    }
}

/// Runs commands on the local machine with `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct System;

impl System {
    /// `program args` with stdout and stderr both set to `stdio`.
    fn command(program: &str, args: &[&str], stdio: fn() -> Stdio) -> Command {
        debug!("running {program} {}", args.first().unwrap_or(&""));
        let mut command = Command::new(program);
        command.args(args).stdout(stdio()).stderr(stdio());
        command
    }

    /// Maps a spawn error, naming the program when it is missing.
    fn spawn_error(program: &str) -> impl FnOnce(std::io::Error) -> DeployError + '_ {
        move |e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DeployError::CommandNotFound(program.to_string())
            } else {
                DeployError::Io(e)
            }
        }
    }

    fn check(program: &str, args: &[&str], status: ExitStatus) -> DeployResult<()> {
        if status.success() {
            Ok(())
        } else {
            Err(DeployError::CommandFailed {
                command: format_command(program, args),
                code: status.code(),
            })
        }
    }
}

impl CommandRunner for System {
    fn run(&self, program: &str, args: &[&str]) -> DeployResult<String> {
        let output = Self::command(program, args, Stdio::piped)
            .output()
            .map_err(Self::spawn_error(program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("{program} {}: {}", args.first().unwrap_or(&""), stderr.trim());
        }
        Self::check(program, args, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> DeployResult<()> {
        let status = Self::command(program, args, Stdio::inherit)
            .stdin(Stdio::inherit())
            .status()
            .map_err(Self::spawn_error(program))?;
        Self::check(program, args, status)
    }

    fn command_exists(&self, program: &str) -> bool {
        std::env::var_os("PATH").is_some_and(|path| {
            std::env::split_paths(&path).any(|dir| dir.join(program).is_file())
        })
    }
}

/// Join a program and its arguments into a single display
/// string.
#[must_use]
pub fn format_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| (*a).to_string()));
    parts.join(" ")
}

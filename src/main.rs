use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gigalixir_deploy::{DeploymentRequest, Inputs, Pipeline, System, actions};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            actions::error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let inputs = Inputs::parse();
    let request = DeploymentRequest::from_inputs(inputs)?;

    actions::mask(&request.credentials.password);
    actions::mask(&request.ssh_private_key);

    Pipeline::new(request, System).run()?;
    Ok(())
}

//! Deploy to Gigalixir from a GitHub Actions workflow.
//!
//! A run is a fixed sequence of CLI calls:
//!
//! 1. **Session** - install the `gigalixir` CLI, log in, add the
//!    `gigalixir` git remote
//! 2. **Provision** - when the app does not exist yet, create it,
//!    optionally with a free database and initial config values
//! 3. **Deploy** - record the current release, then force-push
//!    `HEAD` to the provider
//! 4. **Migrate** (optional) - install the deploy key, wait for
//!    the new release to be healthy, run migrations, and roll back
//!    if they fail
//!
//! Every external process goes through [`CommandRunner`], and
//! every provider call after login goes through a
//! [`Session`](gigalixir::Session).
//!
//! # Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use gigalixir_deploy::{DeploymentRequest, Inputs, Pipeline, System};
//!
//! fn main() -> anyhow::Result<()> {
//!     let request = DeploymentRequest::from_inputs(Inputs::parse())?;
//!     Pipeline::new(request, System).run()?;
//!     Ok(())
//! }
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod actions;
pub mod cmd;
pub mod error;
pub mod gigalixir;
pub mod git;
pub mod health;
pub mod inputs;
pub mod model;
pub mod pipeline;
pub mod ssh;

pub use cmd::{CommandRunner, System};
pub use error::{DeployError, DeployResult};
pub use health::PollPolicy;
pub use inputs::{DeploymentRequest, Inputs};
pub use pipeline::Pipeline;

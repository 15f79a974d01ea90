//! Runs one validated invocation: builds the HTTP collaborators, drives the
//! dispatcher on a single-threaded runtime and prints the outcome.

use anyhow::{Context, Result};

use super::dispatch::Dispatcher;
use super::report::{print_error, print_success};
use super::validate::Invocation;
use crate::api::HttpCollaborators;
use crate::config::Settings;
use crate::log_debug;

/// Dispatch failures are printed, not returned: the process still exits 0.
/// Only setup problems (HTTP client, runtime) come back as errors.
pub fn execute(invocation: Invocation, settings: &Settings, json: bool) -> Result<()> {
    let collaborators = HttpCollaborators::new(settings).context("Failed to build HTTP client")?;
    let dispatcher = Dispatcher::new(collaborators, settings.random_file.clone());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    let Invocation { command, argument } = invocation;
    log_debug!("dispatching {command} (file: {})", dispatcher.random_file().display());

    match rt.block_on(dispatcher.dispatch(command, argument.as_deref())) {
        Ok(out) => print_success(json, out.command.name(), out.argument.as_deref(), &out.lines),
        Err(err) => print_error(json, &err),
    }
    Ok(())
}

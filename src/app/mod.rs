//! Application wiring for the CLI: configuration, progress UI, exit status.

pub(crate) mod config_manager;
pub(crate) mod config_runtime;
pub(crate) mod exit_handler;
pub(crate) mod progress_manager;

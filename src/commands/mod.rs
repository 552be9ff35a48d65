//! CLI command handlers.

mod extract;
mod scan;

pub(crate) use extract::run_extract_command;
pub(crate) use scan::run_scan_command;

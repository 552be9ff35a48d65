//! Progress UI (bar) for corpus scans.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Whether a progress bar should be drawn for this run.
pub(crate) fn should_show_progress(no_progress: bool, quiet: bool, stderr_is_terminal: bool) -> bool {
    !no_progress && !quiet && stderr_is_terminal
}

/// Creates the scan progress bar when enabled and there is work to show.
pub(crate) fn create_scan_progress(enabled: bool, total: usize) -> Option<ProgressBar> {
    if !enabled || total == 0 {
        return None;
    }

    let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} documents {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

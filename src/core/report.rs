// src/core/report.rs
//
// Diagnostics and timing lines shown to the user. These are separate from `log` records.

use colored::Colorize;
use std::time::Duration;

/// Formats a wall-clock duration the way job reports show it.
///
/// - below one second: whole milliseconds (`"420 ms"`)
/// - below one minute: seconds with three decimals (`"12.345 s"`)
/// - otherwise: minutes plus seconds with two decimals (`"2 min, 3.50 s"`)
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0} ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.3} s", secs)
    } else {
        let minutes = elapsed.as_secs() / 60;
        let seconds = secs % 60.0;
        format!("{} min, {:.2} s", minutes, seconds)
    }
}

/// The timing line printed after a job finishes. `job_title` is empty for sequential runs.
pub fn time_taken_line(elapsed: Duration, job_title: &str) -> String {
    format!("🐘⏱️ {}{}", job_title, format_elapsed(elapsed))
}

/// Prints [`time_taken_line`] in green.
pub fn print_time_taken(elapsed: Duration, job_title: &str) {
    println!("{}", time_taken_line(elapsed, job_title).green().bold());
}

/// Prints a user-facing diagnostic to stderr.
pub fn print_error(text: &str) {
    eprintln!("🐘 ERROR: {}", text);
}

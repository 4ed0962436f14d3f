//! Styled terminal output for the CLI
//!
//! Human-facing messages go through these helpers so every command agrees
//! on glyphs and colors. JSON output paths bypass this module entirely.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Report a completed step
pub fn success(msg: &str) {
    println!("{} {msg}", style("✓").green().bold());
}

/// Report a failure on stderr
pub fn error(msg: &str) {
    eprintln!("{} {msg}", style("✗").red().bold());
}

/// Call out something that needs attention on stderr
pub fn warning(msg: &str) {
    eprintln!("{} {msg}", style("⚠").yellow().bold());
}

/// Neutral progress note
pub fn info(msg: &str) {
    println!("{} {msg}", style("ℹ").blue().bold());
}

/// Underlined section header, preceded by a blank line
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Indented key-value detail line
pub fn kv(key: &str, value: &str) {
    println!("  {}: {value}", style(key).dim());
}

/// Steady-tick spinner shown while an external tool runs
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars(TICK_CHARS),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static BRAIN: Emoji<'_, '_> = Emoji("🧠 ", "");
pub static BASKET: Emoji<'_, '_> = Emoji("🧺 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        BASKET,
        style("Hamper Forecast").cyan().bold()
    );
    println!(
        "    {}",
        style("Islamic Family & Social Services Association").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the input configuration card
pub fn print_config(data: &Path, model: &Path, encoding: &str) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Data:     {:<37}│",
        FOLDER,
        truncate_path(data, 36)
    );
    println!(
        "    │  {} Model:    {:<37}│",
        BRAIN,
        truncate_path(model, 36)
    );
    println!(
        "    │  {} Encoding: {:<37}│",
        CHART,
        truncate_string(encoding, 36)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a section header with styling
pub fn print_section_header(title: &str) {
    println!();
    println!("    {}", style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print an error and its cause chain without exiting
pub fn print_error(error: &anyhow::Error) {
    eprintln!("    {} {}", style("✗").red().bold(), style(error).red());
    for cause in error.chain().skip(1) {
        eprintln!("      {} {}", style("caused by:").dim(), cause);
    }
}

/// Print the prediction result line
pub fn print_prediction(hampers: i64) {
    println!();
    println!(
        "    {} Predicted Number of Food Hampers: {}",
        style("✓").green().bold(),
        style(hampers).yellow().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

use colored::*;
use ncsbe_results::RefreshSummary;

/// Print refresh summary
pub fn summary(summary: &RefreshSummary) {
    println!("\n{}", "🎉 Results Loaded!".bright_green().bold());
    println!("{}", "=".repeat(50).bright_green());
    println!(
        "{}: {}",
        "Source".bright_white().bold(),
        summary.source_url.bright_cyan()
    );
    println!(
        "{}: {}",
        "Contests".bright_white().bold(),
        summary.contests.to_string().bright_yellow()
    );
    println!(
        "{}: {}",
        "Rows".bright_white().bold(),
        summary.rows.to_string().bright_yellow()
    );
    for stage in &summary.stages {
        println!(
            "  {}: {} ms",
            stage.stage.to_string().blue(),
            stage.duration_ms.to_string().bright_white()
        );
    }
    println!(
        "{}: {} ms",
        "Total Duration".bright_white().bold(),
        summary.total_duration_ms.to_string().bright_green().bold()
    );
    println!(
        "{}: {}",
        "Refreshed At".bright_white().bold(),
        summary.refreshed_at.to_rfc3339()
    );
    println!();
}

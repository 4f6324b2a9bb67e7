use std::io::Write;

use citerank_core::UnitSummary;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print one line per (venue, year) unit plus a totals footer.
pub fn print_summary(
    w: &mut dyn Write,
    summaries: &[UnitSummary],
    color: ColorMode,
) -> std::io::Result<()> {
    for summary in summaries {
        let line = format!(
            "{:<6} {}  {:>4} papers  -> {}",
            summary.venue.acronym(),
            summary.year,
            summary.papers,
            summary.artifact
        );
        if summary.papers == 0 && color.enabled() {
            writeln!(w, "{}", line.yellow())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }

    let total_papers: usize = summaries.iter().map(|s| s.papers).sum();
    let footer = format!(
        "{} rankings written, {} papers in total",
        summaries.len(),
        total_papers
    );
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", footer.green())?;
    } else {
        writeln!(w, "{}", footer)?;
    }
    Ok(())
}

//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::assessment::Assessment;
use crate::model::LikelihoodPercent;
use crate::predisposition::region_tier;
use crate::trajectory::Trajectory;

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Width of the gauge in the text summary
pub const GAUGE_WIDTH: usize = 20;

/// Horizontal bar for a likelihood, e.g. `[###############-----]`
pub fn gauge(likelihood: LikelihoodPercent, width: usize) -> String {
    let filled = ((likelihood.fraction() * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One glyph per trajectory day, scaled over the fixed 0..100 range
pub fn sparkline(trajectory: &Trajectory) -> String {
    let top = (SPARK_GLYPHS.len() - 1) as f64;
    trajectory
        .values()
        .map(|v| {
            let idx = ((v / 100.0) * top).round() as usize;
            SPARK_GLYPHS[idx.min(SPARK_GLYPHS.len() - 1)]
        })
        .collect()
}

/// Render a single assessment as a summary panel
pub fn render_text(assessment: &Assessment) -> String {
    let s = &assessment.scenario;
    let mut output = String::new();

    let date = match s.date {
        Some(d) => d.format("%d %b %Y").to_string(),
        None => "not set".to_string(),
    };

    output.push_str("Flood likelihood assessment\n");
    output.push_str(&format!("  {:<16}{}\n", "Date", date));
    output.push_str(&format!(
        "  {:<16}{} ({} baseline)\n",
        "Region",
        s.region,
        region_tier(s.region).as_str()
    ));
    output.push_str(&format!("  {:<16}{}\n", "Terrain", s.terrain));
    output.push_str(&format!("  {:<16}{}\n", "Soil", s.soil));
    output.push_str(&format!(
        "  {:<16}{:.1} mm/day over {} day(s)\n",
        "Rainfall",
        s.intensity.mm_per_day(),
        s.window.days()
    ));
    output.push('\n');

    output.push_str(&format!(
        "  {:<16}{:.3}\n",
        "Predisposition",
        assessment.predisposition.value()
    ));
    output.push_str(&format!(
        "  {:<16}{:.2}%  {}  {}\n",
        "Likelihood",
        assessment.likelihood.percent(),
        gauge(assessment.likelihood, GAUGE_WIDTH),
        assessment.band.as_str().to_uppercase()
    ));
    output.push('\n');

    output.push_str(&format!(
        "  {:<16}{}\n",
        "14-day outlook",
        sparkline(&assessment.trajectory)
    ));
    for (day, value) in assessment.trajectory.values().enumerate() {
        output.push_str(&format!("    day {:>2}  {:>6.2}\n", day, value));
    }
    output.push_str(&format!(
        "  Peak day {} at {:.2}%, trend {:+.2} pts\n",
        assessment.peak.day,
        assessment.peak.likelihood.percent(),
        assessment.trend
    ));

    output
}

/// Render a single assessment as JSON
pub fn render_json(assessment: &Assessment) -> String {
    serde_json::to_string_pretty(assessment).unwrap_or_else(|_| "{}".to_string())
}

/// Render sorted assessments as a table
pub fn render_batch_text(assessments: &[Assessment]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<8} {:<9} {:<16} {:<14} {:<7} {:>7} {:>4}  {}\n",
        "LIKELY", "BAND", "REGION", "TERRAIN", "SOIL", "MM/DAY", "DAYS", "OUTLOOK"
    ));

    for a in assessments {
        let s = &a.scenario;
        output.push_str(&format!(
            "{:<8} {:<9} {:<16} {:<14} {:<7} {:>7.1} {:>4}  {}\n",
            format!("{:.2}", a.likelihood.percent()),
            a.band.as_str(),
            truncate_or_pad(s.region.display_name(), 16),
            truncate_or_pad(s.terrain.display_name(), 14),
            s.soil.display_name(),
            s.intensity.mm_per_day(),
            s.window.days(),
            sparkline(&a.trajectory),
        ));
    }

    output
}

/// Render sorted assessments as JSON
pub fn render_batch_json(assessments: &[Assessment]) -> String {
    serde_json::to_string_pretty(assessments).unwrap_or_else(|_| "[]".to_string())
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

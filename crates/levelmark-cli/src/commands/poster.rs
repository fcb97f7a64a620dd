//! The `levelmark poster` command: render an achievement poster as text.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::presets;
use comfy_table::Table;

use levelmark_core::model::Level;
use levelmark_core::report::AssessmentReport;
use levelmark_core::state::PosterStyle;
use levelmark_learn::poster::{Poster, PosterStats, TimelineStatus};

pub fn execute(report: Option<PathBuf>, level: String, style: String) -> Result<()> {
    let mut out = std::io::stdout();
    run(report, level, style, &mut out)
}

fn run<W: Write>(
    report: Option<PathBuf>,
    level: String,
    style: String,
    out: &mut W,
) -> Result<()> {
    let style = match style.as_str() {
        "classic" => PosterStyle::Classic,
        "minimal" => PosterStyle::Minimal,
        "vibrant" => PosterStyle::Vibrant,
        other => anyhow::bail!("unknown style {other:?} (expected classic, minimal, vibrant)"),
    };

    let (level, stats) = match report {
        Some(path) => {
            let report = AssessmentReport::load_json(&path)?;
            let stats = PosterStats {
                best_score: report.breakdown.overall,
                accuracy: report.breakdown.overall,
                ..Default::default()
            };
            (report.level, stats)
        }
        None => (level.parse::<Level>()?, PosterStats::default()),
    };

    let poster = Poster::build(level, stats, style);
    let info = poster.level.info();

    writeln!(out, "CEFR {} - {}", poster.level, info.name)?;
    writeln!(out, "{}", info.description)?;
    writeln!(out)?;

    let timeline: Vec<String> = poster
        .timeline
        .iter()
        .map(|entry| {
            let mark = match entry.status {
                TimelineStatus::Completed => "[x]",
                TimelineStatus::Current => "[*]",
                TimelineStatus::Future => "[ ]",
            };
            format!("{} {mark}", entry.level)
        })
        .collect();
    writeln!(out, "{}", timeline.join("  "))?;
    writeln!(out)?;

    let mut table = Table::new();
    table.load_preset(match poster.style {
        PosterStyle::Classic => presets::UTF8_FULL,
        PosterStyle::Minimal => presets::NOTHING,
        PosterStyle::Vibrant => presets::UTF8_BORDERS_ONLY,
    });
    table.set_header(["Statistic", "Value"]);
    table.add_row(["Words learned".to_string(), poster.stats.words_learned.to_string()]);
    table.add_row(["Best score".to_string(), format!("{}%", poster.stats.best_score)]);
    table.add_row(["Study streak".to_string(), format!("{} days", poster.stats.streak_days)]);
    table.add_row(["Articles read".to_string(), poster.stats.articles_read.to_string()]);
    table.add_row(["Accuracy".to_string(), format!("{}%", poster.stats.accuracy)]);
    writeln!(out, "{table}")?;

    writeln!(out)?;
    writeln!(out, "Achievements:")?;
    for achievement in &poster.achievements {
        writeln!(out, "  - {} ({})", achievement.title, achievement.detail)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Certificate {} issued {}",
        poster.certificate_id,
        poster.issued_on.format("%Y-%m-%d")
    )?;

    Ok(())
}

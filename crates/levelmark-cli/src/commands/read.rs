//! The `levelmark read` command: print graded passages for a level.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use levelmark_core::model::Level;
use levelmark_core::state::ReadingMode;
use levelmark_learn::reading;

pub fn execute(passages: PathBuf, level: String, mode: String) -> Result<()> {
    let mut out = std::io::stdout();
    run(passages, level, mode, &mut out)
}

fn run<W: Write>(passages: PathBuf, level: String, mode: String, out: &mut W) -> Result<()> {
    let level: Level = level.parse()?;
    let mode = match mode.as_str() {
        "bilingual" => ReadingMode::Bilingual,
        "english" => ReadingMode::SourceOnly,
        "chinese" => ReadingMode::TranslationOnly,
        other => anyhow::bail!("unknown mode {other:?} (expected bilingual, english, chinese)"),
    };

    let library = reading::parse_reading(&passages)?;
    let (found_level, found) = library
        .best_for(level)
        .ok_or_else(|| anyhow::anyhow!("no passages at or below {level}"))?;
    if found_level != level {
        writeln!(
            out,
            "No passages at {level}; showing {found_level} instead."
        )?;
    }

    for passage in found {
        writeln!(out)?;
        match mode {
            ReadingMode::TranslationOnly if !passage.title_translation.is_empty() => {
                writeln!(out, "== {} ==", passage.title_translation)?
            }
            ReadingMode::Bilingual if !passage.title_translation.is_empty() => writeln!(
                out,
                "== {} / {} ==",
                passage.title, passage.title_translation
            )?,
            _ => writeln!(out, "== {} ==", passage.title)?,
        }
        writeln!(out, "[{}] {} words", passage.level, passage.word_count())?;
        for line in passage.render(mode) {
            writeln!(out, "{line}")?;
        }

        let glossary = passage.leveled_words();
        if !glossary.is_empty() {
            let mut table = Table::new();
            table.set_header(["Word", "Meaning"]);
            for gloss in glossary {
                table.add_row([gloss.word.as_str(), gloss.meaning.as_str()]);
            }
            writeln!(out, "{table}")?;
        }
    }

    if let Some(preview) = library.preview_above(level) {
        writeln!(out)?;
        writeln!(
            out,
            "Up next at {}: \"{}\"",
            preview.level, preview.title
        )?;
    }

    Ok(())
}

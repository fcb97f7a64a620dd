//! The `levelmark quiz` command: interactive comprehension quiz with
//! per-answer feedback.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;

use levelmark_core::model::Level;
use levelmark_core::parser;
use levelmark_core::quiz::QuizSession;
use levelmark_core::recommend;
use levelmark_core::report::{reviews, BankSummary, QuizReport};
use levelmark_core::select;

pub fn execute(
    bank: PathBuf,
    level: String,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run(bank, level, seed, output, &mut input, &mut out)
}

fn run<R: BufRead, W: Write>(
    bank: PathBuf,
    level: String,
    seed: Option<u64>,
    output: Option<PathBuf>,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let level: Level = level.parse()?;
    let bank_data = parser::parse_bank(&bank)?;
    let mut rng = super::rng_from(seed);
    let selected = select::select_quiz(&bank_data, level, &mut rng);
    let mut session = QuizSession::new(selected)
        .with_context(|| format!("bank has no questions near level {level}"))?;
    session.begin()?;
    let started = Instant::now();

    writeln!(
        out,
        "Quiz at {level}: {} questions. Enter an option number, 'q' to quit.",
        session.len()
    )?;

    let mut question_started = Instant::now();
    loop {
        let q = session.current_question();
        writeln!(out)?;
        writeln!(
            out,
            "Question {}/{} [{}]",
            session.current_index() + 1,
            session.len(),
            q.level
        )?;
        if let Some(context) = &q.context {
            writeln!(out, "{context}")?;
        }
        writeln!(out, "{}", q.prompt)?;
        for (i, option) in q.options.iter().enumerate() {
            writeln!(out, "  {}. {option}", i + 1)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            writeln!(out, "Input closed, leaving the quiz.")?;
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            writeln!(out, "Please type an option number or 'q'.")?;
            continue;
        }
        if trimmed == "q" {
            writeln!(out, "Quiz abandoned.")?;
            return Ok(());
        }

        let choice = match trimmed.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                writeln!(out, "Unrecognized input: {trimmed:?}")?;
                continue;
            }
        };

        match session.answer(choice, question_started.elapsed().as_secs_f64()) {
            Ok(feedback) => {
                if feedback.correct {
                    writeln!(out, "Correct!")?;
                } else {
                    writeln!(
                        out,
                        "Incorrect. The answer was {}.",
                        feedback.correct_index + 1
                    )?;
                }
                if !feedback.explanation.is_empty() {
                    writeln!(out, "{}", feedback.explanation)?;
                }
                writeln!(out, "Difficulty so far: {}", feedback.difficulty)?;
                if session.advance().is_none() {
                    break;
                }
                question_started = Instant::now();
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }
    let duration_ms = started.elapsed().as_millis() as u64;

    let outcome = session.finish()?;
    let review_lines = reviews(session.questions(), session.responses());

    writeln!(out)?;
    writeln!(out, "Quiz complete. Overall: {}%", outcome.breakdown.overall)?;
    let mut table = Table::new();
    table.set_header(["Ability", "Score"]);
    for (ability, pct) in outcome.breakdown.abilities.iter() {
        table.add_row([ability.to_string(), format!("{pct}%")]);
    }
    writeln!(out, "{table}")?;
    writeln!(
        out,
        "Mean time per answer: {:.1}s",
        outcome.mean_answer_secs
    )?;

    let feedback = recommend::for_quiz(&outcome);
    writeln!(out, "Feedback:")?;
    for (i, f) in feedback.iter().enumerate() {
        writeln!(out, "  {}. {f}", i + 1)?;
    }

    if let Some(path) = output {
        let report = QuizReport::from_outcome(
            BankSummary {
                id: bank_data.id.clone(),
                name: bank_data.name.clone(),
                question_count: bank_data.len(),
            },
            level,
            &outcome,
            feedback,
            review_lines,
            duration_ms,
        );
        report.save_json(&path)?;
        writeln!(out, "Report saved to {}", path.display())?;
    }

    Ok(())
}

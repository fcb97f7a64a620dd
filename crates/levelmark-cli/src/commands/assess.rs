//! The `levelmark assess` command: interactive placement test.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;

use levelmark_core::events::Event;
use levelmark_core::parser;
use levelmark_core::recommend;
use levelmark_core::report::{reviews, AssessmentReport, BankSummary};
use levelmark_core::select;
use levelmark_core::session::{AssessmentOutcome, AssessmentSession, FinishOutcome};
use levelmark_core::state::AppState;

pub fn execute(bank: PathBuf, seed: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run(bank, seed, output, &mut input, &mut out)
}

fn run<R: BufRead, W: Write>(
    bank: PathBuf,
    seed: Option<u64>,
    output: Option<PathBuf>,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let bank_data = parser::parse_bank(&bank)?;
    let mut rng = super::rng_from(seed);
    let selected = select::select_assessment(&bank_data, &mut rng);
    let mut session =
        AssessmentSession::new(selected).context("bank has no questions to select")?;
    session.begin()?;
    let started = Instant::now();

    writeln!(
        out,
        "Placement assessment: {} questions. Enter an option number to answer,",
        session.len()
    )?;
    writeln!(out, "'b' back, 'n' skip, 'f' finish, 'q' quit.")?;

    let outcome = loop {
        print_question(out, &session)?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            writeln!(out, "Input closed, leaving the assessment.")?;
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            writeln!(out, "Please type an option number or a command.")?;
            continue;
        }

        match trimmed {
            "q" => {
                writeln!(out, "Assessment abandoned.")?;
                return Ok(());
            }
            "b" => {
                if session.back().is_none() {
                    writeln!(out, "Already at the first question.")?;
                }
            }
            "n" => {
                if session.advance().is_none() {
                    writeln!(out, "Already at the last question. Enter 'f' to finish.")?;
                }
            }
            "f" => match session.finish()? {
                FinishOutcome::Completed(outcome) => break outcome,
                FinishOutcome::ConfirmationRequired { unanswered } => {
                    write!(
                        out,
                        "{unanswered} question(s) unanswered and will count as wrong. Finish anyway? [y/N] "
                    )?;
                    out.flush()?;
                    let mut confirm = String::new();
                    input.read_line(&mut confirm)?;
                    if confirm.trim().eq_ignore_ascii_case("y") {
                        break session.finish_confirmed()?;
                    }
                    writeln!(out, "Resuming.")?;
                }
            },
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => match session.record(n - 1) {
                    Ok(()) => {
                        if session.advance().is_none() {
                            writeln!(out, "Last question answered. Enter 'f' to finish.")?;
                        }
                    }
                    Err(e) => writeln!(out, "{e}")?,
                },
                _ => writeln!(out, "Unrecognized input: {other:?}")?,
            },
        }
    };
    let duration_ms = started.elapsed().as_millis() as u64;

    print_outcome(out, &outcome)?;
    let recommendations = recommend::for_assessment(&outcome);
    writeln!(out, "Recommendations:")?;
    for (i, r) in recommendations.iter().enumerate() {
        writeln!(out, "  {}. {r}", i + 1)?;
    }

    // Adopt the result into the learner profile and report what the
    // broadcast unlocked.
    let mut state = AppState::new();
    let (tx, rx) = mpsc::channel();
    state.bus_mut().subscribe(move |event| {
        tx.send(event.clone())
            .map_err(|_| anyhow::anyhow!("profile listener dropped"))
    });
    state.apply_assessment(&outcome);
    for event in rx.try_iter() {
        if let Event::LevelChanged { level, .. } = event {
            writeln!(
                out,
                "Profile updated: level {level}. Flashcards, reading, quizzes, and the poster are unlocked."
            )?;
        }
    }

    if let Some(path) = output {
        let report = AssessmentReport::from_outcome(
            BankSummary {
                id: bank_data.id.clone(),
                name: bank_data.name.clone(),
                question_count: bank_data.len(),
            },
            &outcome,
            recommendations,
            reviews(session.questions(), session.responses()),
            duration_ms,
        );
        report.save_json(&path)?;
        writeln!(out, "Report saved to {}", path.display())?;
    }

    Ok(())
}

fn print_question<W: Write>(out: &mut W, session: &AssessmentSession) -> Result<()> {
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
        let marker = if session.response_at(session.current_index()) == Some(i) {
            "*"
        } else {
            " "
        };
        writeln!(out, " {marker}{}. {option}", i + 1)?;
    }
    Ok(())
}

fn print_outcome<W: Write>(out: &mut W, outcome: &AssessmentOutcome) -> Result<()> {
    let info = outcome.level.info();
    writeln!(out)?;
    writeln!(out, "Your level: {} ({})", outcome.level, info.name)?;
    writeln!(out, "{}", info.description)?;
    writeln!(
        out,
        "Estimated vocabulary: {}-{} words",
        info.vocabulary_range.0, info.vocabulary_range.1
    )?;
    writeln!(out, "Final score: {:.1}", outcome.final_score)?;

    let mut table = Table::new();
    table.set_header(["Ability", "Score"]);
    for (ability, pct) in outcome.breakdown.abilities.iter() {
        table.add_row([ability.to_string(), format!("{pct}%")]);
    }
    writeln!(out, "{table}")?;
    writeln!(
        out,
        "Answered {} of {} ({} correct).",
        outcome.breakdown.answered, outcome.breakdown.total, outcome.breakdown.correct
    )?;
    Ok(())
}

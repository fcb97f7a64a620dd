//! The `levelmark study` command: flashcard loop over the cumulative
//! vocabulary set for a level.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::seq::SliceRandom;

use levelmark_core::model::Level;
use levelmark_learn::flashcard::{DeckMode, FlashcardDeck};
use levelmark_learn::vocab;

pub fn execute(vocab_path: PathBuf, level: String, seed: Option<u64>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run(vocab_path, level, seed, &mut input, &mut out)
}

fn run<R: BufRead, W: Write>(
    vocab_path: PathBuf,
    level: String,
    seed: Option<u64>,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let level: Level = level.parse()?;
    let bank = vocab::parse_vocab(&vocab_path)?;
    let mut cards = bank.cards_up_to(level);
    if cards.is_empty() {
        anyhow::bail!("no vocabulary at or below {level} in {}", vocab_path.display());
    }
    let mut rng = super::rng_from(seed);
    cards.shuffle(&mut rng);
    let mut deck = FlashcardDeck::new(cards)?;

    writeln!(out, "Studying {} cards up to {level}.", deck.stats().total)?;
    writeln!(
        out,
        "'f' flip, 'n' next, 'p' previous, 'l' learned, 's' star,"
    )?;
    writeln!(out, "'m all|review|hard' mode, 'i' stats, 'q' quit.")?;

    loop {
        print_card(out, &deck)?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            writeln!(out, "Please type a command ('f' flips, 'q' quits).")?;
            continue;
        }

        match trimmed {
            "q" => break,
            "f" => deck.flip(),
            "n" => {
                deck.next();
            }
            "p" => {
                deck.prev();
            }
            "l" => {
                deck.mark_learned();
                writeln!(out, "Marked \"{}\" as learned.", deck.current().word)?;
            }
            "s" => {
                let starred = deck.toggle_favorite();
                let word = &deck.current().word;
                if starred {
                    writeln!(out, "Starred \"{word}\".")?;
                } else {
                    writeln!(out, "Unstarred \"{word}\".")?;
                }
            }
            "i" => {
                let stats = deck.stats();
                writeln!(
                    out,
                    "{} cards, {} learned ({}%), {} starred, mode: {}",
                    stats.total,
                    stats.learned,
                    stats.percent_learned,
                    stats.favorites,
                    deck.mode()
                )?;
            }
            "m all" => switch_mode(out, &mut deck, DeckMode::All)?,
            "m review" => switch_mode(out, &mut deck, DeckMode::Review)?,
            "m hard" => switch_mode(out, &mut deck, DeckMode::Difficult)?,
            other => writeln!(out, "Unrecognized input: {other:?}")?,
        }
    }

    let stats = deck.stats();
    writeln!(
        out,
        "Session over: {} of {} learned ({}%).",
        stats.learned, stats.total, stats.percent_learned
    )?;
    Ok(())
}

fn switch_mode<W: Write>(out: &mut W, deck: &mut FlashcardDeck, mode: DeckMode) -> Result<()> {
    match deck.set_mode(mode) {
        Ok(()) => writeln!(out, "Mode: {mode} ({} cards).", deck.len())?,
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

fn print_card<W: Write>(out: &mut W, deck: &FlashcardDeck) -> Result<()> {
    let card = deck.current();
    writeln!(out)?;
    let learned = if deck.is_learned(&card.word) {
        " [learned]"
    } else {
        ""
    };
    let starred = if deck.favorites().contains(&card.word) {
        " [*]"
    } else {
        ""
    };
    writeln!(
        out,
        "Card {}/{} [{}]{learned}{starred}",
        deck.position() + 1,
        deck.len(),
        card.level
    )?;
    match &card.phonetic {
        Some(phonetic) => writeln!(out, "{} {phonetic}", card.word)?,
        None => writeln!(out, "{}", card.word)?,
    }
    if deck.is_flipped() {
        writeln!(out, "  {}", card.translation)?;
        if !card.example.is_empty() {
            writeln!(out, "  {}", card.example)?;
        }
        if !card.example_translation.is_empty() {
            writeln!(out, "  {}", card.example_translation)?;
        }
        if !card.etymology.is_empty() {
            writeln!(out, "  Origin: {}", card.etymology)?;
        }
    }
    Ok(())
}

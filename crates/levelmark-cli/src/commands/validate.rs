//! The `levelmark validate` command.

use std::path::PathBuf;

use anyhow::Result;

use levelmark_core::parser::{load_bank_directory, parse_bank, validate_bank};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        load_bank_directory(&bank_path)?
    } else {
        vec![parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "{}: {} questions across {} levels",
            bank.name,
            bank.len(),
            bank.levels.len()
        );

        for w in validate_bank(bank) {
            match &w.question_id {
                Some(id) => println!("  warning ({id}): {}", w.message),
                None => println!("  warning: {}", w.message),
            }
            total_warnings += 1;
        }
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!(
            "{total_warnings} warning(s) across {} bank(s).",
            banks.len()
        );
    }

    Ok(())
}

//! The `levelmark init` command: starter bank content.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("banks")?;

    let files = [
        ("banks/placement.toml", PLACEMENT_BANK),
        ("banks/quiz.toml", QUIZ_BANK),
        ("banks/vocabulary.toml", VOCABULARY_BANK),
        ("banks/passages.toml", PASSAGES),
    ];

    for (name, content) in files {
        let path = std::path::Path::new(name);
        if path.exists() {
            println!("{name} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {name}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Run: levelmark validate --bank banks/placement.toml");
    println!("  2. Run: levelmark assess");
    println!("  3. Run: levelmark study --level <your level>");

    Ok(())
}

const PLACEMENT_BANK: &str = include_str!("../../../../banks/placement.toml");
const QUIZ_BANK: &str = include_str!("../../../../banks/quiz.toml");
const VOCABULARY_BANK: &str = include_str!("../../../../banks/vocabulary.toml");
const PASSAGES: &str = include_str!("../../../../banks/passages.toml");

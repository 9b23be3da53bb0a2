//! The `quizportal init` command.

use std::path::Path;

use anyhow::Result;

use quizportal_core::quiz::QuizBank;
use quizportal_store::config::{LOCAL_CONFIG_FILE, SAMPLE_CONFIG};
use quizportal_store::open_store;

use super::GlobalOptions;

pub fn execute(options: &GlobalOptions) -> Result<()> {
    // Create quizportal.toml
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(LOCAL_CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    // Seed the quiz bank
    let config = options.resolve()?;
    let bank = QuizBank::new(open_store(&config)?);
    if bank.is_empty()? {
        bank.reset_to_defaults()?;
        println!("Seeded quiz bank with the default questions.");
    } else {
        println!("Quiz bank already has questions, skipping.");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizportal");
    println!("  2. Pick Admin, Teacher and Parent once each to set their logins");
    println!("  3. Log in as Parent and register each child");

    Ok(())
}

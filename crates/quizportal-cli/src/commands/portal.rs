//! The interactive portal.

use std::io;

use anyhow::{Context, Result};

use quizportal_core::console::LineConsole;
use quizportal_core::SessionController;
use quizportal_store::open_store;

use super::GlobalOptions;

pub fn execute(options: &GlobalOptions) -> Result<()> {
    let config = options.resolve()?;
    let store = open_store(&config)?;

    let mut controller =
        SessionController::new(store).with_pass_threshold(config.pass_threshold);
    let mut console = LineConsole::new(io::stdin().lock(), io::stdout().lock());

    controller
        .run(&mut console)
        .context("portal session failed")?;
    Ok(())
}

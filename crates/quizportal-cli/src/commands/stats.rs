//! The `quizportal stats` command.

use anyhow::Result;

use quizportal_core::ledger::{LedgerSummary, ProgressLedger};
use quizportal_core::model::{MAX_STARS, PLAYABLE_LEVELS};
use quizportal_store::open_store;

use super::GlobalOptions;

pub fn execute(options: &GlobalOptions, format: String) -> Result<()> {
    let config = options.resolve()?;
    let store = open_store(&config)?;
    let ledger = ProgressLedger::new(store).with_pass_threshold(config.pass_threshold);
    let summary = ledger.summary()?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_table(&summary),
    }

    Ok(())
}

fn print_table(summary: &LedgerSummary) {
    use comfy_table::{Cell, Table};

    if summary.students.is_empty() {
        println!("No results recorded yet.");
        return;
    }

    let mut table = Table::new();
    let mut header = vec!["Student".to_string(), "Attempts".to_string()];
    header.extend(PLAYABLE_LEVELS.iter().map(|l| format!("Best L{l}")));
    header.push("Unlocked".to_string());
    table.set_header(header);

    for student in &summary.students {
        let mut row = vec![
            Cell::new(&student.name),
            Cell::new(student.attempts),
        ];
        for level in PLAYABLE_LEVELS {
            let best = student
                .best_by_level
                .get(&level)
                .map(|s| format!("{s}/{MAX_STARS}"))
                .unwrap_or_else(|| "-".to_string());
            row.push(Cell::new(best));
        }
        row.push(Cell::new(if student.higher_levels_unlocked {
            "yes"
        } else {
            "no"
        }));
        table.add_row(row);
    }

    println!("{table}");
    println!("\n{} attempt(s) recorded.", summary.attempts);
    if let Some(avg) = summary.class_average {
        println!("Class Average: {avg:.2}/{MAX_STARS}");
    }
}

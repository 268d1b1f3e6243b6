use crate::project::Project;
use crate::todo;
use anyhow::{Context, Result};
use colored::*;

/// `seed todo`: print every TODO comment and write them to `ToDoLists.txt`.
pub fn handle_todo(project: &Project) -> Result<()> {
    println!("{} Checking project for TODO statements...", "🔍".cyan());
    let scan = todo::scan(project.root());
    for skipped in &scan.skipped {
        println!(
            "   {} Skipped {}: {}",
            "!".yellow(),
            super::relative(project, &skipped.path),
            skipped.reason
        );
    }
    let items = scan.items;
    for item in &items {
        println!("   {}", item.render());
    }
    todo::write_list(project.root(), &items)
        .with_context(|| format!("Failed to write {}", todo::TODO_FILE))?;
    println!(
        "{} {} TODO(s) written to {}",
        "✓".green(),
        items.len(),
        todo::TODO_FILE
    );
    Ok(())
}

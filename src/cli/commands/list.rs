//! List command implementation.

use colored::Colorize;

use crate::cli::commands::runtime;
use crate::config::Config;
use crate::error::Result;
use crate::remote::NotesApi;

/// List remote notes, optionally with their content.
pub fn execute(limit: usize, show_content: bool, config: &Config, json: bool) -> Result<()> {
    let api = NotesApi::new(config);
    let rt = runtime()?;
    let notes = rt.block_on(api.fetch_all(Some(limit)))?;

    if json {
        println!("{}", serde_json::to_string(&notes)?);
        return Ok(());
    }

    println!("{}", "Notes".bold().underline());
    println!();
    if notes.is_empty() {
        println!("{}", "No notes on the server.".dimmed());
        return Ok(());
    }

    for note in &notes {
        match &note.category {
            Some(category) => println!(
                "  {} {} - {}",
                note.title.bold(),
                format!("({})", note.id).dimmed(),
                category.cyan()
            ),
            None => println!("  {} {}", note.title.bold(), format!("({})", note.id).dimmed()),
        }
        if show_content {
            for line in note.content.lines() {
                println!("    {line}");
            }
            println!("  {}", "---".dimmed());
        }
    }
    println!();
    println!("{}", format!("{} notes", notes.len()).dimmed());
    Ok(())
}

//! Get command implementation.

use colored::Colorize;

use crate::cli::commands::runtime;
use crate::config::Config;
use crate::error::Result;
use crate::remote::NotesApi;

/// Fetch and print a single note by id.
pub fn execute(note_id: i64, config: &Config, json: bool) -> Result<()> {
    let api = NotesApi::new(config);
    let rt = runtime()?;
    let note = rt.block_on(api.fetch_one(note_id))?;

    if json {
        println!("{}", serde_json::to_string(&note)?);
        return Ok(());
    }

    println!("{}", note.title.bold().underline());
    if let Some(category) = &note.category {
        println!("{}", category.cyan());
    }
    println!();
    println!("{}", note.content);
    Ok(())
}

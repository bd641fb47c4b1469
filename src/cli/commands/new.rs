//! New-note command implementation.

use colored::Colorize;

use crate::cli::commands::runtime;
use crate::config::Config;
use crate::error::Result;
use crate::model::normalize_category;
use crate::remote::NotesApi;

/// Create a note on the server with an empty body.
///
/// Underscores in the supplied title are treated as spaces, so shell
/// users can skip quoting: `flasky new Shopping_List`.
pub fn execute(title: &str, category: &str, config: &Config, json: bool) -> Result<()> {
    let api = NotesApi::new(config);
    let title = title.replace('_', " ");
    let category = normalize_category(Some(category.to_string()));

    let rt = runtime()?;
    rt.block_on(api.create(&title, "", category.as_deref()))?;

    if json {
        let output = serde_json::json!({
            "success": true,
            "title": title,
            "category": category,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{} Created note '{title}'.", "✓".green());
    }
    Ok(())
}

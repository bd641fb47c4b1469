//! Sync command implementation.
//!
//! Runs one full sync cycle and prints every note-level outcome, so
//! a partially failed batch is visible line by line rather than as a
//! single aggregate error.

use colored::Colorize;

use crate::cli::commands::runtime;
use crate::config::Config;
use crate::error::Result;
use crate::local::LocalNotes;
use crate::remote::NotesApi;
use crate::sync::{StatusFile, SyncOp, SyncReport, Synchronizer};

/// Run a sync cycle against the configured server.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let api = NotesApi::new(config);
    let local = LocalNotes::new(&config.notes_dir);
    let status = StatusFile::in_dir(&config.notes_dir);

    let rt = runtime()?;
    let report = rt.block_on(Synchronizer::new(&api, &local, &status).run())?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    print_report(&report, config);
    Ok(())
}

fn print_report(report: &SyncReport, config: &Config) {
    if report.bootstrap {
        println!(
            "First sync: fetched {} notes from {} into {}.",
            report.remote_count,
            config.root_domain,
            config.notes_dir.display()
        );
        println!("{} Saved {} notes locally.", "✓".green(), report.downloaded());
        println!("{}", format!("Browse them at {}", config.web_url()).dimmed());
        return;
    }

    println!(
        "Synced {} local / {} remote notes with {}.",
        report.local_count, report.remote_count, config.root_domain
    );

    if report.outcomes.is_empty() {
        println!("{}", "Everything up to date.".green());
        return;
    }

    println!();
    for outcome in &report.outcomes {
        let arrow = match outcome.op {
            SyncOp::Upload => "↑",
            SyncOp::Download => "↓",
        };
        match &outcome.error {
            None => println!(
                "  {} {} {}",
                arrow.green(),
                outcome.title,
                format!("({})", outcome.id).dimmed()
            ),
            Some(reason) => println!(
                "  {} {} {}: {}",
                "✗".red(),
                outcome.title,
                format!("({})", outcome.id).dimmed(),
                reason.red()
            ),
        }
    }

    println!();
    let failed = report.failures().len();
    let summary = format!(
        "{} uploaded, {} downloaded, {} failed",
        report.uploaded(),
        report.downloaded(),
        failed
    );
    if failed == 0 {
        println!("{} {summary}", "✓".green());
    } else {
        println!("{} {summary}", "!".yellow());
    }
    println!("{}", format!("Browse your notes at {}", config.web_url()).dimmed());
}

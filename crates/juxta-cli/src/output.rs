//! Output renderers for CLI commands.

use anyhow::anyhow;
use juxta_core::{CompareSnapshot, SyncResult};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_counts(counts: SyncResult, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&counts)?,
        OutputFormat::Table => println!("{}", counts_line(counts)),
    }
    Ok(())
}

pub(crate) fn render_snapshot(snapshot: &CompareSnapshot, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(snapshot)?,
        OutputFormat::Table => {
            for line in snapshot_lines(snapshot) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Tell the user about a session the server just created; goes to stderr so JSON output stays clean.
pub(crate) fn render_issued_session(session: Option<Uuid>) {
    if let Some(id) = session {
        eprintln!("new session: {id} (reuse with --session or JUXTA_SESSION)");
    }
}

fn counts_line(counts: SyncResult) -> String {
    let badge = counts.badge_text();
    let badge = if badge.is_empty() { "-" } else { badge.as_str() };
    format!(
        "contexts: {}  models: {}  badge: {badge}",
        counts.context_count, counts.model_count
    )
}

fn snapshot_lines(snapshot: &CompareSnapshot) -> Vec<String> {
    if snapshot.contexts.is_empty() && snapshot.models.is_empty() {
        return vec!["comparison set is empty".to_string()];
    }
    let mut lines = vec![format!("{:<8} ID", "KIND")];
    lines.extend(snapshot.contexts.iter().map(|id| format!("{:<8} {id}", "context")));
    lines.extend(snapshot.models.iter().map(|id| format!("{:<8} {id}", "model")));
    lines
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use twinsync_core::{Entity, Relationship, Severity, SyncStatus};
use twinsync_engine::{DeletionOutcome, RemoteOutcome};

fn status_colored(status: SyncStatus) -> ColoredString {
    match status {
        SyncStatus::Draft => "draft".yellow(),
        SyncStatus::Synced => "synced".green(),
    }
}

/// Print entities as a table, drafts surfacing first.
pub fn print_entities_table(entities: &[Entity]) {
    if entities.is_empty() {
        println!("{}", "No entities found.".dimmed());
        return;
    }

    println!("{:<28} {:<16} {:<8} {:<36}", "Name", "Type", "Status", "ID");
    println!("{}", "─".repeat(90));

    for entity in entities {
        println!(
            "{:<28} {:<16} {:<8} {}",
            truncate(&entity.name, 26),
            truncate(&entity.entity_type, 14),
            status_colored(entity.status),
            entity.local_id.dimmed()
        );
    }
}

/// Print relationships as `from -[type]-> to` lines.
pub fn print_relationships_table(relationships: &[Relationship]) {
    if relationships.is_empty() {
        println!("{}", "No relationships found.".dimmed());
        return;
    }

    for rel in relationships {
        println!(
            "  {} {} {} {} {}",
            rel.from_name,
            format!("-[{}]->", rel.rel_type).yellow(),
            rel.to_name,
            "·".dimmed(),
            status_colored(rel.status)
        );
    }
}

/// Render a batch outcome in its three-way severity color.
pub fn print_severity_line(severity: Severity, line: &str) {
    match severity {
        Severity::Success => println!("{}", line.green()),
        Severity::Warning => println!("{}", line.yellow()),
        Severity::Error => println!("{}", line.red()),
    }
}

pub fn print_deletion_outcome(outcome: &DeletionOutcome) {
    let line = outcome.summary();
    match (&outcome.remote, outcome.local_deleted) {
        (RemoteOutcome::Failed(_), _) => println!("{}", line.yellow()),
        (_, false) => println!("{}", line.yellow()),
        _ => println!("{}", line.green()),
    }
}

/// Truncate a string to a display width, appending an ellipsis.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let char_width = c.to_string().width();
        if width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        width += char_width;
    }
    result.push('…');
    result
}

//! Text formatting for CLI results.

use crate::gateway::protocol::ServiceReply;
use crate::ranking::types::RankedEntry;
use crate::records::types::{Record, value_text};

/// One `attribute: value` line per present attribute, in vocabulary order.
pub fn format_record(record: &Record) -> String {
    record
        .iter()
        .map(|(attribute, value)| format!("{}: {}", attribute, value_text(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_records(records: &[Record]) -> String {
    if records.is_empty() {
        return "No matching records.".to_string();
    }

    let mut out = format!("{} record(s)\n", records.len());
    for record in records {
        out.push('\n');
        out.push_str(&format_record(record));
        out.push('\n');
    }
    out
}

/// Rank table with a proportional bar for each entry.
pub fn format_dataset(dataset: &[RankedEntry]) -> String {
    if dataset.is_empty() {
        return "Nothing to rank.".to_string();
    }

    let width = dataset
        .iter()
        .map(|entry| entry.identifier.len())
        .max()
        .unwrap_or(0);

    dataset
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let filled = if entry.score.is_finite() {
                (entry.score.clamp(0.0, 5.0) * 4.0).round() as usize
            } else {
                0
            };
            format!(
                "{:>3}. {:<width$}  {:>5.2}  {}",
                rank + 1,
                entry.identifier,
                entry.score,
                "#".repeat(filled),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_reply(reply: &ServiceReply) -> String {
    format!("[{}] {}", reply.status, reply.message())
}

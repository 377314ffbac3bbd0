//! Output formatting for visitor listings and notifications.
//!
//! Supports a table view and JSON.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{Notification, NotificationKind, Visitor};

use super::listing::empty_listing_message;

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// Formats a table listing of visitors.
///
/// `total` is the size of the whole list, used for the header and the
/// empty-listing message.
pub fn format_visitors_table(visitors: &[&Visitor], total: usize) -> String {
    let header = format!("👥 Lista de Visitantes ({total})").bold().to_string();

    if visitors.is_empty() {
        return format!("{header}\n\n{}", empty_listing_message(total).dimmed());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Nome", "Telefone", "Cidade", "Culto", "Cadastrado em"]);

    for visitor in visitors {
        table.add_row(vec![
            visitor.short_id().to_string(),
            truncate(&visitor.full_name, 32),
            visitor.phone.clone(),
            truncate(&visitor.city, 20),
            format!("{} às {}", visitor.service_date, visitor.service_time),
            visitor.created_at_display(),
        ]);
    }

    format!("{header}\n{table}")
}

/// Formats visitors as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_visitors_json(visitors: &[&Visitor]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(visitors)
}

/// Formats a notification as a colored two-line message.
pub fn format_notification(note: &Notification) -> String {
    let title = match note.kind {
        NotificationKind::Success => format!("✓ {}", note.title).green().bold(),
        NotificationKind::Error => format!("✗ {}", note.title).red().bold(),
    };
    format!("{title}\n  {}", note.description)
}

/// Truncates a string to max length (in characters) with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

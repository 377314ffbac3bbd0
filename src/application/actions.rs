//! Actions that leave the process: confirmed deletes and the WhatsApp handoff.
//!
//! Each delete handler returns `Ok(None)` when the user declines, so the
//! caller stays silent.

use chrono::{DateTime, Local};

use crate::domain::{AppError, Notification, Result, Visitor};
use crate::infrastructure::{Confirm, KeyValueStore, LinkOpener};

use super::export::{build_outbound_message, ExportKind, OutboundMessage};
use super::store::VisitorStore;

/// Delete one visitor after the user confirms by name.
///
/// `id` may be a unique prefix.
///
/// # Errors
/// Returns `VisitorNotFound` for an unknown id, or a storage error.
pub fn delete_one<S: KeyValueStore>(
    store: &mut VisitorStore<S>,
    id: &str,
    confirm: &mut dyn Confirm,
) -> Result<Option<Notification>> {
    let visitor = store.find(id)?;
    let (id, name) = (visitor.id.clone(), visitor.full_name.clone());

    if !confirm.confirm(&format!("Deseja realmente excluir o visitante {name}?")) {
        tracing::debug!(%id, "Delete declined");
        return Ok(None);
    }

    store.remove(&id)?;

    Ok(Some(Notification::success(
        "Visitante excluído",
        format!("{name} foi removido da lista."),
    )))
}

/// Delete every visitor after the user confirms the total.
///
/// Only available when more than one record exists.
///
/// # Errors
/// Returns `ClearUnavailable` for one or zero records, or a storage error.
pub fn delete_all<S: KeyValueStore>(
    store: &mut VisitorStore<S>,
    confirm: &mut dyn Confirm,
) -> Result<Option<Notification>> {
    let count = store.len();
    if count <= 1 {
        return Err(AppError::ClearUnavailable { count });
    }

    if !confirm.confirm(&format!(
        "Deseja realmente excluir todos os {count} visitantes?"
    )) {
        tracing::debug!(count, "Clear declined");
        return Ok(None);
    }

    let ids: Vec<String> = store.visitors().iter().map(|v| v.id.clone()).collect();
    let removed = store.remove_all(&ids)?;

    Ok(Some(Notification::success(
        "Lista limpa",
        format!("{removed} visitante(s) removido(s)."),
    )))
}

/// Clear the store after a spreadsheet export when the variant is enabled.
///
/// Returns the number of records removed, or `None` when nothing was cleared.
///
/// # Errors
/// Returns a storage error if the cleared list cannot be persisted.
pub fn clear_after_export<S: KeyValueStore>(
    store: &mut VisitorStore<S>,
    kind: ExportKind,
    enabled: bool,
) -> Result<Option<usize>> {
    if !enabled || kind != ExportKind::Spreadsheet {
        return Ok(None);
    }

    let removed = store.clear()?;
    tracing::warn!(removed, "Visitor list cleared after spreadsheet export");
    Ok(Some(removed))
}

/// Compose the visitor summary and hand its `wa.me` link to `opener`.
///
/// Nothing is opened when a guard fails.
///
/// # Errors
/// Returns `MissingDestination` or `NothingToSend` from the message guards,
/// or the opener's error.
pub fn send_to_whatsapp(
    records: &[&Visitor],
    destination: &str,
    now: DateTime<Local>,
    opener: &mut dyn LinkOpener,
) -> Result<OutboundMessage> {
    let message = build_outbound_message(records, destination, now)?;

    opener.open(&message.url)?;
    tracing::info!(
        destination = %message.destination,
        visitors = records.len(),
        chars = message.text.chars().count(),
        "WhatsApp message handed off"
    );

    Ok(message)
}

//! Application layer - use cases and orchestration.
//!
//! This layer contains the form controller, the visitor store, search,
//! exports and the confirmed delete actions.

pub mod actions;
pub mod export;
pub mod form;
pub mod formatter;
pub mod listing;
pub mod parser;
pub mod store;

pub use actions::{clear_after_export, delete_all, delete_one, send_to_whatsapp};
pub use export::{build_outbound_message, export, ExportKind, OutboundMessage};
pub use form::{parse_service_date, registered_notification, Field, FormController};
pub use formatter::{
    format_notification, format_visitors_json, format_visitors_table, OutputFormat,
};
pub use listing::filter_visitors;
pub use parser::parse_visitor_import;
pub use store::VisitorStore;

//! Domain-level error types for church-visitors.
//!
//! All errors are typed with `thiserror`. Validation errors carry enough
//! context to be shown to the user as a notification.

use thiserror::Error;

use super::models::Notification;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Required form fields were left empty.
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// Export requested with no visitors.
    #[error("There are no visitors to export")]
    NothingToExport,

    /// Outbound message requested with no visitors.
    #[error("There are no visitors to send")]
    NothingToSend,

    /// Outbound message requested without a destination number.
    #[error("A WhatsApp destination number is required")]
    MissingDestination,

    /// No visitor matches the given id.
    #[error("Visitor not found: {id}")]
    VisitorNotFound { id: String },

    /// Bulk delete is only offered for more than one record.
    #[error("Clearing all visitors needs more than one record (found {count})")]
    ClearUnavailable { count: usize },

    /// Failed to read or write the local storage backend.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid or corrupted data.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Spreadsheet generation failed.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// CSV generation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a storage error from a rusqlite error.
    pub fn storage(err: rusqlite::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// User-facing notification for this error.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::MissingFields { .. } => Notification::error(
                "Campos obrigatórios",
                "Por favor, preencha todos os campos.",
            ),
            Self::NothingToExport => {
                Notification::error("Lista vazia", "Não há visitantes para exportar.")
            }
            Self::NothingToSend => {
                Notification::error("Lista vazia", "Não há visitantes para enviar.")
            }
            Self::MissingDestination => Notification::error(
                "Número necessário",
                "Digite um número do WhatsApp para enviar.",
            ),
            Self::VisitorNotFound { id } => Notification::error(
                "Visitante não encontrado",
                format!("Nenhum visitante com o id {id}."),
            ),
            Self::ClearUnavailable { .. } => Notification::error(
                "Nada para limpar",
                "A limpeza total exige mais de um visitante.",
            ),
            Self::Storage { .. } => Notification::error(
                "Erro ao salvar",
                format!("Os dados não foram gravados: {self}"),
            ),
            other => Notification::error("Erro", other.to_string()),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_fields() {
        let err = AppError::MissingFields {
            fields: vec!["fullName", "city"],
        };
        assert_eq!(err.to_string(), "Missing required fields: fullName, city");
        assert_eq!(err.notification().title, "Campos obrigatórios");
    }

    #[test]
    fn test_distinct_signals_for_export_guards() {
        let empty = AppError::NothingToExport.notification();
        let number = AppError::MissingDestination.notification();
        assert_ne!(empty.title, number.title);
        assert_eq!(empty.kind, crate::domain::NotificationKind::Error);
    }
}

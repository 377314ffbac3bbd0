//! Domain models for visitor registration.
//!
//! The serialized shape of [`Visitor`] matches the records the browser app
//! keeps in local storage, so collections can move between the two.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Shown instead of an empty service time.
pub const TIME_PLACEHOLDER: &str = "Não informado";

/// Shown instead of empty observations.
pub const OBSERVATIONS_PLACEHOLDER: &str = "Sem observações";

/// Display format for timestamps (`dd/MM/yyyy HH:mm`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Input collected by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorFormData {
    pub full_name: String,
    pub phone: String,
    pub city: String,
    /// Service date as `dd/MM/yyyy`.
    pub service_date: String,
    pub service_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl VisitorFormData {
    /// Names of required fields that are empty, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("phone", &self.phone),
            ("city", &self.city),
            ("serviceDate", &self.service_date),
            ("serviceTime", &self.service_time),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// A registered visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    /// Unique identifier, generated at creation.
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub service_date: String,
    pub service_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Visitor {
    /// Build a record from submitted form data.
    #[must_use]
    pub fn from_form(form: VisitorFormData, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: form.full_name,
            phone: form.phone,
            city: form.city,
            service_date: form.service_date,
            service_time: form.service_time,
            observations: form.observations,
            created_at,
        }
    }

    /// Service time suffixed with `h`, or a placeholder when empty.
    #[must_use]
    pub fn service_period(&self) -> String {
        if self.service_time.is_empty() {
            TIME_PLACEHOLDER.to_string()
        } else {
            format!("{}h", self.service_time)
        }
    }

    /// Observations, or a placeholder when absent or empty.
    #[must_use]
    pub fn observations_or_placeholder(&self) -> &str {
        match self.observations.as_deref() {
            Some(obs) if !obs.trim().is_empty() => obs,
            _ => OBSERVATIONS_PLACEHOLDER,
        }
    }

    /// Registration time in local time as `dd/MM/yyyy HH:mm`.
    #[must_use]
    pub fn created_at_display(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// Multi-line summary used by CSV rows and outbound messages.
    #[must_use]
    pub fn narrative(&self) -> String {
        format!(
            "Culto {}: {}\nNome: {}\nFone: {}\nCidade: {}\nObs: {}",
            self.service_period(),
            self.service_date,
            self.full_name,
            self.phone,
            self.city,
            self.observations_or_placeholder()
        )
    }

    /// Short id prefix for display.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Kind of user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// Create a success notification.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Create an error notification.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Visitor {
        Visitor {
            id: "0b6f7c1e-1111-4222-8333-944445555666".into(),
            full_name: "Maria Silva".into(),
            phone: "(11) 98765-4321".into(),
            city: "São Paulo".into(),
            service_date: "10/03/2024".into(),
            service_time: "19:00".into(),
            observations: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 10, 22, 5, 0).unwrap(),
        }
    }

    #[test]
    fn test_placeholders() {
        let mut visitor = sample();
        assert_eq!(visitor.service_period(), "19:00h");
        assert_eq!(visitor.observations_or_placeholder(), "Sem observações");

        visitor.service_time.clear();
        visitor.observations = Some("Veio com a família".into());
        assert_eq!(visitor.service_period(), "Não informado");
        assert_eq!(visitor.observations_or_placeholder(), "Veio com a família");
    }

    #[test]
    fn test_narrative() {
        assert_eq!(
            sample().narrative(),
            "Culto 19:00h: 10/03/2024\nNome: Maria Silva\nFone: (11) 98765-4321\nCidade: São Paulo\nObs: Sem observações"
        );
    }

    #[test]
    fn test_json_shape_matches_browser_records() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["fullName"], "Maria Silva");
        assert_eq!(json["serviceTime"], "19:00");
        assert!(json.get("observations").is_none());

        let raw = r#"{"id":"abc","fullName":"João","phone":"(21) 3333-4444","city":"Niterói",
            "serviceDate":"01/02/2024","serviceTime":"10:00","createdAt":"2024-02-01T13:00:00.000Z"}"#;
        let parsed: Visitor = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.full_name, "João");
        assert_eq!(parsed.observations, None);
    }

    #[test]
    fn test_missing_fields() {
        let form = VisitorFormData {
            full_name: "Ana".into(),
            phone: "(11) 91234-5678".into(),
            ..Default::default()
        };
        assert_eq!(
            form.missing_fields(),
            vec!["city", "serviceDate", "serviceTime"]
        );
    }
}

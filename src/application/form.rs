//! Registration form controller.
//!
//! Holds the draft being typed, masks the phone as it changes, and hands a
//! validated draft to the store on submit.

use chrono::{Locale, NaiveDate};

use crate::domain::{format_phone, AppError, Notification, Result, Visitor, VisitorFormData};
use crate::infrastructure::KeyValueStore;

use super::store::VisitorStore;

/// Stored form of the service date.
const SERVICE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Phone,
    City,
    ServiceDate,
    ServiceTime,
    Observations,
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fullName" | "full_name" | "name" => Ok(Self::FullName),
            "phone" => Ok(Self::Phone),
            "city" => Ok(Self::City),
            "serviceDate" | "service_date" | "date" => Ok(Self::ServiceDate),
            "serviceTime" | "service_time" | "time" => Ok(Self::ServiceTime),
            "observations" | "obs" => Ok(Self::Observations),
            _ => Err(format!("Unknown field: {s}")),
        }
    }
}

/// Draft state of the registration form.
#[derive(Debug, Default)]
pub struct FormController {
    draft: VisitorFormData,
    selected_date: Option<NaiveDate>,
}

impl FormController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft values.
    #[cfg(test)]
    #[must_use]
    pub const fn draft(&self) -> &VisitorFormData {
        &self.draft
    }

    /// Date picked in the calendar, if any.
    #[cfg(test)]
    #[must_use]
    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Update one field. The phone goes through the mask; the rest is stored verbatim.
    pub fn update_field(&mut self, field: Field, value: &str) {
        match field {
            Field::FullName => self.draft.full_name = value.to_string(),
            Field::Phone => self.draft.phone = format_phone(value),
            Field::City => self.draft.city = value.to_string(),
            Field::ServiceDate => self.draft.service_date = value.to_string(),
            Field::ServiceTime => self.draft.service_time = value.to_string(),
            Field::Observations => {
                self.draft.observations = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
        }
    }

    /// Select the service date. Deselecting keeps the previous stored value.
    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
        if let Some(date) = date {
            self.draft.service_date = date.format(SERVICE_DATE_FORMAT).to_string();
        }
    }

    /// Long pt-BR form of the selected date, e.g. "10 de março de 2024".
    #[must_use]
    pub fn selected_date_label(&self) -> Option<String> {
        self.selected_date.map(|date| {
            date.format_localized("%d de %B de %Y", Locale::pt_BR)
                .to_string()
        })
    }

    /// Validate the draft and hand it to the store.
    ///
    /// On success the draft and selected date are reset. On failure the
    /// draft is left as it was.
    ///
    /// # Errors
    /// Returns `MissingFields` if a required field is empty, or a storage
    /// error if the store cannot persist the record.
    pub fn submit<S: KeyValueStore>(&mut self, store: &mut VisitorStore<S>) -> Result<Visitor> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Form rejected");
            return Err(AppError::MissingFields { fields: missing });
        }

        let visitor = store.add(self.draft.clone())?;
        self.reset();
        Ok(visitor)
    }

    /// Clear every field and the selected date.
    pub fn reset(&mut self) {
        self.draft = VisitorFormData::default();
        self.selected_date = None;
    }
}

/// Notification raised after a successful registration.
#[must_use]
pub fn registered_notification() -> Notification {
    Notification::success(
        "Visitante cadastrado!",
        "Os dados foram salvos com sucesso.",
    )
}

/// Parse a service date typed as `dd/MM/yyyy` or `yyyy-MM-dd`.
///
/// # Errors
/// Returns `InvalidData` if neither format matches.
pub fn parse_service_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, SERVICE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| AppError::InvalidData {
            message: format!("Invalid service date '{input}', use dd/mm/aaaa"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStorage;

    fn fill(form: &mut FormController) {
        form.update_field(Field::FullName, "Maria Silva");
        form.update_field(Field::Phone, "11987654321");
        form.update_field(Field::City, "São Paulo");
        form.select_date(NaiveDate::from_ymd_opt(2024, 3, 10));
        form.update_field(Field::ServiceTime, "19:00");
    }

    #[test]
    fn test_submit_creates_record_and_resets() {
        let mut store = VisitorStore::load(MemoryStorage::new()).unwrap();
        let mut form = FormController::new();
        fill(&mut form);

        let visitor = form.submit(&mut store).unwrap();

        assert_eq!(visitor.phone, "(11) 98765-4321");
        assert_eq!(visitor.service_date, "10/03/2024");
        assert_eq!(store.visitors()[0].id, visitor.id);
        assert_eq!(form.draft(), &VisitorFormData::default());
        assert!(form.selected_date().is_none());
    }

    #[test]
    fn test_submit_rejects_missing_fields() {
        let mut store = VisitorStore::load(MemoryStorage::new()).unwrap();
        let mut form = FormController::new();
        form.update_field(Field::FullName, "Maria Silva");

        let err = form.submit(&mut store).unwrap_err();

        match err {
            AppError::MissingFields { fields } => {
                assert_eq!(fields, vec!["phone", "city", "serviceDate", "serviceTime"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
        assert_eq!(form.draft().full_name, "Maria Silva");
    }

    #[test]
    fn test_phone_field_is_masked() {
        let mut form = FormController::new();
        form.update_field(Field::Phone, "1198");
        assert_eq!(form.draft().phone, "(11) 98");
        form.update_field(Field::Phone, "(11) 98765-43210000");
        assert_eq!(form.draft().phone, "(11) 98765-4321");
    }

    #[test]
    fn test_selected_date_label_is_portuguese() {
        let mut form = FormController::new();
        form.select_date(NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(
            form.selected_date_label().as_deref(),
            Some("10 de março de 2024")
        );

        form.select_date(None);
        assert!(form.selected_date_label().is_none());
        assert_eq!(form.draft().service_date, "10/03/2024");
    }

    #[test]
    fn test_empty_observations_are_none() {
        let mut form = FormController::new();
        form.update_field(Field::Observations, "");
        assert!(form.draft().observations.is_none());
        form.update_field(Field::Observations, "Convidado pela Ana");
        assert_eq!(
            form.draft().observations.as_deref(),
            Some("Convidado pela Ana")
        );
    }

    #[test]
    fn test_parse_service_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(parse_service_date("10/03/2024").unwrap(), expected);
        assert_eq!(parse_service_date("2024-03-10").unwrap(), expected);
        assert!(parse_service_date("março").is_err());
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("fullName".parse::<Field>(), Ok(Field::FullName));
        assert_eq!("obs".parse::<Field>(), Ok(Field::Observations));
        assert!("email".parse::<Field>().is_err());
    }
}

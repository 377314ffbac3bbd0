//! Visitor search.

use crate::domain::{digits_only, Visitor};

/// Visitors matching `search_term`, in store order.
///
/// Name and city match case-insensitively; the phone matches either the
/// masked text or, when the term is made only of digits and phone
/// punctuation, its raw digits.
#[must_use]
pub fn filter_visitors<'a>(visitors: &'a [Visitor], search_term: &str) -> Vec<&'a Visitor> {
    let term = search_term.trim();
    if term.is_empty() {
        return visitors.iter().collect();
    }

    let needle = term.to_lowercase();
    let needle_digits = if is_phone_like(term) {
        digits_only(term)
    } else {
        String::new()
    };

    visitors
        .iter()
        .filter(|v| {
            v.full_name.to_lowercase().contains(&needle)
                || v.city.to_lowercase().contains(&needle)
                || v.phone.contains(term)
                || (!needle_digits.is_empty() && digits_only(&v.phone).contains(&needle_digits))
        })
        .collect()
}

/// Digits plus the characters the phone mask inserts.
fn is_phone_like(term: &str) -> bool {
    term.chars()
        .all(|c| c.is_ascii_digit() || "()- +".contains(c))
}

/// Message shown when a listing has nothing to display.
#[must_use]
pub const fn empty_listing_message(total: usize) -> &'static str {
    if total == 0 {
        "Nenhum visitante cadastrado ainda."
    } else {
        "Nenhum visitante encontrado com essa busca."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn visitor(id: &str, name: &str, phone: &str, city: &str) -> Visitor {
        Visitor {
            id: id.into(),
            full_name: name.into(),
            phone: phone.into(),
            city: city.into(),
            service_date: "10/03/2024".into(),
            service_time: "19:00".into(),
            observations: None,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Visitor> {
        vec![
            visitor("3", "Maria Silva", "(11) 98765-4321", "São Paulo"),
            visitor("2", "João Souza", "(21) 3333-4444", "Niterói"),
            visitor("1", "Ana Maria Costa", "(31) 99999-0000", "Belo Horizonte"),
        ]
    }

    fn ids(found: &[&Visitor]) -> Vec<String> {
        found.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn test_empty_term_returns_all_in_order() {
        let visitors = sample();
        assert_eq!(ids(&filter_visitors(&visitors, "")), vec!["3", "2", "1"]);
        assert_eq!(ids(&filter_visitors(&visitors, "   ")), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_case_insensitive_name() {
        let visitors = sample();
        let upper = ids(&filter_visitors(&visitors, "MARIA"));
        let lower = ids(&filter_visitors(&visitors, "maria"));
        assert_eq!(upper, vec!["3", "1"]);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_city_match() {
        let visitors = sample();
        assert_eq!(ids(&filter_visitors(&visitors, "niterói")), vec!["2"]);
    }

    #[test]
    fn test_phone_match_masked_and_raw() {
        let visitors = sample();
        assert_eq!(ids(&filter_visitors(&visitors, "3333-4444")), vec!["2"]);
        assert_eq!(ids(&filter_visitors(&visitors, "987654321")), vec!["3"]);
        assert_eq!(ids(&filter_visitors(&visitors, "(11)")), vec!["3"]);
    }

    #[test]
    fn test_mixed_term_does_not_match_phone_digits() {
        let visitors = sample();
        assert!(filter_visitors(&visitors, "Ana 1").is_empty());
        assert!(filter_visitors(&visitors, "Rua 3").is_empty());
        assert_eq!(ids(&filter_visitors(&visitors, "Ana Maria")), vec!["1"]);
    }

    #[test]
    fn test_phone_like_terms() {
        assert!(is_phone_like("(11) 98765-4321"));
        assert!(is_phone_like("+55 11"));
        assert!(!is_phone_like("Ana 1"));
    }

    #[test]
    fn test_no_match() {
        let visitors = sample();
        assert!(filter_visitors(&visitors, "Curitiba").is_empty());
    }

    #[test]
    fn test_empty_listing_message() {
        assert_eq!(empty_listing_message(0), "Nenhum visitante cadastrado ainda.");
        assert_eq!(
            empty_listing_message(3),
            "Nenhum visitante encontrado com essa busca."
        );
    }
}

//! Blocking per-field validation of a bond draft.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use yourbono_core::{BondDraft, FieldId};

use super::rules::{
    latest_emission_date, rate_ceiling, CAPITALIZATION_RANGE, DURATION_RANGE, FREQUENCY_RANGE,
    MAX_AMOUNT, MAX_EMISSION_YEARS_AHEAD,
};

/// Blocking field errors, at most one message per field.
///
/// Iteration follows form order ([`FieldId`] declaration order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldId, String>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: FieldId, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Clears the error for `field`.
    pub fn remove(&mut self, field: FieldId) -> Option<String> {
        self.0.remove(&field)
    }

    /// True when `field` has an error.
    #[must_use]
    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains_key(&field)
    }

    /// True when the draft is submittable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields in error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Fields in error, in form order.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }
}

/// Checks every field of `draft` against its range and requiredness rule.
///
/// Nothing short-circuits: each violated field reports its own message.
/// `today` anchors the emission-date horizon.
#[must_use]
pub fn validate_fields(draft: &BondDraft, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.name.trim().is_empty() {
        errors.insert(FieldId::Name, "El nombre del bono es obligatorio");
    }

    check_amount(&mut errors, FieldId::NominalValue, draft.nominal_value, "El valor nominal");
    check_amount(&mut errors, FieldId::MarketValue, draft.market_value, "El valor de mercado");

    check_count(
        &mut errors,
        FieldId::Duration,
        draft.duration,
        DURATION_RANGE,
        "La duración debe estar entre 1 y 100 años",
    );
    check_count(
        &mut errors,
        FieldId::Frequency,
        draft.frequency,
        FREQUENCY_RANGE,
        "La frecuencia debe estar entre 1 y 365 pagos por año",
    );
    check_count(
        &mut errors,
        FieldId::Capitalization,
        draft.capitalization,
        CAPITALIZATION_RANGE,
        "La capitalización debe estar entre 0 y 365 períodos por año",
    );

    if !matches!(draft.interest_rate_type_id, 1 | 2) {
        errors.insert(FieldId::InterestRateTypeId, "Seleccione un tipo de tasa válido");
    }
    if !matches!(draft.grace_period_type_id, 1 | 2) {
        errors.insert(
            FieldId::GracePeriodTypeId,
            "Seleccione un tipo de período de gracia válido",
        );
    }
    if !matches!(draft.currency_type_id, 1..=3) {
        errors.insert(FieldId::CurrencyTypeId, "Seleccione una moneda válida");
    }

    if draft.interest_rate <= Decimal::ZERO {
        errors.insert(FieldId::InterestRate, "La tasa de interés debe ser mayor que 0");
    } else {
        check_rate_ceiling(&mut errors, FieldId::InterestRate, draft.interest_rate);
    }
    for field in std::iter::once(FieldId::DiscountRate).chain(FieldId::AUXILIARY_RATES) {
        if let Some(rate) = draft.rate(field) {
            if rate < Decimal::ZERO {
                errors.insert(field, format!("{} no puede ser negativa", rate_subject(field)));
            } else {
                check_rate_ceiling(&mut errors, field, rate);
            }
        }
    }

    if draft.grace_period_duration < 0 {
        errors.insert(
            FieldId::GracePeriodDuration,
            "El período de gracia no puede ser negativo",
        );
    } else if draft.grace_period_duration >= draft.duration {
        errors.insert(
            FieldId::GracePeriodDuration,
            "El período de gracia debe ser menor que la duración del bono",
        );
    }

    if let Some(latest) = latest_emission_date(today) {
        if draft.emission_date > latest {
            errors.insert(
                FieldId::EmissionDate,
                format!(
                    "La fecha de emisión no puede ser más de {MAX_EMISSION_YEARS_AHEAD} años en el futuro"
                ),
            );
        }
    }

    log::debug!("field validation found {} error(s)", errors.len());
    errors
}

fn check_amount(errors: &mut FieldErrors, field: FieldId, value: Decimal, subject: &str) {
    if value <= Decimal::ZERO {
        errors.insert(field, format!("{subject} debe ser mayor que 0"));
    } else if value > Decimal::from(MAX_AMOUNT) {
        errors.insert(field, format!("{subject} no puede exceder 1,000,000,000"));
    }
}

fn check_count(
    errors: &mut FieldErrors,
    field: FieldId,
    value: i32,
    (min, max): (i32, i32),
    message: &str,
) {
    if value < min || value > max {
        errors.insert(field, message);
    }
}

fn check_rate_ceiling(errors: &mut FieldErrors, field: FieldId, rate: Decimal) {
    if let Some(ceiling) = rate_ceiling(field) {
        if rate > ceiling {
            errors.insert(
                field,
                format!("{} no puede exceder {ceiling}%", rate_subject(field)),
            );
        }
    }
}

fn rate_subject(field: FieldId) -> &'static str {
    match field {
        FieldId::InterestRate => "La tasa de interés",
        FieldId::DiscountRate => "La tasa de descuento",
        FieldId::PrimeRate => "La tasa de prima",
        FieldId::StructuredRate => "La tasa de estructuración",
        FieldId::PlacementRate => "La tasa de colocación",
        FieldId::FloatingRate => "La tasa de flotación",
        FieldId::CavaliRate => "La tasa CAVALI",
        _ => "El valor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn valid_draft() -> BondDraft {
        let mut draft = BondDraft::new(1, today());
        draft.name = "Bono A".into();
        draft.nominal_value = dec!(1000);
        draft.market_value = dec!(950);
        draft.duration = 5;
        draft.frequency = 2;
        draft.interest_rate = dec!(8);
        draft.discount_rate = dec!(7);
        draft
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(validate_fields(&valid_draft(), today()).is_empty());
    }

    #[test]
    fn test_default_draft_reports_every_required_field() {
        let errors = validate_fields(&BondDraft::new(1, today()), today());
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                FieldId::Name,
                FieldId::NominalValue,
                FieldId::MarketValue,
                FieldId::InterestRate,
            ]
        );
    }

    #[test]
    fn test_blank_name() {
        let mut draft = valid_draft();
        draft.name = "   ".into();
        let errors = validate_fields(&draft, today());
        assert_eq!(errors.get(FieldId::Name), Some("El nombre del bono es obligatorio"));
    }

    #[test]
    fn test_amount_bounds() {
        let mut draft = valid_draft();
        draft.nominal_value = dec!(1000000000);
        draft.market_value = dec!(1000000000.01);
        let errors = validate_fields(&draft, today());
        assert!(!errors.contains(FieldId::NominalValue));
        assert!(errors.get(FieldId::MarketValue).unwrap().contains("exceder"));
    }

    #[test]
    fn test_integer_bounds() {
        let mut draft = valid_draft();
        draft.duration = 101;
        draft.frequency = 0;
        draft.capitalization = 366;
        draft.grace_period_duration = 0;
        let errors = validate_fields(&draft, today());
        assert!(errors.contains(FieldId::Duration));
        assert!(errors.contains(FieldId::Frequency));
        assert!(errors.contains(FieldId::Capitalization));

        draft.duration = 100;
        draft.frequency = 365;
        draft.capitalization = 0;
        assert!(validate_fields(&draft, today()).is_empty());
    }

    #[test]
    fn test_enumeration_ids() {
        let mut draft = valid_draft();
        draft.interest_rate_type_id = 3;
        draft.grace_period_type_id = 0;
        draft.currency_type_id = 4;
        let errors = validate_fields(&draft, today());
        assert!(errors.contains(FieldId::InterestRateTypeId));
        assert!(errors.contains(FieldId::GracePeriodTypeId));
        assert!(errors.contains(FieldId::CurrencyTypeId));

        draft.currency_type_id = 3;
        draft.grace_period_type_id = 2;
        draft.interest_rate_type_id = 2;
        assert!(validate_fields(&draft, today()).is_empty());
    }

    #[test]
    fn test_rate_ceilings() {
        let mut draft = valid_draft();
        draft.interest_rate = dec!(100.01);
        draft.discount_rate = dec!(50.5);
        draft.prime_rate = dec!(20);
        draft.cavali_rate = dec!(20.01);
        let errors = validate_fields(&draft, today());
        assert_eq!(
            errors.get(FieldId::InterestRate),
            Some("La tasa de interés no puede exceder 100%")
        );
        assert!(errors.contains(FieldId::DiscountRate));
        assert!(!errors.contains(FieldId::PrimeRate));
        assert_eq!(
            errors.get(FieldId::CavaliRate),
            Some("La tasa CAVALI no puede exceder 20%")
        );
    }

    #[test]
    fn test_negative_rates() {
        let mut draft = valid_draft();
        draft.floating_rate = dec!(-0.1);
        draft.discount_rate = dec!(-1);
        let errors = validate_fields(&draft, today());
        assert_eq!(
            errors.get(FieldId::FloatingRate),
            Some("La tasa de flotación no puede ser negativa")
        );
        assert!(errors.contains(FieldId::DiscountRate));
    }

    #[test]
    fn test_grace_period() {
        let mut draft = valid_draft();
        draft.grace_period_duration = 5;
        assert!(validate_fields(&draft, today()).contains(FieldId::GracePeriodDuration));
        draft.grace_period_duration = -1;
        assert!(validate_fields(&draft, today())
            .get(FieldId::GracePeriodDuration)
            .unwrap()
            .contains("negativo"));
        draft.grace_period_duration = 4;
        assert!(validate_fields(&draft, today()).is_empty());
    }

    #[test]
    fn test_emission_horizon() {
        let mut draft = valid_draft();
        draft.emission_date = NaiveDate::from_ymd_opt(2035, 1, 1).unwrap();
        assert!(validate_fields(&draft, today()).is_empty());
        draft.emission_date = NaiveDate::from_ymd_opt(2035, 1, 2).unwrap();
        assert!(validate_fields(&draft, today()).contains(FieldId::EmissionDate));
        // past dates are fine
        draft.emission_date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert!(validate_fields(&draft, today()).is_empty());
    }

    #[test]
    fn test_errors_serialize_by_wire_name() {
        let mut errors = FieldErrors::new();
        errors.insert(FieldId::NominalValue, "x");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"nominalValue":"x"}"#);
    }
}

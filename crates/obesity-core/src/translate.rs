//! Locale vocabulary: maps the Portuguese labels shown by the survey form
//! to the canonical tokens the fitted encoders know.
//!
//! Translation is total over the form's choices. A value that is neither a
//! known localized label nor already a canonical token is a validation
//! error; nothing is silently passed through to the encoders.

use crate::error::PipelineError;
use crate::schema::{categorical_domain, InputRecord, CATEGORICAL_FIELDS};

/// Localized label -> canonical token, for every choice the form offers.
const TRANSLATIONS: [(&str, &str); 12] = [
    ("Feminino", "Female"),
    ("Masculino", "Male"),
    ("Sim", "yes"),
    ("Não", "no"),
    ("Às vezes", "Sometimes"),
    ("Frequentemente", "Frequently"),
    ("Sempre", "Always"),
    ("Transporte público", "Public_Transportation"),
    ("Caminhada", "Walking"),
    ("Automóvel", "Automobile"),
    ("Motocicleta", "Motorbike"),
    ("Bicicleta", "Bike"),
];

/// Look up the canonical token for a localized label, if any.
pub fn translate_token(value: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(localized, _)| *localized == value)
        .map(|(_, canonical)| *canonical)
}

/// Canonicalize one categorical value for a given field.
///
/// Localized labels are substituted through the translation table;
/// values already in the field's canonical vocabulary pass unchanged.
/// Anything else fails eagerly, before the encode step.
pub fn canonicalize_value(field: &'static str, value: &str) -> Result<String, PipelineError> {
    if let Some(canonical) = translate_token(value) {
        return Ok(canonical.to_string());
    }
    if categorical_domain(field).contains(&value) {
        return Ok(value.to_string());
    }
    Err(PipelineError::Validation {
        field,
        message: format!("'{}' is not a recognized value", value),
    })
}

/// Canonicalize every categorical field of a raw record and check the
/// numeric domains. This is the `Translate` stage of the request pipeline.
pub fn canonicalize(record: &InputRecord) -> Result<InputRecord, PipelineError> {
    let mut canonical = record.clone();
    for field in CATEGORICAL_FIELDS {
        let value = canonicalize_value(field, record.categorical(field))?;
        canonical = canonical.with_categorical(field, value);
    }
    canonical.validate_numeric()?;
    Ok(canonical)
}

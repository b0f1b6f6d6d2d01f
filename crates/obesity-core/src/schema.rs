//! Canonical survey schema: the 16 feature fields, their order, their
//! domains, and the raw input record submitted by a user.
//!
//! The field order here is the order the classifier was trained on; the
//! encoded feature vector must follow it exactly.

use crate::error::PipelineError;

/// All 16 feature fields in training order.
pub const FIELD_ORDER: [&str; 16] = [
    "Gender",
    "Age",
    "Height",
    "Weight",
    "family_history",
    "FAVC",
    "FCVC",
    "NCP",
    "CAEC",
    "SMOKE",
    "CH2O",
    "SCC",
    "FAF",
    "TUE",
    "CALC",
    "MTRANS",
];

/// The 8 categorical fields, in training order.
pub const CATEGORICAL_FIELDS: [&str; 8] = [
    "Gender",
    "family_history",
    "FAVC",
    "CAEC",
    "SMOKE",
    "SCC",
    "CALC",
    "MTRANS",
];

/// The 8 numeric fields, in training order. The scaler is fitted over
/// these columns jointly, in this order.
pub const NUMERIC_FIELDS: [&str; 8] = [
    "Age", "Height", "Weight", "FCVC", "NCP", "CH2O", "FAF", "TUE",
];

/// Name of the target column in the training dataset.
pub const TARGET_COLUMN: &str = "Obesity";

/// The 7 obesity classes, in label-encoder (sorted) order.
pub const CLASS_LABELS: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
    "Overweight_Level_I",
    "Overweight_Level_II",
];

const YES_NO: [&str; 2] = ["no", "yes"];
const FREQUENCY: [&str; 4] = ["Always", "Frequently", "Sometimes", "no"];
const TRANSPORT: [&str; 5] = [
    "Automobile",
    "Bike",
    "Motorbike",
    "Public_Transportation",
    "Walking",
];
const GENDERS: [&str; 2] = ["Female", "Male"];

/// Canonical vocabulary for a categorical field.
pub fn categorical_domain(field: &str) -> &'static [&'static str] {
    match field {
        "Gender" => &GENDERS,
        "family_history" | "FAVC" | "SMOKE" | "SCC" => &YES_NO,
        "CAEC" | "CALC" => &FREQUENCY,
        "MTRANS" => &TRANSPORT,
        _ => panic!("not a categorical field: {}", field),
    }
}

/// Inclusive (min, max) domain for a numeric field, matching the bounds
/// exposed by the survey form.
pub fn numeric_domain(field: &str) -> (f32, f32) {
    match field {
        "Age" => (10.0, 100.0),
        "Height" => (1.0, 2.5),
        "Weight" => (30.0, 300.0),
        "FCVC" => (1.0, 3.0),
        "NCP" => (1.0, 4.0),
        "CH2O" => (1.0, 3.0),
        "FAF" => (0.0, 40.0),
        "TUE" => (0.0, 13.0),
        _ => panic!("not a numeric field: {}", field),
    }
}

/// One user-submitted survey row. Categorical values may still be
/// localized; numeric values are as entered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub gender: String,
    pub age: f32,
    pub height: f32,
    pub weight: f32,
    pub family_history: String,
    pub favc: String,
    pub fcvc: f32,
    pub ncp: f32,
    pub caec: String,
    pub smoke: String,
    pub ch2o: f32,
    pub scc: String,
    pub faf: f32,
    pub tue: f32,
    pub calc: String,
    pub mtrans: String,
}

impl InputRecord {
    /// Value of a categorical field by schema name.
    pub fn categorical(&self, field: &str) -> &str {
        match field {
            "Gender" => &self.gender,
            "family_history" => &self.family_history,
            "FAVC" => &self.favc,
            "CAEC" => &self.caec,
            "SMOKE" => &self.smoke,
            "SCC" => &self.scc,
            "CALC" => &self.calc,
            "MTRANS" => &self.mtrans,
            _ => panic!("not a categorical field: {}", field),
        }
    }

    fn set_categorical(&mut self, field: &str, value: String) {
        match field {
            "Gender" => self.gender = value,
            "family_history" => self.family_history = value,
            "FAVC" => self.favc = value,
            "CAEC" => self.caec = value,
            "SMOKE" => self.smoke = value,
            "SCC" => self.scc = value,
            "CALC" => self.calc = value,
            "MTRANS" => self.mtrans = value,
            _ => panic!("not a categorical field: {}", field),
        }
    }

    /// The 8 numeric values in scaler order.
    pub fn numeric_values(&self) -> [f32; 8] {
        [
            self.age, self.height, self.weight, self.fcvc, self.ncp, self.ch2o, self.faf, self.tue,
        ]
    }

    /// Replace a categorical field, returning a new record. Used by the
    /// translation step.
    pub fn with_categorical(mut self, field: &str, value: String) -> Self {
        self.set_categorical(field, value);
        self
    }

    /// Check that every numeric field lies within its form domain.
    pub fn validate_numeric(&self) -> Result<(), PipelineError> {
        let values = self.numeric_values();
        for (field, value) in NUMERIC_FIELDS.iter().zip(values.iter()) {
            let (min, max) = numeric_domain(field);
            if !value.is_finite() || *value < min || *value > max {
                return Err(PipelineError::Validation {
                    field,
                    message: format!("{} is outside the allowed range {}..={}", value, min, max),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_partition_is_consistent() {
        assert_eq!(CATEGORICAL_FIELDS.len() + NUMERIC_FIELDS.len(), FIELD_ORDER.len());
        for field in FIELD_ORDER {
            let is_cat = CATEGORICAL_FIELDS.contains(&field);
            let is_num = NUMERIC_FIELDS.contains(&field);
            assert!(is_cat ^ is_num, "field {} must be exactly one kind", field);
        }
    }

    #[test]
    fn class_labels_are_sorted() {
        let mut sorted = CLASS_LABELS;
        sorted.sort_unstable();
        assert_eq!(sorted, CLASS_LABELS);
    }

    #[test]
    fn domains_cover_all_categorical_fields() {
        for field in CATEGORICAL_FIELDS {
            assert!(!categorical_domain(field).is_empty());
        }
        for field in NUMERIC_FIELDS {
            let (min, max) = numeric_domain(field);
            assert!(min < max);
        }
    }
}

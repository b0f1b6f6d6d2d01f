//! Static explanations for the predicted obesity classes.
//!
//! User-facing informational text only: an unknown label gets a generic
//! sentence instead of an error, since this lookup sits after the
//! correctness-critical part of the request.

const EXPLANATIONS: [(&str, &str); 7] = [
    (
        "Insufficient_Weight",
        "Below the healthy weight range; may indicate malnutrition or other health issues.",
    ),
    (
        "Normal_Weight",
        "Weight considered healthy for the given height and age.",
    ),
    (
        "Overweight_Level_I",
        "Slightly overweight; pay attention to eating habits and physical activity.",
    ),
    (
        "Overweight_Level_II",
        "Moderately overweight; increased risk of metabolic problems.",
    ),
    (
        "Obesity_Type_I",
        "Mild obesity; medical follow-up is recommended.",
    ),
    (
        "Obesity_Type_II",
        "Moderate obesity; may require clinical intervention.",
    ),
    (
        "Obesity_Type_III",
        "Severe obesity; high health risk requiring specialized treatment.",
    ),
];

const UNRECOGNIZED: &str = "Class not recognized.";

/// One-sentence description of a predicted class label.
pub fn explain(label: &str) -> &'static str {
    EXPLANATIONS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, text)| *text)
        .unwrap_or(UNRECOGNIZED)
}

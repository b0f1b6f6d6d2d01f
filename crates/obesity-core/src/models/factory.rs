use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

/// Build a boxed classifier model from a `ModelConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_model(params: ModelConfig) -> Box<dyn ClassifierModel> {
    match params.model_type {
        ModelType::Gbdt { .. } => Box::new(crate::models::gbdt::MulticlassGbdt::new(params)),
        ModelType::RandomForest { .. } => {
            Box::new(crate::models::forest::ForestClassifier::new(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn factory_matches_model_type() {
        let gbdt = build_model(ModelConfig::default());
        assert_eq!(gbdt.name(), "gbdt");

        let forest = build_model(ModelConfig::new(
            0.1,
            ModelType::from_str("random_forest").unwrap(),
        ));
        assert_eq!(forest.name(), "random_forest");
    }
}

//! Linear regression cost model: y = intercept + Σ coefficient·x, floored at 0

use crate::features::{FeatureVector, FEATURE_NAMES};
use crate::metadata::ModelMetadata;
use crate::predictor::{CostPredictor, PredictorError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

/// Linear cost model loaded from a JSON artifact.
///
/// Coefficients are keyed by feature name; features without a coefficient
/// contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearCostModel {
    pub metadata: ModelMetadata,
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
}

impl LinearCostModel {
    pub fn new(
        metadata: ModelMetadata,
        intercept: f64,
        coefficients: BTreeMap<String, f64>,
    ) -> Result<Self, PredictorError> {
        let model = Self {
            metadata,
            intercept,
            coefficients,
        };
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<(), PredictorError> {
        self.metadata.check_feature_layout()?;
        if let Some(unknown) = self
            .coefficients
            .keys()
            .find(|k| !FEATURE_NAMES.contains(&k.as_str()))
        {
            return Err(PredictorError::LoadError(format!(
                "coefficient for unknown feature {unknown:?}"
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.values().any(|c| !c.is_finite()) {
            return Err(PredictorError::LoadError(
                "model parameters must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, PredictorError> {
        let model: Self = serde_json::from_str(s)
            .map_err(|e| PredictorError::LoadError(format!("invalid model JSON: {e}")))?;
        model.check()?;
        Ok(model)
    }

    /// Load a model artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let path = path.as_ref();
        let s = read_to_string(path).map_err(|e| {
            PredictorError::LoadError(format!("cannot read {}: {e}", path.display()))
        })?;
        let model = Self::from_json_str(&s)?;
        log::info!(
            "loaded cost model {} v{} from {}",
            model.metadata.name,
            model.metadata.version,
            path.display()
        );
        Ok(model)
    }

    pub fn to_json_string(&self) -> Result<String, PredictorError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PredictorError::InferenceError(format!("cannot serialize model: {e}")))
    }
}

impl CostPredictor for LinearCostModel {
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictorError> {
        let dot: f64 = features
            .iter()
            .filter_map(|(name, x)| self.coefficients.get(name).map(|w| w * x))
            .sum();
        Ok(vec![(dot + self.intercept).max(0.0)])
    }

    fn predictor_name(&self) -> &str {
        &self.metadata.name
    }
}

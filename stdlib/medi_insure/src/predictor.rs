//! Pluggable cost predictor trait and error types for model inference

use crate::features::FeatureVector;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur inside a predictor
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("Model loading failed: {0}")]
    LoadError(String),
    #[error("Inference failed: {0}")]
    InferenceError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Pre-trained regression model that turns a feature vector into a cost.
///
/// Implementations return the raw model output; a well-formed output holds
/// exactly one finite, non-negative value.
pub trait CostPredictor: Send + Sync {
    /// Run inference on one encoded subject
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictorError>;

    /// Get predictor name/identifier
    fn predictor_name(&self) -> &str;
}

impl<P: CostPredictor + ?Sized> CostPredictor for &P {
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictorError> {
        (**self).predict(features)
    }

    fn predictor_name(&self) -> &str {
        (**self).predictor_name()
    }
}

impl<P: CostPredictor + ?Sized> CostPredictor for Box<P> {
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictorError> {
        (**self).predict(features)
    }

    fn predictor_name(&self) -> &str {
        (**self).predictor_name()
    }
}

impl<P: CostPredictor + ?Sized> CostPredictor for Arc<P> {
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictorError> {
        (**self).predict(features)
    }

    fn predictor_name(&self) -> &str {
        (**self).predictor_name()
    }
}

/// Adapts a closure into a [`CostPredictor`], mostly for stubbing the model
pub struct FnPredictor<F> {
    name: String,
    f: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&FeatureVector) -> Result<Vec<f64>, PredictorError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> CostPredictor for FnPredictor<F>
where
    F: Fn(&FeatureVector) -> Result<Vec<f64>, PredictorError> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictorError> {
        (self.f)(features)
    }

    fn predictor_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Subject;

    #[test]
    fn fn_predictor_forwards_features() {
        let p = FnPredictor::new("age-only", |fv: &FeatureVector| Ok(vec![fv.values()[0] * 100.0]));
        let fv = FeatureVector::encode(&Subject::default()).unwrap();
        assert_eq!(p.predict(&fv).unwrap(), vec![3000.0]);
        assert_eq!(p.predictor_name(), "age-only");
    }

    #[test]
    fn smart_pointers_delegate() {
        let p = Arc::new(FnPredictor::new("const", |_: &FeatureVector| Ok(vec![1.0])));
        let boxed: Box<dyn CostPredictor> = Box::new(Arc::clone(&p));
        let fv = FeatureVector::encode(&Subject::default()).unwrap();
        assert_eq!(boxed.predict(&fv).unwrap(), vec![1.0]);
        assert_eq!(p.predictor_name(), "const");
    }
}

//! Prediction requests: encode a subject, run the model, attach the risk tier

use crate::error::{ModelInvocationError, PredictionError};
use crate::features::FeatureVector;
use crate::predictor::CostPredictor;
use crate::risk::{classify, RiskTier};
use crate::subject::Subject;
use serde::{Deserialize, Serialize};

/// Cost estimate paired with the subject's risk tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub estimated_cost: f64,
    pub risk_tier: RiskTier,
}

/// Runs prediction requests against an injected cost model.
///
/// The model is loaded once by the caller and handed in here; the builder
/// never mutates it.
#[derive(Debug, Clone)]
pub struct PredictionRequestBuilder<P> {
    model: P,
}

impl<P: CostPredictor> PredictionRequestBuilder<P> {
    pub fn new(model: P) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &P {
        &self.model
    }

    pub fn into_model(self) -> P {
        self.model
    }

    pub fn build_and_predict(&self, subject: &Subject) -> Result<PredictionResult, PredictionError> {
        build_and_predict(subject, &self.model)
    }
}

/// Encode `subject`, invoke `model`, and pair the estimate with the risk tier
pub fn build_and_predict<P: CostPredictor + ?Sized>(
    subject: &Subject,
    model: &P,
) -> Result<PredictionResult, PredictionError> {
    let features = FeatureVector::encode(subject)?;
    log::debug!("encoded subject: {features:?}");

    let estimated_cost = invoke(model, &features)?;
    let risk_tier = classify(subject.age, subject.bmi, subject.smoker, subject.children);
    log::debug!(
        "{} estimated {estimated_cost:.2} ({risk_tier})",
        model.predictor_name()
    );

    Ok(PredictionResult {
        estimated_cost,
        risk_tier,
    })
}

fn invoke<P: CostPredictor + ?Sized>(
    model: &P,
    features: &FeatureVector,
) -> Result<f64, ModelInvocationError> {
    let output = model.predict(features).map_err(|source| {
        log::warn!("predictor {} failed: {source}", model.predictor_name());
        ModelInvocationError::Predictor {
            predictor: model.predictor_name().to_string(),
            source,
        }
    })?;

    let value = match output.as_slice() {
        [] => Err(ModelInvocationError::EmptyOutput),
        [x] if !x.is_finite() => Err(ModelInvocationError::NonFinite(*x)),
        [x] if *x < 0.0 => Err(ModelInvocationError::Negative(*x)),
        [x] => Ok(*x),
        many => Err(ModelInvocationError::MultipleOutputs(many.len())),
    };
    if let Err(e) = &value {
        log::warn!("rejected output from {}: {e}", model.predictor_name());
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{FnPredictor, PredictorError};

    fn constant(out: Vec<f64>) -> FnPredictor<impl Fn(&FeatureVector) -> Result<Vec<f64>, PredictorError> + Send + Sync> {
        FnPredictor::new("constant", move |_: &FeatureVector| Ok(out.clone()))
    }

    #[test]
    fn well_formed_output_is_accepted() {
        let result = build_and_predict(&Subject::default(), &constant(vec![1234.5])).unwrap();
        assert_eq!(result.estimated_cost, 1234.5);
        // age 30, bmi 25.0, smoker, 1 child
        assert_eq!(result.risk_tier, RiskTier::Medium);
    }

    #[test]
    fn zero_cost_is_allowed() {
        assert!(build_and_predict(&Subject::default(), &constant(vec![0.0])).is_ok());
    }

    #[test]
    fn malformed_outputs_are_rejected() {
        let cases = [
            (vec![], "no output"),
            (vec![1.0, 2.0], "2 outputs"),
            (vec![f64::NAN], "non-finite"),
            (vec![f64::INFINITY], "non-finite"),
            (vec![-0.01], "negative"),
        ];
        for (out, needle) in cases {
            let err = build_and_predict(&Subject::default(), &constant(out)).unwrap_err();
            assert!(matches!(err, PredictionError::ModelInvocation(_)));
            assert!(err.to_string().contains(needle), "{err} lacks {needle}");
        }
    }
}

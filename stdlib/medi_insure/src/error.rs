//! Error types for subject encoding and model invocation

use crate::predictor::PredictorError;
use thiserror::Error;

/// A subject field could not be mapped into the model's feature space
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("{field} = {value} is outside the accepted range {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: String,
    },
    #[error("{field} = {value:?} is not a known category")]
    UnknownCategory { field: &'static str, value: String },
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{field} = {value} must be a whole number")]
    NotAnInteger { field: &'static str, value: f64 },
    #[error("more than one {0} flag is set")]
    ConflictingFlags(&'static str),
}

/// The predictor failed or returned something that is not a usable cost
#[derive(Debug, Error)]
pub enum ModelInvocationError {
    #[error("predictor {predictor} failed: {source}")]
    Predictor {
        predictor: String,
        #[source]
        source: PredictorError,
    },
    #[error("predictor returned no output")]
    EmptyOutput,
    #[error("predictor returned {0} outputs, expected exactly one")]
    MultipleOutputs(usize),
    #[error("predictor returned a non-finite estimate: {0}")]
    NonFinite(f64),
    #[error("predictor returned a negative estimate: {0}")]
    Negative(f64),
}

/// Errors surfaced by a prediction request
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Model invocation error: {0}")]
    ModelInvocation(#[from] ModelInvocationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = EncodingError::OutOfRange {
            field: "age",
            value: "17".into(),
            expected: "18..=65".into(),
        };
        assert_eq!(
            err.to_string(),
            "age = 17 is outside the accepted range 18..=65"
        );

        let err = EncodingError::UnknownCategory {
            field: "region",
            value: "midwest".into(),
        };
        assert_eq!(err.to_string(), "region = \"midwest\" is not a known category");
    }

    #[test]
    fn prediction_error_wraps_both_kinds() {
        let enc: PredictionError = EncodingError::MissingField("bmi").into();
        assert!(matches!(enc, PredictionError::Encoding(_)));
        assert_eq!(enc.to_string(), "Encoding error: missing field: bmi");

        let inv: PredictionError = ModelInvocationError::Negative(-3.5).into();
        assert!(matches!(inv, PredictionError::ModelInvocation(_)));
        assert_eq!(
            inv.to_string(),
            "Model invocation error: predictor returned a negative estimate: -3.5"
        );
    }
}

//! Medical insurance cost estimation and risk tiering for Medi
//!
//! Encodes a subject's personal attributes into the feature layout of a
//! pre-trained regression model, runs the injected model, and pairs the cost
//! estimate with a rule-based risk tier.
//!
//! ```no_run
//! use medi_insure::{build_and_predict, classify, LinearCostModel, Smoker, Subject};
//!
//! let model = LinearCostModel::load("models/linear_cost_model.json")?;
//! let subject = Subject::default();
//! let result = build_and_predict(&subject, &model)?;
//! assert_eq!(result.risk_tier, classify(30, 25.0, Smoker::Yes, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backends;
pub mod config;
pub mod error;
pub mod features;
pub mod metadata;
pub mod predictor;
pub mod report;
pub mod request;
pub mod risk;
pub mod subject;

pub use backends::LinearCostModel;
pub use config::{ConfigError, DisplayConfig, InsureConfig, ModelConfig};
pub use error::{EncodingError, ModelInvocationError, PredictionError};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use metadata::{ModelMetadata, ModelVersion};
pub use predictor::{CostPredictor, FnPredictor, PredictorError};
pub use report::{advice_for, format_cost, Advice, PredictionReport, Severity};
pub use request::{build_and_predict, PredictionRequestBuilder, PredictionResult};
pub use risk::{assess, classify, risk_score, RiskAssessment, RiskTier};
pub use subject::{Region, Sex, Smoker, Subject};

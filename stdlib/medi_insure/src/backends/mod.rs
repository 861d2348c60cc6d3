//! Bundled predictor implementations

pub mod linear;

pub use linear::LinearCostModel;

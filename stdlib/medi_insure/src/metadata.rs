//! Model artifact metadata and versioning

use crate::features::FEATURE_NAMES;
use crate::predictor::PredictorError;
use serde::{Deserialize, Serialize};

/// Semantic version for model artifacts
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ModelVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(format!("Invalid version format: {s}"));
        }
        let num = |label: &str, part: &str| {
            part.parse::<u32>()
                .map_err(|_| format!("Invalid {label} version: {part}"))
        };
        Ok(Self::new(
            num("major", parts[0])?,
            num("minor", parts[1])?,
            num("patch", parts[2])?,
        ))
    }
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Describes a persisted cost model and the inputs it was trained on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub version: ModelVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Quantity the model estimates
    #[serde(default = "default_target")]
    pub target: String,
    /// Training column order
    pub feature_names: Vec<String>,
}

fn default_target() -> String {
    "charges".to_string()
}

impl ModelMetadata {
    /// Metadata for a model trained on the standard feature layout
    pub fn new(name: impl Into<String>, version: ModelVersion) -> Self {
        Self {
            name: name.into(),
            version,
            description: None,
            created_at: chrono::Utc::now().to_rfc3339(),
            target: default_target(),
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reject artifacts trained on a different column layout
    pub fn check_feature_layout(&self) -> Result<(), PredictorError> {
        if self.feature_names.iter().map(String::as_str).eq(FEATURE_NAMES) {
            Ok(())
        } else {
            Err(PredictorError::LoadError(format!(
                "model {} expects features {:?}, encoder produces {:?}",
                self.name, self.feature_names, FEATURE_NAMES
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parse_and_display() {
        let v = ModelVersion::parse("1.2.3").unwrap();
        assert_eq!(v, ModelVersion::new(1, 2, 3));
        assert_eq!(v.to_string(), "1.2.3");
        assert!(ModelVersion::parse("1.2").is_err());
        assert!(ModelVersion::parse("1.x.3").is_err());
    }

    #[test]
    fn version_ordering() {
        assert!(ModelVersion::new(1, 0, 0) < ModelVersion::new(1, 1, 0));
        assert!(ModelVersion::new(1, 9, 9) < ModelVersion::new(2, 0, 0));
    }

    #[test]
    fn new_metadata_uses_standard_layout() {
        let meta = ModelMetadata::new("rf", ModelVersion::new(0, 1, 0)).with_description("demo");
        assert!(meta.check_feature_layout().is_ok());
        assert_eq!(meta.target, "charges");
        assert!(chrono::DateTime::parse_from_rfc3339(&meta.created_at).is_ok());
    }

    #[test]
    fn reordered_features_are_rejected() {
        let mut meta = ModelMetadata::new("rf", ModelVersion::new(0, 1, 0));
        meta.feature_names.swap(0, 1);
        assert!(matches!(
            meta.check_feature_layout(),
            Err(PredictorError::LoadError(_))
        ));
    }
}

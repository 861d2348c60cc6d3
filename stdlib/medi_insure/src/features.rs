//! One-hot feature encoding of a subject for the cost model
//!
//! The column layout matches the model's training frame: numeric fields first,
//! then dummy columns with `female` and `northeast` dropped as baselines.

use crate::error::EncodingError;
use crate::subject::{Region, Sex, Smoker, Subject};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of model input columns
pub const FEATURE_COUNT: usize = 8;

/// Column names in the order the model expects them
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "bmi",
    "children",
    "sex_male",
    "smoker_yes",
    "region_northwest",
    "region_southeast",
    "region_southwest",
];

/// Encoded model input for a single subject
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub age: u32,
    pub bmi: f64,
    pub children: u32,
    pub sex_male: u8,
    pub smoker_yes: u8,
    pub region_northwest: u8,
    pub region_southeast: u8,
    pub region_southwest: u8,
}

fn flag(on: bool) -> u8 {
    u8::from(on)
}

impl FeatureVector {
    /// Encode a subject, validating its numeric ranges first
    pub fn encode(subject: &Subject) -> Result<Self, EncodingError> {
        subject.validate()?;
        Ok(Self {
            age: subject.age,
            bmi: subject.bmi,
            children: subject.children,
            sex_male: flag(subject.sex == Sex::Male),
            smoker_yes: flag(subject.smoker.is_smoker()),
            region_northwest: flag(subject.region == Region::Northwest),
            region_southeast: flag(subject.region == Region::Southeast),
            region_southwest: flag(subject.region == Region::Southwest),
        })
    }

    /// Column values in [`FEATURE_NAMES`] order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.age),
            self.bmi,
            f64::from(self.children),
            f64::from(self.sex_male),
            f64::from(self.smoker_yes),
            f64::from(self.region_northwest),
            f64::from(self.region_southeast),
            f64::from(self.region_southwest),
        ]
    }

    /// Look up a single column by name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.values()[idx])
    }

    /// `(name, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.values())
    }

    pub fn sex(&self) -> Sex {
        if self.sex_male == 1 {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    pub fn smoker(&self) -> Smoker {
        if self.smoker_yes == 1 {
            Smoker::Yes
        } else {
            Smoker::No
        }
    }

    /// Recover the region; all flags clear means the `northeast` baseline.
    pub fn region(&self) -> Result<Region, EncodingError> {
        let set: Vec<Region> = [
            (self.region_northwest, Region::Northwest),
            (self.region_southeast, Region::Southeast),
            (self.region_southwest, Region::Southwest),
        ]
        .into_iter()
        .filter(|(bit, _)| *bit != 0)
        .map(|(_, region)| region)
        .collect();

        match set.as_slice() {
            [] => Ok(Region::Northeast),
            [region] => Ok(*region),
            _ => Err(EncodingError::ConflictingFlags("region")),
        }
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        map.serialize_entry("age", &self.age)?;
        map.serialize_entry("bmi", &self.bmi)?;
        map.serialize_entry("children", &self.children)?;
        map.serialize_entry("sex_male", &self.sex_male)?;
        map.serialize_entry("smoker_yes", &self.smoker_yes)?;
        map.serialize_entry("region_northwest", &self.region_northwest)?;
        map.serialize_entry("region_southeast", &self.region_southeast)?;
        map.serialize_entry("region_southwest", &self.region_southwest)?;
        map.end()
    }
}

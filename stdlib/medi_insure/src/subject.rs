//! Subject attributes collected per prediction request

use crate::error::EncodingError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Accepted ages in years
pub const AGE_RANGE: RangeInclusive<u32> = 18..=65;
/// Accepted body mass index values
pub const BMI_RANGE: RangeInclusive<f64> = 15.0..=40.0;
/// Accepted number of dependent children
pub const CHILDREN_RANGE: RangeInclusive<u32> = 0..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoker {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl Smoker {
    pub const ALL: [Smoker; 2] = [Smoker::Yes, Smoker::No];

    pub fn as_str(self) -> &'static str {
        match self {
            Smoker::Yes => "yes",
            Smoker::No => "no",
        }
    }

    pub fn is_smoker(self) -> bool {
        matches!(self, Smoker::Yes)
    }
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Northeast,
        Region::Northwest,
        Region::Southeast,
        Region::Southwest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Northeast => "northeast",
            Region::Northwest => "northwest",
            Region::Southeast => "southeast",
            Region::Southwest => "southwest",
        }
    }
}

/// Finds the variant whose name matches `value`, ignoring case and padding.
fn parse_category<T: Copy>(
    field: &'static str,
    value: &str,
    variants: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, EncodingError> {
    let wanted = value.trim();
    variants
        .iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| EncodingError::UnknownCategory {
            field,
            value: value.to_string(),
        })
}

impl FromStr for Sex {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("sex", s, &Sex::ALL, Sex::as_str)
    }
}

impl FromStr for Smoker {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("smoker", s, &Smoker::ALL, Smoker::as_str)
    }
}

impl FromStr for Region {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("region", s, &Region::ALL, Region::as_str)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Smoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personal attributes of the person being quoted.
///
/// Fields are public so callers can build a subject directly; anything that
/// reaches the model goes through [`Subject::validate`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub age: u32,
    pub bmi: f64,
    pub children: u32,
    pub sex: Sex,
    pub smoker: Smoker,
    pub region: Region,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            age: 30,
            bmi: 25.0,
            children: 1,
            sex: Sex::Male,
            smoker: Smoker::Yes,
            region: Region::Southeast,
        }
    }
}

impl Subject {
    /// Create a subject, rejecting values outside the accepted ranges
    pub fn new(
        age: u32,
        bmi: f64,
        children: u32,
        sex: Sex,
        smoker: Smoker,
        region: Region,
    ) -> Result<Self, EncodingError> {
        let subject = Self {
            age,
            bmi,
            children,
            sex,
            smoker,
            region,
        };
        subject.validate()?;
        Ok(subject)
    }

    /// Check every numeric field against its accepted range
    pub fn validate(&self) -> Result<(), EncodingError> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(out_of_range("age", self.age, &AGE_RANGE));
        }
        if !self.bmi.is_finite() {
            return Err(EncodingError::NotANumber("bmi"));
        }
        if !BMI_RANGE.contains(&self.bmi) {
            return Err(out_of_range("bmi", self.bmi, &BMI_RANGE));
        }
        if !CHILDREN_RANGE.contains(&self.children) {
            return Err(out_of_range("children", self.children, &CHILDREN_RANGE));
        }
        Ok(())
    }

    /// Build a subject from a raw form record.
    ///
    /// `age`, `bmi` and `children` must be JSON numbers; `sex`, `smoker` and
    /// `region` must be strings naming a category. BMI is rounded to one
    /// decimal place, the step the form collects it at.
    pub fn from_json(data: &JsonValue) -> Result<Self, EncodingError> {
        let age = whole_number(data, "age")?;
        let bmi = (number(data, "bmi")? * 10.0).round() / 10.0;
        let children = whole_number(data, "children")?;
        let sex = text(data, "sex")?.parse()?;
        let smoker = text(data, "smoker")?.parse()?;
        let region = text(data, "region")?.parse()?;
        Self::new(age, bmi, children, sex, smoker, region)
    }
}

fn out_of_range<T: fmt::Display + fmt::Debug>(
    field: &'static str,
    value: T,
    range: &RangeInclusive<T>,
) -> EncodingError {
    EncodingError::OutOfRange {
        field,
        value: value.to_string(),
        expected: format!("{range:?}"),
    }
}

fn field<'a>(data: &'a JsonValue, name: &'static str) -> Result<&'a JsonValue, EncodingError> {
    match data.get(name) {
        Some(JsonValue::Null) | None => Err(EncodingError::MissingField(name)),
        Some(v) => Ok(v),
    }
}

fn number(data: &JsonValue, name: &'static str) -> Result<f64, EncodingError> {
    field(data, name)?
        .as_f64()
        .ok_or(EncodingError::NotANumber(name))
}

fn whole_number(data: &JsonValue, name: &'static str) -> Result<u32, EncodingError> {
    let x = number(data, name)?;
    if x.fract() != 0.0 {
        return Err(EncodingError::NotAnInteger { field: name, value: x });
    }
    if x < 0.0 || x > f64::from(u32::MAX) {
        return Err(EncodingError::OutOfRange {
            field: name,
            value: x.to_string(),
            expected: format!("0..={}", u32::MAX),
        });
    }
    Ok(x as u32)
}

fn text<'a>(data: &'a JsonValue, name: &'static str) -> Result<&'a str, EncodingError> {
    let value = field(data, name)?;
    value.as_str().ok_or_else(|| EncodingError::UnknownCategory {
        field: name,
        value: value.to_string(),
    })
}

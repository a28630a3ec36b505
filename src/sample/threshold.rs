use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

/// A numeric threshold which keeps the text it was parsed from, so a value
/// given as `"11.0"` is rendered back as `11.0` and not `11`.
///
/// Thresholds sent as JSON numbers have no source text and are rendered in
/// their shortest form.
#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    value: f64,
    text: String,
}

impl Threshold {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Threshold {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let value = text.parse::<f64>()?;

        Ok(Self {
            value,
            text: text.to_string(),
        })
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Threshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawThreshold {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match optional(deserializer)? {
            Some(threshold) => Ok(threshold),
            None => Err(serde::de::Error::custom("threshold must not be empty")),
        }
    }
}

/// Deserializes an optional threshold where an empty string means "not set".
pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Threshold>, D::Error> {
    match Option::<RawThreshold>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawThreshold::Number(value)) => Ok(Some(Threshold::new(value))),
        Some(RawThreshold::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawThreshold::Text(text)) => text
            .parse::<Threshold>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("bad threshold '{text}': {e}"))),
    }
}

/// The two threshold classes a sample may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Warning,
    Critical,
}

impl Class {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// The threshold shape selected for one class of a sample.
///
/// A single value always wins over a range. A range is only selected when
/// both ends are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit<'a> {
    None,
    Single(&'a Threshold),
    Range { min: &'a Threshold, max: &'a Threshold },
}

impl<'a> Limit<'a> {
    pub fn select(
        single: Option<&'a Threshold>,
        min: Option<&'a Threshold>,
        max: Option<&'a Threshold>,
    ) -> Self {
        match (single, min, max) {
            (Some(value), _, _) => Self::Single(value),
            (None, Some(min), Some(max)) => Self::Range { min, max },
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "optional")]
        warn: Option<Threshold>,
    }

    #[test]
    fn keeps_original_text() {
        let t: Threshold = "11.0".parse().unwrap();
        assert_eq!(t.value(), 11.0);
        assert_eq!(t.to_string(), "11.0");
    }

    #[test]
    fn empty_string_is_absent() {
        let h: Holder = serde_json::from_str(r#"{"warn": ""}"#).unwrap();
        assert!(h.warn.is_none());

        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(h.warn.is_none());

        let h: Holder = serde_json::from_str(r#"{"warn": null}"#).unwrap();
        assert!(h.warn.is_none());
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let h: Holder = serde_json::from_str(r#"{"warn": 80}"#).unwrap();
        assert_eq!(h.warn.unwrap().value(), 80.0);

        let h: Holder = serde_json::from_str(r#"{"warn": 11.0}"#).unwrap();
        assert_eq!(h.warn.unwrap().as_str(), "11");

        let h: Holder = serde_json::from_str(r#"{"warn": "11.0"}"#).unwrap();
        assert_eq!(h.warn.unwrap().as_str(), "11.0");

        let h: Holder = serde_json::from_str(r#"{"warn": " 11.5 "}"#).unwrap();
        assert_eq!(h.warn.unwrap().as_str(), "11.5");

        assert!(serde_json::from_str::<Holder>(r#"{"warn": "high"}"#).is_err());
    }

    #[test]
    fn single_value_wins_over_range() {
        let single = Threshold::new(5.0);
        let min = Threshold::new(1.0);
        let max = Threshold::new(9.0);

        assert_eq!(
            Limit::select(Some(&single), Some(&min), Some(&max)),
            Limit::Single(&single)
        );
        assert_eq!(
            Limit::select(None, Some(&min), Some(&max)),
            Limit::Range {
                min: &min,
                max: &max
            }
        );
        assert_eq!(Limit::select(None, Some(&min), None), Limit::None);
        assert_eq!(Limit::select(None, None, None), Limit::None);
    }
}

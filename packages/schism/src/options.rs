use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::ConfigError;

/// Delay between the last resize notification and the rebuild it causes
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 200;

/// Two words start different rows when their tops differ by at least
/// `font_size * LINE_THRESHOLD_RATIO`.
///
/// This absorbs sub-pixel and line-height jitter between boxes on one row.
/// It is a calibration value, not derived from font metrics, so it can be
/// overridden through [`SchismOptions::line_threshold_ratio`].
pub const LINE_THRESHOLD_RATIO: f32 = 0.2;

/// The granularity units are produced at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Chars,
    Words,
    Lines,
}

impl Mutation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mutation::Chars => "chars",
            Mutation::Words => "words",
            Mutation::Lines => "lines",
        }
    }
}

impl FromStr for Mutation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chars" => Ok(Mutation::Chars),
            "words" => Ok(Mutation::Words),
            "lines" => Ok(Mutation::Lines),
            other => Err(ConfigError::UnknownMutation(other.to_string())),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overflow policy of the inner boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    #[default]
    Hidden,
    Visible,
}

impl Overflow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overflow::Hidden => "hidden",
            Overflow::Visible => "visible",
        }
    }
}

impl FromStr for Overflow {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hidden" => Ok(Overflow::Hidden),
            "visible" => Ok(Overflow::Visible),
            other => Err(ConfigError::UnknownOverflow(other.to_string())),
        }
    }
}

/// Construction options as supplied by the host, before validation.
///
/// Deserializes from camelCase keys (`mutation`, `overflow`, `resizeDebounce`,
/// `lineThresholdRatio`). Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchismOptions {
    pub mutation: String,
    pub overflow: String,
    /// Milliseconds
    pub resize_debounce: u64,
    pub line_threshold_ratio: f32,
}

impl Default for SchismOptions {
    fn default() -> Self {
        Self {
            mutation: Mutation::Words.as_str().to_string(),
            overflow: Overflow::Hidden.as_str().to_string(),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE_MS,
            line_threshold_ratio: LINE_THRESHOLD_RATIO,
        }
    }
}

impl SchismOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_mutation(mut self, mutation: impl Into<String>) -> Self {
        self.mutation = mutation.into();
        self
    }

    pub fn with_overflow(mut self, overflow: impl Into<String>) -> Self {
        self.overflow = overflow.into();
        self
    }

    pub fn with_resize_debounce(mut self, millis: u64) -> Self {
        self.resize_debounce = millis;
        self
    }

    pub fn with_line_threshold_ratio(mut self, ratio: f32) -> Self {
        self.line_threshold_ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<ValidatedOptions, ConfigError> {
        let mutation = self.mutation.parse()?;
        let overflow = self.overflow.parse()?;
        if self.resize_debounce == 0 {
            return Err(ConfigError::InvalidDebounce(self.resize_debounce));
        }
        if !self.line_threshold_ratio.is_finite() || self.line_threshold_ratio <= 0.0 {
            return Err(ConfigError::InvalidLineThreshold(self.line_threshold_ratio));
        }
        Ok(ValidatedOptions {
            mutation,
            overflow,
            resize_debounce: Duration::from_millis(self.resize_debounce),
            line_threshold_ratio: self.line_threshold_ratio,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedOptions {
    pub mutation: Mutation,
    pub overflow: Overflow,
    pub resize_debounce: Duration,
    pub line_threshold_ratio: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = SchismOptions::default().validate().unwrap();
        assert_eq!(options.mutation, Mutation::Words);
        assert_eq!(options.overflow, Overflow::Hidden);
        assert_eq!(options.resize_debounce, Duration::from_millis(200));
        assert_eq!(options.line_threshold_ratio, 0.2);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let options =
            SchismOptions::from_json(r#"{ "mutation": "lines", "resizeDebounce": 50 }"#).unwrap();
        assert_eq!(options.mutation, "lines");
        assert_eq!(options.overflow, "hidden");
        assert_eq!(options.resize_debounce, 50);

        let validated = options.validate().unwrap();
        assert_eq!(validated.mutation, Mutation::Lines);
        assert_eq!(validated.resize_debounce, Duration::from_millis(50));
    }

    #[test]
    fn rejects_unknown_values() {
        let err = SchismOptions::default()
            .with_mutation("paragraphs")
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownMutation("paragraphs".into()));

        let err = SchismOptions::default().with_overflow("scroll").validate().unwrap_err();
        assert_eq!(err, ConfigError::UnknownOverflow("scroll".into()));

        let err = SchismOptions::default().with_resize_debounce(0).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidDebounce(0));

        let err = SchismOptions::default()
            .with_line_threshold_ratio(f32::NAN)
            .validate();
        assert!(matches!(err, Err(ConfigError::InvalidLineThreshold(_))));
    }

    #[test]
    fn mutation_names_are_case_sensitive() {
        assert!("Words".parse::<Mutation>().is_err());
        assert_eq!("chars".parse::<Mutation>(), Ok(Mutation::Chars));
        assert_eq!(Mutation::Lines.to_string(), "lines");
    }
}

#![forbid(unsafe_code)]

//! Layout engine configuration.
//!
//! Defaults suit an interactive diagram editor. The word and min-width
//! caches key on each other's output, so their capacities are kept close;
//! the wrap cache is larger because every resize drag produces new widths.
//!
//! Values can be overridden from the environment:
//!
//! | Variable                   | Field                      |
//! |----------------------------|----------------------------|
//! | `BOXTEXT_WORD_CACHE`       | `word_cache_capacity`      |
//! | `BOXTEXT_MIN_WIDTH_CACHE`  | `min_width_cache_capacity` |
//! | `BOXTEXT_WRAP_CACHE`       | `wrap_cache_capacity`      |
//! | `BOXTEXT_END_BUFFER_GLYPH` | `end_buffer_glyph`         |
//! | `BOXTEXT_EPSILON`          | `epsilon`                  |

use std::env;
use std::fmt;

pub const ENV_WORD_CACHE: &str = "BOXTEXT_WORD_CACHE";
pub const ENV_MIN_WIDTH_CACHE: &str = "BOXTEXT_MIN_WIDTH_CACHE";
pub const ENV_WRAP_CACHE: &str = "BOXTEXT_WRAP_CACHE";
pub const ENV_END_BUFFER_GLYPH: &str = "BOXTEXT_END_BUFFER_GLYPH";
pub const ENV_EPSILON: &str = "BOXTEXT_EPSILON";

/// Default capacity of the plain text → word regions cache.
pub const DEFAULT_WORD_CACHE_CAPACITY: usize = 180;
/// Default capacity of the min-width cache.
pub const DEFAULT_MIN_WIDTH_CACHE_CAPACITY: usize = 190;
/// Default capacity of the wrap cache.
pub const DEFAULT_WRAP_CACHE_CAPACITY: usize = 400;
/// Reference glyph whose width is reserved at the end of every line.
pub const DEFAULT_END_BUFFER_GLYPH: char = 'n';
/// Slack added to minimum widths to absorb rounding at the exact boundary.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Tunables for [`LayoutEngine`](crate::LayoutEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub word_cache_capacity: usize,
    pub min_width_cache_capacity: usize,
    pub wrap_cache_capacity: usize,
    pub end_buffer_glyph: char,
    pub epsilon: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            word_cache_capacity: DEFAULT_WORD_CACHE_CAPACITY,
            min_width_cache_capacity: DEFAULT_MIN_WIDTH_CACHE_CAPACITY,
            wrap_cache_capacity: DEFAULT_WRAP_CACHE_CAPACITY,
            end_buffer_glyph: DEFAULT_END_BUFFER_GLYPH,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: LayoutConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl LayoutConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn word_cache_capacity(mut self, capacity: usize) -> Self {
        self.word_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn min_width_cache_capacity(mut self, capacity: usize) -> Self {
        self.min_width_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn wrap_cache_capacity(mut self, capacity: usize) -> Self {
        self.wrap_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn end_buffer_glyph(mut self, glyph: char) -> Self {
        self.end_buffer_glyph = glyph;
        self
    }

    #[must_use]
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> LayoutConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_positive("word_cache_capacity", self.word_cache_capacity, &mut errors);
        validate_positive(
            "min_width_cache_capacity",
            self.min_width_cache_capacity,
            &mut errors,
        );
        validate_positive("wrap_cache_capacity", self.wrap_cache_capacity, &mut errors);
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            errors.push(ConfigError::new(
                "epsilon",
                self.epsilon.to_string(),
                "must be a positive finite number",
            ));
        }
        if self.end_buffer_glyph.is_whitespace() || self.end_buffer_glyph.is_control() {
            errors.push(ConfigError::new(
                "end_buffer_glyph",
                format!("{:?}", self.end_buffer_glyph),
                "must be a visible glyph",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Replace every field [`validate`](Self::validate) rejects with its
    /// default.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if let Err(errors) = self.validate() {
            self.reset_fields(&errors);
        }
        self
    }

    fn reset_fields(&mut self, errors: &[ConfigError]) {
        let defaults = LayoutConfig::default();
        for error in errors {
            match error.field {
                "word_cache_capacity" => self.word_cache_capacity = defaults.word_cache_capacity,
                "min_width_cache_capacity" => {
                    self.min_width_cache_capacity = defaults.min_width_cache_capacity;
                }
                "wrap_cache_capacity" => self.wrap_cache_capacity = defaults.wrap_cache_capacity,
                "end_buffer_glyph" => self.end_buffer_glyph = defaults.end_buffer_glyph,
                "epsilon" => self.epsilon = defaults.epsilon,
                _ => {}
            }
        }
    }
}

fn validate_positive(field: &'static str, value: usize, errors: &mut Vec<ConfigError>) {
    if value == 0 {
        errors.push(ConfigError::new(field, "0", "must be greater than zero"));
    }
}

pub(crate) fn from_env_with<F>(mut get: F) -> ConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = LayoutConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_WORD_CACHE) {
        match parse_usize(&value) {
            Some(parsed) => config.word_cache_capacity = parsed,
            None => errors.push(ConfigError::new(
                "word_cache_capacity",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_MIN_WIDTH_CACHE) {
        match parse_usize(&value) {
            Some(parsed) => config.min_width_cache_capacity = parsed,
            None => errors.push(ConfigError::new(
                "min_width_cache_capacity",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_WRAP_CACHE) {
        match parse_usize(&value) {
            Some(parsed) => config.wrap_cache_capacity = parsed,
            None => errors.push(ConfigError::new(
                "wrap_cache_capacity",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_END_BUFFER_GLYPH) {
        match parse_glyph(&value) {
            Some(parsed) => config.end_buffer_glyph = parsed,
            None => errors.push(ConfigError::new(
                "end_buffer_glyph",
                value,
                "expected exactly one character",
            )),
        }
    }

    if let Some(value) = get(ENV_EPSILON) {
        match parse_f64(&value) {
            Some(parsed) => config.epsilon = parsed,
            None => errors.push(ConfigError::new("epsilon", value, "expected a number")),
        }
    }

    if let Err(mut validation) = config.validate() {
        config.reset_fields(&validation);
        errors.append(&mut validation);
    }

    ConfigParse { config, errors }
}

#[inline]
fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

#[inline]
fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

#[inline]
fn parse_glyph(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(vars: &[(&str, &str)]) -> ConfigParse {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_are_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.word_cache_capacity, 180);
        assert_eq!(config.min_width_cache_capacity, 190);
        assert_eq!(config.wrap_cache_capacity, 400);
        assert_eq!(config.end_buffer_glyph, 'n');
        assert_eq!(config.epsilon, 0.01);
    }

    #[test]
    fn empty_env_yields_defaults() {
        let parsed = parse(&[]);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config, LayoutConfig::default());
    }

    #[test]
    fn env_overrides_apply() {
        let parsed = parse(&[
            (ENV_WORD_CACHE, "16"),
            (ENV_MIN_WIDTH_CACHE, " 32 "),
            (ENV_WRAP_CACHE, "64"),
            (ENV_END_BUFFER_GLYPH, "m"),
            (ENV_EPSILON, "0.5"),
        ]);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(
            parsed.config,
            LayoutConfig::new()
                .word_cache_capacity(16)
                .min_width_cache_capacity(32)
                .wrap_cache_capacity(64)
                .end_buffer_glyph('m')
                .epsilon(0.5)
        );
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let parsed = parse(&[
            (ENV_WORD_CACHE, "lots"),
            (ENV_END_BUFFER_GLYPH, "mn"),
            (ENV_EPSILON, "tiny"),
        ]);
        assert_eq!(parsed.config, LayoutConfig::default());
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["word_cache_capacity", "end_buffer_glyph", "epsilon"]);
    }

    #[test]
    fn zero_capacity_is_reported() {
        let parsed = parse(&[(ENV_WRAP_CACHE, "0")]);
        assert_eq!(parsed.config.wrap_cache_capacity, DEFAULT_WRAP_CACHE_CAPACITY);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].field, "wrap_cache_capacity");
    }

    #[test]
    fn out_of_range_values_keep_defaults() {
        for eps in ["-0.5", "0", "NaN", "inf"] {
            let parsed = parse(&[(ENV_EPSILON, eps), (ENV_END_BUFFER_GLYPH, "\t")]);
            assert_eq!(parsed.config, LayoutConfig::default(), "epsilon {eps}");
            let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
            assert_eq!(fields, ["epsilon", "end_buffer_glyph"], "epsilon {eps}");
        }
    }

    #[test]
    fn sanitized_resets_only_invalid_fields() {
        let config = LayoutConfig::new()
            .epsilon(-1.0)
            .word_cache_capacity(0)
            .wrap_cache_capacity(7)
            .sanitized();
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.word_cache_capacity, DEFAULT_WORD_CACHE_CAPACITY);
        assert_eq!(config.wrap_cache_capacity, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_epsilon() {
        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let errors = LayoutConfig::new().epsilon(eps).validate().unwrap_err();
            assert_eq!(errors[0].field, "epsilon");
        }
    }

    #[test]
    fn validate_rejects_blank_glyph() {
        let errors = LayoutConfig::new()
            .end_buffer_glyph(' ')
            .validate()
            .unwrap_err();
        assert_eq!(errors[0].field, "end_buffer_glyph");
    }

    #[test]
    fn error_display() {
        let err = ConfigError::new("epsilon", "x", "expected a number");
        assert_eq!(err.to_string(), "epsilon=x (expected a number)");
    }
}

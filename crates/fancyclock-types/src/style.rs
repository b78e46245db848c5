use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// How much detail one half (time or date) of a display string carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// Omit this half entirely
    #[default]
    None,
    Short,
    Medium,
    Long,
    Full,
}

impl FormatStyle {
    pub const ALL: [FormatStyle; 5] = [
        FormatStyle::None,
        FormatStyle::Short,
        FormatStyle::Medium,
        FormatStyle::Long,
        FormatStyle::Full,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatStyle::None => "none",
            FormatStyle::Short => "short",
            FormatStyle::Medium => "medium",
            FormatStyle::Long => "long",
            FormatStyle::Full => "full",
        }
    }

    pub fn is_none(self) -> bool {
        self == FormatStyle::None
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidStyle(format!("unknown style '{}'", s)))
    }
}

/// A named rendering preset: a time half, a date half, or a custom pattern
/// that replaces both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub time: FormatStyle,
    #[serde(default)]
    pub date: FormatStyle,
    /// strftime pattern; when set, `time` and `date` are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl StyleConfig {
    pub fn new(time: FormatStyle, date: FormatStyle) -> Self {
        Self {
            time,
            date,
            pattern: None,
        }
    }

    /// Time-only preset, e.g. "medium time".
    pub fn time(style: FormatStyle) -> Self {
        Self::new(style, FormatStyle::None)
    }

    /// Date-only preset, e.g. "full date".
    pub fn date(style: FormatStyle) -> Self {
        Self::new(FormatStyle::None, style)
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            time: FormatStyle::None,
            date: FormatStyle::None,
            pattern: Some(pattern.into()),
        }
    }

    /// True when the configuration would render an empty string.
    pub fn is_empty(&self) -> bool {
        match &self.pattern {
            Some(p) => p.is_empty(),
            None => self.time.is_none() && self.date.is_none(),
        }
    }
}

impl fmt::Display for StyleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pattern) = &self.pattern {
            return write!(f, "pattern {:?}", pattern);
        }
        match (self.time, self.date) {
            (FormatStyle::None, FormatStyle::None) => f.write_str("empty"),
            (time, FormatStyle::None) => write!(f, "{} time", time),
            (FormatStyle::None, date) => write!(f, "{} date", date),
            (time, date) => write!(f, "{} date, {} time", date, time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_case_insensitive() {
        assert_eq!("Medium".parse::<FormatStyle>().unwrap(), FormatStyle::Medium);
        assert_eq!(" full ".parse::<FormatStyle>().unwrap(), FormatStyle::Full);
        assert!("huge".parse::<FormatStyle>().is_err());
    }

    #[test]
    fn test_style_config_is_empty() {
        assert!(StyleConfig::default().is_empty());
        assert!(StyleConfig::pattern("").is_empty());
        assert!(!StyleConfig::time(FormatStyle::Medium).is_empty());
        assert!(!StyleConfig::pattern("%H").is_empty());
    }

    #[test]
    fn test_style_config_display() {
        assert_eq!(StyleConfig::time(FormatStyle::Medium).to_string(), "medium time");
        assert_eq!(StyleConfig::date(FormatStyle::Full).to_string(), "full date");
        assert_eq!(
            StyleConfig::new(FormatStyle::Short, FormatStyle::Long).to_string(),
            "long date, short time"
        );
    }

    #[test]
    fn test_style_config_deserialize_defaults() {
        let config: StyleConfig = serde_json::from_str(r#"{"time":"medium"}"#).unwrap();
        assert_eq!(config.time, FormatStyle::Medium);
        assert_eq!(config.date, FormatStyle::None);
        assert!(config.pattern.is_none());
    }
}

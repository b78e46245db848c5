//! Locale resolution for display formatting.
//!
//! chrono's locale tables supply localized weekday and month names. The hour
//! cycle and component order are not exposed by chrono, so they come from a
//! short table of well-known locales; everything else is day-first, 24-hour.

use chrono::Locale;
use std::fmt;

use crate::{Error, Result};

/// Environment variables consulted, highest priority first.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

const DEFAULT_LOCALE: &str = "en_US";

const H12_LOCALES: &[&str] = &[
    "en_US", "en_CA", "en_AU", "en_NZ", "en_PH", "en_IN", "hi_IN", "fil_PH", "ur_PK", "bn_BD",
    "es_MX", "ko_KR",
];
const H12_LANGUAGE_PREFIXES: &[&str] = &["ar_"];

const MONTH_FIRST_LOCALES: &[&str] = &["en_US", "en_PH", "fil_PH"];
const YEAR_FIRST_LOCALES: &[&str] = &["ja_JP", "zh_CN", "zh_TW", "ko_KR", "hu_HU", "lt_LT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    /// 1-12 with AM/PM
    H12,
    /// 00-23
    H23,
}

/// Order of day, month and year in date strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MonthFirst,
    DayFirst,
    YearFirst,
}

#[derive(Debug, Clone)]
pub struct LocaleProfile {
    name: String,
    locale: Locale,
    pub hour_cycle: HourCycle,
    pub date_order: DateOrder,
}

impl LocaleProfile {
    /// Look up a locale by name. Accepts `en_US`, `en-US`, `en_US.UTF-8`
    /// and `de_DE@euro`; `C` and `POSIX` map to `en_US`.
    pub fn from_name(raw: &str) -> Result<Self> {
        let name = normalize_name(raw);
        if name.is_empty() {
            return Err(Error::UnknownLocale(raw.to_string()));
        }
        let locale =
            Locale::try_from(name.as_str()).map_err(|_| Error::UnknownLocale(raw.to_string()))?;

        Ok(Self {
            hour_cycle: hour_cycle_for(&name),
            date_order: date_order_for(&name),
            name,
            locale,
        })
    }

    /// Resolve from an explicit name, falling back to the process environment.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        match explicit {
            Some(name) => Self::from_name(name),
            None => Ok(Self::from_env_with(|key| std::env::var(key).ok())),
        }
    }

    /// Resolve from locale environment variables through `lookup`. Unset,
    /// empty or unknown values are skipped; the last resort is `en_US`.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .filter(|value| !value.trim().is_empty())
            .find_map(|value| Self::from_name(&value).ok())
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

// The name fully determines the chrono locale.
impl PartialEq for LocaleProfile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.hour_cycle == other.hour_cycle
            && self.date_order == other.date_order
    }
}

impl Eq for LocaleProfile {}

impl Default for LocaleProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOCALE.to_string(),
            locale: Locale::en_US,
            hour_cycle: HourCycle::H12,
            date_order: DateOrder::MonthFirst,
        }
    }
}

impl fmt::Display for LocaleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Strip encoding and modifier suffixes and normalize the separator.
fn normalize_name(raw: &str) -> String {
    let base = raw
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('-', "_");

    match base.as_str() {
        "C" | "POSIX" => DEFAULT_LOCALE.to_string(),
        _ => base,
    }
}

fn hour_cycle_for(name: &str) -> HourCycle {
    if H12_LOCALES.contains(&name) || H12_LANGUAGE_PREFIXES.iter().any(|p| name.starts_with(p))
    {
        HourCycle::H12
    } else {
        HourCycle::H23
    }
}

fn date_order_for(name: &str) -> DateOrder {
    if MONTH_FIRST_LOCALES.contains(&name) {
        DateOrder::MonthFirst
    } else if YEAR_FIRST_LOCALES.contains(&name) {
        DateOrder::YearFirst
    } else {
        DateOrder::DayFirst
    }
}

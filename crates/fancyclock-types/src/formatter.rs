//! Turns a [`Timestamp`] into display text.
//!
//! A formatter is built once from a [`StyleConfig`] and a [`LocaleProfile`]
//! and then reused for every tick. The parsed strftime items are cached; the
//! cache can be dropped under memory pressure and is rebuilt on next use.

use chrono::Locale;
use chrono::format::{Item, StrftimeItems};
use std::cell::OnceCell;

use crate::locale::{DateOrder, HourCycle, LocaleProfile};
use crate::style::{FormatStyle, StyleConfig};
use crate::timestamp::Timestamp;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct DisplayFormatter {
    style: StyleConfig,
    locale: Locale,
    pattern: String,
    items: OnceCell<Vec<Item<'static>>>,
}

impl DisplayFormatter {
    pub fn new(style: &StyleConfig, locale: &LocaleProfile) -> Result<Self> {
        let pattern = match &style.pattern {
            Some(pattern) if pattern.is_empty() => {
                return Err(Error::InvalidStyle("pattern is empty".to_string()));
            }
            Some(pattern) => pattern.clone(),
            None => preset_pattern(style.time, style.date, locale)?,
        };

        let items = parse_items(&pattern, locale.locale())?;

        Ok(Self {
            style: style.clone(),
            locale: locale.locale(),
            pattern,
            items: OnceCell::from(items),
        })
    }

    /// Render `ts`. Pure: equal inputs always give equal output.
    pub fn format(&self, ts: &Timestamp) -> String {
        let items = self.items.get_or_init(|| {
            // Validated in `new`, so a re-parse cannot fail.
            parse_items(&self.pattern, self.locale).unwrap_or_default()
        });
        ts.as_datetime()
            .format_localized_with_items(items.iter(), self.locale)
            .to_string()
    }

    /// Drop the parsed pattern. The next `format` call re-parses it.
    pub fn release_cache(&mut self) {
        self.items.take();
    }

    pub fn is_cached(&self) -> bool {
        self.items.get().is_some()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn parse_items(pattern: &str, locale: Locale) -> Result<Vec<Item<'static>>> {
    let items: Vec<Item<'static>> = StrftimeItems::new_with_locale(pattern, locale)
        .map(|item| item.to_owned())
        .collect();

    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidPattern(pattern.to_string()));
    }
    Ok(items)
}

fn preset_pattern(time: FormatStyle, date: FormatStyle, locale: &LocaleProfile) -> Result<String> {
    let time_part = time_pattern(time, locale.hour_cycle);
    let date_part = date_pattern(date, locale.date_order);

    match (date_part, time_part) {
        (None, None) => Err(Error::InvalidStyle(
            "both time and date styles are 'none'".to_string(),
        )),
        (None, Some(t)) => Ok(t.to_string()),
        (Some(d), None) => Ok(d.to_string()),
        (Some(d), Some(t)) => {
            let english = locale.name().starts_with("en_");
            let joiner = match date {
                FormatStyle::Long | FormatStyle::Full if english => " at ",
                _ => ", ",
            };
            Ok(format!("{}{}{}", d, joiner, t))
        }
    }
}

fn time_pattern(style: FormatStyle, cycle: HourCycle) -> Option<&'static str> {
    let pattern = match (style, cycle) {
        (FormatStyle::None, _) => return None,
        (FormatStyle::Short, HourCycle::H12) => "%-I:%M %p",
        (FormatStyle::Short, HourCycle::H23) => "%H:%M",
        (FormatStyle::Medium, HourCycle::H12) => "%-I:%M:%S %p",
        (FormatStyle::Medium, HourCycle::H23) => "%H:%M:%S",
        (FormatStyle::Long, HourCycle::H12) => "%-I:%M:%S %p %:z",
        (FormatStyle::Long, HourCycle::H23) => "%H:%M:%S %:z",
        (FormatStyle::Full, HourCycle::H12) => "%-I:%M:%S %p UTC%:z",
        (FormatStyle::Full, HourCycle::H23) => "%H:%M:%S UTC%:z",
    };
    Some(pattern)
}

fn date_pattern(style: FormatStyle, order: DateOrder) -> Option<&'static str> {
    let pattern = match (style, order) {
        (FormatStyle::None, _) => return None,
        (FormatStyle::Short, DateOrder::MonthFirst) => "%-m/%-d/%y",
        (FormatStyle::Short, DateOrder::DayFirst) => "%d/%m/%y",
        (FormatStyle::Short, DateOrder::YearFirst) => "%y/%m/%d",
        (FormatStyle::Medium, DateOrder::MonthFirst) => "%b %-d, %Y",
        (FormatStyle::Medium, DateOrder::DayFirst) => "%-d %b %Y",
        (FormatStyle::Medium, DateOrder::YearFirst) => "%Y %b %-d",
        (FormatStyle::Long, DateOrder::MonthFirst) => "%B %-d, %Y",
        (FormatStyle::Long, DateOrder::DayFirst) => "%-d %B %Y",
        (FormatStyle::Long, DateOrder::YearFirst) => "%Y %B %-d",
        (FormatStyle::Full, DateOrder::MonthFirst) => "%A, %B %-d, %Y",
        (FormatStyle::Full, DateOrder::DayFirst) => "%A %-d %B %Y",
        (FormatStyle::Full, DateOrder::YearFirst) => "%Y %B %-d %A",
    };
    Some(pattern)
}

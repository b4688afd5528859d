// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Template filters available to every course template.
//!
//! ```text
//! {{ date | date }}             March 3rd
//! {{ date | shortDate }}        Mar 3
//! {{ link | maybeLink }}        <a href="url">text</a>, or the bare string
//! {{ lecture | lectureSlug }}   lecture-intro-to-systems
//! {{ hw | assignmentSlug }}     assignment-hw1
//! ```

use crate::links::Link;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;
use tera::{Error, Filter, Result, Tera, Value};

/// Install the course filters on a fresh engine. `date` replaces Tera's
/// built-in filter of the same name.
pub fn register_helpers(tera: &mut Tera) {
    tera.register_filter("date", long_date);
    tera.register_filter("shortDate", short_date);
    tera.register_filter("maybeLink", MaybeLink);
    tera.register_filter("lectureSlug", lecture_slug);
    tera.register_filter("assignmentSlug", assignment_slug);
}

/// Read a template value as a UTC calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (any offset, converted to UTC),
/// naive timestamps (taken as UTC) and integers as epoch milliseconds.
#[must_use]
pub fn calendar_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date_text(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|instant| instant.date_naive()),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.date())
}

fn require_date(filter: &str, value: &Value) -> Result<NaiveDate> {
    calendar_date(value)
        .ok_or_else(|| Error::msg(format!("{filter}: cannot read {value} as a calendar date")))
}

/// "March 3rd"
#[must_use]
pub fn format_long(date: NaiveDate) -> String {
    let day = date.format("%-d").to_string();
    format!("{} {day}{}", date.format("%B"), ordinal_suffix(&day))
}

/// "Mar 3"
#[must_use]
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn ordinal_suffix(day: &str) -> &'static str {
    let teens = day.len() == 2 && day.starts_with('1');
    match day.chars().last() {
        Some('1') if !teens => "st",
        Some('2') if !teens => "nd",
        Some('3') if !teens => "rd",
        _ => "th",
    }
}

fn long_date(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(format_long(require_date("date", value)?)))
}

fn short_date(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(format_short(require_date("shortDate", value)?)))
}

/// Renders a link entry. Its output is never escaped.
struct MaybeLink;

impl Filter for MaybeLink {
    fn filter(&self, value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
        let link = Link::try_from(value).map_err(|e| Error::msg(e.to_string()))?;
        Ok(Value::String(link.to_markup()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

fn lecture_slug(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    prefixed_slug("lecture-", "Title", value)
}

fn assignment_slug(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
    prefixed_slug("assignment-", "Label", value)
}

fn prefixed_slug(prefix: &str, field: &str, value: &Value) -> Result<Value> {
    let text = value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::msg(format!("expected a record with a string {field}, got {value}")))?;
    Ok(Value::String(format!("{prefix}{}", slugify(text))))
}

/// Quotes are dropped rather than turned into separators, so
/// "Don't Panic" becomes `dont-panic`.
fn slugify(text: &str) -> String {
    let unquoted: String = text
        .chars()
        .filter(|c| !matches!(*c, '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}'))
        .collect();
    slug::slugify(unquoted)
}

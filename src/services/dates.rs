use chrono::{Duration, NaiveDate};

use super::rules;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `DD-MM-YYYY`
    DayFirst,
}

impl DateFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "DD-MM-YYYY" | "DAY_FIRST" => DateFormat::DayFirst,
            _ => DateFormat::Iso,
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DayFirst => "%d-%m-%Y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateFormat::Iso => "YYYY-MM-DD",
            DateFormat::DayFirst => "DD-MM-YYYY",
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    /// Reads a date written in this format, or in ISO form which models fall
    /// back to, and re-emits it in this format. Anything else is not a date.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, self.pattern())
            .or_else(|_| NaiveDate::parse_from_str(raw, DateFormat::Iso.pattern()))
            .ok()
            .map(|date| self.format(date))
    }
}

/// Absolute date for "hoy"/"ayer" in `text`, relative to `today`.
pub fn resolve_relative_date(text: &str, today: NaiveDate, format: DateFormat) -> Option<String> {
    let day = rules::relative_day(text)?;
    let date = today - Duration::days(day.days_back());
    Some(format.format(date))
}

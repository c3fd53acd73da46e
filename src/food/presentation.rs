//! Display attributes derived from workflow output. Everything here is pure.

use colored::{ColoredString, Colorize};

use super::models::{trim_float, Level, LevelValue};

/// Severity colour of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Positive,
    Caution,
    Negative,
    Neutral,
}

impl ColorClass {
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            ColorClass::Positive => text.green().bold(),
            ColorClass::Caution => text.yellow().bold(),
            ColorClass::Negative => text.red().bold(),
            ColorClass::Neutral => text.dimmed(),
        }
    }
}

impl From<Level> for ColorClass {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => ColorClass::Positive,
            Level::Moderate => ColorClass::Caution,
            Level::High => ColorClass::Negative,
            Level::Unknown => ColorClass::Neutral,
        }
    }
}

/// Shared by health risk, processing level, nutritional density and predicted
/// disease: "high processing" reads as severe as "high risk".
pub fn risk_color_class(level: Option<&str>) -> ColorClass {
    match level {
        Some(raw) => Level::parse(raw).into(),
        None => ColorClass::Neutral,
    }
}

/// Coloured badge text for a rating.
pub fn badge(value: &LevelValue) -> ColoredString {
    risk_color_class(value.raw()).paint(&value.to_string())
}

/// `0.873` -> `"87.3%"`
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// `Some(64.0)` -> `"64/100"`, `None` -> `"N/A"`
pub fn format_health_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{}/100", trim_float(score)),
        None => "N/A".to_string(),
    }
}

pub fn format_calories(calories: Option<f64>) -> String {
    match calories {
        Some(calories) => format!("{} cal/100g", trim_float(calories)),
        None => "? cal/100g".to_string(),
    }
}

/// `"saturated_fat"` -> `"Saturated Fat"`
pub fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

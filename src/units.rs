// Temperature conversion and the text forms used on the sheet and in the summary

use clap::ValueEnum;

/// Placeholder printed for any reading that was left empty or did not parse
pub const NOT_AVAILABLE: &str = "N/A";

pub fn fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Unit the form's temperature fields are typed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// Which unit(s) a submitted temperature is printed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemperatureDisplay {
    Fahrenheit,
    Celsius,
    Both,
}

/// A temperature held in both units. Built once, when the form is submitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl Reading {
    pub fn from_input(value: f64, unit: TemperatureUnit) -> Reading {
        match unit {
            TemperatureUnit::Celsius => Reading {
                celsius: value,
                fahrenheit: fahrenheit(value),
            },
            TemperatureUnit::Fahrenheit => Reading {
                celsius: celsius(value),
                fahrenheit: value,
            },
        }
    }

    pub fn format(&self, display: TemperatureDisplay) -> String {
        let f = format!("{}{}", format_number(self.fahrenheit), TemperatureUnit::Fahrenheit.suffix());
        let c = format!("{}{}", format_number(self.celsius), TemperatureUnit::Celsius.suffix());
        match display {
            TemperatureDisplay::Fahrenheit => f,
            TemperatureDisplay::Celsius => c,
            TemperatureDisplay::Both => format!("{} / {}", f, c),
        }
    }
}

/// Parse a raw numeric form field. Empty, malformed and non-finite text all
/// come back as `None`.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format with at most two decimals and no trailing zeros ("68", "20.5", "21.11")
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn format_temperature(reading: Option<Reading>, display: TemperatureDisplay) -> String {
    match reading {
        Some(r) => r.format(display),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_precipitation(chance: Option<f64>) -> String {
    match chance {
        Some(p) => format!("{}%", format_number(p)),
        None => NOT_AVAILABLE.to_string(),
    }
}

// Form records, the submitted snapshot, and the enumerated weather icons

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::units::{format_precipitation, format_temperature, Reading, TemperatureDisplay};

// ============================================================================
// Icons
// ============================================================================

/// Weather condition shown in a day's box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconKey {
    Sunny,
    Cloudy,
    Rain,
    Thunderstorm,
    Snow,
    Fog,
    PartlyCloudy,
}

impl IconKey {
    pub const ALL: [IconKey; 7] = [
        IconKey::Sunny,
        IconKey::Cloudy,
        IconKey::Rain,
        IconKey::Thunderstorm,
        IconKey::Snow,
        IconKey::Fog,
        IconKey::PartlyCloudy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IconKey::Sunny => "sunny",
            IconKey::Cloudy => "cloudy",
            IconKey::Rain => "rain",
            IconKey::Thunderstorm => "thunderstorm",
            IconKey::Snow => "snow",
            IconKey::Fog => "fog",
            IconKey::PartlyCloudy => "partly_cloudy",
        }
    }

    /// Human label, as offered in the icon picker
    pub fn label(self) -> &'static str {
        match self {
            IconKey::Sunny => "Sunny",
            IconKey::Cloudy => "Cloudy",
            IconKey::Rain => "Rain",
            IconKey::Thunderstorm => "Thunderstorm",
            IconKey::Snow => "Snow",
            IconKey::Fog => "Fog",
            IconKey::PartlyCloudy => "Partly Cloudy",
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconKey {
    type Err = AppError;

    /// Accepts `partly_cloudy`, `partly-cloudy` and `partlyCloudy` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "sunny" => Ok(IconKey::Sunny),
            "cloudy" => Ok(IconKey::Cloudy),
            "rain" => Ok(IconKey::Rain),
            "thunderstorm" => Ok(IconKey::Thunderstorm),
            "snow" => Ok(IconKey::Snow),
            "fog" => Ok(IconKey::Fog),
            "partlycloudy" => Ok(IconKey::PartlyCloudy),
            _ => Err(AppError::UnknownIcon(s.to_string())),
        }
    }
}

// ============================================================================
// Live form records
// ============================================================================

/// Editable field of a day entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Day,
    Temperature,
    Icon,
    Precipitation,
}

impl FromStr for Field {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Field::Day),
            "temperature" | "temp" => Ok(Field::Temperature),
            "icon" => Ok(Field::Icon),
            "precipitation" | "precipitation_chance" | "precipitationChance" | "precip" => {
                Ok(Field::Precipitation)
            }
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }
}

/// One day as typed into the form. Numbers stay raw text until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub day: String,
    pub temperature: String,
    pub icon: IconKey,
    pub precipitation_chance: String,
}

impl DayRecord {
    pub fn blank(day: impl Into<String>, icon: IconKey) -> DayRecord {
        DayRecord {
            day: day.into(),
            temperature: String::new(),
            icon,
            precipitation_chance: String::new(),
        }
    }
}

/// Fixed-length, ordered set of day entries. Order is layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSet {
    days: Vec<DayRecord>,
}

impl ForecastSet {
    pub fn new(days: Vec<DayRecord>) -> ForecastSet {
        ForecastSet { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DayRecord> {
        self.days.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.iter()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Result<&mut DayRecord, AppError> {
        let len = self.days.len();
        self.days
            .get_mut(index)
            .ok_or(AppError::IndexOutOfRange { index, len })
    }
}

// ============================================================================
// Submitted snapshot
// ============================================================================

/// A day after submission: numbers parsed, temperature converted
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedDay {
    pub day: String,
    pub temperature: Option<Reading>,
    pub icon: IconKey,
    pub precipitation_chance: Option<f64>,
}

impl SubmittedDay {
    /// The three text lines printed under the icon
    pub fn lines(&self, display: TemperatureDisplay) -> [String; 3] {
        [
            self.day.clone(),
            format!("Temp: {}", format_temperature(self.temperature, display)),
            format!("Precip: {}", format_precipitation(self.precipitation_chance)),
        ]
    }
}

/// Immutable copy of the form taken at submission time
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    days: Vec<SubmittedDay>,
}

impl Snapshot {
    pub fn new(days: Vec<SubmittedDay>) -> Snapshot {
        Snapshot { days }
    }

    pub fn days(&self) -> &[SubmittedDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubmittedDay> {
        self.days.iter()
    }
}

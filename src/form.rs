// Form state: field edits, form files, and the submit/convert step

use std::path::Path;

use chrono::Weekday;
use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::model::{DayRecord, Field, ForecastSet, IconKey, Snapshot, SubmittedDay};
use crate::units::{parse_measurement, Reading, TemperatureDisplay, TemperatureUnit};

// ============================================================================
// Templates
// ============================================================================

/// Preset day list and units for a new form
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Template {
    /// Seven days, typed in Celsius, printed in Fahrenheit
    Week,
    /// Tuesday to race-day Saturday, typed in Fahrenheit, printed in both units
    RaceWeekend,
}

impl Template {
    pub fn input_unit(self) -> TemperatureUnit {
        match self {
            Template::Week => TemperatureUnit::Celsius,
            Template::RaceWeekend => TemperatureUnit::Fahrenheit,
        }
    }

    pub fn display(self) -> TemperatureDisplay {
        match self {
            Template::Week => TemperatureDisplay::Fahrenheit,
            Template::RaceWeekend => TemperatureDisplay::Both,
        }
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ============================================================================
// Form file
// ============================================================================

/// Field value as it may appear in a JSON form: `"21.5"` or `21.5`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Number(f64),
}

impl FormValue {
    fn into_text(self) -> String {
        match self {
            FormValue::Text(s) => s,
            FormValue::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FormEntry {
    pub day: Option<String>,
    #[serde(alias = "temp")]
    pub temperature: Option<FormValue>,
    pub icon: Option<String>,
    #[serde(alias = "precipitationChance", alias = "precipitation_chance")]
    pub precipitation: Option<FormValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormFile {
    pub title: Option<String>,
    #[serde(default)]
    pub days: Vec<FormEntry>,
}

pub fn load_form_file(path: &Path) -> Result<FormFile, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Form(format!("{}: {}", path.display(), e)))?;
    let form: FormFile = serde_json::from_str(&content)?;
    Ok(form)
}

// ============================================================================
// Form state
// ============================================================================

/// The single editable form of a session
#[derive(Debug, Clone)]
pub struct FormState {
    entries: ForecastSet,
    title: Option<String>,
    input_unit: TemperatureUnit,
}

impl FormState {
    pub fn new(entries: ForecastSet, input_unit: TemperatureUnit) -> FormState {
        FormState {
            entries,
            title: None,
            input_unit,
        }
    }

    /// Blank form for a template. `start` only applies to the week template.
    pub fn from_template(template: Template, start: Weekday) -> FormState {
        let days: Vec<DayRecord> = match template {
            Template::Week => {
                let mut day = start;
                IconKey::ALL
                    .iter()
                    .map(|icon| {
                        let record = DayRecord::blank(weekday_name(day), *icon);
                        day = day.succ();
                        record
                    })
                    .collect()
            }
            Template::RaceWeekend => {
                let weekdays = [Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
                let mut days: Vec<DayRecord> = weekdays
                    .into_iter()
                    .map(|d| DayRecord::blank(weekday_name(d), IconKey::Sunny))
                    .collect();
                days.push(DayRecord::blank("Saturday (Race Day)", IconKey::Sunny));
                days
            }
        };
        FormState::new(ForecastSet::new(days), template.input_unit())
    }

    pub fn entries(&self) -> &ForecastSet {
        &self.entries
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn input_unit(&self) -> TemperatureUnit {
        self.input_unit
    }

    pub fn set_input_unit(&mut self, unit: TemperatureUnit) {
        self.input_unit = unit;
    }

    /// Blank titles count as no title
    pub fn set_title(&mut self, title: &str) {
        let trimmed = title.trim();
        self.title = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Replace one field of one entry. On error the form is left untouched.
    pub fn set_field(&mut self, index: usize, field: Field, value: &str) -> Result<(), AppError> {
        let entry = self.entries.get_mut(index)?;
        match field {
            Field::Day => entry.day = value.to_string(),
            Field::Temperature => entry.temperature = value.to_string(),
            Field::Icon => entry.icon = value.parse::<IconKey>()?,
            Field::Precipitation => entry.precipitation_chance = value.to_string(),
        }
        debug!(index, ?field, value, "form field updated");
        Ok(())
    }

    pub fn set_field_named(&mut self, index: usize, field: &str, value: &str) -> Result<(), AppError> {
        let field = field.parse::<Field>()?;
        self.set_field(index, field, value)
    }

    /// Apply an edit written as `INDEX.FIELD=VALUE`, e.g. `2.temperature=18.5`
    pub fn apply_edit(&mut self, edit: &str) -> Result<(), AppError> {
        let invalid = || AppError::InvalidEdit(edit.to_string());
        let (target, value) = edit.split_once('=').ok_or_else(invalid)?;
        let (index, field) = target.split_once('.').ok_or_else(invalid)?;
        let index: usize = index.trim().parse().map_err(|_| invalid())?;
        self.set_field_named(index, field, value)
    }

    /// Apply every field present in a form file, in entry order
    pub fn apply_form(&mut self, form: FormFile) -> Result<(), AppError> {
        if form.days.len() > self.entries.len() {
            return Err(AppError::Form(format!(
                "{} days given but the form holds {}",
                form.days.len(),
                self.entries.len()
            )));
        }
        if let Some(title) = form.title {
            self.set_title(&title);
        }
        for (index, entry) in form.days.into_iter().enumerate() {
            if let Some(day) = entry.day {
                self.set_field(index, Field::Day, &day)?;
            }
            if let Some(temp) = entry.temperature {
                self.set_field(index, Field::Temperature, &temp.into_text())?;
            }
            if let Some(icon) = entry.icon {
                self.set_field(index, Field::Icon, &icon)?;
            }
            if let Some(precip) = entry.precipitation {
                self.set_field(index, Field::Precipitation, &precip.into_text())?;
            }
        }
        Ok(())
    }

    /// Freeze the current entries into a converted snapshot
    pub fn submit(&self) -> Snapshot {
        convert(&self.entries, self.input_unit)
    }
}

/// Parse and unit-convert every entry. Pure: the form is only read.
pub fn convert(entries: &ForecastSet, input_unit: TemperatureUnit) -> Snapshot {
    let days = entries
        .iter()
        .map(|record| SubmittedDay {
            day: record.day.clone(),
            temperature: parse_measurement(&record.temperature)
                .map(|value| Reading::from_input(value, input_unit)),
            icon: record.icon,
            precipitation_chance: parse_measurement(&record.precipitation_chance),
        })
        .collect();
    Snapshot::new(days)
}

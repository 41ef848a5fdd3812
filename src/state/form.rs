//! Birth-detail form: a draft of raw field values plus submit-time normalization

use chrono::{Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};

use super::FormStore;
use crate::models::locations::{self, District};
use crate::models::{BirthDetails, Gender};

pub const MIN_YEAR: i64 = 1900;
const DEFAULT_COUNTRY: &str = "India";

/// Field values as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub gender: String,
    pub state: String,
    pub district: String,
    pub city: String,
    pub country: String,
}

impl Default for FormDraft {
    /// Seeded with the current local date and time
    fn default() -> Self {
        let now = Local::now();
        Self {
            name: String::new(),
            year: now.year().to_string(),
            month: now.month().to_string(),
            day: now.day().to_string(),
            hour: now.hour().to_string(),
            minute: now.minute().to_string(),
            gender: String::new(),
            state: String::new(),
            district: String::new(),
            city: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Gender,
    State,
    District,
    City,
    Country,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Year => "year",
            FormField::Month => "month",
            FormField::Day => "day",
            FormField::Hour => "hour",
            FormField::Minute => "minute",
            FormField::Gender => "gender",
            FormField::State => "state",
            FormField::District => "district",
            FormField::City => "city",
            FormField::Country => "country",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("gender must be M or F, got {0:?}")]
    InvalidGender(String),
    #[error("{year}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("unknown state {0:?}")]
    UnknownState(String),
    #[error("unknown district {district:?} for state {state:?}")]
    UnknownDistrict { state: String, district: String },
    #[error("select a state before choosing a district")]
    NoStateSelected,
}

/// The birth form of the kundali page.
///
/// Every change is written through to the [`FormStore`] so the draft survives
/// navigating away and back. Submitting never touches the network.
pub struct BirthForm {
    draft: FormDraft,
    store: FormStore,
}

impl BirthForm {
    pub fn open(store: FormStore) -> Self {
        Self {
            draft: store.get(),
            store,
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Set a field. State and district go through their selection rules.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        self.stage(field, value)?;
        self.persist();
        Ok(())
    }

    /// Set several fields in order. Either all of them are kept or, on the
    /// first failure, none are.
    pub fn apply<'a, I>(&mut self, changes: I) -> Result<(), (FormField, FormError)>
    where
        I: IntoIterator<Item = (FormField, &'a str)>,
    {
        let before = self.draft.clone();
        for (field, value) in changes {
            if let Err(e) = self.stage(field, value) {
                self.draft = before;
                return Err((field, e));
            }
        }
        self.persist();
        Ok(())
    }

    /// Choose a state; clears any district and returns the state's districts
    pub fn select_state(&mut self, value: &str) -> Result<&'static [District], FormError> {
        let districts = self.stage_state(value)?;
        self.persist();
        Ok(districts)
    }

    pub fn select_district(&mut self, value: &str) -> Result<(), FormError> {
        self.stage_district(value)?;
        self.persist();
        Ok(())
    }

    /// Change the draft without writing it to the store
    fn stage(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        match field {
            FormField::State => return self.stage_state(value).map(|_| ()),
            FormField::District => return self.stage_district(value),
            FormField::Name => self.draft.name = value.to_string(),
            FormField::Year => self.draft.year = value.to_string(),
            FormField::Month => self.draft.month = value.to_string(),
            FormField::Day => self.draft.day = value.to_string(),
            FormField::Hour => self.draft.hour = value.to_string(),
            FormField::Minute => self.draft.minute = value.to_string(),
            FormField::Gender => self.draft.gender = value.to_string(),
            FormField::City => self.draft.city = value.to_string(),
            FormField::Country => self.draft.country = value.to_string(),
        }
        Ok(())
    }

    fn stage_state(&mut self, value: &str) -> Result<&'static [District], FormError> {
        if value.is_empty() {
            self.draft.state.clear();
            self.draft.district.clear();
            return Ok(&[]);
        }
        let state =
            locations::find_state(value).ok_or_else(|| FormError::UnknownState(value.to_string()))?;
        self.draft.state = state.value.to_string();
        self.draft.district.clear();
        Ok(state.districts)
    }

    fn stage_district(&mut self, value: &str) -> Result<(), FormError> {
        if value.is_empty() {
            self.draft.district.clear();
            return Ok(());
        }
        let state = locations::find_state(&self.draft.state).ok_or(FormError::NoStateSelected)?;
        let district = state
            .find_district(value)
            .ok_or_else(|| FormError::UnknownDistrict {
                state: state.value.to_string(),
                district: value.to_string(),
            })?;
        self.draft.district = district.value.to_string();
        Ok(())
    }

    /// Districts offered for the currently selected state
    pub fn districts(&self) -> &'static [District] {
        locations::find_state(&self.draft.state)
            .map(|s| s.districts)
            .unwrap_or(&[])
    }

    /// Validate and normalize the draft into birth details
    pub fn submit(&self) -> Result<BirthDetails, FormError> {
        let d = &self.draft;

        if d.name.trim().is_empty() {
            return Err(FormError::Missing("name"));
        }

        let max_year = i64::from(Local::now().year());
        let year = parse_ranged(FormField::Year, &d.year, MIN_YEAR, max_year)? as i32;
        let month = parse_ranged(FormField::Month, &d.month, 1, 12)? as u32;
        let day = parse_ranged(FormField::Day, &d.day, 1, 31)? as u32;
        let hour = parse_ranged(FormField::Hour, &d.hour, 0, 23)? as u32;
        let minute = parse_ranged(FormField::Minute, &d.minute, 0, 59)? as u32;

        if d.gender.trim().is_empty() {
            return Err(FormError::Missing("gender"));
        }
        let gender =
            Gender::from_code(&d.gender).ok_or_else(|| FormError::InvalidGender(d.gender.clone()))?;

        let (city, country) = self.location()?;

        let details = BirthDetails {
            year,
            month,
            day,
            hour,
            minute,
            city,
            country,
            gender,
        };

        if details.nominal_datetime().is_none() {
            return Err(FormError::InvalidDate { year, month, day });
        }

        Ok(details)
    }

    /// City and country: a selected district wins over the free-text city
    fn location(&self) -> Result<(String, String), FormError> {
        let d = &self.draft;

        if !d.state.is_empty() {
            let state = locations::find_state(&d.state)
                .ok_or_else(|| FormError::UnknownState(d.state.clone()))?;
            if d.district.is_empty() {
                return Err(FormError::Missing("district"));
            }
            let district = state
                .find_district(&d.district)
                .ok_or_else(|| FormError::UnknownDistrict {
                    state: state.value.to_string(),
                    district: d.district.clone(),
                })?;
            return Ok((district.label.to_string(), DEFAULT_COUNTRY.to_string()));
        }

        let city = d.city.trim();
        if city.is_empty() {
            return Err(FormError::Missing("city"));
        }
        let country = match d.country.trim() {
            "" => DEFAULT_COUNTRY,
            c => c,
        };
        Ok((city.to_string(), country.to_string()))
    }

    fn persist(&self) {
        self.store.set(self.draft.clone());
    }
}

fn parse_ranged(field: FormField, raw: &str, min: i64, max: i64) -> Result<i64, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::Missing(field.label()));
    }
    let value: i64 = raw.parse().map_err(|_| FormError::NotANumber {
        field: field.label(),
        value: raw.to_string(),
    })?;
    if value < min || value > max {
        return Err(FormError::OutOfRange {
            field: field.label(),
            value,
            min,
            max,
        });
    }
    Ok(value)
}

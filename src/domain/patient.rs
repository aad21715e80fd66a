//! Patient domain model.
//!
//! A [`Patient`] is one record of the roster as stored and displayed. Dates of
//! birth are kept the way the forms write them: a locale date string in
//! `M/D/YYYY` shape rather than an ISO date, so every consumer that needs a
//! real date goes through [`parse_locale_date`].

use super::error::{Result, RosterError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format used when writing a date of birth back into a record.
pub const LOCALE_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Format of the long date shown on the detail page (`Tue Apr 02 1985`).
const LONG_DATE_FORMAT: &str = "%a %b %d %Y";

/// Opaque unique identifier of a patient record.
///
/// The stores mint UUID v4 strings, but any string coming back from a store is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatientId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Lifecycle status of a patient.
///
/// Serialized with the exact variant names (`"Inquiry"`, `"Onboarding"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PatientStatus {
    #[default]
    Inquiry,
    Onboarding,
    Active,
    Churned,
}

impl PatientStatus {
    /// Every status in the order the form offers them.
    pub const ALL: [Self; 4] = [Self::Inquiry, Self::Onboarding, Self::Active, Self::Churned];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inquiry => "Inquiry",
            Self::Onboarding => "Onboarding",
            Self::Active => "Active",
            Self::Churned => "Churned",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = RosterError;

    /// Parses a status name case-insensitively.
    ///
    /// ```
    /// use patient_roster::domain::PatientStatus;
    ///
    /// assert_eq!("active".parse::<PatientStatus>().unwrap(), PatientStatus::Active);
    /// assert!("archived".parse::<PatientStatus>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RosterError::Validation {
                field: "status",
                message: format!(
                    "Unknown status '{wanted}' (expected one of Inquiry, Onboarding, Active, Churned)"
                ),
            })
    }
}

/// Parses a stored date of birth.
///
/// Accepts the locale shape `M/D/YYYY` (with or without zero padding) and
/// falls back to ISO `YYYY-MM-DD`. Returns `None` for anything else.
///
/// ```
/// use chrono::NaiveDate;
/// use patient_roster::domain::parse_locale_date;
///
/// assert_eq!(parse_locale_date("4/2/1985"), NaiveDate::from_ymd_opt(1985, 4, 2));
/// assert_eq!(parse_locale_date("1985-04-02"), NaiveDate::from_ymd_opt(1985, 4, 2));
/// assert_eq!(parse_locale_date("yesterday"), None);
/// ```
#[must_use]
pub fn parse_locale_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

/// One patient record as stored and displayed.
///
/// # Fields
///
/// - `id`: store-assigned identifier, unique within a loaded set
/// - `date_of_birth`: locale date string, see [`parse_locale_date`]
/// - `status`: defaults to [`PatientStatus::Inquiry`] when a store omits it
/// - `created_at`: Unix timestamp assigned by the store on insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub address: String,
    #[serde(default)]
    pub status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

impl Patient {
    /// Builds a record from a mutation payload, applying the status default.
    #[must_use]
    pub fn from_fields(id: PatientId, fields: PatientFields, created_at: i64) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            middle_name: fields.middle_name,
            last_name: fields.last_name,
            date_of_birth: fields.date_of_birth,
            address: fields.address,
            status: fields.status.unwrap_or_default(),
            notes: fields.notes,
            created_at,
        }
    }

    /// Returns the editable fields of this record.
    #[must_use]
    pub fn fields(&self) -> PatientFields {
        PatientFields {
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            address: self.address.clone(),
            status: Some(self.status),
            notes: self.notes.clone(),
        }
    }

    /// First, middle (when present) and last name joined by spaces.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    #[must_use]
    pub fn birth_date(&self) -> Option<NaiveDate> {
        parse_locale_date(&self.date_of_birth)
    }

    /// Age in whole years on `today`, `None` when the stored date does not parse
    /// or lies after `today`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use patient_roster::domain::{Patient, PatientFields, PatientId};
    ///
    /// let fields = PatientFields { date_of_birth: "6/15/1990".into(), ..Default::default() };
    /// let patient = Patient::from_fields(PatientId::new("p"), fields, 0);
    /// let today = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
    /// assert_eq!(patient.age_on(today), Some(29));
    /// ```
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.birth_date()?;
        if born > today {
            return None;
        }
        let had_birthday = (today.month(), today.day()) >= (born.month(), born.day());
        let years = today.year() - born.year() - i32::from(!had_birthday);
        u32::try_from(years).ok()
    }

    /// Date of birth in the long form used by the detail page.
    ///
    /// Falls back to the raw stored text when it does not parse.
    #[must_use]
    pub fn birth_date_long(&self) -> String {
        self.birth_date().map_or_else(
            || self.date_of_birth.clone(),
            |date| date.format(LONG_DATE_FORMAT).to_string(),
        )
    }
}

/// Payload of the store's `insert` and `update` procedures.
///
/// Every record field except the store-owned `id` and `created_at`. A missing
/// `status` means [`PatientStatus::Inquiry`] on insert and "keep the stored
/// status" on update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFields {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

//! Create and edit form for patient records.
//!
//! [`PatientForm`] holds the raw text the user typed, field by field, and
//! turns it into [`PatientFields`] on submit. Validation covers the required
//! fields and the date of birth range; everything else is accepted as typed.

use crate::domain::error::{Result, RosterError};
use crate::domain::{parse_locale_date, Patient, PatientFields, PatientId, PatientStatus, LOCALE_DATE_FORMAT};
use crate::table::ColumnKey;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Earliest accepted date of birth.
const MIN_BIRTH_DATE: (i32, u32, u32) = (1900, 1, 1);

/// What submitting the form does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Inserts a new record and returns to the list.
    Create,
    /// Replaces record `id`; returns to its detail page when opened from there.
    Edit { id: PatientId, from_detail: bool },
}

/// Editable state of the patient form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientForm {
    pub mode: FormMode,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// Date of birth as typed, `M/D/YYYY` or `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub address: String,
    pub status: PatientStatus,
    pub notes: String,
    /// Validation messages of the last submit, by field.
    pub errors: BTreeMap<ColumnKey, String>,
}

impl PatientForm {
    /// Empty form for a new patient. The date of birth starts at `today`.
    #[must_use]
    pub fn create(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Create,
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            date_of_birth: today.format(LOCALE_DATE_FORMAT).to_string(),
            address: String::new(),
            status: PatientStatus::default(),
            notes: String::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Form pre-filled with every field of `patient`.
    #[must_use]
    pub fn edit(patient: &Patient, from_detail: bool) -> Self {
        let date_of_birth = patient.birth_date().map_or_else(
            || patient.date_of_birth.clone(),
            |date| date.format(LOCALE_DATE_FORMAT).to_string(),
        );

        Self {
            mode: FormMode::Edit {
                id: patient.id.clone(),
                from_detail,
            },
            first_name: patient.first_name.clone(),
            middle_name: patient.middle_name.clone().unwrap_or_default(),
            last_name: patient.last_name.clone(),
            date_of_birth,
            address: patient.address.clone(),
            status: patient.status,
            notes: patient.notes.clone().unwrap_or_default(),
            errors: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Patient",
            FormMode::Edit { .. } => "Edit Patient",
        }
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Patient",
            FormMode::Edit { .. } => "Save",
        }
    }

    /// Current text of a field.
    #[must_use]
    pub fn value(&self, field: ColumnKey) -> &str {
        match field {
            ColumnKey::FirstName => &self.first_name,
            ColumnKey::MiddleName => &self.middle_name,
            ColumnKey::LastName => &self.last_name,
            ColumnKey::DateOfBirth => &self.date_of_birth,
            ColumnKey::Address => &self.address,
            ColumnKey::Status => self.status.as_str(),
            ColumnKey::Notes => &self.notes,
        }
    }

    #[must_use]
    pub const fn is_required(field: ColumnKey) -> bool {
        !matches!(field, ColumnKey::MiddleName | ColumnKey::Notes)
    }

    /// Replaces the text of one field and clears its error.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] when `field` is the status and
    /// `value` names no status. The form is left unchanged in that case.
    pub fn set_field(&mut self, field: ColumnKey, value: &str) -> Result<()> {
        match field {
            ColumnKey::FirstName => self.first_name = value.to_string(),
            ColumnKey::MiddleName => self.middle_name = value.to_string(),
            ColumnKey::LastName => self.last_name = value.to_string(),
            ColumnKey::DateOfBirth => self.date_of_birth = value.to_string(),
            ColumnKey::Address => self.address = value.to_string(),
            ColumnKey::Status => self.status = value.parse()?,
            ColumnKey::Notes => self.notes = value.to_string(),
        }
        self.errors.remove(&field);
        Ok(())
    }

    /// Validates the form and converts it into a store payload.
    ///
    /// Every failing field gets a message in [`errors`](Self::errors).
    ///
    /// # Errors
    ///
    /// Returns the first [`RosterError::Validation`] in field order when any
    /// field is invalid.
    pub fn submit(&mut self, today: NaiveDate) -> Result<PatientFields> {
        self.errors.clear();

        let required = [
            (ColumnKey::FirstName, &self.first_name, "First name is required"),
            (ColumnKey::LastName, &self.last_name, "Last name is required"),
            (ColumnKey::DateOfBirth, &self.date_of_birth, "Date of birth is required"),
            (ColumnKey::Address, &self.address, "Address is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                self.errors.insert(field, message.to_string());
            }
        }

        let birth_date = if self.errors.contains_key(&ColumnKey::DateOfBirth) {
            None
        } else {
            match check_birth_date(&self.date_of_birth, today) {
                Ok(date) => Some(date),
                Err(message) => {
                    self.errors.insert(ColumnKey::DateOfBirth, message);
                    None
                }
            }
        };

        if let Some((field, message)) = self.errors.iter().next() {
            tracing::debug!(errors = self.errors.len(), "form rejected");
            return Err(RosterError::Validation {
                field: field.key(),
                message: message.clone(),
            });
        }

        let Some(birth_date) = birth_date else {
            return Err(RosterError::Validation {
                field: ColumnKey::DateOfBirth.key(),
                message: "Date of birth is required".to_string(),
            });
        };

        Ok(PatientFields {
            first_name: self.first_name.trim().to_string(),
            middle_name: non_empty(&self.middle_name),
            last_name: self.last_name.trim().to_string(),
            date_of_birth: birth_date.format(LOCALE_DATE_FORMAT).to_string(),
            address: self.address.trim().to_string(),
            status: Some(self.status),
            notes: non_empty(&self.notes),
        })
    }
}

fn check_birth_date(text: &str, today: NaiveDate) -> std::result::Result<NaiveDate, String> {
    let date = parse_locale_date(text)
        .ok_or_else(|| format!("'{}' is not a date (expected M/D/YYYY)", text.trim()))?;

    let (year, month, day) = MIN_BIRTH_DATE;
    let earliest = NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN);

    if date > today {
        Err("Date of birth cannot be in the future".to_string())
    } else if date < earliest {
        Err("Date of birth cannot be before 1/1/1900".to_string())
    } else {
        Ok(date)
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

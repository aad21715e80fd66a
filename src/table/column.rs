//! Typed column keys and their field accessors.
//!
//! Columns are addressed through [`ColumnKey`] instead of free-form field
//! names. Text coming from the outside (`"firstName"`, `"last_name"`,
//! `"Date of Birth"`) is parsed once; anything unrecognized is rejected with
//! [`UnknownColumn`] and callers treat it as a no-op.

use crate::domain::Patient;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How values of a column are compared when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Case-insensitive lexicographic order.
    Text,
    /// Chronological order of the parsed locale date.
    Date,
}

/// One displayed column of the patient table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    FirstName,
    LastName,
    MiddleName,
    DateOfBirth,
    Address,
    Status,
    Notes,
}

/// Returned when a column name does not match any [`ColumnKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl ColumnKey {
    /// Every column in display order.
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::MiddleName,
        Self::DateOfBirth,
        Self::Address,
        Self::Status,
        Self::Notes,
    ];

    /// Record field name of the column.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::MiddleName => "middleName",
            Self::DateOfBirth => "dateOfBirth",
            Self::Address => "address",
            Self::Status => "status",
            Self::Notes => "notes",
        }
    }

    /// Header label of the column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::MiddleName => "Middle Name",
            Self::DateOfBirth => "Date of Birth",
            Self::Address => "Address",
            Self::Status => "Status",
            Self::Notes => "Notes",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ColumnKind {
        match self {
            Self::DateOfBirth => ColumnKind::Date,
            _ => ColumnKind::Text,
        }
    }

    /// Stringified value of this column for `patient`.
    ///
    /// Missing optional fields read as the empty string.
    #[must_use]
    pub fn value(self, patient: &Patient) -> &str {
        match self {
            Self::FirstName => &patient.first_name,
            Self::LastName => &patient.last_name,
            Self::MiddleName => patient.middle_name.as_deref().unwrap_or(""),
            Self::DateOfBirth => &patient.date_of_birth,
            Self::Address => &patient.address,
            Self::Status => patient.status.as_str(),
            Self::Notes => patient.notes.as_deref().unwrap_or(""),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColumnKey {
    type Err = UnknownColumn;

    /// Parses a column from its field name or label, ignoring case, spaces,
    /// underscores and hyphens.
    ///
    /// ```
    /// use patient_roster::table::ColumnKey;
    ///
    /// assert_eq!("lastName".parse(), Ok(ColumnKey::LastName));
    /// assert_eq!("date_of_birth".parse(), Ok(ColumnKey::DateOfBirth));
    /// assert_eq!("Middle Name".parse(), Ok(ColumnKey::MiddleName));
    /// assert!("shoeSize".parse::<ColumnKey>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "firstname" | "first" => Ok(Self::FirstName),
            "lastname" | "last" => Ok(Self::LastName),
            "middlename" | "middle" => Ok(Self::MiddleName),
            "dateofbirth" | "dob" | "birthdate" => Ok(Self::DateOfBirth),
            "address" => Ok(Self::Address),
            "status" => Ok(Self::Status),
            "notes" => Ok(Self::Notes),
            _ => Err(UnknownColumn(s.to_string())),
        }
    }
}

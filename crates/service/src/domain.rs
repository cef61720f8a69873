//! Partial-update inputs for the service layer.
//!
//! `None` leaves a field unchanged. For optional text fields, `Some` with a
//! blank string clears the value.

/// Customer update input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Movie update input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub duration_minutes: Option<u32>,
    pub director: Option<String>,
    pub language: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
}

/// Theater update input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TheaterUpdate {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub screen_type: Option<String>,
    pub has_wheelchair_access: Option<bool>,
}

/// Blank strings become `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Apply a patch value to an optional field.
pub(crate) fn patch_optional(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *field = non_blank(Some(v));
    }
}

use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::{require_text, Entity, EntityMeta};
use crate::errors::ModelError;

/// A cinema customer.
///
/// `loyalty_points` only ever grows, through [`Customer::add_loyalty_points`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    loyalty_points: u32,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            meta: EntityMeta::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            phone_number,
            loyalty_points: 0,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn loyalty_points(&self) -> u32 { self.loyalty_points }

    /// Add `points` when positive; zero and negative deltas are ignored.
    /// Returns whether the balance changed.
    pub fn add_loyalty_points(&mut self, points: i64) -> bool {
        let Ok(delta) = u32::try_from(points) else {
            if points > 0 {
                self.loyalty_points = u32::MAX;
                self.touch();
                return true;
            }
            return false;
        };
        if delta == 0 {
            return false;
        }
        self.loyalty_points = self.loyalty_points.saturating_add(delta);
        self.touch();
        true
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("email pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool { email_regex().is_match(email) }

pub fn is_valid_phone(phone: &str) -> bool { phone_regex().is_match(phone) }

impl Entity for Customer {
    const KIND: &'static str = "Customer";

    fn meta(&self) -> &EntityMeta { &self.meta }
    fn meta_mut(&mut self) -> &mut EntityMeta { &mut self.meta }

    fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.first_name, "Customer first name cannot be empty")?;
        require_text(&self.last_name, "Customer last name cannot be empty")?;
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(ModelError::validation("Invalid email format"));
            }
        }
        if let Some(phone) = &self.phone_number {
            if !is_valid_phone(phone) {
                return Err(ModelError::validation("Invalid phone number format"));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer[id={}, name={}, email={}, phone={}, points={}]",
            self.meta.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            self.full_name(),
            self.email.as_deref().unwrap_or("N/A"),
            self.phone_number.as_deref().unwrap_or("N/A"),
            self.loyalty_points,
        )
    }
}

//! Submit-time constraints.
//!
//! The store accepts any well-shaped value; these rules only run when the
//! controller is configured to enforce them before transmitting.

use crate::error::FormError;
use crate::types::ProfileDraft;

pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 0..=150;

impl ProfileDraft {
    /// Check required fields and the age range.
    pub fn validate(&self) -> Result<(), FormError> {
        let mut issues = Vec::new();

        let required = [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("middleName", self.middle_name.as_str()),
            ("password", self.password.expose()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                issues.push(format!("{field} is required"));
            }
        }

        if !self.age.is_empty() {
            match self.age.parse::<u32>() {
                Ok(age) if AGE_RANGE.contains(&age) => {}
                _ => issues.push(format!(
                    "age must be an integer between {} and {}",
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                )),
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation(issues))
        }
    }
}

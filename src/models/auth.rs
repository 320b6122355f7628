use serde::{Deserialize, Serialize};

use crate::error::TaskdeskError;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Client-side checks run before anything is sent; the backend still
    /// validates on its own.
    pub fn validate(&self, confirmation: &str) -> Result<(), TaskdeskError> {
        if self.password != confirmation {
            return Err(TaskdeskError::validation("Passwords do not match"));
        }
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(TaskdeskError::validation("Please fill in all fields"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TaskdeskError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        if self.username.chars().count() < MIN_USERNAME_LEN {
            return Err(TaskdeskError::validation(format!(
                "Username must be at least {MIN_USERNAME_LEN} characters long"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(alias = "accessToken", alias = "jwt")]
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

use serde::{Deserialize, Serialize};
use crate::fields::FieldError;

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    // Checkbox: present ("on") only when ticked
    #[serde(default)]
    pub is_admin: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterForm {
    pub fn role(&self) -> &'static str {
        if self.is_admin.is_some() { "admin" } else { "regular" }
    }

    /// The body sent to `/auth/register`, once both passwords agree.
    pub fn into_registration(self) -> Result<Registration, FieldError> {
        if self.password != self.confirm_password {
            return Err(FieldError::PasswordMismatch);
        }
        let role = self.role().to_string();
        Ok(Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            role,
        })
    }
}

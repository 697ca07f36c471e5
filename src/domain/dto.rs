use serde::{Deserialize, Serialize};
use validator::validate_email;

use crate::domain::po::User;

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at.and_utc().to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// A creation payload that has passed validation.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = String;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        if req.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        // Column widths are VARCHAR(100); reject early instead of at insert.
        if req.name.chars().count() > 100 {
            return Err("name must be at most 100 characters".to_string());
        }
        if req.email.chars().count() > 100 {
            return Err("email must be at most 100 characters".to_string());
        }
        if !validate_email(req.email.as_str()) {
            return Err(format!("`{}` is not a valid email address", req.email));
        }
        Ok(NewUser {
            name: req.name,
            email: req.email,
        })
    }
}

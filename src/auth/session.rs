use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Marketplace role carried in the session. Role tokens coming from forms or
/// stored rows compare case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "buyer" => Some(Role::Buyer),
            "seller" => Some(Role::Seller),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Buyer => "Buyer",
            Role::Seller => "Seller",
        }
    }

    pub fn is_buyer(self) -> bool {
        matches!(self, Role::Buyer)
    }

    pub fn is_seller(self) -> bool {
        matches!(self, Role::Seller)
    }
}

/// Everything a handler needs to know about the caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub company_id: i64,
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

/// Resolve the logged-in user from the session, or fail with a session error.
pub fn current_user(session: &Session) -> Result<CurrentUser, AppError> {
    let user_id = get_user_id(session)
        .ok_or_else(|| AppError::Session("User not logged in".to_string()))?;
    let username = session
        .get::<String>("username")
        .unwrap_or(None)
        .ok_or_else(|| AppError::Session("No username in session".to_string()))?;
    let role_token = session
        .get::<String>("role")
        .unwrap_or(None)
        .ok_or_else(|| AppError::Session("No role in session".to_string()))?;
    let role = Role::parse(&role_token)
        .ok_or_else(|| AppError::Session(format!("Unknown role '{role_token}' in session")))?;
    let company_id = session
        .get::<i64>("company_id")
        .unwrap_or(None)
        .ok_or_else(|| AppError::Session("No company in session".to_string()))?;
    Ok(CurrentUser {
        user_id,
        username,
        role,
        company_id,
    })
}

/// Resolve the caller and check their role; Err(PermissionDenied) otherwise.
pub fn require_role(session: &Session, role: Role) -> Result<CurrentUser, AppError> {
    let user = current_user(session)?;
    if user.role == role {
        Ok(user)
    } else {
        Err(AppError::PermissionDenied(format!(
            "{} role required",
            role.code()
        )))
    }
}

/// Queue a one-shot flash message for the next rendered page.
pub fn flash(session: &Session, message: &str) {
    let _ = session.insert("flash", message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

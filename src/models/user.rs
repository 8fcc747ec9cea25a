use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_name: String,
    // Sent on create/update only; the accounts service never echoes it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,
    #[serde(default)]
    pub active: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_details: Option<UserDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.active == 1
    }

    pub fn full_name(&self) -> String {
        match &self.user_details {
            Some(details) => format!("{} {}", details.first_name, details.last_name)
                .trim()
                .to_string(),
            None => self.user_name.clone(),
        }
    }
}

impl Record for User {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Body of a self-service sign-up; the accounts service assigns id and role.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub user_name: String,
    pub user_password: String,
    pub active: i32,
    pub user_details: UserDetails,
}

/// Free-text role label (ADMIN, USER, PREMIUM_USER are the ones seen in practice).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: i64,
    pub role_name: String,
}

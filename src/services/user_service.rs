use serde::Serialize;

use super::http::ServiceClient;
use crate::models::User;
use crate::utils::AppError;

// ==================== ACCOUNTS SERVICE ====================

const USERS_PATH: &str = "/api/accounts/users";
const REGISTRATION_PATH: &str = "/api/accounts/registration";

pub async fn get_all_users(client: &ServiceClient) -> Result<Vec<User>, AppError> {
    log::info!("👥 Fetching all users");
    let users: Vec<User> = client.get_json(USERS_PATH, "fetch users").await?;
    log::info!("✅ Retrieved {} users", users.len());
    Ok(users)
}

pub async fn get_user_by_id(client: &ServiceClient, id: i64) -> Result<User, AppError> {
    log::info!("👤 Fetching user {}", id);
    client
        .get_json(&format!("{}/{}", USERS_PATH, id), "fetch user")
        .await
}

pub async fn get_user_by_name(client: &ServiceClient, name: &str) -> Result<User, AppError> {
    log::info!("👤 Fetching user by name: {}", name);
    let path = format!("{}?name={}", USERS_PATH, urlencoding::encode(name));
    client.get_json(&path, "fetch user by name").await
}

/// Self-service sign up (as opposed to [`create_user`] from the admin screen).
pub async fn register_user<B>(client: &ServiceClient, user: &B) -> Result<User, AppError>
where
    B: Serialize + ?Sized,
{
    log::info!("📝 Registering user");
    client.post_json(REGISTRATION_PATH, user, "register user").await
}

pub async fn create_user<B>(client: &ServiceClient, user: &B) -> Result<User, AppError>
where
    B: Serialize + ?Sized,
{
    log::info!("➕ Creating user");
    let created: User = client.post_json(USERS_PATH, user, "create user").await?;
    log::info!("✅ User {} created ({})", created.id, created.user_name);
    Ok(created)
}

pub async fn update_user<B>(client: &ServiceClient, id: i64, user: &B) -> Result<User, AppError>
where
    B: Serialize + ?Sized,
{
    log::info!("✏️  Updating user {}", id);
    client
        .put_json(&format!("{}/{}", USERS_PATH, id), user, "update user")
        .await
}

pub async fn delete_user(client: &ServiceClient, id: i64) -> Result<(), AppError> {
    log::info!("🗑️  Deleting user {}", id);
    client
        .delete(&format!("{}/{}", USERS_PATH, id), "delete user")
        .await
}

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::components::DeleteConfirm;
use crate::config::AppConfig;
use crate::models::{Cart, UserDetails};
use crate::services::ServiceClient;
use crate::utils::AppError;

/// Tables that carry a delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceTable {
    Users,
    Products,
    Recommendations,
}

/// Everything the pages share. Locks are never held across a service call.
pub struct AppState {
    pub client: ServiceClient,
    pub profile_user_id: i64,
    pub cart: Mutex<Cart>,
    /// Profile edits saved this session; the accounts service never sees them
    pub profile_details: Mutex<Option<UserDetails>>,
    confirms: Mutex<HashMap<ResourceTable, DeleteConfirm>>,
    confirm_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(client: ServiceClient, profile_user_id: i64, confirm_timeout: Option<Duration>) -> Self {
        Self {
            client,
            profile_user_id,
            cart: Mutex::new(Cart::default()),
            profile_details: Mutex::new(None),
            confirms: Mutex::new(HashMap::new()),
            confirm_timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let client = ServiceClient::new(&config.service_base_url, config.request_timeout)?;
        Ok(Self::new(
            client,
            config.profile_user_id,
            config.delete_confirm_timeout,
        ))
    }

    /// Runs `f` against the confirmation state of `table`.
    pub async fn with_confirm<R>(
        &self,
        table: ResourceTable,
        f: impl FnOnce(&mut DeleteConfirm) -> R,
    ) -> R {
        let mut confirms = self.confirms.lock().await;
        let confirm = confirms
            .entry(table)
            .or_insert_with(|| DeleteConfirm::new(self.confirm_timeout));
        f(confirm)
    }

    pub async fn armed_row(&self, table: ResourceTable) -> Option<i64> {
        self.with_confirm(table, |confirm| confirm.armed_row()).await
    }
}

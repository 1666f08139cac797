//! Admin user-role management endpoints.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use super::api::{ApiClient, GatewayError};
use super::http::Transport;
use super::types::{PromoteResponse, UserListResponse, UserSummary};

pub const USERS_PATH: &str = "/users";

fn promote_path(user_id: &str) -> String {
    format!("{USERS_PATH}/{}/promote", urlencoding::encode(user_id))
}

#[derive(Clone, Debug)]
pub struct UsersService<T> {
    api: ApiClient<T>,
}

impl<T: Transport> UsersService<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    /// List every user in the workspace (admin only on the backend).
    ///
    /// # Errors
    ///
    /// Propagates the gateway error; 403 means the caller is not an admin.
    pub async fn list_all(&self) -> Result<Vec<UserSummary>, GatewayError> {
        let body: UserListResponse = self.api.get(USERS_PATH).await?;
        Ok(body.users)
    }

    /// Grant the admin role and return the updated record.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn promote_to_admin(&self, user_id: &str) -> Result<UserSummary, GatewayError> {
        let body: PromoteResponse = self.api.post_empty(&promote_path(user_id)).await?;
        Ok(body.user)
    }
}

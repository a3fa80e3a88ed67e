//! Users of the company account.

use crate::client::Pipedrive;
use crate::error::Error;
use crate::response::ApiResponse;
use crate::transport::Transport;

impl<T: Transport> Pipedrive<T> {
    /// `GET /users`
    pub fn list_users(&self) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint("users"))
    }

    /// `GET /users/{id}`
    pub fn get_user(&self, id: u64) -> Result<ApiResponse, Error> {
        self.get(&self.endpoint(&format!("users/{id}")))
    }
}

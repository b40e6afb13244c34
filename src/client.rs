//! High-level `HavenClient`, the entry point for user operations.

use std::sync::Arc;

use crate::error::Result;
use crate::rest::{Method, RequestBody, RestClient, Transport};
use crate::snowflake::Snowflake;
use crate::user::{CurrentUser, PartialUser, User};

/// The main Haven API client.
///
/// ```rust,no_run
/// use haven_sdk::{CreateMessage, HavenClient};
///
/// #[tokio::main]
/// async fn main() -> haven_sdk::Result<()> {
///     let client = HavenClient::new("Bot mytoken", None)?;
///
///     let me = client.current_user().await?;
///     println!("logged in as {}", me.display_name());
///
///     client
///         .user(80351110224678912u64)
///         .send(CreateMessage::new().content("hello!"))
///         .await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct HavenClient {
    transport: Arc<dyn Transport>,
}

impl HavenClient {
    /// Build a client over the production REST transport. A missing
    /// `Bot ` token prefix is added automatically.
    pub fn new(token: impl Into<String>, base_url: Option<&str>) -> Result<Self> {
        Ok(Self { transport: Arc::new(RestClient::new(token, base_url)?) })
    }

    /// Build a client over a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Reference a user by id without any I/O.
    pub fn user(&self, id: impl Into<Snowflake>) -> PartialUser {
        PartialUser::new(Arc::clone(&self.transport), id)
    }

    /// Fetch a user's full profile.
    pub async fn fetch_user(&self, id: impl Into<Snowflake>) -> Result<User> {
        self.user(id).fetch().await
    }

    /// Fetch the account this client is authenticated as.
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let value = self
            .transport
            .query(Method::GET, "/users/@me", RequestBody::Empty)
            .await?;
        CurrentUser::from_value(Arc::clone(&self.transport), value)
    }
}

//! Request handlers.

pub mod bids;
pub mod comments;
pub mod health;
pub mod jobs;
pub mod session;

pub use bids::*;
pub use comments::*;
pub use health::*;
pub use jobs::*;
pub use session::*;

use serde::Deserialize;

/// Owner descriptor carried in the query string of identity-scoped
/// routes. An absent email never matches a verified identity, so the
/// ownership guard rejects such requests.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

impl OwnerQuery {
    pub fn owner(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}

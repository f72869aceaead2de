//! Handler types and dependencies

use std::sync::Arc;

use crate::core::membership::Membership;
use crate::storage::Store;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub store: Arc<dyn Store>,
    pub membership: Arc<Membership>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(store: Arc<dyn Store>, membership: Arc<Membership>) -> Self {
        Self { store, membership }
    }
}

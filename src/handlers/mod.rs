//! HTTP handlers for the /api/v1 surface.

pub mod categories;
pub mod family;
pub mod income;
pub mod params;
pub mod places;
pub mod pricing;
pub mod purchase;
pub mod search;
pub mod users;

use crate::config::LookupMode;
use crate::storage::Database;
use serde::Serialize;

/// Shared state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub lookup_mode: LookupMode,
}

/// Body for delete endpoints, matching the historical wire shape.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

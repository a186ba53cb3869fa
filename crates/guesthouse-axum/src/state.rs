//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped [`AxumContext`] containing the services handlers need.
pub type AppState = Arc<AxumContext>;

use std::sync::Arc;

use giapha_cloud::ObjectStore;
use giapha_db::Store;
use giapha_events::Notifier;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Every field is behind an `Arc`, so cloning is cheap. The ports are trait
/// objects: Postgres, Supabase Storage and SMTP in production, in-memory
/// fakes in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub objects: Arc<dyn ObjectStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<ServerConfig>,
}

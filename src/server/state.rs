use std::sync::{Arc, Mutex};
use std::time::Instant;

use rand::rngs::StdRng;

use super::ServerConfig;
use crate::catalog_store::CatalogStore;

pub type GuardedCatalogStore = Arc<dyn CatalogStore>;
pub type GuardedRng = Arc<Mutex<StdRng>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub store: GuardedCatalogStore,
    /// Seedable random source shared by the sampling endpoints.
    pub rng: GuardedRng,
    /// User acting when a request carries no `u` parameter.
    pub default_user_id: i64,
}

use std::sync::Arc;

use sonica_server::catalog_store::SqliteCatalogStore;
use sonica_server::server::{make_app, ServerConfig};
use tempfile::TempDir;

use super::fixtures::{populate, Fixture};

pub struct TestServer {
    pub base_url: String,
    pub fixture: Fixture,
    _temp_dir: TempDir,
}

impl TestServer {
    /// Spawn a server on an ephemeral port over a freshly-populated catalog.
    pub async fn spawn() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("catalog.db");
        let store = Arc::new(SqliteCatalogStore::new(&db_path).unwrap());
        let fixture = populate(&store);

        let app = make_app(ServerConfig::default(), store).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base_url: format!("http://{}", addr),
            fixture,
            _temp_dir: temp_dir,
        }
    }
}

pub mod config;
mod envelope;
mod http_layers;
mod routes;
pub mod state;

pub use config::ServerConfig;
pub use envelope::{SubsonicResponse, API_VERSION, SERVER_TYPE};
pub use http_layers::RequestsLoggingLevel;
pub use routes::{make_app, run_server};

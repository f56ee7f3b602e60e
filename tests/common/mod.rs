#![allow(dead_code)] // each test binary uses a subset of the helpers

mod client;
mod fixtures;
mod server;

pub use client::TestClient;
pub use fixtures::Fixture;
pub use server::TestServer;

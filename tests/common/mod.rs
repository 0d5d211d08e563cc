//! Shared utilities for integration testing.

use std::net::SocketAddr;

use comments_api::config::{ServiceConfig, StorageConfig};
use comments_api::{CommentStore, HttpServer, Shutdown};
use tokio::net::TcpListener;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server over an empty in-memory store.
#[allow(dead_code)]
pub async fn start_server() -> TestServer {
    start_server_with_storage(StorageConfig {
        path: ":memory:".to_string(),
        seed_examples: false,
    })
    .await
}

/// Start a server over the given storage configuration.
#[allow(dead_code)]
pub async fn start_server_with_storage(storage: StorageConfig) -> TestServer {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.storage = storage;

    let store = CommentStore::open(&config.storage).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, store);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        client,
        shutdown,
    }
}

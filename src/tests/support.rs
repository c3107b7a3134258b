// src/tests/support.rs

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::fetch::PropertyClient;
use crate::store::{ListActions, TabbedListStore};

/// Serve `router` on an ephemeral local port and return a config whose
/// base URL points at it. The server task runs until dropped with the
/// test runtime.
pub async fn serve(router: Router) -> (AppConfig, JoinHandle<()>) {
    // RUST_LOG=proplist=debug surfaces pipeline traces when a test fails
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = AppConfig {
        base_url: format!("http://{addr}"),
        ..AppConfig::default()
    };
    (config, server)
}

/// Full pipeline wired against a test server: store, client, actions.
pub async fn actions_against(router: Router) -> (ListActions, JoinHandle<()>) {
    let (config, server) = serve(router).await;
    let store = TabbedListStore::new(&config);
    let client = PropertyClient::new(&config).expect("client should build");
    (ListActions::new(store, client), server)
}

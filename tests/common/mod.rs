use std::{net::SocketAddr, path::Path};

use axum::Router;
use plan_dashboard::{client::BackendClient, config::Settings};
use tokio::net::TcpListener;

pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .expect("serve");
    });
    addr
}

pub fn settings(addr: SocketAddr, static_site: bool) -> Settings {
    Settings {
        base_address: format!("http://{addr}"),
        static_site,
        request_timeout_ms: 5_000,
        ..Settings::default()
    }
}

pub fn client(addr: SocketAddr, static_site: bool) -> BackendClient {
    BackendClient::new(&settings(addr, static_site)).expect("client")
}

pub fn write_slice(dir: &Path, name: &str, body: &str) {
    let data = dir.join("data");
    std::fs::create_dir_all(&data).expect("data dir");
    std::fs::write(data.join(format!("{name}.json")), body).expect("write slice");
}

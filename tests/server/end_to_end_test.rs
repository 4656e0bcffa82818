#[path = "../common/mod.rs"]
mod common;

use std::net::SocketAddr;

use lux::config::ServerConfig;
use lux::server::{Listener, ServerError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn start(fixture: &common::Fixture) -> SocketAddr {
    let config = ServerConfig::new(0).with_database(&fixture.path);
    let listener = Listener::bind(&config).unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(listener.run());
    SocketAddr::from(([127, 0, 0, 1], port))
}

async fn request(addr: SocketAddr, line: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(line.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_detail_lookup_over_tcp() {
    let fixture = common::collection();
    let addr = start(&fixture).await;

    let response = request(
        addr,
        "{\"id\":1,\"label\":null,\"classifier\":null,\"agt\":null,\"dep\":null}\n",
    )
    .await;

    let json: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(json["object"]["classifier"].as_array().unwrap().len(), 2);
    assert_eq!(json["agents"].as_array().unwrap().len(), 1);
    assert_eq!(json["agents"][0][2], "1840-1926");
}

#[tokio::test]
async fn test_unknown_id_over_tcp() {
    let fixture = common::collection();
    let addr = start(&fixture).await;

    assert_eq!(request(addr, "{\"id\":31337}\n").await, "Invalid id\n");
}

#[tokio::test]
async fn test_server_survives_bad_clients() {
    let fixture = common::collection();
    let addr = start(&fixture).await;

    // Connect and hang up without a request.
    drop(TcpStream::connect(addr).await.unwrap());
    assert_eq!(request(addr, "{not json\n").await, "");

    let response = request(addr, "{\"label\":\"fragment\"}\n").await;
    let json: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(json["data"][0][0], 3);
}

#[tokio::test]
async fn test_identical_requests_get_identical_bytes() {
    let fixture = common::collection();
    let addr = start(&fixture).await;

    let first = request(addr, "{\"id\":2}\n").await;
    let second = request(addr, "{\"id\":2}\n").await;
    assert!(!first.is_empty());
    assert_eq!(first, second);

    let first = request(addr, "{\"dep\":\"decorative\"}\n").await;
    let second = request(addr, "{\"dep\":\"decorative\"}\n").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_bind_to_busy_port_fails() {
    let fixture = common::collection();
    let first = Listener::bind(&ServerConfig::new(0).with_database(&fixture.path)).unwrap();
    let port = first.local_addr().unwrap().port();

    let second = Listener::bind(&ServerConfig::new(port).with_database(&fixture.path));
    match second {
        Err(ServerError::Bind { addr, .. }) => assert_eq!(addr.port(), port),
        other => panic!("expected a bind error, got {other:?}"),
    }
}

#[path = "../common/mod.rs"]
mod common;

use lux::config::ServerConfig;
use lux::server::{Dispatcher, Reply, ServerError};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

fn dispatcher(fixture: &common::Fixture) -> Dispatcher {
    Dispatcher::new(&ServerConfig::new(0).with_database(&fixture.path))
}

async fn exchange(
    dispatcher: &Dispatcher,
    request: &[u8],
) -> (Result<Reply, ServerError>, String) {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    client.write_all(request).await.unwrap();

    let result = dispatcher.handle(server).await;

    let mut response = String::new();
    client.read_to_string(&mut response).await.unwrap();
    (result, response)
}

#[tokio::test]
async fn test_detail_request_gets_one_json_line() {
    let fixture = common::collection();
    let (result, response) = exchange(&dispatcher(&fixture), b"{\"id\":1}\n").await;

    assert!(matches!(result, Ok(Reply::Detail(_))));
    assert!(response.ends_with('\n'));
    assert_eq!(response.matches('\n').count(), 1);

    let json: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(json["object"]["label"], "Still Life with Fruit");
    assert_eq!(
        json["columns_produced_by"],
        serde_json::json!(["Part", "Name", "Timespan", "Nationalities"])
    );
    assert_eq!(json["format_produced"], serde_json::json!(["w", "w", "p", "w"]));
}

#[tokio::test]
async fn test_null_id_routes_to_filter() {
    let fixture = common::collection();
    let request = b"{\"id\":null,\"label\":\"vase\",\"classifier\":null,\"agt\":null,\"dep\":null}\n";
    let (result, response) = exchange(&dispatcher(&fixture), request).await;

    assert!(matches!(result, Ok(Reply::Filter(_))));
    let json: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(json["data"][0][0], 2);
    assert_eq!(json["columns"][4], "Classified As");
}

#[tokio::test]
async fn test_unknown_id_gets_plain_text_error() {
    let fixture = common::collection();
    let (result, response) = exchange(&dispatcher(&fixture), b"{\"id\":424242}\n").await;

    assert!(matches!(result, Ok(Reply::Error(_))));
    assert_eq!(response, "Invalid id\n");
}

#[tokio::test]
async fn test_date_error_text_is_sent() {
    let fixture = common::collection();
    let (_, response) = exchange(&dispatcher(&fixture), b"{\"id\":5}\n").await;

    assert!(response.contains("circa 1900"));
    assert!(serde_json::from_str::<serde_json::Value>(&response).is_err());
}

#[tokio::test]
async fn test_malformed_request_gets_no_response() {
    let fixture = common::collection();
    let (result, response) = exchange(&dispatcher(&fixture), b"this is not json\n").await;

    assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_closed_client_is_a_crash() {
    let fixture = common::collection();
    let (client, server): (DuplexStream, DuplexStream) = tokio::io::duplex(1024);
    drop(client);

    let result = dispatcher(&fixture).handle(server).await;
    assert!(matches!(result, Err(ServerError::ClientCrashed)));
}

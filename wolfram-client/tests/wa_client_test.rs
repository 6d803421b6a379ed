//! HTTP-level tests for [`wolfram_client::WaClient`] against a mockito server.

use std::time::Duration;

use mockito::Matcher;
use wolfram_client::{WaClient, WaError, WaOutcome};

const ANSWER: &str = r#"<queryresult success='true' error='false'>
 <pod title='Result' position='200' error='false' primary='true'>
  <subpod title=''><plaintext>4</plaintext></subpod>
 </pod>
</queryresult>"#;

/// **Test: Query sends every fixed parameter and parses the answer.**
///
/// **Setup:** Mock `/v2/query` matching input, appid, units and two excluded pod ids.
/// **Action:** `client.query("2+2")`.
/// **Expected:** One primary pod "Result" with plaintext "4"; the mock was hit once.
#[tokio::test]
async fn test_query_sends_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("input".into(), "2+2".into()),
            Matcher::UrlEncoded("appid".into(), "APPID-123456".into()),
            Matcher::UrlEncoded("format".into(), "plaintext".into()),
            Matcher::UrlEncoded("units".into(), "nonmetric".into()),
            Matcher::UrlEncoded("excludepodid".into(), "Input".into()),
            Matcher::UrlEncoded("excludepodid".into(), "SeriesRepresentations:*".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(ANSWER)
        .expect(1)
        .create_async()
        .await;

    let client = WaClient::new("APPID-123456", true)
        .unwrap()
        .with_api_url(&format!("{}/v2/query", server.url()));

    let outcome = client.query("2+2").await.unwrap();

    mock.assert_async().await;
    let WaOutcome::Pods(pods) = outcome else {
        panic!("expected pods, got {outcome:?}");
    };
    assert_eq!(pods.len(), 1);
    assert_eq!(pods[0].title, "Result");
    assert_eq!(pods[0].subpods[0].plaintext, "4");
}

/// **Test: Metric units are the default.**
#[test]
fn test_query_params_metric_by_default() {
    let client = WaClient::new("key", false).unwrap();
    let params = client.query_params("weight of earth");

    assert!(params.contains(&("units", "metric".to_string())));
    assert!(params.contains(&("input", "weight of earth".to_string())));
    assert_eq!(params.iter().filter(|(k, _)| *k == "excludepodid").count(), 7);
}

/// **Test: A server error surfaces as WaError::Http.**
#[tokio::test]
async fn test_query_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/query")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = WaClient::new("key", false)
        .unwrap()
        .with_api_url(&format!("{}/v2/query", server.url()));

    assert!(matches!(client.query("x").await, Err(WaError::Http(_))));
}

/// **Test: The ticker list is mapped to currency ids.**
#[tokio::test]
async fn test_fetch_known_currencies() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/ticker/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": "bitcoin", "name": "Bitcoin", "symbol": "BTC", "rank": "1"},
                {"id": "ethereum", "name": "Ethereum", "symbol": "ETH", "rank": "2"}
            ]"#,
        )
        .create_async()
        .await;

    let client = WaClient::new("key", false).unwrap();
    let currencies = client
        .fetch_known_currencies(&format!("{}/v1/ticker/?limit=0", server.url()))
        .await
        .unwrap();

    assert_eq!(currencies.len(), 2);
    assert_eq!(currencies[0].id, "bitcoin");
    assert_eq!(currencies[1].symbol, "ETH");
}

/// **Test: A malformed ticker list is a JSON error, not a panic.**
#[tokio::test]
async fn test_fetch_known_currencies_bad_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/ticker/")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = WaClient::new("key", false).unwrap();
    let result = client
        .fetch_known_currencies(&format!("{}/v1/ticker/", server.url()))
        .await;

    assert!(matches!(result, Err(WaError::Json(_))));
}

/// Accepts connections and never answers. Returns the `http://` base URL.
async fn silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    format!("http://{addr}")
}

/// **Test: A server that never answers fails the query with a timeout instead of hanging.**
///
/// **Setup:** Listener that accepts and stays silent; 200ms query timeout.
/// **Action:** `client.query("2+2")`, bounded by an outer 5s guard.
/// **Expected:** `WaError::Http` whose source is a timeout, well before the guard.
#[tokio::test]
async fn test_query_times_out_on_silent_server() {
    let base = silent_server().await;
    let client = WaClient::new("key", false)
        .unwrap()
        .with_api_url(&format!("{base}/v2/query"))
        .with_query_timeout(Duration::from_millis(200));

    let result = tokio::time::timeout(Duration::from_secs(5), client.query("2+2"))
        .await
        .expect("query must give up on its own");

    match result {
        Err(WaError::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected a timeout, got {other:?}"),
    }
}

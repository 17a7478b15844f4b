//! Tests for the HTTP client against a local one-shot server.

mod common;

use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::valid_request;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use showtix_lib::ShowsClient;
use showtix_lib::error::ApiError;
use showtix_lib::model::{PurchaseRequest, ShowId};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// What the server saw.
#[derive(Debug)]
struct Captured {
    method: String,
    path: String,
    body: String,
}

/// Serves a single request with a canned response.
///
/// Returns the shows endpoint URL and a receiver for the captured request.
async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    let tx = Arc::new(Mutex::new(Some(tx)));

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let io = TokioIo::new(stream);

        let service = service_fn(move |req: Request<Incoming>| {
            let tx = tx.clone();
            async move {
                let method = req.method().to_string();
                let path = req.uri().path().to_string();
                let bytes = req
                    .into_body()
                    .collect()
                    .await
                    .map(|b| b.to_bytes())
                    .unwrap_or_default();

                if let Some(sender) = tx.lock().unwrap().take() {
                    let _ = sender.send(Captured {
                        method,
                        path,
                        body: String::from_utf8_lossy(&bytes).into_owned(),
                    });
                }

                Ok::<_, Infallible>(
                    Response::builder()
                        .status(StatusCode::from_u16(status).unwrap())
                        .header("Content-Type", "application/json")
                        .body(Full::new(Bytes::from(body)))
                        .unwrap(),
                )
            }
        });

        let _ = http1::Builder::new().serve_connection(io, service).await;
    });

    (format!("http://{}/api/shows", addr), rx)
}

fn client(url: &str) -> ShowsClient {
    ShowsClient::builder()
        .url(url)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_shows() {
    let (url, rx) = serve_once(
        200,
        r#"[
            {"ShowID": 1, "Title": "Rock Night", "CategoryName": "Concert"},
            {"ShowID": 2, "ShowTitle": "Glow Rave", "CategoryName": "Dance Party"}
        ]"#,
    )
    .await;

    let shows = client(&url).list_shows().await.unwrap();

    assert_eq!(shows.len(), 2);
    assert_eq!(shows[1].title, "Glow Rave");
    let captured = rx.await.unwrap();
    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/api/shows");
}

#[tokio::test]
async fn test_get_show() {
    let (url, rx) = serve_once(
        200,
        r#"{"ShowID": 42, "Title": "Night Owls", "FileName": "owls.jpg",
            "VenueName": "The Roxy", "ShowTime": "2025-03-01T19:30:00"}"#,
    )
    .await;

    let show = client(&url).get_show(&ShowId::from(42)).await.unwrap();

    assert_eq!(show.title, "Night Owls");
    assert_eq!(show.venue_name.as_deref(), Some("The Roxy"));
    assert!(show.show_time.is_some());
    assert_eq!(rx.await.unwrap().path, "/api/shows/42");
}

#[tokio::test]
async fn test_get_show_not_found() {
    let (url, _rx) = serve_once(404, "").await;

    let err = client(&url).get_show(&ShowId::from(9)).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "HTTP 404: Not Found");
}

#[tokio::test]
async fn test_get_show_bad_json_is_parse_error() {
    let (url, _rx) = serve_once(200, "<html></html>").await;

    let err = client(&url).get_show(&ShowId::from(9)).await.unwrap_err();

    assert!(matches!(err, ApiError::Parse { body: Some(ref b), .. } if b == "<html></html>"));
}

#[tokio::test]
async fn test_submit_purchase_posts_wire_format() {
    let (url, rx) = serve_once(201, "").await;
    let request = valid_request(42);

    client(&url).submit_purchase(&request).await.unwrap();

    let captured = rx.await.unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/api/shows/purchases");

    let json: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(json["ShowId"], 42);
    assert_eq!(json["NumTicketsOrdered"], 2);
    assert_eq!(json["CustEmail"], "ada@example.com");
    assert_eq!(json["CreditCardType"], "Mastercard");
    assert_eq!(json["CVV"], "123");

    let echoed: PurchaseRequest = serde_json::from_value(json).unwrap();
    assert_eq!(echoed, request);
}

#[tokio::test]
async fn test_submit_purchase_rejected_with_error_body() {
    let (url, _rx) = serve_once(400, r#"{"error":"Card declined"}"#).await;

    let err = client(&url)
        .submit_purchase(&valid_request(1))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.server_message(), Some("Card declined"));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_submit_purchase_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api/shows", addr))
        .submit_purchase(&valid_request(1))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_submit_purchase_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept the connection but never answer.
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(stream);
    });

    let client = ShowsClient::builder()
        .url(format!("http://{}/api/shows", addr))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client.submit_purchase(&valid_request(1)).await.unwrap_err();

    assert!(matches!(err, ApiError::Timeout(d) if d == Duration::from_millis(200)));
    server.abort();
}

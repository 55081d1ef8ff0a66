//! End-to-end requests against the live echo server.
//!
//! # Design
//! Starts the mock server on a random port, then sends real HTTP through
//! `UreqTransport`, both the shared default and explicitly configured ones.
//! Checks that modifiers reach the wire, bodies arrive intact, and error
//! statuses come back as data.

use std::net::SocketAddr;
use std::sync::{Arc, Once};
use std::time::Duration;

use bytes::Bytes;
use mock_server::{byte_pattern, Echo};
use requests_core::{
    default_modifier, default_transport, RequestSpec, Transport, TransportConfig, UreqTransport,
    APPLICATION_JSON,
};

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    init_tracing();

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn default_transport_round_trip() {
    let addr = start_server();

    let mut spec = RequestSpec::new(format!("http://{addr}/echo"), "GET", None, None);
    assert!(spec.transport().is_none());

    let resp = spec.bytes_response().unwrap();
    assert_eq!(resp.status_code, 200);
    let echo: Echo = resp.json().unwrap();
    assert_eq!(echo.method, "GET");

    // The default was stored on the spec and is the shared instance.
    let assigned = Arc::as_ptr(spec.transport().unwrap());
    let shared: Arc<dyn Transport> = default_transport();
    assert!(std::ptr::addr_eq(assigned, Arc::as_ptr(&shared)));

    let again = spec.bytes_response().unwrap();
    assert_eq!(again.status_code, 200);
    assert!(std::ptr::addr_eq(assigned, Arc::as_ptr(spec.transport().unwrap())));
}

#[test]
fn default_modifier_reaches_the_server() {
    let addr = start_server();

    let mut spec = RequestSpec::new(
        format!("http://{addr}/echo"),
        "POST",
        Some(Bytes::from_static(br#"{"title":"Buy milk"}"#)),
        None,
    )
    .with_modifier(default_modifier);

    let echo: Echo = spec.bytes_response().unwrap().json().unwrap();
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.headers["content-type"], APPLICATION_JSON);
    assert_eq!(echo.headers["accept"], APPLICATION_JSON);
    assert_eq!(echo.body, r#"{"title":"Buy milk"}"#);
}

#[test]
fn custom_method_goes_through_default_transport() {
    let addr = start_server();

    let mut spec = RequestSpec::new(format!("http://{addr}/echo"), "PURGE", None, None);
    let resp = spec.bytes_response().unwrap();
    assert_eq!(resp.status_code, 200);
    let echo: Echo = resp.json().unwrap();
    assert_eq!(echo.method, "PURGE");

    let shared: Arc<dyn Transport> = default_transport();
    assert!(std::ptr::addr_eq(Arc::as_ptr(&shared), Arc::as_ptr(spec.transport().unwrap())));
}

#[test]
fn last_modifier_wins_on_the_wire() {
    let addr = start_server();

    let mut spec = RequestSpec::new(format!("http://{addr}/echo"), "GET", None, None)
        .with_modifier(|req| {
            req.headers_mut()
                .insert("x-client", http::HeaderValue::from_static("first"));
        })
        .with_modifier(|req| {
            req.headers_mut()
                .insert("x-client", http::HeaderValue::from_static("second"));
        });

    let echo: Echo = spec.bytes_response().unwrap().json().unwrap();
    assert_eq!(echo.headers["x-client"], "second");
}

#[test]
fn error_statuses_are_data() {
    let addr = start_server();

    for code in [201u16, 404, 418, 500, 503] {
        let mut spec = RequestSpec::new(format!("http://{addr}/status/{code}"), "GET", None, None);
        let resp = spec.bytes_response().unwrap();
        assert_eq!(resp.status_code, code);
        assert_eq!(resp.text().unwrap(), format!("status {code}"));
    }
}

#[test]
fn large_body_is_read_to_the_end() {
    let addr = start_server();

    let len = 256 * 1024 + 7;
    let mut spec = RequestSpec::new(format!("http://{addr}/bytes/{len}"), "GET", None, None);
    let resp = spec.bytes_response().unwrap();
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, byte_pattern(len));
}

#[test]
fn raw_response_exposes_headers() {
    let addr = start_server();

    let mut spec = RequestSpec::new(format!("http://{addr}/echo"), "", None, None);
    let resp = spec.response().unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], APPLICATION_JSON);
}

#[test]
fn configured_transport_is_used() {
    let addr = start_server();

    let config = TransportConfig {
        timeout: Some(Duration::from_secs(5)),
        ..TransportConfig::default()
    };
    let transport: Arc<dyn Transport> = Arc::new(UreqTransport::from_config(&config));
    let mut spec = RequestSpec::new(format!("http://{addr}/status/202"), "PUT", None, None)
        .with_transport(Arc::clone(&transport));

    assert_eq!(spec.bytes_response().unwrap().status_code, 202);
    assert!(std::ptr::addr_eq(Arc::as_ptr(&transport), Arc::as_ptr(spec.transport().unwrap())));
}

#[test]
fn connection_failure_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let mut spec = RequestSpec::new(format!("http://{addr}/echo"), "GET", None, None);
    let err = spec.bytes_response().unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");
}

#[test]
fn malformed_url_never_reaches_the_network() {
    let mut spec = RequestSpec::new("://google.com", "GET", None, None);
    let err = spec.bytes_response().unwrap_err();
    assert!(err.is_construction());
    assert!(spec.transport().is_none());
}

#[test]
fn wrapped_agent_keeps_its_settings() {
    let addr = start_server();

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let transport: Arc<dyn Transport> = Arc::new(UreqTransport::new(agent));
    let mut spec = RequestSpec::new(format!("http://{addr}/status/404"), "GET", None, Some(transport));

    let resp = spec.bytes_response().unwrap();
    assert_eq!(resp, requests_core::BytesResponse::new("status 404", 404));
}

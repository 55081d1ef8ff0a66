//! Small helpers for building, sending, and reading HTTP requests.
//!
//! # Overview
//! A `RequestSpec` describes a request (URL, method, optional body) plus an
//! ordered list of modifiers. Sending it builds a fresh `http::Request`, runs
//! the modifiers over it, and executes it through a `Transport`.
//! `bytes_response` also drains the body into a detached `BytesResponse`.
//!
//! # Design
//! - `Transport` is a one-method trait, so tests can replace the network with
//!   a fake. `UreqTransport` is the blocking default.
//! - Modifiers are plain closures over `&mut http::Request`, applied in order.
//! - Status codes are data. Only construction, transport, and body-read
//!   failures are errors.
//! - Everything is synchronous; a `RequestSpec` is used by one caller at a
//!   time.
//!
//! ```no_run
//! use requests_core::{default_modifier, RequestSpec};
//!
//! let mut spec = RequestSpec::new("https://example.com/api", "GET", None, None)
//!     .with_modifier(default_modifier);
//! let resp = spec.bytes_response()?;
//! println!("{} ({} bytes)", resp.status_code, resp.body.len());
//! # Ok::<(), requests_core::Error>(())
//! ```

pub mod error;
pub mod modifier;
pub mod request;
pub mod response;
pub mod transport;

pub use error::{ConstructionError, Error, ResponseError, Result};
pub use modifier::{default_modifier, Modifier, APPLICATION_JSON, DEFAULT_MODIFIER};
pub use request::RequestSpec;
pub use response::BytesResponse;
pub use transport::{
    default_transport, PreparedRequest, RawResponse, ResponseBody, Transport, TransportConfig,
    TransportError, UreqTransport,
};

//! Request description, construction, and execution.
//!
//! # Design
//! `RequestSpec` is plain data until a send is asked for. Each send runs the
//! same linear pipeline: build a fresh `PreparedRequest`, run every modifier
//! over it in order, hand it to the transport. `bytes_response` adds one more
//! step that drains the body into a `BytesResponse`.
//!
//! The transport is optional at construction time. The first send without
//! one stores the process-wide default on the spec, so later sends reuse it.
//! Both send methods take `&mut self` for that reason; a spec shared between
//! threads needs its own lock.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use bytes::Bytes;
use url::Url;

use crate::error::{ConstructionError, Error, Result};
use crate::modifier::Modifier;
use crate::response::BytesResponse;
use crate::transport::{default_transport, PreparedRequest, RawResponse, Transport};

/// A request to build and send.
pub struct RequestSpec {
    url: String,
    method: String,
    body: Option<Bytes>,
    transport: Option<Arc<dyn Transport>>,
    modifiers: Vec<Modifier>,
}

impl RequestSpec {
    /// Describe a request. An empty `method` means `GET`. Pass `None` for
    /// `transport` to use the shared default on first send.
    pub fn new(
        url: impl Into<String>,
        method: impl Into<String>,
        body: Option<Bytes>,
        transport: Option<Arc<dyn Transport>>,
    ) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            body,
            transport,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: impl Fn(&mut PreparedRequest) + 'static) -> Self {
        self.modifiers.push(Box::new(modifier));
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// The transport this spec sends through, if one has been set or
    /// assigned by a previous send.
    pub fn transport(&self) -> Option<&Arc<dyn Transport>> {
        self.transport.as_ref()
    }

    pub fn modifiers_len(&self) -> usize {
        self.modifiers.len()
    }

    /// Build the request and apply every modifier, without sending it.
    ///
    /// Fails before any modifier runs if the URL is not absolute or the
    /// method is not a valid token.
    pub fn prepare(&self) -> Result<PreparedRequest> {
        let url = Url::parse(&self.url).map_err(|source| ConstructionError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        let method = if self.method.is_empty() {
            http::Method::GET
        } else {
            http::Method::from_bytes(self.method.as_bytes())
                .map_err(|_| ConstructionError::InvalidMethod(self.method.clone()))?
        };
        let body = self.body.as_ref().map(|b| b.to_vec()).unwrap_or_default();

        let mut request = http::Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(body)
            .map_err(ConstructionError::from)?;

        for modifier in &self.modifiers {
            modifier(&mut request);
        }
        Ok(request)
    }

    /// Build, modify, and send the request. The response body is left
    /// unread; dropping it releases the connection.
    ///
    /// Status codes are returned as data. Only construction and transport
    /// failures are errors.
    ///
    /// The default transport is stored only once the request has been built,
    /// so a spec that fails construction still reports `transport() == None`.
    pub fn response(&mut self) -> Result<RawResponse> {
        let request = self.prepare()?;
        let transport = self
            .transport
            .get_or_insert_with(|| default_transport() as Arc<dyn Transport>);

        tracing::debug!(method = %request.method(), url = %request.uri(), "sending request");
        let response = transport.execute(request).map_err(Error::Transport)?;
        tracing::debug!(status = response.status().as_u16(), "received response");

        Ok(response)
    }

    /// Send the request and read the whole body into a `BytesResponse`.
    pub fn bytes_response(&mut self) -> Result<BytesResponse> {
        let response = self.response()?;
        let status = response.status().as_u16();

        let mut reader = response.into_body();
        let mut body = Vec::new();
        let read = reader.read_to_end(&mut body);
        drop(reader);
        read.map_err(Error::BodyRead)?;

        tracing::trace!(status, len = body.len(), "read response body");
        Ok(BytesResponse::new(body, status))
    }
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("body", &self.body)
            .field("has_transport", &self.transport.is_some())
            .field("modifiers", &self.modifiers.len())
            .finish()
    }
}

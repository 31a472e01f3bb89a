//! Grant strategies that turn a base token-endpoint request into a concrete grant.
//!
//! Every strategy is a pure data transformation: it receives the [`GrantRequest`] prepared by
//! the [`TokenClient`](crate::client::TokenClient) (endpoint, basic auth, content type) and
//! returns it with a form body attached. Network I/O and persistence stay in the client.

mod client_credentials;
mod custom;
mod password;
mod refresh;

pub use client_credentials::*;
pub use custom::*;
pub use password::*;
pub use refresh::*;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	HttpRequest,
	http::{
		HeaderMap, HeaderValue, Method,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::ConfigError};

/// Content type of every token-endpoint request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Strategy hook producing the body of a token-endpoint request.
pub trait GrantStrategy: Send + Sync {
	/// Attaches the grant body to `request`.
	///
	/// `refresh_token` carries the currently stored refresh token when the client runs a
	/// refresh; strategies may embed it or ignore it.
	fn handle(&self, request: GrantRequest, refresh_token: Option<&str>) -> GrantRequest;

	/// Stable label used in spans and metrics.
	fn grant_type(&self) -> &str {
		"custom"
	}
}

/// One token-endpoint call: `POST` with form encoding and client basic auth.
#[derive(Clone, Debug)]
pub struct GrantRequest {
	/// Token endpoint URL.
	pub url: Url,
	/// Request headers (basic auth and content type are preset).
	pub headers: HeaderMap,
	/// Form-encoded body set by the active grant strategy.
	pub body: String,
}
impl GrantRequest {
	/// Builds the base request authenticated with `client_id`/`client_secret`.
	pub fn new(url: Url, client_id: &str, client_secret: &str) -> Result<Self> {
		let mut headers = HeaderMap::new();

		headers.insert(
			AUTHORIZATION,
			HeaderValue::from_str(&basic_auth(client_id, client_secret))
				.map_err(ConfigError::from)?,
		);
		headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

		Ok(Self { url, headers, body: String::new() })
	}

	/// Token requests are always `POST`.
	pub fn method(&self) -> Method {
		Method::POST
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();

		self
	}

	/// Converts the request into the transport's request type.
	pub fn into_http(self) -> Result<HttpRequest> {
		let mut builder =
			oauth2::http::Request::builder().method(Method::POST).uri(self.url.as_str());

		if let Some(headers) = builder.headers_mut() {
			headers.extend(self.headers);
		}

		builder
			.body(self.body.into_bytes())
			.map_err(|e| ConfigError::from(e).into())
	}
}

/// Formats the `Authorization: Basic` value for a client id/secret pair.
///
/// Both parts are form-encoded before being joined, so a `:` inside the client id cannot shift
/// the split point on the server.
pub fn basic_auth(client_id: &str, client_secret: &str) -> String {
	let credentials = format!("{}:{}", form_encode(client_id), form_encode(client_secret));

	format!("Basic {}", STANDARD.encode(credentials))
}

/// Percent-encodes a form value (`application/x-www-form-urlencoded` rules).
pub fn form_encode(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Form-encodes each scope and joins them with a single literal space.
pub(crate) fn join_scopes(scopes: &[String]) -> String {
	scopes.iter().map(|scope| form_encode(scope)).collect::<Vec<_>>().join(" ")
}

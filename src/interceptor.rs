//! Bearer-token injection for outgoing requests.
//!
//! [`TokenInterceptor`] runs right before a request leaves: it asks the
//! [`TokenClient`] for the current token (refreshing it when the validator says so) and
//! stamps `Authorization: Bearer <token>` onto the request. When no token was ever obtained the
//! request passes through untouched and the resource server decides what to do with it. Any
//! other failure is returned to the caller instead of sending the request unauthenticated.

#[cfg(feature = "reqwest")] mod client;

#[cfg(feature = "reqwest")] pub use client::*;

// crates.io
use oauth2::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	client::TokenClient,
	error::ConfigError,
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Requests whose headers the interceptor can amend.
pub trait AuthorizeRequest {
	/// Mutable access to the outgoing headers.
	fn headers_mut(&mut self) -> &mut HeaderMap;
}
impl<B> AuthorizeRequest for oauth2::http::Request<B> {
	fn headers_mut(&mut self) -> &mut HeaderMap {
		oauth2::http::Request::headers_mut(self)
	}
}
#[cfg(feature = "reqwest")]
impl AuthorizeRequest for reqwest::Request {
	fn headers_mut(&mut self) -> &mut HeaderMap {
		reqwest::Request::headers_mut(self)
	}
}

/// Attaches the client's current token to outgoing requests.
pub struct TokenInterceptor<C>
where
	C: TokenHttpClient,
{
	client: TokenClient<C>,
}
impl<C> TokenInterceptor<C>
where
	C: TokenHttpClient,
{
	/// Creates an interceptor backed by `client`.
	pub fn new(client: TokenClient<C>) -> Self {
		Self { client }
	}

	/// Token client consulted before each request.
	pub fn client(&self) -> &TokenClient<C> {
		&self.client
	}

	/// Returns the `Authorization` value for the current token, or `None` when no token was
	/// ever obtained.
	///
	/// # Errors
	///
	/// Propagates token-client failures, and fails with [`ConfigError::InvalidHeaderValue`] when
	/// the access token is not a valid header value.
	pub async fn authorization_header(&self) -> Result<Option<HeaderValue>> {
		let Some(token) = self.client.fetch_or_refresh_access_token().await? else {
			return Ok(None);
		};
		let mut value = HeaderValue::from_str(&token.bearer()).map_err(ConfigError::from)?;

		value.set_sensitive(true);

		Ok(Some(value))
	}

	/// Sets `Authorization: Bearer <token>` on `request` when a token is available.
	///
	/// Other headers are left alone; an existing `Authorization` header is replaced.
	///
	/// # Errors
	///
	/// See [`authorization_header`](Self::authorization_header).
	pub async fn intercept<R>(&self, mut request: R) -> Result<R>
	where
		R: AuthorizeRequest,
	{
		const KIND: FlowKind = FlowKind::Intercept;

		let span = FlowSpan::new(KIND, "intercept");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.authorization_header()).await;

		obs::record_result(KIND, &result);

		if let Some(value) = result? {
			request.headers_mut().insert(AUTHORIZATION, value);
		} else {
			obs::record_decision(KIND, "pass_through");
		}

		Ok(request)
	}
}
impl<C> Clone for TokenInterceptor<C>
where
	C: TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone() }
	}
}
impl<C> Debug for TokenInterceptor<C>
where
	C: TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenInterceptor").field("client", &self.client).finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::{Request, header::ACCEPT};
	// self
	use super::*;
	use crate::{
		auth::Token,
		client::fake::{FakeHttpClient, options},
		error::TransportError,
		hooks::FnValidator,
		store::MemoryStore,
	};

	fn interceptor(
		store: MemoryStore,
		valid: bool,
		http: &FakeHttpClient,
	) -> TokenInterceptor<FakeHttpClient> {
		TokenInterceptor::new(TokenClient::with_http_client(
			options("abc", "xyz")
				.with_store(Arc::new(store))
				.with_validator(Arc::new(FnValidator(move |_: &Token| valid))),
			http.clone(),
		))
	}

	fn outgoing() -> Request<()> {
		Request::builder()
			.uri("https://api.example.com/v1/me")
			.header(ACCEPT, "application/json")
			.body(())
			.expect("Outgoing request fixture should build.")
	}

	#[tokio::test]
	async fn attaches_bearer_and_keeps_other_headers() {
		let http = FakeHttpClient::responding(500, "");
		let interceptor = interceptor(MemoryStore::with_token(Token::new("A1")), true, &http);
		let request =
			interceptor.intercept(outgoing()).await.expect("Interception should succeed.");

		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Bearer A1")
		);
		assert_eq!(
			request.headers().get(ACCEPT).and_then(|value| value.to_str().ok()),
			Some("application/json")
		);
		assert_eq!(http.calls(), 0);
	}

	#[tokio::test]
	async fn replaces_an_existing_authorization_header() {
		let http = FakeHttpClient::responding(500, "");
		let interceptor = interceptor(MemoryStore::with_token(Token::new("A1")), true, &http);
		let mut request = outgoing();

		request.headers_mut().insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));

		let request = interceptor.intercept(request).await.expect("Interception should succeed.");

		assert_eq!(request.headers().get_all(AUTHORIZATION).iter().count(), 1);
		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Bearer A1")
		);
	}

	#[tokio::test]
	async fn passes_through_when_no_token_was_obtained() {
		let http = FakeHttpClient::responding(500, "");
		let interceptor = interceptor(MemoryStore::default(), true, &http);
		let request =
			interceptor.intercept(outgoing()).await.expect("Pass-through should not fail.");

		assert_eq!(request.headers(), outgoing().headers());
		assert_eq!(http.calls(), 0);
	}

	#[tokio::test]
	async fn refreshes_stale_tokens_before_attaching() {
		let store = MemoryStore::with_token(Token::new("A1").with_refresh_token("R1"));
		let http =
			FakeHttpClient::responding(200, "{\"access_token\":\"A2\",\"refresh_token\":\"R2\"}");
		let interceptor = interceptor(store.clone(), false, &http);
		let request =
			interceptor.intercept(outgoing()).await.expect("Interception should succeed.");

		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Bearer A2")
		);
		assert_eq!(http.calls(), 1);
		assert_eq!(store.snapshot(), Some(Token::new("A2").with_refresh_token("R2")));
	}

	#[tokio::test]
	async fn token_failures_propagate_instead_of_sending_unauthenticated() {
		let store = MemoryStore::with_token(Token::new("A1").with_refresh_token("R1"));
		let http = FakeHttpClient::responding(503, "maintenance");
		let interceptor = interceptor(store, false, &http);
		let err = interceptor
			.intercept(outgoing())
			.await
			.expect_err("Refresh failures should reach the caller.");

		assert!(matches!(err, Error::Transport(TransportError::TokenEndpoint { status: 503, .. })));
	}

	#[tokio::test]
	async fn rejects_tokens_that_are_not_header_safe() {
		let http = FakeHttpClient::responding(500, "");
		let interceptor =
			interceptor(MemoryStore::with_token(Token::new("line\nbreak")), true, &http);
		let err = interceptor
			.authorization_header()
			.await
			.expect_err("Control characters cannot appear in headers.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidHeaderValue(_))));
	}
}

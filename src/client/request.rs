//! Grant exchanges against the token endpoint.

// crates.io
use oauth2::AsyncHttpClient;
// self
use crate::{
	_prelude::*,
	auth::Token,
	client::TokenClient,
	error::TransportError,
	grant::{GrantRequest, GrantStrategy},
	http::{self, TokenHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

const BODY_PREVIEW_LIMIT: usize = 256;

impl<C> TokenClient<C>
where
	C: TokenHttpClient,
{
	/// Runs `grant` against the token endpoint and returns the extracted token.
	///
	/// Nothing is persisted; see [`request_token_and_save`](Self::request_token_and_save).
	///
	/// # Errors
	///
	/// - [`Error::Transport`] when the transport fails or the endpoint answers with a
	///   non-success status.
	/// - [`Error::Extraction`] when the response cannot be turned into a token.
	pub async fn request_token(&self, grant: &dyn GrantStrategy) -> Result<Token> {
		const KIND: FlowKind = FlowKind::RequestToken;

		let span = FlowSpan::new(KIND, "request_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.exchange(grant, None)).await;

		obs::record_result(KIND, &result);

		result
	}

	/// Runs `grant`, then saves the token, overwriting whatever the store held.
	///
	/// # Errors
	///
	/// Same as [`request_token`](Self::request_token), plus [`Error::Storage`] when saving fails.
	pub async fn request_token_and_save(&self, grant: &dyn GrantStrategy) -> Result<Token> {
		const KIND: FlowKind = FlowKind::RequestToken;

		let span = FlowSpan::new(KIND, "request_token_and_save");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.exchange(grant, None).await?;

				self.store.save(token).await.map_err(Error::from)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Sends one grant request and extracts the token from a successful response.
	pub(crate) async fn exchange(
		&self,
		grant: &dyn GrantStrategy,
		refresh_token: Option<&str>,
	) -> Result<Token> {
		let base =
			GrantRequest::new(self.token_endpoint.clone(), &self.client_id, &self.client_secret)?;
		let request = grant.handle(base, refresh_token).into_http()?;

		obs::record_exchange(grant.grant_type());

		let handle = self.http_client.handle();
		let response = handle.call(request).await?;
		let status = response.status();

		obs::record_endpoint_status(grant.grant_type(), status.as_u16());

		if !status.is_success() {
			return Err(TransportError::TokenEndpoint {
				status: status.as_u16(),
				message: body_preview(response.body()),
				retry_after: http::parse_retry_after(response.headers()),
			}
			.into());
		}

		Ok(self.extractor.extract(&response)?)
	}
}

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.chars().count() <= BODY_PREVIEW_LIMIT {
		return text.to_owned();
	}

	let mut buf = text.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::header::{AUTHORIZATION, CONTENT_TYPE};
	// self
	use super::*;
	use crate::{
		client::fake::{FakeHttpClient, options},
		error::ExtractionError,
		grant::{ClientCredentialsGrant, PasswordGrant},
		store::MemoryStore,
	};

	#[tokio::test]
	async fn password_grant_sends_basic_auth_and_form_body() {
		let http =
			FakeHttpClient::responding(200, "{\"access_token\":\"A1\",\"refresh_token\":\"R1\"}");
		let client = TokenClient::with_http_client(options("abc", "xyz"), http.clone());
		let token = client
			.request_token(&PasswordGrant::new("u", "p", ["read", "write"]))
			.await
			.expect("Password grant should succeed.");

		assert_eq!(token.access_token(), "A1");
		assert_eq!(token.refresh_token(), Some("R1"));

		let sent = http.requests();

		assert_eq!(sent.len(), 1);

		let request = sent.first().expect("One request should be recorded.");

		assert_eq!(request.method, "POST");
		assert_eq!(request.uri, "https://auth.example.com/oauth/token");
		assert_eq!(request.header(AUTHORIZATION.as_str()), Some("Basic YWJjOnh5eg=="));
		assert_eq!(
			request.header(CONTENT_TYPE.as_str()),
			Some("application/x-www-form-urlencoded")
		);
		assert_eq!(request.body, "grant_type=password&username=u&password=p&scope=read write");
	}

	#[tokio::test]
	async fn request_token_does_not_touch_the_store() {
		let store = MemoryStore::default();
		let http = FakeHttpClient::responding(200, "{\"access_token\":\"A1\"}");
		let client = TokenClient::with_http_client(
			options("id", "secret").with_store(Arc::new(store.clone())),
			http,
		);

		client
			.request_token(&ClientCredentialsGrant::default())
			.await
			.expect("Client credentials grant should succeed.");

		assert!(store.snapshot().is_none());
	}

	#[tokio::test]
	async fn request_token_and_save_persists_the_token() {
		let store = MemoryStore::with_token(Token::new("old"));
		let http =
			FakeHttpClient::responding(200, "{\"access_token\":\"A1\",\"refresh_token\":\"R1\"}");
		let client = TokenClient::with_http_client(
			options("id", "secret").with_store(Arc::new(store.clone())),
			http,
		);
		let token = client
			.request_token_and_save(&PasswordGrant::new("u", "p", ["read"]))
			.await
			.expect("Password grant should succeed.");

		assert_eq!(store.snapshot(), Some(token));
	}

	#[tokio::test]
	async fn non_success_status_surfaces_as_token_endpoint_error() {
		let http = FakeHttpClient::responding(401, "{\"error\":\"invalid_client\"}")
			.with_header("retry-after", "12");
		let client = TokenClient::with_http_client(options("id", "bad"), http);
		let err = client
			.request_token(&ClientCredentialsGrant::default())
			.await
			.expect_err("401 responses should fail the exchange.");

		match err {
			Error::Transport(TransportError::TokenEndpoint { status, message, retry_after }) => {
				assert_eq!(status, 401);
				assert_eq!(message, "{\"error\":\"invalid_client\"}");
				assert_eq!(retry_after, Some(Duration::seconds(12)));
			},
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[tokio::test]
	async fn malformed_body_surfaces_as_extraction_error() {
		let client = TokenClient::with_http_client(
			options("id", "secret"),
			FakeHttpClient::responding(200, "not json"),
		);
		let err = client
			.request_token(&ClientCredentialsGrant::default())
			.await
			.expect_err("Malformed bodies should fail extraction.");

		assert!(matches!(err, Error::Extraction(ExtractionError::Json { .. })));
	}

	#[tokio::test]
	async fn transport_failure_surfaces_as_network_error() {
		let client =
			TokenClient::with_http_client(options("id", "secret"), FakeHttpClient::unreachable());
		let err = client
			.request_token(&ClientCredentialsGrant::default())
			.await
			.expect_err("Unreachable endpoints should fail the exchange.");

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	}

	#[tokio::test]
	async fn custom_extractor_is_used() {
		let extractor = |response: &oauth2::HttpResponse| {
			let raw = String::from_utf8_lossy(response.body()).trim().to_owned();

			if raw.is_empty() {
				return Err(ExtractionError::EmptyAccessToken);
			}

			Ok(Token::new(raw))
		};
		let client = TokenClient::with_http_client(
			options("id", "secret").with_extractor(Arc::new(extractor)),
			FakeHttpClient::responding(200, "opaque-token\n"),
		);
		let token = client
			.request_token(&ClientCredentialsGrant::default())
			.await
			.expect("Custom extractor should accept plain-text bodies.");

		assert_eq!(token.access_token(), "opaque-token");
	}

	#[test]
	fn body_preview_truncates_long_bodies() {
		let long = "x".repeat(300);
		let preview = body_preview(long.as_bytes());

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
		assert_eq!(body_preview(b"  short  "), "short");
	}
}

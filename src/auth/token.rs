//! The bearer token pair handed out by the token endpoint.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token plus the optional refresh token issued alongside it.
///
/// Tokens carry no timestamps; whether one is still usable is decided by the configured
/// [`TokenValidator`](crate::hooks::TokenValidator). A token is never mutated in place, a
/// refresh replaces it wholesale.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
}
impl Token {
	/// Creates a token without a refresh token.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self { access_token: TokenSecret::new(access_token), refresh_token: None }
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(refresh_token));

		self
	}

	/// Returns the raw access token.
	pub fn access_token(&self) -> &str {
		self.access_token.expose()
	}

	/// Returns the raw refresh token, if any.
	pub fn refresh_token(&self) -> Option<&str> {
		self.refresh_token.as_ref().map(TokenSecret::expose)
	}

	/// Formats the `Authorization` header value for this token.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.access_token())
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

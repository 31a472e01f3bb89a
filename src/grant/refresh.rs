// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	grant::{GrantRequest, GrantStrategy, form_encode},
};

/// Refresh token grant: `grant_type=refresh_token&refresh_token=..`.
#[derive(Clone, Debug)]
pub struct RefreshTokenGrant {
	refresh_token: TokenSecret,
}
impl RefreshTokenGrant {
	/// Creates a refresh grant for the given refresh token.
	pub fn new(refresh_token: impl Into<String>) -> Self {
		Self { refresh_token: TokenSecret::new(refresh_token) }
	}

	/// Builds the form body for this grant.
	pub fn body(&self) -> String {
		format!("grant_type=refresh_token&refresh_token={}", form_encode(self.refresh_token.expose()))
	}
}
impl GrantStrategy for RefreshTokenGrant {
	fn handle(&self, request: GrantRequest, _refresh_token: Option<&str>) -> GrantRequest {
		request.with_body(self.body())
	}

	fn grant_type(&self) -> &str {
		"refresh_token"
	}
}

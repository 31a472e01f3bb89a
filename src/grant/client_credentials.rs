// self
use crate::grant::{GrantRequest, GrantStrategy, join_scopes};

/// Client credentials grant for app-only tokens.
///
/// Produces `grant_type=client_credentials`, followed by `&scope=..` when scopes were requested.
#[derive(Clone, Debug, Default)]
pub struct ClientCredentialsGrant {
	scopes: Vec<String>,
}
impl ClientCredentialsGrant {
	/// Creates a client credentials grant requesting `scopes`.
	pub fn new<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { scopes: scopes.into_iter().map(Into::into).collect() }
	}

	/// Builds the form body for this grant.
	pub fn body(&self) -> String {
		if self.scopes.is_empty() {
			"grant_type=client_credentials".into()
		} else {
			format!("grant_type=client_credentials&scope={}", join_scopes(&self.scopes))
		}
	}
}
impl GrantStrategy for ClientCredentialsGrant {
	fn handle(&self, request: GrantRequest, _refresh_token: Option<&str>) -> GrantRequest {
		request.with_body(self.body())
	}

	fn grant_type(&self) -> &str {
		"client_credentials"
	}
}

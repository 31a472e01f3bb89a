// self
use crate::{
	_prelude::*,
	grant::{GrantRequest, GrantStrategy, form_encode, join_scopes},
};

/// Resource owner password credentials grant.
///
/// Produces `grant_type=password&username=..&password=..&scope=..`. Username, password, and
/// each scope are form-encoded; scopes are joined with a single literal space. The `scope` field
/// is always present, with an empty value when no scopes were requested.
#[derive(Clone)]
pub struct PasswordGrant {
	username: String,
	password: String,
	scopes: Vec<String>,
}
impl PasswordGrant {
	/// Creates a password grant for the given credentials and scopes.
	pub fn new<I, S>(username: impl Into<String>, password: impl Into<String>, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			username: username.into(),
			password: password.into(),
			scopes: scopes.into_iter().map(Into::into).collect(),
		}
	}

	/// Builds the form body for this grant.
	pub fn body(&self) -> String {
		format!(
			"grant_type=password&username={}&password={}&scope={}",
			form_encode(&self.username),
			form_encode(&self.password),
			join_scopes(&self.scopes)
		)
	}
}
impl Debug for PasswordGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PasswordGrant")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.field("scopes", &self.scopes)
			.finish()
	}
}
impl GrantStrategy for PasswordGrant {
	fn handle(&self, request: GrantRequest, _refresh_token: Option<&str>) -> GrantRequest {
		request.with_body(self.body())
	}

	fn grant_type(&self) -> &str {
		"password"
	}
}

// self
use crate::{
	_prelude::*,
	grant::{GrantRequest, GrantStrategy},
};

/// Closure-backed grant for flows the crate does not model (ticket exchange, device codes, ...).
///
/// The closure receives the base request and the stored refresh token, when one is known, so a
/// custom refresh flow can still link the new token to the previous one.
pub struct CustomGrant<F> {
	grant_type: String,
	build: F,
}
impl<F> CustomGrant<F>
where
	F: Fn(GrantRequest, Option<&str>) -> GrantRequest + Send + Sync,
{
	/// Wraps `build` under the given grant label.
	pub fn new(grant_type: impl Into<String>, build: F) -> Self {
		Self { grant_type: grant_type.into(), build }
	}
}
impl<F> Debug for CustomGrant<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CustomGrant").field("grant_type", &self.grant_type).finish()
	}
}
impl<F> GrantStrategy for CustomGrant<F>
where
	F: Fn(GrantRequest, Option<&str>) -> GrantRequest + Send + Sync,
{
	fn handle(&self, request: GrantRequest, refresh_token: Option<&str>) -> GrantRequest {
		(self.build)(request, refresh_token)
	}

	fn grant_type(&self) -> &str {
		&self.grant_type
	}
}

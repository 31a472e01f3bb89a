//! Stored-token lookup, validation, and refresh.
//!
//! There is no singleflight guard here: concurrent callers that all see a stale token each run
//! their own refresh, and the last successful save wins.

// self
use crate::{
	_prelude::*,
	auth::Token,
	client::TokenClient,
	error::ConfigError,
	grant::RefreshTokenGrant,
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> TokenClient<C>
where
	C: TokenHttpClient,
{
	/// Returns the current token, refreshing it first when the validator rejects it.
	///
	/// `Ok(None)` means the store holds no token, either because none was ever obtained or
	/// because it was cleared while this call was deciding to refresh. No request is sent in
	/// that case, and none is sent when the stored token passes validation.
	///
	/// # Errors
	///
	/// Storage failures, plus whatever [`refresh_access_token`](Self::refresh_access_token)
	/// reports when a refresh is needed.
	pub async fn fetch_or_refresh_access_token(&self) -> Result<Option<Token>> {
		const KIND: FlowKind = FlowKind::FetchOrRefresh;

		let span = FlowSpan::new(KIND, "fetch_or_refresh_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let Some(current) = self.store.fetch().await? else {
					obs::record_decision(KIND, "no_stored_token");

					return Ok(None);
				};

				if self.validator.validate(&current).await {
					obs::record_decision(KIND, "cached");

					return Ok(Some(current));
				}

				obs::record_decision(KIND, "refresh");

				match self.refresh_access_token().await {
					Ok(token) => Ok(Some(token)),
					// Cleared between validation and refresh.
					Err(Error::NoStoredToken) => {
						obs::record_decision(KIND, "cleared_before_refresh");

						Ok(None)
					},
					Err(e) => Err(e),
				}
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Exchanges the stored refresh token for a new token and saves it, replacing the old one.
	///
	/// Without a custom refresh grant the standard `refresh_token` grant is built from the stored
	/// refresh token. A configured custom grant runs instead and receives the stored refresh token
	/// as its hint. Failures are not retried.
	///
	/// # Errors
	///
	/// - [`Error::NoStoredToken`] when the store is empty.
	/// - [`ConfigError::MissingRefreshToken`] when the stored token has no refresh token and no
	///   custom refresh grant is configured.
	/// - Transport, extraction, and storage errors from the exchange.
	pub async fn refresh_access_token(&self) -> Result<Token> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
		self.refresh_metrics.begin();

		let result = span
			.instrument(async move {
				let current = self.store.fetch().await?.ok_or(Error::NoStoredToken)?;
				let hint = current.refresh_token();
				let token = match &self.refresh_grant {
					Some(grant) => self.exchange(grant.as_ref(), hint).await?,
					None => {
						let refresh = hint.ok_or(ConfigError::MissingRefreshToken)?;

						self.exchange(&RefreshTokenGrant::new(refresh), hint).await?
					},
				};

				self.store.save(token).await.map_err(Error::from)
			})
			.await;

		self.refresh_metrics.finish(&result);
		obs::record_result(KIND, &result);

		result
	}
}

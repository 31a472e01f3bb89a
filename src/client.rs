//! The token client: builds token-endpoint requests, persists results, and decides when to
//! refresh.

mod metrics;
mod refresh;
mod request;

#[cfg(test)] pub(crate) mod fake;

pub use metrics::{RefreshMetrics, RefreshStats};

// self
use crate::{
	_prelude::*,
	grant::GrantStrategy,
	hooks::{AlwaysValid, JsonTokenExtractor, TokenExtractor, TokenValidator},
	http::TokenHttpClient,
	store::{MemoryStore, TokenStore},
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Token client specialized for the crate's default reqwest transport.
pub type ReqwestTokenClient = TokenClient<ReqwestHttpClient>;

/// Construction options for [`TokenClient`].
///
/// Unset collaborators fall back to defaults when the client is built: a [`MemoryStore`], the
/// [`JsonTokenExtractor`], and the [`AlwaysValid`] validator. Note that the default validator
/// never reports a token as stale, so the client only refreshes when a validator is supplied or
/// when [`TokenClient::refresh_access_token`] is called explicitly (for example after a 401).
#[derive(Clone)]
pub struct TokenClientOptions {
	/// Token endpoint URL.
	pub token_endpoint: Url,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Token store; defaults to [`MemoryStore`].
	pub store: Option<Arc<dyn TokenStore>>,
	/// Response extractor; defaults to [`JsonTokenExtractor`].
	pub extractor: Option<Arc<dyn TokenExtractor>>,
	/// Token validator; defaults to [`AlwaysValid`].
	pub validator: Option<Arc<dyn TokenValidator>>,
	/// Grant used for refreshes instead of the standard refresh-token grant.
	pub refresh_grant: Option<Arc<dyn GrantStrategy>>,
}
impl TokenClientOptions {
	/// Creates options for the given endpoint and client credentials.
	pub fn new(
		token_endpoint: Url,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		Self {
			token_endpoint,
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			store: None,
			extractor: None,
			validator: None,
			refresh_grant: None,
		}
	}

	/// Sets the token store.
	pub fn with_store(mut self, store: Arc<dyn TokenStore>) -> Self {
		self.store = Some(store);

		self
	}

	/// Sets the response extractor.
	pub fn with_extractor(mut self, extractor: Arc<dyn TokenExtractor>) -> Self {
		self.extractor = Some(extractor);

		self
	}

	/// Sets the token validator.
	pub fn with_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
		self.validator = Some(validator);

		self
	}

	/// Replaces the standard refresh-token grant used by refreshes.
	pub fn with_refresh_grant(mut self, grant: Arc<dyn GrantStrategy>) -> Self {
		self.refresh_grant = Some(grant);

		self
	}
}
impl Debug for TokenClientOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenClientOptions")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("client_id", &self.client_id)
			.field("store_set", &self.store.is_some())
			.field("extractor_set", &self.extractor.is_some())
			.field("validator_set", &self.validator.is_some())
			.field("refresh_grant_set", &self.refresh_grant.is_some())
			.finish()
	}
}

/// Obtains, stores, validates, and refreshes the bearer token of one OAuth 2.0 client.
///
/// All configuration is fixed at construction; the only mutable state is the token slot in the
/// store. Cloning is cheap and clones share the store and transport.
pub struct TokenClient<C>
where
	C: TokenHttpClient,
{
	http_client: Arc<C>,
	token_endpoint: Url,
	client_id: String,
	client_secret: String,
	store: Arc<dyn TokenStore>,
	extractor: Arc<dyn TokenExtractor>,
	validator: Arc<dyn TokenValidator>,
	refresh_grant: Option<Arc<dyn GrantStrategy>>,
	refresh_metrics: Arc<RefreshMetrics>,
}
impl<C> TokenClient<C>
where
	C: TokenHttpClient,
{
	/// Creates a client that sends token requests through `http_client`.
	pub fn with_http_client(options: TokenClientOptions, http_client: C) -> Self {
		let TokenClientOptions {
			token_endpoint,
			client_id,
			client_secret,
			store,
			extractor,
			validator,
			refresh_grant,
		} = options;
		let store: Arc<dyn TokenStore> = match store {
			Some(store) => store,
			None => Arc::new(MemoryStore::default()),
		};
		let extractor: Arc<dyn TokenExtractor> = match extractor {
			Some(extractor) => extractor,
			None => Arc::new(JsonTokenExtractor),
		};
		let validator: Arc<dyn TokenValidator> = match validator {
			Some(validator) => validator,
			None => Arc::new(AlwaysValid),
		};

		Self {
			http_client: Arc::new(http_client),
			token_endpoint,
			client_id,
			client_secret,
			store,
			extractor,
			validator,
			refresh_grant,
			refresh_metrics: Default::default(),
		}
	}

	/// Token endpoint every grant is sent to.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}

	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Store holding the current token.
	pub fn store(&self) -> &Arc<dyn TokenStore> {
		&self.store
	}

	/// Counters for refresh attempts.
	pub fn refresh_metrics(&self) -> &RefreshMetrics {
		&self.refresh_metrics
	}

	/// Drops the current token, e.g. on sign-out.
	pub async fn clear_token(&self) -> Result<()> {
		self.store.clear().await.map_err(Error::from)
	}
}
#[cfg(feature = "reqwest")]
impl TokenClient<ReqwestHttpClient> {
	/// Creates a client backed by a fresh reqwest transport that does not follow redirects.
	pub fn new(options: TokenClientOptions) -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self::with_http_client(options, ReqwestHttpClient::with_client(client)))
	}
}
impl<C> Clone for TokenClient<C>
where
	C: TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			token_endpoint: self.token_endpoint.clone(),
			client_id: self.client_id.clone(),
			client_secret: self.client_secret.clone(),
			store: self.store.clone(),
			extractor: self.extractor.clone(),
			validator: self.validator.clone(),
			refresh_grant: self.refresh_grant.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
		}
	}
}
impl<C> Debug for TokenClient<C>
where
	C: TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenClient")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("client_id", &self.client_id)
			.field("custom_refresh_grant", &self.refresh_grant.is_some())
			.finish()
	}
}

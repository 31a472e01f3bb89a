//! Crate-wide error types shared by the token client, stores, and interceptor.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token endpoint could not be reached or answered with a non-success status.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint response could not be turned into a token.
	#[error(transparent)]
	Extraction(#[from] ExtractionError),

	/// A refresh was requested while the store holds no token.
	#[error("No stored token is available to refresh.")]
	NoStoredToken,
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Stored token has no refresh token and no custom refresh grant is configured.
	#[error("Stored token is missing a refresh token.")]
	MissingRefreshToken,
	/// Access token cannot be used as a header value.
	#[error("Access token cannot be used as a header value.")]
	InvalidHeaderValue(#[from] oauth2::http::header::InvalidHeaderValue),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, non-success status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred during the HTTP exchange.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during the HTTP exchange.")]
	Io(#[from] std::io::Error),
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint returned HTTP {status}: {message}.")]
	TokenEndpoint {
		/// HTTP status code.
		status: u16,
		/// Preview of the response body.
		message: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Returns the HTTP status for [`TransportError::TokenEndpoint`] failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::TokenEndpoint { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
impl<E> From<oauth2::HttpClientError<E>> for Error
where
	E: 'static + Send + Sync + StdError,
{
	fn from(e: oauth2::HttpClientError<E>) -> Self {
		match e {
			oauth2::HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
			oauth2::HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			oauth2::HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			oauth2::HttpClientError::Other(message) => TransportError::Network {
				source: format!("HTTP client error occurred: {message}.").into(),
			}
			.into(),
			_ => TransportError::Network { source: "Unknown HTTP client error.".into() }.into(),
		}
	}
}

/// Failures raised while turning a token endpoint response into a token.
#[derive(Debug, ThisError)]
pub enum ExtractionError {
	/// Response body is not the expected JSON document.
	#[error("Token endpoint returned malformed JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Response omitted the access token.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
	/// Response carried an empty access token.
	#[error("Token endpoint response carries an empty access_token.")]
	EmptyAccessToken,
}

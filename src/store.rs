//! Storage contract and the built-in in-memory token slot.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::Token};

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend holding the current token of one client.
///
/// A store holds zero or one token, never a collection. Saving overwrites whatever was stored
/// before. Durable or encrypted backends implement this trait outside the crate; the only
/// guarantee callers rely on is that the last saved token is returned by
/// [`fetch`](TokenStore::fetch) until it is cleared or overwritten.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the current token, if one was saved.
	fn fetch(&self) -> StoreFuture<'_, Option<Token>>;

	/// Replaces the current token and returns it.
	fn save(&self, token: Token) -> StoreFuture<'_, Token>;

	/// Drops the current token.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

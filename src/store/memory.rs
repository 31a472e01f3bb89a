//! Thread-safe in-memory [`TokenStore`] implementation.

// self
use crate::{
	_prelude::*,
	auth::Token,
	store::{StoreFuture, TokenStore},
};

type TokenSlot = Arc<RwLock<Option<Token>>>;

/// Keeps the current token in-process; the default store when none is configured.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(TokenSlot);
impl MemoryStore {
	/// Creates a store pre-seeded with a token.
	pub fn with_token(token: Token) -> Self {
		Self(Arc::new(RwLock::new(Some(token))))
	}

	/// Returns a snapshot of the slot without going through the async contract.
	pub fn snapshot(&self) -> Option<Token> {
		self.0.read().clone()
	}
}
impl TokenStore for MemoryStore {
	fn fetch(&self) -> StoreFuture<'_, Option<Token>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn save(&self, token: Token) -> StoreFuture<'_, Token> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = Some(token.clone());

			Ok(token)
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			slot.write().take();

			Ok(())
		})
	}
}

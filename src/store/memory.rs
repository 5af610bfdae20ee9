//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{StoreFuture, TokenStore},
};

type Slot = Arc<RwLock<Option<String>>>;

/// Keeps the token in-process; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Slot);
impl TokenStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, Option<String>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn save<'a>(&'a self, token: &'a str) -> StoreFuture<'a, ()> {
		let slot = self.0.clone();
		let token = token.to_owned();

		Box::pin(async move {
			*slot.write() = Some(token);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = None;

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn save_load_clear_cycle() {
		let store = MemoryStore::default();

		assert_eq!(store.load().await.expect("Load should succeed on an empty store."), None);

		store.save("in-memory-token").await.expect("Save should succeed.");

		assert_eq!(
			store.load().await.expect("Load should succeed after save."),
			Some("in-memory-token".into())
		);

		store.clear().await.expect("Clear should succeed.");
		store.clear().await.expect("Clear should stay idempotent.");

		assert_eq!(store.load().await.expect("Load should succeed after clear."), None);
	}
}

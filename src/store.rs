//! Durable-storage contracts and built-in token store implementations.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::_prelude::*;

/// Boxed future type returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Durable-storage contract for the persisted bearer token.
///
/// The token is the sole persisted state: no profile, no expiry, no refresh secret. An
/// absent value means the client starts logged out.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the persisted token, if any.
	fn load(&self) -> StoreFuture<'_, Option<String>>;

	/// Persists or replaces the token.
	fn save<'a>(&'a self, token: &'a str) -> StoreFuture<'a, ()>;

	/// Removes the persisted token. Must be idempotent and safe when nothing is stored.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_session_error_with_source() {
		let store_error = StoreError::Backend { message: "token file unreachable".into() };
		let session_error: Error = store_error.clone().into();

		assert!(matches!(session_error, Error::Storage(_)));
		assert!(session_error.to_string().contains("token file unreachable"));

		let source = StdError::source(&session_error)
			.expect("Session error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}

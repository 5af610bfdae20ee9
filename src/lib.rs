//! Session, gateway, and navigation-guard layer for single-page admin consoles—persistent
//! bearer sessions, single-flight profile refreshes, and capability-gated routing in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod backend;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod obs;
pub mod route;
pub mod session;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		backend::BackendDescriptor,
		session::CredentialStore,
		store::{MemoryStore, TokenStore},
	};

	/// Builds a descriptor pointing at a mock backend with the default console paths.
	pub fn test_descriptor(base: &str) -> BackendDescriptor {
		BackendDescriptor::builder(
			Url::parse(base).expect("Mock backend base URL should parse successfully."),
		)
		.build()
		.expect("Backend descriptor should build successfully.")
	}

	/// Constructs a [`CredentialStore`] backed by an in-memory token store.
	pub async fn build_test_credentials(base: &str) -> (CredentialStore, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn TokenStore> = store_backend.clone();
		let credentials = CredentialStore::open(test_descriptor(base), store)
			.await
			.expect("Credential store should open against an empty token store.");

		(credentials, store_backend)
	}

	/// Constructs a [`CredentialStore`] with a token pre-seeded in durable storage, matching a
	/// client that restarts with a persisted credential and no cached profile.
	pub async fn build_seeded_credentials(
		base: &str,
		token: &str,
	) -> (CredentialStore, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());

		store_backend.save(token).await.expect("Seeding the in-memory token store should succeed.");

		let store: Arc<dyn TokenStore> = store_backend.clone();
		let credentials = CredentialStore::open(test_descriptor(base), store)
			.await
			.expect("Credential store should open against a seeded token store.");

		(credentials, store_backend)
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};

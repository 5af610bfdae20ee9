//! Request gateway: bearer injection, envelope unwrapping, and error normalization.
//!
//! The gateway is the one place outbound HTTP happens. Every call stamps the current
//! bearer token onto the request when one exists—requests are never blocked waiting for
//! a credential; an absent token simply means the call goes out unauthenticated and the
//! backend decides. Responses are unwrapped so callers see the decoded payload, never
//! the transport envelope, and failures pass through as [`HttpError`] without retries.

// crates.io
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	backend::BackendDescriptor,
	error::{ConfigError, HttpError},
	session::SharedSession,
};

/// Authenticated HTTP gateway bound to one backend descriptor and one shared session.
#[derive(Clone)]
pub struct RequestGateway {
	client: ReqwestClient,
	descriptor: BackendDescriptor,
	session: SharedSession,
}
impl RequestGateway {
	/// Creates a gateway with a freshly built transport.
	pub fn new(descriptor: BackendDescriptor, session: SharedSession) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::http_client_build)?;

		Ok(Self::with_client(descriptor, session, client))
	}

	/// Wraps an existing [`ReqwestClient`], for callers that need custom transport
	/// configuration (proxies, test certificates).
	pub fn with_client(
		descriptor: BackendDescriptor,
		session: SharedSession,
		client: ReqwestClient,
	) -> Self {
		Self { client, descriptor, session }
	}

	/// Returns the backend descriptor this gateway dispatches against.
	pub fn descriptor(&self) -> &BackendDescriptor {
		&self.descriptor
	}

	/// Returns the shared session handle the gateway reads tokens from.
	pub fn session(&self) -> &SharedSession {
		&self.session
	}

	/// Issues a `GET` and decodes the 2xx body as JSON.
	pub async fn get_json<T>(&self, path: &str) -> Result<T, HttpError>
	where
		T: DeserializeOwned,
	{
		let url = self.descriptor.endpoint(path)?;

		self.dispatch(self.client.get(url)).await
	}

	/// Issues a form-encoded `POST` and decodes the 2xx body as JSON.
	///
	/// Form encoding matters: the backend's token-issuance endpoint expects OAuth2-style
	/// form fields and rejects JSON bodies.
	pub async fn post_form<T>(&self, path: &str, fields: &[(&str, &str)]) -> Result<T, HttpError>
	where
		T: DeserializeOwned,
	{
		let url = self.descriptor.endpoint(path)?;

		self.dispatch(self.client.post(url).form(fields)).await
	}

	async fn dispatch<T>(&self, builder: RequestBuilder) -> Result<T, HttpError>
	where
		T: DeserializeOwned,
	{
		let builder = builder.timeout(self.descriptor.timeout);
		let builder = match self.bearer() {
			Some(token) => builder.bearer_auth(token.expose()),
			None => builder,
		};
		let response = builder.send().await?;
		let status = response.status();
		let bytes = response.bytes().await?;

		if !status.is_success() {
			return Err(HttpError::Status {
				status: status.as_u16(),
				body: String::from_utf8_lossy(&bytes).into_owned(),
			});
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|e| HttpError::Decode { source: e })
	}

	fn bearer(&self) -> Option<crate::session::TokenSecret> {
		self.session.read().token().cloned()
	}
}
impl Debug for RequestGateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestGateway")
			.field("base", &self.descriptor.base.as_str())
			.field("timeout", &self.descriptor.timeout)
			.finish()
	}
}

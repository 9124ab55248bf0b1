//! Strategy hooks that map one provider's API shape onto the normalized identity contract.
//!
//! Implementations declare their endpoints through [`ProviderConfig`] and derive the
//! normalized identity from the engine-issued token plus the fetched user-info document,
//! without tying the engine to any provider-specific JSON shape.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	identity::{Extra, Identity},
	provider::ProviderConfig,
};

const CALLBACK_URL_KEY: &str = "callback_url";

/// Per-request parameter and session views consulted for engine-level overrides.
///
/// Only the `callback_url` override is read here; everything else about the request stays
/// with the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestState {
	/// Query/body parameters of the current request.
	pub params: BTreeMap<String, String>,
	/// Session values persisted across the redirect round trip.
	pub session: BTreeMap<String, String>,
}
impl RequestState {
	/// Creates an empty request state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a request parameter.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}

	/// Adds a session value.
	pub fn with_session(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.session.insert(key.into(), value.into());

		self
	}

	/// Looks up an override value, request parameters taking precedence over the session.
	pub fn lookup(&self, key: &str) -> Option<&str> {
		self.params.get(key).or_else(|| self.session.get(key)).map(String::as_str)
	}
}

/// Provider strategy consumed by the engine and the per-attempt adapter.
///
/// Implementors are required to be `Send + Sync`, and the hooks intentionally work on
/// crate-owned data so downstream engines never depend on provider-specific structures.
/// Override only what you need; `extra` and the callback helpers have default
/// implementations.
pub trait Strategy: Send + Sync {
	/// Validated provider configuration.
	fn config(&self) -> &ProviderConfig;

	/// OAuth 2.0 client identifier issued by the provider.
	fn client_id(&self) -> &str;

	/// Optional client secret for confidential clients.
	fn client_secret(&self) -> Option<&str> {
		None
	}

	/// Stable unique identifier for the authenticated user.
	///
	/// Sourced from the token-exchange response parameters, never from the user-info
	/// document; providers may return different identifiers in the two places. A missing
	/// parameter yields `None`, not an error.
	fn uid(&self, token: &AccessToken) -> Option<String>;

	/// Three-field identity projection handed back to the engine.
	fn identity(&self, token: &AccessToken, raw_info: &RawInfo) -> Identity;

	/// Full-document passthrough for consumers that need provider-specific fields.
	fn extra(&self, raw_info: &RawInfo) -> Extra {
		Extra { raw_info: raw_info.clone() }
	}

	/// Path the engine routes this provider's callbacks to.
	///
	/// Defaults to `/auth/<name>/callback`; a `callback_path` configuration override wins.
	fn callback_path(&self) -> String {
		self.config()
			.callback_path
			.clone()
			.unwrap_or_else(|| format!("/auth/{}/callback", self.config().name))
	}

	/// Explicit callback-url override supplied via request params or session state.
	///
	/// `None` means no override was supplied and the engine composes its own host plus
	/// [`Strategy::callback_path`].
	fn callback_url(&self, request: &RequestState) -> Option<String> {
		request.lookup(CALLBACK_URL_KEY).map(str::to_owned)
	}
}

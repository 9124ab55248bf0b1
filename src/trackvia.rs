//! The TrackVia provider strategy.
//!
//! TrackVia splits identity across the two halves of the flow: the canonical user
//! identifier arrives as the `oauth_id` parameter of the token-exchange response, while
//! the profile document served by `/users` carries `username` and `email` (plus a numeric
//! `id` that is NOT the canonical identifier).

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ProviderName},
	identity::{Identity, JsonFieldExt},
	provider::{ProviderConfig, Strategy},
};

/// Registered strategy name.
pub const PROVIDER_NAME: &str = "trackvia";
/// TrackVia site root for relative API calls.
pub const SITE: &str = "https://go.trackvia.com";
/// Consent redirect target.
pub const AUTHORIZE_URL: &str = "https://go.trackvia.com/oauth/authorize";
/// Code-exchange target.
pub const TOKEN_URL: &str = "https://go.trackvia.com/oauth/token";
/// Site-relative path of the current-user endpoint.
pub const USER_INFO_PATH: &str = "users";

const UID_PARAM: &str = "oauth_id";
const USERNAME_FIELD: &str = "username";
const EMAIL_FIELD: &str = "email";

/// TrackVia strategy: stock endpoint declaration plus token-to-identity mapping.
#[derive(Clone)]
pub struct Trackvia {
	config: ProviderConfig,
	client_id: String,
	client_secret: Option<String>,
}
impl Trackvia {
	/// Creates the strategy with the stock TrackVia endpoints.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self { config: stock_config(), client_id: client_id.into(), client_secret: None }
	}

	/// Sets or replaces the client secret used for confidential client auth.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Replaces the stock configuration.
	///
	/// Intended for staging environments and callback-path overrides; the configuration
	/// has already been validated by its builder.
	pub fn with_config(mut self, config: ProviderConfig) -> Self {
		self.config = config;

		self
	}
}
impl Strategy for Trackvia {
	fn config(&self) -> &ProviderConfig {
		&self.config
	}

	fn client_id(&self) -> &str {
		&self.client_id
	}

	fn client_secret(&self) -> Option<&str> {
		self.client_secret.as_deref()
	}

	fn uid(&self, token: &AccessToken) -> Option<String> {
		token.str_param(UID_PARAM)
	}

	fn identity(&self, token: &AccessToken, raw_info: &RawInfo) -> Identity {
		Identity {
			uid: self.uid(token),
			name: raw_info.str_field(USERNAME_FIELD),
			email: raw_info.str_field(EMAIL_FIELD),
		}
	}
}
impl Debug for Trackvia {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Trackvia")
			.field("config", &self.config)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}

fn stock_config() -> ProviderConfig {
	let name =
		ProviderName::new(PROVIDER_NAME).expect("Stock TrackVia provider name should be valid.");

	ProviderConfig::builder(name)
		.site(parse_stock_url(SITE))
		.authorize_url(parse_stock_url(AUTHORIZE_URL))
		.token_url(parse_stock_url(TOKEN_URL))
		.user_info_path(USER_INFO_PATH)
		.build()
		.expect("Stock TrackVia endpoints should validate.")
}

fn parse_stock_url(value: &str) -> Url {
	Url::parse(value).expect("Stock TrackVia URL should parse.")
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::{Value, json};
	// self
	use super::*;

	fn raw_info() -> RawInfo {
		match json!({
			"id": 10000,
			"currency": "USD",
			"country": "US",
			"username": "testuser",
			"email": "example@trackvia.com",
			"verified": true,
		}) {
			Value::Object(map) => map,
			_ => unreachable!(),
		}
	}

	fn token() -> AccessToken {
		let params = match json!({ "oauth_id": "valid_oauth_id" }) {
			Value::Object(map) => map,
			_ => unreachable!(),
		};

		AccessToken::new("token-secret").with_params(params)
	}

	#[test]
	fn stock_configuration_points_at_trackvia() {
		let strategy = Trackvia::new("appid");
		let config = strategy.config();

		assert_eq!(config.name.as_ref(), "trackvia");
		assert_eq!(config.site.as_str(), "https://go.trackvia.com/");
		assert_eq!(config.authorize_url.as_str(), "https://go.trackvia.com/oauth/authorize");
		assert_eq!(config.token_url.as_str(), "https://go.trackvia.com/oauth/token");
		assert_eq!(
			config.user_info_url().expect("Stock user info URL should resolve.").as_str(),
			"https://go.trackvia.com/users",
		);
	}

	#[test]
	fn uid_comes_from_token_params_not_the_profile_id() {
		// The profile document's numeric `id` (10000) must never win over the token's
		// `oauth_id`; the 0.1.0 release got this wrong.
		let strategy = Trackvia::new("appid");

		assert_eq!(strategy.uid(&token()), Some("valid_oauth_id".into()));

		let identity = strategy.identity(&token(), &raw_info());

		assert_eq!(identity.uid.as_deref(), Some("valid_oauth_id"));
	}

	#[test]
	fn identity_maps_username_and_email() {
		let strategy = Trackvia::new("appid");
		let identity = strategy.identity(&token(), &raw_info());

		assert_eq!(
			identity,
			Identity {
				uid: Some("valid_oauth_id".into()),
				name: Some("testuser".into()),
				email: Some("example@trackvia.com".into()),
			},
		);
	}

	#[test]
	fn missing_profile_fields_surface_as_absent_values() {
		let strategy = Trackvia::new("appid");
		let identity = strategy.identity(&AccessToken::new("token-secret"), &RawInfo::new());

		assert_eq!(identity, Identity::default());
	}

	#[test]
	fn extra_passes_the_document_through_unmodified() {
		let strategy = Trackvia::new("appid");
		let raw = raw_info();
		let extra = strategy.extra(&raw);

		assert_eq!(extra.raw_info, raw);
	}

	#[test]
	fn client_credentials_are_exposed_to_the_engine() {
		let strategy = Trackvia::new("appid").with_client_secret("secret");

		assert_eq!(strategy.client_id(), "appid");
		assert_eq!(strategy.client_secret(), Some("secret"));
	}
}

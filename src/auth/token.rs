//! Engine-issued access token model consumed by the adapter.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, identity::JsonFieldExt};

/// Error raised when a token-exchange response cannot back an access token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum AccessTokenError {
	/// Token response omitted the `access_token` field.
	#[error("Token response is missing access_token.")]
	MissingAccessToken,
}

/// Adapter-side view of the token negotiated by the engine.
///
/// Besides the bearer secret, the token retains the entire token-exchange response object,
/// because providers embed out-of-band identity material there (TrackVia returns the
/// canonical user identifier as the `oauth_id` parameter, separate from the profile
/// document).
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
	secret: String,
	token_type: Option<String>,
	expires_at: Option<OffsetDateTime>,
	params: Map<String, Value>,
}
impl AccessToken {
	/// Wraps a bearer secret with no additional response parameters.
	pub fn new(secret: impl Into<String>) -> Self {
		Self { secret: secret.into(), token_type: None, expires_at: None, params: Map::new() }
	}

	/// Parses a token-endpoint JSON body into an access token.
	///
	/// `access_token` is required; `token_type` and `expires_in` are optional, and the whole
	/// body is retained as the parameters mapping. A malformed `expires_in` is treated as
	/// absent rather than failing the exchange result.
	pub fn from_response(
		body: &Map<String, Value>,
		issued_at: OffsetDateTime,
	) -> Result<Self, AccessTokenError> {
		let secret = body.str_field("access_token").ok_or(AccessTokenError::MissingAccessToken)?;
		let token_type = body.str_field("token_type");
		let expires_at = body
			.get("expires_in")
			.and_then(Value::as_i64)
			.filter(|secs| *secs > 0)
			.map(|secs| issued_at + Duration::seconds(secs));

		Ok(Self { secret, token_type, expires_at, params: body.clone() })
	}

	/// Sets the token type reported by the provider.
	pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Sets the absolute expiry instant.
	pub fn with_expires_at(mut self, expires_at: OffsetDateTime) -> Self {
		self.expires_at = Some(expires_at);

		self
	}

	/// Replaces the token-exchange response parameters.
	pub fn with_params(mut self, params: Map<String, Value>) -> Self {
		self.params = params;

		self
	}

	/// Returns the bearer secret. Callers must avoid logging this string.
	pub fn secret(&self) -> &str {
		&self.secret
	}

	/// Returns the token type reported by the provider, if any.
	pub fn token_type(&self) -> Option<&str> {
		self.token_type.as_deref()
	}

	/// Returns the absolute expiry instant, if the provider reported one.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Checks whether the token is expired at the provided instant.
	///
	/// Tokens without an expiry are treated as still valid.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.map(|at| at <= now).unwrap_or(false)
	}

	/// Returns the raw JSON value stored under `key` in the response parameters.
	pub fn param(&self, key: &str) -> Option<&Value> {
		self.params.field(key)
	}

	/// Returns the response parameter under `key` coerced to a string.
	pub fn str_param(&self, key: &str) -> Option<String> {
		self.params.str_field(key)
	}

	/// Returns the full token-exchange response parameters.
	pub fn params(&self) -> &Map<String, Value> {
		&self.params
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("secret", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_at", &self.expires_at)
			.field("params", &self.params.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros::datetime;
	// self
	use super::*;

	fn response_body() -> Map<String, Value> {
		match json!({
			"access_token": "token-secret",
			"token_type": "bearer",
			"expires_in": 300,
			"oauth_id": "valid_oauth_id",
		}) {
			Value::Object(map) => map,
			_ => unreachable!(),
		}
	}

	#[test]
	fn from_response_parses_standard_fields_and_keeps_params() {
		let issued_at = datetime!(2019-04-30 10:00 UTC);
		let token = AccessToken::from_response(&response_body(), issued_at)
			.expect("Response fixture should parse.");

		assert_eq!(token.secret(), "token-secret");
		assert_eq!(token.token_type(), Some("bearer"));
		assert_eq!(token.expires_at(), Some(datetime!(2019-04-30 10:05 UTC)));
		assert_eq!(token.str_param("oauth_id"), Some("valid_oauth_id".into()));
		assert_eq!(token.params().len(), 4);
	}

	#[test]
	fn from_response_requires_access_token() {
		let mut body = response_body();

		body.remove("access_token");

		let err = AccessToken::from_response(&body, datetime!(2019-04-30 10:00 UTC))
			.expect_err("Missing access_token should fail.");

		assert_eq!(err, AccessTokenError::MissingAccessToken);
	}

	#[test]
	fn malformed_expires_in_is_treated_as_absent() {
		let mut body = response_body();

		body.insert("expires_in".into(), Value::String("soon".into()));

		let token = AccessToken::from_response(&body, datetime!(2019-04-30 10:00 UTC))
			.expect("Malformed expires_in should not fail parsing.");

		assert_eq!(token.expires_at(), None);
		assert!(!token.is_expired_at(datetime!(2119-04-30 10:00 UTC)));
	}

	#[test]
	fn expiry_check_uses_the_provided_instant() {
		let token = AccessToken::new("token-secret")
			.with_expires_at(datetime!(2019-04-30 10:05 UTC));

		assert!(!token.is_expired_at(datetime!(2019-04-30 10:04 UTC)));
		assert!(token.is_expired_at(datetime!(2019-04-30 10:05 UTC)));
	}

	#[test]
	fn debug_redacts_the_secret() {
		let token = AccessToken::new("token-secret");
		let rendered = format!("{token:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("token-secret"));
	}
}

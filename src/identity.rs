//! Normalized identity projections derived from the provider's user-info document.

// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// Raw user-info document fetched from the provider, kept as an open-ended JSON object.
pub type RawInfo = serde_json::Map<String, Value>;

/// Three-field identity projection handed back to the engine.
///
/// The struct carries exactly these fields; absent source data surfaces as `None` rather
/// than an error, so the result may be partial but never fails on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	/// Stable unique identifier sourced from the token-exchange response parameters.
	pub uid: Option<String>,
	/// Display name sourced from the user-info document.
	pub name: Option<String>,
	/// Email address sourced from the user-info document.
	pub email: Option<String>,
}

/// Full-document passthrough for consumers that need provider-specific fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extra {
	/// The entire fetched document, unmodified.
	pub raw_info: RawInfo,
}

/// Typed optional-field access over a JSON object.
///
/// Missing keys and incompatible value shapes yield `None`, never an error.
pub trait JsonFieldExt {
	/// Returns the raw JSON value stored under `key`, if any.
	fn field(&self, key: &str) -> Option<&Value>;

	/// Returns the value under `key` coerced to a string.
	///
	/// Strings are cloned, numbers and booleans are rendered; arrays, objects, and `null`
	/// yield `None`.
	fn str_field(&self, key: &str) -> Option<String>;
}
impl JsonFieldExt for RawInfo {
	fn field(&self, key: &str) -> Option<&Value> {
		self.get(key)
	}

	fn str_field(&self, key: &str) -> Option<String> {
		match self.get(key)? {
			Value::String(value) => Some(value.clone()),
			Value::Number(value) => Some(value.to_string()),
			Value::Bool(value) => Some(value.to_string()),
			_ => None,
		}
	}
}

//! TrackVia OAuth 2.0 strategy: declarative provider endpoints plus token-to-identity mapping,
//! ready to hand to any engine that drives the authorization-code exchange.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapter;
pub mod auth;
pub mod error;
pub mod http;
pub mod identity;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod trackvia;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		adapter::Adapter,
		auth::AccessToken,
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		provider::Strategy,
	};

	/// Adapter type alias used by reqwest-backed integration tests.
	pub type ReqwestTestAdapter = Adapter<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs an [`Adapter`] wired to the reqwest transport used across integration tests.
	pub fn build_reqwest_test_adapter(
		strategy: Arc<dyn Strategy>,
		token: AccessToken,
	) -> ReqwestTestAdapter {
		Adapter::with_http_client(
			strategy,
			token,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::{
		error::{Error, Result},
		identity::RawInfo,
	};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};

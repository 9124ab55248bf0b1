//! Per-attempt adapter instances that resolve the normalized identity.

// std
use std::sync::OnceLock;
// crates.io
use async_lock::OnceCell;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	http::UserInfoHttpClient,
	identity::{Extra, Identity},
	oauth::{self, TransportErrorMapper},
	obs::{FetchOutcome, FetchSpan, record_fetch_outcome},
	provider::{RequestState, Strategy},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Adapter specialized for the crate's default reqwest transport stack.
pub type ReqwestAdapter = Adapter<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Resolves one authentication attempt against a provider strategy.
///
/// The engine constructs an adapter after the code exchange completes and discards it once
/// the callback cycle ends. The adapter owns the HTTP client, error mapper, strategy
/// handle, and the engine-issued token; the user-info document is fetched lazily, at most
/// once, and memoized for the instance's lifetime, while identity projections are
/// recomputed on every access. Failures propagate unmodified, with no retry and no
/// fallback.
pub struct Adapter<C, M>
where
	C: ?Sized + UserInfoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for the user-info request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Strategy that declares endpoints and derives the identity projection.
	pub strategy: Arc<dyn Strategy>,
	token: AccessToken,
	raw_info: OnceCell<RawInfo>,
	uid: OnceLock<Option<String>>,
}
impl<C, M> Adapter<C, M>
where
	C: ?Sized + UserInfoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an adapter that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		strategy: Arc<dyn Strategy>,
		token: AccessToken,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			strategy,
			token,
			raw_info: OnceCell::new(),
			uid: OnceLock::new(),
		}
	}

	/// Returns the engine-issued access token backing this attempt.
	pub fn token(&self) -> &AccessToken {
		&self.token
	}

	/// Returns the memoized user-info document, fetching it on first access.
	///
	/// Exactly one network call is made per adapter instance regardless of how many times
	/// [`uid`](Self::uid), [`info`](Self::info), or [`extra`](Self::extra) are invoked.
	pub async fn raw_info(&self) -> Result<&RawInfo> {
		self.raw_info
			.get_or_try_init(|| {
				let provider = self.strategy.config().name.clone();
				let span = FetchSpan::new(provider.as_ref(), "user_info");
				let fetch = async move {
					record_fetch_outcome(provider.as_ref(), FetchOutcome::Attempt);

					let result = oauth::fetch_user_info(
						self.http_client.as_ref(),
						self.transport_mapper.as_ref(),
						self.strategy.config(),
						&self.token,
					)
					.await;

					match &result {
						Ok(_) => record_fetch_outcome(provider.as_ref(), FetchOutcome::Success),
						Err(_) => record_fetch_outcome(provider.as_ref(), FetchOutcome::Failure),
					}

					result
				};

				span.instrument(fetch)
			})
			.await
	}

	/// Returns the stable unique identifier for the authenticated user.
	///
	/// Derived from the token-exchange response parameters and memoized on first access;
	/// no network call is involved. A missing parameter yields `None`.
	pub fn uid(&self) -> Option<&str> {
		self.uid.get_or_init(|| self.strategy.uid(&self.token)).as_deref()
	}

	/// Returns the three-field identity projection.
	///
	/// Recomputed on every call from the memoized user-info document, so the result is
	/// always consistent with the current token and document values.
	pub async fn info(&self) -> Result<Identity> {
		let raw_info = self.raw_info().await?;

		Ok(self.strategy.identity(&self.token, raw_info))
	}

	/// Returns the full-document passthrough for provider-specific consumers.
	pub async fn extra(&self) -> Result<Extra> {
		let raw_info = self.raw_info().await?;

		Ok(self.strategy.extra(raw_info))
	}

	/// Path the engine routes this provider's callbacks to.
	pub fn callback_path(&self) -> String {
		self.strategy.callback_path()
	}

	/// Explicit callback-url override supplied via request params or session state.
	pub fn callback_url(&self, request: &RequestState) -> Option<String> {
		self.strategy.callback_url(request)
	}
}
#[cfg(feature = "reqwest")]
impl Adapter<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new adapter for the provided strategy and token.
	///
	/// The adapter provisions its own reqwest-backed transport so engines do not need to
	/// pass HTTP handles explicitly.
	pub fn new(strategy: Arc<dyn Strategy>, token: AccessToken) -> Self {
		Self::with_http_client(
			strategy,
			token,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for Adapter<C, M>
where
	C: ?Sized + UserInfoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Adapter")
			.field("provider", &self.strategy.config().name)
			.field("token", &self.token)
			.field("raw_info_fetched", &self.raw_info.get().is_some())
			.finish()
	}
}

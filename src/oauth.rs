//! Internal facade over the `oauth2` wire types for the user-info fetch.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ConfigError, TransportError, UserInfoError},
	http::UserInfoHttpClient,
	provider::ProviderConfig,
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Maps HTTP transport failures into strategy [`Error`] values.
///
/// The adapter is a pure passthrough: mapping only reshapes transport errors into crate
/// types, with no classification heuristics and no retry decisions.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a strategy error.
	fn map_transport_error(&self, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => TransportError::from(*inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::Network { source: message.into() }.into(),
			_ => TransportError::Network { source: "Unknown transport failure.".into() }.into(),
		}
	}
}

/// Executes the authenticated user-info GET and decodes the JSON object body.
pub(crate) async fn fetch_user_info<C, M>(
	http_client: &C,
	mapper: &M,
	config: &ProviderConfig,
	token: &AccessToken,
) -> Result<RawInfo>
where
	C: ?Sized + UserInfoHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let url = config.user_info_url()?;
	let request = build_user_info_request(&url, token)?;
	let handle = http_client.handle();
	let response = handle.call(request).await.map_err(|err| mapper.map_transport_error(err))?;

	parse_user_info_response(response)
}

fn build_user_info_request(url: &Url, token: &AccessToken) -> Result<HttpRequest> {
	let request = Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(AUTHORIZATION, format!("Bearer {}", token.secret()))
		.header(ACCEPT, "application/json")
		.body(Vec::new())
		.map_err(ConfigError::HttpRequest)?;

	Ok(request)
}

fn parse_user_info_response(response: HttpResponse) -> Result<RawInfo> {
	let status = response.status();
	let body = response.into_body();

	if !status.is_success() {
		return Err(UserInfoError::Endpoint {
			status: status.as_u16(),
			body_preview: body_preview(&body),
		}
		.into());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		UserInfoError::Parse { source, status: Some(status.as_u16()) }.into()
	})
}

fn body_preview(body: &[u8]) -> Option<String> {
	let text = String::from_utf8_lossy(body);
	let trimmed = text.trim();

	if trimmed.is_empty() {
		return None;
	}

	Some(truncate_preview(trimmed))
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}

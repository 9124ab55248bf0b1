//! Optional observability helpers for the user-info fetch.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_trackvia.fetch` with the
//!   `provider` and `stage` fields.
//! - Enable `metrics` to increment the `oauth2_trackvia_fetch_total` counter for every
//!   attempt/success/failure, labeled by `provider` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each fetch attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
	/// Entry to the user-info fetch.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FetchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchOutcome::Attempt => "attempt",
			FetchOutcome::Success => "success",
			FetchOutcome::Failure => "failure",
		}
	}
}
impl Display for FetchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

// self
use crate::obs::FetchOutcome;

/// Records a fetch outcome via the global metrics recorder (when enabled).
pub fn record_fetch_outcome(provider: &str, outcome: FetchOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_trackvia_fetch_total",
			"provider" => provider.to_owned(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (provider, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_fetch_outcome_noop_without_metrics() {
		record_fetch_outcome("trackvia", FetchOutcome::Failure);
	}
}

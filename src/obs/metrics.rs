// self
use crate::obs::{FlowKind, FlowOutcome};

/// Increments `oauth2_interceptor_flow_total{flow, outcome}` (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_interceptor_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Increments `oauth2_interceptor_token_endpoint_responses_total{grant_type, status_class}`
/// (when enabled).
pub fn record_endpoint_status(grant_type: &str, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_interceptor_token_endpoint_responses_total",
			"grant_type" => grant_type.to_owned(),
			"status_class" => status_class(status)
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (grant_type, status);
	}
}

/// Buckets an HTTP status into a low-cardinality label.
pub fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}

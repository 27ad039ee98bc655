//! Counters of the content filter activity. No exporter is installed by the
//! binary, so these are no-ops unless the embedder installs a recorder.
use metrics::{counter, describe_counter, Unit};

const FILTER_CHECKED: &str = "jokestream_filter_checked_total";
const FILTER_BLOCKED: &str = "jokestream_filter_blocked_total";
const FALLBACK_JOKES: &str = "jokestream_fallback_jokes_total";

/// Registers the descriptions of the metrics in the installed recorder
pub fn describe_metrics() {
    describe_counter!(
        FILTER_CHECKED,
        Unit::Count,
        "Number of jokes evaluated by the content filter"
    );
    describe_counter!(
        FILTER_BLOCKED,
        Unit::Count,
        "Number of jokes rejected by the content filter"
    );
    describe_counter!(
        FALLBACK_JOKES,
        Unit::Count,
        "Number of times the retries were exhausted and the fallback joke was returned"
    );
}

pub(crate) fn record_filter_checks(checked: u64, blocked: u64) {
    counter!(FILTER_CHECKED).increment(checked);
    counter!(FILTER_BLOCKED).increment(blocked);
}

pub(crate) fn record_fallback_joke() {
    counter!(FALLBACK_JOKES).increment(1);
}

use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("advisor_requests_total", "Total number of advice requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter =
        register_counter!("advisor_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("advisor_upstream_failures_total", "Completion calls that produced no answer").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "advisor_upstream_latency_seconds",
        "Completion API latency in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_CLIENTS: Gauge =
        register_gauge!("advisor_rate_limit_clients", "Clients currently tracked by the rate limiter").unwrap();
}

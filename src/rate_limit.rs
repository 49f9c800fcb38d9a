use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::error::AdvisorError;
use crate::metrics::{RATE_LIMITED_TOTAL, RATE_LIMIT_CLIENTS};
use crate::state::AppState;

// Rate limit entry - tracks requests per client in the current window
#[derive(Debug, Clone, Copy)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

// Fixed window limiter, one entry per client identifier
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window,
        }
    }

    // Counts the request and says whether it may proceed. Rejected requests
    // still count, so a client stays rejected until its window rolls over.
    pub fn admit(&self, client_id: &str, now: Instant) -> bool {
        // the shard lock is held for the whole check-and-increment
        match self.entries.entry(client_id.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(RateLimitEntry {
                    count: 1,
                    window_start: now,
                });
                RATE_LIMIT_CLIENTS.inc();
                true
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();

                // window expired..? reset it
                if now.saturating_duration_since(entry.window_start) > self.window {
                    entry.count = 1;
                    entry.window_start = now;
                    return true;
                }

                entry.count = entry.count.saturating_add(1);
                entry.count <= self.max_requests
            }
        }
    }

    // Drops entries whose window has elapsed. Such an entry would be reset by
    // the client's next request anyway, so removing it changes nothing visible.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, e| now.saturating_duration_since(e.window_start) <= self.window);
        let after = self.entries.len();
        RATE_LIMIT_CLIENTS.set(after as f64);
        before.saturating_sub(after)
    }

    pub fn entry(&self, client_id: &str) -> Option<RateLimitEntry> {
        self.entries.get(client_id).map(|e| *e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

// Client identifier: socket IP, or the first X-Forwarded-For hop behind a proxy
pub fn client_id(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// Middleware gating everything it wraps
pub async fn limit_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_id(&request, state.trust_proxy);

    if !state.rate_limiter.admit(&client, Instant::now()) {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(client = %client, "rate limit exceeded");
        return AdvisorError::RateLimited.into_response();
    }

    next.run(request).await
}

// Periodic sweep of stale entries
pub async fn sweeper(limiter: Arc<RateLimiter>, every: Duration) {
    let mut interval = interval(every);

    tracing::info!(interval = ?every, "rate limit sweeper started");

    loop {
        interval.tick().await;

        let removed = limiter.sweep(Instant::now());
        if removed > 0 {
            tracing::debug!(removed, remaining = limiter.len(), "swept stale rate limit entries");
        }
    }
}

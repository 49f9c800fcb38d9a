use std::sync::Arc;
use crate::rate_limit::RateLimiter;
use crate::upstream::CompletionClient;
// app's shared state

pub struct AppState {
    pub completion: Arc<dyn CompletionClient>, // completion API collaborator
    pub model: String,                         // model sent with every call
    pub rate_limiter: Arc<RateLimiter>,
    pub trust_proxy: bool,                     // key clients by X-Forwarded-For
}

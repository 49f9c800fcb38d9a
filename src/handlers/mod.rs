mod advisor;
mod health;
mod metrics;
mod root;

pub use advisor::advisor_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use root::{ROOT_BANNER, root_handler};

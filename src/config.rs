use clap::Parser;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "medical-advisor-gateway")]
#[command(about = "Rate limited gateway between clients and a chat completion API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    // Credential for the completion API
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: String,

    // Completion API base, "/chat/completions" gets appended
    #[arg(long, env = "COMPLETION_API_BASE", default_value = "https://api.groq.com/openai/v1")]
    pub api_base: String,

    // Model identifier sent with every completion call
    #[arg(long, env = "COMPLETION_MODEL", default_value = "llama3-70b-8192")]
    pub model: String,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 30)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW_SECS", default_value_t = 60)]
    pub rate_window: u64,

    // How often stale rate limit entries are swept, 0 keeps them forever
    #[arg(long, env = "RATE_SWEEP_SECS", default_value_t = 60)]
    pub sweep_interval: u64,

    // Timeout for a single completion call in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout: u64,

    // Key clients by the first X-Forwarded-For hop instead of the socket address
    #[arg(long, env = "TRUST_PROXY", default_value_t = false)]
    pub trust_proxy: bool,
}

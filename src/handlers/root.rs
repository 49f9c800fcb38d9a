pub const ROOT_BANNER: &str = "🩺 Medical Advisor API running with Groq AI.";

// plain text banner, no business logic
pub async fn root_handler() -> &'static str {
    ROOT_BANNER
}

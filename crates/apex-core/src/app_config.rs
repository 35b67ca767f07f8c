use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the report service, loaded from environment
/// variables. Every field has a default; nothing is required to start in a
/// development environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Per-image fetch bound. A slow logo degrades to absent, it never holds
    /// the request past this many seconds.
    pub fetch_timeout_secs: u64,
    /// Browser launch and page-load bound for one PDF export.
    pub render_timeout_secs: u64,
    /// How many PDF exports may run at once; further requests queue.
    pub max_concurrent_renders: usize,
    pub user_agent: String,
    /// Explicit Chromium binary path; when absent the browser is discovered
    /// on `PATH`.
    pub chrome_path: Option<PathBuf>,
}

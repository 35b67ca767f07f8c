use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to launch headless browser: {0}")]
    Launch(String),

    #[error("failed to open browser tab: {0}")]
    Tab(String),

    #[error("page navigation failed: {0}")]
    Navigation(String),

    #[error("PDF capture failed: {0}")]
    Capture(String),

    #[error("render task aborted: {0}")]
    TaskJoin(String),
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::PdfError;

/// A4 paper in inches, the unit Chromium's print API expects.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;
/// 20pt page margin on all sides, converted to inches (72pt per inch).
const PAGE_MARGIN_IN: f64 = 20.0 / 72.0;

/// Engine capable of turning a complete HTML document into PDF bytes.
///
/// The trait seam exists so the HTTP layer can be exercised with a stub
/// engine; the production implementation is [`ChromiumExporter`].
#[async_trait]
pub trait PdfEngine: Send + Sync {
    /// Renders `html` to a paginated PDF.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the browser cannot be launched, the document
    /// fails to load, or the capture itself fails.
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError>;
}

/// PDF exporter backed by a headless Chromium instance.
///
/// Each render launches a fresh browser, prints, and tears the process down.
/// The `Browser` value never escapes the blocking closure, so the Chromium
/// process is killed on every exit path, success or failure.
pub struct ChromiumExporter {
    render_timeout: Duration,
    chrome_path: Option<PathBuf>,
}

impl ChromiumExporter {
    #[must_use]
    pub fn new(render_timeout_secs: u64, chrome_path: Option<PathBuf>) -> Self {
        Self {
            render_timeout: Duration::from_secs(render_timeout_secs),
            chrome_path,
        }
    }
}

#[async_trait]
impl PdfEngine for ChromiumExporter {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let data_url = html_data_url(html);
        let timeout = self.render_timeout;
        let chrome_path = self.chrome_path.clone();

        // headless_chrome is a blocking API; keep it off the async runtime.
        tokio::task::spawn_blocking(move || print_to_pdf(&data_url, timeout, chrome_path))
            .await
            .map_err(|e| PdfError::TaskJoin(e.to_string()))?
    }
}

/// Wraps a document in a `data:` URL so the browser needs no web server.
/// All images are already embedded, so loading this URL triggers no
/// network fetches.
fn html_data_url(html: &str) -> String {
    format!(
        "data:text/html;charset=utf-8,{}",
        utf8_percent_encode(html, NON_ALPHANUMERIC)
    )
}

fn print_to_pdf(
    data_url: &str,
    timeout: Duration,
    chrome_path: Option<PathBuf>,
) -> Result<Vec<u8>, PdfError> {
    let started = Instant::now();

    let mut builder = LaunchOptions::default_builder();
    builder
        // Required to run inside constrained containers; the rendered
        // document is produced by this service, not arbitrary web content.
        .sandbox(false)
        .idle_browser_timeout(timeout);
    if let Some(path) = chrome_path {
        builder.path(Some(path));
    }
    let launch_options = builder
        .build()
        .map_err(|e| PdfError::Launch(e.to_string()))?;

    let browser = Browser::new(launch_options).map_err(|e| PdfError::Launch(e.to_string()))?;
    tracing::debug!(elapsed = ?started.elapsed(), "browser launched");

    let tab = browser.new_tab().map_err(|e| PdfError::Tab(e.to_string()))?;
    tab.set_default_timeout(timeout);

    tab.navigate_to(data_url)
        .map_err(|e| PdfError::Navigation(e.to_string()))?
        .wait_until_navigated()
        .map_err(|e| PdfError::Navigation(e.to_string()))?;

    let pdf = tab
        .print_to_pdf(Some(print_options()))
        .map_err(|e| PdfError::Capture(e.to_string()))?;

    tracing::debug!(bytes = pdf.len(), elapsed = ?started.elapsed(), "pdf captured");
    Ok(pdf)
    // `browser` drops here (and on every early return), killing Chromium.
}

/// A4 portrait, printed backgrounds, fixed margins, no browser header/footer.
fn print_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(true),
        display_header_footer: Some(false),
        paper_width: Some(A4_WIDTH_IN),
        paper_height: Some(A4_HEIGHT_IN),
        margin_top: Some(PAGE_MARGIN_IN),
        margin_bottom: Some(PAGE_MARGIN_IN),
        margin_left: Some(PAGE_MARGIN_IN),
        margin_right: Some(PAGE_MARGIN_IN),
        ..Default::default()
    }
}

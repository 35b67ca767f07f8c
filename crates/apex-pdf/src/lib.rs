mod error;
mod exporter;

pub use error::PdfError;
pub use exporter::{ChromiumExporter, PdfEngine};

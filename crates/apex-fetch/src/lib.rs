mod error;
mod resolver;

pub use error::FetchError;
pub use resolver::ImageResolver;

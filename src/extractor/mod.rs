//! Media extraction seam
//!
//! The gateway never understands individual sites. It hands the URL to an
//! [`Extractor`] and gets back the tool's raw metadata document.
//!
//! - [`Extractor`] - trait implemented by extraction backends
//! - [`YtDlpExtractor`] - backend that shells out to the `yt-dlp` binary
//! - [`ExtractionError`] - failures surfaced as HTTP 500

mod traits;
mod ytdlp;

pub use traits::{ExtractionError, Extractor};
pub use ytdlp::YtDlpExtractor;

use std::sync::Arc;

use crate::config::Config;
use crate::extractor::{Extractor, YtDlpExtractor};
use crate::observability::Metrics;
use crate::terabox::{TeraboxClient, UpstreamError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<dyn Extractor>,
    pub terabox: Arc<TeraboxClient>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, extractor: Arc<dyn Extractor>, terabox: TeraboxClient) -> Self {
        Self {
            config: Arc::new(config),
            extractor,
            terabox: Arc::new(terabox),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Production wiring: `yt-dlp` extractor and the configured worker
    pub fn from_config(config: Config) -> Result<Self, UpstreamError> {
        let extractor = Arc::new(YtDlpExtractor::from_config(&config.extractor));
        let terabox = TeraboxClient::new(&config.terabox)?;

        Ok(Self::new(config, extractor, terabox))
    }
}

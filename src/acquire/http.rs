use crate::acquire::metrics::MetricsCollector;
use crate::acquire::{archive, Acquire, AcquirerConfig, Result};
use crate::model::ParsedRow;
use log::info;

/// Downloads the results archive over HTTP and parses it in memory.
#[derive(Debug, Clone)]
pub struct HttpAcquirer {
    client: reqwest::Client,
}

impl HttpAcquirer {
    pub fn new(config: &AcquirerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the raw archive bytes. Non-success statuses are errors.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!("Fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

impl Acquire for HttpAcquirer {
    async fn acquire(&self, source_url: &str, metrics: &mut MetricsCollector) -> Result<Vec<ParsedRow>> {
        archive::read_archive(self.fetch(source_url), metrics).await
    }
}

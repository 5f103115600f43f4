//! Main proxy API
//!
//! Combines the upstream client with the analyzer and converter.

use crate::analyzer;
use crate::client::{ClientConfig, UpstreamClient};
use crate::converter;
use crate::error::Result;
use crate::types::{AnalysisResult, ConversionParams, ConversionResult};

/// Main proxy API
///
/// Holds nothing but an immutable HTTP client, so one instance can be
/// shared across any number of concurrent calls without locking.
#[derive(Debug, Clone)]
pub struct YtMate {
    client: UpstreamClient,
}

impl YtMate {
    /// Create a new proxy against the default upstream
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: UpstreamClient::new()?,
        })
    }

    /// Create a new proxy with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: UpstreamClient::with_config(config)?,
        })
    }

    /// Analyze a source video URL
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> ytmate_core::Result<()> {
    /// use ytmate_core::YtMate;
    /// let proxy = YtMate::new()?;
    /// let analysis = proxy.analyze("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
    /// for option in &analysis.downloads {
    ///     println!("{} ({})", option.quality, option.size);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn analyze(&self, source_url: &str) -> Result<AnalysisResult> {
        analyzer::analyze(&self.client, source_url).await
    }

    /// Request conversion for parameters captured by [`YtMate::analyze`]
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> ytmate_core::Result<()> {
    /// use ytmate_core::YtMate;
    /// let proxy = YtMate::new()?;
    /// let analysis = proxy.analyze("https://youtu.be/dQw4w9WgXcQ").await?;
    /// if let Some(params) = analysis.downloads.iter().find_map(|d| d.conversion_params()) {
    ///     let result = proxy.convert(params).await?;
    ///     println!("{:?}", result.download_url());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn convert(&self, params: &ConversionParams) -> Result<ConversionResult> {
        converter::convert(&self.client, params).await
    }

    /// Upstream base URL in use
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

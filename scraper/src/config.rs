use std::time::Duration;

pub const CHART_URL: &str = "https://movie.douban.com/chart?t=1477886984558";
pub const CDX_URL: &str = "https://web.archive.org/cdx/search/cdx";
pub const WAYBACK_PREFIX: &str = "https://web.archive.org/web";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Everything a run needs to know about where to go and how patiently.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub chart_url: String,
    pub cdx_url: String,
    pub wayback_prefix: String,
    pub user_agent: String,
    pub accept_language: String,
    /// Per-request timeout for the chart page and snapshots
    pub timeout: Duration,
    /// Timeout for the CDX index query, which is slower than page fetches
    pub index_timeout: Duration,
    /// Extra attempts after the first failed one
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff * n`
    pub backoff: Duration,
    pub proxy: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            chart_url: CHART_URL.to_string(),
            cdx_url: CDX_URL.to_string(),
            wayback_prefix: WAYBACK_PREFIX.to_string(),
            user_agent: USER_AGENT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(15),
            index_timeout: Duration::from_secs(20),
            max_retries: 2,
            backoff: Duration::from_millis(1200),
            proxy: None,
        }
    }
}

impl ScraperConfig {
    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    pub fn with_index_timeout_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs {
            self.index_timeout = Duration::from_secs(secs);
        }
        self
    }

    pub fn with_retries(mut self, retries: Option<u32>) -> Self {
        if let Some(retries) = retries {
            self.max_retries = retries;
        }
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_chart_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.chart_url = url;
        }
        self
    }
}

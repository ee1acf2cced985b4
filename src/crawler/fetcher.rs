//! HTTP page fetcher implementation
//!
//! This module handles the requests of a crawl:
//! - Building the HTTP client with the configured user agent and timeout
//! - Building the page URL from the base path, category, query dialect and offset
//! - Issuing one GET per page and classifying failures
//! - Handing the body to the listing parser

use crate::config::{Config, HttpConfig, QueryParam};
use crate::crawler::parser::{parse_listing, ListingSelectors};
use crate::record::CandidateRecord;
use crate::CellarError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A source of listing pages
///
/// The crawl driver only knows this trait, so tests can replace the network
/// with a scripted sequence of pages.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Returns the candidate records listed at `offset` within `category`
    ///
    /// An empty vector means the catalog is exhausted.
    async fn fetch(&self, category: &str, offset: usize)
        -> Result<Vec<CandidateRecord>, CellarError>;
}

/// Builds an HTTP client with the configured user agent and timeout
///
/// # Example
///
/// ```no_run
/// use cellar_crawl::config::HttpConfig;
/// use cellar_crawl::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches listing pages from the storefront over HTTP
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    base_url: String,
    offset_param: String,
    query: Vec<QueryParam>,
    selectors: ListingSelectors,
}

impl HttpPageFetcher {
    /// Creates a fetcher from the catalog, HTTP and selector configuration
    pub fn from_config(config: &Config) -> Result<Self, CellarError> {
        let client = build_http_client(&config.http).map_err(|source| CellarError::Http {
            url: config.catalog.base_url.clone(),
            source,
        })?;

        Ok(Self {
            client,
            base_url: config.catalog.base_url.clone(),
            offset_param: config.catalog.offset_param.clone(),
            query: config.catalog.query.clone(),
            selectors: ListingSelectors::compile(&config.selectors)?,
        })
    }

    /// Builds the URL of the page starting at `offset`
    ///
    /// The category is appended to the base path as-is. The query dialect
    /// parameters come first, in configured order, followed by the offset.
    pub fn page_url(&self, category: &str, offset: usize) -> Result<Url, CellarError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, category))?;

        url.query_pairs_mut()
            .extend_pairs(self.query.iter().map(|p| (p.key.as_str(), p.value.as_str())))
            .append_pair(&self.offset_param, &offset.to_string());

        Ok(url)
    }
}

impl PageSource for HttpPageFetcher {
    /// Issues exactly one GET for the page and parses its listing
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Transport error | `CellarError::Http` |
    /// | Non-2xx status | `CellarError::Status` with the status text |
    /// | 2xx | parsed records, possibly empty |
    async fn fetch(
        &self,
        category: &str,
        offset: usize,
    ) -> Result<Vec<CandidateRecord>, CellarError> {
        let url = self.page_url(category, offset)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CellarError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CellarError::Status {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let body = response.text().await.map_err(|source| CellarError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(parse_listing(&body, &self.selectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher_with(config: &Config) -> HttpPageFetcher {
        HttpPageFetcher::from_config(config).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_page_url_appends_category() {
        let fetcher = fetcher_with(&Config::default());
        let url = fetcher.page_url("wine-14", 0).unwrap();

        assert_eq!(url.host_str(), Some("www.lcbo.com"));
        assert_eq!(url.path(), "/webapp/wcs/stores/servlet/en/lcbo/wine-14");
    }

    #[test]
    fn test_page_url_default_dialect() {
        let fetcher = fetcher_with(&Config::default());
        let url = fetcher.page_url("wine-14", 24).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("pageView".to_string(), "grid".to_string()),
                (
                    "facet_1".to_string(),
                    "vintagesonly:\"VINTAGES ONLY\"".to_string()
                ),
                (
                    "facet_2".to_string(),
                    "instoreonly:\"IN STORE ONLY\"".to_string()
                ),
                ("facetName_1".to_string(), "VINTAGES ONLY".to_string()),
                ("facetName_2".to_string(), "IN STORE ONLY".to_string()),
                ("beginIndex".to_string(), "24".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_url_is_form_encoded() {
        let fetcher = fetcher_with(&Config::default());
        let url = fetcher.page_url("wine-14", 0).unwrap();
        let query = url.query().unwrap();

        assert!(query.contains("facet_1=vintagesonly%3A%22VINTAGES+ONLY%22"));
        assert!(query.contains("facetName_2=IN+STORE+ONLY"));
        assert!(query.ends_with("beginIndex=0"));
    }

    #[test]
    fn test_page_url_custom_offset_param() {
        let mut config = Config::default();
        config.catalog.offset_param = "start".to_string();
        config.catalog.query = vec![QueryParam::new("view", "list")];

        let url = fetcher_with(&config).page_url("beer-3", 48).unwrap();
        assert_eq!(url.query(), Some("view=list&start=48"));
    }

    #[test]
    fn test_from_config_rejects_bad_selector() {
        let mut config = Config::default();
        config.selectors.item = "[[".to_string();
        assert!(matches!(
            HttpPageFetcher::from_config(&config),
            Err(CellarError::Config(_))
        ));
    }
}

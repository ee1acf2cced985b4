use serde::Deserialize;

/// Base path of the LCBO storefront catalog; the category is appended to it
pub const DEFAULT_BASE_URL: &str = "https://www.lcbo.com/webapp/wcs/stores/servlet/en/lcbo/";

/// Category crawled when neither the config file nor the CLI names one
pub const DEFAULT_CATEGORY: &str = "wine-14";

/// Main configuration structure for Cellar-Crawl
///
/// Every table is optional; a missing table takes the defaults below, which
/// describe the VINTAGES-only, in-store-only wine listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Where the catalog lives and which query dialect it speaks
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base path; must end with `/` since the category is appended verbatim
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Catalog section, appended to the base path without validation
    pub category: String,

    /// Name of the query parameter carrying the pagination offset
    #[serde(rename = "offset-param")]
    pub offset_param: String,

    /// Fixed filter/display parameters sent with every page request
    pub query: Vec<QueryParam>,
}

/// One fixed key/value pair of the storefront's query dialect
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

/// Crawl loop configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Optional ceiling on the number of page requests; unset means unbounded
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV destination; stdout when unset
    pub path: Option<String>,
}

/// CSS selectors locating the listing and the fields of each entry
///
/// `item` is matched against the whole document. `chart` is matched inside
/// each item, and the four field selectors inside each chart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub item: String,
    pub chart: String,
    pub name: String,
    pub link: String,
    pub price: String,
    pub score: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            offset_param: "beginIndex".to_string(),
            query: vec![
                QueryParam::new("pageView", "grid"),
                QueryParam::new("facet_1", "vintagesonly:\"VINTAGES ONLY\""),
                QueryParam::new("facet_2", "instoreonly:\"IN STORE ONLY\""),
                QueryParam::new("facetName_1", "VINTAGES ONLY"),
                QueryParam::new("facetName_2", "IN STORE ONLY"),
            ],
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("cellar-crawl/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: "#content .productListingWidget .product_listing_container ul > li".to_string(),
            chart: ".productChart".to_string(),
            name: ".product_name".to_string(),
            link: ".product_name > a".to_string(),
            price: ".product_price > .price".to_string(),
            score: ".product_score > .score".to_string(),
        }
    }
}

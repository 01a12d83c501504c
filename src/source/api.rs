use crate::data::{find_by_symbol, Company, Record};
use crate::source::cache::{CacheMode, CacheStore};
use crate::source::error::SourceError;
use crate::source::http::HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

//the company list is cached under this fixed key
pub const COMPANIES_CACHE_KEY: &str = "companies";

pub const DEFAULT_COMPANIES_URL: &str =
    "https://www.randyconnolly.com/funwebdev/3rd/api/stocks/companies.php";

pub const DEFAULT_HISTORY_URL: &str =
    "https://www.randyconnolly.com/funwebdev/3rd/api/stocks/history.php?symbol={symbol}";

//supplies companies and price history to the dashboard
pub trait DataSource {
    fn companies(&self, mode: CacheMode) -> Result<Vec<Company>, SourceError>;

    fn history(&self, symbol: &str, mode: CacheMode) -> Result<Vec<Record>, SourceError>;

    fn company(&self, symbol: &str, mode: CacheMode) -> Result<Company, SourceError> {
        let companies = self.companies(mode)?;
        find_by_symbol(symbol, &companies)
            .cloned()
            .ok_or_else(|| SourceError::UnknownSymbol(symbol.to_string()))
    }
}

//data source backed by the remote stocks api
pub struct ApiDataSource<C: HttpClient, S: CacheStore> {
    client: C,
    cache: S,
    companies_url: String,
    history_url: String,
    timeout: Duration,
}

impl<C: HttpClient, S: CacheStore> ApiDataSource<C, S> {
    pub fn new(client: C, cache: S) -> Self {
        ApiDataSource {
            client,
            cache,
            companies_url: DEFAULT_COMPANIES_URL.to_string(),
            history_url: DEFAULT_HISTORY_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_companies_url(mut self, url: impl Into<String>) -> Self {
        self.companies_url = url.into();
        self
    }

    //`url` must contain a `{symbol}` placeholder
    pub fn with_history_url(mut self, url: impl Into<String>) -> Self {
        self.history_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache(&self) -> &S {
        &self.cache
    }

    pub fn history_url_for(&self, symbol: &str) -> Result<String, SourceError> {
        let symbol = normalize_symbol(symbol)?;
        Ok(self.history_url.replace("{symbol}", &symbol))
    }

    fn fetch(&self, url: &str) -> Result<String, SourceError> {
        let response = self.client.get(url, self.timeout)?;
        if !response.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }

    fn fetch_cached<T: DeserializeOwned>(
        &self,
        key: &str,
        url: &str,
        mode: CacheMode,
    ) -> Result<T, SourceError> {
        if mode == CacheMode::Use {
            if let Some(body) = self.cache.get(key)? {
                debug!(key, "cache hit");
                return Ok(serde_json::from_str(&body)?);
            }
        }

        info!(url, ?mode, "fetching from api");
        let body = self.fetch(url)?;
        //decode before storing so a bad payload never lands in the cache
        let value = serde_json::from_str(&body)?;

        if mode != CacheMode::Bypass {
            self.cache.put(key, &body)?;
        }

        Ok(value)
    }
}

impl<C: HttpClient, S: CacheStore> DataSource for ApiDataSource<C, S> {
    fn companies(&self, mode: CacheMode) -> Result<Vec<Company>, SourceError> {
        let companies: Vec<Company> =
            self.fetch_cached(COMPANIES_CACHE_KEY, &self.companies_url, mode)?;
        info!(count = companies.len(), "loaded company list");
        Ok(companies)
    }

    fn history(&self, symbol: &str, mode: CacheMode) -> Result<Vec<Record>, SourceError> {
        let symbol = normalize_symbol(symbol)?;
        let url = self.history_url_for(&symbol)?;
        let records: Vec<Record> = self.fetch_cached(&history_cache_key(&symbol), &url, mode)?;
        info!(symbol = %symbol, count = records.len(), "loaded price history");
        Ok(records)
    }
}

pub fn history_cache_key(symbol: &str) -> String {
    format!("history_{}", symbol)
}

//upper-cases a ticker and rejects anything that could escape the url query
pub fn normalize_symbol(symbol: &str) -> Result<String, SourceError> {
    let trimmed = symbol.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= 10
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if !valid {
        return Err(SourceError::InvalidSymbol(symbol.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

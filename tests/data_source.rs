use std::sync::Mutex;
use std::time::Duration;
use tickerboard::prelude::*;
use tickerboard::source::{HttpResponse, COMPANIES_CACHE_KEY};

const COMPANIES_URL: &str = "https://api.test/companies";
const HISTORY_URL: &str = "https://api.test/history?symbol={symbol}";

//records every requested url and serves canned bodies
struct StubClient {
    companies: String,
    history: String,
    status: u16,
    requests: Mutex<Vec<String>>,
}

impl StubClient {
    fn new() -> Self {
        StubClient {
            companies: std::fs::read_to_string("tests/data/companies.json").unwrap(),
            history: std::fs::read_to_string("tests/data/history.json").unwrap(),
            status: 200,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for &StubClient {
    fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, SourceError> {
        self.requests.lock().unwrap().push(url.to_string());
        let body = if url.starts_with(COMPANIES_URL) {
            self.companies.clone()
        } else {
            self.history.clone()
        };
        Ok(HttpResponse {
            status: self.status,
            body,
        })
    }
}

fn source(client: &StubClient) -> ApiDataSource<&StubClient, MemoryCache> {
    ApiDataSource::new(client, MemoryCache::new(Duration::from_secs(60)))
        .with_companies_url(COMPANIES_URL)
        .with_history_url(HISTORY_URL)
}

#[test]
fn company_list_is_fetched_once_then_cached() {
    let client = StubClient::new();
    let source = source(&client);

    let first = source.companies(CacheMode::Use).unwrap();
    let second = source.companies(CacheMode::Use).unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert_eq!(client.requests(), vec![COMPANIES_URL.to_string()]);
    assert!(source.cache().get(COMPANIES_CACHE_KEY).unwrap().is_some());
}

#[test]
fn refresh_skips_the_cached_copy() {
    let client = StubClient::new();
    let source = source(&client);

    source.companies(CacheMode::Use).unwrap();
    source.companies(CacheMode::Refresh).unwrap();

    assert_eq!(client.requests().len(), 2);
}

#[test]
fn bypass_leaves_the_cache_empty() {
    let client = StubClient::new();
    let source = source(&client);

    source.companies(CacheMode::Bypass).unwrap();

    assert!(source.cache().is_empty());
}

#[test]
fn history_uses_the_normalized_symbol() {
    let client = StubClient::new();
    let source = source(&client);

    let records = source.history(" aapl ", CacheMode::Use).unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(
        client.requests(),
        vec!["https://api.test/history?symbol=AAPL".to_string()]
    );

    source.history("AAPL", CacheMode::Use).unwrap();
    assert_eq!(client.requests().len(), 1);
}

#[test]
fn invalid_symbol_never_reaches_the_network() {
    let client = StubClient::new();
    let source = source(&client);

    assert!(matches!(
        source.history("AAPL&x=1", CacheMode::Use),
        Err(SourceError::InvalidSymbol(_))
    ));
    assert!(client.requests().is_empty());
}

#[test]
fn company_lookup_by_symbol() {
    let client = StubClient::new();
    let source = source(&client);

    let amazon = source.company("amzn", CacheMode::Use).unwrap();
    assert_eq!(amazon.name, "Amazon.com Inc.");
    assert!(!amazon.has_financials());

    let apple = source.company("AAPL", CacheMode::Use).unwrap();
    assert!(apple.has_financials());
    assert_eq!(apple.financials.unwrap().by_year().len(), 3);

    assert!(matches!(
        source.company("MSFT", CacheMode::Use),
        Err(SourceError::UnknownSymbol(_))
    ));
}

#[test]
fn error_status_is_surfaced_and_not_cached() {
    let mut client = StubClient::new();
    client.status = 503;
    let source = source(&client);

    assert!(matches!(
        source.companies(CacheMode::Use),
        Err(SourceError::Status { status: 503, .. })
    ));
    assert!(source.cache().is_empty());
}

#[test]
fn undecodable_body_is_not_cached() {
    let mut client = StubClient::new();
    client.companies = "<html>maintenance</html>".to_string();
    let source = source(&client);

    assert!(matches!(
        source.companies(CacheMode::Use),
        Err(SourceError::Decode(_))
    ));
    assert!(source.cache().is_empty());
}

#[test]
fn file_cache_serves_a_later_session() {
    let dir = tempfile::tempdir().unwrap();
    let client = StubClient::new();

    let first = ApiDataSource::new(&client, FileCache::new(dir.path(), Duration::from_secs(60)))
        .with_companies_url(COMPANIES_URL);
    first.companies(CacheMode::Use).unwrap();

    let second = ApiDataSource::new(&client, FileCache::new(dir.path(), Duration::from_secs(60)))
        .with_companies_url(COMPANIES_URL);
    let companies = second.companies(CacheMode::Use).unwrap();

    assert_eq!(companies.len(), 3);
    assert_eq!(client.requests().len(), 1);
}

#[test]
fn prefix_filter_over_fetched_companies() {
    let client = StubClient::new();
    let companies = source(&client).companies(CacheMode::Use).unwrap();

    let matches = find_matches("a", &companies);
    assert_eq!(matches.len(), 3);

    let matches = find_matches("AM", &companies);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].symbol, "AMZN");
}

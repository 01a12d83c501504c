pub mod api;
pub mod cache;
pub mod error;
pub mod http;

pub use api::{
    history_cache_key, normalize_symbol, ApiDataSource, DataSource, COMPANIES_CACHE_KEY,
    DEFAULT_COMPANIES_URL, DEFAULT_HISTORY_URL,
};
pub use cache::{CacheEntry, CacheMode, CacheStore, FileCache, MemoryCache};
pub use error::SourceError;
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};

//a Rust-based terminal dashboard for company profiles and stock price history

pub mod config;
pub mod data;
pub mod render;
pub mod source;
pub mod table;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::DashboardConfig;
    pub use crate::data::{
        find_by_symbol, find_matches, load_companies, load_records, write_records_csv, Company,
        Field, Financials, Record,
    };
    pub use crate::render::{
        company_card, company_list_table, financials_table, history_table, summary_table,
    };
    pub use crate::source::{
        ApiDataSource, CacheMode, CacheStore, DataSource, FileCache, HttpClient, MemoryCache,
        ReqwestHttpClient, SourceError,
    };
    pub use crate::table::{
        sort_by, summarize, Column, ColumnSummary, SortState, Summary, TableError,
        TimeSeriesTable,
    };
}

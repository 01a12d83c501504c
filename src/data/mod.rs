pub mod company;
pub mod loader;
pub mod record;

pub use company::{find_by_symbol, find_matches, Company, FinancialYear, Financials};
pub use loader::{
    load_companies, load_records, load_records_csv, parse_companies_json, parse_records_json,
    write_records_csv,
};
pub use record::{Field, Record};

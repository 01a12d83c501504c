use crate::data::record::Field;
use crate::table::numeric::parse_number;
use serde::{Deserialize, Serialize};

//static reference data for a traded company, as served by the companies endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub subindustry: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub latitude: Option<Field>,
    #[serde(default)]
    pub longitude: Option<Field>,
    #[serde(default)]
    pub financials: Option<Financials>,
}

//multi-year financial figures; each series is indexed the same way as `years`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Financials {
    #[serde(default)]
    pub years: Vec<Field>,
    #[serde(default)]
    pub revenue: Vec<Field>,
    #[serde(default)]
    pub earnings: Vec<Field>,
    #[serde(default)]
    pub assets: Vec<Field>,
    #[serde(default)]
    pub liabilities: Vec<Field>,
}

//one year of financials, with a figure left empty when the api omits it
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialYear {
    pub year: String,
    pub revenue: Option<f64>,
    pub earnings: Option<f64>,
    pub assets: Option<f64>,
    pub liabilities: Option<f64>,
}

impl Financials {
    //zips the parallel series into per-year rows
    pub fn by_year(&self) -> Vec<FinancialYear> {
        let figure = |series: &[Field], index: usize| series.get(index).and_then(parse_number);

        self.years
            .iter()
            .enumerate()
            .map(|(index, year)| FinancialYear {
                year: year.to_string(),
                revenue: figure(&self.revenue, index),
                earnings: figure(&self.earnings, index),
                assets: figure(&self.assets, index),
                liabilities: figure(&self.liabilities, index),
            })
            .collect()
    }
}

impl Company {
    //a company without a financials block is a separate display case, not zeros
    pub fn has_financials(&self) -> bool {
        self.financials
            .as_ref()
            .map(|financials| !financials.years.is_empty())
            .unwrap_or(false)
    }

    //returns (latitude, longitude) when both are present and numeric
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude.as_ref().and_then(parse_number)?;
        let longitude = self.longitude.as_ref().and_then(parse_number)?;
        Some((latitude, longitude))
    }
}

//returns the companies whose names start with `prefix`, ignoring case
pub fn find_matches<'a>(prefix: &str, companies: &'a [Company]) -> Vec<&'a Company> {
    let prefix = prefix.trim().to_lowercase();
    companies
        .iter()
        .filter(|company| company.name.to_lowercase().starts_with(&prefix))
        .collect()
}

//looks a company up by ticker symbol, ignoring case
pub fn find_by_symbol<'a>(symbol: &str, companies: &'a [Company]) -> Option<&'a Company> {
    companies
        .iter()
        .find(|company| company.symbol.eq_ignore_ascii_case(symbol.trim()))
}

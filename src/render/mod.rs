//terminal panels for the dashboard; every function builds a fresh table per call
use crate::data::{Company, Record};
use crate::table::{parse_date, Column, SortState, Summary, TableError};
use prettytable::{Cell, Row, Table};

//formats a monetary value as $1,234.56
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

//formats a count such as volume as 1,234
pub fn format_count(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(value.abs().round() as u64))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn header(labels: &[&str]) -> Row {
    Row::new(labels.iter().map(|label| Cell::new(label)).collect())
}

fn text_row(label: &str, value: &str) -> Row {
    Row::new(vec![Cell::new(label), Cell::new(value)])
}

//the company list panel
pub fn company_list_table(companies: &[&Company]) -> Table {
    let mut table = Table::new();
    table.set_titles(header(&["Symbol", "Name", "Sector"]));

    for company in companies {
        table.add_row(Row::new(vec![
            Cell::new(&company.symbol),
            Cell::new(&company.name),
            Cell::new(company.sector.as_deref().unwrap_or("")),
        ]));
    }

    table
}

//the company info card
pub fn company_card(company: &Company) -> Table {
    let mut table = Table::new();

    table.add_row(text_row("Symbol", &company.symbol));
    table.add_row(text_row("Name", &company.name));

    let optional = [
        ("Sector", &company.sector),
        ("Sub-industry", &company.subindustry),
        ("Exchange", &company.exchange),
        ("Address", &company.address),
        ("Website", &company.website),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            table.add_row(text_row(label, value));
        }
    }

    if let Some((latitude, longitude)) = company.coordinates() {
        table.add_row(text_row(
            "Location",
            &format!("{:.4}, {:.4}", latitude, longitude),
        ));
    }

    if let Some(description) = &company.description {
        table.add_row(text_row("Description", description));
    }

    table
}

//the financials panel; None when the company has no financial data
pub fn financials_table(company: &Company) -> Option<Table> {
    if !company.has_financials() {
        return None;
    }
    let financials = company.financials.as_ref()?;

    let figure = |value: Option<f64>| value.map(format_currency).unwrap_or_else(|| "-".to_string());

    let mut table = Table::new();
    table.set_titles(header(&["Year", "Revenue", "Earnings", "Assets", "Liabilities"]));

    for year in financials.by_year() {
        table.add_row(Row::new(vec![
            Cell::new(&year.year),
            Cell::new(&figure(year.revenue)),
            Cell::new(&figure(year.earnings)),
            Cell::new(&figure(year.assets)),
            Cell::new(&figure(year.liabilities)),
        ]));
    }

    Some(table)
}

//the price history table; the sorted column is marked in its header
pub fn history_table(records: &[Record], sort: SortState) -> Result<Table, TableError> {
    let mut table = Table::new();

    let titles: Vec<String> = Column::ALL
        .iter()
        .map(|&column| {
            if column == sort.column {
                format!("{} ^", column.label())
            } else {
                column.label().to_string()
            }
        })
        .collect();
    table.set_titles(Row::new(titles.iter().map(|t| Cell::new(t)).collect()));

    for (index, record) in records.iter().enumerate() {
        let date = record
            .date
            .as_deref()
            .ok_or_else(|| TableError::InvalidInput(format!("record {} has no date", index)))?;

        let mut cells = vec![Cell::new(&parse_date(date)?.format("%Y-%m-%d").to_string())];
        for column in Column::NUMERIC {
            let value = column.value(record, index)?;
            let text = match column {
                Column::Volume => format_count(value),
                _ => format_currency(value),
            };
            cells.push(Cell::new(&text));
        }
        table.add_row(Row::new(cells));
    }

    Ok(table)
}

//the summary statistics panel
pub fn summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table.set_titles(header(&["", "Average", "Minimum", "Maximum", "Std Dev"]));

    for (column, stats) in summary.iter() {
        let format = |value: f64| match column {
            Column::Volume => format_count(value),
            _ => format_currency(value),
        };

        table.add_row(Row::new(vec![
            Cell::new(column.label()),
            Cell::new(&format(stats.average)),
            Cell::new(&format(stats.minimum)),
            Cell::new(&format(stats.maximum)),
            Cell::new(&stats.std_dev.map(format).unwrap_or_else(|| "-".to_string())),
        ]));
    }

    table.add_row(text_row("Days", &summary.count.to_string()));

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Financials;
    use crate::table::summarize;

    fn company() -> Company {
        Company {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            description: Some("Designs consumer electronics.".to_string()),
            sector: Some("Information Technology".to_string()),
            subindustry: None,
            exchange: Some("NASDAQ".to_string()),
            address: None,
            website: None,
            latitude: Some(37.3229978.into()),
            longitude: Some((-122.0321823).into()),
            financials: None,
        }
    }

    #[test]
    fn currency_and_count_formatting() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.004), "$0.00");
        assert_eq!(format_currency(-1_000_000.0), "-$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_count(37_039_700.0), "37,039,700");
        assert_eq!(format_count(12.0), "12");
    }

    #[test]
    fn card_skips_absent_fields() {
        let card = company_card(&company());
        let text = card.to_string();

        assert!(text.contains("NASDAQ"));
        assert!(text.contains("37.3230, -122.0322"));
        assert!(!text.contains("Website"));
        //symbol, name, sector, exchange, location, description
        assert_eq!(card.len(), 6);
    }

    #[test]
    fn missing_financials_render_nothing() {
        assert!(financials_table(&company()).is_none());

        let mut with_financials = company();
        with_financials.financials = Some(Financials {
            years: vec![2019.0.into(), 2018.0.into()],
            revenue: vec![260_174_000_000.0.into()],
            ..Financials::default()
        });

        let table = financials_table(&with_financials).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.to_string().contains("$260,174,000,000.00"));
    }

    #[test]
    fn history_marks_the_sorted_column() {
        let records = vec![Record::new("1/2/2020", 10.0, 12.0, 9.0, 13.0, "$1,500")];
        let table = history_table(&records, SortState::new(Column::Volume)).unwrap();
        let text = table.to_string();

        assert!(text.contains("Volume ^"));
        assert!(text.contains("2020-01-02"));
        assert!(text.contains("1,500"));
    }

    #[test]
    fn history_surfaces_bad_values() {
        let records = vec![Record::new("2020-01-02", "ten", 12.0, 9.0, 13.0, 1.0)];
        assert!(history_table(&records, SortState::default()).is_err());
    }

    #[test]
    fn summary_has_a_row_per_numeric_column() {
        let records = vec![
            Record::new("2020-01-01", 10.0, 12.0, 9.0, 13.0, 100.0),
            Record::new("2020-01-02", 8.0, 9.0, 7.0, 10.0, 200.0),
        ];
        let table = summary_table(&summarize(&records).unwrap());

        assert_eq!(table.len(), Column::NUMERIC.len() + 1);
        assert!(table.to_string().contains("$9.00"));
    }

    #[test]
    fn company_list_has_one_row_per_company() {
        let apple = company();
        let table = company_list_table(&[&apple]);
        assert_eq!(table.len(), 1);
        assert!(table.to_string().contains("Apple Inc."));
    }
}

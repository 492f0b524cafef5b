use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use super::rows::CountryRow;

/// Countries at or below this population are dropped before layout.
pub const MIN_POPULATION: u64 = 10_000_000;

pub fn load_rows(path: &str) -> Result<Vec<CountryRow>> {
    let file = File::open(Path::new(path))
        .with_context(|| format!("failed to open population dataset at {path}"))?;

    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for (line, record) in reader.deserialize::<CountryRow>().enumerate() {
        let row = record.with_context(|| format!("invalid CSV record {} in {path}", line + 1))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Keeps the rows worth charting, preserving dataset order. An empty
/// result is valid and renders zero bubbles.
pub fn filter_rows(rows: Vec<CountryRow>) -> Vec<CountryRow> {
    rows.into_iter()
        .filter(|row| row.value > MIN_POPULATION)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, value: u64, region: &str) -> CountryRow {
        CountryRow {
            key: key.to_string(),
            value,
            region: region.to_string(),
        }
    }

    #[test]
    fn filter_keeps_only_rows_above_threshold() {
        let rows = vec![
            row("China", 1_415_045_928, "Asia"),
            row("Iceland", 337_780, "Europe"),
            row("Ecuador", 16_863_425, "Americas"),
            row("Fiji", 912_241, "Oceania"),
        ];

        let kept = filter_rows(rows.clone());

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| rows.contains(r)));
        assert!(kept.iter().all(|r| r.value > MIN_POPULATION));
        assert_eq!(kept[0].key, "China");
        assert_eq!(kept[1].key, "Ecuador");
    }

    #[test]
    fn filter_drops_exact_threshold() {
        let kept = filter_rows(vec![row("Edge", MIN_POPULATION, "Asia")]);
        assert!(kept.is_empty());
    }

    #[test]
    fn filter_of_nothing_is_nothing() {
        assert!(filter_rows(Vec::new()).is_empty());
    }

    #[test]
    fn parses_csv_records() {
        let text = "key,value,region\nChina,1415045928,Asia\nSpain,46397452,Europe\n";
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows = reader
            .deserialize::<CountryRow>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], row("China", 1_415_045_928, "Asia"));
        assert_eq!(rows[1], row("Spain", 46_397_452, "Europe"));
    }

    #[test]
    fn malformed_population_is_an_error() {
        let text = "key,value,region\nNowhere,not-a-number,Asia\n";
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let result = reader
            .deserialize::<CountryRow>()
            .collect::<Result<Vec<_>, _>>();

        assert!(result.is_err());
    }
}

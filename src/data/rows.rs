use serde::Deserialize;

/// One record of the population dataset. Immutable after load.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CountryRow {
    /// Country name, unique within the dataset.
    pub key: String,
    /// Population count.
    pub value: u64,
    /// Continent name. Kept as a free string; unknown values get the
    /// fallback color rather than failing.
    pub region: String,
}

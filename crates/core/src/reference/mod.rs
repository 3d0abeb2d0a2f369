//! Reference data: vehicle name suggestions and the region → fee table.
//!
//! Region labels are compared through [`normalize`], so `"lazio"`,
//! `" LAZIO "` and `"Làzio"` all resolve to the same entry.

pub mod defaults;
pub mod loader;

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub use loader::{
    load_reference_data, parse_regions, parse_vehicles, Dataset, ReferenceData,
    ReferenceFallback, ReferenceSource,
};

/// Case-, diacritic- and whitespace-insensitive key for region labels.
///
/// Typographic apostrophes fold to `'`; apostrophes themselves are kept, so
/// `"Valle d'Aosta"` and `"Valle dAosta"` stay distinct.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(fold_apostrophe)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_apostrophe(ch: char) -> char {
    match ch {
        '\u{2018}' | '\u{2019}' | '\u{02BC}' | '\u{0060}' | '\u{00B4}' => '\'',
        other => other,
    }
}

/// One region as published in the reference data. Accepts both the
/// `{region, fee}` and the `{regione, tariffa}` shapes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFee {
    #[serde(alias = "regione")]
    pub region: String,
    #[serde(alias = "tariffa", default)]
    pub fee: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionEntry {
    pub label: String,
    pub fee: Option<Decimal>,
}

/// Immutable lookup table keyed by normalized region label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionFeeTable {
    entries: HashMap<String, RegionEntry>,
    order: Vec<String>,
}

impl RegionFeeTable {
    /// Later entries replace earlier ones with the same normalized label.
    pub fn build<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<Decimal>)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (label, fee) in entries {
            let label = label.into();
            let key = normalize(&label);
            if key.is_empty() {
                continue;
            }
            if !table.entries.contains_key(&key) {
                table.order.push(key.clone());
            }
            table.entries.insert(key, RegionEntry { label, fee });
        }
        table
    }

    pub fn from_records(records: Vec<RegionFee>) -> Self {
        Self::build(records.into_iter().map(|record| (record.region, record.fee)))
    }

    pub fn get(&self, label: &str) -> Option<&RegionEntry> {
        self.entries.get(&normalize(label))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn lookup(&self, label: &str) -> Option<Decimal> {
        self.get(label).and_then(|entry| entry.fee)
    }

    /// Entries in order of first appearance.
    pub fn regions(&self) -> impl Iterator<Item = &RegionEntry> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Vehicle suggestions whose normalized name contains the normalized query.
/// A blank query returns everything.
pub fn suggest_vehicles<'a>(vehicles: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = normalize(query);
    vehicles
        .iter()
        .filter(|name| needle.is_empty() || normalize(name).contains(&needle))
        .map(String::as_str)
        .collect()
}

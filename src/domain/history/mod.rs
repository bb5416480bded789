//! Transaction history — records, category filters, row projection.
//!
//! The per-record narration (titles, attribute lines) comes from the
//! external event formatter; this module owns the container, the filters,
//! and which rows are ready to render.

pub mod wire;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::shared::fmt::{nice_date, NiceDate};
use crate::shared::Asset;
use self::wire::EffectRecord;

// ─── Categories & filters ────────────────────────────────────────────────────

/// The four filterable effect categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    Trade,
    Account,
    Signer,
    Trustline,
}

impl EffectCategory {
    /// Category of a record kind: the segment before the first `_`
    /// (`account_credited` → Account, bare `trade` → Trade).
    pub fn of(kind: &str) -> Option<Self> {
        match kind.split('_').next() {
            Some("trade") => Some(EffectCategory::Trade),
            Some("account") => Some(EffectCategory::Account),
            Some("signer") => Some(EffectCategory::Signer),
            Some("trustline") => Some(EffectCategory::Trustline),
            _ => None,
        }
    }
}

/// Which categories the view currently shows. Everything on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFilters {
    pub trade: bool,
    pub account: bool,
    pub signer: bool,
    pub trustline: bool,
}

impl Default for HistoryFilters {
    fn default() -> Self {
        Self {
            trade: true,
            account: true,
            signer: true,
            trustline: true,
        }
    }
}

impl HistoryFilters {
    pub fn enabled(&self, category: EffectCategory) -> bool {
        match category {
            EffectCategory::Trade => self.trade,
            EffectCategory::Account => self.account,
            EffectCategory::Signer => self.signer,
            EffectCategory::Trustline => self.trustline,
        }
    }

    pub fn toggle(&mut self, category: EffectCategory) {
        match category {
            EffectCategory::Trade => self.trade = !self.trade,
            EffectCategory::Account => self.account = !self.account,
            EffectCategory::Signer => self.signer = !self.signer,
            EffectCategory::Trustline => self.trustline = !self.trustline,
        }
    }
}

// ─── Externally formatted details ────────────────────────────────────────────

/// Pre-formatted narration for one record, supplied by the external event
/// formatter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffectDetails {
    pub title: String,
    /// Fine-grained category, e.g. `account_created`.
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub attributes: Vec<EffectAttribute>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffectAttribute {
    pub header: String,
    pub value: String,
    /// Set when the value is an asset amount; renderers show the asset
    /// card on hover.
    #[serde(default)]
    pub asset: Option<Asset>,
}

// ─── Container & rows ────────────────────────────────────────────────────────

/// App-owned history: the record stream plus lazily arriving details.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    records: Vec<EffectRecord>,
    details: HashMap<String, EffectDetails>,
}

/// One renderable row.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow<'a> {
    pub record: &'a EffectRecord,
    pub details: &'a EffectDetails,
    pub date: NiceDate,
}

/// Rows ready under the current filters, plus the loading progress.
#[derive(Debug, Clone)]
pub struct HistoryRows<'a> {
    pub rows: Vec<HistoryRow<'a>>,
    pub loaded: usize,
    pub total: usize,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fetched page of records.
    pub fn append_records(&mut self, records: Vec<EffectRecord>) {
        self.records.extend(records);
    }

    /// Details arrive out of order as the formatter catches up.
    pub fn insert_details(&mut self, record_id: impl Into<String>, details: EffectDetails) {
        self.details.insert(record_id.into(), details);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with details present and their category filter on, in
    /// stream order. `loaded` counts detail arrivals regardless of
    /// filtering, so the progress bar doesn't jump when filters change.
    pub fn rows(&self, filters: &HistoryFilters) -> HistoryRows<'_> {
        let mut rows = Vec::new();
        let mut loaded = 0;

        for record in &self.records {
            let Some(details) = self.details.get(&record.id) else {
                continue;
            };
            loaded += 1;
            let visible = EffectCategory::of(&record.kind)
                .map(|category| filters.enabled(category))
                .unwrap_or(false);
            if visible {
                rows.push(HistoryRow {
                    record,
                    details,
                    date: nice_date(&details.created_at),
                });
            }
        }

        HistoryRows {
            rows,
            loaded,
            total: self.records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, kind: &str) -> EffectRecord {
        EffectRecord {
            id: id.to_string(),
            kind: kind.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
            transaction_hash: format!("hash-{}", id),
            ledger: Some(123),
        }
    }

    fn details(title: &str, category: &str) -> EffectDetails {
        EffectDetails {
            title: title.to_string(),
            category: category.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
            attributes: vec![EffectAttribute {
                header: "AMOUNT: ".into(),
                value: "10.5".into(),
                asset: Some(Asset::Native),
            }],
        }
    }

    #[test]
    fn test_category_of_kind() {
        assert_eq!(EffectCategory::of("trade"), Some(EffectCategory::Trade));
        assert_eq!(
            EffectCategory::of("account_credited"),
            Some(EffectCategory::Account)
        );
        assert_eq!(
            EffectCategory::of("trustline_created"),
            Some(EffectCategory::Trustline)
        );
        assert_eq!(EffectCategory::of("data_created"), None);
    }

    #[test]
    fn test_rows_wait_for_details() {
        let mut history = HistoryState::new();
        history.append_records(vec![record("1", "trade"), record("2", "account_credited")]);

        let rows = history.rows(&HistoryFilters::default());
        assert_eq!(rows.rows.len(), 0);
        assert_eq!(rows.loaded, 0);
        assert_eq!(rows.total, 2);

        history.insert_details("1", details("Traded", "trade"));
        let rows = history.rows(&HistoryFilters::default());
        assert_eq!(rows.rows.len(), 1);
        assert_eq!(rows.loaded, 1);
        assert_eq!(rows.rows[0].details.title, "Traded");
        assert_eq!(rows.rows[0].date.date, "Aug 7, 2026");
    }

    #[test]
    fn test_filters_hide_categories_without_losing_progress() {
        let mut history = HistoryState::new();
        history.append_records(vec![record("1", "trade"), record("2", "account_credited")]);
        history.insert_details("1", details("Traded", "trade"));
        history.insert_details("2", details("Received", "account_credited"));

        let mut filters = HistoryFilters::default();
        filters.toggle(EffectCategory::Trade);

        let rows = history.rows(&filters);
        assert_eq!(rows.rows.len(), 1);
        assert_eq!(rows.rows[0].record.id, "2");
        assert_eq!(rows.loaded, 2);
    }

    #[test]
    fn test_unknown_kinds_never_render() {
        let mut history = HistoryState::new();
        history.append_records(vec![record("1", "data_created")]);
        history.insert_details("1", details("Data", "data_created"));

        let rows = history.rows(&HistoryFilters::default());
        assert!(rows.rows.is_empty());
        assert_eq!(rows.loaded, 1);
    }

    #[test]
    fn test_effect_record_deserializes() {
        let json = r#"{
            "id": "0012345",
            "type": "account_credited",
            "created_at": "2026-08-07T12:00:00Z",
            "transaction_hash": "deadbeef"
        }"#;
        let record: EffectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, "account_credited");
        assert_eq!(record.ledger, None);
    }
}

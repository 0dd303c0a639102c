//! Witness CSV materialisation.
//!
//! Re-walking the safe range to collect the witness row indices for a
//! rule already happened in the extractor; this module only renders
//! those stored indices into the documented CSV row format. Kept
//! separate from `extractor.rs` because it is pure presentation, not
//! part of the engine's tested contract.

use crate::data::Dataset;
use crate::rule::Rule;

/// Header row: `RowIndex, Timestamp, Attr1_Col{k}_t-{d}, ..., X(t+1), ..., X(t+H)`.
#[must_use]
pub fn witness_csv_header(rule: &Rule) -> String {
    let mut cols = vec!["RowIndex".to_string(), "Timestamp".to_string()];
    for (i, lit) in rule.literals.iter().enumerate() {
        cols.push(format!("Attr{}_Col{}_t-{}", i + 1, lit.attribute, lit.delay));
    }
    for h in 1..=rule.horizon.len() {
        cols.push(format!("X(t+{h})"));
    }
    cols.join(",")
}

/// One CSV row per witness row index: `attr_name(timestamp_at_t-d)` when
/// the literal held, `0` otherwise, then `X(t+h)` per horizon (`-` past
/// the end of data).
#[must_use]
pub fn witness_csv_rows(dataset: &Dataset, rule: &Rule) -> Vec<String> {
    rule.witnesses
        .iter()
        .map(|&t| witness_row(dataset, rule, t))
        .collect()
}

fn witness_row(dataset: &Dataset, rule: &Rule, t: usize) -> String {
    let mut fields = vec![t.to_string(), dataset.timestamp(t).to_string()];
    for lit in &rule.literals {
        let past = t as i64 - i64::from(lit.delay);
        if past >= 0 && dataset.attr(past, lit.attribute as usize).is_one() {
            fields.push(format!("{}({})", dataset.attr_name(lit.attribute as usize), dataset.timestamp(past as usize)));
        } else {
            fields.push("0".to_string());
        }
    }
    for h in 1..=rule.horizon.len() {
        match dataset.x(t as i64 + h as i64) {
            Some(x) => fields.push(x.to_string()),
            None => fields.push("-".to_string()),
        }
    }
    fields.join(",")
}

//! TSV summary writer: one rule per line, literals encoded as
//! `attr_name(t-d)`.

use crate::data::Dataset;
use crate::rule::Rule;

fn literal_string(dataset: &Dataset, literal: &crate::rule::Literal) -> String {
    format!("{}(t-{})", dataset.attr_name(literal.attribute as usize), literal.delay)
}

/// One tab-separated line per rule: the literal set, then support count,
/// negative count, support rate, and the quality flags.
#[must_use]
pub fn tsv_summary_row(dataset: &Dataset, rule: &Rule) -> String {
    let literals = rule
        .literals
        .iter()
        .map(|l| literal_string(dataset, l))
        .collect::<Vec<_>>()
        .join(" & ");
    format!(
        "{}\t{}\t{}\t{:.6}\t{}\t{}",
        literals, rule.support_count, rule.negative_count, rule.support_rate, rule.high_support, rule.low_variance
    )
}

#[must_use]
pub fn tsv_summary(dataset: &Dataset, rules: &[Rule]) -> String {
    let header = "Literals\tSupportCount\tNegativeCount\tSupportRate\tHighSupport\tLowVariance";
    let mut lines = vec![header.to_string()];
    lines.extend(rules.iter().map(|r| tsv_summary_row(dataset, r)));
    lines.join("\n")
}

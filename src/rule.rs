//! Rule data model.

/// One literal `A_i(t - d_i) = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Literal {
    pub attribute: u32,
    pub delay: u32,
}

/// A normalised, deduplicated rule: literals sorted by ascending
/// attribute id, plus the statistical summary needed to judge and
/// report it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub literals: Vec<Literal>,
    /// `(mean, sigma)` for each `h in 1..=H`.
    pub horizon: Vec<(f64, f64)>,
    pub support_count: u64,
    pub negative_count: u64,
    pub support_rate: f64,
    pub high_support: bool,
    pub low_variance: bool,
    pub witnesses: Vec<usize>,
}

impl Rule {
    /// Key used for **per-trial** deduplication: the attribute set only,
    /// delays excluded.
    #[must_use]
    pub fn attribute_key(&self) -> Vec<u32> {
        self.literals.iter().map(|l| l.attribute).collect()
    }

    /// Key used for **global-pool** deduplication: the full normalised
    /// `(attribute, delay)` sequence.
    #[must_use]
    pub fn literal_key(&self) -> Vec<(u32, u32)> {
        self.literals.iter().map(|l| (l.attribute, l.delay)).collect()
    }

    #[must_use]
    pub fn max_abs_mean(&self) -> f64 {
        self.horizon.iter().map(|(m, _)| m.abs()).fold(0.0, f64::max)
    }

    #[must_use]
    pub fn max_sigma(&self) -> f64 {
        self.horizon.iter().map(|(_, s)| *s).fold(0.0, f64::max)
    }
}

/// Collapse a raw traversal chain (`attr_chain[1..=d]`, `delay_chain`)
/// into a normalised, ascending-by-attribute literal set. A judgement
/// node chain may revisit the same attribute with different delays;
/// only one survives, keeping the delay from the first occurrence.
#[must_use]
pub fn normalise_chain(chain: &[(u32, u32)]) -> Vec<Literal> {
    let mut first_delay: std::collections::BTreeMap<u32, u32> = std::collections::BTreeMap::new();
    for &(attr, delay) in chain {
        first_delay.entry(attr).or_insert(delay);
    }
    first_delay
        .into_iter()
        .map(|(attribute, delay)| Literal { attribute, delay })
        .collect()
}

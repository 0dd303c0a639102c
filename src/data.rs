//! Data view: an immutable view over the binary attribute matrix,
//! target series, and timestamps.

use crate::error::MiningError;

/// A single attribute cell. Any non-binary value is treated as missing,
/// enforced once here rather than re-checked on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue {
    Zero,
    One,
    Missing,
}

impl AttrValue {
    #[must_use]
    pub fn is_one(self) -> bool {
        matches!(self, AttrValue::One)
    }

    #[must_use]
    pub fn is_missing(self) -> bool {
        matches!(self, AttrValue::Missing)
    }

    #[must_use]
    pub fn from_raw(v: u8) -> AttrValue {
        match v {
            0 => AttrValue::Zero,
            1 => AttrValue::One,
            _ => AttrValue::Missing,
        }
    }
}

/// Immutable dataset consumed by the core. Constructed once per run and
/// shared read-only with the whole engine.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: usize,
    attributes: usize,
    /// Row-major: `attr[t * attributes + k]`.
    attr: Vec<AttrValue>,
    x: Vec<f64>,
    timestamp: Vec<Box<str>>,
    attr_name: Vec<Box<str>>,
}

impl Dataset {
    /// # Errors
    /// Returns [`MiningError::BadShape`] if `x`, `timestamp`, `attr_name`
    /// or the rows of `attr` disagree in length.
    pub fn new(
        attr: Vec<Vec<u8>>,
        x: Vec<f64>,
        timestamp: Vec<String>,
        attr_name: Vec<String>,
    ) -> Result<Dataset, MiningError> {
        let records = x.len();
        if timestamp.len() != records {
            return Err(MiningError::BadShape(format!(
                "timestamp length {} != record count {}",
                timestamp.len(),
                records
            )));
        }
        if attr.len() != records {
            return Err(MiningError::BadShape(format!(
                "attribute matrix has {} rows, expected {}",
                attr.len(),
                records
            )));
        }
        let attributes = attr_name.len();
        for (t, row) in attr.iter().enumerate() {
            if row.len() != attributes {
                return Err(MiningError::BadShape(format!(
                    "row {t} has {} attribute columns, expected {attributes}",
                    row.len()
                )));
            }
        }

        let mut flat = Vec::with_capacity(records * attributes);
        for row in &attr {
            flat.extend(row.iter().map(|&v| AttrValue::from_raw(v)));
        }

        Ok(Dataset {
            records,
            attributes,
            attr: flat,
            x,
            timestamp: timestamp.into_iter().map(String::into_boxed_str).collect(),
            attr_name: attr_name.into_iter().map(String::into_boxed_str).collect(),
        })
    }

    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    #[must_use]
    pub fn attributes(&self) -> usize {
        self.attributes
    }

    #[must_use]
    pub fn attr_name(&self, k: usize) -> &str {
        &self.attr_name[k]
    }

    /// `attr(t, k)`. Out-of-range `t` (a past reference before row 0)
    /// returns the sentinel "missing" value.
    #[must_use]
    pub fn attr(&self, t: i64, k: usize) -> AttrValue {
        if t < 0 || t as usize >= self.records {
            return AttrValue::Missing;
        }
        self.attr[t as usize * self.attributes + k]
    }

    /// `x(t)`. `None` for out-of-range `t` (a future prediction beyond
    /// the end of data).
    #[must_use]
    pub fn x(&self, t: i64) -> Option<f64> {
        if t < 0 || t as usize >= self.records {
            return None;
        }
        Some(self.x[t as usize])
    }

    #[must_use]
    pub fn timestamp(&self, t: usize) -> &str {
        &self.timestamp[t]
    }

    /// `(t_start, t_end)`, half-open: only rows in `[t_start, t_end)`
    /// start a traversal.
    #[must_use]
    pub fn safe_range(&self, max_delay: u32, horizon: u32) -> (usize, usize) {
        let t_start = max_delay as usize;
        let t_end = self.records.saturating_sub(horizon as usize);
        (t_start, t_end.max(t_start))
    }
}

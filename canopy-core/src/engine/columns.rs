//! Precomputed indicator columns, keyed by column name.

use std::collections::HashMap;

/// The output of the precompute stage: one full-length series per
/// extracted indicator, plus the first-occurrence column order so
/// downstream output stays deterministic.
#[derive(Debug, Default, Clone)]
pub struct IndicatorColumns {
    order: Vec<String>,
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column. Re-inserting an existing name replaces its
    /// series without duplicating the order entry.
    pub fn insert(&mut self, name: String, values: Vec<f64>) {
        if !self.series.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.series.insert(name, values);
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Columns in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.order.iter().map(|name| {
            (
                name.as_str(),
                self.series[name].as_slice(),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut columns = IndicatorColumns::new();
        columns.insert("sma_20".into(), vec![1.0]);
        columns.insert("rsi_14".into(), vec![2.0]);
        columns.insert("atr_5".into(), vec![3.0]);
        let names: Vec<&str> = columns.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["sma_20", "rsi_14", "atr_5"]);
    }

    #[test]
    fn reinsert_replaces_without_duplicating() {
        let mut columns = IndicatorColumns::new();
        columns.insert("sma_20".into(), vec![1.0]);
        columns.insert("sma_20".into(), vec![9.0]);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns.get("sma_20"), Some([9.0].as_slice()));
    }
}

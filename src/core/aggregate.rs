//! Planned vs. executed aggregation
//!
//! Two independent views over a record subset: overall totals (KPIs and the
//! summary chart) and sums grouped by (diameter, method) for the breakdown
//! chart. Both are recomputed from scratch on every pipeline run.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::dataset::{fields, Record};

/// Totals over a subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// One per record, regardless of bucket contributions
    pub count: usize,
    pub planned: f64,
    pub executed: f64,
    pub difference: f64,
    /// Zero when nothing was planned
    pub percentage: f64,
}

impl Summary {
    pub fn compute(records: &[&Record]) -> Self {
        let planned = sum_field(records, fields::PLANNED_LENGTH);
        let executed = sum_field(records, fields::EXECUTED_LENGTH);
        let difference = executed - planned;
        let percentage = if planned != 0.0 {
            difference / planned * 100.0
        } else {
            0.0
        };

        Self {
            count: records.len(),
            planned,
            executed,
            difference,
            percentage,
        }
    }
}

/// Sum a numeric field, counting unparseable values as zero
pub fn sum_field(records: &[&Record], field: &str) -> f64 {
    records.iter().filter_map(|r| r.number(field)).sum()
}

/// Which half of a record a triple is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Planned,
    Executed,
}

impl Side {
    fn columns(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Side::Planned => (
                fields::PLANNED_DIAMETER,
                fields::PLANNED_METHOD,
                fields::PLANNED_LENGTH,
            ),
            Side::Executed => (
                fields::EXECUTED_DIAMETER,
                fields::EXECUTED_METHOD,
                fields::EXECUTED_LENGTH,
            ),
        }
    }
}

/// Exact-string (diameter, method) pair; `200` and `200,0` are different keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BucketKey {
    pub diameter: String,
    pub method: String,
}

impl BucketKey {
    /// Chart label, e.g. `DN 200 – MND`
    pub fn label(&self) -> String {
        format!("DN {} – {}", self.diameter, self.method)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bucket {
    pub planned: f64,
    pub executed: f64,
}

/// One bar group of the breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub planned: f64,
    pub executed: f64,
}

/// Lengths grouped by (diameter, method), in first-seen key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    buckets: IndexMap<BucketKey, Bucket>,
}

impl Breakdown {
    pub fn compute(records: &[&Record]) -> Self {
        let mut breakdown = Self::default();
        for record in records {
            breakdown.add(record, Side::Planned);
            breakdown.add(record, Side::Executed);
        }
        breakdown
    }

    /// Add one side of a record; incomplete triples contribute nothing
    fn add(&mut self, record: &Record, side: Side) {
        let Some((key, length)) = triple(record, side) else {
            return;
        };

        let bucket = self.buckets.entry(key).or_default();
        match side {
            Side::Planned => bucket.planned += length,
            Side::Executed => bucket.executed += length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn get(&self, key: &BucketKey) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    /// Chart series in bucket order
    pub fn series(&self) -> Vec<BreakdownRow> {
        self.buckets
            .iter()
            .map(|(key, bucket)| BreakdownRow {
                label: key.label(),
                planned: bucket.planned,
                executed: bucket.executed,
            })
            .collect()
    }
}

/// (diameter, method, length) of one side, if all three are present
fn triple(record: &Record, side: Side) -> Option<(BucketKey, f64)> {
    let (diameter_field, method_field, length_field) = side.columns();
    let diameter = record.get(diameter_field);
    let method = record.get(method_field);
    if diameter.is_empty() || method.is_empty() {
        return None;
    }
    let length = record.number(length_field)?;

    Some((
        BucketKey {
            diameter: diameter.to_string(),
            method: method.to_string(),
        },
        length,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Contrato;Extensao Edital (m);Extensao Executivo (m);Diametro Edital (mm);Metodo Edital;Diametro Executivo (mm);Metodo Executivo";

    fn dataset(rows: &[&str]) -> Dataset {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        Dataset::parse(&text)
    }

    fn key(diameter: &str, method: &str) -> BucketKey {
        BucketKey {
            diameter: diameter.to_string(),
            method: method.to_string(),
        }
    }

    #[test]
    fn test_summary_totals() {
        let ds = dataset(&["A;1.000,00;900,00;200;X;200;X", "A;500.5;-;;;;"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        let summary = Summary::compute(&subset);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.planned, 1500.5);
        assert_eq!(summary.executed, 900.0);
        assert_eq!(summary.difference, -600.5);
    }

    #[test]
    fn test_summary_zero_planned() {
        let ds = dataset(&["A;-;900,00;;;;", "A;;12,5;;;;"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        let summary = Summary::compute(&subset);
        assert_eq!(summary.planned, 0.0);
        assert_eq!(summary.executed, 912.5);
        assert_eq!(summary.percentage, 0.0);
    }

    #[test]
    fn test_summary_ignores_overflowing_lengths() {
        let huge = format!("A;{}.0;1,00;200;X;200;X", "9".repeat(400));
        let ds = dataset(&[huge.as_str()]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        let summary = Summary::compute(&subset);
        assert_eq!(summary.planned, 0.0);
        assert_eq!(summary.executed, 1.0);
        assert_eq!(summary.percentage, 0.0);
        assert!(summary.difference.is_finite());
    }

    #[test]
    fn test_summary_empty_subset() {
        let summary = Summary::compute(&[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_breakdown_single_record_both_sides() {
        let ds = dataset(&["A;1.000,00;900,00;200;X;200;X"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        let breakdown = Breakdown::compute(&subset);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(
            breakdown.series(),
            vec![BreakdownRow {
                label: "DN 200 – X".to_string(),
                planned: 1000.0,
                executed: 900.0,
            }]
        );
    }

    #[test]
    fn test_breakdown_sides_feed_different_buckets() {
        let ds = dataset(&["A;100,0;150,5;200;MND;250;VCA"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        let breakdown = Breakdown::compute(&subset);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(
            breakdown.get(&key("200", "MND")),
            Some(&Bucket { planned: 100.0, executed: 0.0 })
        );
        assert_eq!(
            breakdown.get(&key("250", "VCA")),
            Some(&Bucket { planned: 0.0, executed: 150.5 })
        );
    }

    #[test]
    fn test_breakdown_integer_length_is_not_a_number() {
        // Bare integers match none of the accepted shapes
        let ds = dataset(&["A;100;;200;MND;;"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        assert!(Breakdown::compute(&subset).is_empty());
    }

    #[test]
    fn test_breakdown_missing_planned_diameter_skips_side() {
        let ds = dataset(&["A;100,0;150,5;;MND;250;VCA"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        let breakdown = Breakdown::compute(&subset);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(
            breakdown.get(&key("250", "VCA")),
            Some(&Bucket { planned: 0.0, executed: 150.5 })
        );
        assert_eq!(breakdown.get(&key("", "MND")), None);
    }

    #[test]
    fn test_breakdown_unparseable_length_skips_side() {
        let ds = dataset(&["A;-;abc;200;X;200;X"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        assert!(Breakdown::compute(&subset).is_empty());
    }

    #[test]
    fn test_breakdown_insertion_order() {
        let ds = dataset(&[
            "A;10,0;20,0;300;B;100;A",
            "A;5,0;;100;A;;",
            "A;;1,0;;;300;B",
        ]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        let breakdown = Breakdown::compute(&subset);
        let labels: Vec<String> = breakdown.series().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["DN 300 – B", "DN 100 – A"]);
        assert_eq!(
            breakdown.get(&key("300", "B")),
            Some(&Bucket { planned: 10.0, executed: 1.0 })
        );
        assert_eq!(
            breakdown.get(&key("100", "A")),
            Some(&Bucket { planned: 5.0, executed: 20.0 })
        );

        // Same input, same order
        assert_eq!(Breakdown::compute(&subset), breakdown);
    }

    #[test]
    fn test_breakdown_keys_are_exact_strings() {
        let ds = dataset(&["A;1,0;1,0;200;X;200,0;X"]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        assert_eq!(Breakdown::compute(&subset).len(), 2);
    }

    #[test]
    fn test_count_independent_of_buckets() {
        let ds = dataset(&[
            "A;1,0;1,0;200;X;250;Y",
            "A;1,0;1,0;200;X;200;X",
            "A;;;;;;",
        ]);
        let subset: Vec<&Record> = ds.records().iter().collect();
        assert_eq!(Summary::compute(&subset).count, 3);
        assert_eq!(Breakdown::compute(&subset).len(), 2);
    }
}

//! Self-check of the paginator against a fixed table of expectations.
//!
//! Each fixture is a JSON collection with a page size and the answers its
//! queries must produce. Critical checks are constructions that must be
//! rejected with a specific [`ErrorKind`].

use rayon::prelude::*;
use serde_json::{Value, json};
use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};
use tracing::debug;

use crate::{
    config::HarnessConfig,
    error::{ErrorKind, PaginateError},
    paginate::{OUT_OF_RANGE, Paginator},
    param::Param,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    PageCount,
    ItemCount,
    PageItemCount(Param),
    PageIndex(Param),
}

impl Query {
    pub fn apply(&self, pager: &Paginator) -> Result<i64, PaginateError> {
        match self {
            Query::PageCount => Ok(pager.page_count() as i64),
            Query::ItemCount => Ok(pager.item_count() as i64),
            Query::PageItemCount(page) => pager.page_item_count(page.clone()),
            Query::PageIndex(item) => pager.page_index(item.clone()),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::PageCount => f.write_str("page_count()"),
            Query::ItemCount => f.write_str("item_count()"),
            Query::PageItemCount(page) => write!(f, "page_item_count({page})"),
            Query::PageIndex(item) => write!(f, "page_index({item})"),
        }
    }
}

pub struct Fixture {
    pub name: &'static str,
    pub collection: Value,
    pub items_per_page: Param,
    pub checks: Vec<(Query, i64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Value(i64),
    Failure(ErrorKind),
}

#[derive(Debug, Clone)]
enum Probe {
    Query(Paginator, Query),
    Construct(Value, Param),
}

#[derive(Debug, Clone)]
struct Check {
    label: String,
    probe: Probe,
    expected: Expected,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub label: String,
    pub expected: Expected,
    pub actual: Result<i64, PaginateError>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        match (&self.expected, &self.actual) {
            (Expected::Value(want), Ok(got)) => want == got,
            (Expected::Failure(kind), Err(err)) => err.kind() == *kind,
            _ => false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed() { "PASSED" } else { "FAIL" };
        match &self.actual {
            Ok(value) => write!(f, "{:<40} == {:<6} {status}", self.label, value),
            Err(err) => write!(f, "{:<40} !! {err} {status}", self.label),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub passed: usize,
    pub failed: usize,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

pub fn fixtures() -> Vec<Fixture> {
    use Query::*;

    vec![
        Fixture {
            name: "ph_1",
            collection: json!(["a", "b", "c", "d", "e", "f"]),
            items_per_page: 4.into(),
            checks: vec![
                (PageCount, 2),
                (ItemCount, 6),
                (PageItemCount(0.into()), 4),
                (PageItemCount(1.into()), 2),
                (PageItemCount(2.into()), OUT_OF_RANGE),
                (PageItemCount((-2).into()), OUT_OF_RANGE),
                (PageIndex(5.into()), 1),
                (PageIndex(4.into()), 1),
                (PageIndex(0.into()), 0),
                (PageIndex((-0.0).into()), 0),
                (PageIndex("-0".into()), 0),
                (PageIndex(3.into()), 0),
                (PageIndex(2.into()), 0),
                (PageIndex(20.into()), OUT_OF_RANGE),
                (PageIndex((-10).into()), OUT_OF_RANGE),
            ],
        },
        Fixture {
            name: "ph_2",
            collection: json!(["1", "2", "3"]),
            items_per_page: "4".into(),
            checks: vec![
                (PageCount, 1),
                (ItemCount, 3),
                (PageItemCount(0.into()), 3),
                (PageItemCount(1.into()), OUT_OF_RANGE),
                (PageItemCount(123.into()), OUT_OF_RANGE),
                (PageItemCount((-100).into()), OUT_OF_RANGE),
                (PageIndex("-0".into()), 0),
                (PageIndex((-0.0).into()), 0),
                (PageIndex("5".into()), OUT_OF_RANGE),
                (PageIndex(1.into()), 0),
            ],
        },
        Fixture {
            name: "ph_3",
            collection: json!([0, "a", "b", "c"]),
            items_per_page: 4.into(),
            checks: vec![
                (PageCount, 1),
                (ItemCount, 4),
                (PageItemCount(0.into()), 4),
                (PageItemCount((-0.0).into()), 4),
                (PageItemCount((-1).into()), OUT_OF_RANGE),
                (PageItemCount(5.into()), OUT_OF_RANGE),
                (PageIndex((-5).into()), OUT_OF_RANGE),
                (PageIndex(0.into()), 0),
                (PageIndex("3".into()), 0),
            ],
        },
        Fixture {
            name: "ph_4",
            collection: json!([
                "a",
                [],
                {},
                [1, 2, 3, null, null],
                null,
                "e",
                null,
                "f",
                100500,
                "ХОБАНА!",
                12,
                {"bug": "sure"},
                "BIG BUG?"
            ]),
            items_per_page: 3.into(),
            checks: vec![
                (PageCount, 5),
                (ItemCount, 13),
                (PageItemCount(0.into()), 3),
                (PageItemCount(1.into()), 3),
                (PageItemCount(2.into()), 3),
                (PageItemCount(3.into()), 3),
                (PageItemCount(4.into()), 1),
                (PageIndex(0.into()), 0),
                (PageIndex(1.into()), 0),
                (PageIndex(2.into()), 0),
                (PageIndex(3.into()), 1),
                (PageIndex("4".into()), 1),
                (PageIndex(5.into()), 1),
                (PageIndex(6.into()), 2),
                (PageIndex(7.into()), 2),
                (PageIndex(8.into()), 2),
                (PageIndex(9.into()), 3),
                (PageIndex(10.into()), 3),
                (PageIndex(11.into()), 3),
                (PageIndex(12.into()), 4),
                (PageIndex("-2".into()), OUT_OF_RANGE),
                (PageIndex(22.into()), OUT_OF_RANGE),
            ],
        },
    ]
}

/// Constructions that must be rejected, with the kind of rejection.
pub fn critical_cases() -> Vec<(Value, Param, ErrorKind)> {
    vec![
        (json!([1, 2, 3]), f64::NEG_INFINITY.into(), ErrorKind::NonInteger),
        (json!([1, 2, 3]), "haha".into(), ErrorKind::NonInteger),
        (json!([0, null, null]), 1.2.into(), ErrorKind::NonInteger),
        (
            json!({"0": 1, "1": 2, "2": 3, "3": 4}),
            4.into(),
            ErrorKind::InvalidCollection,
        ),
        (json!([1, 2, 3]), 0.into(), ErrorKind::InvalidPageSize),
        (json!([1, 2, 3]), "-4".into(), ErrorKind::InvalidPageSize),
        (
            json!([1, 2, 3]),
            9_007_199_254_740_992i64.into(),
            ErrorKind::UnsafeInteger,
        ),
        (json!([1, 2, 3]), "1e16".into(), ErrorKind::UnsafeInteger),
    ]
}

fn collect_checks(cfg: &HarnessConfig) -> Result<Vec<Check>, PaginateError> {
    let mut checks = Vec::new();

    for fixture in fixtures() {
        let pager = Paginator::from_json(&fixture.collection, fixture.items_per_page)?;
        for (query, expected) in fixture.checks {
            checks.push(Check {
                label: format!("{}.{}", fixture.name, query),
                probe: Probe::Query(pager, query),
                expected: Expected::Value(expected),
            });
        }
    }

    if cfg.critical {
        for (collection, items_per_page, kind) in critical_cases() {
            checks.push(Check {
                label: format!("new({collection}, {items_per_page})"),
                probe: Probe::Construct(collection, items_per_page),
                expected: Expected::Failure(kind),
            });
        }
    }

    Ok(checks)
}

/// Runs every check and reports the outcomes in table order.
///
/// Fails only if one of the fixtures itself cannot be paginated.
pub fn run(cfg: &HarnessConfig) -> Result<Report, PaginateError> {
    let checks = collect_checks(cfg)?;

    let passed = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let outcomes: Vec<Outcome> = checks
        .into_par_iter()
        .map(|check| {
            let actual = match check.probe {
                Probe::Query(pager, query) => query.apply(&pager),
                Probe::Construct(collection, items_per_page) => {
                    Paginator::from_json(&collection, items_per_page)
                        .map(|pager| pager.page_count() as i64)
                }
            };
            let outcome = Outcome {
                label: check.label,
                expected: check.expected,
                actual,
            };

            let ok = outcome.passed();
            if ok {
                passed.fetch_add(1, Ordering::Relaxed);
            } else {
                failed.fetch_add(1, Ordering::Relaxed);
            }
            if cfg.debug {
                debug!(label = %outcome.label, passed = ok, "check evaluated");
            }
            outcome
        })
        .collect();

    Ok(Report {
        outcomes,
        passed: passed.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_table_has_fifty_six_queries() {
        let total: usize = fixtures().iter().map(|f| f.checks.len()).sum();
        assert_eq!(total, 56);
    }

    #[test]
    fn every_check_passes() {
        let report = run(&HarnessConfig::default()).unwrap();
        let failures: Vec<String> = report.failures().map(|o| o.to_string()).collect();
        assert!(failures.is_empty(), "failing checks: {failures:#?}");
        assert_eq!(report.passed, 56 + critical_cases().len());
        assert!(report.all_passed());
    }

    #[test]
    fn critical_checks_can_be_skipped() {
        let cfg = HarnessConfig {
            critical: false,
            ..HarnessConfig::default()
        };
        let report = run(&cfg).unwrap();
        assert_eq!(report.outcomes.len(), 56);
    }

    #[test]
    fn outcomes_keep_table_order() {
        let report = run(&HarnessConfig::default()).unwrap();
        assert_eq!(report.outcomes[0].label, "ph_1.page_count()");
        assert_eq!(report.outcomes[9].label, "ph_1.page_index(-0)");
        assert_eq!(report.outcomes[10].label, "ph_1.page_index(\"-0\")");
        assert_eq!(
            report.outcomes.last().unwrap().label,
            "new([1,2,3], \"1e16\")"
        );
    }

    #[test]
    fn wrong_expectation_is_reported_as_failure() {
        let outcome = Outcome {
            label: "x".into(),
            expected: Expected::Value(2),
            actual: Ok(3),
        };
        assert!(!outcome.passed());
        assert!(outcome.to_string().ends_with("FAIL"));

        let outcome = Outcome {
            label: "y".into(),
            expected: Expected::Failure(ErrorKind::NonInteger),
            actual: Err(PaginateError::InvalidPageSize(0)),
        };
        assert!(!outcome.passed());
    }
}

//! Row filters, ordering and pagination.

use chrono::{DateTime, NaiveDate, Utc};
use crmpro_types::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::{Ordering, Reverse};

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A single `column <op> value` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// Whether `row` satisfies this condition. A missing column only
    /// satisfies `neq`.
    pub fn matches(&self, row: &Record) -> bool {
        let Some(actual) = row.get(&self.column) else {
            return self.operator == FilterOperator::Neq;
        };
        match self.operator {
            FilterOperator::Eq => values_equal(actual, &self.value),
            FilterOperator::Neq => !values_equal(actual, &self.value),
            FilterOperator::Gt => compare_values(actual, &self.value) == Ordering::Greater,
            FilterOperator::Gte => compare_values(actual, &self.value) != Ordering::Less,
            FilterOperator::Lt => compare_values(actual, &self.value) == Ordering::Less,
            FilterOperator::Lte => compare_values(actual, &self.value) != Ordering::Greater,
        }
    }
}

/// JSON equality, except that two numbers compare by value.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => left == right,
    }
}

/// True when `row` satisfies every filter.
pub fn matches_all(filters: &[Filter], row: &Record) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A single sort directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub direction: SortDirection,
}

/// Stable sort by each directive's stringified column value. The first
/// directive is the primary key.
pub fn apply_order(rows: &mut [Record], orders: &[Order]) {
    for order in orders.iter().rev() {
        match order.direction {
            SortDirection::Asc => rows.sort_by_cached_key(|row| sort_key(row, &order.column)),
            SortDirection::Desc => {
                rows.sort_by_cached_key(|row| Reverse(sort_key(row, &order.column)))
            }
        }
    }
}

/// Inclusive row window, applied after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Window {
    Limit(usize),
    Range { from: usize, to: usize },
}

impl Window {
    pub(crate) fn apply(&self, rows: Vec<Record>) -> Vec<Record> {
        match *self {
            Self::Limit(n) => rows.into_iter().take(n).collect(),
            Self::Range { from, to } if to >= from => {
                rows.into_iter().skip(from).take(to - from + 1).collect()
            }
            Self::Range { .. } => Vec::new(),
        }
    }
}

/// Keep only `columns` in each row. `None` keeps everything.
pub(crate) fn project(rows: Vec<Record>, columns: Option<&[String]>) -> Vec<Record> {
    let Some(columns) = columns else {
        return rows;
    };
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .filter(|(key, _)| columns.iter().any(|c| c == key))
                .collect()
        })
        .collect()
}

/// Parse a `select` column list. `*`, empty, or any `*` entry selects all.
pub(crate) fn parse_columns(columns: &str) -> Option<Vec<String>> {
    let parsed: Vec<String> = columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if parsed.is_empty() || parsed.iter().any(|c| c == "*") {
        None
    } else {
        Some(parsed)
    }
}

fn sort_key(row: &Record, column: &str) -> String {
    match row.get(column) {
        Some(value) => stringify(value),
        None => "undefined".to_string(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        // f64 display drops the `.0` of integral values.
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Dates first, then numbers, then strings.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    if let (Some(a), Some(b)) = (as_instant(left), as_instant(right)) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    stringify(left).cmp(&stringify(right))
}

fn as_instant(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn eq_does_not_coerce_strings() {
        let r = row(json!({ "n": 1 }));
        assert!(Filter::new("n", FilterOperator::Eq, 1).matches(&r));
        assert!(!Filter::new("n", FilterOperator::Eq, "1").matches(&r));
    }

    #[test]
    fn numbers_are_equal_by_value() {
        let r = row(json!({ "price": 49.0 }));
        assert!(Filter::new("price", FilterOperator::Eq, 49).matches(&r));
        assert!(!Filter::new("price", FilterOperator::Neq, 49).matches(&r));
        assert!(Filter::new("price", FilterOperator::Neq, 49.5).matches(&r));
        assert!(!Filter::new("price", FilterOperator::Eq, "49").matches(&r));
    }

    #[test]
    fn integral_floats_stringify_without_fraction() {
        assert_eq!(stringify(&json!(49.0)), "49");
        assert_eq!(stringify(&json!(49)), "49");
        assert_eq!(stringify(&json!(2.5)), "2.5");
    }

    #[test]
    fn missing_column_only_matches_neq() {
        let r = row(json!({}));
        assert!(!Filter::new("x", FilterOperator::Eq, 1).matches(&r));
        assert!(!Filter::new("x", FilterOperator::Gte, 1).matches(&r));
        assert!(Filter::new("x", FilterOperator::Neq, 1).matches(&r));
    }

    #[test]
    fn dates_compare_as_instants() {
        let date = json!("2025-06-02");
        let stamp = json!("2025-06-01T23:59:59.000000Z");
        assert_eq!(compare_values(&date, &stamp), Ordering::Greater);
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(compare_values(&json!(9), &json!(10.5)), Ordering::Less);
    }

    #[test]
    fn sort_key_placeholders() {
        assert_eq!(sort_key(&row(json!({ "a": null })), "a"), "null");
        assert_eq!(sort_key(&row(json!({})), "a"), "undefined");
    }

    #[test]
    fn columns_parse() {
        assert_eq!(parse_columns("*"), None);
        assert_eq!(parse_columns(""), None);
        assert_eq!(parse_columns("id, name"), Some(vec!["id".into(), "name".into()]));
    }

    #[test]
    fn range_is_inclusive() {
        let rows: Vec<Record> = (0..5).map(|i| row(json!({ "i": i }))).collect();
        let window = Window::Range { from: 1, to: 3 }.apply(rows);
        let got: Vec<i64> = window.iter().map(|r| r["i"].as_i64().unwrap()).collect();
        assert_eq!(got, vec![1, 2, 3]);
    }
}

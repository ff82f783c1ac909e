//! `$filter` expression rendering.
//!
//! Values arrive as plain strings and are typed by inspection: dates first,
//! then all-digit integers, then the `True`/`False` tokens, and everything
//! else is single-quoted. Quotes inside string values are not escaped, so a
//! value containing `'` produces a query the server will reject.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::ast::{FilterOperator, FilterValue};
use crate::Error;

/// Input symbol → OData operator.
const OPERATOR_SYMBOLS: &[(&str, FilterOperator)] = &[
    ("=", FilterOperator::Eq),
    (">=", FilterOperator::Ge),
    ("<=", FilterOperator::Le),
    ("&", FilterOperator::And),
    ("||", FilterOperator::Or),
];

/// Calendar formats tried, in order, for free-form date values. chrono reads
/// `%Y` from as few as one digit, so matches below [`MIN_FULL_YEAR`] are
/// discarded and short slash dates fall through to `%m/%d/%y`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%m/%d/%y",
];

const MIN_FULL_YEAR: i32 = 1000;

impl FilterOperator {
    /// Translate a user-facing operator symbol (`=`, `>=`, `<=`, `&`, `||`).
    pub fn from_symbol(symbol: &str) -> Result<Self, Error> {
        OPERATOR_SYMBOLS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, op)| *op)
            .ok_or_else(|| Error::invalid_operator(symbol))
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FilterValue {
    /// Infer the literal type of a raw filter value.
    pub fn infer(raw: &str) -> Self {
        let all_digits = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());

        if !all_digits {
            if let Some(date) = parse_date(raw) {
                return FilterValue::Date(date);
            }
        }
        if all_digits {
            // Overflowing digit runs stay strings rather than being truncated.
            if let Ok(n) = raw.parse::<i64>() {
                return FilterValue::Integer(n);
            }
        }
        match raw {
            "True" => FilterValue::Bool(true),
            "False" => FilterValue::Bool(false),
            _ => FilterValue::String(raw.to_string()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        FilterValue::infer(raw)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FilterValue::Integer(n) => write!(f, "{n}"),
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::String(s) => write!(f, "'{s}'"),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let date = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .find(|d| d.year() >= MIN_FULL_YEAR)
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })?;
    (date.year() >= MIN_FULL_YEAR).then_some(date)
}

/// One `<field> <operator> <value>` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterTriple {
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterTriple {
    /// Build a clause from an operator symbol and an untyped value.
    pub fn new(field: impl Into<String>, symbol: &str, value: &str) -> Result<Self, Error> {
        Ok(Self {
            field: field.into(),
            operator: FilterOperator::from_symbol(symbol)?,
            value: FilterValue::infer(value),
        })
    }

    /// Build a clause from already-typed parts.
    pub fn typed(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Parse `"FIELD op VALUE"`. Every token after the operator belongs to the
    /// value, so `"STATUS = In Progress"` filters on `'In Progress'`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        match tokens.as_slice() {
            [field, op, value @ ..] if !value.is_empty() => {
                Self::new(*field, op, &value.join(" "))
            }
            _ => Err(Error::malformed_filter(raw)),
        }
    }

    fn render(&self, prefix: Option<&str>) -> String {
        format!(
            "{}{} {} {}",
            prefix.unwrap_or(""),
            self.field,
            self.operator,
            self.value
        )
    }
}

impl fmt::Display for FilterTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

/// Join clauses with `" and "`.
pub fn build_filter(triples: &[FilterTriple]) -> String {
    build_filter_with_prefix(triples, None)
}

/// Like [`build_filter`], with every field qualified by `prefix`
/// (e.g. `"STRAIN/"` to filter across an expansion).
pub fn build_filter_with_prefix(triples: &[FilterTriple], prefix: Option<&str>) -> String {
    triples
        .iter()
        .map(|t| t.render(prefix))
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Parallel-list form: `fields[i] operators[i] values[i]`.
pub fn build_filter_from_lists<F, V, O>(
    fields: &[F],
    values: &[V],
    operators: &[O],
) -> Result<Vec<FilterTriple>, Error>
where
    F: AsRef<str>,
    V: AsRef<str>,
    O: AsRef<str>,
{
    if fields.len() != values.len() || fields.len() != operators.len() {
        return Err(Error::LengthMismatch {
            fields: fields.len(),
            values: values.len(),
            operators: operators.len(),
        });
    }

    fields
        .iter()
        .zip(values)
        .zip(operators)
        .map(|((f, v), op)| FilterTriple::new(f.as_ref(), op.as_ref(), v.as_ref()))
        .collect()
}

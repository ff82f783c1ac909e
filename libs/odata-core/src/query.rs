//! Request URL composition.
//!
//! URLs are assembled as plain strings: nothing is percent-encoded, because
//! the platform treats encoded and raw OData syntax differently.

use std::fmt;

use crate::filter::{build_filter_with_prefix, FilterTriple};
use crate::Error;

/// One `$orderby` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }

    /// Parse a `(field, direction)` pair; direction is `asc`, `dsc` or `desc`.
    pub fn parse(field: &str, direction: &str) -> Result<Self, Error> {
        match direction.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::asc(field)),
            "dsc" | "desc" => Ok(Self::desc(field)),
            _ => Err(Error::InvalidSortDirection(direction.to_string())),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.ascending { "asc" } else { "dsc" };
        write!(f, "{} {}", self.field, dir)
    }
}

/// Shape of a single request. A direct key overrides everything else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryIntent {
    key: Option<String>,
    order_by: Vec<OrderBy>,
    filters: Vec<FilterTriple>,
    filter_prefix: Option<String>,
    select: Vec<String>,
    expand: Option<String>,
}

impl QueryIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single entity by key: `Entity('key')`.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn filter(mut self, triple: FilterTriple) -> Self {
        self.filters.push(triple);
        self
    }

    pub fn filters(mut self, triples: impl IntoIterator<Item = FilterTriple>) -> Self {
        self.filters.extend(triples);
        self
    }

    /// Qualify every filtered field, e.g. `"STRAIN/"`.
    pub fn filter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filter_prefix = Some(prefix.into());
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Raw `$expand` expression, passed through untouched.
    pub fn expand(mut self, expr: impl Into<String>) -> Self {
        self.expand = Some(expr.into());
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn filter_triples(&self) -> &[FilterTriple] {
        &self.filters
    }

    pub fn expansion(&self) -> Option<&str> {
        self.expand.as_deref()
    }

    /// Query parameters in their fixed order: `$orderby`, `$filter`,
    /// `$select`, `$expand`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.order_by.is_empty() {
            let order = self
                .order_by
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("$orderby", order));
        }
        if !self.filters.is_empty() {
            params.push((
                "$filter",
                build_filter_with_prefix(&self.filters, self.filter_prefix.as_deref()),
            ));
        }
        if !self.select.is_empty() {
            params.push(("$select", self.select.join(",")));
        }
        if let Some(expand) = &self.expand {
            params.push(("$expand", expand.clone()));
        }
        params
    }
}

/// `base_url + entity_path [+ "('key')" | + "?" + params]`.
pub fn compose_url(base_url: &str, entity_path: &str, intent: &QueryIntent) -> String {
    let mut url = format!("{base_url}{entity_path}");

    if let Some(key) = &intent.key {
        url.push_str(&format!("('{key}')"));
        return url;
    }

    let params = intent.params();
    if !params.is_empty() {
        url.push('?');
        url.push_str(
            &params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&"),
        );
    }
    url
}

//! OData query building and response extraction.
//!
//! The crate renders filter/order/select/expand intent into request URLs and
//! walks the JSON bodies that come back. It does no I/O.

pub mod ast {
    use chrono::NaiveDate;

    /// Operators accepted inside a `$filter` clause.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum FilterOperator {
        Eq,
        Ne,
        Ge,
        Le,
        And,
        Or,
    }

    impl FilterOperator {
        /// The OData keyword for this operator.
        pub fn as_str(&self) -> &'static str {
            match self {
                FilterOperator::Eq => "eq",
                FilterOperator::Ne => "ne",
                FilterOperator::Ge => "ge",
                FilterOperator::Le => "le",
                FilterOperator::And => "and",
                FilterOperator::Or => "or",
            }
        }
    }

    /// A typed literal on the right-hand side of a filter clause.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum FilterValue {
        Date(NaiveDate),
        Integer(i64),
        Bool(bool),
        String(String),
    }
}

mod error;
pub mod extract;
pub mod filter;
pub mod query;

pub use ast::{FilterOperator, FilterValue};
pub use error::Error;
pub use extract::{find_by_key, find_by_pair, walk, JsonVisitor};
pub use filter::{build_filter, build_filter_from_lists, build_filter_with_prefix, FilterTriple};
pub use query::{compose_url, OrderBy, QueryIntent};

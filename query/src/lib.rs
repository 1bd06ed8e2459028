//! Chronicle Query Engine
//!
//! The FilterExpression translator and executor: declarative filter/sort/page
//! tuples in, a [`QueryPlan`] over one entity type out, executed against the
//! [`chronicle_store::EntityStore`]. Expected failures (bad field names) are
//! the service layer's to report; the translator trusts its caller and treats
//! malformed operand shapes as contract violations.

mod executor;
mod filter;
mod plan;

pub use executor::{execute, QueryResult};
pub use filter::{
    BoolOp, FilterClause, FilterOp, FilterValue, OperandShape, Page, SortDirection, SortKey,
};
pub use plan::{translate, PlanOp, QueryPlan};

//! Query planning.
//!
//! The translator turns declarative filter/sort/page input into a
//! [`QueryPlan`] over one entity type. Field names are the caller's contract:
//! the service layer validates them against the public-field set before
//! translating, so the planner does not check them. Malformed operand shapes
//! (`in` without a list, `null` with an operand) are programming errors and
//! panic at translate time.

use chronicle_core::EntityType;

use crate::filter::{FilterClause, FilterValue, OperandShape, Page, SortKey};

/// A query execution plan.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// The root operator of the plan.
    pub root: PlanOp,
    /// The entity type the plan ranges over.
    pub entity_type: EntityType,
}

/// Plan operators, composed bottom-up.
#[derive(Debug, Clone)]
pub enum PlanOp {
    /// Scan all entities of one type, in insertion order.
    Scan {
        entity_type: EntityType,
        include_deleted: bool,
    },

    /// Filter entities by the left-to-right-combined clause predicate.
    Filter {
        input: Box<PlanOp>,
        clauses: Vec<FilterClause>,
    },

    /// Sort by keys, in key order.
    Sort {
        input: Box<PlanOp>,
        keys: Vec<SortKey>,
    },

    /// Page window over the sorted/filtered set.
    Page {
        input: Box<PlanOp>,
        offset: usize,
        limit: usize,
    },
}

/// Translate declarative filter/sort/page input into a plan.
///
/// Panics when a clause's operand shape does not match its operator; that is
/// a caller contract violation, not a reportable error.
pub fn translate(
    entity_type: EntityType,
    clauses: &[FilterClause],
    sorts: &[SortKey],
    page: Page,
    include_deleted: bool,
) -> QueryPlan {
    for clause in clauses {
        check_operand_contract(clause);
    }

    let mut root = PlanOp::Scan {
        entity_type,
        include_deleted,
    };

    if !clauses.is_empty() {
        root = PlanOp::Filter {
            input: Box::new(root),
            clauses: clauses.to_vec(),
        };
    }

    if !sorts.is_empty() {
        root = PlanOp::Sort {
            input: Box::new(root),
            keys: sorts.to_vec(),
        };
    }

    if let Some((offset, limit)) = page.window() {
        root = PlanOp::Page {
            input: Box::new(root),
            offset,
            limit,
        };
    }

    QueryPlan { root, entity_type }
}

fn check_operand_contract(clause: &FilterClause) {
    let actual = match &clause.value {
        FilterValue::None => OperandShape::None,
        FilterValue::One(_) => OperandShape::Scalar,
        FilterValue::Many(_) => OperandShape::List,
    };
    let expected = clause.op.operand_shape();
    if expected != actual {
        panic!(
            "filter contract violation on '{}': {:?} requires a {:?} operand, got {:?}",
            clause.field, clause.op, expected, actual
        );
    }
}

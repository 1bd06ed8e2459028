//! Query plan execution against the entity store.

use std::cmp::Ordering;

use chronicle_core::{Entity, Value};
use chronicle_store::EntityStore;

use crate::filter::{BoolOp, FilterClause, FilterOp, FilterValue, Page, SortDirection, SortKey};
use crate::plan::{PlanOp, QueryPlan};

/// The result of executing a query plan.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The matching entities, in plan output order.
    pub entities: Vec<Entity>,
    /// The total match count before any page window was applied. Equals
    /// `entities.len()` for unpaged plans; callers use it for page-link
    /// generation.
    pub total: usize,
    /// The page window that was applied, if any.
    pub page: Option<Page>,
}

impl QueryResult {
    /// Number of entities in this result (page-windowed).
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no entities matched (or the window is empty).
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Execute a plan against the store.
pub fn execute(plan: &QueryPlan, store: &EntityStore) -> QueryResult {
    let mut page = None;
    let mut total = 0;
    let entities = execute_op(&plan.root, store, &mut total, &mut page);
    QueryResult {
        entities,
        total,
        page,
    }
}

fn execute_op(
    op: &PlanOp,
    store: &EntityStore,
    total: &mut usize,
    page_out: &mut Option<Page>,
) -> Vec<Entity> {
    match op {
        PlanOp::Scan {
            entity_type,
            include_deleted,
        } => {
            let rows: Vec<Entity> = store
                .scan(*entity_type, *include_deleted)
                .into_iter()
                .cloned()
                .collect();
            *total = rows.len();
            rows
        }

        PlanOp::Filter { input, clauses } => {
            let rows = execute_op(input, store, total, page_out);
            let rows: Vec<Entity> = rows
                .into_iter()
                .filter(|entity| matches_clauses(entity, clauses))
                .collect();
            *total = rows.len();
            rows
        }

        PlanOp::Sort { input, keys } => {
            let mut rows = execute_op(input, store, total, page_out);
            rows.sort_by(|a, b| compare_by_keys(a, b, keys));
            rows
        }

        PlanOp::Page {
            input,
            offset,
            limit,
        } => {
            let rows = execute_op(input, store, total, page_out);
            // Windows only exist for positive limits (Page::window).
            *page_out = Some(Page::new(*limit, offset / limit + 1));
            rows.into_iter().skip(*offset).take(*limit).collect()
        }
    }
}

/// Left-to-right fold of the clause predicates, combining each with the
/// accumulated result per its boolean operator. No precedence grouping.
fn matches_clauses(entity: &Entity, clauses: &[FilterClause]) -> bool {
    let mut acc = true;
    for (index, clause) in clauses.iter().enumerate() {
        let matched = matches_clause(entity, clause);
        if index == 0 {
            acc = matched;
        } else {
            acc = match clause.bool_op {
                BoolOp::And => acc && matched,
                BoolOp::Or => acc || matched,
            };
        }
    }
    acc
}

fn matches_clause(entity: &Entity, clause: &FilterClause) -> bool {
    // Field names were validated upstream; an unreadable field behaves as
    // null rather than failing the whole query.
    let field = entity.field(&clause.field).unwrap_or(Value::Null);

    match (clause.op, &clause.value) {
        (FilterOp::Eq, FilterValue::One(operand)) => values_equal(&field, operand),
        (FilterOp::NotEq, FilterValue::One(operand)) => !values_equal(&field, operand),
        (FilterOp::Gt, FilterValue::One(operand)) => {
            field.cmp_compatible(operand) == Some(Ordering::Greater)
        }
        (FilterOp::Gte, FilterValue::One(operand)) => matches!(
            field.cmp_compatible(operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        (FilterOp::Lt, FilterValue::One(operand)) => {
            field.cmp_compatible(operand) == Some(Ordering::Less)
        }
        (FilterOp::Lte, FilterValue::One(operand)) => matches!(
            field.cmp_compatible(operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        (FilterOp::Like, FilterValue::One(operand)) => like_match(&field, operand),
        (FilterOp::NotLike, FilterValue::One(operand)) => !like_match(&field, operand),
        (FilterOp::In, FilterValue::Many(operands)) => {
            operands.iter().any(|v| values_equal(&field, v))
        }
        (FilterOp::NotIn, FilterValue::Many(operands)) => {
            !operands.iter().any(|v| values_equal(&field, v))
        }
        (FilterOp::Null, FilterValue::None) => field.is_null(),
        (FilterOp::NotNull, FilterValue::None) => !field.is_null(),
        // Shape mismatches were rejected at translate time.
        _ => unreachable!("operand shape checked at translate time"),
    }
}

/// Equality across the Int/Float divide. Type-incomparable pairs are never
/// equal, so a mistyped operand matches no rows instead of all of them.
fn values_equal(left: &Value, right: &Value) -> bool {
    left.cmp_compatible(right) == Some(Ordering::Equal)
}

/// Case-insensitive substring match against the lower-cased field text.
fn like_match(field: &Value, operand: &Value) -> bool {
    match (field.to_plain_string(), operand.to_plain_string()) {
        (Some(haystack), Some(needle)) => {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => false,
    }
}

fn compare_by_keys(a: &Entity, b: &Entity, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let left = a.field(&key.field).unwrap_or(Value::Null);
        let right = b.field(&key.field).unwrap_or(Value::Null);
        let ordering = match key.direction {
            SortDirection::Asc => left.cmp_sortable(&right),
            SortDirection::Desc => right.cmp_sortable(&left),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

//! Declarative filter, sort, and page input types.

use chronicle_core::Value;

/// Comparison operator in a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Equal.
    Eq,
    /// Not equal.
    NotEq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Case-insensitive substring match.
    Like,
    /// Negated case-insensitive substring match.
    NotLike,
    /// Membership in a value list.
    In,
    /// Negated membership in a value list.
    NotIn,
    /// Field is null.
    Null,
    /// Field is not null.
    NotNull,
}

impl FilterOp {
    /// Parse an operator string. Unknown operators fall back to `eq`.
    pub fn parse(text: &str) -> FilterOp {
        match text {
            "eq" => FilterOp::Eq,
            "!eq" => FilterOp::NotEq,
            "gt" => FilterOp::Gt,
            "gte" => FilterOp::Gte,
            "lt" => FilterOp::Lt,
            "lte" => FilterOp::Lte,
            "like" => FilterOp::Like,
            "!like" => FilterOp::NotLike,
            "in" => FilterOp::In,
            "!in" => FilterOp::NotIn,
            "null" => FilterOp::Null,
            "!null" => FilterOp::NotNull,
            _ => FilterOp::Eq,
        }
    }

    /// The operand shape this operator requires.
    pub fn operand_shape(&self) -> OperandShape {
        match self {
            FilterOp::In | FilterOp::NotIn => OperandShape::List,
            FilterOp::Null | FilterOp::NotNull => OperandShape::None,
            _ => OperandShape::Scalar,
        }
    }
}

/// The operand shape a filter operator requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    /// No operand (`null`, `!null`).
    None,
    /// A single scalar operand.
    Scalar,
    /// A list operand (`in`, `!in`).
    List,
}

/// How a filter clause combines with the accumulated predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolOp {
    /// Logical AND (the default).
    #[default]
    And,
    /// Logical OR.
    Or,
}

impl BoolOp {
    /// Parse a boolean-operator string. Anything but `OR` is `AND`.
    pub fn parse(text: &str) -> BoolOp {
        if text.eq_ignore_ascii_case("or") {
            BoolOp::Or
        } else {
            BoolOp::And
        }
    }
}

/// Operand of a filter clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// No operand.
    None,
    /// A single scalar operand.
    One(Value),
    /// A list operand.
    Many(Vec<Value>),
}

/// One declarative filter clause: `(field, operator, value?, boolOp?)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    /// Field name, from the entity's public-field set.
    pub field: String,
    /// Comparison operator.
    pub op: FilterOp,
    /// Operand, shaped per the operator.
    pub value: FilterValue,
    /// Combination with the accumulated predicate.
    pub bool_op: BoolOp,
}

impl FilterClause {
    /// Create a clause with an explicit operand and the default AND combiner.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
            bool_op: BoolOp::And,
        }
    }

    /// An equality clause.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::One(value.into()))
    }

    /// A case-insensitive substring clause.
    pub fn like(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Like, FilterValue::One(value.into()))
    }

    /// A membership clause.
    pub fn is_in(field: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(
            field,
            FilterOp::In,
            FilterValue::Many(values.into_iter().collect()),
        )
    }

    /// A null-check clause.
    pub fn null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Null, FilterValue::None)
    }

    /// Combine this clause with OR instead of the default AND.
    pub fn or(mut self) -> Self {
        self.bool_op = BoolOp::Or;
        self
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending (the default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parse a direction string. Anything but `DESC` is ascending.
    pub fn parse(text: &str) -> SortDirection {
        if text.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// One declarative sort key: `(field, direction)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Field name, from the entity's public-field set.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortKey {
    /// Create a sort key.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// An ascending sort key.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// A descending sort key.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Page request: `(pageSize, pageNumber)`, both 1-based and only effective
/// when both are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    /// Entities per page.
    pub size: usize,
    /// 1-based page number.
    pub number: usize,
}

impl Page {
    /// Create a page request.
    pub fn new(size: usize, number: usize) -> Self {
        Self { size, number }
    }

    /// No paging: the full result set.
    pub fn none() -> Self {
        Self::default()
    }

    /// The `(offset, limit)` window, when paging is in effect.
    pub fn window(&self) -> Option<(usize, usize)> {
        if self.size > 0 && self.number > 0 {
            Some((self.size * (self.number - 1), self.size))
        } else {
            None
        }
    }
}

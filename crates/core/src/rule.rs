use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison applied to one CSV field.
///
/// `Eq` / `Ne` compare the trimmed field as text.  The ordering comparisons
/// parse both sides as numbers and never match when either side isn't one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    /// Operator tokens, longest first so `<=` wins over `<`.
    const TOKENS: [(&'static str, Self); 6] = [
        ("==", Self::Eq),
        ("!=", Self::Ne),
        ("<=", Self::Le),
        (">=", Self::Ge),
        ("<", Self::Lt),
        (">", Self::Gt),
    ];

    pub fn symbol(self) -> &'static str {
        Self::TOKENS
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(s, _)| *s)
            .unwrap_or("?")
    }
}

/// A predicate on a single column: `<column><op><value>`, e.g. `7<14`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Zero-based column index.
    pub column: usize,
    pub op: Comparison,
    pub value: String,
}

impl ColumnRule {
    pub fn new(column: usize, op: Comparison, value: impl Into<String>) -> Self {
        Self { column, op, value: value.into() }
    }

    /// Evaluate the rule against the field found at `self.column`.
    /// A missing field never matches.
    pub fn matches_field(&self, field: Option<&str>) -> bool {
        let Some(field) = field else {
            return false;
        };
        let field = field.trim();
        let operand = self.value.trim();

        match self.op {
            Comparison::Eq => field == operand,
            Comparison::Ne => field != operand,
            ordering => {
                let (Ok(lhs), Ok(rhs)) = (field.parse::<f64>(), operand.parse::<f64>()) else {
                    return false;
                };
                match ordering {
                    Comparison::Lt => lhs < rhs,
                    Comparison::Le => lhs <= rhs,
                    Comparison::Gt => lhs > rhs,
                    Comparison::Ge => lhs >= rhs,
                    Comparison::Eq | Comparison::Ne => unreachable!(),
                }
            }
        }
    }
}

impl fmt::Display for ColumnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.op.symbol(), self.value)
    }
}

impl FromStr for ColumnRule {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(['=', '!', '<', '>'])
            .ok_or_else(|| SimError::InvalidArgument(format!("rule '{s}' has no operator")))?;
        let (column, rest) = s.split_at(split);

        let column = column.trim().parse::<usize>().map_err(|_| {
            SimError::InvalidArgument(format!("rule '{s}': '{}' is not a column index", column.trim()))
        })?;

        let (token, op) = Comparison::TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
            .ok_or_else(|| SimError::InvalidArgument(format!("rule '{s}' has an unknown operator")))?;

        let value = rest[token.len()..].trim();
        if value.is_empty() {
            return Err(SimError::InvalidArgument(format!("rule '{s}' has no value")));
        }

        Ok(Self::new(column, *op, value))
    }
}

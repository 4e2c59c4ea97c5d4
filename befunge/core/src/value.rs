use serde::{Deserialize, Serialize};
use std::fmt;

/// A single operand stack cell.
///
/// `Undefined` is what an empty-stack pop, a bad division, or an
/// unrecognized opcode produces. It poisons every arithmetic result it
/// touches instead of stopping the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Value {
    Int(i64),
    Char(char),
    Undefined,
}

impl Value {
    /// Numeric view used by arithmetic, comparisons, and branches.
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(n),
            Value::Char(ch) => Some(ch as i64),
            Value::Undefined => None,
        }
    }

    /// Branch condition for `_` and `|`: only a numeric zero counts.
    pub fn is_zero(self) -> bool {
        self.as_int() == Some(0)
    }

    pub fn from_bool(flag: bool) -> Self {
        Value::Int(flag as i64)
    }

    /// Combines two operands, propagating `Undefined` from either side or
    /// from the operation itself.
    pub fn combine(b: Value, a: Value, op: impl FnOnce(i64, i64) -> Option<i64>) -> Value {
        match (b.as_int(), a.as_int()) {
            (Some(b), Some(a)) => op(b, a).map(Value::Int).unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Char(ch) => write!(f, "{ch:?}"),
            Value::Undefined => f.write_str("undef"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_coerce_to_scalar_values() {
        assert_eq!(Value::Char('a').as_int(), Some(97));
        assert_eq!(Value::Int(-3).as_int(), Some(-3));
        assert_eq!(Value::Undefined.as_int(), None);
    }

    #[test]
    fn combine_poisons_on_undefined_operand_or_failed_op() {
        let add = |b: i64, a: i64| Some(b.wrapping_add(a));
        assert_eq!(Value::combine(Value::Int(1), Value::Int(3), add), Value::Int(4));
        assert_eq!(Value::combine(Value::Undefined, Value::Int(3), add), Value::Undefined);
        assert_eq!(Value::combine(Value::Int(1), Value::Undefined, add), Value::Undefined);
        assert_eq!(
            Value::combine(Value::Int(1), Value::Int(0), i64::checked_div),
            Value::Undefined
        );
    }

    #[test]
    fn only_numeric_zero_is_zero() {
        assert!(Value::Int(0).is_zero());
        assert!(!Value::Int(1).is_zero());
        assert!(!Value::Undefined.is_zero());
        assert!(!Value::Char('0').is_zero());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&[Value::Int(4), Value::Char('h'), Value::Undefined])
            .expect("serialize values");
        assert_eq!(
            json,
            r#"[{"kind":"int","value":4},{"kind":"char","value":"h"},{"kind":"undefined"}]"#
        );
    }
}

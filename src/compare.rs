//! Comparison semantics for the `where` family and sorted iteration.
//!
//! Two equality regimes coexist: strict equality is type-and-value
//! identity, loose equality additionally coerces between numbers and
//! numeric strings and treats a boolean side as a truthiness test. Nil is
//! loosely equal only to Nil. Ordering is defined within a type (and
//! across number/numeric-string); everything else is incomparable, and
//! ordering operators evaluate false on incomparable pairs.

use crate::errors::TroveError;
use crate::value::Value;
use std::cmp::Ordering;
use std::str::FromStr;

/// The closed set of comparison operators accepted by `where_op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    StrictEq,
    StrictNotEq,
}

impl FromStr for Operator {
    type Err = TroveError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw {
            "=" | "==" => Operator::Eq,
            "!=" | "<>" => Operator::NotEq,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            "===" => Operator::StrictEq,
            "!==" => Operator::StrictNotEq,
            other => {
                return Err(TroveError::UnknownOperator {
                    operator: other.to_string(),
                })
            }
        })
    }
}

impl Operator {
    /// Inequality-style operators: the ones that hold when the two sides
    /// cannot be compared at all.
    pub fn is_negated(&self) -> bool {
        matches!(self, Operator::NotEq | Operator::StrictNotEq)
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Type-and-value identity.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    a == b
}

/// Loose equality: identity, number/numeric-string coercion, or
/// boolean-vs-truthiness when one side is a bool.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            match (numeric(a), numeric(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == other.truthy(),
        _ => false,
    }
}

/// Ordering within a type, plus number/numeric-string coercion. Mixed or
/// structured pairs are incomparable.
pub fn partial_cmp_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            match (numeric(a), numeric(b)) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            }
        }
        _ => None,
    }
}

pub fn loose_lt(a: &Value, b: &Value) -> bool {
    matches!(partial_cmp_values(a, b), Some(Ordering::Less))
}

pub fn loose_gt(a: &Value, b: &Value) -> bool {
    matches!(partial_cmp_values(a, b), Some(Ordering::Greater))
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Map(_) | Value::Collection(_))
}

/// Evaluates `lhs op rhs`.
///
/// When exactly one side is a structured value and fewer than two sides
/// are strings, the comparison short-circuits: inequality-style operators
/// hold, everything else fails. This precedes normal dispatch for every
/// operator.
pub fn compare(lhs: &Value, op: Operator, rhs: &Value) -> bool {
    let strings = [lhs, rhs]
        .iter()
        .filter(|v| matches!(v, Value::String(_)))
        .count();
    let structured = [lhs, rhs].iter().filter(|v| is_structured(v)).count();
    if structured == 1 && strings < 2 {
        return op.is_negated();
    }

    match op {
        Operator::Eq => loose_eq(lhs, rhs),
        Operator::NotEq => !loose_eq(lhs, rhs),
        Operator::Lt => matches!(partial_cmp_values(lhs, rhs), Some(Ordering::Less)),
        Operator::Gt => matches!(partial_cmp_values(lhs, rhs), Some(Ordering::Greater)),
        Operator::Le => matches!(
            partial_cmp_values(lhs, rhs),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Ge => matches!(
            partial_cmp_values(lhs, rhs),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::StrictEq => strict_eq(lhs, rhs),
        Operator::StrictNotEq => !strict_eq(lhs, rhs),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Nil => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::List(_) => 4,
        Value::Map(_) => 5,
        Value::Collection(_) => 6,
    }
}

/// The comparator behind sorted iteration: strictly equal keys tie (the
/// stable sort keeps input order), comparable keys order normally, and
/// incomparable keys fall back to a fixed type ranking so the comparator
/// stays consistent.
pub(crate) fn sort_cmp(a: &Value, b: &Value) -> Ordering {
    if strict_eq(a, b) {
        return Ordering::Equal;
    }
    if let Some(ordering) = partial_cmp_values(a, b) {
        return ordering;
    }
    type_rank(a).cmp(&type_rank(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> Value {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn operator_tokens_parse() {
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("==".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::NotEq);
        assert_eq!("===".parse::<Operator>().unwrap(), Operator::StrictEq);
        assert_eq!("!==".parse::<Operator>().unwrap(), Operator::StrictNotEq);
        assert!(matches!(
            "=~".parse::<Operator>(),
            Err(TroveError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn loose_equality_coerces_numeric_strings_and_bools() {
        assert!(loose_eq(&Value::from("1"), &Value::from(1)));
        assert!(loose_eq(&Value::from(1), &Value::from(" 1.0 ")));
        assert!(!loose_eq(&Value::from("abc"), &Value::from(0)));
        assert!(loose_eq(&Value::Bool(true), &Value::from("yes")));
        assert!(loose_eq(&Value::Bool(false), &Value::from("")));
        assert!(loose_eq(&Value::Nil, &Value::Nil));
        assert!(!loose_eq(&Value::Nil, &Value::from(0)));
    }

    #[test]
    fn strict_equality_is_identity() {
        assert!(!strict_eq(&Value::from("1"), &Value::from(1)));
        assert!(strict_eq(&Value::from(1), &Value::from(1.0)));
    }

    #[test]
    fn ordering_is_typed() {
        assert!(loose_lt(&Value::from(1), &Value::from(2)));
        assert!(loose_lt(&Value::from("a"), &Value::from("b")));
        assert!(loose_gt(&Value::from("10"), &Value::from(9)));
        assert!(!loose_lt(&Value::from("abc"), &Value::from(1)));
        assert!(!loose_gt(&Value::from("abc"), &Value::from(1)));
    }

    #[test]
    fn structured_mismatch_short_circuits_every_operator() {
        let structured = map(&[("a", Value::from(1))]);
        let scalar = Value::from(1);
        assert!(!compare(&structured, Operator::Eq, &scalar));
        assert!(!compare(&structured, Operator::Lt, &scalar));
        assert!(!compare(&structured, Operator::Ge, &scalar));
        assert!(!compare(&structured, Operator::StrictEq, &scalar));
        assert!(compare(&structured, Operator::NotEq, &scalar));
        assert!(compare(&structured, Operator::StrictNotEq, &scalar));
        // Two structured sides dispatch normally.
        assert!(compare(&structured, Operator::Eq, &structured.clone()));
    }
}

//! Condition sets and column payloads.
//!
//! [`Values`] is an ordered column -> scalar mapping. It is used for INSERT/REPLACE
//! payloads, UPDATE `SET` lists and equality-only conditions (UPDATE/DELETE).
//!
//! [`Conditions`] combines equality terms and `LIKE` substring terms; everything is
//! joined with `AND`.

use crate::error::{DbError, DbResult};
use crate::value::{Scalar, json_kind};

/// Ordered column -> scalar mapping.
///
/// Columns keep first-seen order. Setting a column twice replaces its value in place.
///
/// # Example
/// ```
/// use mysqlkit::Values;
///
/// let payload = Values::new().set("c2", "test").set("c3", 1);
/// assert_eq!(payload.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: Vec<(String, Scalar)>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value (chainable).
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column value in place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Scalar>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Build from a JSON object, rejecting anything that is not a string or number.
    pub fn from_json(value: &serde_json::Value) -> DbResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            DbError::condition_type(format!("expected an object, got {}", json_kind(value)))
        })?;

        let mut out = Values::new();
        for (column, v) in obj {
            let scalar = Scalar::try_from(v).map_err(|_| {
                DbError::condition_type(format!(
                    "column '{column}': expected a string or number, got {}",
                    json_kind(v)
                ))
            })?;
            out.insert(column.as_str(), scalar);
        }
        Ok(out)
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Values::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

/// A conjunctive condition set: equality terms and `LIKE` substring terms.
///
/// # Example
/// ```
/// use mysqlkit::Conditions;
///
/// let cond = Conditions::new().eq("status", 1).like("name", "ali");
/// assert!(!cond.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    equal: Values,
    like: Vec<(String, String)>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.equal.insert(column, value);
        self
    }

    /// Add `column LIKE '%needle%'`.
    pub fn like(mut self, column: impl Into<String>, needle: impl Into<String>) -> Self {
        let column = column.into();
        let needle = needle.into();
        match self.like.iter_mut().find(|(c, _)| *c == column) {
            Some((_, slot)) => *slot = needle,
            None => self.like.push((column, needle)),
        }
        self
    }

    pub fn equalities(&self) -> &Values {
        &self.equal
    }

    pub fn likes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.like.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    /// Total number of terms.
    pub fn len(&self) -> usize {
        self.equal.len() + self.like.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equal.is_empty() && self.like.is_empty()
    }

    /// Build from two JSON objects (equality map and LIKE map).
    ///
    /// Either side may be `null`. LIKE values must be strings.
    pub fn from_json(equal: &serde_json::Value, like: &serde_json::Value) -> DbResult<Self> {
        let mut out = Conditions::new();
        if !equal.is_null() {
            out.equal = Values::from_json(equal)?;
        }
        if like.is_null() {
            return Ok(out);
        }

        let obj = like.as_object().ok_or_else(|| {
            DbError::condition_type(format!(
                "expected a LIKE object, got {}",
                json_kind(like)
            ))
        })?;
        for (column, v) in obj {
            let needle = v.as_str().ok_or_else(|| {
                DbError::condition_type(format!(
                    "LIKE column '{column}': expected a string, got {}",
                    json_kind(v)
                ))
            })?;
            out = out.like(column.as_str(), needle);
        }
        Ok(out)
    }
}

impl From<Values> for Conditions {
    fn from(equal: Values) -> Self {
        Self {
            equal,
            like: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_keep_first_seen_order() {
        let v = Values::new().set("b", 1).set("a", 2).set("b", 3);
        let cols: Vec<_> = v.columns().collect();
        assert_eq!(cols, ["b", "a"]);
        assert_eq!(v.get("b"), Some(&Scalar::Int(3)));
    }

    #[test]
    fn values_from_json_rejects_nested() {
        let err = Values::from_json(&json!({"a": 1, "b": {"x": 1}})).unwrap_err();
        assert!(matches!(err, DbError::ConditionType(msg) if msg.contains("'b'")));
    }

    #[test]
    fn values_from_json_rejects_non_object() {
        assert!(Values::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn conditions_from_json_like_requires_strings() {
        let err = Conditions::from_json(&json!({}), &json!({"name": 5})).unwrap_err();
        assert!(matches!(err, DbError::ConditionType(_)));

        let ok = Conditions::from_json(&json!({"id": 1}), &json!({"name": "al"})).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn conditions_from_json_accepts_null_sides() {
        let c = Conditions::from_json(&json!(null), &json!(null)).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn values_collect_from_pairs() {
        let v: Values = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(v.len(), 2);
    }
}

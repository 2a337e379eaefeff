//! Instance members: data values and methods

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::instance::Instance;

/// A method body, invoked against the instance it was looked up on
pub type MethodFn = Arc<dyn Fn(&Instance) -> serde_json::Value + Send + Sync>;

/// A single instance member: plain data or a callable method
#[derive(Clone)]
pub enum Member {
    Value(serde_json::Value),
    Method(MethodFn),
}

impl Member {
    /// Build a method member from a closure
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&Instance) -> serde_json::Value + Send + Sync + 'static,
    {
        Member::Method(Arc::new(f))
    }

    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Member::Value(v) => Some(v),
            Member::Method(_) => None,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Member::Method(_))
    }
}

impl From<serde_json::Value> for Member {
    fn from(value: serde_json::Value) -> Self {
        Member::Value(value)
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Member::Method(_) => f.write_str("Method(..)"),
        }
    }
}

/// Members keyed by name
pub type Members = HashMap<String, Member>;

/// Plain data properties, JSON-compatible key-value pairs
pub type Properties = HashMap<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_member() {
        let m = Member::from(serde_json::json!("very"));
        assert_eq!(m.as_value(), Some(&serde_json::json!("very")));
        assert!(!m.is_method());
    }

    #[test]
    fn test_method_member() {
        let m = Member::method(|_| serde_json::json!("yes"));
        assert!(m.is_method());
        assert!(m.as_value().is_none());
    }
}

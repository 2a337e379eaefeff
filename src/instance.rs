//! Instances
//!
//! An instance is a thin handle over its class's shared template: reads fall
//! through to the template unless shadowed by an own member, writes land on
//! the instance alone. Composition state lives entirely on the template.

use std::sync::Arc;

use crate::class::ClassDef;
use crate::error::ModelError;
use crate::member::{Member, Members};
use crate::template::Template;

#[derive(Debug)]
pub struct Instance {
    template: Arc<Template>,
    own: Members,
}

impl Instance {
    pub(crate) fn new(template: Arc<Template>) -> Self {
        Self {
            template,
            own: Members::new(),
        }
    }

    /// The shared template this instance delegates to
    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    /// Look up a member: own members shadow the template
    pub fn get(&self, key: &str) -> Option<&Member> {
        self.own.get(key).or_else(|| self.template.get(key))
    }

    /// Data member lookup; None for absent keys and for methods
    pub fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key).and_then(|m| m.as_value())
    }

    /// Set an own data member, shadowing the template
    pub fn set_value(&mut self, key: &str, value: serde_json::Value) {
        self.own.insert(key.to_string(), Member::Value(value));
    }

    /// Invoke a method member by name
    pub fn call(&self, name: &str) -> Result<serde_json::Value, ModelError> {
        match self.get(name) {
            Some(Member::Method(f)) => Ok(f(self)),
            _ => Err(ModelError::UnknownMethod {
                class: self.template.class_id().name.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Membership query against a class descriptor
    pub fn is_instance_of(&self, class: &ClassDef) -> bool {
        self.template.is_instance_of(class)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(|v| v.as_str())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.value(key).and_then(|v| v.as_i64())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.value(key).and_then(|v| v.as_f64())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.value(key).and_then(|v| v.as_bool())
    }
}

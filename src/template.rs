//! Mixin composition engine
//!
//! A template is the shared shape behind every instance of a class. It is built
//! exactly once per descriptor by running the descriptor's initializer, which
//! pulls ancestor classes in through [`Template::include`]. The inclusion record
//! keeps the classes already composed in, in first-included order, and is what
//! collapses diamond-shaped inclusion graphs: a class already covered by a
//! compatible, equal-or-newer entry is skipped without running its initializer.

use tracing::debug;

use crate::class::{ClassDef, ClassId};
use crate::error::ModelError;
use crate::member::{Member, Members};
use crate::version::caret_compatible;

/// Outcome of weighing a candidate class against an already-included one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Different class names; no relation
    Unrelated,
    /// Same class, and the existing entry already satisfies the candidate
    Covered,
    /// Same class, compatible versions, but the candidate is strictly newer
    /// and must still be composed in
    Newer,
    /// Same class, caret-incompatible versions
    Conflict,
}

/// Decide whether `candidate` is covered by `existing`.
///
/// Same-named unversioned classes are interchangeable. Versioned classes must
/// be caret-compatible; among compatible versions, an equal-or-newer existing
/// entry covers the candidate, while a strictly newer candidate does not get
/// covered (its own members still need to take effect).
pub fn coverage(candidate: &ClassId, existing: &ClassId) -> Coverage {
    if candidate.name != existing.name {
        return Coverage::Unrelated;
    }
    let (cand, exist) = match (&candidate.version, &existing.version) {
        (Some(c), Some(e)) => (c, e),
        _ => return Coverage::Covered,
    };
    if !caret_compatible(cand, exist) {
        return Coverage::Conflict;
    }
    if cand <= exist {
        Coverage::Covered
    } else {
        Coverage::Newer
    }
}

/// The shared, composed shape of a class; one per descriptor, memoized
#[derive(Debug)]
pub struct Template {
    class: ClassId,
    members: Members,
    included: Vec<ClassDef>,
}

impl Template {
    pub(crate) fn new(class: ClassId) -> Self {
        Self {
            class,
            members: Members::new(),
            included: Vec::new(),
        }
    }

    /// Identity of the class this template was built for
    pub fn class_id(&self) -> &ClassId {
        &self.class
    }

    /// Classes composed into this template, in inclusion order
    pub fn included_classes(&self) -> &[ClassDef] {
        &self.included
    }

    /// Compose another class into this template.
    ///
    /// If the inclusion record already holds a compatible, equal-or-newer entry
    /// for the same class, this is a silent no-op: the initializer does not run
    /// again and the record is untouched. A caret-incompatible same-named entry
    /// is a [`ModelError::VersionConflict`]. Otherwise the other class's
    /// initializer runs against this template (recursively including its own
    /// ancestors) and the class is appended to the record.
    pub fn include(&mut self, other: &ClassDef) -> Result<(), ModelError> {
        for existing in &self.included {
            match coverage(other.id(), existing.id()) {
                Coverage::Covered => {
                    debug!(
                        class = %other.id(),
                        covered_by = %existing.id(),
                        "inclusion skipped, already covered"
                    );
                    return Ok(());
                }
                Coverage::Conflict => {
                    return Err(ModelError::VersionConflict {
                        class: other.name().to_string(),
                        candidate: other.id().version_string(),
                        existing: existing.id().version_string(),
                    });
                }
                Coverage::Unrelated | Coverage::Newer => {}
            }
        }

        other.run_initializer(self)?;
        debug!(class = %other.id(), "class included");
        self.included.push(other.clone());
        Ok(())
    }

    /// Membership query: does this template carry `other`?
    ///
    /// True when the defining class or any included class is covered by
    /// `other`. Pure; an incompatible same-named version simply yields false.
    pub fn is_instance_of(&self, other: &ClassDef) -> bool {
        if coverage(&self.class, other.id()) == Coverage::Covered {
            return true;
        }
        self.included
            .iter()
            .any(|c| coverage(c.id(), other.id()) == Coverage::Covered)
    }

    /// Set a member on the template under construction
    pub fn set_member(&mut self, key: &str, member: Member) {
        self.members.insert(key.to_string(), member);
    }

    /// Set a plain data member
    pub fn set_value(&mut self, key: &str, value: serde_json::Value) {
        self.set_member(key, Member::Value(value));
    }

    /// Set a method member
    pub fn set_method<F>(&mut self, key: &str, f: F)
    where
        F: Fn(&crate::instance::Instance) -> serde_json::Value + Send + Sync + 'static,
    {
        self.set_member(key, Member::method(f));
    }

    /// Look up a member by name
    pub fn get(&self, key: &str) -> Option<&Member> {
        self.members.get(key)
    }

    pub fn has_member(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }
}

//! Class descriptors
//!
//! A [`ClassDef`] is a named, optionally versioned template for instances. New
//! classes are derived from existing ones with [`ClassDef::extend`]; the chain
//! bottoms out at [`ClassDef::base`]. Each descriptor memoizes one composed
//! [`Template`] shared by reference across all of its instances.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use semver::Version;
use tracing::debug;

use crate::error::ModelError;
use crate::instance::Instance;
use crate::member::{Members, Properties};
use crate::template::Template;

/// Class identity: name plus optional semantic version.
///
/// Two descriptors are the same named class iff their names are string-equal.
/// An absent version means unversioned, compatible with any version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassId {
    pub name: String,
    pub version: Option<Version>,
}

impl ClassId {
    /// Version rendered for diagnostics; "unversioned" when absent
    pub fn version_string(&self) -> String {
        match &self.version {
            Some(v) => v.to_string(),
            None => "unversioned".to_string(),
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}@{}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}

type InitFn = Arc<dyn Fn(&mut Template) -> Result<(), ModelError> + Send + Sync>;

/// The body of a subclass: code run against the template under construction,
/// or a plain member map copied in as static per-instance data
#[derive(Clone)]
enum Body {
    Init(InitFn),
    Members(Members),
}

/// Specification for a subclass, consumed by [`ClassDef::extend`]
#[derive(Clone, Default)]
pub struct Subclass {
    name: Option<String>,
    version: Option<String>,
    body: Option<Body>,
}

impl Subclass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the new class. Defaults to `Sub<ParentName>` when omitted.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Semantic version (`MAJOR.MINOR.PATCH`) of the new class
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Body as code: runs against the template being composed and may include
    /// further classes through it
    pub fn init<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Template) -> Result<(), ModelError> + Send + Sync + 'static,
    {
        self.body = Some(Body::Init(Arc::new(f)));
        self
    }

    /// Body as data: members copied onto the template as-is
    pub fn members(mut self, members: Members) -> Self {
        self.body = Some(Body::Members(members));
        self
    }
}

struct ClassInner {
    id: ClassId,
    initializer: InitFn,
    /// Class-level own data members; keys starting with `_` stay private to
    /// this descriptor and are never copied to children
    props: RwLock<Properties>,
    /// Memoized composed template; written once, identity stable afterwards
    template: RwLock<Option<Arc<Template>>>,
}

/// A class descriptor. Cheap to clone; clones share the same descriptor.
#[derive(Clone)]
pub struct ClassDef {
    inner: Arc<ClassInner>,
}

impl ClassDef {
    /// The root class every extension chain bottoms out at: named `Base`,
    /// unversioned, with an empty initializer.
    pub fn base() -> ClassDef {
        ClassDef::from_parts(
            ClassId {
                name: "Base".to_string(),
                version: None,
            },
            Arc::new(|_| Ok(())),
            Properties::new(),
        )
    }

    fn from_parts(
        id: ClassId,
        initializer: InitFn,
        props: Properties,
    ) -> ClassDef {
        ClassDef {
            inner: Arc::new(ClassInner {
                id,
                initializer,
                props: RwLock::new(props),
                template: RwLock::new(None),
            }),
        }
    }

    /// Derive a new class from this one.
    ///
    /// The child's own props are a shallow copy of the parent's non-underscore
    /// props, and its initializer first includes the parent, then applies the
    /// body from `spec` (if any).
    pub fn extend(&self, spec: Subclass) -> Result<ClassDef, ModelError> {
        let name = match spec.name {
            Some(name) => {
                if name.is_empty() {
                    return Err(ModelError::InvalidName);
                }
                name
            }
            None => format!("Sub{}", self.name()),
        };

        let version = match spec.version {
            Some(raw) => Some(Version::parse(&raw).map_err(|source| {
                ModelError::InvalidVersion {
                    class: name.clone(),
                    version: raw,
                    source,
                }
            })?),
            None => None,
        };

        // Copy class props, skipping private (underscore-prefixed) keys
        let props: Properties = self
            .inner
            .props
            .read()
            .iter()
            .filter(|(k, _)| !k.starts_with('_'))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let parent = self.clone();
        let body = spec.body;
        let initializer: InitFn = Arc::new(move |template: &mut Template| {
            template.include(&parent)?;
            match &body {
                Some(Body::Init(f)) => f(template)?,
                Some(Body::Members(members)) => {
                    for (key, member) in members {
                        template.set_member(key, member.clone());
                    }
                }
                None => {}
            }
            Ok(())
        });

        Ok(ClassDef::from_parts(ClassId { name, version }, initializer, props))
    }

    /// Class identity
    pub fn id(&self) -> &ClassId {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.id.name
    }

    pub fn version(&self) -> Option<&Version> {
        self.inner.id.version.as_ref()
    }

    /// Set a class-level own data member. Underscore-prefixed keys stay
    /// private to this descriptor.
    pub fn set_prop(&self, key: &str, value: serde_json::Value) {
        self.inner.props.write().insert(key.to_string(), value);
    }

    /// Get a class-level own data member
    pub fn prop(&self, key: &str) -> Option<serde_json::Value> {
        self.inner.props.read().get(key).cloned()
    }

    pub fn has_prop(&self, key: &str) -> bool {
        self.inner.props.read().contains_key(key)
    }

    /// The composed template, built on first call and cached.
    ///
    /// Building runs the initializer against a fresh template, which pulls in
    /// ancestors through the composition engine. Double-checked locking keeps
    /// two threads from racing to build two templates for one descriptor.
    pub fn template(&self) -> Result<Arc<Template>, ModelError> {
        if let Some(template) = self.inner.template.read().as_ref() {
            return Ok(template.clone());
        }

        let mut slot = self.inner.template.write();
        if let Some(template) = slot.as_ref() {
            return Ok(template.clone());
        }

        let mut template = Template::new(self.inner.id.clone());
        (self.inner.initializer)(&mut template)?;
        debug!(class = %self.inner.id, "template composed");

        let template = Arc::new(template);
        *slot = Some(template.clone());
        Ok(template)
    }

    /// Create an instance backed by the shared template. Never re-runs an
    /// initializer; composition happened when the template was first built.
    pub fn instantiate(&self) -> Result<Instance, ModelError> {
        Ok(Instance::new(self.template()?))
    }

    /// Does `instance` belong to this class, directly or through inclusion?
    pub fn is_class_of(&self, instance: &Instance) -> bool {
        instance.is_instance_of(self)
    }

    pub(crate) fn run_initializer(&self, template: &mut Template) -> Result<(), ModelError> {
        (self.inner.initializer)(template)
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}

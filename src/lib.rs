//! protomix - runtime class model with mixin composition
//!
//! Classes are descriptors (name, optional semantic version, initializer)
//! composed through multiple inclusion rather than single-parent inheritance.
//! Each descriptor memoizes one shared template; the composition engine
//! deduplicates diamond-shaped inclusion graphs and resolves same-named
//! classes of different versions through caret-range compatibility.

pub mod class;
pub mod error;
pub mod instance;
pub mod member;
pub mod template;
pub mod version;

pub use class::{ClassDef, ClassId, Subclass};
pub use error::ModelError;
pub use instance::Instance;
pub use member::{Member, Members, MethodFn, Properties};
pub use template::{coverage, Coverage, Template};
pub use version::caret_compatible;

//! Bind environment variables into annotated configuration structs.
//!
//! # Overview
//! Derive [`Record`] on a struct and annotate its fields with
//! `#[env(key = "...", default = "...")]`. [`load`] then walks the struct
//! depth-first, recursing into nested records and boxed records, and fills
//! each annotated scalar from the process environment.
//!
//! - Integer fields (`i8` to `i128`, `isize`) parse as base-10 `i64`.
//!   Narrower widths take the native `as` conversion.
//! - Float fields parse as `f64`.
//! - `bool` fields accept exactly `true` or `false`.
//! - `String` fields take the raw value.
//!
//! A default is used only when the variable is absent and the default is
//! non-empty. Otherwise an absent variable leaves the field as it was.
//! Unannotated scalar fields are never touched.
//!
//! Nested records must not carry an annotation. Neither may any type outside
//! the scalar set above. Use `#[env(skip)]` for fields whose type does not
//! implement [`Bindable`].
//!
//! # Examples
//! ```rust,no_run
//! use envconf::Record;
//!
//! #[derive(Debug, Default, Record)]
//! struct Database {
//!     #[env(key = "DATABASE_URL")]
//!     url: String,
//!     #[env(key = "DATABASE_POOL", default = "8")]
//!     pool: i32,
//! }
//!
//! #[derive(Debug, Default, Record)]
//! struct Config {
//!     #[env(key = "PORT", default = "8080")]
//!     port: i64,
//!     #[env(key = "DEBUG")]
//!     debug: bool,
//!     database: Database,
//! }
//!
//! let mut cfg = Config::default();
//! envconf::load(&mut cfg).expect("configuration must be valid");
//! println!("listening on {}", cfg.port);
//! ```

extern crate self as envconf;

mod binder;
pub mod error;
pub mod kind;
pub mod source;

pub use envconf_derive::Record;
pub use error::{LoadError, ValueError};
pub use kind::{Annotation, Bindable, Field, FieldVisitor, Kind, Record, Slot};
pub use source::{ProcessEnv, Source};

use binder::Binder;
use tracing::debug;

/// Load `target` from the process environment.
///
/// See [`Loader::load`].
///
/// # Errors
///
/// Returns the first [`LoadError`] met during the walk.
pub fn load<T: Bindable>(target: &mut T) -> Result<(), LoadError> {
    Loader::new().load(target)
}

/// Binds records from a [`Source`].
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use envconf::{Loader, Record};
///
/// #[derive(Default, Record)]
/// struct Config {
///     #[env(key = "PORT", default = "8080")]
///     port: i64,
/// }
///
/// let vars = HashMap::from([("PORT".to_owned(), "9090".to_owned())]);
/// let mut cfg = Config::default();
/// Loader::with_source(vars).load(&mut cfg).expect("load");
/// assert_eq!(cfg.port, 9090);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Loader<S = ProcessEnv> {
    source: S,
}

impl Loader {
    /// A loader reading the process environment.
    #[must_use]
    pub const fn new() -> Self {
        Self { source: ProcessEnv }
    }
}

impl<S: Source> Loader<S> {
    /// A loader reading from `source`.
    pub const fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Bind every annotated field reachable from `target`.
    ///
    /// The target must be a record or a boxed record. Fields are processed in
    /// declaration order, depth first. Binding is not atomic: if an error is
    /// returned, fields visited before the failure keep their new values.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Type`] if `target` is not a record. No field is touched.
    /// - [`LoadError::Schema`] if a nested record or an unsupported type
    ///   carries an `env` annotation.
    /// - [`LoadError::Parse`] if a value or default does not parse into its
    ///   field.
    pub fn load<T: Bindable>(&self, target: &mut T) -> Result<(), LoadError> {
        match target.slot() {
            Slot::Struct(record) | Slot::Boxed(record) => {
                debug!(target_type = std::any::type_name::<T>(), "loading configuration");
                Binder::new(&self.source).walk(record)
            }
            other => Err(LoadError::Type { kind: other.kind() }),
        }
    }
}

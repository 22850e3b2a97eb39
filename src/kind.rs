//! Field schema shared by the derive macro and the binder.
//!
//! A configuration type describes its fields to the binder through
//! [`Record::visit_fields`]. Each field hands over a [`Slot`]: a mutable
//! borrow tagged with the field's kind, so the binder can dispatch on a closed
//! set of variants instead of inspecting types at run time.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::LoadError;

/// The kind of a field as seen by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    F32,
    F64,
    Bool,
    String,
    /// A nested record traversed in place.
    Struct,
    /// An owned record traversed through its box.
    Boxed,
    /// Any other type. The name is used in error messages.
    Unsupported(&'static str),
}

impl Kind {
    /// Human-readable name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::String => "String",
            Self::Struct => "struct",
            Self::Boxed => "Box",
            Self::Unsupported(name) => name,
        }
    }

    /// Returns whether fields of this kind may carry an `env` annotation.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        !matches!(self, Self::Struct | Self::Boxed | Self::Unsupported(_))
    }

    /// Returns whether fields of this kind are traversed recursively.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Struct | Self::Boxed)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mutable view of one field, tagged by kind.
pub enum Slot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
    String(&'a mut String),
    Struct(&'a mut dyn Record),
    Boxed(&'a mut dyn Record),
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// The kind of the borrowed field.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::I8(_) => Kind::I8,
            Self::I16(_) => Kind::I16,
            Self::I32(_) => Kind::I32,
            Self::I64(_) => Kind::I64,
            Self::I128(_) => Kind::I128,
            Self::Isize(_) => Kind::Isize,
            Self::F32(_) => Kind::F32,
            Self::F64(_) => Kind::F64,
            Self::Bool(_) => Kind::Bool,
            Self::String(_) => Kind::String,
            Self::Struct(_) => Kind::Struct,
            Self::Boxed(_) => Kind::Boxed,
            Self::Unsupported(name) => Kind::Unsupported(*name),
        }
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.kind()).finish()
    }
}

/// Binding metadata attached to a field by `#[env(...)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    /// Environment variable name.
    pub key: &'static str,
    /// Fallback literal used when the variable is absent. An empty literal
    /// counts as no default.
    pub default: Option<&'static str>,
}

impl Annotation {
    #[must_use]
    pub const fn new(key: &'static str, default: Option<&'static str>) -> Self {
        Self { key, default }
    }

    /// The default literal, if one was given and it is non-empty.
    #[must_use]
    pub fn fallback(&self) -> Option<&'static str> {
        self.default.filter(|d| !d.is_empty())
    }
}

/// A field handed to a [`FieldVisitor`].
#[derive(Debug)]
pub struct Field<'a> {
    pub name: &'static str,
    pub annotation: Option<Annotation>,
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    #[must_use]
    pub const fn new(name: &'static str, annotation: Option<Annotation>, slot: Slot<'a>) -> Self {
        Self {
            name,
            annotation,
            slot,
        }
    }
}

/// Receives the fields of a [`Record`] in declaration order.
pub trait FieldVisitor {
    /// Handle one field.
    ///
    /// # Errors
    ///
    /// Returning an error stops the walk. The error is passed back unchanged
    /// from [`Record::visit_fields`].
    fn visit(&mut self, field: Field<'_>) -> Result<(), LoadError>;
}

/// A structured configuration value.
///
/// Usually implemented with `#[derive(Record)]`.
pub trait Record {
    /// Present every field to `visitor`, in declaration order.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the visitor.
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor) -> Result<(), LoadError>;
}

/// Types that can appear as fields of a [`Record`].
pub trait Bindable {
    /// Borrow `self` as a kind-tagged slot.
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! leaf {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

leaf! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
}

macro_rules! unsupported {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Unsupported($name)
                }
            }
        )*
    };
}

unsupported! {
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    char => "char",
    PathBuf => "PathBuf",
    OsString => "OsString",
    Duration => "Duration",
}

impl<T> Bindable for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("Option")
    }
}

impl<T> Bindable for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("Vec")
    }
}

impl<K, V, S> Bindable for HashMap<K, V, S> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("HashMap")
    }
}

impl<T, S> Bindable for HashSet<T, S> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("HashSet")
    }
}

impl<K, V> Bindable for BTreeMap<K, V> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("BTreeMap")
    }
}

impl<T: Bindable + ?Sized> Bindable for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        match (**self).slot() {
            Slot::Struct(record) | Slot::Boxed(record) => Slot::Boxed(record),
            _ => Slot::Unsupported("Box"),
        }
    }
}

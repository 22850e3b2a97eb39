//! Depth-first traversal and scalar binding.

use std::ffi::OsString;

use tracing::{debug, trace};

use crate::error::{LoadError, ValueError};
use crate::kind::{Annotation, Field, FieldVisitor, Record, Slot};
use crate::source::Source;

/// Walks a record and binds annotated leaves from `source`.
pub(crate) struct Binder<'s, S: ?Sized> {
    source: &'s S,
    path: Vec<&'static str>,
}

impl<'s, S: Source + ?Sized> Binder<'s, S> {
    pub(crate) const fn new(source: &'s S) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Bind every reachable field of `record`.
    pub(crate) fn walk(&mut self, record: &mut dyn Record) -> Result<(), LoadError> {
        record.visit_fields(self)
    }

    fn qualified(&self, name: &str) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        path
    }

    fn descend(&mut self, name: &'static str, record: &mut dyn Record) -> Result<(), LoadError> {
        self.path.push(name);
        let result = self.walk(record);
        self.path.pop();
        result
    }

    fn bind(
        &self,
        name: &'static str,
        annotation: Annotation,
        slot: Slot<'_>,
    ) -> Result<(), LoadError> {
        let kind = slot.kind();
        if !kind.is_leaf() {
            return Err(LoadError::Schema {
                field: self.qualified(name),
                kind,
            });
        }

        let raw = match self.source.var(annotation.key) {
            Some(raw) => raw,
            None => {
                let Some(fallback) = annotation.fallback() else {
                    trace!(key = annotation.key, field = %self.qualified(name), "variable unset, field left unchanged");
                    return Ok(());
                };
                debug!(key = annotation.key, field = %self.qualified(name), "variable unset, applying default");
                OsString::from(fallback)
            }
        };

        let parse_error = |source: ValueError| LoadError::Parse {
            key: annotation.key.to_owned(),
            field: self.qualified(name),
            kind,
            source,
        };
        let value = raw
            .into_string()
            .map_err(|_| parse_error(ValueError::NotUnicode))?;
        assign(slot, &value).map_err(parse_error)?;
        debug!(key = annotation.key, field = %self.qualified(name), "bound field");
        Ok(())
    }
}

impl<S: Source + ?Sized> FieldVisitor for Binder<'_, S> {
    fn visit(&mut self, field: Field<'_>) -> Result<(), LoadError> {
        let Field {
            name,
            annotation,
            slot,
        } = field;
        match (slot, annotation) {
            (Slot::Boxed(record), None) | (Slot::Struct(record), None) => {
                self.descend(name, record)
            }
            (slot @ (Slot::Boxed(_) | Slot::Struct(_)), Some(_)) => Err(LoadError::Schema {
                field: self.qualified(name),
                kind: slot.kind(),
            }),
            (slot, None) => {
                trace!(field = %self.qualified(name), kind = %slot.kind(), "skipping unannotated field");
                Ok(())
            }
            (slot, Some(annotation)) => self.bind(name, annotation, slot),
        }
    }
}

/// Parse `value` according to the slot's kind and store it.
#[expect(
    clippy::cast_possible_truncation,
    reason = "narrower integer and float fields take the native `as` conversion"
)]
fn assign(slot: Slot<'_>, value: &str) -> Result<(), ValueError> {
    match slot {
        Slot::I8(v) => *v = parse_int(value)? as i8,
        Slot::I16(v) => *v = parse_int(value)? as i16,
        Slot::I32(v) => *v = parse_int(value)? as i32,
        Slot::I64(v) => *v = parse_int(value)?,
        Slot::I128(v) => *v = i128::from(parse_int(value)?),
        Slot::Isize(v) => *v = parse_int(value)? as isize,
        Slot::F32(v) => *v = parse_float(value)? as f32,
        Slot::F64(v) => *v = parse_float(value)?,
        Slot::Bool(v) => *v = parse_bool(value)?,
        Slot::String(v) => value.clone_into(v),
        Slot::Struct(_) | Slot::Boxed(_) | Slot::Unsupported(_) => {
            unreachable!("non-leaf kinds are rejected before parsing")
        }
    }
    Ok(())
}

fn parse_int(value: &str) -> Result<i64, ValueError> {
    Ok(value.parse::<i64>()?)
}

fn parse_float(value: &str) -> Result<f64, ValueError> {
    Ok(value.parse::<f64>()?)
}

fn parse_bool(value: &str) -> Result<bool, ValueError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ValueError::Bool(other.to_owned())),
    }
}

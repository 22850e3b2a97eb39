//! Where binding keys are looked up.
//!
//! [`ProcessEnv`] reads the host environment and is what [`crate::load`]
//! uses. Maps implement [`Source`] too, which keeps tests and embedders away
//! from global process state.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::hash::BuildHasher;

/// A read-only table of environment variables.
pub trait Source {
    /// Look up `key` by exact match. Returns `None` when it is absent.
    fn var(&self, key: &str) -> Option<OsString>;
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn var(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl<H: BuildHasher> Source for HashMap<String, String, H> {
    fn var(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl Source for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn var(&self, key: &str) -> Option<OsString> {
        (**self).var(key)
    }
}

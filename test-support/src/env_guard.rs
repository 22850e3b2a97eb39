//! Scoped changes to the process environment.
//!
//! `EnvVarGuard` sets or removes a variable and restores the previous value on
//! drop. Tests that use it must run under `#[serial_test::serial]`, since the
//! environment is shared by every thread in the process.

#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    /// Set an environment variable for the lifetime of the returned guard.
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        set_env_var(key, value);
        Self {
            key: key.to_string(),
            original,
        }
    }

    /// Remove an environment variable for the lifetime of the returned guard.
    ///
    /// On drop the original value is restored if it was previously set.
    pub fn remove(key: &str) -> Self {
        let original = std::env::var(key).ok();
        remove_env_var(key);
        Self {
            key: key.to_string(),
            original,
        }
    }

    /// Apply several assignments at once.
    ///
    /// `None` removes the variable. Guards are returned in input order, so
    /// dropping the vector restores each key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use test_support::EnvVarGuard;
    ///
    /// let _env = EnvVarGuard::apply(&[("APP_PORT", Some("9090")), ("APP_NAME", None)]);
    /// assert_eq!(std::env::var("APP_PORT").as_deref(), Ok("9090"));
    /// ```
    pub fn apply(vars: &[(&str, Option<&str>)]) -> Vec<Self> {
        vars.iter()
            .map(|(key, value)| match value {
                Some(value) => Self::set(key, value),
                None => Self::remove(key),
            })
            .collect()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(v) => set_env_var(&self.key, v),
            None => remove_env_var(&self.key),
        }
    }
}

/// SAFETY: Must only be called from serial test contexts.
fn set_env_var(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

/// SAFETY: Must only be called from serial test contexts.
fn remove_env_var(key: &str) {
    unsafe { std::env::remove_var(key) };
}

//! # Optional Dependencies
//!
//! Some rules need a heavy or platform-specific backend that may be absent
//! at runtime (a linguistic lexicon, a tagger model, ...). A missing
//! backend must not take the registry down with it. Instead, capability
//! detection runs once at startup and produces an [`OptionalDependency`];
//! registration then picks one of two rule variants:
//!
//! - the full rule, built from the detected backend handle;
//! - a stub with the same id, name and rationale whose validator always
//!   fails and whose actions end with an instruction to install the
//!   missing dependency.
//!
//! See [`Registration::with_optional_validator`](crate::context::Registration::with_optional_validator).

use std::fmt;

/// Outcome of probing for an optional backend.
pub struct OptionalDependency<T> {
    name: String,
    install_hint: String,
    handle: Option<T>,
}

impl<T> OptionalDependency<T> {
    /// A dependency that was found.
    pub fn available(name: impl Into<String>, install_hint: impl Into<String>, handle: T) -> Self {
        Self {
            name: name.into(),
            install_hint: install_hint.into(),
            handle: Some(handle),
        }
    }

    /// A dependency that was not found.
    pub fn missing(name: impl Into<String>, install_hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            install_hint: install_hint.into(),
            handle: None,
        }
    }

    /// Run `probe` and record whether it produced a backend handle.
    pub fn detect<Err: fmt::Display>(
        name: impl Into<String>,
        install_hint: impl Into<String>,
        probe: impl FnOnce() -> Result<T, Err>,
    ) -> Self {
        let name = name.into();
        match probe() {
            Ok(handle) => {
                tracing::debug!(dependency = %name, "optional dependency available");
                Self::available(name, install_hint, handle)
            }
            Err(e) => {
                tracing::info!(dependency = %name, error = %e, "optional dependency unavailable");
                Self::missing(name, install_hint)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_available(&self) -> bool {
        self.handle.is_some()
    }

    /// The remediation action attached to stub rules.
    pub fn remediation(&self) -> String {
        format!(
            "Install the optional dependency `{}`: {}",
            self.name, self.install_hint
        )
    }

    pub fn into_handle(self) -> Option<T> {
        self.handle
    }
}

impl<T> fmt::Debug for OptionalDependency<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalDependency")
            .field("name", &self.name)
            .field("available", &self.is_available())
            .finish_non_exhaustive()
    }
}

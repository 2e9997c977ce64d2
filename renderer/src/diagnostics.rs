//! Recoverable-condition channel.
//!
//! Programmer errors (binding discipline, null handles) panic. Everything a
//! running harness should survive is raised as a [`Warning`]: logged through
//! `log::warn!` and handed back to the caller inside a [`Diagnosed`] value.

use super::{Attribute, ShaderStage};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Warning {
    #[error("mesh loaded without {0}")]
    MissingAttribute(Attribute),
    #[error("mesh loaded without index buffer")]
    MissingIndexBuffer,
    #[error("shader ({path}) not found: {reason}")]
    ShaderNotFound { path: PathBuf, reason: String },
    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("program failed to link:\n{log}")]
    ProgramLink { log: String },
    #[error("shader {program} failed to send uniform {name}")]
    UniformNotFound { program: u32, name: String },
}

/// What a context does with a raised warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningPolicy {
    /// Log it and keep going with the degraded result.
    Report,
    /// Treat it as fatal. Useful for strict test runs.
    Escalate,
}

impl Default for WarningPolicy {
    fn default() -> Self {
        WarningPolicy::Report
    }
}

impl WarningPolicy {
    pub(crate) fn raise(self, warning: Warning) -> Warning {
        log::warn!("{}", warning);

        if self == WarningPolicy::Escalate {
            panic!("escalated warning: {}", warning);
        }

        warning
    }
}

/// A value together with the warnings raised while producing it.
#[derive(Debug)]
pub struct Diagnosed<T> {
    value: T,
    warnings: Vec<Warning>,
}

impl<T> Diagnosed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    pub(crate) fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<Warning>) {
        (self.value, self.warnings)
    }

    /// Fails with the first warning, if any was raised.
    pub fn strict(self) -> Result<T, Warning> {
        match self.warnings.into_iter().next() {
            Some(warning) => Err(warning),
            None => Ok(self.value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Diagnosed<U> {
        Diagnosed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_returns_first_warning() {
        let diagnosed = Diagnosed::with_warnings(
            3,
            vec![
                Warning::MissingIndexBuffer,
                Warning::MissingAttribute(Attribute::Normal),
            ],
        );

        assert_eq!(diagnosed.strict(), Err(Warning::MissingIndexBuffer));
        assert_eq!(Diagnosed::clean(3).strict(), Ok(3));
    }

    #[test]
    fn warning_messages_name_the_missing_piece() {
        assert_eq!(
            Warning::MissingAttribute(Attribute::TexCoord).to_string(),
            "mesh loaded without texture coordinates"
        );
        assert_eq!(
            Warning::UniformNotFound {
                program: 4,
                name: "u_mvp".into()
            }
            .to_string(),
            "shader 4 failed to send uniform u_mvp"
        );
    }

    #[test]
    #[should_panic(expected = "escalated warning: mesh loaded without index buffer")]
    fn escalate_policy_panics() {
        WarningPolicy::Escalate.raise(Warning::MissingIndexBuffer);
    }
}

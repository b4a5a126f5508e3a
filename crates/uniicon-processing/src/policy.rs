//! Centralized fallback policy.
//!
//! Every stage with a local fallback reports its primary outcome here; the
//! policy alone decides whether a failure is replaced or propagated.

use std::fmt::Display;

use crate::error::Stage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackPolicy {
    fallbacks_disabled: bool,
}

impl FallbackPolicy {
    pub fn new(fallbacks_disabled: bool) -> Self {
        Self { fallbacks_disabled }
    }

    /// Policy that never substitutes
    pub fn strict() -> Self {
        Self::new(true)
    }

    pub fn fallbacks_disabled(&self) -> bool {
        self.fallbacks_disabled
    }

    /// Resolve a stage's primary outcome.
    ///
    /// A failure is replaced by `fallback()` only when fallbacks are enabled
    /// and `substitutable` accepts the error; otherwise the error is returned.
    pub fn apply<T, E, S, F>(
        &self,
        stage: Stage,
        primary: Result<T, E>,
        substitutable: S,
        fallback: F,
    ) -> Result<T, E>
    where
        E: Display,
        S: FnOnce(&E) -> bool,
        F: FnOnce() -> T,
    {
        let error = match primary {
            Ok(value) => {
                tracing::debug!(stage = %stage, "Stage primary path succeeded");
                return Ok(value);
            }
            Err(error) => error,
        };

        if self.fallbacks_disabled {
            tracing::error!(stage = %stage, error = %error, "Stage failed and fallbacks are disabled");
            return Err(error);
        }

        if !substitutable(&error) {
            tracing::warn!(stage = %stage, error = %error, "Stage failed with a non-substitutable error");
            return Err(error);
        }

        tracing::warn!(stage = %stage, error = %error, "Stage failed, substituting local fallback");
        Ok(fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &String) -> bool {
        true
    }

    #[test]
    fn test_success_passes_through() {
        let policy = FallbackPolicy::default();
        let value = policy.apply(Stage::Extracting, Ok::<_, String>(1), always, || 2);
        assert_eq!(value, Ok(1));
    }

    #[test]
    fn test_failure_is_substituted() {
        let policy = FallbackPolicy::default();
        let value = policy.apply(Stage::Generating, Err("down".to_string()), always, || 2);
        assert_eq!(value, Ok(2));
    }

    #[test]
    fn test_disabled_policy_propagates_without_calling_fallback() {
        let policy = FallbackPolicy::strict();
        let value = policy.apply(
            Stage::Cleaning,
            Err::<i32, _>("down".to_string()),
            always,
            || panic!("fallback must not run"),
        );
        assert_eq!(value, Err("down".to_string()));
    }

    #[test]
    fn test_non_substitutable_error_propagates() {
        let policy = FallbackPolicy::default();
        let value = policy.apply(
            Stage::Generating,
            Err::<i32, _>("throttled".to_string()),
            |_| false,
            || 2,
        );
        assert!(value.is_err());
    }
}

//! Validation type aliases and helpers.
//!
//! Declarations are checked with stillwater's `Validation`, which keeps
//! going after the first problem so every bad field is reported in one run.
//!
//! # Example
//!
//! ```rust
//! use phoid::effects::{combine_validations, validation_failure, validation_success, IdValidation};
//! use phoid::errors::IdError;
//!
//! let checks: Vec<IdValidation<()>> = vec![
//!     validation_success(()),
//!     validation_failure(IdError::validation("barrel.h_over_e", "must be positive")),
//!     validation_failure(IdError::validation("endcap.h_over_e", "must be positive")),
//! ];
//!
//! let err = phoid::effects::into_result(combine_validations(checks)).unwrap_err();
//! assert_eq!(err.into_errors().len(), 2);
//! ```

use crate::errors::{IdError, IdResult};
use stillwater::{NonEmptyVec, Validation};

/// Error collection type for validation accumulation.
pub type IdErrors = NonEmptyVec<IdError>;

/// Validation that accumulates every `IdError` instead of stopping at the first.
pub type IdValidation<T> = Validation<T, IdErrors>;

pub fn validation_success<T>(value: T) -> IdValidation<T> {
    Validation::Success(value)
}

pub fn validation_failure<T>(error: IdError) -> IdValidation<T> {
    Validation::Failure(NonEmptyVec::new(error, Vec::new()))
}

/// Create a failed validation result with multiple errors.
///
/// An empty vector still fails, with a generic error, so the failure is
/// never silently dropped.
pub fn validation_failures<T>(errors: Vec<IdError>) -> IdValidation<T> {
    match NonEmptyVec::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => validation_failure(IdError::validation("<unknown>", "empty error set")),
    }
}

/// Turn collected problems into a validation.
///
/// An empty vector yields a success, so callers can collect problems into a
/// `Vec` and hand it over unconditionally.
pub fn validation_from_errors(errors: Vec<IdError>) -> IdValidation<()> {
    match NonEmptyVec::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// Combine multiple validations, accumulating all errors.
///
/// If every validation succeeded the successes are collected in order.
pub fn combine_validations<T>(validations: Vec<IdValidation<T>>) -> IdValidation<Vec<T>> {
    let mut successes = Vec::new();
    let mut failures: Vec<IdError> = Vec::new();

    for v in validations {
        match v {
            Validation::Success(value) => successes.push(value),
            Validation::Failure(errors) => failures.extend(errors),
        }
    }

    match NonEmptyVec::from_vec(failures) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(successes),
    }
}

/// Convert a validation into a `Result`, collapsing accumulated errors.
pub fn into_result<T>(validation: IdValidation<T>) -> IdResult<T> {
    match validation {
        Validation::Success(value) => Ok(value),
        Validation::Failure(errors) => Err(IdError::from_many(errors.into_vec())),
    }
}

/// Lift a `Result` into a validation so it can be combined with others.
pub fn from_result<T>(result: IdResult<T>) -> IdValidation<T> {
    match result {
        Ok(value) => validation_success(value),
        Err(err) => validation_failures(err.into_errors()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_collects_successes_in_order() {
        let combined = combine_validations(vec![validation_success(1), validation_success(2)]);
        assert_eq!(into_result(combined).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_combine_collects_all_failures() {
        let combined = combine_validations(vec![
            validation_success(1),
            validation_failure(IdError::config("first")),
            validation_failure(IdError::config("second")),
        ]);
        let errors = into_result(combined).unwrap_err().into_errors();
        assert_eq!(
            errors,
            vec![IdError::config("first"), IdError::config("second")]
        );
    }

    #[test]
    fn test_validation_from_empty_errors_is_success() {
        assert!(validation_from_errors(Vec::new()).is_success());
        assert!(validation_from_errors(vec![IdError::config("x")]).is_failure());
    }

    #[test]
    fn test_from_result_round_trips_multiple() {
        let err = IdError::from_many(vec![IdError::config("a"), IdError::config("b")]);
        let v: IdValidation<()> = from_result(Err(err.clone()));
        assert_eq!(into_result(v).unwrap_err(), err);
    }
}

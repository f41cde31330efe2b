//! Checks run on working points and isolation inputs before a cut flow is built.
//!
//! Every check returns an [`IdValidation`] so a builder reports all problems
//! with a declaration at once, each tagged with the field it concerns.

use crate::core::{
    IdScheme, IsoCoefficients, IsolationCutInputs, IsolationFlavor, Region, WorkingPoint,
};
use crate::effects::{combine_validations, validation_from_errors, IdValidation};
use crate::errors::IdError;

/// Validate one region's working point for a builder of the `expected` scheme.
pub fn validate_working_point(
    wp: &WorkingPoint,
    region: Region,
    expected: IdScheme,
) -> IdValidation<()> {
    let prefix = region.as_str();
    let mut errors = Vec::new();

    if wp.id_name().trim().is_empty() {
        errors.push(IdError::validation(
            format!("{}.id_name", prefix),
            "identifier cannot be empty",
        ));
    }
    if has_control_characters(wp.id_name()) {
        errors.push(IdError::validation(
            format!("{}.id_name", prefix),
            "identifier cannot contain control characters",
        ));
    }

    if wp.scheme() != expected {
        errors.push(IdError::validation(
            format!("{}.shower_shape", prefix),
            format!(
                "{} working point given to a {} builder",
                wp.scheme(),
                expected
            ),
        ));
    }

    let shape = wp.shower_shape();
    errors.extend(check_positive(
        format!("{}.{}", prefix, shape.primary_name()),
        shape.primary(),
    ));
    errors.extend(check_positive(
        format!("{}.full5x5_sigma_ieta_ieta", prefix),
        shape.full5x5_sigma_ieta_ieta(),
    ));

    for flavor in IsolationFlavor::ALL {
        errors.extend(check_coefficients(
            &format!("{}.{}", prefix, flavor.key()),
            flavor,
            &wp.isolation().get(flavor),
        ));
    }

    validation_from_errors(errors)
}

/// Barrel and endcap points of one ID must carry the same identifier.
pub fn validate_pair(barrel: &WorkingPoint, endcap: &WorkingPoint) -> IdValidation<()> {
    if barrel.id_name() == endcap.id_name() {
        validation_from_errors(Vec::new())
    } else {
        validation_from_errors(vec![IdError::validation(
            "endcap.id_name",
            format!(
                "'{}' does not match barrel identifier '{}'",
                endcap.id_name(),
                barrel.id_name()
            ),
        )])
    }
}

pub fn validate_isolation_inputs(
    inputs: &IsolationCutInputs,
    expected: IdScheme,
) -> IdValidation<()> {
    let mut errors = Vec::new();

    if inputs.scheme() != expected {
        errors.push(IdError::validation(
            "isolation_inputs",
            format!(
                "{} isolation inputs given to a {} builder",
                inputs.scheme(),
                expected
            ),
        ));
    }

    for (flavor, input) in inputs.iter() {
        let field = format!("isolation_inputs.{}.effective_areas", flavor.key());
        if input.effective_areas.as_os_str().is_empty() {
            errors.push(IdError::validation(
                field,
                "effective-area table path cannot be empty",
            ));
        } else if has_control_characters(&input.effective_areas.to_string_lossy()) {
            errors.push(IdError::validation(
                field,
                "effective-area table path cannot contain control characters",
            ));
        }
    }

    validation_from_errors(errors)
}

/// All checks a builder runs, accumulated.
pub fn validate_declaration(
    barrel: &WorkingPoint,
    endcap: &WorkingPoint,
    inputs: &IsolationCutInputs,
    expected: IdScheme,
) -> IdValidation<()> {
    combine_validations(vec![
        validate_working_point(barrel, Region::Barrel, expected),
        validate_working_point(endcap, Region::Endcap, expected),
        validate_pair(barrel, endcap),
        validate_isolation_inputs(inputs, expected),
    ])
    .map(|_| ())
}

/// Hashed strings are written one per line, so they must stay on one line.
fn has_control_characters(value: &str) -> bool {
    value.chars().any(char::is_control)
}

fn check_positive(field: String, value: f64) -> Option<IdError> {
    if !value.is_finite() {
        Some(IdError::validation(field, format!("{} is not finite", value)))
    } else if value <= 0.0 {
        Some(IdError::validation(
            field,
            format!("threshold must be positive, got {}", value),
        ))
    } else {
        None
    }
}

fn check_coefficients(
    field: &str,
    flavor: IsolationFlavor,
    coefficients: &IsoCoefficients,
) -> Vec<IdError> {
    let mut errors: Vec<IdError> = coefficients
        .values()
        .filter(|v| !v.is_finite())
        .map(|v| IdError::validation(field, format!("coefficient {} is not finite", v)))
        .collect();

    match (flavor.is_quadratic(), coefficients.is_quadratic()) {
        (true, false) => errors.push(IdError::validation(
            field,
            "quadratic term C3 is required for this flavor",
        )),
        (false, true) => errors.push(IdError::validation(
            field,
            "this flavor takes only C1 and C2",
        )),
        _ => {}
    }

    errors
}

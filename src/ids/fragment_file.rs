//! Fragments declared in TOML files.
//!
//! ```toml
//! name = "my-fragment"
//! scheme = "standard"            # or "out-of-time"
//!
//! [isolation_inputs.charged]     # also neutral_hadron and photon
//! map = "photonIDValueMapProducer:phoChargedIsolation"
//! effective_areas = "data/effAreaPhotons_cone03_pfChargedHadrons.txt"
//!
//! [[ids]]
//! name = "my-fragment-loose"
//! hash = "6effa52088fd02fdb846232332a78b64"   # optional
//! approved = true                              # default false
//!
//! [ids.barrel]                   # and [ids.endcap]
//! h_over_e = 0.0597              # s_major for the out-of-time scheme
//! full5x5_sigma_ieta_ieta = 0.022
//! charged = [1.295, 0.0]
//! neutral_hadron = [10.910, 0.0148, 0.000017]
//! photon = [3.630, 0.0047]
//! ```
//!
//! Problems are accumulated and reported with the field they concern, e.g.
//! `ids[1].endcap.charged`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::builders::configure_for_scheme;
use crate::core::{
    IdScheme, InputTag, IsoCoefficients, IsolationCutInputs, IsolationCuts, IsolationFlavor,
    IsolationInput, ShowerShapeCut, WorkingPoint,
};
use crate::effects::{
    combine_validations, from_result, into_result, validation_failures, validation_success,
    IdValidation,
};
use crate::errors::{IdError, IdResult};

use super::{DeclaredId, IdFragment};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FragmentFile {
    name: String,
    scheme: IdScheme,
    isolation_inputs: InputsFile,
    #[serde(default)]
    ids: Vec<IdFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputsFile {
    charged: InputFile,
    neutral_hadron: InputFile,
    photon: InputFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputFile {
    map: String,
    effective_areas: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IdFile {
    name: String,
    hash: Option<String>,
    #[serde(default)]
    approved: bool,
    barrel: RegionFile,
    endcap: RegionFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionFile {
    h_over_e: Option<f64>,
    s_major: Option<f64>,
    full5x5_sigma_ieta_ieta: f64,
    charged: Vec<f64>,
    neutral_hadron: Vec<f64>,
    photon: Vec<f64>,
}

/// Parse a fragment from TOML text and build all of its IDs.
///
/// Declared hashes are not checked here; that happens on registration.
pub fn parse_fragment(contents: &str) -> IdResult<IdFragment> {
    let file: FragmentFile =
        toml::from_str(contents).map_err(|e| IdError::parse(e.message().to_string()))?;
    build_fragment(file)
}

/// Read and parse a fragment file.
pub fn load_fragment_file(path: &Path) -> IdResult<IdFragment> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| IdError::io_with_path(e.to_string(), path))?;

    let file: FragmentFile = toml::from_str(&contents)
        .map_err(|e| IdError::parse_with_path(e.message().to_string(), path))?;

    log::debug!("Parsed fragment {} from {}", file.name, path.display());
    build_fragment(file)
}

fn build_fragment(file: FragmentFile) -> IdResult<IdFragment> {
    let scheme = file.scheme;
    let inputs = into_result(convert_inputs(scheme, &file.isolation_inputs));

    // Regions are converted even when the inputs are broken.
    let ids = file
        .ids
        .iter()
        .enumerate()
        .map(|(i, id)| convert_id(i, scheme, id, inputs.as_ref().ok()))
        .collect();
    let ids = into_result(combine_validations(ids));

    let declared = match (inputs, ids) {
        (Ok(_), Ok(ids)) => ids,
        (inputs, ids) => {
            return Err(IdError::from_many(
                [inputs.err(), ids.err()].into_iter().flatten().collect(),
            ))
        }
    };

    let mut fragment = IdFragment::new(file.name);
    for id in declared.into_iter().flatten() {
        fragment.push(id);
    }
    Ok(fragment)
}

fn convert_inputs(scheme: IdScheme, inputs: &InputsFile) -> IdValidation<IsolationCutInputs> {
    let convert = |flavor: IsolationFlavor, input: &InputFile| -> IdResult<IsolationInput> {
        input
            .map
            .parse::<InputTag>()
            .map(|tag| IsolationInput::new(tag, input.effective_areas.clone()))
            .map_err(|e| {
                IdError::validation(
                    format!("isolation_inputs.{}.map", flavor.key()),
                    e.to_string(),
                )
            })
    };

    match (
        convert(IsolationFlavor::Charged, &inputs.charged),
        convert(IsolationFlavor::NeutralHadron, &inputs.neutral_hadron),
        convert(IsolationFlavor::Photon, &inputs.photon),
    ) {
        (Ok(charged), Ok(neutral_hadron), Ok(photon)) => validation_success(
            IsolationCutInputs::new(scheme, charged, neutral_hadron, photon),
        ),
        (charged, neutral_hadron, photon) => validation_failures(
            [charged.err(), neutral_hadron.err(), photon.err()]
                .into_iter()
                .flatten()
                .collect(),
        ),
    }
}

/// Yields `None` when the regions are valid but there are no inputs to
/// configure them with.
fn convert_id(
    index: usize,
    scheme: IdScheme,
    id: &IdFile,
    inputs: Option<&IsolationCutInputs>,
) -> IdValidation<Option<DeclaredId>> {
    let prefix = format!("ids[{}]", index);
    let regions = combine_validations(vec![
        convert_region(&format!("{}.barrel", prefix), scheme, &id.name, &id.barrel),
        convert_region(&format!("{}.endcap", prefix), scheme, &id.name, &id.endcap),
    ]);

    let (barrel, endcap) = match into_result(regions) {
        Ok(mut points) => {
            let endcap = points.remove(1);
            (points.remove(0), endcap)
        }
        Err(e) => return from_result(Err(e)),
    };
    let Some(inputs) = inputs else {
        return validation_success(None);
    };

    let configured = configure_for_scheme(scheme, &barrel, &endcap, inputs)
        .map_err(|e| prefix_fields(&prefix, e));

    from_result(configured.map(|c| {
        Some(DeclaredId::new(
            c.with_pog_approval(id.approved),
            id.hash.as_deref(),
        ))
    }))
}

fn convert_region(
    field: &str,
    scheme: IdScheme,
    id_name: &str,
    region: &RegionFile,
) -> IdValidation<WorkingPoint> {
    match (
        shower_shape(field, scheme, region),
        coefficients(field, IsolationFlavor::Charged, &region.charged),
        coefficients(field, IsolationFlavor::NeutralHadron, &region.neutral_hadron),
        coefficients(field, IsolationFlavor::Photon, &region.photon),
    ) {
        (Ok(shape), Ok(charged), Ok(neutral_hadron), Ok(photon)) => {
            validation_success(WorkingPoint::new(
                id_name,
                shape,
                IsolationCuts {
                    charged,
                    neutral_hadron,
                    photon,
                },
            ))
        }
        (shape, charged, neutral_hadron, photon) => validation_failures(
            [shape.err(), charged.err(), neutral_hadron.err(), photon.err()]
                .into_iter()
                .flatten()
                .collect(),
        ),
    }
}

fn shower_shape(field: &str, scheme: IdScheme, region: &RegionFile) -> IdResult<ShowerShapeCut> {
    let sieie = region.full5x5_sigma_ieta_ieta;
    match (scheme, region.h_over_e, region.s_major) {
        (IdScheme::StandardV5, Some(h_over_e), None) => Ok(ShowerShapeCut::HadronicOverEm {
            h_over_e,
            full5x5_sigma_ieta_ieta: sieie,
        }),
        (IdScheme::OutOfTimeV1, None, Some(s_major)) => Ok(ShowerShapeCut::SMajor {
            s_major,
            full5x5_sigma_ieta_ieta: sieie,
        }),
        (IdScheme::StandardV5, _, _) => Err(IdError::validation(
            field,
            "standard scheme requires h_over_e and no s_major",
        )),
        (IdScheme::OutOfTimeV1, _, _) => Err(IdError::validation(
            field,
            "out-of-time scheme requires s_major and no h_over_e",
        )),
    }
}

fn coefficients(
    field: &str,
    flavor: IsolationFlavor,
    values: &[f64],
) -> IdResult<IsoCoefficients> {
    match *values {
        [c1, c2] => Ok(IsoCoefficients::linear(c1, c2)),
        [c1, c2, c3] => Ok(IsoCoefficients::quadratic(c1, c2, c3)),
        _ => Err(IdError::validation(
            format!("{}.{}", field, flavor.key()),
            format!("expected 2 or 3 coefficients, got {}", values.len()),
        )),
    }
}

fn prefix_fields(prefix: &str, error: IdError) -> IdError {
    IdError::from_many(
        error
            .into_errors()
            .into_iter()
            .map(|e| match e {
                IdError::Validation { field, message } => {
                    IdError::validation(format!("{}.{}", prefix, field), message)
                }
                other => other,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const MINIMAL: &str = indoc! {r#"
        name = "test"
        scheme = "standard"

        [isolation_inputs.charged]
        map = "p:ch"
        effective_areas = "ch.txt"

        [isolation_inputs.neutral_hadron]
        map = "p:neu"
        effective_areas = "neu.txt"

        [isolation_inputs.photon]
        map = "p:pho"
        effective_areas = "pho.txt"

        [[ids]]
        name = "test-loose"
        approved = true

        [ids.barrel]
        h_over_e = 0.05
        full5x5_sigma_ieta_ieta = 0.01
        charged = [1.0, 0.0]
        neutral_hadron = [2.0, 0.01, 0.0001]
        photon = [3.0, 0.004]

        [ids.endcap]
        h_over_e = 0.04
        full5x5_sigma_ieta_ieta = 0.03
        charged = [1.1, 0.0]
        neutral_hadron = [2.1, 0.01, 0.0001]
        photon = [3.1, 0.004]
    "#};

    #[test]
    fn test_parse_minimal_fragment() {
        let fragment = parse_fragment(MINIMAL).unwrap();
        assert_eq!(fragment.name(), "test");
        assert_eq!(fragment.ids().len(), 1);

        let declared = &fragment.ids()[0];
        assert_eq!(declared.id_name(), "test-loose");
        assert_eq!(declared.declared_hash, None);
        assert!(declared.configured.is_pog_approved());
        assert_eq!(declared.configured.scheme(), IdScheme::StandardV5);
    }

    #[test]
    fn test_wrong_shape_key_for_scheme() {
        let contents = MINIMAL.replace("h_over_e = 0.04", "s_major = 0.04");
        let err = parse_fragment(&contents).unwrap_err();
        assert!(
            matches!(err, IdError::Validation { ref field, .. } if field == "ids[0].endcap"),
            "{err}"
        );
    }

    #[test]
    fn test_coefficient_count_and_builder_errors_are_prefixed() {
        let contents = MINIMAL
            .replace("charged = [1.1, 0.0]", "charged = [1.1]")
            .replace("h_over_e = 0.05", "h_over_e = -0.05");
        let err = parse_fragment(&contents).unwrap_err();
        let fields: Vec<String> = err
            .into_errors()
            .into_iter()
            .filter_map(|e| match e {
                IdError::Validation { field, .. } => Some(field),
                _ => None,
            })
            .collect();
        // Region conversion fails first, so builder checks never run.
        assert_eq!(fields, vec!["ids[0].endcap.charged"]);

        let contents = MINIMAL.replace("h_over_e = 0.05", "h_over_e = -0.05");
        let err = parse_fragment(&contents).unwrap_err();
        assert!(matches!(
            err,
            IdError::Validation { ref field, .. } if field == "ids[0].barrel.h_over_e"
        ));
    }

    #[test]
    fn test_bad_input_tag() {
        let contents = MINIMAL.replace("map = \"p:neu\"", "map = \":neu\"");
        let err = parse_fragment(&contents).unwrap_err();
        assert!(matches!(
            err,
            IdError::Validation { ref field, .. } if field == "isolation_inputs.neutral_hadron.map"
        ));
    }

    #[test]
    fn test_bad_input_tag_does_not_hide_region_errors() {
        let contents = MINIMAL
            .replace("map = \"p:pho\"", "map = \":pho\"")
            .replace("photon = [3.1, 0.004]", "photon = [3.1, 0.004, 0.1, 0.2]");
        let fields: Vec<String> = parse_fragment(&contents)
            .unwrap_err()
            .into_errors()
            .into_iter()
            .filter_map(|e| match e {
                IdError::Validation { field, .. } => Some(field),
                _ => None,
            })
            .collect();
        assert_eq!(
            fields,
            vec!["isolation_inputs.photon.map", "ids[0].endcap.photon"]
        );
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let contents = MINIMAL.replace("approved = true", "approved = true\ncolour = 1");
        assert!(matches!(
            parse_fragment(&contents),
            Err(IdError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_fragment_file(Path::new("/nonexistent/fragment.toml")).unwrap_err();
        assert!(matches!(err, IdError::Io { path: Some(_), .. }));
    }
}

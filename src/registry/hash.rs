//! Content hashing of configured IDs.
//!
//! The hash covers the identifier and every parameter of the cut flow, so
//! any edit to a threshold, an isolation binding or an effective-area path
//! changes it. The approval flag is metadata and is not hashed.

use std::fmt::Write;

use crate::core::ConfiguredId;

/// Line-oriented text form of a configured ID.
///
/// ```text
/// idName=<identifier>
/// cut0=MinPtCut
/// cut0.minPt=5
/// cut1=PhoSCEtaMultiRangeCut
/// ...
/// ```
pub fn canonical_form(id: &ConfiguredId) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "idName={}", id.id_name());
    for (i, cut) in id.cut_flow().iter().enumerate() {
        let _ = writeln!(out, "cut{}={}", i, cut.name());
        for (param, value) in cut.parameters() {
            let _ = writeln!(out, "cut{}.{}={}", i, param, value);
        }
    }
    out
}

pub fn content_hash(id: &ConfiguredId) -> String {
    format!("{:x}", md5::compute(canonical_form(id).as_bytes()))
}

/// True for a 32 digit hexadecimal string.
pub fn is_well_formed(hash: &str) -> bool {
    hash.len() == 32 && hash.chars().all(|c| c.is_ascii_hexdigit())
}

/// Lowercase a declared hash so comparisons ignore hex digit case.
pub fn normalize(hash: &str) -> String {
    hash.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed("6effa52088fd02fdb846232332a78b64"));
        assert!(is_well_formed("6EFFA52088FD02FDB846232332A78B64"));
        assert!(!is_well_formed("6effa52088fd02fdb846232332a78b6"));
        assert!(!is_well_formed("6effa52088fd02fdb846232332a78b6z"));
    }

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize(" ABCdef "), "abcdef");
    }

    #[test]
    fn test_md5_format_is_lowercase_hex() {
        let digest = format!("{:x}", md5::compute(b""));
        assert_eq!(digest, "d41d8cd98f00b204e9800998ecf8427e");
    }
}

use anyhow::Result;

use crate::errors::{IdError, IdResult};
use crate::ids::Catalog;
use crate::io::output::{IdDetail, OutputFormat};

use super::CommandContext;

pub fn show_id(ctx: &CommandContext, id_name: &str, format: Option<OutputFormat>) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let detail = detail_for(&catalog, id_name)?;
    ctx.writer(format).write_id_detail(&detail)
}

pub fn detail_for<'a>(catalog: &'a Catalog, id_name: &str) -> IdResult<IdDetail<'a>> {
    let (fragment, declared) = catalog
        .find(id_name)
        .ok_or_else(|| IdError::unknown_id(id_name))?;
    let hash = catalog
        .registry()
        .hash_of(id_name)
        .map(str::to_string)
        .unwrap_or_else(|| declared.configured.content_hash());

    Ok(IdDetail {
        fragment: fragment.name(),
        hash,
        id: &declared.configured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IdScheme;
    use crate::ids::spring16_v2p2_delayed_photon_oot as oot;

    #[test]
    fn test_detail_for_builtin() {
        let catalog = Catalog::with_builtin().unwrap();
        let detail = detail_for(&catalog, oot::MEDIUM).unwrap();
        assert_eq!(detail.fragment, oot::FRAGMENT_NAME);
        assert_eq!(detail.hash, oot::MEDIUM_HASH);
        assert_eq!(detail.id.scheme(), IdScheme::OutOfTimeV1);
    }

    #[test]
    fn test_detail_for_unknown() {
        let catalog = Catalog::with_builtin().unwrap();
        let err = detail_for(&catalog, "cutBasedPhotonID-nope").unwrap_err();
        assert_eq!(err.category(), "Lookup");
    }
}

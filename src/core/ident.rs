//! Identifier derivation: maps the source scene id and a processing revision
//! onto the output product identifiers. Pure string manipulation, no I/O.
use crate::error::{Error, Result};
use crate::types::{Pigment, ProductIdentity};

/// Product-type token of the input scene id.
pub const INPUT_PRODUCT_TYPE: &str = "L2A_CORFL";
/// Product-type token substituted into every output identifier.
pub const OUTPUT_PRODUCT_TYPE: &str = "L2B_AQUAPIG";

/// Derive the base output identifier from the source scene id and a CRID.
///
/// The scene id is underscore-delimited with the product type in the middle
/// and the revision code as its last token, e.g.
/// `SISTER_AVNG_L2A_CORFL_20200101T000000_000`. The product-type token is
/// replaced, the trailing revision dropped, and the new CRID appended:
/// `SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001`.
pub fn derive_base_id(scene_id: &str, crid: &str) -> Result<String> {
    if !scene_id.contains(INPUT_PRODUCT_TYPE) {
        return Err(Error::MalformedIdentifier {
            id: scene_id.to_string(),
            expected: INPUT_PRODUCT_TYPE,
        });
    }
    let renamed = scene_id.replace(INPUT_PRODUCT_TYPE, OUTPUT_PRODUCT_TYPE);
    let tokens: Vec<&str> = renamed.split('_').collect();
    // The trailing token is the old revision; there must be something left
    // once it is dropped.
    if tokens.len() < 2 {
        return Err(Error::MalformedIdentifier {
            id: scene_id.to_string(),
            expected: "revision",
        });
    }
    let mut out = tokens[..tokens.len() - 1].to_vec();
    out.push(crid);
    Ok(out.join("_"))
}

/// Derive the full set of product identities for one run, in a fixed order.
pub fn derive_identities(scene_id: &str, crid: &str) -> Result<Vec<ProductIdentity>> {
    let base = derive_base_id(scene_id, crid)?;
    Ok(Pigment::ALL
        .iter()
        .map(|&p| ProductIdentity::new(base.clone(), p))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = "SISTER_AVNG_L2A_CORFL_20200101T000000_000";

    #[test]
    fn derives_expected_chlorophyll_id() {
        let ids = derive_identities(SCENE, "001").unwrap();
        assert_eq!(
            ids[0].basename(),
            "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001_CHL"
        );
        assert_eq!(
            ids[1].basename(),
            "SISTER_AVNG_L2B_AQUAPIG_20200101T000000_001_PHYCO"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(
            derive_base_id(SCENE, "007").unwrap(),
            derive_base_id(SCENE, "007").unwrap()
        );
    }

    #[test]
    fn changing_crid_changes_only_the_trailing_token() {
        let a = derive_base_id(SCENE, "001").unwrap();
        let b = derive_base_id(SCENE, "002").unwrap();
        let a_tokens: Vec<&str> = a.split('_').collect();
        let b_tokens: Vec<&str> = b.split('_').collect();
        assert_eq!(a_tokens.len(), b_tokens.len());
        assert_eq!(
            a_tokens[..a_tokens.len() - 1],
            b_tokens[..b_tokens.len() - 1]
        );
        assert_eq!(a_tokens.last(), Some(&"001"));
        assert_eq!(b_tokens.last(), Some(&"002"));
    }

    #[test]
    fn rejects_ids_without_the_product_type_token() {
        let err = derive_base_id("SISTER_AVNG_L1B_RDN_20200101T000000_000", "001").unwrap_err();
        match err {
            Error::MalformedIdentifier { expected, .. } => {
                assert_eq!(expected, INPUT_PRODUCT_TYPE)
            }
            other => panic!("expected MalformedIdentifier, got {other:?}"),
        }
    }
}

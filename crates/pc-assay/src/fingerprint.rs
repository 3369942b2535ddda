//! Content hash of a compound set.

use crate::compound::CompoundSet;
use sha2::{Digest, Sha256};

/// SHA-256 over the serialized set, as lowercase hex.
///
/// Identical specs characterize to bit-identical sets, so equal fingerprints are the cheap
/// determinism check.
pub fn compound_set_fingerprint(set: &CompoundSet) -> String {
    let mut hasher = Sha256::new();

    let json = serde_json::to_string(set).unwrap_or_default();
    hasher.update(json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characterize::{CharacterizationOptions, characterize};
    use crate::spec::AssaySpec;

    #[test]
    fn fingerprint_stability() {
        let spec = AssaySpec::default();
        let a = characterize(&spec, &CharacterizationOptions::default()).unwrap();
        let b = characterize(&spec, &CharacterizationOptions::default()).unwrap();
        let fa = compound_set_fingerprint(&a.compounds);
        assert_eq!(fa, compound_set_fingerprint(&b.compounds));
        assert_eq!(fa.len(), 64);
    }

    #[test]
    fn fingerprint_differs_for_different_assays() {
        let options = CharacterizationOptions::default();
        let a = characterize(&AssaySpec::default(), &options).unwrap();
        let b = characterize(
            &AssaySpec {
                name: "CRUDE".to_string(),
                ..AssaySpec::default()
            },
            &options,
        )
        .unwrap();
        assert_ne!(
            compound_set_fingerprint(&a.compounds),
            compound_set_fingerprint(&b.compounds)
        );
    }
}

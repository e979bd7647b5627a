//! Printing model

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One physical appearance of a card in a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printing {
    /// 1-based position among the card's mapped printings
    pub printing_id: u32,
    /// Canonical set name
    pub set: String,
    /// Edition acronym as found in the catalog
    pub edition_code: String,
    /// Collector number, digits only, leading zeros kept
    pub number: String,
    /// Canonical rarity
    pub rarity: String,
    /// Image file name relative to the catalog image root
    pub image_name: String,
    /// Opaque key used to locate derived artwork
    pub image_reference: String,
}

impl Printing {
    /// Derive the `xx/yy` image reference for an image name
    ///
    /// Uses the first two byte pairs of the SHA-256 hex digest, which spreads
    /// artwork across a two-level directory tree.
    pub fn image_reference_for(image_name: &str) -> String {
        let digest = Sha256::digest(image_name.as_bytes());
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        format!("{}/{}", &hex[0..2], &hex[2..4])
    }
}

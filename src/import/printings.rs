//! Printing extraction
//!
//! Turns the `<image edition="..">` entries of a card into numbered printings.
//! Only editions with a canonical set name count; the others are skipped and
//! do not consume a printing number.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

use super::catalog::RawCard;
use super::error::ImportError;
use crate::mappings;
use crate::models::Printing;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Collector number from an image file name
///
/// First digit run of the file stem, leading zeros kept: `KYD022.jpg` gives
/// `022`.
pub fn collector_number(card_id: &str, image_name: &str) -> Result<String, ImportError> {
    let stem = Path::new(image_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    DIGITS
        .find(&stem)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ImportError::InvalidCollectorNumber {
            card_id: card_id.to_string(),
            image: image_name.to_string(),
        })
}

/// Canonical rarity of a card
///
/// An absent `<rarity>` element means the lowest tier. A present element must
/// hold a known code, even when it is empty.
pub fn resolve_rarity(raw: &RawCard) -> Result<String, ImportError> {
    match raw.text("rarity") {
        None => Ok(mappings::LOWEST_RARITY.to_string()),
        Some(code) => mappings::rarity(code.trim())
            .map(str::to_string)
            .ok_or_else(|| ImportError::UnknownRarity {
                card_id: raw.label(),
                rarity: code.to_string(),
            }),
    }
}

/// Extract the card's printings in document order
pub fn extract_printings(raw: &RawCard, card_id: &str) -> Result<Vec<Printing>, ImportError> {
    let mut printings = Vec::new();
    let mut rarity: Option<String> = None;

    for image in raw.all("image") {
        let edition_code = image.attribute("edition").unwrap_or_default().trim();
        let Some(set) = mappings::edition(edition_code) else {
            debug!(card_id, edition = edition_code, "Skipping unmapped edition");
            continue;
        };

        let image_name = image.text.trim();
        let number = collector_number(card_id, image_name)?;

        let rarity = match &rarity {
            Some(rarity) => rarity.clone(),
            None => {
                let resolved = resolve_rarity(raw)?;
                rarity = Some(resolved.clone());
                resolved
            }
        };

        printings.push(Printing {
            printing_id: printings.len() as u32 + 1,
            set: set.to_string(),
            edition_code: edition_code.to_string(),
            number,
            rarity,
            image_name: image_name.to_string(),
            image_reference: Printing::image_reference_for(image_name),
        });
    }

    Ok(printings)
}

//! Printing artwork derivation
//!
//! Ingestion calls an `ImageDeriver` once per printing. Derivers must be
//! idempotent: when every target artifact already exists they do nothing.
//!
//! Implementations:
//! - FileSystemImageDeriver: converts catalog artwork to PNG plus a thumbnail
//!   (requires the `image-derive` feature)

use std::path::{Component, Path, PathBuf};

/// Error type for artwork derivation
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Invalid path component: {0}")]
    InvalidName(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing error: {0}")]
    Processing(String),
}

/// One printing's artwork to derive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest<'a> {
    pub card_id: &'a str,
    /// Image name as found in the catalog, relative to the source root
    pub image_name: &'a str,
    pub edition: &'a str,
    pub collector_number: &'a str,
    /// Printing id of this printing
    pub index: u32,
}

/// What a deriver did for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeriveOutcome {
    Derived,
    /// Every target already existed
    Skipped,
}

/// Trait for artwork derivers
pub trait ImageDeriver: Send + Sync {
    fn derive(&self, request: &ImageRequest<'_>) -> Result<DeriveOutcome, ImageError>;
}

/// Output paths of one derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTargets {
    pub full: PathBuf,
    pub thumbnail: PathBuf,
}

impl ImageTargets {
    pub fn exist(&self) -> bool {
        self.full.exists() && self.thumbnail.exists()
    }
}

fn check_component(value: &str) -> Result<(), ImageError> {
    if value.is_empty()
        || value.starts_with('.')
        || value.contains(['/', '\\'])
    {
        return Err(ImageError::InvalidName(value.to_string()));
    }
    Ok(())
}

/// Source artwork path for a catalog image name
///
/// The name must stay below `source_dir`: absolute names and `..` segments
/// are rejected.
pub fn source_path(source_dir: &Path, image_name: &str) -> Result<PathBuf, ImageError> {
    let name = Path::new(image_name);
    let inside = !image_name.is_empty()
        && !image_name.contains('\\')
        && name
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !inside {
        return Err(ImageError::InvalidName(image_name.to_string()));
    }
    Ok(source_dir.join(name))
}

/// Target paths under `output_dir` for a request
///
/// `<output_dir>/<edition>/<cardId>-<index>.png` and the matching
/// `.thumb.png`.
pub fn targets_for(output_dir: &Path, request: &ImageRequest<'_>) -> Result<ImageTargets, ImageError> {
    check_component(request.edition)?;
    check_component(request.card_id)?;

    let dir = output_dir.join(request.edition);
    let stem = format!("{}-{}", request.card_id, request.index);
    Ok(ImageTargets {
        full: dir.join(format!("{}.png", stem)),
        thumbnail: dir.join(format!("{}.thumb.png", stem)),
    })
}

#[cfg(feature = "image-derive")]
pub mod filesystem;

#[cfg(feature = "image-derive")]
pub use filesystem::FileSystemImageDeriver;

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(card_id: &'a str, edition: &'a str) -> ImageRequest<'a> {
        ImageRequest {
            card_id,
            image_name: "images/cards/Onyx/Onyx001.jpg",
            edition,
            collector_number: "001",
            index: 2,
        }
    }

    #[test]
    fn test_targets_layout() {
        let targets = targets_for(Path::new("/out"), &request("Onyx001", "Onyx")).unwrap();
        assert_eq!(targets.full, PathBuf::from("/out/Onyx/Onyx001-2.png"));
        assert_eq!(targets.thumbnail, PathBuf::from("/out/Onyx/Onyx001-2.thumb.png"));
    }

    #[test]
    fn test_targets_reject_traversal() {
        assert!(matches!(
            targets_for(Path::new("/out"), &request("../x", "Onyx")),
            Err(ImageError::InvalidName(_))
        ));
        assert!(matches!(
            targets_for(Path::new("/out"), &request("Onyx001", "a/b")),
            Err(ImageError::InvalidName(_))
        ));
    }

    #[test]
    fn test_source_path_stays_under_root() {
        let root = Path::new("/catalog");
        assert_eq!(
            source_path(root, "images/cards/Onyx/Onyx001.jpg").unwrap(),
            PathBuf::from("/catalog/images/cards/Onyx/Onyx001.jpg")
        );
        for name in ["../x.jpg", "images/../../x.jpg", "/etc/x.jpg", "..\\x.jpg", ""] {
            assert!(
                matches!(source_path(root, name), Err(ImageError::InvalidName(_))),
                "{}",
                name
            );
        }
    }
}

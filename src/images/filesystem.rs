//! File system artwork deriver
//!
//! Reads catalog artwork from a source root and writes a PNG copy and a
//! bounded thumbnail under an output root.

use std::path::PathBuf;

use tracing::debug;

use super::{DeriveOutcome, ImageDeriver, ImageError, ImageRequest, source_path, targets_for};
use crate::config::ImageConfig;

/// Deriver reading and writing local files
#[derive(Debug, Clone)]
pub struct FileSystemImageDeriver {
    source_dir: PathBuf,
    output_dir: PathBuf,
    thumbnail_width: u32,
    thumbnail_height: u32,
}

impl FileSystemImageDeriver {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            output_dir: config.output_dir.clone(),
            thumbnail_width: config.thumbnail_width,
            thumbnail_height: config.thumbnail_height,
        }
    }
}

impl ImageDeriver for FileSystemImageDeriver {
    fn derive(&self, request: &ImageRequest<'_>) -> Result<DeriveOutcome, ImageError> {
        let source = source_path(&self.source_dir, request.image_name)?;
        let targets = targets_for(&self.output_dir, request)?;
        if targets.exist() {
            return Ok(DeriveOutcome::Skipped);
        }

        if !source.is_file() {
            return Err(ImageError::SourceNotFound(source));
        }

        if let Some(parent) = targets.full.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let artwork = image::open(&source).map_err(|e| {
            ImageError::Processing(format!("Failed to decode {}: {}", source.display(), e))
        })?;
        artwork.save(&targets.full).map_err(|e| {
            ImageError::Processing(format!("Failed to write {}: {}", targets.full.display(), e))
        })?;
        artwork
            .thumbnail(self.thumbnail_width, self.thumbnail_height)
            .save(&targets.thumbnail)
            .map_err(|e| {
                ImageError::Processing(format!(
                    "Failed to write {}: {}",
                    targets.thumbnail.display(),
                    e
                ))
            })?;

        debug!(card_id = request.card_id, index = request.index, "Derived artwork");
        Ok(DeriveOutcome::Derived)
    }
}

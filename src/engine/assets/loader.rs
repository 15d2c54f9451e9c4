// Asset loading functionality

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Texture => &["png", "jpg", "jpeg"],
        }
    }
}

/// Asset loader responsible for finding and loading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, name);

        let supported = path
            .extension()
            .map(|ext| asset_type.extensions().contains(&ext.to_string_lossy().as_ref()))
            .unwrap_or(false);
        if !supported {
            return Err(AssetError::UnsupportedFormat(name.to_string()));
        }

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", name, e)))
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::Texture.default_directory(), "textures");
    }

    #[test]
    fn test_asset_type_extensions() {
        assert!(AssetType::Texture.extensions().contains(&"png"));
        assert!(!AssetType::Texture.extensions().contains(&"wav"));
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path(AssetType::Texture, "car.png");

        assert_eq!(path, Path::new("/game/assets/textures/car.png"));
        assert_eq!(loader.base_path(), Path::new("/game/assets"));
    }

    #[test]
    fn test_missing_texture_is_not_found() {
        let loader = AssetLoader::new("/nonexistent/racer/assets");
        let err = loader
            .load_bytes(AssetType::Texture, "car.png")
            .unwrap_err();

        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let loader = AssetLoader::new(".");
        let err = loader
            .load_bytes(AssetType::Texture, "engine.wav")
            .unwrap_err();

        assert!(matches!(err, AssetError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = std::env::temp_dir().join(format!("racer-assets-{}", std::process::id()));
        let textures = dir.join("textures");
        std::fs::create_dir_all(&textures).unwrap();
        std::fs::write(textures.join("tile.png"), [1u8, 2, 3]).unwrap();

        let loader = AssetLoader::new(&dir);
        let bytes = loader.load_bytes(AssetType::Texture, "tile.png").unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

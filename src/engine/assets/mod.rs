// Asset management system
//
// Locates and reads texture files under the game's asset directory. Decoding
// and GPU upload live in the renderer's texture module.

mod loader;

pub use loader::{AssetLoader, AssetType};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("car.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: car.png");
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = image::load_from_memory(b"not an image").unwrap_err();
        let err = AssetError::Decode {
            name: "car.png".to_string(),
            source,
        };

        assert!(err.to_string().starts_with("Failed to decode image car.png"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

//! Keyed asset lookup with placeholder fallback

use std::collections::HashMap;
use std::path::PathBuf;

/// Reference to a loaded (or stand-in) image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub key: String,
    /// Set when the asset was missing and a stand-in is drawn instead
    pub placeholder: bool,
}

impl ImageHandle {
    pub fn placeholder(key: &str) -> Self {
        Self {
            key: key.to_string(),
            placeholder: true,
        }
    }
}

pub trait AssetProvider {
    /// Never fails: a missing asset yields a placeholder handle
    fn image(&mut self, key: &str) -> ImageHandle;
}

/// Filesystem-backed catalog that resolves each key once
#[derive(Debug, Default)]
pub struct AssetCatalog {
    root: PathBuf,
    images: HashMap<String, ImageHandle>,
}

impl AssetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    pub fn cached(&self) -> usize {
        self.images.len()
    }
}

impl AssetProvider for AssetCatalog {
    fn image(&mut self, key: &str) -> ImageHandle {
        if let Some(handle) = self.images.get(key) {
            return handle.clone();
        }
        let handle = if self.root.join(key).is_file() {
            ImageHandle {
                key: key.to_string(),
                placeholder: false,
            }
        } else {
            log::warn!("Missing image {}, using placeholder", key);
            ImageHandle::placeholder(key)
        };
        self.images.insert(key.to_string(), handle.clone());
        handle
    }
}

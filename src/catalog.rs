use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::*;
use crate::error::CatalogError;

/// Body of a successful `GET /api/images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub images: Vec<String>,
}

/// Body of a failed `GET /api/images`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogErrorResponse {
    pub error: String,
}

// --- Helper: List and Sort Image File Names ---
// A missing directory is an empty catalog, not an error.
pub fn load_sorted_image_names(dir_path: &Path) -> Result<Vec<String>, CatalogError> {
    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir_path.display(), "image directory does not exist");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CatalogError::ReadDir {
                path: dir_path.to_path_buf(),
                source,
            });
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(CatalogError::Entry)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            debug!(path = ?path, "skipping non UTF-8 file name");
            continue;
        };
        if is_catalog_image(name) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Case-insensitive allow-list check; videos are refused even if renamed oddly.
pub fn is_catalog_image(name: &str) -> bool {
    let Some(ext) = Path::new(name).extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()) && !EXCLUDED_EXTENSIONS.contains(&ext.as_str())
}

/// The identifiers available for one session. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    images: Vec<String>,
}

impl Catalog {
    pub fn new(images: Vec<String>) -> Self {
        Self { images }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn into_images(self) -> Vec<String> {
        self.images
    }
}

/// Client side of the catalog endpoint. Issues one request per session and
/// never retries; every failure turns into an empty catalog.
pub struct CatalogLoader {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl CatalogLoader {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn load(&self) -> Catalog {
        match self.fetch() {
            Ok(images) => {
                info!(count = images.len(), "catalog ready");
                Catalog::new(images)
            }
            Err(e) => {
                warn!(error = %e, "catalog unavailable, continuing without decorative images");
                Catalog::empty()
            }
        }
    }

    fn fetch(&self) -> Result<Vec<String>, CatalogError> {
        let url = format!("{}{}", self.base_url, CATALOG_ROUTE);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }
        let body: CatalogResponse = response.json()?;
        Ok(body.images)
    }

    /// Raw bytes of one catalog image.
    pub fn fetch_image(&self, name: &str) -> Result<Vec<u8>, CatalogError> {
        let url = format!("{}{}/{}", self.base_url, IMAGES_ROUTE, name);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

// Where products and their reviews come from.
//
// A source is chosen once at startup and handed around as `Box<dyn ProductSource>`:
// either a JSON dataset on disk or the built-in demo catalog.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::models::Product;

static SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.json");

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid product data in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}

pub trait ProductSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch_all(&self) -> Result<Vec<Product>, SourceError>;

    fn fetch(&self, id: u64) -> Result<Option<Product>, SourceError> {
        let found = self.fetch_all()?.into_iter().find(|p| p.id == id);
        if found.is_none() {
            warn!(source = self.name(), id, "product not found");
        }
        Ok(found)
    }
}

/// A file holds either one product or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductFile {
    Many(Vec<Product>),
    One(Box<Product>),
}

impl ProductFile {
    fn into_products(self) -> Vec<Product> {
        match self {
            ProductFile::Many(products) => products,
            ProductFile::One(product) => vec![*product],
        }
    }
}

/// Products stored as JSON: a single file, or every `*.json` file under a directory.
/// Data is re-read on every call so edits on disk are picked up.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn files(&self) -> Result<Vec<PathBuf>, SourceError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|source| SourceError::Walk {
                path: self.root.display().to_string(),
                source,
            })?;
            let is_json = entry.path().extension().and_then(|s| s.to_str()) == Some("json");
            if entry.file_type().is_file() && is_json {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn read_products(path: &Path) -> Result<Vec<Product>, SourceError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: display.clone(),
        source,
    })?;
    let parsed: ProductFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SourceError::Parse {
            path: display,
            source,
        })?;
    Ok(parsed.into_products())
}

impl ProductSource for JsonStore {
    fn name(&self) -> &'static str {
        "json"
    }

    fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        let mut products = Vec::new();
        for path in self.files()? {
            let mut batch = read_products(&path)?;
            debug!(path = %path.display(), products = batch.len(), "loaded products");
            products.append(&mut batch);
        }
        Ok(products)
    }
}

/// The fixed demo catalog compiled into the binary.
pub struct SampleCatalog {
    products: Vec<Product>,
}

impl SampleCatalog {
    pub fn new() -> Result<Self, SourceError> {
        let products = serde_json::from_str(SAMPLE_CATALOG).map_err(|source| SourceError::Parse {
            path: "<sample catalog>".to_string(),
            source,
        })?;
        Ok(Self { products })
    }
}

impl ProductSource for SampleCatalog {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        Ok(self.products.clone())
    }
}

/// A JSON store when a data path is configured, the sample catalog otherwise.
pub fn open_source(data: Option<&Path>) -> Result<Box<dyn ProductSource>, SourceError> {
    match data {
        Some(path) => Ok(Box::new(JsonStore::new(path))),
        None => Ok(Box::new(SampleCatalog::new()?)),
    }
}

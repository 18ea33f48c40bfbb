use crate::models::{Breed, Question};
use crate::services::postgres::PostgresCatalog;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the breed catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Decode a JSON array one record at a time
///
/// Records that don't fit `T` are skipped with a warning; only a file that
/// isn't a JSON array at all is an error.
fn parse_records<T: DeserializeOwned>(bytes: &[u8], source: &Path) -> Result<Vec<T>, CatalogError> {
    let raw: Vec<Value> = serde_json::from_slice(bytes)?;

    let records = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let label = value
                .get("name")
                .or_else(|| value.get("text"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index));

            match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping unreadable record {} in {}: {}", label, source.display(), e);
                    None
                }
            }
        })
        .collect();

    Ok(records)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, CatalogError> {
    tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Breed catalog read from a JSON file
///
/// The file holds an array of breed records and is re-read on every call,
/// so edits show up on the next request.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_all(&self) -> Result<Vec<Breed>, CatalogError> {
        let bytes = read_file(&self.path).await?;

        let breeds: Vec<Breed> = parse_records(&bytes, &self.path)?;
        tracing::debug!("Loaded {} breeds from {}", breeds.len(), self.path.display());

        Ok(breeds)
    }

    pub async fn health_check(&self) -> bool {
        is_file(&self.path).await
    }
}

/// Read-only questionnaire read from a JSON file
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    path: PathBuf,
}

impl QuestionCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every question, in file order
    pub async fn load_all(&self) -> Result<Vec<Question>, CatalogError> {
        let bytes = read_file(&self.path).await?;

        let questions: Vec<Question> = parse_records(&bytes, &self.path)?;
        tracing::debug!("Loaded {} questions from {}", questions.len(), self.path.display());

        Ok(questions)
    }
}

/// Source of breed snapshots for the matcher
pub enum BreedCatalog {
    File(FileCatalog),
    Postgres(PostgresCatalog),
}

impl BreedCatalog {
    /// Fresh snapshot of every breed; nothing is cached between calls
    pub async fn load_all(&self) -> Result<Vec<Breed>, CatalogError> {
        match self {
            BreedCatalog::File(catalog) => catalog.load_all().await,
            BreedCatalog::Postgres(catalog) => catalog.load_all().await,
        }
    }

    pub async fn health_check(&self) -> bool {
        match self {
            BreedCatalog::File(catalog) => catalog.health_check().await,
            BreedCatalog::Postgres(catalog) => catalog.health_check().await.unwrap_or(false),
        }
    }

    pub fn source_name(&self) -> &'static str {
        match self {
            BreedCatalog::File(_) => "file",
            BreedCatalog::Postgres(_) => "postgres",
        }
    }
}

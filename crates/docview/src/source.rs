//! Where documents come from.
//!
//! Callers hand a [`DocumentSource`] to the views; nothing in this crate holds
//! a global connection. Ids are always returned in ascending order.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::value::Value;

pub trait DocumentSource {
    /// Ids of all top-level collections.
    fn list_collections(&self) -> Result<Vec<String>>;

    /// Ids of the documents in `collection`. Unknown collections are empty.
    fn list_documents(&self, collection: &str) -> Result<Vec<String>>;

    /// The document, or `None` if it does not exist.
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn list_collections(&self) -> Result<Vec<String>> {
        (**self).list_collections()
    }
    fn list_documents(&self, collection: &str) -> Result<Vec<String>> {
        (**self).list_documents(collection)
    }
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        (**self).get_document(collection, id)
    }
}

fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    let bad = name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(Error::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

const DOCUMENT_EXT: &str = "json";

/// A database export on disk: one directory per collection, one
/// `<id>.json` file per document.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf> {
        validate_name("collection", collection)?;
        validate_name("document", id)?;
        Ok(self
            .root
            .join(collection)
            .join(format!("{}.{}", id, DOCUMENT_EXT)))
    }
}

impl DocumentSource for DirSource {
    fn list_collections(&self) -> Result<Vec<String>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => out.push(name),
                Err(name) => warn!(?name, "skipping collection with non UTF-8 name"),
            }
        }
        out.sort();
        debug!(root = %self.root.display(), count = out.len(), "listed collections");
        Ok(out)
    }

    fn list_documents(&self, collection: &str) -> Result<Vec<String>> {
        validate_name("collection", collection)?;
        let dir = self.root.join(collection);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(collection, "collection directory missing; treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut out = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(DOCUMENT_EXT) || !path.is_file() {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(id) => out.push(id.to_string()),
                None => warn!(path = %path.display(), "skipping document with non UTF-8 name"),
            }
        }
        out.sort();
        debug!(collection, count = out.len(), "listed documents");
        Ok(out)
    }

    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let path = self.document_path(collection, id)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), bytes = text.len(), "read document");
        let json: serde_json::Value = serde_json::from_str(&text)?;
        Ok(Some(Value::from(json)))
    }
}

/// An in-memory database, typically loaded from a single JSON export of the
/// form `{ "<collection>": { "<id>": { ...document... } } }`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: &str, id: &str, doc: Value) -> Result<()> {
        validate_name("collection", collection)?;
        validate_name("document", id)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    pub fn from_json(export: &serde_json::Value) -> Result<Self> {
        let collections = export
            .as_object()
            .ok_or_else(|| Error::InvalidExport("top level must be an object of collections".to_string()))?;

        let mut source = Self::new();
        for (collection, docs) in collections {
            validate_name("collection", collection)?;
            let docs = docs.as_object().ok_or_else(|| {
                Error::InvalidExport(format!("collection {:?} must be an object of documents", collection))
            })?;
            source.collections.entry(collection.clone()).or_default();
            for (id, doc) in docs {
                source.insert(collection, id, Value::from(doc))?;
            }
        }
        debug!(collections = source.collections.len(), "loaded export");
        Ok(source)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let json: serde_json::Value = serde_json::from_str(&text)?;
        Self::from_json(&json)
    }
}

impl DocumentSource for MemorySource {
    fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self.collections.keys().cloned().collect())
    }

    fn list_documents(&self, collection: &str) -> Result<Vec<String>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }
}

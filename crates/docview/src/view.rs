//! Dashboard state assembled from a [`DocumentSource`].
//!
//! Every slot loads independently: a failed collection listing does not stop
//! the selected document from rendering, and fetch failures are reported as
//! their own state instead of being rendered as data.

use serde::Serialize;
use tracing::error;

use crate::normalize::normalize;
use crate::options::Options;
use crate::render::{RenderDescriptor, render_document};
use crate::source::DocumentSource;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Listing {
    Loaded { items: Vec<String> },
    Failed { message: String },
}

impl Listing {
    fn from_result(result: crate::Result<Vec<String>>, what: &str) -> Self {
        match result {
            Ok(items) => Listing::Loaded { items },
            Err(e) => {
                error!(error = %e, "failed to load {}", what);
                Listing::Failed { message: e.to_string() }
            }
        }
    }

    /// Loaded ids; empty when the listing failed.
    pub fn items(&self) -> &[String] {
        match self {
            Listing::Loaded { items } => items,
            Listing::Failed { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentView {
    Loaded {
        collection: String,
        id: String,
        field_count: usize,
        normalized: serde_json::Value,
        fields: Vec<RenderDescriptor>,
    },
    NotFound {
        collection: String,
        id: String,
    },
    Failed {
        collection: String,
        id: String,
        message: String,
    },
}

impl DocumentView {
    pub fn load<S: DocumentSource + ?Sized>(source: &S, collection: &str, id: &str, opts: &Options) -> Self {
        match source.get_document(collection, id) {
            Ok(Some(doc)) => Self::from_document(collection, id, &doc, opts),
            Ok(None) => DocumentView::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            },
            Err(e) => {
                error!(collection, id, error = %e, "failed to load document");
                DocumentView::Failed {
                    collection: collection.to_string(),
                    id: id.to_string(),
                    message: e.to_string(),
                }
            }
        }
    }

    pub fn from_document(collection: &str, id: &str, doc: &Value, opts: &Options) -> Self {
        let fields = render_document(doc, opts);
        DocumentView::Loaded {
            collection: collection.to_string(),
            id: id.to_string(),
            field_count: fields.len(),
            normalized: normalize(doc),
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub collections: Listing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Listing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentView>,
}

impl Dashboard {
    /// Loads the collection list, then the selected collection's documents,
    /// then the selected document. A document is only loaded when a collection
    /// is selected too.
    pub fn load<S: DocumentSource + ?Sized>(
        source: &S,
        collection: Option<&str>,
        document: Option<&str>,
        opts: &Options,
    ) -> Self {
        let collections = Listing::from_result(source.list_collections(), "collections");
        let documents = collection
            .map(|c| Listing::from_result(source.list_documents(c), &format!("documents in {}", c)));

        let document = collection
            .zip(document)
            .map(|(c, id)| DocumentView::load(source, c, id, opts));

        Self {
            collections,
            collection: collection.map(str::to_string),
            documents,
            document,
        }
    }
}

//! The owned document corpus.
//!
//! A `DocumentIndex` is constructed explicitly and passed to the query
//! entry points; there is no process-wide singleton. Writes (`ingest`,
//! `ingest_batch`, `remove`, `clear`) take `&mut self` and reads take
//! `&self`, so a host sharing one index across threads wraps it in an
//! `RwLock` and gets the required write-exclusion for free. A full rebuild
//! under concurrent readers should build a fresh index and swap it in
//! rather than clearing in place.

use std::collections::HashMap;

use tantivy::IndexWriter;
use tracing::{debug, warn};

use crate::{
    document::{Document, IndexedDocument},
    error::Result,
    tantivy_index::{FuzzyHit, SearchIndex},
};

const WRITER_MEMORY_BUDGET: usize = 15_000_000;

/// The in-memory corpus: annotated documents keyed by id, plus the fuzzy
/// text index over them.
pub struct DocumentIndex {
    docs: HashMap<String, IndexedDocument>,
    search: SearchIndex,
    writer: IndexWriter,
}

impl DocumentIndex {
    pub fn new() -> Result<Self> {
        let search = SearchIndex::open_in_ram()?;
        let writer = search.writer(WRITER_MEMORY_BUDGET)?;
        Ok(Self {
            docs: HashMap::new(),
            search,
            writer,
        })
    }

    /// Ingest one document: annotate it, then upsert both the lookup map
    /// and the fuzzy index.
    ///
    /// Ingest is an upsert: an existing entry with the same id is replaced
    /// in full, including its derived risk fields. Missing text fields have
    /// already defaulted to empty at the `Document` boundary, so malformed
    /// input degrades to empty/LOW/no-frameworks rather than failing.
    pub fn ingest(&mut self, doc: Document) -> Result<()> {
        self.ingest_no_commit(doc)?;
        self.writer.commit()?;
        Ok(())
    }

    /// Ingest a batch in input order with a single commit at the end.
    ///
    /// One document failing to index does not abort the batch; the failure
    /// is logged and the rest proceed. Returns the number ingested.
    pub fn ingest_batch(&mut self, docs: Vec<Document>) -> Result<usize> {
        let mut ingested = 0;
        for doc in docs {
            let id = doc.id.clone();
            match self.ingest_no_commit(doc) {
                Ok(()) => ingested += 1,
                Err(err) => {
                    warn!(%id, %err, "skipping document that failed to index");
                }
            }
        }
        self.writer.commit()?;
        debug!(ingested, total = self.docs.len(), "batch ingest complete");
        Ok(ingested)
    }

    fn ingest_no_commit(&mut self, doc: Document) -> Result<()> {
        let indexed = IndexedDocument::annotate(doc);
        self.search.add_document(&self.writer, &indexed)?;
        self.docs.insert(indexed.id.clone(), indexed);
        Ok(())
    }

    /// Remove a document by id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        if self.docs.remove(id).is_some() {
            self.search.delete_document(&self.writer, id);
            self.writer.commit()?;
        }
        Ok(())
    }

    /// Drop every document and reset the fuzzy index to empty.
    pub fn clear(&mut self) -> Result<()> {
        self.docs.clear();
        self.search.delete_all(&mut self.writer)?;
        self.writer.commit()?;
        Ok(())
    }

    /// Number of currently indexed documents.
    pub fn count(&self) -> usize {
        self.docs.len()
    }

    /// Look up a single annotated document.
    pub fn get(&self, id: &str) -> Option<&IndexedDocument> {
        self.docs.get(id)
    }

    /// Raw fuzzy hits for an (already expanded) query, joined against the
    /// corpus map by the caller.
    pub(crate) fn fuzzy_hits(&self, query: &str) -> Result<Vec<FuzzyHit>> {
        self.search.search_fuzzy(query, self.docs.len().max(1))
    }
}

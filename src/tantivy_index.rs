//! In-memory Tantivy index over the annotated corpus.
//!
//! Three tokenization pathways cover the matching contract:
//! - stemmed word fields (`title`, `content`, `description`, `risk_terms`)
//!   carry the weighted BM25 query,
//! - a catch-all lowercased word field feeds `FuzzyTermQuery` for typo
//!   tolerance (Levenshtein distance 1, transpositions allowed),
//! - a catch-all trigram field matches query tokens as substrings inside
//!   larger indexed values.
//!
//! Raw BM25-family scores (higher = better) are mapped to the engine's
//! native match distance `1 / (1 + score)` in `(0, 1]`, lower = better, so
//! the query layer can apply multiplicative rank boosts as discounts.

use std::collections::HashSet;

use tantivy::{
    Index,
    IndexReader,
    IndexWriter,
    TantivyDocument,
    Term,
    collector::TopDocs,
    doc,
    query::{BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, QueryParser, TermQuery},
    schema::{
        Field,
        IndexRecordOption,
        STORED,
        STRING,
        Schema,
        TextFieldIndexing,
        TextOptions,
        Value,
    },
    tokenizer::{
        Language,
        LowerCaser,
        NgramTokenizer,
        RemoveLongFilter,
        SimpleTokenizer,
        Stemmer,
        TextAnalyzer,
    },
};

use crate::{document::IndexedDocument, error::Result};

/// Field names used in the schema.
mod fields {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    pub const DESCRIPTION: &str = "description";
    pub const RISK_TERMS: &str = "risk_terms";
    pub const WORDS: &str = "words";
    pub const NGRAMS: &str = "ngrams";
}

/// Relative field weights. Matched vocabulary terms rank at least as high
/// as title matches; body text ranks below both.
const TITLE_BOOST: f32 = 3.0;
const RISK_TERMS_BOOST: f32 = 3.0;
const BODY_BOOST: f32 = 2.0;
const NGRAM_BOOST: f32 = 0.3;

/// Minimum query-token length considered for matching.
const MIN_TOKEN_LEN: usize = 3;

/// A raw hit from the fuzzy index: a document id and its match distance
/// (lower = better), before any domain re-ranking.
#[derive(Debug, Clone)]
pub struct FuzzyHit {
    pub id: String,
    pub distance: f64,
}

/// Resolved field handles for the schema.
#[derive(Clone, Copy)]
struct SchemaFields {
    id: Field,
    title: Field,
    content: Field,
    description: Field,
    risk_terms: Field,
    words: Field,
    ngrams: Field,
}

/// The fuzzy full-text index. Stores only document ids; full records live
/// in the owning [`crate::index::DocumentIndex`] map.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    fields: SchemaFields,
    trigram: TextAnalyzer,
}

fn build_schema() -> (Schema, SchemaFields) {
    let mut builder = Schema::builder();

    let id = builder.add_text_field(fields::ID, STRING | STORED);

    let stemmed = |tokenizer: &str| {
        TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
    };

    let title = builder.add_text_field(fields::TITLE, stemmed("en_stem"));
    let content = builder.add_text_field(fields::CONTENT, stemmed("en_stem"));
    let description =
        builder.add_text_field(fields::DESCRIPTION, stemmed("en_stem"));
    let risk_terms =
        builder.add_text_field(fields::RISK_TERMS, stemmed("en_stem"));

    // Catch-all fields for fuzzy and substring recall.
    let words_opts = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer("simple_lower")
            .set_index_option(IndexRecordOption::Basic),
    );
    let words = builder.add_text_field(fields::WORDS, words_opts);

    let ngram_opts = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer("trigram")
            .set_index_option(IndexRecordOption::Basic),
    );
    let ngrams = builder.add_text_field(fields::NGRAMS, ngram_opts);

    let schema = builder.build();
    let fields = SchemaFields {
        id,
        title,
        content,
        description,
        risk_terms,
        words,
        ngrams,
    };

    (schema, fields)
}

fn register_tokenizers(index: &Index) -> Result<TextAnalyzer> {
    let en_stem = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(40))
        .filter(LowerCaser)
        .filter(Stemmer::new(Language::English))
        .build();
    index.tokenizers().register("en_stem", en_stem);

    let simple_lower = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(40))
        .filter(LowerCaser)
        .build();
    index.tokenizers().register("simple_lower", simple_lower);

    let trigram = TextAnalyzer::builder(NgramTokenizer::new(3, 3, false)?)
        .filter(LowerCaser)
        .build();
    index.tokenizers().register("trigram", trigram.clone());

    Ok(trigram)
}

impl SearchIndex {
    /// Create an empty in-memory index.
    pub fn open_in_ram() -> Result<Self> {
        let (schema, fields) = build_schema();
        let index = Index::create_in_ram(schema);
        let trigram = register_tokenizers(&index)?;
        let reader = index.reader()?;

        Ok(Self {
            index,
            reader,
            fields,
            trigram,
        })
    }

    /// Create a writer with the given memory budget (in bytes).
    pub fn writer(&self, memory_budget: usize) -> Result<IndexWriter> {
        Ok(self.index.writer(memory_budget)?)
    }

    /// Add an annotated document via the given writer, replacing any prior
    /// entry with the same id first (upsert).
    pub fn add_document(
        &self,
        writer: &IndexWriter,
        doc: &IndexedDocument,
    ) -> Result<()> {
        let f = self.fields;

        writer.delete_term(Term::from_field_text(f.id, &doc.id));

        let risk_terms = doc.risk_terms_text();
        let catch_all = format!(
            "{} {} {} {}",
            doc.title, doc.content, doc.description, risk_terms
        );

        writer.add_document(doc!(
            f.id => doc.id.as_str(),
            f.title => doc.title.as_str(),
            f.content => doc.content.as_str(),
            f.description => doc.description.as_str(),
            f.risk_terms => risk_terms.as_str(),
            f.words => catch_all.as_str(),
            f.ngrams => catch_all.as_str(),
        ))?;

        Ok(())
    }

    /// Remove a single document by id. Takes effect on the next commit.
    pub fn delete_document(&self, writer: &IndexWriter, id: &str) {
        writer.delete_term(Term::from_field_text(self.fields.id, id));
    }

    /// Remove every document. Takes effect on the next commit.
    pub fn delete_all(&self, writer: &mut IndexWriter) -> Result<()> {
        writer.delete_all_documents()?;
        Ok(())
    }

    /// Run the weighted fuzzy query, returning up to `limit` hits ordered
    /// by ascending distance (best match first).
    ///
    /// Tokens shorter than three characters are dropped before matching;
    /// a query with no usable tokens yields no hits.
    pub fn search_fuzzy(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<FuzzyHit>> {
        let f = self.fields;

        let tokens: Vec<String> = query
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
            .collect();
        if tokens.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        self.reader.reload()?;
        let searcher = self.reader.searcher();

        // Weighted BM25 over the stemmed word fields.
        let mut parser = QueryParser::for_index(&self.index, vec![
            f.title,
            f.content,
            f.description,
            f.risk_terms,
        ]);
        parser.set_field_boost(f.title, TITLE_BOOST);
        parser.set_field_boost(f.content, BODY_BOOST);
        parser.set_field_boost(f.description, BODY_BOOST);
        parser.set_field_boost(f.risk_terms, RISK_TERMS_BOOST);
        let (bm25_query, _errors) = parser.parse_query_lenient(&tokens.join(" "));

        let mut clauses: Vec<(Occur, Box<dyn Query>)> =
            vec![(Occur::Should, bm25_query)];

        for token in &tokens {
            // Typo pathway: Levenshtein distance 1 with transpositions.
            let term = Term::from_field_text(f.words, token);
            clauses.push((
                Occur::Should,
                Box::new(FuzzyTermQuery::new(term, 1, true)),
            ));

            // Substring pathway: the token's trigrams against the catch-all
            // trigram field, downweighted so exact word matches dominate.
            for term in self.trigram_terms(token) {
                let tq: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::Basic));
                clauses.push((
                    Occur::Should,
                    Box::new(BoostQuery::new(tq, NGRAM_BOOST)),
                ));
            }
        }

        let combined = BooleanQuery::new(clauses);
        let top_docs =
            searcher.search(&combined, &TopDocs::with_limit(limit))?;

        let mut seen = HashSet::new();
        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, addr) in top_docs {
            let doc: TantivyDocument = searcher.doc(addr)?;
            let id = doc
                .get_first(f.id)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            if seen.insert(id.clone()) {
                hits.push(FuzzyHit {
                    id,
                    distance: 1.0 / (1.0 + f64::from(score)),
                });
            }
        }

        Ok(hits)
    }

    fn trigram_terms(&self, text: &str) -> Vec<Term> {
        let mut analyzer = self.trigram.clone();
        let mut stream = analyzer.token_stream(text);
        let mut terms = Vec::new();
        while let Some(token) = stream.next() {
            terms.push(Term::from_field_text(self.fields.ngrams, &token.text));
        }
        terms
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex").finish_non_exhaustive()
    }
}

//! Vector Index — in-memory store of résumé embeddings with exact k-nearest-neighbour query.
//!
//! The corpus is a small local batch, so `query` is a brute-force scan over every entry.
//! Entries live for the process lifetime only; the index is rebuilt on every run.

mod distance;

use std::collections::HashSet;

use thiserror::Error;

pub use distance::DistanceMetric;

#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    #[error("Batch length mismatch: {ids} ids, {documents} documents, {metadata} metadata, {embeddings} embeddings")]
    LengthMismatch {
        ids: usize,
        documents: usize,
        metadata: usize,
        embeddings: usize,
    },

    #[error("Duplicate document id '{0}'")]
    DuplicateId(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding for document '{0}' is empty")]
    EmptyEmbedding(String),
}

/// Metadata stored alongside each document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    pub name: Option<String>,
}

impl DocumentMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// A stored résumé. Immutable once added.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
    pub embedding: Vec<f32>,
}

/// One query result.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit<'a> {
    pub document: &'a str,
    pub metadata: &'a DocumentMetadata,
    pub distance: f32,
}

#[derive(Debug)]
pub struct VectorIndex {
    metric: DistanceMetric,
    dimension: Option<usize>,
    documents: Vec<Document>,
}

impl VectorIndex {
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            metric,
            dimension: None,
            documents: Vec::new(),
        }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Adds a batch of documents. The four sequences are parallel and must have equal length.
    ///
    /// All-or-nothing: the batch is validated in full (lengths, id uniqueness across the
    /// batch and the existing index, one consistent embedding dimension) before anything is stored.
    pub fn add(
        &mut self,
        ids: Vec<String>,
        documents: Vec<String>,
        metadata: Vec<DocumentMetadata>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), IndexError> {
        let n = ids.len();
        if documents.len() != n || metadata.len() != n || embeddings.len() != n {
            return Err(IndexError::LengthMismatch {
                ids: n,
                documents: documents.len(),
                metadata: metadata.len(),
                embeddings: embeddings.len(),
            });
        }

        let mut seen: HashSet<&str> = self.documents.iter().map(|d| d.id.as_str()).collect();
        let mut dimension = self.dimension;
        for (id, embedding) in ids.iter().zip(&embeddings) {
            if !seen.insert(id.as_str()) {
                return Err(IndexError::DuplicateId(id.clone()));
            }
            if embedding.is_empty() {
                return Err(IndexError::EmptyEmbedding(id.clone()));
            }
            match dimension {
                Some(expected) if expected != embedding.len() => {
                    return Err(IndexError::DimensionMismatch {
                        expected,
                        actual: embedding.len(),
                    });
                }
                Some(_) => {}
                None => dimension = Some(embedding.len()),
            }
        }

        self.dimension = dimension;
        self.documents.extend(
            ids.into_iter()
                .zip(documents)
                .zip(metadata)
                .zip(embeddings)
                .map(|(((id, text), metadata), embedding)| Document {
                    id,
                    text,
                    metadata,
                    embedding,
                }),
        );
        Ok(())
    }

    /// Returns the `min(k, len)` closest documents, closest first.
    /// Equal distances keep insertion order. An empty index yields an empty result.
    pub fn query(
        &self,
        query_embedding: &[f32],
        k: usize,
    ) -> Result<Vec<IndexHit<'_>>, IndexError> {
        if let Some(expected) = self.dimension {
            if expected != query_embedding.len() {
                return Err(IndexError::DimensionMismatch {
                    expected,
                    actual: query_embedding.len(),
                });
            }
        }

        let mut hits: Vec<IndexHit<'_>> = self
            .documents
            .iter()
            .map(|doc| IndexHit {
                document: &doc.text,
                metadata: &doc.metadata,
                distance: self.metric.distance(query_embedding, &doc.embedding),
            })
            .collect();

        // sort_by is stable, so ties stay in insertion order
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(entries: &[(&str, &str, Vec<f32>)]) -> VectorIndex {
        let mut index = VectorIndex::new(DistanceMetric::Euclidean);
        index
            .add(
                entries.iter().map(|(id, _, _)| id.to_string()).collect(),
                entries.iter().map(|(_, name, _)| format!("{name} resume")).collect(),
                entries.iter().map(|(_, name, _)| DocumentMetadata::named(*name)).collect(),
                entries.iter().map(|(_, _, e)| e.clone()).collect(),
            )
            .unwrap();
        index
    }

    #[test]
    fn test_query_returns_k_closest_in_order() {
        let index = index_with(&[
            ("1", "far", vec![10.0, 0.0]),
            ("2", "near", vec![1.0, 0.0]),
            ("3", "mid", vec![4.0, 0.0]),
        ]);
        let hits = index.query(&[0.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].metadata.name.as_deref(), Some("near"));
        assert_eq!(hits[1].metadata.name.as_deref(), Some("mid"));
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn test_query_k_larger_than_index_returns_all() {
        let index = index_with(&[("1", "a", vec![1.0, 0.0]), ("2", "b", vec![0.0, 1.0])]);
        let hits = index.query(&[1.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_query_empty_index_returns_empty() {
        let index = VectorIndex::new(DistanceMetric::Cosine);
        assert!(index.query(&[1.0, 0.0, 0.0], 3).unwrap().is_empty());
    }

    #[test]
    fn test_equal_distances_keep_insertion_order() {
        let index = index_with(&[
            ("1", "first", vec![1.0, 0.0]),
            ("2", "second", vec![-1.0, 0.0]),
        ]);
        let hits = index.query(&[0.0, 0.0], 2).unwrap();
        assert_eq!(hits[0].metadata.name.as_deref(), Some("first"));
        assert_eq!(hits[1].metadata.name.as_deref(), Some("second"));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut index = VectorIndex::new(DistanceMetric::Cosine);
        let err = index
            .add(
                vec!["1".to_string(), "2".to_string()],
                vec!["text".to_string()],
                vec![DocumentMetadata::default()],
                vec![vec![1.0]],
            )
            .unwrap_err();
        assert!(matches!(err, IndexError::LengthMismatch { ids: 2, .. }));
        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_id_within_batch_rejected() {
        let mut index = VectorIndex::new(DistanceMetric::Cosine);
        let err = index
            .add(
                vec!["1".to_string(), "1".to_string()],
                vec!["a".to_string(), "b".to_string()],
                vec![DocumentMetadata::default(), DocumentMetadata::default()],
                vec![vec![1.0], vec![0.5]],
            )
            .unwrap_err();
        assert_eq!(err, IndexError::DuplicateId("1".to_string()));
        assert!(index.is_empty(), "failed batch must not be partially stored");
    }

    #[test]
    fn test_duplicate_id_across_batches_rejected() {
        let mut index = index_with(&[("1", "a", vec![1.0, 0.0])]);
        let err = index
            .add(
                vec!["1".to_string()],
                vec!["again".to_string()],
                vec![DocumentMetadata::default()],
                vec![vec![0.0, 1.0]],
            )
            .unwrap_err();
        assert_eq!(err, IndexError::DuplicateId("1".to_string()));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut index = index_with(&[("1", "a", vec![1.0, 0.0])]);
        let err = index
            .add(
                vec!["2".to_string()],
                vec!["b".to_string()],
                vec![DocumentMetadata::default()],
                vec![vec![1.0, 0.0, 0.0]],
            )
            .unwrap_err();
        assert_eq!(
            err,
            IndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
        assert!(index.query(&[1.0, 0.0, 0.0], 1).is_err());
    }
}

//! BM25 term-frequency statistics over the tokenized corpus.
//!
//! ```text
//! score(D,Q) = sum IDF(qi) * (f(qi,D) * (k1 + 1)) / (f(qi,D) + k1 * (1 - b + b * |D|/avgdl))
//! IDF(qi)    = ln((N - df + 0.5) / (df + 0.5) + 1)
//! ```
//!
//! The IDF variant with the `+ 1` inside the log keeps every term weight
//! non-negative, so document scores are non-negative reals with 0 meaning
//! "no relevance signal".

use std::collections::HashMap;

const DEFAULT_K1: f64 = 1.5;
const DEFAULT_B: f64 = 0.75;

/// Immutable BM25 statistics, derived from a tokenized corpus in one pass
/// and rebuilt as a whole whenever the corpus changes.
#[derive(Debug, Clone)]
pub struct Bm25 {
    k1: f64,
    b: f64,
    /// Token count per document, positionally aligned with the corpus.
    doc_lengths: Vec<usize>,
    avg_doc_length: f64,
    /// Number of documents containing each term at least once.
    doc_freq: HashMap<String, usize>,
    /// Per-document term frequencies, positionally aligned with the corpus.
    term_freqs: Vec<HashMap<String, usize>>,
}

impl Bm25 {
    /// Build the statistics from a tokenized corpus.
    pub fn build(corpus: &[Vec<String>]) -> Self {
        let mut doc_lengths = Vec::with_capacity(corpus.len());
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut term_freqs = Vec::with_capacity(corpus.len());
        let mut total_length = 0usize;

        for tokens in corpus {
            doc_lengths.push(tokens.len());
            total_length += tokens.len();

            let mut freqs: HashMap<String, usize> = HashMap::new();
            for token in tokens {
                *freqs.entry(token.clone()).or_insert(0) += 1;
            }

            for term in freqs.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }

            term_freqs.push(freqs);
        }

        let avg_doc_length = if corpus.is_empty() {
            0.0
        } else {
            total_length as f64 / corpus.len() as f64
        };

        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
            doc_lengths,
            avg_doc_length,
            doc_freq,
            term_freqs,
        }
    }

    /// Number of indexed documents.
    pub fn doc_count(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Inverse document frequency of a term; 0.0 for unknown terms.
    fn idf(&self, term: &str) -> f64 {
        let df = match self.doc_freq.get(term) {
            Some(&df) => df as f64,
            None => return 0.0,
        };

        let n = self.doc_count() as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// Score every document against the query terms.
    ///
    /// Returns one score per document in corpus order. Documents with no
    /// overlap score 0.0 rather than being dropped; ranking and filtering
    /// policy belongs to the caller.
    pub fn scores(&self, query_terms: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0; self.doc_count()];

        for term in query_terms {
            let idf = self.idf(term);
            if idf == 0.0 {
                continue;
            }

            for (doc, freqs) in self.term_freqs.iter().enumerate() {
                let tf = match freqs.get(term) {
                    Some(&tf) => tf as f64,
                    None => continue,
                };

                let doc_length = self.doc_lengths[doc] as f64;
                let numerator = tf * (self.k1 + 1.0);
                let denominator =
                    tf + self.k1 * (1.0 - self.b + self.b * doc_length / self.avg_doc_length);
                scores[doc] += idf * numerator / denominator;
            }
        }

        scores
    }
}

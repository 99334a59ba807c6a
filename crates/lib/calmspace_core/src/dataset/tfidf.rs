//! Sparse TF-IDF index with cosine similarity.
//!
//! Unigrams and bigrams over lowercase word tokens with English stop words
//! removed, smoothed idf, L2-normalized rows. Vocabulary is limited by
//! minimum document frequency and a maximum feature count chosen by corpus
//! term frequency.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Index tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct TfidfOptions {
    pub max_features: usize,
    pub min_df: usize,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_df: 2,
        }
    }
}

/// L2-normalized sparse vector, sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector(Vec<(usize, f32)>);

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dot product; equals cosine similarity for normalized vectors.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.0.len() && j < other.0.len() {
            let (a, b) = (self.0[i], other.0[j]);
            match a.0.cmp(&b.0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a.1 * b.1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Fitted vocabulary plus the vectors of the documents it was fitted on.
#[derive(Debug, Clone, Default)]
pub struct TfidfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
}

impl TfidfIndex {
    /// Fit the vocabulary on `documents` and vectorize each of them.
    pub fn fit<S: AsRef<str>>(documents: &[S], options: TfidfOptions) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| terms(d.as_ref())).collect();

        // term -> (document frequency, corpus frequency)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for doc in &tokenized {
            let mut seen: Vec<&str> = Vec::with_capacity(doc.len());
            for term in doc {
                let entry = counts.entry(term.as_str()).or_default();
                entry.1 += 1;
                if !seen.contains(&term.as_str()) {
                    seen.push(term.as_str());
                    entry.0 += 1;
                }
            }
        }

        let mut kept: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .filter(|(_, (df, _))| *df >= options.min_df)
            .map(|(term, (df, tf))| (term, df, tf))
            .collect();
        if kept.len() > options.max_features {
            kept.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));
            kept.truncate(options.max_features);
        }
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (index, (term, df, _)) in kept.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::new(),
        };
        index.rows = tokenized.iter().map(|doc| index.vectorize_terms(doc)).collect();
        index
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Vectorize an unseen text against the fitted vocabulary.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize_terms(&terms(text))
    }

    /// Cosine similarity between `query` and document `row`.
    pub fn similarity(&self, query: &SparseVector, row: usize) -> f32 {
        self.rows.get(row).map(|r| r.dot(query)).unwrap_or(0.0)
    }

    /// Best-scoring row among `candidates`; the first row wins ties.
    pub fn best_match(
        &self,
        query: &SparseVector,
        candidates: impl IntoIterator<Item = usize>,
    ) -> Option<(usize, f32)> {
        if query.is_empty() {
            return None;
        }
        candidates
            .into_iter()
            .map(|row| (row, self.similarity(query, row)))
            .fold(None, |best, (row, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((row, score)),
            })
    }

    fn vectorize_terms(&self, terms: &[String]) -> SparseVector {
        let mut tf: HashMap<usize, f32> = HashMap::new();
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                *tf.entry(index).or_default() += 1.0;
            }
        }
        let mut entries: Vec<(usize, f32)> = tf
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        SparseVector(entries)
    }
}

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern must compile"));

/// Unigrams and bigrams of `text` after stop-word removal.
fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut out: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    out.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    out
}

fn is_stop_word(token: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&token).is_ok()
}

// Sorted for binary search.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amoungst",
    "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere",
    "are", "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "did", "do", "does", "done", "down",
    "due", "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere", "empty",
    "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere", "except",
    "few", "fifteen", "fify", "fill", "find", "fire", "first", "five", "for", "former", "formerly",
    "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hers",
    "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in", "inc",
    "indeed", "interest", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter",
    "least", "less", "ltd", "made", "many", "may", "me", "meanwhile", "might", "mill", "mine",
    "more", "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
    "seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
    "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them", "themselves",
    "then", "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon",
    "these", "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve",
    "twenty", "two", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
    "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_sorted() {
        assert!(ENGLISH_STOP_WORDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn terms_drop_stop_words_and_add_bigrams() {
        let t = terms("I cannot sleep at night");
        assert_eq!(t, vec!["sleep", "night", "sleep night"]);
    }

    #[test]
    fn stop_words_match_sklearn_english_list() {
        assert_eq!(ENGLISH_STOP_WORDS.len(), 318);
        for word in ["empty", "cry", "alone", "find", "two", "serious"] {
            assert!(is_stop_word(word), "{word} should be a stop word");
        }
        assert_eq!(terms("I feel empty"), vec!["feel"]);
        assert_eq!(terms("I cry alone every night"), vec!["night"]);
    }

    #[test]
    fn min_df_filters_rare_terms() {
        let docs = ["panic attacks at night", "panic during exams", "happy puppy"];
        let index = TfidfIndex::fit(&docs, TfidfOptions::default());
        assert_eq!(index.vocabulary_len(), 1);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn max_features_keeps_most_frequent() {
        let docs = ["sleep sleep work", "sleep work", "sleep friends", "friends work"];
        let index = TfidfIndex::fit(
            &docs,
            TfidfOptions {
                max_features: 1,
                min_df: 2,
            },
        );
        assert_eq!(index.vocabulary_len(), 1);
        assert!(!index.transform("sleep").is_empty());
        assert!(index.transform("work").is_empty());
    }

    #[test]
    fn identical_text_scores_one() {
        let docs = ["exam stress tonight", "exam stress again", "lonely weekend"];
        let index = TfidfIndex::fit(&docs, TfidfOptions::default());
        let query = index.transform("exam stress");
        let (row, score) = index.best_match(&query, 0..index.len()).unwrap();
        assert_eq!(row, 0);
        assert!((score - 1.0).abs() < 1e-5, "score was {score}");
    }

    #[test]
    fn unrelated_query_has_no_match() {
        let docs = ["exam stress tonight", "exam stress again"];
        let index = TfidfIndex::fit(&docs, TfidfOptions::default());
        let query = index.transform("pizza");
        assert!(index.best_match(&query, 0..index.len()).is_none());
    }

    #[test]
    fn rows_are_normalized() {
        let docs = ["work deadline pressure", "work deadline boss", "boss pressure"];
        let index = TfidfIndex::fit(&docs, TfidfOptions::default());
        for row in &index.rows {
            let norm: f32 = row.0.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }
}

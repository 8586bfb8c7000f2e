//! Knowledge Base Index
//!
//! Lazily-built chunk index over a directory of guidance documents.
//! Built at most once per handle: `ensure_ready()` is guarded by a
//! OnceCell, so concurrent first callers cannot build it twice. A failed
//! build is not cached - a later call retries, which lets an operator
//! drop documents in place without restarting.

use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::KbError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Max characters per chunk; longer paragraphs are split
const CHUNK_MAX_CHARS: usize = 1200;

/// Document extensions loaded into the index
const DOC_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Query terms shorter than this are noise and skipped
const MIN_TERM_LEN: usize = 4;

// ============================================================================
// CHUNK INDEX
// ============================================================================

/// One retrievable slice of a source document
#[derive(Debug, Clone)]
pub struct Chunk {
    pub source: String,
    pub text: String,
    text_lower: String,
}

impl Chunk {
    fn new(source: String, text: String) -> Self {
        let text_lower = text.to_lowercase();
        Self { source, text, text_lower }
    }
}

/// In-memory index over all chunks of all documents
#[derive(Debug)]
pub struct ChunkIndex {
    chunks: Vec<Chunk>,
}

impl ChunkIndex {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Top-k chunks by lexical overlap with the query. Chunks with no
    /// overlap at all are excluded; if nothing overlaps, the leading
    /// chunks of the corpus are returned so synthesis always has context.
    pub fn retrieve(&self, query: &str, k: usize) -> Vec<&Chunk> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= MIN_TERM_LEN)
            .map(|t| t.to_string())
            .collect();

        let mut scored: Vec<(usize, &Chunk)> = self
            .chunks
            .iter()
            .map(|chunk| {
                let score: usize = terms
                    .iter()
                    .map(|t| chunk.text_lower.matches(t.as_str()).count())
                    .sum();
                (score, chunk)
            })
            .filter(|(score, _)| *score > 0)
            .collect();

        if scored.is_empty() {
            return self.chunks.iter().take(k).collect();
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(k).map(|(_, c)| c).collect()
    }
}

// ============================================================================
// KNOWLEDGE BASE HANDLE
// ============================================================================

/// Owned handle around the lazily-built index
pub struct KnowledgeBase {
    root: PathBuf,
    index: OnceCell<ChunkIndex>,
}

impl KnowledgeBase {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build the index on first call, reuse it afterwards.
    /// Idempotent warm-up: only one build proceeds under concurrency.
    pub fn ensure_ready(&self) -> Result<&ChunkIndex, KbError> {
        self.index.get_or_try_init(|| build_index(&self.root))
    }
}

// ============================================================================
// INDEX BUILD
// ============================================================================

fn build_index(root: &Path) -> Result<ChunkIndex, KbError> {
    if !root.exists() {
        return Err(KbError::MissingDir {
            path: root.display().to_string(),
        });
    }

    log::info!("Loading knowledge base from {} (first call only)", root.display());

    let entries = fs::read_dir(root).map_err(|e| KbError::ReadError {
        message: e.to_string(),
    })?;

    let mut chunks = Vec::new();
    let mut doc_count = 0usize;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| DOC_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    for path in paths {
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Skipping unreadable document {}: {}", path.display(), e);
                continue;
            }
        };

        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        doc_count += 1;
        for text in split_chunks(&content) {
            chunks.push(Chunk::new(source.clone(), text));
        }
    }

    if chunks.is_empty() {
        return Err(KbError::EmptyDir {
            path: root.display().to_string(),
        });
    }

    log::info!("Indexed {} documents ({} chunks)", doc_count, chunks.len());

    Ok(ChunkIndex { chunks })
}

/// Split a document into paragraph chunks, capping each at CHUNK_MAX_CHARS
fn split_chunks(content: &str) -> Vec<String> {
    let mut out = Vec::new();

    for paragraph in content.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if paragraph.len() <= CHUNK_MAX_CHARS {
            out.push(paragraph.to_string());
            continue;
        }

        // Oversized paragraph: split on line boundaries
        let mut current = String::new();
        for line in paragraph.lines() {
            if !current.is_empty() && current.len() + line.len() + 1 > CHUNK_MAX_CHARS {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_doc(dir: &Path, name: &str, content: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_missing_dir_is_error() {
        let kb = KnowledgeBase::new("/definitely/not/a/real/path");
        match kb.ensure_ready() {
            Err(KbError::MissingDir { .. }) => {}
            other => panic!("Expected MissingDir, got {:?}", other.map(|i| i.len())),
        }
    }

    #[test]
    fn test_empty_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let kb = KnowledgeBase::new(dir.path());
        match kb.ensure_ready() {
            Err(KbError::EmptyDir { .. }) => {}
            other => panic!("Expected EmptyDir, got {:?}", other.map(|i| i.len())),
        }
    }

    #[test]
    fn test_failed_build_is_retried_after_docs_appear() {
        let dir = tempfile::tempdir().unwrap();
        let kb = KnowledgeBase::new(dir.path());
        assert!(kb.ensure_ready().is_err());

        write_doc(dir.path(), "flood.txt", "Move to higher ground immediately.");
        let index = kb.ensure_ready().expect("index should build once docs exist");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_build_happens_once() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "a.txt", "Alpha guidance.");

        let kb = KnowledgeBase::new(dir.path());
        let first = kb.ensure_ready().unwrap() as *const ChunkIndex;

        // Adding documents after the build must not change the index
        write_doc(dir.path(), "b.txt", "Beta guidance.");
        let second = kb.ensure_ready().unwrap() as *const ChunkIndex;

        assert_eq!(first, second);
        assert_eq!(kb.ensure_ready().unwrap().len(), 1);
    }

    #[test]
    fn test_retrieval_prefers_matching_chunk() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "ndma.txt",
            "Flood response: evacuate low-lying areas and move to higher ground.\n\n\
             Fire response: use staircases, never elevators, and stay low under smoke.",
        );

        let kb = KnowledgeBase::new(dir.path());
        let index = kb.ensure_ready().unwrap();

        let hits = index.retrieve("safety steps for a flood", 1);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.contains("higher ground"));
    }

    #[test]
    fn test_retrieval_with_no_overlap_returns_leading_chunks() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "a.txt", "First chunk.\n\nSecond chunk.");

        let kb = KnowledgeBase::new(dir.path());
        let index = kb.ensure_ready().unwrap();

        let hits = index.retrieve("zzzz qqqq", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "First chunk.");
    }

    #[test]
    fn test_oversized_paragraph_is_split() {
        let long_line = "guidance line\n".repeat(200);
        let chunks = split_chunks(&long_line);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= CHUNK_MAX_CHARS));
    }
}

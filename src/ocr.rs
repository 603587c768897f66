//! External collaborators (§6): OCR word-observation input and the optional
//! scandata skip-page list. Both are scoped JSON implementations; hOCR/PDF
//! parsing itself is out of scope (§1).

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::WordObservation;

/// One page's worth of OCR output: dimensions plus a flat word list.
#[derive(Debug, Clone)]
pub struct OcrPage {
    pub dimensions: (f64, f64),
    pub words: Vec<WordObservation>,
}

/// Provides the page stream consumed by the candidate extractor (§6).
pub trait OcrSource {
    fn pages(&self) -> Result<Vec<OcrPage>>;
}

/// Provides the set of leaf indices absent from the numbered stream (§6).
pub trait ScandataSource {
    fn skip_pages(&self) -> Result<HashSet<usize>>;
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    width: f64,
    height: f64,
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    text: String,
    bbox: [f64; 4],
    fontsize: f64,
    confidence: u8,
}

/// Reads `{"pages": [{"width":.., "height":.., "words": [...]}]}` documents.
pub struct JsonOcrSource {
    raw: RawDocument,
}

impl JsonOcrSource {
    pub fn parse_str(s: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(s)?;
        Ok(Self { raw })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text)
    }
}

impl OcrSource for JsonOcrSource {
    fn pages(&self) -> Result<Vec<OcrPage>> {
        Ok(self
            .raw
            .pages
            .iter()
            .map(|p| OcrPage {
                dimensions: (p.width, p.height),
                words: p
                    .words
                    .iter()
                    .map(|w| WordObservation::new((w.bbox[0], w.bbox[1], w.bbox[2], w.bbox[3]), &w.text, w.fontsize, w.confidence))
                    .collect(),
            })
            .collect())
    }
}

/// Reads a bare JSON array of skip-page indices, e.g. `[3, 7, 12]`.
pub struct JsonScandataSource {
    indices: Vec<usize>,
}

impl JsonScandataSource {
    pub fn parse_str(s: &str) -> Result<Self> {
        let indices: Vec<usize> = serde_json::from_str(s)?;
        Ok(Self { indices })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text)
    }
}

impl ScandataSource for JsonScandataSource {
    fn skip_pages(&self) -> Result<HashSet<usize>> {
        Ok(self.indices.iter().copied().collect())
    }
}

/// Map each effective (dense) page index back to its original leaf index,
/// given the set of skipped leaves (§6, scandata collaborator contract).
pub fn effective_leaf_numbers(total_pages: usize, skip_pages: &HashSet<usize>) -> Vec<usize> {
    (0..total_pages).filter(|p| !skip_pages.contains(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ocr_source_parses() {
        let doc = r#"{
            "pages": [
                {"width": 100.0, "height": 200.0, "words": [
                    {"text": "1", "bbox": [10.0, 10.0, 20.0, 20.0], "fontsize": 9.0, "confidence": 90}
                ]},
                {"width": 100.0, "height": 200.0, "words": []}
            ]
        }"#;
        let source = JsonOcrSource::parse_str(doc).unwrap();
        let pages = source.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].dimensions, (100.0, 200.0));
        assert_eq!(pages[0].words.len(), 1);
        assert_eq!(pages[0].words[0].text, "1");
        assert!(pages[1].words.is_empty());
    }

    #[test]
    fn test_json_scandata_source_parses() {
        let source = JsonScandataSource::parse_str("[3, 7, 12]").unwrap();
        let skip = source.skip_pages().unwrap();
        assert_eq!(skip.len(), 3);
        assert!(skip.contains(&7));
        assert!(!skip.contains(&8));
    }

    #[test]
    fn test_json_ocr_source_malformed() {
        assert!(JsonOcrSource::parse_str("not json").is_err());
    }

    #[test]
    fn test_effective_leaf_numbers() {
        let mut skip = HashSet::new();
        skip.insert(1);
        skip.insert(3);
        assert_eq!(effective_leaf_numbers(5, &skip), vec![0, 2, 4]);
    }
}

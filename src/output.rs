//! Output document (§6): the final JSON result, pretty-printed with a
//! 4-space indent.

use serde::Serialize;

use crate::confidence;
use crate::model::{Candidate, Sequence};

/// Identifies this crate as the producing tool, reported in the output
/// document's `archive-hocr-tools-version` field (§6).
pub const TOOL_VERSION: &str = concat!("pagenum-", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize, PartialEq)]
pub struct OutputPage {
    #[serde(rename = "leafNum")]
    pub leaf_num: usize,
    pub confidence: Option<u32>,
    #[serde(rename = "pageNumber")]
    pub page_number: String,
    #[serde(rename = "pageProb")]
    pub page_prob: Option<u32>,
    #[serde(rename = "wordConf")]
    pub word_conf: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OutputDocument {
    pub identifier: Option<String>,
    #[serde(rename = "format-version")]
    pub format_version: String,
    #[serde(rename = "archive-hocr-tools-version")]
    pub archive_hocr_tools_version: String,
    pub confidence: u32,
    pub pages: Vec<OutputPage>,
}

/// Build the output document from a final per-page assignment, its refined
/// sequences (for the document confidence), the leaf-number mapping
/// (`leaf_numbers[effective_page] == original_leaf`), and an optional
/// identifier override.
pub fn build_document(final_path: &[Option<Candidate>], refined_sequences: &[Sequence], leaf_numbers: &[usize], identifier: Option<String>) -> OutputDocument {
    let doc_confidence = confidence::confidence_percent(final_path, refined_sequences);

    let pages = final_path
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let leaf_num = leaf_numbers.get(i).copied().unwrap_or(i);
            match candidate {
                Some(c) => {
                    let (page_conf, page_prob) = match c.prob {
                        Some((_, p_true)) => (Some((((p_true + 0.10).min(1.0)) * 100.0).round() as u32), Some((p_true * 100.0).round() as u32)),
                        None => (None, None),
                    };
                    OutputPage {
                        leaf_num,
                        confidence: page_conf,
                        page_number: c.value.clone(),
                        page_prob,
                        word_conf: c.word_confidence().map(u32::from),
                    }
                }
                None => OutputPage {
                    leaf_num,
                    confidence: None,
                    page_number: String::new(),
                    page_prob: None,
                    word_conf: None,
                },
            }
        })
        .collect();

    OutputDocument {
        identifier,
        format_version: "2".to_string(),
        archive_hocr_tools_version: TOOL_VERSION.to_string(),
        confidence: doc_confidence,
        pages,
    }
}

/// Serialize with a 4-space indent (§6: "JSON is pretty-printed with
/// 4-space indent"), unlike `serde_json`'s 2-space `to_string_pretty`
/// default.
pub fn to_pretty_json(doc: &OutputDocument) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser).expect("OutputDocument serialization is infallible");
    String::from_utf8(buf).expect("serde_json always emits valid UTF-8")
}

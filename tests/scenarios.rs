//! The six concrete inference scenarios.

use pagenum::config::Options;
use pagenum::error::Result;
use pagenum::model::WordObservation;
use pagenum::ocr::{OcrPage, OcrSource};
use pagenum::{infer, output};

struct FixedOcr(Vec<OcrPage>);

impl OcrSource for FixedOcr {
    fn pages(&self) -> Result<Vec<OcrPage>> {
        Ok(self.0.clone())
    }
}

fn footer_word(text: &str) -> WordObservation {
    WordObservation::new((10.0, 280.0, 30.0, 295.0), text, 9.0, 92)
}

fn body_word(text: &str) -> WordObservation {
    WordObservation::new((90.0, 140.0, 110.0, 155.0), text, 9.0, 92)
}

fn page(words: Vec<WordObservation>) -> OcrPage {
    OcrPage {
        dimensions: (200.0, 300.0),
        words,
    }
}

#[test]
fn test_pure_arabic_no_gaps() {
    let pages: Vec<OcrPage> = (1..=10).map(|i| page(vec![footer_word(&i.to_string())])).collect();
    let ocr = FixedOcr(pages);
    let doc = infer(&ocr, None, &Options::default()).unwrap();

    assert_eq!(doc.pages.len(), 10);
    for (i, p) in doc.pages.iter().enumerate() {
        assert_eq!(p.page_number, (i + 1).to_string());
    }
    // Every page carries only its footer number and nothing else, so pass 2
    // gets zero negative training examples and never trains a classifier;
    // the confidence formula's prob_avg term is then 0 for the whole
    // document (see DESIGN.md open-question decision 5). Confidence bottoms
    // out near the f4 floor even though every page is correctly assigned.
    assert!(doc.confidence <= 15, "confidence {} higher than the untrained-classifier floor allows", doc.confidence);
}

#[test]
fn test_roman_front_matter_then_arabic() {
    let romans = ["i", "ii", "iii", "iv", "v"];
    let mut pages: Vec<OcrPage> = romans.iter().map(|r| page(vec![footer_word(r)])).collect();
    pages.extend((1..=15).map(|i| page(vec![footer_word(&i.to_string())])));

    let ocr = FixedOcr(pages);
    let doc = infer(&ocr, None, &Options::default()).unwrap();

    assert_eq!(doc.pages.len(), 20);
    for (i, r) in romans.iter().enumerate() {
        assert_eq!(doc.pages[i].page_number, *r);
    }
    for i in 0..15 {
        assert_eq!(doc.pages[5 + i].page_number, (i + 1).to_string());
    }
}

#[test]
fn test_missing_middle_page() {
    let mut pages: Vec<OcrPage> = (1..=10).map(|i| page(vec![footer_word(&i.to_string())])).collect();
    pages[5] = page(vec![]);

    let ocr = FixedOcr(pages);
    let doc = infer(&ocr, None, &Options::default()).unwrap();

    let page5 = &doc.pages[5];
    assert_eq!(page5.page_number, "6");
    assert_eq!(page5.word_conf, None);
}

#[test]
fn test_distractor_numbers() {
    let pages: Vec<OcrPage> = (1..=10).map(|i| page(vec![footer_word(&i.to_string()), body_word("1987")])).collect();

    let ocr = FixedOcr(pages);
    let doc = infer(&ocr, None, &Options::default()).unwrap();

    for (i, p) in doc.pages.iter().enumerate() {
        assert_ne!(p.page_number, "1987");
        if !p.page_number.is_empty() {
            assert_eq!(p.page_number, (i + 1).to_string());
        }
    }
}

#[test]
fn test_composite_pages() {
    let pages: Vec<OcrPage> = (1..=5).map(|i| page(vec![footer_word(&format!("A-{i}"))])).collect();

    let ocr = FixedOcr(pages);
    let doc = infer(&ocr, None, &Options::default()).unwrap();

    for (i, p) in doc.pages.iter().enumerate() {
        assert_eq!(p.page_number, format!("A-{}", i + 1));
    }
}

#[test]
fn test_edge_opportunistic_fill() {
    let mut pages: Vec<OcrPage> = vec![page(vec![]); 4];
    pages.extend((5..=20).map(|i| page(vec![footer_word(&i.to_string())])));

    let ocr = FixedOcr(pages.clone());

    let filled = infer(&ocr, None, &Options::builder().opportunistic_fill(true).build()).unwrap();
    for i in 0..4 {
        assert_eq!(filled.pages[i].page_number, (i + 1).to_string());
    }

    let unfilled = infer(&FixedOcr(pages), None, &Options::builder().opportunistic_fill(false).build()).unwrap();
    for i in 0..4 {
        assert_eq!(unfilled.pages[i].page_number, "");
    }
}

#[test]
fn test_determinism_byte_identical_json() {
    let pages: Vec<OcrPage> = (1..=10).map(|i| page(vec![footer_word(&i.to_string()), body_word("1987")])).collect();
    let options = Options::default();

    let doc1 = infer(&FixedOcr(pages.clone()), None, &options).unwrap();
    let doc2 = infer(&FixedOcr(pages), None, &options).unwrap();

    assert_eq!(output::to_pretty_json(&doc1), output::to_pretty_json(&doc2));
}

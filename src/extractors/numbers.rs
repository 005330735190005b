// src/extractors/numbers.rs

use crate::extractors::blocks::Block;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// --- Regex Patterns (Lazy Static) ---
// Generic top-three pattern: header line, then three tokens of 3-6 digits or
// hyphens (hyphens are unrevealed digits and are kept verbatim).
static PRIZE_TRIPLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"1st Prize\s+2nd Prize\s+3rd Prize\s*\n([0-9-]{3,6})\s+([0-9-]{3,6})\s+([0-9-]{3,6})",
    )
    .expect("Failed to compile PRIZE_TRIPLE_RE")
});

// Six-digit variant (e.g. Damacai 3+3D). Applied after the generic pattern
// and overwrites it on match; last-match-wins is the observed site behavior
// and must not be reordered.
static PRIZE_TRIPLE_6D_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"1st Prize\s+2nd Prize\s+3rd Prize\s*\n(\d{6})\s+(\d{6})\s+(\d{6})")
        .expect("Failed to compile PRIZE_TRIPLE_6D_RE")
});

static FOUR_DIGIT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}\b").expect("Failed to compile FOUR_DIGIT_TOKEN_RE"));

// Section headers that terminate a labeled chunk within a block body.
const SECTION_HEADERS: &str =
    "Consolation|Special|Bonus|Zodiac|Jackpot|WINNING NUMBERS|Lotto|Star Toto|Power Toto|Supreme Toto";

// --- Data Structures ---

/// Structured output for one draw. Prize values stay string-typed so leading
/// zeros and `-` placeholders survive serialization.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DrawRecord {
    pub title: String,
    pub draw: String,
    pub first: Option<String>,
    pub second: Option<String>,
    pub third: Option<String>,
    pub special: Vec<String>,
    pub consolation: Vec<String>,
    pub raw: Vec<String>,
}

// --- Extraction Rules ---

fn match_triple(re: &Regex, text: &str) -> Option<(String, String, String)> {
    re.captures(text)
        .map(|c| (c[1].to_string(), c[2].to_string(), c[3].to_string()))
}

/// Collects the 4-digit tokens of the chunk following a `label` line, up to
/// the next recognized section header or end of text. Order-preserving,
/// duplicates kept, empty when the label is absent.
pub fn grab_section(text: &str, label: &str) -> Vec<String> {
    let pattern = format!(r"(?s){label}\s*\n(.*?)(?:\n(?:{SECTION_HEADERS})\b|$)");
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Bad section pattern for label '{}': {}", label, e);
            return Vec::new();
        }
    };

    let chunk = match re.captures(text) {
        Some(c) => c.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
        None => return Vec::new(),
    };

    FOUR_DIGIT_TOKEN_RE
        .find_iter(&chunk)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts the typed fields of one block. Pure per-block function; a pattern
/// miss leaves that field `None`/empty and never affects the other fields.
pub fn extract(block: &Block) -> DrawRecord {
    let text = block.lines.join("\n");

    let mut record = DrawRecord {
        title: block.title.clone(),
        draw: block.draw.clone(),
        first: None,
        second: None,
        third: None,
        special: Vec::new(),
        consolation: Vec::new(),
        raw: block.lines.clone(),
    };

    if let Some((first, second, third)) = match_triple(&PRIZE_TRIPLE_RE, &text) {
        record.first = Some(first);
        record.second = Some(second);
        record.third = Some(third);
    }

    record.special = grab_section(&text, "Special");
    record.consolation = grab_section(&text, "Consolation");

    // 6-digit refinement overwrites the generic capture.
    if let Some((first, second, third)) = match_triple(&PRIZE_TRIPLE_6D_RE, &text) {
        record.first = Some(first);
        record.second = Some(second);
        record.third = Some(third);
    }

    record
}

/// Applies `extract` to every block in order. One record per block, no
/// filtering or deduplication; that is the persistence layer's call.
pub fn aggregate(blocks: &[Block]) -> Vec<DrawRecord> {
    blocks.iter().map(extract).collect()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn block(body: &[&str]) -> Block {
        Block {
            title: "Magnum 4D".to_string(),
            draw: "(Sun) 18-Jan-2026 #123/26".to_string(),
            lines: body.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn generic_triple_is_captured() {
        let record = extract(&block(&[
            "1st Prize  2nd Prize  3rd Prize",
            "1234 5678 9012",
        ]));
        assert_eq!(record.first.as_deref(), Some("1234"));
        assert_eq!(record.second.as_deref(), Some("5678"));
        assert_eq!(record.third.as_deref(), Some("9012"));
    }

    #[test]
    fn hyphen_placeholders_are_preserved_verbatim() {
        let record = extract(&block(&[
            "1st Prize  2nd Prize  3rd Prize",
            "12-- 5678 ----",
        ]));
        assert_eq!(record.first.as_deref(), Some("12--"));
        assert_eq!(record.second.as_deref(), Some("5678"));
        assert_eq!(record.third.as_deref(), Some("----"));
    }

    #[test]
    fn six_digit_triple_overwrites_generic_match() {
        // [0-9-]{3,6} also matches six-digit tokens, so the generic pattern
        // fires first; the 6-digit pass must win.
        let record = extract(&block(&[
            "1st Prize  2nd Prize  3rd Prize",
            "111111 222222 333333",
        ]));
        assert_eq!(record.first.as_deref(), Some("111111"));
        assert_eq!(record.second.as_deref(), Some("222222"));
        assert_eq!(record.third.as_deref(), Some("333333"));
    }

    #[test]
    fn mixed_tokens_fall_back_to_generic_capture() {
        // A hyphenated first token keeps the 6-digit pattern from matching,
        // so the generic capture stands.
        let record = extract(&block(&[
            "1st Prize  2nd Prize  3rd Prize",
            "123-56 789012 345678",
        ]));
        assert_eq!(record.first.as_deref(), Some("123-56"));
        assert_eq!(record.second.as_deref(), Some("789012"));
        assert_eq!(record.third.as_deref(), Some("345678"));
    }

    #[test]
    fn missing_header_yields_null_triple() {
        let record = extract(&block(&["Special", "1111 2222"]));
        assert_eq!(record.first, None);
        assert_eq!(record.second, None);
        assert_eq!(record.third, None);
        // Section extraction proceeds regardless.
        assert_eq!(record.special, vec!["1111", "2222"]);
    }

    #[test]
    fn section_chunk_stops_at_next_header() {
        let text = "Special\n1111 2222\nConsolation\n3333 4444 5555";
        assert_eq!(grab_section(text, "Special"), vec!["1111", "2222"]);
        assert_eq!(
            grab_section(text, "Consolation"),
            vec!["3333", "4444", "5555"]
        );
    }

    #[test]
    fn absent_label_returns_empty() {
        let text = "1st Prize  2nd Prize  3rd Prize\n1234 5678 9012";
        assert!(grab_section(text, "Special").is_empty());
    }

    #[test]
    fn section_tokens_must_be_word_bounded_four_digits() {
        let text = "Special\n1111 123456 22 333333 4444";
        assert_eq!(grab_section(text, "Special"), vec!["1111", "4444"]);
    }

    #[test]
    fn section_duplicates_are_kept_in_order() {
        let text = "Special\n7777 1234 7777";
        assert_eq!(grab_section(text, "Special"), vec!["7777", "1234", "7777"]);
    }

    #[test]
    fn section_runs_to_end_of_text_without_following_header() {
        let text = "Consolation\n6666 7777\n8888";
        assert_eq!(grab_section(text, "Consolation"), vec!["6666", "7777", "8888"]);
    }

    #[test]
    fn aggregate_yields_one_record_per_block_in_order() {
        let blocks = vec![
            block(&["1st Prize  2nd Prize  3rd Prize", "1234 5678 9012"]),
            Block {
                title: "Toto 6/58".to_string(),
                draw: "(Sun) 18-Jan-2026 #5124".to_string(),
                lines: vec![],
            },
        ];
        let records = aggregate(&blocks);
        assert_eq!(records.len(), blocks.len());
        assert_eq!(records[0].title, "Magnum 4D");
        assert_eq!(records[1].title, "Toto 6/58");
        assert_eq!(records[1].first, None);
        assert!(records[1].special.is_empty());
    }

    #[test]
    fn raw_lines_are_copied_into_the_record() {
        let b = block(&["Special", "1111"]);
        let record = extract(&b);
        assert_eq!(record.raw, b.lines);
    }
}

// src/extractors/blocks.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// --- Regex Patterns (Lazy Static) ---
// A draw descriptor line looks like: "(Sun) 18-Jan-2026 #5123"
// (weekday abbreviation, DD-Mon-YYYY date, then the '#' draw number marker).
static DRAW_DESCRIPTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\([A-Za-z]{3}\)\s+\d{2}-[A-Za-z]{3}-\d{4}\s+#")
        .expect("Failed to compile DRAW_DESCRIPTOR_RE")
});

/// Returns true if the line encodes a draw's weekday/date/number descriptor.
pub fn is_draw_descriptor(line: &str) -> bool {
    DRAW_DESCRIPTOR_RE.is_match(line)
}

// --- Data Structures ---

/// One draw's worth of page lines: the title line, the draw descriptor line
/// that immediately follows it, and every body line up to the block's
/// terminating condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub title: String,
    pub draw: String,
    pub lines: Vec<String>,
}

/// Site-specific line sets steering segmentation. Kept as configuration so the
/// segmenter can be exercised against synthetic line streams in tests.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Structural labels that can never be a block title (page header,
    /// region names, the date caption).
    pub noise_labels: HashSet<String>,
    /// Boilerplate lines that end a block body on sight (footer, navigation,
    /// copyright). Never included in any block.
    pub footer_stopwords: HashSet<String>,
}

impl SegmenterConfig {
    /// The literal sets observed on 4dmoon.com result pages.
    pub fn fourdmoon() -> Self {
        let noise_labels = [
            "Past Draw Results",
            "Date :",
            "West Malaysia",
            "East Malaysia",
            "Singapore",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let footer_stopwords = [
            "Disclaimer",
            "About Us",
            "Contact Us",
            "Copyright © 2026",
            "4dmoon.com",
            "Powered By 4D King.",
            "|",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self { noise_labels, footer_stopwords }
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::fourdmoon()
    }
}

// --- Segmenter ---

/// Groups a flat stream of page lines into per-draw blocks.
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Single forward pass over the line stream. A block opens where a line is
    /// immediately followed by a draw descriptor; it closes at a footer
    /// stopword, at the line preceding the next descriptor (that line is the
    /// next block's title, so it is left unconsumed), or at end of stream.
    pub fn segment(&self, lines: &[String]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut i = 0;

        while i + 1 < lines.len() {
            let title = &lines[i];
            let next = &lines[i + 1];

            if self.config.noise_labels.contains(title.as_str()) {
                i += 1;
                continue;
            }

            if !is_draw_descriptor(next) {
                i += 1;
                continue;
            }

            let mut body = Vec::new();
            let mut j = i + 2;
            while j < lines.len() {
                if self.config.footer_stopwords.contains(lines[j].as_str()) {
                    break;
                }
                // lines[j] is the next block's title; leave it for the
                // next iteration of the outer scan.
                if j + 1 < lines.len() && is_draw_descriptor(&lines[j + 1]) {
                    break;
                }
                body.push(lines[j].clone());
                j += 1;
            }

            tracing::debug!(
                "Segmented block '{}' ({}) with {} body lines",
                title,
                next,
                body.len()
            );
            blocks.push(Block {
                title: title.clone(),
                draw: next.clone(),
                lines: body,
            });
            i = j;
        }

        blocks
    }
}

//! Input format detection.
//!
//! An ordered cascade of heuristics: outline markers, then delimiter
//! consistency, then recurring `Key: value` lines. The first candidate at or
//! above the strong-match threshold wins; otherwise the best weak candidate
//! competes with the freeform baseline.

use std::collections::HashSet;

use tci_model::{DetectedFormat, InputFormat};

use crate::delimited::{count_delimiters, split_delimited_line};
use crate::hierarchical::{LineKind, classify};
use crate::structured::known_key_value;

/// Confidence reported for text no heuristic recognized.
pub const FREEFORM_CONFIDENCE: f32 = 0.3;

/// Upper bound for outline confidence.
const HIERARCHICAL_CAP: f32 = 0.95;

/// Upper bound for structured confidence.
const STRUCTURED_CAP: f32 = 0.9;

/// Detector tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorOptions {
    /// Lines inspected for delimiter consistency.
    pub sample_lines: usize,
    /// Confidence at which a candidate wins outright.
    pub strong_match_threshold: f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            sample_lines: 5,
            strong_match_threshold: 0.6,
        }
    }
}

impl DetectorOptions {
    #[must_use]
    pub fn with_sample_lines(mut self, sample_lines: usize) -> Self {
        self.sample_lines = sample_lines.max(1);
        self
    }

    #[must_use]
    pub fn with_strong_match_threshold(mut self, threshold: f32) -> Self {
        self.strong_match_threshold = threshold;
        self
    }
}

/// Classifies raw text into an [`InputFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatDetector {
    options: DetectorOptions,
}

impl FormatDetector {
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Detects the format of `text`. Deterministic and never fails.
    pub fn detect(&self, text: &str) -> DetectedFormat {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.is_empty() {
            tracing::debug!("empty input, detected as freeform");
            return DetectedFormat::new(InputFormat::Freeform, 0.0);
        }

        let threshold = self.options.strong_match_threshold;
        let mut best: Option<DetectedFormat> = None;
        let candidates = [
            detect_hierarchical(&lines),
            self.detect_delimited(&lines, InputFormat::Tsv),
            self.detect_delimited(&lines, InputFormat::Csv),
            detect_structured(&lines),
        ];
        for candidate in candidates.into_iter().flatten() {
            if candidate.confidence >= threshold {
                tracing::debug!(
                    format = %candidate.format,
                    confidence = candidate.confidence,
                    "detected input format"
                );
                return candidate;
            }
            if best
                .as_ref()
                .is_none_or(|current| candidate.confidence > current.confidence)
            {
                best = Some(candidate);
            }
        }

        let detected = match best {
            Some(candidate) if candidate.confidence > FREEFORM_CONFIDENCE => candidate,
            _ => DetectedFormat::new(InputFormat::Freeform, FREEFORM_CONFIDENCE),
        };
        tracing::debug!(
            format = %detected.format,
            confidence = detected.confidence,
            "no strong format match, using best candidate"
        );
        detected
    }

    /// Tabs or commas on the first line, consistent (±1) across the sample.
    fn detect_delimited(&self, lines: &[&str], format: InputFormat) -> Option<DetectedFormat> {
        let delimiter = char::from(format.delimiter()?);
        let header = lines.first()?;
        let expected = count_delimiters(header, delimiter);
        if expected == 0 {
            return None;
        }

        let sample = &lines[..lines.len().min(self.options.sample_lines.max(1))];
        let consistent = sample
            .iter()
            .filter(|line| {
                let count = count_delimiters(line, delimiter);
                count > 0 && count.abs_diff(expected) <= 1
            })
            .count();
        let consistency = consistent as f32 / sample.len() as f32;
        let headers = split_delimited_line(header, delimiter);
        Some(DetectedFormat::delimited(format, 0.95 * consistency, headers))
    }
}

/// Detects with default options.
pub fn detect_format(text: &str) -> DetectedFormat {
    FormatDetector::default().detect(text)
}

/// Section headers, subsection headers and test case markers all present.
fn detect_hierarchical(lines: &[&str]) -> Option<DetectedFormat> {
    let (mut sections, mut subsections, mut markers) = (0usize, 0usize, 0usize);
    for line in lines {
        match classify(line, false) {
            LineKind::Section { title, .. }
                if title.chars().next().is_some_and(char::is_uppercase) =>
            {
                sections += 1;
            }
            LineKind::Subsection { .. } => subsections += 1,
            LineKind::CaseMarker { .. } => markers += 1,
            _ => {}
        }
    }
    if sections == 0 || subsections == 0 || markers == 0 {
        return None;
    }
    let density = (sections + subsections + markers) as f32 / lines.len() as f32;
    Some(DetectedFormat::new(
        InputFormat::Hierarchical,
        (0.6 + 0.35 * density).min(HIERARCHICAL_CAP),
    ))
}

/// At least two distinct known `Key: value` labels.
fn detect_structured(lines: &[&str]) -> Option<DetectedFormat> {
    let mut keys = HashSet::new();
    let mut matching = 0usize;
    for line in lines {
        if let Some((key, _)) = known_key_value(line) {
            keys.insert(key);
            matching += 1;
        }
    }
    if keys.len() < 2 {
        return None;
    }
    let fraction = matching as f32 / lines.len() as f32;
    Some(DetectedFormat::new(
        InputFormat::Structured,
        (0.4 + 0.5 * fraction).min(STRUCTURED_CAP),
    ))
}

//! Decompression and inspection tools for snapdec.
//!
//! This crate backs the `snapdec` binary:
//!
//! - Decode a Snappy block to a file or stdout
//! - Explain a block by element kind, size and offset
//!
//! # Design Principles
//!
//! - **Thin shell** - All format logic lives in the `block` crate; this crate only reports.
//! - **Human-readable output** - Make it easy to see what an encoder produced.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use block::{Element, ElementKind, Elements, Limits};
use serde::Serialize;

const KINDS: [ElementKind; 4] = [
    ElementKind::Literal,
    ElementKind::Copy1,
    ElementKind::Copy2,
    ElementKind::Copy4,
];

/// Summary of a single block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockReport {
    pub input_len: usize,
    pub header_len: usize,
    pub uncompressed_len: usize,
    /// Uncompressed bytes per input byte.
    pub ratio: f64,
    pub kinds: Vec<KindSummary>,
    pub longest_copy: Option<usize>,
    pub nearest_offset: Option<usize>,
    pub farthest_offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ElementRecord>>,
}

/// Totals for one element kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindSummary {
    pub kind: &'static str,
    pub count: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

/// One element as it appears in the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementRecord {
    pub kind: &'static str,
    pub input_pos: usize,
    pub input_len: usize,
    pub output_pos: usize,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// Returns the display name for an element kind.
pub const fn kind_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Literal => "literal",
        ElementKind::Copy1 => "copy1",
        ElementKind::Copy2 => "copy2",
        ElementKind::Copy4 => "copy4",
    }
}

/// Walks every element of `bytes` and builds a report.
///
/// The block is fully validated; a malformed block is an error.
pub fn inspect_block(bytes: &[u8], limits: &Limits, with_elements: bool) -> Result<BlockReport> {
    let mut elements = Elements::new(bytes, limits).context("read block header")?;
    let header = elements.header();

    let mut kinds: Vec<KindSummary> = KINDS
        .iter()
        .map(|&kind| KindSummary {
            kind: kind_name(kind),
            count: 0,
            input_bytes: 0,
            output_bytes: 0,
        })
        .collect();
    let mut records = Vec::new();
    let mut longest_copy: Option<usize> = None;
    let mut nearest_offset: Option<usize> = None;
    let mut farthest_offset: Option<usize> = None;

    for span in elements.by_ref() {
        let span = span.context("decode element")?;
        let summary = &mut kinds[span.kind as usize];
        summary.count += 1;
        summary.input_bytes += span.input_len;
        summary.output_bytes += span.element.output_len();

        let offset = match span.element {
            Element::Literal(_) => None,
            Element::Copy { length, offset } => {
                longest_copy = longest_copy.max(Some(length));
                nearest_offset = Some(nearest_offset.map_or(offset, |n| n.min(offset)));
                farthest_offset = farthest_offset.max(Some(offset));
                Some(offset)
            }
        };
        if with_elements {
            records.push(ElementRecord {
                kind: kind_name(span.kind),
                input_pos: span.input_pos,
                input_len: span.input_len,
                output_pos: span.output_pos,
                length: span.element.output_len(),
                offset,
            });
        }
    }
    elements.finish().context("finish block")?;

    Ok(BlockReport {
        input_len: bytes.len(),
        header_len: header.header_len,
        uncompressed_len: header.uncompressed_len,
        ratio: ratio(header.uncompressed_len, bytes.len()),
        kinds,
        longest_copy,
        nearest_offset,
        farthest_offset,
        elements: with_elements.then_some(records),
    })
}

/// Formats a report for terminal output.
pub fn format_report_pretty(report: &BlockReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "input: {} bytes (header {} bytes)",
        report.input_len, report.header_len
    );
    let _ = writeln!(
        out,
        "uncompressed: {} bytes (ratio {:.2})",
        report.uncompressed_len, report.ratio
    );
    let _ = writeln!(out, "elements:");
    for summary in &report.kinds {
        if summary.count == 0 {
            continue;
        }
        let _ = writeln!(
            out,
            "  {}: {} ({} bytes in, {} bytes out)",
            summary.kind, summary.count, summary.input_bytes, summary.output_bytes
        );
    }
    if let Some(longest) = report.longest_copy {
        let _ = writeln!(out, "longest copy: {longest} bytes");
    }
    if let (Some(nearest), Some(farthest)) = (report.nearest_offset, report.farthest_offset) {
        let _ = writeln!(out, "copy offsets: {nearest}..={farthest}");
    }
    if let Some(records) = &report.elements {
        let _ = writeln!(out, "element list:");
        for record in records {
            let _ = write!(
                out,
                "  @{} -> {}: {} len {}",
                record.input_pos, record.output_pos, record.kind, record.length
            );
            if let Some(offset) = record.offset {
                let _ = write!(out, " offset {offset}");
            }
            out.push('\n');
        }
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn ratio(uncompressed: usize, compressed: usize) -> f64 {
    if compressed == 0 {
        return 0.0;
    }
    uncompressed as f64 / compressed as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_block() -> Vec<u8> {
        // "ab" literal, copy-1 offset 2 length 4, copy-2 offset 1 length 3.
        vec![9, 0x04, b'a', b'b', 0x01, 0x02, 0x0A, 0x01, 0x00]
    }

    #[test]
    fn inspect_counts_kinds() {
        let report = inspect_block(&run_block(), &Limits::for_testing(), false).unwrap();
        assert_eq!(report.uncompressed_len, 9);
        assert_eq!(report.header_len, 1);
        assert_eq!(report.input_len, 9);
        assert_eq!(report.kinds[0].count, 1);
        assert_eq!(report.kinds[0].output_bytes, 2);
        assert_eq!(report.kinds[1].count, 1);
        assert_eq!(report.kinds[1].input_bytes, 2);
        assert_eq!(report.kinds[2].count, 1);
        assert_eq!(report.kinds[3].count, 0);
        assert_eq!(report.longest_copy, Some(4));
        assert_eq!(report.nearest_offset, Some(1));
        assert_eq!(report.farthest_offset, Some(2));
        assert!(report.elements.is_none());
    }

    #[test]
    fn inspect_lists_elements() {
        let report = inspect_block(&run_block(), &Limits::for_testing(), true).unwrap();
        let records = report.elements.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].kind, "copy1");
        assert_eq!(records[1].output_pos, 2);
        assert_eq!(records[1].offset, Some(2));
        assert_eq!(records[0].offset, None);
    }

    #[test]
    fn inspect_rejects_malformed_block() {
        let err = inspect_block(&[10, 0x04, b'a', b'b'], &Limits::for_testing(), false).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("size mismatch"), "{msg}");
    }

    #[test]
    fn inspect_empty_block() {
        let report = inspect_block(&[], &Limits::for_testing(), false).unwrap();
        assert_eq!(report.uncompressed_len, 0);
        assert!(report.ratio.abs() < f64::EPSILON);
        assert_eq!(report.longest_copy, None);
    }

    #[test]
    fn pretty_report_mentions_kinds() {
        let report = inspect_block(&run_block(), &Limits::for_testing(), true).unwrap();
        let text = format_report_pretty(&report);
        assert!(text.contains("uncompressed: 9 bytes"));
        assert!(text.contains("copy1: 1"));
        assert!(!text.contains("copy4"));
        assert!(text.contains("offset 2"));
    }

    #[test]
    fn json_report_skips_absent_elements() {
        let report = inspect_block(&run_block(), &Limits::for_testing(), false).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["uncompressed_len"], 9);
        assert!(json.get("elements").is_none());
        assert_eq!(json["kinds"][2]["kind"], "copy2");
    }

    #[test]
    fn inspect_reference_encoder_output() {
        let data = b"snapdec snapdec snapdec snapdec".repeat(8);
        let compressed = snap::raw::Encoder::new().compress_vec(&data).unwrap();
        let report = inspect_block(&compressed, &Limits::default(), false).unwrap();
        assert_eq!(report.uncompressed_len, data.len());
        let produced: usize = report.kinds.iter().map(|kind| kind.output_bytes).sum();
        assert_eq!(produced, data.len());
        assert!(report.ratio > 1.0);
    }
}

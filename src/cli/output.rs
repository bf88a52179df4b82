//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OrthoclusterArgs, OutputFormat};
use crate::distance::EditPath;
use crate::report::{ClusterRow, Histogram};

/// Plain-text rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

/// Result structure for the cluster listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterListing {
    pub words: usize,
    pub clusters: usize,
    pub rows: Vec<ClusterRow>,
}

/// Result structure for edit and diff histograms.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistogramReport {
    pub backend: String,
    pub histogram: Histogram,
}

/// One encoded word.
#[derive(Debug, Serialize, Deserialize)]
pub struct EncodedWord {
    pub word: String,
    pub code: String,
}

/// Result structure for the encode command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EncodingResult {
    pub language: String,
    pub codes: Vec<EncodedWord>,
}

/// Result structure for the distance command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResult {
    pub backend: String,
    pub distance: usize,
    pub path: EditPath,
}

impl HumanOutput for ClusterListing {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let members: Vec<String> = row
                .members
                .iter()
                .map(|member| {
                    let mark = if member.accepted { "*" } else { "" };
                    format!("{}{mark} ({})", member.word, member.count)
                })
                .collect();
            let _ = writeln!(out, "{}\t{}\t{}", row.total, row.code, members.join(", "));
        }
        out
    }
}

impl HumanOutput for HistogramReport {
    /// Most frequent labels first.
    fn render_human(&self) -> String {
        let mut entries: Vec<(&String, &u64)> = self.histogram.iter().collect();
        entries.sort_by(|(la, ca), (lb, cb)| cb.cmp(ca).then_with(|| la.cmp(lb)));

        let mut out = String::new();
        for (label, count) in entries {
            let _ = writeln!(out, "{label}\t{count}");
        }
        out
    }
}

impl HumanOutput for EncodingResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for encoded in &self.codes {
            let _ = writeln!(out, "{}\t{}", encoded.word, encoded.code);
        }
        out
    }
}

impl HumanOutput for DistanceResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Distance ({}): {}", self.backend, self.distance);
        if !self.path.is_empty() {
            let _ = writeln!(out, "Edits: {}", self.path.labels().join(" "));
            let _ = writeln!(out, "Path: {}", self.path.sequence.join(" -> "));
        }
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &OrthoclusterArgs,
) -> crate::error::Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_human(message, result, args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", format_json(result, args.pretty)?);
            Ok(())
        }
    }
}

/// Human-readable text, with a header line above verbosity 1.
pub fn format_human<T: HumanOutput>(message: &str, result: &T, verbosity: u8) -> String {
    let body = result.render_human();
    if verbosity > 1 {
        format!("{message}\n\n{body}")
    } else {
        body
    }
}

pub fn format_json<T: Serialize>(result: &T, pretty: bool) -> crate::error::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RankedWord;

    #[test]
    fn test_cluster_listing_human() {
        let listing = ClusterListing {
            words: 2,
            clusters: 1,
            rows: vec![ClusterRow {
                total: 14,
                code: "c460".to_string(),
                members: vec![
                    RankedWord {
                        word: "color".to_string(),
                        count: 9,
                        accepted: true,
                    },
                    RankedWord {
                        word: "colour".to_string(),
                        count: 5,
                        accepted: false,
                    },
                ],
            }],
        };
        assert_eq!(
            listing.render_human(),
            "14\tc460\tcolor* (9), colour (5)\n"
        );
    }

    #[test]
    fn test_histogram_human_sorted_by_count() {
        let report = HistogramReport {
            backend: "levenshtein".to_string(),
            histogram: Histogram::from([
                ("+u".to_string(), 3),
                ("a/e".to_string(), 1),
                ("-h".to_string(), 3),
            ]),
        };
        assert_eq!(report.render_human(), "+u\t3\n-h\t3\na/e\t1\n");
    }

    #[test]
    fn test_format_human_header() {
        let result = EncodingResult {
            language: "eng".to_string(),
            codes: vec![EncodedWord {
                word: "robert".to_string(),
                code: "r163".to_string(),
            }],
        };
        assert_eq!(format_human("Codes", &result, 1), "robert\tr163\n");
        assert_eq!(format_human("Codes", &result, 2), "Codes\n\nrobert\tr163\n");
    }

    #[test]
    fn test_format_json() {
        let result = EncodingResult {
            language: "eng".to_string(),
            codes: vec![],
        };
        assert_eq!(
            format_json(&result, false).unwrap(),
            r#"{"language":"eng","codes":[]}"#
        );
    }
}

#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use surprise_core::SurpriseError;

use crate::records::Span;

#[derive(Debug, Error, Diagnostic)]
pub enum NetworkError {
    #[error("Malformed line {line}: expected {expected}, found {found} field(s)")]
    #[diagnostic(
        code(surprise::input::malformed_line),
        help("each line holds exactly two whitespace-separated fields; lines starting with '#' are comments")
    )]
    MalformedLine {
        line: usize,
        expected: &'static str,
        found: usize,
        #[label("this line")]
        span: miette::SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },

    #[error("Unknown node '{label}' in partition")]
    #[diagnostic(
        code(surprise::partition::unknown_node),
        help("every node listed in the partition must appear in the network edge list")
    )]
    UnknownNode {
        label: String,
        #[label("not in the network")]
        span: miette::SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },

    #[error("Node '{label}' is assigned to a community more than once")]
    #[diagnostic(code(surprise::partition::duplicate))]
    DuplicateAssignment {
        label: String,
        #[label("second assignment")]
        span: miette::SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },

    #[error("Node '{label}' has no community ({missing} node(s) unassigned)")]
    #[diagnostic(
        code(surprise::partition::missing),
        help("add a `<node> <community>` line for every node of the network")
    )]
    MissingAssignment { label: String, missing: usize },

    #[error("Partition covers {partition_nodes} node(s) but the network has {network_nodes}")]
    #[diagnostic(code(surprise::partition::mismatch))]
    PartitionMismatch {
        network_nodes: usize,
        partition_nodes: usize,
    },

    #[error("Cannot read {}", .path.display())]
    #[diagnostic(
        code(surprise::io),
        help("either the file does not exist or it is not readable text")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(surprise::params))]
    Parameters(#[from] SurpriseError),
}

impl NetworkError {
    pub(crate) fn malformed(
        line: usize,
        expected: &'static str,
        found: usize,
        span: Span,
        source: &str,
        filename: &str,
    ) -> Self {
        NetworkError::MalformedLine {
            line,
            expected,
            found,
            span: span.into(),
            src: miette::NamedSource::new(filename, source.to_owned()),
        }
    }

    pub(crate) fn unknown_node(label: &str, span: Span, source: &str, filename: &str) -> Self {
        NetworkError::UnknownNode {
            label: label.to_owned(),
            span: span.into(),
            src: miette::NamedSource::new(filename, source.to_owned()),
        }
    }

    pub(crate) fn duplicate(label: &str, span: Span, source: &str, filename: &str) -> Self {
        NetworkError::DuplicateAssignment {
            label: label.to_owned(),
            span: span.into(),
            src: miette::NamedSource::new(filename, source.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_line_message_names_line_and_counts() {
        let err = NetworkError::malformed(
            3,
            "two node labels",
            3,
            Span { start: 8, len: 5 },
            "a b\nb c\nc d e\n",
            "net.pairs",
        );
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "{msg}");
        assert!(msg.contains("two node labels"), "{msg}");
        assert!(msg.contains("found 3"), "{msg}");
    }

    #[test]
    fn diagnostic_codes_are_stable() {
        let err = NetworkError::MissingAssignment {
            label: "x".into(),
            missing: 2,
        };
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("surprise::partition::missing"));
    }

    #[test]
    fn parameter_errors_pass_through() {
        let err: NetworkError = surprise_core::SurpriseParams::new(1, 2, 0, 0)
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("Invalid parameters"));
    }
}

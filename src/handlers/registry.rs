use std::collections::HashSet;
use tracing::debug;

use super::types::{FileTypeHandler, HandlerId, ProtocolHandler};
use crate::input::{ClassifiedInput, InputKind};

/// Candidate handlers for a classified input.
///
/// Protocol and file references use the first entry whose token/extension
/// equals the input's (ASCII case-insensitive); later duplicates are never
/// merged in. Indeterminate input falls back to every handler referenced by
/// any protocol entry, deduplicated in configured order. No match yields an
/// empty list.
pub fn match_handlers(
    input: &ClassifiedInput,
    protocols: &[ProtocolHandler],
    file_types: &[FileTypeHandler],
) -> Vec<HandlerId> {
    let candidates = match input.kind {
        InputKind::ProtocolReference => protocols
            .iter()
            .find(|entry| entry.token.eq_ignore_ascii_case(&input.scheme))
            .map(|entry| entry.supporting_handler_ids.clone())
            .unwrap_or_default(),
        InputKind::FileReference => file_types
            .iter()
            .find(|entry| entry.extension.eq_ignore_ascii_case(&input.extension))
            .map(|entry| entry.supporting_handler_ids.clone())
            .unwrap_or_default(),
        InputKind::Indeterminate => all_protocol_handlers(protocols),
    };

    debug!(
        kind = ?input.kind,
        candidates = candidates.len(),
        "Matched handlers"
    );

    candidates
}

fn all_protocol_handlers(protocols: &[ProtocolHandler]) -> Vec<HandlerId> {
    let mut seen = HashSet::new();
    protocols
        .iter()
        .flat_map(|entry| entry.supporting_handler_ids.iter())
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::classify;

    fn ids(values: &[&str]) -> Vec<HandlerId> {
        values.iter().map(|v| HandlerId::from(*v)).collect()
    }

    fn protocols() -> Vec<ProtocolHandler> {
        vec![
            ProtocolHandler::new("http", ["firefox", "chrome"]),
            ProtocolHandler::new("https", ["firefox", "chrome", "edge"]),
            ProtocolHandler::new("mailto", ["thunderbird"]),
        ]
    }

    fn file_types() -> Vec<FileTypeHandler> {
        vec![
            FileTypeHandler::new("pdf", ["acrobat", "firefox"]),
            FileTypeHandler::new("html", ["chrome"]),
        ]
    }

    #[test]
    fn test_match_protocol() {
        let found = match_handlers(&classify("https://example.com"), &protocols(), &file_types());
        assert_eq!(found, ids(&["firefox", "chrome", "edge"]));
    }

    #[test]
    fn test_match_protocol_case_insensitive() {
        let found = match_handlers(&classify("HTTP://example.com"), &protocols(), &file_types());
        assert_eq!(found, ids(&["firefox", "chrome"]));
    }

    #[test]
    fn test_match_file_type() {
        let found = match_handlers(&classify("C:/docs/report.PDF"), &protocols(), &file_types());
        assert_eq!(found, ids(&["acrobat", "firefox"]));
    }

    #[test]
    fn test_unknown_scheme_is_empty() {
        let registry = vec![ProtocolHandler::new("http", ["a"])];
        let found = match_handlers(&classify("ftp://files.example.org"), &registry, &[]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_unknown_extension_is_empty() {
        let found = match_handlers(&classify("notes.txt"), &protocols(), &file_types());
        assert!(found.is_empty());
    }

    #[test]
    fn test_first_entry_wins() {
        let registry = vec![
            ProtocolHandler::new("https", ["first"]),
            ProtocolHandler::new("HTTPS", ["second"]),
        ];
        let found = match_handlers(&classify("https://x"), &registry, &[]);
        assert_eq!(found, ids(&["first"]));
    }

    #[test]
    fn test_indeterminate_returns_union_of_protocol_handlers() {
        let found = match_handlers(&classify("localhost"), &protocols(), &file_types());
        assert_eq!(found, ids(&["firefox", "chrome", "edge", "thunderbird"]));
    }

    #[test]
    fn test_indeterminate_with_empty_registry() {
        assert!(match_handlers(&classify(""), &[], &file_types()).is_empty());
    }
}

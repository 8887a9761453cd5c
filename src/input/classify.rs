use tracing::debug;

use super::types::{ClassifiedInput, DEFAULT_SCHEME, SCHEME_SEPARATOR};

/// Triage a raw string into a protocol reference, a file reference, or
/// neither. First matching rule wins:
///
/// 1. empty input is indeterminate
/// 2. `scheme://rest` is a protocol reference
/// 3. anything with a `.` is a file reference split on the last dot
/// 4. anything else with a `/` and no `.` is a protocol-less web
///    reference (`https`)
/// 5. everything else is indeterminate
///
/// A split that would leave the scheme or extension empty (`://x`, `notes.`)
/// does not count as a match and falls through to the next rule.
///
/// Never fails; malformed input degrades to a best-effort result.
pub fn classify(raw: &str) -> ClassifiedInput {
    if raw.is_empty() {
        return ClassifiedInput::indeterminate(raw);
    }

    let scheme_split = raw
        .split_once(SCHEME_SEPARATOR)
        .filter(|(scheme, _)| !scheme.is_empty());
    let extension_split = raw
        .rsplit_once('.')
        .filter(|(_, extension)| !extension.is_empty());

    let classified = if let Some((scheme, remainder)) = scheme_split {
        ClassifiedInput::protocol(scheme, remainder)
    } else if let Some((remainder, extension)) = extension_split {
        ClassifiedInput::file(remainder, extension)
    } else if raw.contains('/') && !raw.contains('.') {
        ClassifiedInput::protocol(DEFAULT_SCHEME, raw)
    } else {
        ClassifiedInput::indeterminate(raw)
    };

    debug!(
        raw,
        kind = ?classified.kind,
        scheme = %classified.scheme,
        extension = %classified.extension,
        "Classified input"
    );

    classified
}

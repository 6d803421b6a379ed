//! Splits a long answer into size-bounded messages.
//!
//! The body is a list of segments joined by [`JOIN_TOKEN`]. Segments are packed greedily into
//! chunks; a chunk boundary only ever falls on a join token, so a segment is never cut in half.
//! Every emitted chunk starts with the caller's prefix and fits the length limit.

use thiserror::Error;

/// Separator between the segments of one answer.
pub const JOIN_TOKEN: &str = " :: ";

/// The input cannot be split into chunks that fit the limit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("prefix alone exceeds the message limit: {prefix:?}")]
    PrefixTooLong { prefix: String },

    #[error("segment does not fit in one message even alone: {segment:?}")]
    SegmentTooLong { segment: String },
}

/// Paginates `body` so that every `prefix + chunk` is at most `max_length` bytes.
pub fn paginate(
    prefix: &str,
    body: &str,
    max_length: usize,
) -> Result<Vec<String>, PaginationError> {
    paginate_with(prefix, body, |text| text.len() > max_length)
}

/// Paginates `body` using the transport's own length predicate.
///
/// Returns the chunks in body order, each already prefixed. An empty body yields no chunks.
pub fn paginate_with<F>(
    prefix: &str,
    body: &str,
    is_too_long: F,
) -> Result<Vec<String>, PaginationError>
where
    F: Fn(&str) -> bool,
{
    if is_too_long(prefix) {
        return Err(PaginationError::PrefixTooLong {
            prefix: prefix.to_string(),
        });
    }

    let mut chunks = Vec::new();
    let mut pending = String::new();
    let mut segments = body.split(JOIN_TOKEN).peekable();

    while let Some(&segment) = segments.peek() {
        let candidate = if pending.is_empty() {
            segment.to_string()
        } else {
            format!("{pending}{JOIN_TOKEN}{segment}")
        };

        if is_too_long(&format!("{prefix}{candidate}")) {
            if pending.is_empty() {
                return Err(PaginationError::SegmentTooLong {
                    segment: segment.to_string(),
                });
            }
            chunks.push(format!("{prefix}{pending}"));
            pending.clear();
        } else {
            pending = candidate;
            segments.next();
        }
    }

    if !pending.is_empty() {
        chunks.push(format!("{prefix}{pending}"));
    }

    Ok(chunks)
}

use crate::event::Tag;

/// Errors surfaced by the engine.
///
/// Malformed markdown is never an error; it degrades to literal text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("input is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },
    #[error("block nesting exceeds the limit of {limit}")]
    NestingLimitExceeded { limit: usize },
    #[error("unbalanced event stream at event {index}: {reason}")]
    UnbalancedEvents { index: usize, reason: String },
}

impl Error {
    pub(crate) fn unexpected_end(index: usize, found: Tag, expected: Option<Tag>) -> Self {
        let reason = match expected {
            Some(open) => format!("End({found:?}) closes Start({open:?})"),
            None => format!("End({found:?}) without a matching Start"),
        };
        Error::UnbalancedEvents { index, reason }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Error::InvalidEncoding {
            valid_up_to: e.valid_up_to(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_error_keeps_offset() {
        let bytes = [b'o', b'k', 0xff];
        let err: Error = std::str::from_utf8(&bytes).unwrap_err().into();
        assert_eq!(err, Error::InvalidEncoding { valid_up_to: 2 });
    }

    #[test]
    fn unbalanced_message_names_both_tags() {
        let err = Error::unexpected_end(3, Tag::Strong, Some(Tag::Emphasis));
        assert_eq!(
            err.to_string(),
            "unbalanced event stream at event 3: End(Strong) closes Start(Emphasis)"
        );
    }
}

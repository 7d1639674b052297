//! Classification of a single received chunk.
//!
//! Each chunk is classified on its own, with no buffering between reads. A
//! line or negotiation unit split across two reads is therefore misread; that
//! is accepted behaviour, not something to paper over here.

use telnet_negotiation::{NegotiationRun, parse_run, starts_with_iac};

/// The only command the session understands
pub const EXIT_COMMAND: &[u8] = b"exit\r\n";

/// What a session should do with a chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkAction<'a> {
    /// Chunk was exactly the exit command
    Exit,
    /// Chunk opened with IAC; nothing is echoed
    Negotiate(NegotiationRun),
    /// Anything else is echoed back verbatim
    Echo(&'a [u8]),
}

/// Classify a chunk, in priority order: exit, negotiation run, echo
pub fn classify(chunk: &[u8]) -> ChunkAction<'_> {
    if chunk == EXIT_COMMAND {
        ChunkAction::Exit
    } else if starts_with_iac(chunk) {
        ChunkAction::Negotiate(parse_run(chunk))
    } else {
        ChunkAction::Echo(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telnet_negotiation::Negotiation;

    #[test]
    fn test_exact_exit() {
        assert_eq!(classify(b"exit\r\n"), ChunkAction::Exit);
    }

    #[test]
    fn test_exit_variants_are_echoed() {
        let samples: [&[u8]; 6] = [
            b"exit\n",
            b"EXIT\r\n",
            b"exit",
            b" exit\r\n",
            b"exit\r\n\r\n",
            b"exit\r\nmore",
        ];
        for chunk in samples {
            assert_eq!(classify(chunk), ChunkAction::Echo(chunk), "{chunk:?}");
        }
    }

    #[test]
    fn test_single_negotiation() {
        match classify(&[255, 251, 42]) {
            ChunkAction::Negotiate(run) => {
                assert_eq!(run.negotiations, vec![Negotiation::will(42)]);
                assert_eq!(run.discarded, 0);
            }
            other => panic!("expected negotiation, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_garbage_is_not_echoed() {
        match classify(&[255, 251, 5, 9]) {
            ChunkAction::Negotiate(run) => {
                assert_eq!(run.negotiations, vec![Negotiation::will(5)]);
                assert_eq!(run.discarded, 1);
            }
            other => panic!("expected negotiation, got {other:?}"),
        }
    }

    #[test]
    fn test_lone_iac_is_a_negotiation_chunk() {
        match classify(&[255]) {
            ChunkAction::Negotiate(run) => assert!(run.is_empty()),
            other => panic!("expected negotiation, got {other:?}"),
        }
    }

    #[test]
    fn test_iac_after_text_is_echoed() {
        let chunk = [b'h', b'i', 255, 251, 1];
        assert_eq!(classify(&chunk), ChunkAction::Echo(&chunk));
    }

    #[test]
    fn test_plain_bytes_are_echoed_untouched() {
        let samples: [&[u8]; 4] = [b"hello\r\n", b"", &[0, 1, 2, 254], "héllo\n".as_bytes()];
        for chunk in samples {
            assert_eq!(classify(chunk), ChunkAction::Echo(chunk));
        }
    }
}

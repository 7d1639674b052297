//! # Negotiation Run Parser
//!
//! Splits one received chunk into consecutive `IAC <verb> <option>` units
//! (RFC 854, Section 4).
//!
//! ## Chunk Scope
//! The parser keeps no state between calls. A unit split across two reads is
//! not reassembled: the partial tail of the first chunk is discarded and the
//! second chunk is parsed on its own.
//!
//! ## Stopping Rule
//! Parsing stops at the first position that does not hold a complete unit:
//! fewer than three bytes left, a byte other than IAC, or a command byte other
//! than WILL/WONT/DO/DONT. Everything from that position on is discarded.

use crate::protocol::{IAC, Negotiation, NegotiationVerb};

/// Result of parsing a negotiation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiationRun {
    /// Units found, in wire order
    pub negotiations: Vec<Negotiation>,
    /// Trailing bytes that did not form a complete unit
    pub discarded: usize,
}

impl NegotiationRun {
    pub fn is_empty(&self) -> bool {
        self.negotiations.is_empty()
    }
}

/// True when the chunk opens with the escape marker
pub fn starts_with_iac(chunk: &[u8]) -> bool {
    chunk.first() == Some(&IAC)
}

/// Parse a chunk as a run of negotiation units
///
/// # Example
/// ```rust
/// use telnet_negotiation::parser::parse_run;
/// use telnet_negotiation::protocol::Negotiation;
///
/// // IAC DO ECHO, IAC DONT SGA, then a stray byte
/// let run = parse_run(&[255, 253, 1, 255, 254, 3, 9]);
///
/// assert_eq!(run.negotiations, vec![Negotiation::do_(1), Negotiation::dont(3)]);
/// assert_eq!(run.discarded, 1);
/// ```
pub fn parse_run(chunk: &[u8]) -> NegotiationRun {
    let mut negotiations = Vec::new();
    let mut rest = chunk;

    while let [IAC, verb, option, tail @ ..] = rest {
        let Some(verb) = NegotiationVerb::from_byte(*verb) else {
            break;
        };
        negotiations.push(Negotiation::new(verb, *option));
        rest = tail;
    }

    NegotiationRun {
        negotiations,
        discarded: rest.len(),
    }
}

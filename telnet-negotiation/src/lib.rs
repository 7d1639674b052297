//! # Telnet Negotiation Library
//!
//! Framing for Telnet option negotiation as defined in:
//! - RFC 854: Telnet Protocol Specification (https://tools.ietf.org/html/rfc854)
//! - RFC 855: Telnet Option Specifications
//!
//! The library only *recognises* negotiation units. It keeps no option state
//! and never answers a request, which is all an echo service needs:
//! - `protocol`: IAC, the four negotiation verbs and well-known option codes
//! - `parser`: splits a received chunk into a run of `IAC <verb> <option>` units

pub mod parser;
pub mod protocol;

pub use parser::{NegotiationRun, parse_run, starts_with_iac};
pub use protocol::{IAC, Negotiation, NegotiationVerb, option_name};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

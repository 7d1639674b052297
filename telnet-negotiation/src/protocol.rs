//! # Telnet Protocol Constants and Types
//!
//! This module implements the negotiation framing of:
//! - **RFC 854**: Telnet Protocol Specification
//! - **RFC 855**: Telnet Option Specifications
//!
//! ## Key Concepts from RFC 854:
//!
//! ### IAC (Interpret As Command) - Byte 255
//! The IAC byte (255/0xFF) signals that the following bytes should be interpreted
//! as Telnet commands rather than data.
//!
//! ### Negotiation Structure
//! Option negotiation always takes exactly three bytes: `IAC <verb> <option>`
//! where the verb is one of WILL, WONT, DO or DONT.

use std::fmt;

/// IAC - Interpret As Command (RFC 854, Section 4)
///
/// The IAC byte (255/0xFF) indicates that the next byte(s) should be interpreted
/// as a Telnet command sequence rather than regular data.
pub const IAC: u8 = 255;

/// The four option negotiation verbs (RFC 854, Section 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NegotiationVerb {
    /// Sender wants to enable (or confirms it has enabled) an option on its side
    Will = 251,
    /// Sender refuses to enable, or wants to disable, an option on its side
    Wont = 252,
    /// Sender asks the receiver to enable an option
    Do = 253,
    /// Sender asks the receiver to disable an option
    Dont = 254,
}

impl NegotiationVerb {
    /// Convert a byte to a verb if it is one of 251..=254
    ///
    /// # Example
    /// ```
    /// use telnet_negotiation::protocol::NegotiationVerb;
    ///
    /// assert_eq!(NegotiationVerb::from_byte(251), Some(NegotiationVerb::Will));
    /// assert_eq!(NegotiationVerb::from_byte(241), None);
    /// ```
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            251 => Some(NegotiationVerb::Will),
            252 => Some(NegotiationVerb::Wont),
            253 => Some(NegotiationVerb::Do),
            254 => Some(NegotiationVerb::Dont),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Wire name as written in the RFCs
    pub fn as_str(self) -> &'static str {
        match self {
            NegotiationVerb::Will => "WILL",
            NegotiationVerb::Wont => "WONT",
            NegotiationVerb::Do => "DO",
            NegotiationVerb::Dont => "DONT",
        }
    }
}

impl fmt::Display for NegotiationVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known option codes (RFC assignments and common MUD extensions)
///
/// Any byte is a legal option code on the wire; these are only the ones
/// worth naming in log output.
pub mod option {
    pub const BINARY: u8 = 0;
    pub const ECHO: u8 = 1;
    pub const SUPPRESS_GO_AHEAD: u8 = 3;
    pub const STATUS: u8 = 5;
    pub const TIMING_MARK: u8 = 6;
    pub const TERMINAL_TYPE: u8 = 24;
    pub const END_OF_RECORD: u8 = 25;
    pub const NAWS: u8 = 31;
    pub const TERMINAL_SPEED: u8 = 32;
    pub const TOGGLE_FLOW_CONTROL: u8 = 33;
    pub const LINEMODE: u8 = 34;
    pub const X_DISPLAY_LOCATION: u8 = 35;
    pub const OLD_ENVIRON: u8 = 36;
    pub const AUTHENTICATION: u8 = 37;
    pub const ENCRYPT: u8 = 38;
    pub const NEW_ENVIRON: u8 = 39;
    pub const MSDP: u8 = 69;
    pub const MSSP: u8 = 70;
    pub const MCCP2: u8 = 86;
    pub const GMCP: u8 = 201;
}

/// Human-readable name for an option code, if it is a well-known one
pub fn option_name(code: u8) -> Option<&'static str> {
    let name = match code {
        option::BINARY => "BINARY",
        option::ECHO => "ECHO",
        option::SUPPRESS_GO_AHEAD => "SUPPRESS_GO_AHEAD",
        option::STATUS => "STATUS",
        option::TIMING_MARK => "TIMING_MARK",
        option::TERMINAL_TYPE => "TERMINAL_TYPE",
        option::END_OF_RECORD => "END_OF_RECORD",
        option::NAWS => "NAWS",
        option::TERMINAL_SPEED => "TERMINAL_SPEED",
        option::TOGGLE_FLOW_CONTROL => "TOGGLE_FLOW_CONTROL",
        option::LINEMODE => "LINEMODE",
        option::X_DISPLAY_LOCATION => "X_DISPLAY_LOCATION",
        option::OLD_ENVIRON => "OLD_ENVIRON",
        option::AUTHENTICATION => "AUTHENTICATION",
        option::ENCRYPT => "ENCRYPT",
        option::NEW_ENVIRON => "NEW_ENVIRON",
        option::MSDP => "MSDP",
        option::MSSP => "MSSP",
        option::MCCP2 => "MCCP2",
        option::GMCP => "GMCP",
        _ => return None,
    };
    Some(name)
}

/// A single `IAC <verb> <option>` negotiation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Negotiation {
    pub verb: NegotiationVerb,
    pub option: u8,
}

impl Negotiation {
    pub fn new(verb: NegotiationVerb, option: u8) -> Self {
        Self { verb, option }
    }

    pub fn will(option: u8) -> Self {
        Self::new(NegotiationVerb::Will, option)
    }

    pub fn wont(option: u8) -> Self {
        Self::new(NegotiationVerb::Wont, option)
    }

    pub fn do_(option: u8) -> Self {
        Self::new(NegotiationVerb::Do, option)
    }

    pub fn dont(option: u8) -> Self {
        Self::new(NegotiationVerb::Dont, option)
    }

    /// Serialize this unit for transmission
    pub fn to_bytes(self) -> [u8; 3] {
        [IAC, self.verb.to_byte(), self.option]
    }
}

impl fmt::Display for Negotiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match option_name(self.option) {
            Some(name) => write!(f, "{} {} ({})", self.verb, name, self.option),
            None => write!(f, "{} {}", self.verb, self.option),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iac_constant() {
        assert_eq!(IAC, 255);
        assert_eq!(IAC, 0xFF);
    }

    #[test]
    fn test_verb_byte_conversion() {
        assert_eq!(NegotiationVerb::from_byte(251), Some(NegotiationVerb::Will));
        assert_eq!(NegotiationVerb::from_byte(252), Some(NegotiationVerb::Wont));
        assert_eq!(NegotiationVerb::from_byte(253), Some(NegotiationVerb::Do));
        assert_eq!(NegotiationVerb::from_byte(254), Some(NegotiationVerb::Dont));
        assert_eq!(NegotiationVerb::from_byte(250), None);
        assert_eq!(NegotiationVerb::from_byte(255), None);

        assert_eq!(NegotiationVerb::Will.to_byte(), 251);
        assert_eq!(NegotiationVerb::Dont.to_byte(), 254);
    }

    #[test]
    fn test_option_names() {
        assert_eq!(option_name(1), Some("ECHO"));
        assert_eq!(option_name(3), Some("SUPPRESS_GO_AHEAD"));
        assert_eq!(option_name(31), Some("NAWS"));
        assert_eq!(option_name(42), None);
    }

    #[test]
    fn test_negotiation_serialization() {
        assert_eq!(Negotiation::wont(option::SUPPRESS_GO_AHEAD).to_bytes(), [255, 252, 3]);
        assert_eq!(Negotiation::wont(option::ECHO).to_bytes(), [255, 252, 1]);
        assert_eq!(Negotiation::do_(option::NAWS).to_bytes(), [255, 253, 31]);
    }

    #[test]
    fn test_negotiation_display() {
        assert_eq!(Negotiation::will(1).to_string(), "WILL ECHO (1)");
        assert_eq!(Negotiation::dont(42).to_string(), "DONT 42");
    }
}

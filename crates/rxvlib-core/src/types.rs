//! Core types used throughout rxvlib.
//!
//! Report frames from the RX-V1600 carry two pieces of metadata besides the
//! report identifier and value: which control path caused the change
//! ([`Origin`]) and whether the function is currently locked against remote
//! control ([`Guard`]).

use std::fmt;

/// Reserved raw value meaning "never observed / not decodable".
pub const UNKNOWN_VALUE: u8 = 0xFF;

/// Control path that produced a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A command received on the RS-232C port.
    Rs232c,
    /// An infrared remote control command.
    Ir,
    /// A front panel key.
    Panel,
    /// An internal system event (power-up, protection, timer).
    System,
    /// The front panel rotary encoder.
    Encoder,
}

impl Origin {
    /// Decode the ASCII origin digit (`'0'`..=`'4'`) of a report frame.
    pub fn from_digit(digit: u8) -> Option<Origin> {
        match digit {
            b'0' => Some(Origin::Rs232c),
            b'1' => Some(Origin::Ir),
            b'2' => Some(Origin::Panel),
            b'3' => Some(Origin::System),
            b'4' => Some(Origin::Encoder),
            _ => None,
        }
    }

    /// Numeric code as sent on the wire.
    pub fn code(&self) -> u8 {
        match self {
            Origin::Rs232c => 0,
            Origin::Ir => 1,
            Origin::Panel => 2,
            Origin::System => 3,
            Origin::Encoder => 4,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Origin::Rs232c => "RS232C",
            Origin::Ir => "IR",
            Origin::Panel => "Panel",
            Origin::System => "System",
            Origin::Encoder => "Encoder",
        };
        write!(f, "{s}")
    }
}

/// Protection state of a reported function.
///
/// A guarded report means the receiver currently refuses remote changes to
/// that function; integration layers may suppress commands for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Not protected.
    None,
    /// Protected by the system (e.g. during power transitions).
    System,
    /// Protected by the receiver's settings (memory guard).
    Settings,
}

impl Guard {
    /// Decode the ASCII guard digit (`'0'`..=`'2'`) of a report frame.
    pub fn from_digit(digit: u8) -> Option<Guard> {
        match digit {
            b'0' => Some(Guard::None),
            b'1' => Some(Guard::System),
            b'2' => Some(Guard::Settings),
            _ => None,
        }
    }

    /// Numeric code as sent on the wire.
    pub fn code(&self) -> u8 {
        match self {
            Guard::None => 0,
            Guard::System => 1,
            Guard::Settings => 2,
        }
    }

    /// Whether remote changes are currently refused.
    pub fn is_guarded(&self) -> bool {
        !matches!(self, Guard::None)
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Guard::None => "None",
            Guard::System => "System",
            Guard::Settings => "Settings",
        };
        write!(f, "{s}")
    }
}

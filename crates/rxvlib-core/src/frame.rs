//! Frame marker bytes of the RX-V1600 serial protocol.
//!
//! Every frame starts with one of [`STX`], [`DC1`], [`DC2`] or [`DC3`] and
//! ends with [`ETX`]. The link layer only looks at these markers; the codec
//! uses them to pick a decoder.

/// Start of a command / report frame.
pub const STX: u8 = 0x02;
/// Frame terminator.
pub const ETX: u8 = 0x03;
/// Start of a ready command or display text frame.
pub const DC1: u8 = 0x11;
/// Start of a configuration dump frame.
pub const DC2: u8 = 0x12;
/// Start of a reset-to-defaults command.
pub const DC3: u8 = 0x13;
/// Filler byte of the reset-to-defaults command.
pub const DEL: u8 = 0x7F;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_markers_are_distinct_from_terminator() {
        let starts = [STX, DC1, DC2, DC3];
        assert!(!starts.contains(&ETX));
        assert!(!starts.contains(&DEL));
        for (i, a) in starts.iter().enumerate() {
            assert!(starts[i + 1..].iter().all(|b| b != a));
        }
    }
}

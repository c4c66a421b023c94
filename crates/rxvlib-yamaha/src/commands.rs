//! RX-V1600 command tables and command rendering.
//!
//! Commands are looked up by symbolic name and returned as the exact bytes
//! to put on the wire. Names match case-sensitively: `"MainVolume_Up"` is a
//! command, `"mainvolume_up"` is not.
//!
//! Two kinds of command exist:
//!
//! - **Fixed commands** ([`COMMANDS`]) -- a literal frame per name. Operation
//!   commands use the IR remote codes (`STX "07" code ETX`), system commands
//!   use `STX "2" ...`.
//! - **Value commands** ([`FORMATS`]) -- an absolute-set frame with one byte
//!   rendered as two uppercase hex digits, e.g. `MainVolumeSet` with `0xC7`
//!   renders `STX "230C7" ETX`.

use std::collections::HashMap;
use std::sync::LazyLock;

use bytes::{BufMut, BytesMut};

use rxvlib_core::frame::{ETX, STX};

/// Longest command frame the receiver accepts.
pub const MAX_COMMAND_LEN: usize = 7;

// ---------------------------------------------------------------
// Fixed commands
// ---------------------------------------------------------------

/// Every fixed command as `(name, frame)`.
pub static COMMANDS: &[(&str, &[u8])] = &[
    // Handshake and configuration request
    ("Ready", b"\x11000\x03"),

    // Factory reset
    ("ResetConfig", b"\x13\x7F\x7F\x7F\x03"),

    // Operation commands (same codes as the IR remote)
    ("MainVolume_Up", b"\x0207A1A\x03"),
    ("MainVolume_Down", b"\x0207A1B\x03"),

    ("Mute_On", b"\x0207EA2\x03"),
    ("Mute_20dB", b"\x0207EDF\x03"),
    ("Mute_Off", b"\x0207EA3\x03"),

    ("Input_Phono", b"\x0207A14\x03"),
    ("Input_Cd", b"\x0207A15\x03"),
    ("Input_Tuner", b"\x0207A16\x03"),
    ("Input_CD-R", b"\x0207A19\x03"),
    ("Input_MD-Tape", b"\x0207A18\x03"),
    ("Input_Dvd", b"\x0207AC1\x03"),
    ("Input_Dtv", b"\x0207A54\x03"),
    ("Input_Cbl-Sat", b"\x0207AC0\x03"),
    ("Input_Vcr1", b"\x0207A0F\x03"),
    ("Input_Dvr-Vcr2", b"\x0207A13\x03"),
    ("Input_V-Aux", b"\x0207A55\x03"),

    // Zone 2
    ("Zone2Volume_Up", b"\x0207ADA\x03"),
    ("Zone2Volume_Down", b"\x0207ADB\x03"),

    ("Zone2Mute_On", b"\x0207EA0\x03"),
    ("Zone2Mute_Off", b"\x0207EA1\x03"),

    ("Zone2Input_Phono", b"\x0207AD0\x03"),
    ("Zone2Input_Cd", b"\x0207AD1\x03"),
    ("Zone2Input_Tuner", b"\x0207AD2\x03"),
    ("Zone2Input_CD-R", b"\x0207AD4\x03"),
    ("Zone2Input_MD-Tape", b"\x0207AD3\x03"),
    ("Zone2Input_Dvd", b"\x0207ACD\x03"),
    ("Zone2Input_Dtv", b"\x0207AD9\x03"),
    ("Zone2Input_Cbl-Sat", b"\x0207ACC\x03"),
    ("Zone2Input_Vcr1", b"\x0207AD6\x03"),
    ("Zone2Input_Dvr-Vcr2", b"\x0207AD7\x03"),
    ("Zone2Input_V-Aux", b"\x0207AD8\x03"),

    // Power
    ("AllZonePower_On", b"\x0207A1D\x03"),
    ("AllZonePower_Off", b"\x0207A1E\x03"),

    ("MainZonePower_On", b"\x0207E7E\x03"),
    ("MainZonePower_Off", b"\x0207E7F\x03"),

    ("Zone2ZonePower_On", b"\x0207EBA\x03"),
    ("Zone2ZonePower_Off", b"\x0207EBB\x03"),

    ("Zone3ZonePower_On", b"\x0207AED\x03"),
    ("Zone3ZonePower_Off", b"\x0207AEE\x03"),

    // Zone 3
    ("Zone3Mute_On", b"\x0207E26\x03"),
    ("Zone3Mute_Off", b"\x0207E66\x03"),

    ("Zone3Volume_Up", b"\x0207AFD\x03"),
    ("Zone3Volume_Down", b"\x0207AFE\x03"),

    ("Zone3Input_Phono", b"\x0207AF1\x03"),
    ("Zone3Input_Cd", b"\x0207AF2\x03"),
    ("Zone3Input_Tuner", b"\x0207AF3\x03"),
    ("Zone3Input_CD-R", b"\x0207AF5\x03"),
    ("Zone3Input_MD-Tape", b"\x0207AF4\x03"),
    ("Zone3Input_Dvd", b"\x0207AFC\x03"),
    ("Zone3Input_Dtv", b"\x0207AF6\x03"),
    ("Zone3Input_Cbl-Sat", b"\x0207AF7\x03"),
    ("Zone3Input_Vcr1", b"\x0207AF9\x03"),
    ("Zone3Input_Dvr-Vcr2", b"\x0207AFA\x03"),
    ("Zone3Input_V-Aux", b"\x0207AF0\x03"),

    // Sound field
    ("NightListening_Off", b"\x0207E9C\x03"),
    ("NightListening_Cinema", b"\x0207E9B\x03"),
    ("NightListening_Music", b"\x0207ECF\x03"),

    ("Effect", b"\x0207E27\x03"),
    ("Straight", b"\x0207EE0\x03"),

    ("DSP_Vienna", b"\x0207EE5\x03"),
    ("DSP_TheBottomLine", b"\x0207EEC\x03"),
    ("DSP_TheRoxyTheatre", b"\x0207EED\x03"),
    ("DSP_Disco", b"\x0207EF0\x03"),
    ("DSP_Game", b"\x0207EF2\x03"),
    ("DSP_7chStereo", b"\x0207EFF\x03"),
    ("DSP_2chStereo", b"\x0207EC0\x03"),
    ("DSP_Pop-Rock", b"\x0207EF3\x03"),
    ("DSP_MonoMovie", b"\x0207EF7\x03"),
    ("DSP_TvSports", b"\x0207EF8\x03"),
    ("DSP_Spectacle", b"\x0207EF9\x03"),
    ("DSP_SciFi", b"\x0207EFA\x03"),
    ("DSP_Adventure", b"\x0207EFB\x03"),
    ("DSP_General", b"\x0207EFC\x03"),
    ("DSP_Standard", b"\x0207EFD\x03"),
    ("DSP_Enhanced", b"\x0207EFE\x03"),
    ("DSP_ThxCinema", b"\x0207EC2\x03"),
    ("DSP_ThxMusic", b"\x0207EC3\x03"),
    ("DSP_ThxGame", b"\x0207EC8\x03"),

    // Speakers
    ("SpeakerRelayA_On", b"\x0207EAB\x03"),
    ("SpeakerRelayA_Off", b"\x0207EAC\x03"),

    ("SpeakerRelayB_On", b"\x0207EAD\x03"),
    ("SpeakerRelayB_Off", b"\x0207EAE\x03"),

    // 2ch decoder
    ("2ChDecoder_PliixMovie", b"\x0207E67\x03"),
    ("2ChDecoder_PliixMusic", b"\x0207E68\x03"),
    ("2ChDecoder_Neo6Cinema", b"\x0207E69\x03"),
    ("2ChDecoder_Neo6Music", b"\x0207E6A\x03"),
    ("2ChDecoder_PliixGame", b"\x0207EC7\x03"),
    ("2ChDecoder_ProLogic", b"\x0207EC9\x03"),

    // Zone tone
    ("Zone2Tone_BassUp", b"\x0207A73\x03"),
    ("Zone2Tone_BassDown", b"\x0207A74\x03"),
    ("Zone2Tone_TrebleUp", b"\x0207A75\x03"),
    ("Zone2Tone_TrebleDown", b"\x0207A76\x03"),

    ("Zone3Tone_BassUp", b"\x0207A77\x03"),
    ("Zone3Tone_BassDown", b"\x0207A78\x03"),
    ("Zone3Tone_TrebleUp", b"\x0207A79\x03"),
    ("Zone3Tone_TrebleDown", b"\x0207A7A\x03"),

    // System commands
    ("ReportCommandCode_Enable", b"\x0220000\x03"),
    ("ReportCommandCode_Disable", b"\x0220001\x03"),

    ("ReportCommandDelay_0", b"\x0220100\x03"),
    ("ReportCommandDelay_50", b"\x0220101\x03"),
    ("ReportCommandDelay_100", b"\x0220102\x03"),
    ("ReportCommandDelay_150", b"\x0220103\x03"),
    ("ReportCommandDelay_200", b"\x0220104\x03"),
    ("ReportCommandDelay_250", b"\x0220105\x03"),
    ("ReportCommandDelay_300", b"\x0220106\x03"),
    ("ReportCommandDelay_350", b"\x0220107\x03"),
    ("ReportCommandDelay_400", b"\x0220108\x03"),

    ("OsdMessageStart", b"\x0221000\x03"),
    ("TuningFrequencyText", b"\x0222000\x03"),
    ("MainVolumeText", b"\x0222001\x03"),
    ("Zone2VolumeText", b"\x0222002\x03"),
    ("MainInputText", b"\x0222003\x03"),
    ("Zone2InputText", b"\x0222004\x03"),
    ("Zone3VolumeText", b"\x0222005\x03"),
    ("Zone3InputText", b"\x0222006\x03"),
    ("FirmwareVersion", b"\x0222F00\x03"),

    ("Dimmer_4", b"\x0222610\x03"),
    ("Dimmer_3", b"\x0222611\x03"),
    ("Dimmer_2", b"\x0222612\x03"),
    ("Dimmer_1", b"\x0222613\x03"),
    ("Dimmer_Off", b"\x0222614\x03"),

    ("MultiChannel_6Ch", b"\x0227B00\x03"),
    ("MultiChannel_8ChTuner", b"\x0227B01\x03"),
    ("MultiChannel_8ChCd", b"\x0227B02\x03"),
    ("MultiChannel_8ChCd-R", b"\x0227B03\x03"),
    ("MultiChannel_8ChMd-Tape", b"\x0227B04\x03"),
    ("MultiChannel_8ChDvd", b"\x0227B05\x03"),
    ("MultiChannel_8ChDtv", b"\x0227B06\x03"),
    ("MultiChannel_8ChCblSat", b"\x0227B07\x03"),
    ("MultiChannel_8ChVcr1", b"\x0227B09\x03"),
    ("MultiChannel_8ChDvr-Vcr2", b"\x0227B0A\x03"),
    ("MultiChannel_8ChV-Aux", b"\x0227B0C\x03"),

    ("NightMode_Off", b"\x0228B00\x03"),
    ("NightMode_CinemaLow", b"\x0228B10\x03"),
    ("NightMode_CinemaMid", b"\x0228B11\x03"),
    ("NightMode_CinemaHigh", b"\x0228B12\x03"),
    ("NightMode_MusicLow", b"\x0228B20\x03"),
    ("NightMode_MusicMid", b"\x0228B21\x03"),
    ("NightMode_MusicHigh", b"\x0228B22\x03"),

    ("WakeOnRs232C_Off", b"\x022BD00\x03"),
    ("WakeOnRs232C_On", b"\x022BD01\x03"),
];

// ---------------------------------------------------------------
// Value commands
// ---------------------------------------------------------------

/// Template for an absolute-set command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Frame start marker.
    pub marker: u8,
    /// Fixed code between the marker and the value digits.
    pub prefix: &'static str,
}

/// Every value command as `(name, template)`.
pub static FORMATS: &[(&str, Format)] = &[
    ("MainVolumeSet", Format { marker: STX, prefix: "230" }),
    ("Zone2VolumeSet", Format { marker: STX, prefix: "231" }),
    ("Zone3VolumeSet", Format { marker: STX, prefix: "234" }),
];

static COMMAND_INDEX: LazyLock<HashMap<&'static str, &'static [u8]>> =
    LazyLock::new(|| COMMANDS.iter().copied().collect());

static FORMAT_INDEX: LazyLock<HashMap<&'static str, Format>> =
    LazyLock::new(|| FORMATS.iter().copied().collect());

// ---------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------

/// Look up the frame for a fixed command.
///
/// ```
/// use rxvlib_yamaha::commands::command;
///
/// assert_eq!(command("MainVolume_Up"), Some(&b"\x0207A1A\x03"[..]));
/// assert_eq!(command("mainvolume_up"), None);
/// ```
pub fn command(name: &str) -> Option<&'static [u8]> {
    COMMAND_INDEX.get(name).copied()
}

/// Render a value command with `value` as two uppercase hex digits.
///
/// Returns `None` for an unknown name, or if the rendered frame would
/// exceed [`MAX_COMMAND_LEN`].
pub fn command_value(name: &str, value: u8) -> Option<Vec<u8>> {
    let format = FORMAT_INDEX.get(name)?;
    let digits = format!("{value:02X}");

    let len = 1 + format.prefix.len() + digits.len() + 1;
    if len > MAX_COMMAND_LEN {
        return None;
    }

    let mut buf = BytesMut::with_capacity(len);
    buf.put_u8(format.marker);
    buf.put_slice(format.prefix.as_bytes());
    buf.put_slice(digits.as_bytes());
    buf.put_u8(ETX);
    Some(buf.to_vec())
}

/// Names of all fixed commands, in table order.
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _)| *name)
}

/// Names of all value commands, in table order.
pub fn format_names() -> impl Iterator<Item = &'static str> {
    FORMATS.iter().map(|(name, _)| *name)
}

/// Whether `word` is one of the integration control words (`help`,
/// `reset`) rather than a receiver command.
///
/// Control words match case-insensitively. They are never looked up by
/// [`command`].
pub fn is_control_word(word: &str) -> bool {
    word.eq_ignore_ascii_case("help") || word.eq_ignore_ascii_case("reset")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_command_is_a_framed_sequence() {
        for (name, frame) in COMMANDS {
            assert!(!frame.is_empty(), "{name} is empty");
            assert!(
                matches!(frame[0], 0x02 | 0x11 | 0x13),
                "{name} starts with {:#04x}",
                frame[0]
            );
            assert_eq!(frame.last(), Some(&ETX), "{name} is unterminated");
            assert!(frame.len() <= MAX_COMMAND_LEN, "{name} is too long");
            assert_eq!(command(name), Some(*frame));
        }
    }

    #[test]
    fn command_names_are_unique() {
        let names: HashSet<_> = command_names().collect();
        assert_eq!(names.len(), COMMANDS.len());
        assert_eq!(COMMAND_INDEX.len(), COMMANDS.len());
    }

    #[test]
    fn special_frames() {
        assert_eq!(command("Ready"), Some(&b"\x11000\x03"[..]));
        assert_eq!(
            command("ResetConfig"),
            Some(&[0x13, 0x7F, 0x7F, 0x7F, 0x03][..])
        );
        assert_eq!(command("Mute_20dB"), Some(&b"\x0207EDF\x03"[..]));
        assert_eq!(command("WakeOnRs232C_On"), Some(&b"\x022BD01\x03"[..]));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(command("Ready").is_some());
        assert!(command("ready").is_none());
        assert!(command("READY").is_none());
        assert!(command("").is_none());
        assert!(command("Ready ").is_none());
    }

    #[test]
    fn value_command_renders_every_byte() {
        for v in 0..=u8::MAX {
            let cmd = command_value("MainVolumeSet", v).unwrap();
            assert_eq!(cmd.len(), MAX_COMMAND_LEN);
            assert_eq!(cmd[0], 0x02);
            assert_eq!(&cmd[1..4], b"230");
            assert_eq!(&cmd[4..6], format!("{v:02X}").as_bytes());
            assert_eq!(cmd[6], ETX);
        }
    }

    #[test]
    fn zone_value_commands() {
        assert_eq!(
            command_value("Zone2VolumeSet", 0x0A).unwrap(),
            b"\x022310A\x03"
        );
        assert_eq!(
            command_value("Zone3VolumeSet", 0xFF).unwrap(),
            b"\x02234FF\x03"
        );
    }

    #[test]
    fn unknown_value_command() {
        assert!(command_value("MainVolume_Up", 1).is_none());
        assert!(command_value("mainvolumeset", 1).is_none());
        assert_eq!(format_names().count(), 3);
    }

    #[test]
    fn control_words() {
        assert!(is_control_word("help"));
        assert!(is_control_word("HELP"));
        assert!(is_control_word("Reset"));
        assert!(!is_control_word("ResetConfig"));
        assert!(!is_control_word("Ready"));
        assert!(command("help").is_none());
    }
}

//! RX-V1600 response frame decoders.
//!
//! The receiver answers with three frame shapes, distinguished by their
//! start marker:
//!
//! ```text
//! STX o g I I V V ETX                      report (8 bytes)
//! DC1 I I t t t t t t t t ETX              display text (12 bytes)
//! DC2 m m m m m v L L DT0 DT1 ... c c ETX  configuration dump
//! ```
//!
//! - `o` origin digit `0`-`4`, `g` guard digit `0`-`2`
//! - `I I` identifier and `V V` value, uppercase hex
//! - `t` raw display characters, right-justified
//! - `m` model code, `v` version, `c c` checksum
//! - `L L` hex payload length: `0A` when the main zone is off, longer when on
//! - `DTn` one data nibble each, at frame offset `9 + n`
//!
//! Every decoder here is pure: it validates the frame shape and returns a
//! typed value, or `None` without side effects. Applying the result to a
//! status cache is the codec's job.

use std::borrow::Cow;
use std::collections::BTreeMap;

use bytes::{BufMut, BytesMut};

use rxvlib_core::frame::{DC1, DC2, ETX, STX};
use rxvlib_core::{Guard, Origin, UNKNOWN_VALUE};

use crate::reports::id;

/// Length of a report frame.
pub const REPORT_FRAME_LEN: usize = 8;
/// Length of a display text frame.
pub const TEXT_FRAME_LEN: usize = 12;
/// Number of raw characters in a display text frame.
pub const TEXT_LEN: usize = 8;

/// Payload length the receiver reports while the main zone is off.
const POWER_OFF_PAYLOAD_LEN: u8 = 0x0A;
/// Frame offset of the configuration payload length field.
const CONFIG_LEN_OFFSET: usize = 7;
/// Frame offset of data nibble DT0.
const DT_BASE: usize = 9;

/// Decode an uppercase hex digit. Lowercase is not part of the protocol.
pub fn nibble(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    Some(nibble(hi)? << 4 | nibble(lo)?)
}

// ---------------------------------------------------------------
// Report frames
// ---------------------------------------------------------------

/// A decoded report frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Report identifier.
    pub id: u8,
    /// Raw report value.
    pub value: u8,
    /// Control path that caused the report.
    pub origin: Origin,
    /// Protection state of the reported function.
    pub guard: Guard,
}

/// Decode an 8-byte report frame.
///
/// ```
/// use rxvlib_core::{Guard, Origin};
/// use rxvlib_yamaha::protocol::decode_report;
///
/// let report = decode_report(b"\x020026C7\x03").unwrap();
/// assert_eq!((report.id, report.value), (0x26, 0xC7));
/// assert_eq!(report.origin, Origin::Rs232c);
/// assert_eq!(report.guard, Guard::None);
/// ```
pub fn decode_report(frame: &[u8]) -> Option<Report> {
    let &[STX, o, g, i1, i2, v1, v2, ETX] = frame else {
        return None;
    };

    Some(Report {
        origin: Origin::from_digit(o)?,
        guard: Guard::from_digit(g)?,
        id: hex_byte(i1, i2)?,
        value: hex_byte(v1, v2)?,
    })
}

/// Encode a report frame, as the receiver would send it.
///
/// Used to script receiver traffic in simulators and tests.
pub fn encode_report(report: &Report) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(REPORT_FRAME_LEN);
    buf.put_u8(STX);
    buf.put_u8(b'0' + report.origin.code());
    buf.put_u8(b'0' + report.guard.code());
    buf.put_slice(format!("{:02X}{:02X}", report.id, report.value).as_bytes());
    buf.put_u8(ETX);
    buf.to_vec()
}

// ---------------------------------------------------------------
// Display text frames
// ---------------------------------------------------------------

/// A decoded display text frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayText {
    /// Display type identifier.
    pub id: u8,
    /// The raw display characters, unvalidated.
    pub raw: [u8; TEXT_LEN],
}

impl DisplayText {
    /// The display characters as text; invalid UTF-8 is replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }
}

/// Decode a 12-byte display text frame.
pub fn decode_text(frame: &[u8]) -> Option<DisplayText> {
    if frame.len() != TEXT_FRAME_LEN || frame[0] != DC1 || frame[TEXT_FRAME_LEN - 1] != ETX {
        return None;
    }

    let id = hex_byte(frame[1], frame[2])?;
    let mut raw = [0u8; TEXT_LEN];
    raw.copy_from_slice(&frame[3..3 + TEXT_LEN]);
    Some(DisplayText { id, raw })
}

// ---------------------------------------------------------------
// Configuration dumps
// ---------------------------------------------------------------

/// How one position of the configuration payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// One nibble stored as a report value.
    Field(u8),
    /// Two nibbles, high then low, stored as one report value.
    Wide(u8),
    /// Nibble `1` sets the multi-channel bit (0x10) on the input report.
    MultiChannel,
    /// Nibble `0` (effect off) sets the straight bit (0x80) on the program report.
    Straight,
    /// A non-zero nibble becomes the high nibble of the audio mode report.
    DecoderMode,
    /// Positions the device documents but this codec does not track.
    Skip(usize),
}

use Slot::*;

/// DT7-DT9, present in every dump.
const BASE_LAYOUT: &[Slot] = &[
    Field(id::SYSTEM),
    Field(id::POWER),
    Field(id::INPUT),
];

/// DT10 onwards, present only while the main zone is on.
const POWER_ON_LAYOUT: &[Slot] = &[
    MultiChannel,
    Field(id::AUDIO_MODE),
    Field(id::AUDIO_MUTE),
    Field(id::ZONE2_INPUT),
    Field(id::ZONE2_MUTE),
    Wide(id::MAIN_VOLUME),
    Wide(id::ZONE2_VOLUME),
    Wide(id::PROGRAM),
    Straight,
    Field(id::EXTENDED_SURROUND),
    Field(id::OSD),
    Field(id::SLEEP),
    Field(id::TUNER_PAGE),
    Field(id::PRESET_NO),
    Wide(id::NIGHT_MODE),
    Field(id::SPEAKER_RELAY_A),
    Field(id::SPEAKER_RELAY_B),
    Field(id::PLAYBACK),
    Field(id::SAMPLING_FREQUENCY),
    Field(id::EX_ES),
    Field(id::THR_BYPASS),
    Field(id::RED_DTS),
    Field(id::HEADPHONE),
    Field(id::TUNER_BAND),
    Field(id::TUNER_TUNED),
    Skip(1), // DC1 trigger output
    DecoderMode,
    Skip(2), // dual mono, DC1 trigger control
    Field(id::DTS_96_24),
    Skip(2), // DC2 trigger control and output
    Field(id::SPEAKER_B_ZONE),
    Skip(36), // DT47-DT82
    Field(id::DECODER_SELECT),
    Field(id::AUDIO_SELECT),
    Field(id::DIMMER),
    Skip(20), // DT86-DT105
    Field(id::EQUALIZER_TYPE),
    Skip(12), // DT107-DT118
    Field(id::TWO_CH_DECODER),
    Skip(3), // DT120-DT122
    Field(id::FAN_CONTROL),
    Field(id::SPEAKER_IMPEDANCE),
    Skip(1), // tuner setup
    Field(id::PURE_DIRECT),
    Field(id::ZONE3_INPUT),
    Field(id::ZONE3_MUTE),
    Wide(id::ZONE3_VOLUME),
    Field(id::REMOTE_SENSOR),
    Field(id::MULTI_CHANNEL),
    Skip(1), // remote ID
    Field(id::BI_AMP),
    Skip(4), // DT135-DT138
    Field(id::ZONE2_BASS),
    Field(id::ZONE2_TREBLE),
    Field(id::ZONE3_BASS),
    Field(id::ZONE3_TREBLE),
    Field(id::TONE_BYPASS),
    Field(id::WAKE_ON_RS232),
];

impl Slot {
    fn width(&self) -> usize {
        match self {
            Wide(_) => 2,
            Skip(n) => *n,
            _ => 1,
        }
    }
}

/// A decoded configuration dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDump {
    /// `true` for a long dump (main zone on).
    pub power: bool,
    /// Payload length field.
    pub payload_len: u8,
    /// Report values in identifier order. Undecodable fields are
    /// [`UNKNOWN_VALUE`].
    pub values: BTreeMap<u8, u8>,
}

impl ConfigDump {
    /// Value decoded for report `id`, if the dump covers it.
    pub fn get(&self, id: u8) -> Option<u8> {
        self.values.get(&id).copied()
    }
}

/// Decode a configuration dump frame.
///
/// Only the start marker and the length field are validated. Payload
/// nibbles that are missing or not hex decode as [`UNKNOWN_VALUE`].
pub fn decode_config(frame: &[u8]) -> Option<ConfigDump> {
    if frame.first() != Some(&DC2) || frame.len() < DT_BASE {
        return None;
    }
    let payload_len = hex_byte(frame[CONFIG_LEN_OFFSET], frame[CONFIG_LEN_OFFSET + 1])?;
    let power = payload_len != POWER_OFF_PAYLOAD_LEN;

    let dt = |n: usize| -> u8 {
        frame
            .get(DT_BASE + n)
            .copied()
            .and_then(nibble)
            .unwrap_or(UNKNOWN_VALUE)
    };

    let mut values = BTreeMap::new();
    let mut pos = 7;
    let layouts: &[&[Slot]] = if power {
        &[BASE_LAYOUT, POWER_ON_LAYOUT]
    } else {
        &[BASE_LAYOUT]
    };

    for slot in layouts.iter().flat_map(|layout| layout.iter()) {
        match *slot {
            Field(report) => {
                values.insert(report, dt(pos));
            }
            Wide(report) => {
                let hi = dt(pos);
                let value = if hi == UNKNOWN_VALUE {
                    UNKNOWN_VALUE
                } else {
                    match dt(pos + 1) {
                        UNKNOWN_VALUE => UNKNOWN_VALUE,
                        lo => hi << 4 | lo,
                    }
                };
                values.insert(report, value);
            }
            MultiChannel => {
                if dt(pos) == 1 {
                    set_bits(&mut values, id::INPUT, 0x10);
                }
            }
            Straight => {
                if dt(pos) == 0 {
                    set_bits(&mut values, id::PROGRAM, 0x80);
                }
            }
            DecoderMode => {
                let mode = dt(pos);
                if mode != 0 && mode != UNKNOWN_VALUE {
                    set_bits(&mut values, id::AUDIO_MODE, mode << 4);
                }
            }
            Skip(_) => {}
        }
        pos += slot.width();
    }

    Some(ConfigDump {
        power,
        payload_len,
        values,
    })
}

/// OR `bits` onto a decoded host value. An unknown host stays unknown.
fn set_bits(values: &mut BTreeMap<u8, u8>, report: u8, bits: u8) {
    if let Some(value) = values.get_mut(&report) {
        if *value != UNKNOWN_VALUE {
            *value |= bits;
        }
    }
}

/// Report identifiers a dump fills, for the given power state.
pub fn config_reports(power: bool) -> impl Iterator<Item = u8> {
    let layouts: &'static [&'static [Slot]] = if power {
        &[BASE_LAYOUT, POWER_ON_LAYOUT]
    } else {
        &[BASE_LAYOUT]
    };
    layouts
        .iter()
        .flat_map(|layout| layout.iter())
        .filter_map(|slot| match slot {
            Field(report) | Wide(report) => Some(*report),
            _ => None,
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a configuration dump frame from `DT7` onwards.
    pub(crate) fn config_frame(payload_len: u8, dts: &[u8]) -> Vec<u8> {
        let mut frame = vec![DC2];
        frame.extend_from_slice(b"R0178");
        frame.push(b'0');
        frame.extend_from_slice(format!("{payload_len:02X}").as_bytes());
        frame.extend_from_slice(b"0000000"); // DT0-DT6
        frame.extend_from_slice(dts);
        frame.extend_from_slice(b"00");
        frame.push(ETX);
        frame
    }

    /// DT7..=DT144 for a receiver that is on, as ASCII hex nibbles.
    pub(crate) fn power_on_payload() -> Vec<u8> {
        let mut dts = vec![b'0'; 144 - 7 + 1];
        let mut set = |dt: usize, ch: u8| dts[dt - 7] = ch;
        set(7, b'0'); // system ok
        set(8, b'1'); // all zones on
        set(9, b'5'); // dvd
        set(10, b'1'); // multi-channel
        set(11, b'3'); // audio coax/opt
        set(15, b'C'); // main volume 0xC8
        set(16, b'8');
        set(17, b'2'); // zone 2 volume 0x27
        set(18, b'7');
        set(19, b'0'); // program 0x05 (Vienna)
        set(20, b'5');
        set(21, b'1'); // effect on
        set(27, b'1'); // night mode 0x11
        set(28, b'1');
        set(29, b'1'); // speaker A on
        set(31, b'7'); // dts
        set(40, b'1'); // decoder mode dts
        set(85, b'4'); // dimmer 0
        set(119, b'5'); // neo:6 music
        set(129, b'C'); // zone 3 volume 0xC7
        set(130, b'7');
        set(144, b'1'); // wake on rs232
        dts
    }

    #[test]
    fn nibbles() {
        assert_eq!(nibble(b'0'), Some(0));
        assert_eq!(nibble(b'9'), Some(9));
        assert_eq!(nibble(b'A'), Some(10));
        assert_eq!(nibble(b'F'), Some(15));
        assert_eq!(nibble(b'a'), None);
        assert_eq!(nibble(b'G'), None);
        assert_eq!(nibble(0x7F), None);
    }

    #[test]
    fn report_frame() {
        let report = decode_report(b"\x024126C8\x03").unwrap();
        assert_eq!(report.id, 0x26);
        assert_eq!(report.value, 0xC8);
        assert_eq!(report.origin, Origin::Encoder);
        assert_eq!(report.guard, Guard::System);
    }

    #[test]
    fn report_round_trip() {
        let reports = [
            Report { id: 0x26, value: 0xC7, origin: Origin::Rs232c, guard: Guard::None },
            Report { id: 0xA2, value: 0x00, origin: Origin::Ir, guard: Guard::Settings },
            Report { id: 0x00, value: 0xFF, origin: Origin::System, guard: Guard::System },
        ];
        for report in reports {
            let frame = encode_report(&report);
            assert_eq!(frame.len(), REPORT_FRAME_LEN);
            assert_eq!(decode_report(&frame), Some(report));
        }
    }

    #[test]
    fn encode_report_writes_origin_and_guard_digits() {
        let report = Report { id: 0x23, value: 0x01, origin: Origin::Encoder, guard: Guard::Settings };
        assert_eq!(encode_report(&report), b"\x02422301\x03".to_vec());
    }

    #[test]
    fn report_frame_rejects_bad_digits() {
        assert!(decode_report(b"\x025026C7\x03").is_none(), "origin 5");
        assert!(decode_report(b"\x020326C7\x03").is_none(), "guard 3");
        assert!(decode_report(b"\x0200G6C7\x03").is_none(), "id hex");
        assert!(decode_report(b"\x020026c7\x03").is_none(), "lowercase");
        assert!(decode_report(b"\x020026C \x03").is_none(), "space");
    }

    #[test]
    fn report_frame_rejects_bad_shape() {
        assert!(decode_report(b"\x110026C7\x03").is_none());
        assert!(decode_report(b"\x020026C7\x02").is_none());
        assert!(decode_report(b"\x020026C7").is_none());
        assert!(decode_report(b"\x020026C7\x03\x03").is_none());
        assert!(decode_report(b"").is_none());
    }

    #[test]
    fn text_frame() {
        let text = decode_text(b"\x110087.50MHz\x03").unwrap();
        assert_eq!(text.id, 0x00);
        assert_eq!(text.text(), "87.50MHz");
    }

    #[test]
    fn text_frame_keeps_raw_bytes() {
        let text = decode_text(b"\x1101\x01\xFFabcdef\x03").unwrap();
        assert_eq!(text.id, 0x01);
        assert_eq!(&text.raw, b"\x01\xFFabcdef");
    }

    #[test]
    fn text_frame_rejects() {
        assert!(decode_text(b"\x020026C7\x03").is_none());
        assert!(decode_text(b"\x11 0Main    \x03").is_none());
        assert!(decode_text(b"\x1102Main    \x02").is_none());
        assert!(decode_text(b"\x1102Main   \x03").is_none());
    }

    #[test]
    fn power_off_dump() {
        let frame = config_frame(0x0A, b"029");
        let dump = decode_config(&frame).unwrap();
        assert!(!dump.power);
        assert_eq!(dump.payload_len, 0x0A);
        assert_eq!(dump.values.len(), 3);
        assert_eq!(dump.get(id::SYSTEM), Some(0x00));
        assert_eq!(dump.get(id::POWER), Some(0x02));
        assert_eq!(dump.get(id::INPUT), Some(0x09));
        assert_eq!(dump.get(id::MAIN_VOLUME), None);
    }

    #[test]
    fn power_on_dump() {
        let frame = config_frame(0x91, &power_on_payload());
        let dump = decode_config(&frame).unwrap();
        assert!(dump.power);
        assert_eq!(dump.get(id::POWER), Some(0x01));
        assert_eq!(dump.get(id::INPUT), Some(0x15), "multi-channel folded");
        assert_eq!(dump.get(id::AUDIO_MODE), Some(0x13), "decoder mode folded");
        assert_eq!(dump.get(id::MAIN_VOLUME), Some(0xC8));
        assert_eq!(dump.get(id::ZONE2_VOLUME), Some(0x27));
        assert_eq!(dump.get(id::PROGRAM), Some(0x05), "effect on, not straight");
        assert_eq!(dump.get(id::NIGHT_MODE), Some(0x11));
        assert_eq!(dump.get(id::SPEAKER_RELAY_A), Some(0x01));
        assert_eq!(dump.get(id::PLAYBACK), Some(0x07));
        assert_eq!(dump.get(id::DIMMER), Some(0x04));
        assert_eq!(dump.get(id::TWO_CH_DECODER), Some(0x05));
        assert_eq!(dump.get(id::ZONE3_VOLUME), Some(0xC7));
        assert_eq!(dump.get(id::WAKE_ON_RS232), Some(0x01));

        let expected: Vec<u8> = config_reports(true).collect();
        assert_eq!(dump.values.len(), expected.len());
        assert!(expected.iter().all(|id| dump.values.contains_key(id)));
    }

    #[test]
    fn straight_flag() {
        let mut payload = power_on_payload();
        payload[21 - 7] = b'0';
        let dump = decode_config(&config_frame(0x91, &payload)).unwrap();
        assert_eq!(dump.get(id::PROGRAM), Some(0x85));
    }

    #[test]
    fn wide_field_with_unknown_high_nibble() {
        let mut payload = power_on_payload();
        payload[15 - 7] = b'?';
        let dump = decode_config(&config_frame(0x91, &payload)).unwrap();
        assert_eq!(dump.get(id::MAIN_VOLUME), Some(UNKNOWN_VALUE));
        // Fixed offsets: the following fields are unaffected.
        assert_eq!(dump.get(id::ZONE2_VOLUME), Some(0x27));
        assert_eq!(dump.get(id::PROGRAM), Some(0x05));
    }

    #[test]
    fn wide_field_with_unknown_low_nibble() {
        let mut payload = power_on_payload();
        payload[18 - 7] = b'x';
        let dump = decode_config(&config_frame(0x91, &payload)).unwrap();
        assert_eq!(dump.get(id::ZONE2_VOLUME), Some(UNKNOWN_VALUE));
    }

    #[test]
    fn truncated_dump_fills_unknown() {
        let mut frame = vec![DC2];
        frame.extend_from_slice(b"R01780");
        frame.extend_from_slice(b"91");
        frame.extend_from_slice(b"0000000");
        frame.extend_from_slice(b"01");
        let dump = decode_config(&frame).unwrap();
        assert!(dump.power);
        assert_eq!(dump.get(id::SYSTEM), Some(0x00));
        assert_eq!(dump.get(id::POWER), Some(0x01));
        assert_eq!(dump.get(id::INPUT), Some(UNKNOWN_VALUE));
        assert_eq!(dump.get(id::WAKE_ON_RS232), Some(UNKNOWN_VALUE));
    }

    #[test]
    fn multichannel_on_unknown_input_stays_unknown() {
        let mut payload = power_on_payload();
        payload[9 - 7] = b'-';
        let dump = decode_config(&config_frame(0x91, &payload)).unwrap();
        assert_eq!(dump.get(id::INPUT), Some(UNKNOWN_VALUE));
    }

    #[test]
    fn config_rejects() {
        assert!(decode_config(b"\x020026C7\x03").is_none());
        assert!(decode_config(&config_frame(0x0A, b"")[..8]).is_none());
        let mut frame = config_frame(0x0A, b"000");
        frame[7] = b'x';
        assert!(decode_config(&frame).is_none());
        let mut frame = config_frame(0x0A, b"000");
        frame[8] = b'a';
        assert!(decode_config(&frame).is_none());
    }

    #[test]
    fn layout_ends_at_dt144() {
        let width: usize = BASE_LAYOUT
            .iter()
            .chain(POWER_ON_LAYOUT)
            .map(Slot::width)
            .sum();
        assert_eq!(7 + width, 145);
    }
}

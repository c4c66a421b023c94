//! The RX-V1600 codec: command lookup, frame decoding, and status tracking.
//!
//! [`RxV1600`] ties the static tables to one [`StatusCache`]. Decoding a
//! report or configuration frame updates the cache; the human-readable
//! value of any report can then be read back with
//! [`report_value_string`](RxV1600::report_value_string).
//!
//! # Example
//!
//! ```
//! use rxvlib_yamaha::RxV1600;
//!
//! let mut rxv = RxV1600::new();
//! assert_eq!(rxv.command("MainVolume_Up"), Some(&b"\x0207A1A\x03"[..]));
//!
//! rxv.decode(b"\x020026C8\x03").unwrap();
//! assert_eq!(rxv.report_value(0x26), 0xC8);
//! assert_eq!(rxv.report_value_string(0x26).as_deref(), Some("0.5 dB"));
//! ```

use std::borrow::Cow;

use tracing::{debug, trace};

use rxvlib_core::UNKNOWN_VALUE;

use crate::commands;
use crate::protocol::{self, ConfigDump, DisplayText, Report};
use crate::reports;
use crate::status::StatusCache;

/// A decoded frame of any shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A report frame; the cache has been updated.
    Report(Report),
    /// A display text frame.
    Text(DisplayText),
    /// A configuration dump; the cache has been updated.
    Config(ConfigDump),
    /// No decoder accepted the frame.
    Unrecognized,
}

/// Codec for one RX-V1600 receiver.
#[derive(Debug, Clone, Default)]
pub struct RxV1600 {
    status: StatusCache,
}

impl RxV1600 {
    /// Create a codec with every report unknown.
    pub fn new() -> Self {
        RxV1600 {
            status: StatusCache::new(),
        }
    }

    // -----------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------

    /// Frame for the fixed command `name`.
    pub fn command(&self, name: &str) -> Option<&'static [u8]> {
        commands::command(name)
    }

    /// Frame for the value command `name` with `value`.
    pub fn command_value(&self, name: &str, value: u8) -> Option<Vec<u8>> {
        commands::command_value(name, value)
    }

    // -----------------------------------------------------------------
    // Names and values
    // -----------------------------------------------------------------

    /// Symbolic name of report `id`.
    pub fn report_name(&self, id: u8) -> Option<&'static str> {
        reports::report_name(id)
    }

    /// Symbolic name of display-text type `id`.
    pub fn display_name(&self, id: u8) -> Option<&'static str> {
        reports::display_name(id)
    }

    /// Last cached raw value of report `id`, [`UNKNOWN_VALUE`] if never seen.
    pub fn report_value(&self, id: u8) -> u8 {
        self.status.get(id)
    }

    /// Human-readable value of report `id`.
    ///
    /// A value table entry wins. Volume reports without one get a computed
    /// decibel string, provided their value is known.
    pub fn report_value_string(&self, id: u8) -> Option<Cow<'static, str>> {
        let value = self.status.get(id);
        if let Some(text) = reports::value_name(id, value) {
            return Some(Cow::Borrowed(text));
        }
        if reports::is_volume(id) && value != UNKNOWN_VALUE {
            return Some(Cow::Owned(reports::volume_db(value)));
        }
        None
    }

    /// Every named report with its current value string.
    pub fn known_reports(
        &self,
    ) -> impl Iterator<Item = (u8, &'static str, Option<Cow<'static, str>>)> + '_ {
        reports::REPORTS
            .iter()
            .map(|&(id, name)| (id, name, self.report_value_string(id)))
    }

    /// The status cache.
    pub fn status(&self) -> &StatusCache {
        &self.status
    }

    // -----------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------

    /// Decode a report frame and cache its value.
    ///
    /// A rejected frame leaves the cache untouched.
    pub fn decode(&mut self, frame: &[u8]) -> Option<Report> {
        let report = protocol::decode_report(frame)?;
        let previous = self.status.set(report.id, report.value);
        trace!(
            id = report.id,
            value = report.value,
            previous,
            origin = %report.origin,
            "report decoded"
        );
        Some(report)
    }

    /// Decode a display text frame. The cache is not involved.
    pub fn decode_text(&self, frame: &[u8]) -> Option<DisplayText> {
        protocol::decode_text(frame)
    }

    /// Decode a configuration dump and cache every field it carries.
    pub fn decode_config(&mut self, frame: &[u8]) -> Option<ConfigDump> {
        let dump = protocol::decode_config(frame)?;
        for (&id, &value) in &dump.values {
            self.status.set(id, value);
        }
        debug!(
            power = dump.power,
            fields = dump.values.len(),
            "configuration decoded"
        );
        Some(dump)
    }

    /// Try each decoder in turn.
    pub fn decode_response(&mut self, frame: &[u8]) -> Response {
        if let Some(report) = self.decode(frame) {
            Response::Report(report)
        } else if let Some(text) = self.decode_text(frame) {
            Response::Text(text)
        } else if let Some(dump) = self.decode_config(frame) {
            Response::Config(dump)
        } else {
            debug!(frame = %frame.escape_ascii(), "unrecognized frame");
            Response::Unrecognized
        }
    }
}

#[cfg(test)]
mod tests {
    use rxvlib_core::{Guard, Origin};

    use super::*;
    use crate::protocol::tests::{config_frame, power_on_payload};
    use crate::reports::id;

    #[test]
    fn zero_db_is_a_table_hit() {
        let mut rxv = RxV1600::new();
        let report = rxv
            .decode(&[0x02, 0x30, 0x30, 0x32, 0x36, 0x43, 0x37, 0x03])
            .unwrap();
        assert_eq!(report.id, 0x26);
        assert_eq!(report.value, 0xC7);
        assert_eq!(report.origin, Origin::Rs232c);
        assert_eq!(report.guard, Guard::None);
        assert_eq!(
            rxv.report_value_string(0x26),
            Some(Cow::Borrowed("0 dB"))
        );
    }

    #[test]
    fn half_db_is_computed() {
        let mut rxv = RxV1600::new();
        rxv.decode(&[0x02, 0x30, 0x30, 0x32, 0x36, 0x43, 0x38, 0x03])
            .unwrap();
        assert_eq!(rxv.report_value(0x26), 0xC8);
        assert_eq!(rxv.report_value_string(0x26).as_deref(), Some("0.5 dB"));
    }

    #[test]
    fn volume_strings_for_other_zones() {
        let mut rxv = RxV1600::new();
        rxv.decode(b"\x02002727\x03").unwrap();
        assert_eq!(rxv.report_value_string(0x27).as_deref(), Some("-80.0 dB"));
        rxv.decode(b"\x0200A200\x03").unwrap();
        assert_eq!(rxv.report_value_string(0xA2).as_deref(), Some("Infinite"));
    }

    #[test]
    fn unknown_values_have_no_string() {
        let rxv = RxV1600::new();
        assert_eq!(rxv.report_value(0x26), UNKNOWN_VALUE);
        assert_eq!(rxv.report_value_string(0x26), None);
        assert_eq!(rxv.report_value_string(0x20), None);
    }

    #[test]
    fn unmapped_value_is_absent() {
        let mut rxv = RxV1600::new();
        rxv.decode(b"\x02003009\x03").unwrap();
        assert_eq!(rxv.report_value(0x30), 0x09);
        assert_eq!(rxv.report_value_string(0x30), None);
        assert_eq!(rxv.report_name(0x30), None);
    }

    #[test]
    fn rejected_frames_leave_cache_unchanged() {
        let mut rxv = RxV1600::new();
        rxv.decode(b"\x020026C7\x03").unwrap();
        let before = rxv.status().clone();

        for frame in [
            &b"\x025026C8\x03"[..],
            b"\x020326C8\x03",
            b"\x020026CX\x03",
            b"\x020026c8\x03",
            b"\x020026C8\x02",
        ] {
            assert!(rxv.decode(frame).is_none());
        }
        assert_eq!(rxv.status(), &before);
    }

    #[test]
    fn text_does_not_touch_cache() {
        let rxv = RxV1600::new();
        let text = rxv.decode_text(b"\x1103Dvd     \x03").unwrap();
        assert_eq!(rxv.display_name(text.id), Some("MainInput"));
        assert_eq!(text.text(), "Dvd     ");
        assert_eq!(rxv.status().known().count(), 0);
    }

    #[test]
    fn power_off_config_touches_three_reports() {
        let mut rxv = RxV1600::new();
        let dump = rxv.decode_config(&config_frame(0x0A, b"002")).unwrap();
        assert!(!dump.power);

        let known: Vec<u8> = rxv.status().known().map(|(id, _)| id).collect();
        assert_eq!(known, vec![id::SYSTEM, id::POWER, id::INPUT]);
        assert_eq!(rxv.report_value_string(id::SYSTEM).as_deref(), Some("Ok"));
        assert_eq!(rxv.report_value_string(id::POWER).as_deref(), Some("All Off"));
        assert_eq!(rxv.report_value_string(id::INPUT).as_deref(), Some("Tuner"));
    }

    #[test]
    fn power_on_config_fills_cache() {
        let mut rxv = RxV1600::new();
        let dump = rxv
            .decode_config(&config_frame(0x91, &power_on_payload()))
            .unwrap();
        assert!(dump.power);

        assert_eq!(
            rxv.report_value_string(id::INPUT).as_deref(),
            Some("MultiChannel Dvd")
        );
        assert_eq!(
            rxv.report_value_string(id::AUDIO_MODE).as_deref(),
            Some("Dts Coax/Opt")
        );
        assert_eq!(rxv.report_value_string(id::MAIN_VOLUME).as_deref(), Some("0.5 dB"));
        assert_eq!(rxv.report_value_string(id::PROGRAM).as_deref(), Some("Vienna"));
        assert_eq!(
            rxv.report_value_string(id::NIGHT_MODE).as_deref(),
            Some("Cinema Level Middle")
        );
        assert_eq!(
            rxv.report_value_string(id::TWO_CH_DECODER).as_deref(),
            Some("Neo:6 Music")
        );
        assert_eq!(rxv.report_value_string(id::WAKE_ON_RS232).as_deref(), Some("Yes"));
        // Not part of the dump.
        assert_eq!(rxv.report_value(id::WARNING), UNKNOWN_VALUE);
        assert_eq!(rxv.report_value(id::MUTE_TYPE), UNKNOWN_VALUE);
    }

    #[test]
    fn config_overwrites_with_unknown() {
        let mut rxv = RxV1600::new();
        rxv.decode(b"\x02002105\x03").unwrap();
        assert_eq!(rxv.report_value(id::INPUT), 0x05);

        let mut frame = config_frame(0x0A, b"00");
        frame.truncate(frame.len() - 3);
        rxv.decode_config(&frame).unwrap();
        assert_eq!(rxv.report_value(id::INPUT), UNKNOWN_VALUE);
    }

    #[test]
    fn dispatch() {
        let mut rxv = RxV1600::new();
        assert!(matches!(
            rxv.decode_response(b"\x020026C7\x03"),
            Response::Report(Report { id: 0x26, .. })
        ));
        assert!(matches!(
            rxv.decode_response(b"\x1101 -10.0dB\x03"),
            Response::Text(DisplayText { id: 0x01, .. })
        ));
        assert!(matches!(
            rxv.decode_response(&config_frame(0x0A, b"021")),
            Response::Config(ConfigDump { power: false, .. })
        ));
        assert_eq!(rxv.decode_response(b"\x11000\x03"), Response::Unrecognized);
        assert_eq!(rxv.decode_response(b"\x03"), Response::Unrecognized);
    }

    #[test]
    fn known_reports_lists_every_name() {
        let mut rxv = RxV1600::new();
        rxv.decode(b"\x02002001\x03").unwrap();
        let listed: Vec<_> = rxv.known_reports().collect();
        assert_eq!(listed.len(), reports::REPORTS.len());
        let power = listed.iter().find(|(id, _, _)| *id == 0x20).unwrap();
        assert_eq!(power.1, "Power");
        assert_eq!(power.2.as_deref(), Some("All On"));
        let volume = listed.iter().find(|(id, _, _)| *id == 0x26).unwrap();
        assert_eq!(volume.2, None);
    }

    #[test]
    fn commands_via_codec() {
        let rxv = RxV1600::new();
        assert_eq!(rxv.command("Ready"), Some(&b"\x11000\x03"[..]));
        assert_eq!(
            rxv.command_value("MainVolumeSet", 0xC7).as_deref(),
            Some(&b"\x02230C7\x03"[..])
        );
        assert_eq!(rxv.command("Nope"), None);
    }
}

//! RX-V1600 report, value, and display-text tables.
//!
//! A report is one piece of receiver status, addressed by an 8-bit
//! identifier. Its raw value maps to a human-readable string through
//! [`VALUES`], keyed by `(id, value)`. Volume reports have no table entry
//! for most levels; [`volume_db`] computes their decibel string instead.
//!
//! The value table has gaps. An unmapped `(id, value)` pair is simply
//! unnamed, not an error.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Report identifiers.
pub mod id {
    pub const SYSTEM: u8 = 0x00;
    pub const WARNING: u8 = 0x01;
    pub const PLAYBACK: u8 = 0x10;
    pub const SAMPLING_FREQUENCY: u8 = 0x11;
    pub const EX_ES: u8 = 0x12;
    pub const THR_BYPASS: u8 = 0x13;
    pub const RED_DTS: u8 = 0x14;
    pub const TUNER_TUNED: u8 = 0x15;
    pub const DTS_96_24: u8 = 0x16;
    pub const POWER: u8 = 0x20;
    pub const INPUT: u8 = 0x21;
    pub const AUDIO_MODE: u8 = 0x22;
    pub const AUDIO_MUTE: u8 = 0x23;
    pub const ZONE2_INPUT: u8 = 0x24;
    pub const ZONE2_MUTE: u8 = 0x25;
    pub const MAIN_VOLUME: u8 = 0x26;
    pub const ZONE2_VOLUME: u8 = 0x27;
    pub const PROGRAM: u8 = 0x28;
    pub const TUNER_PAGE: u8 = 0x29;
    pub const PRESET_NO: u8 = 0x2A;
    pub const OSD: u8 = 0x2B;
    pub const SLEEP: u8 = 0x2C;
    pub const EXTENDED_SURROUND: u8 = 0x2D;
    pub const SPEAKER_RELAY_A: u8 = 0x2E;
    pub const SPEAKER_RELAY_B: u8 = 0x2F;
    pub const HEADPHONE: u8 = 0x34;
    pub const TUNER_BAND: u8 = 0x35;
    pub const SPEAKER_B_ZONE: u8 = 0x3D;
    pub const ZONE2_BASS: u8 = 0x4B;
    pub const ZONE2_TREBLE: u8 = 0x4C;
    pub const ZONE3_BASS: u8 = 0x4D;
    pub const ZONE3_TREBLE: u8 = 0x4E;
    pub const DECODER_SELECT: u8 = 0x5F;
    pub const AUDIO_SELECT: u8 = 0x60;
    pub const DIMMER: u8 = 0x61;
    pub const TWO_CH_DECODER: u8 = 0x6E;
    pub const MULTI_CHANNEL: u8 = 0x7B;
    pub const NIGHT_MODE: u8 = 0x8B;
    pub const PURE_DIRECT: u8 = 0x8C;
    pub const ZONE3_INPUT: u8 = 0xA0;
    pub const ZONE3_MUTE: u8 = 0xA1;
    pub const ZONE3_VOLUME: u8 = 0xA2;
    pub const MUTE_TYPE: u8 = 0xA5;
    pub const EQUALIZER_TYPE: u8 = 0xA7;
    pub const TONE_BYPASS: u8 = 0xA8;
    pub const FAN_CONTROL: u8 = 0xB2;
    pub const SPEAKER_IMPEDANCE: u8 = 0xB3;
    pub const REMOTE_SENSOR: u8 = 0xB9;
    pub const BI_AMP: u8 = 0xBB;
    pub const WAKE_ON_RS232: u8 = 0xBD;
}

/// Every named report as `(id, name)`.
pub static REPORTS: &[(u8, &str)] = &[
    (id::SYSTEM, "System"),
    (id::WARNING, "Warning"),
    (id::PLAYBACK, "Playback"),
    (id::SAMPLING_FREQUENCY, "Fs"),
    (id::EX_ES, "ExEs"),
    (id::THR_BYPASS, "ThrBypass"),
    (id::RED_DTS, "Red-Dts"),
    (id::TUNER_TUNED, "TunerTuned"),
    (id::DTS_96_24, "Dts96-24"),
    (id::POWER, "Power"),
    (id::INPUT, "Input"),
    (id::AUDIO_MODE, "AudioMode"),
    (id::AUDIO_MUTE, "AudioMute"),
    (id::ZONE2_INPUT, "Zone2Input"),
    (id::ZONE2_MUTE, "Zone2Mute"),
    (id::MAIN_VOLUME, "MainVolume"),
    (id::ZONE2_VOLUME, "Zone2Volume"),
    (id::PROGRAM, "Program"),
    (id::TUNER_PAGE, "TunerPage"),
    (id::PRESET_NO, "PresetNo"),
    (id::OSD, "Osd"),
    (id::SLEEP, "Sleep"),
    (id::EXTENDED_SURROUND, "ExtendedSurround"),
    (id::SPEAKER_RELAY_A, "SpeakerRelayA"),
    (id::SPEAKER_RELAY_B, "SpeakerRelayB"),
    (id::HEADPHONE, "Headphone"),
    (id::TUNER_BAND, "TunerBand"),
    (id::SPEAKER_B_ZONE, "SpeakerBZone"),
    (id::ZONE2_BASS, "Zone2Bass"),
    (id::ZONE2_TREBLE, "Zone2Treble"),
    (id::ZONE3_BASS, "Zone3Bass"),
    (id::ZONE3_TREBLE, "Zone3Treble"),
    (id::DECODER_SELECT, "DecoderSelect"),
    (id::AUDIO_SELECT, "AudioSelect"),
    (id::DIMMER, "Dimmer"),
    (id::TWO_CH_DECODER, "2ChDecoder"),
    (id::MULTI_CHANNEL, "MultiChannel"),
    (id::NIGHT_MODE, "NightMode"),
    (id::PURE_DIRECT, "PureDirect"),
    (id::ZONE3_INPUT, "Zone3Input"),
    (id::ZONE3_MUTE, "Zone3Mute"),
    (id::ZONE3_VOLUME, "Zone3Volume"),
    (id::MUTE_TYPE, "MuteType"),
    (id::EQUALIZER_TYPE, "EqualizerType"),
    (id::TONE_BYPASS, "ToneBypass"),
    (id::FAN_CONTROL, "FanControl"),
    (id::SPEAKER_IMPEDANCE, "SpeakerImpedance"),
    (id::REMOTE_SENSOR, "RemoteSensor"),
    (id::BI_AMP, "Bi-Amp"),
    (id::WAKE_ON_RS232, "WakeOnRs232"),
];

/// Human-readable report values as `((id, value), text)`.
pub static VALUES: &[((u8, u8), &str)] = &[
    // System status
    ((0x00, 0x00), "Ok"),
    ((0x00, 0x01), "Busy"),
    ((0x00, 0x02), "Standby"),

    // Warnings
    ((0x01, 0x00), "Over Current"),
    ((0x01, 0x01), "Dc Detect"),
    ((0x01, 0x02), "Power Trouble"),
    ((0x01, 0x03), "Over Heat"),

    // Playback decoder
    ((0x10, 0x00), "MultiChannel Input"),
    ((0x10, 0x01), "Analog"),
    ((0x10, 0x02), "Pcm"),
    ((0x10, 0x03), "DolbyDigital Multi"),
    ((0x10, 0x04), "DolbyDigital Stereo"),
    ((0x10, 0x05), "DolbyDigital Karaoke"),
    ((0x10, 0x06), "DolbyDigital Ex"),
    ((0x10, 0x07), "Dts"),
    ((0x10, 0x08), "Dts Es"),
    ((0x10, 0x09), "Other Digital"),
    ((0x10, 0x0A), "Dts Analog Mute"),
    ((0x10, 0x0B), "Dts Discrete"),
    ((0x10, 0x0C), "Aac Multi"),
    ((0x10, 0x0D), "Aac Stereo"),

    // Sampling frequency
    ((0x11, 0x00), "Analog"),
    ((0x11, 0x01), "32 kHz"),
    ((0x11, 0x02), "44.1 kHz"),
    ((0x11, 0x03), "48 kHz"),
    ((0x11, 0x04), "64 kHz"),
    ((0x11, 0x05), "88.2 kHz"),
    ((0x11, 0x06), "96 kHz"),
    ((0x11, 0x07), "Unknown"),
    ((0x11, 0x08), "128 kHz"),
    ((0x11, 0x09), "176.4 kHz"),
    ((0x11, 0x0A), "192 kHz"),
    ((0x11, 0x0B), "48 kHz/96 kHz"),

    // EX / ES mode
    ((0x12, 0x00), "Off"),
    ((0x12, 0x01), "Matrix"),
    ((0x12, 0x02), "Discrete"),

    // THR DSP bypass
    ((0x13, 0x00), "Off"),
    ((0x13, 0x01), "On"),

    // RED DTS status
    ((0x14, 0x00), "Release"),
    ((0x14, 0x01), "Wait"),

    // Tuner status
    ((0x15, 0x00), "Not Tuned"),
    ((0x15, 0x01), "Tuned"),

    // DTS 96/24 mode
    ((0x16, 0x00), "Off"),
    ((0x16, 0x01), "On"),

    // Power state of all zones
    ((0x20, 0x00), "All Off"),
    ((0x20, 0x01), "All On"),
    ((0x20, 0x02), "Main On Zone2,Zone3 Off"),
    ((0x20, 0x03), "Zone2,Zone3 On Main Off"),
    ((0x20, 0x04), "Main,Zone2 On Zone3 Off"),
    ((0x20, 0x05), "Main,Zone3 On Zone2 Off"),
    ((0x20, 0x06), "Zone2 On Main,Zone3 Off"),
    ((0x20, 0x07), "Zone3 On Main,Zone2 Off"),

    // Main input
    ((0x21, 0x00), "Phono"),
    ((0x21, 0x01), "Cd"),
    ((0x21, 0x02), "Tuner"),
    ((0x21, 0x03), "Cd-R"),
    ((0x21, 0x04), "Md/Tape"),
    ((0x21, 0x05), "Dvd"),
    ((0x21, 0x06), "Dtv"),
    ((0x21, 0x07), "Cbl/Sat"),
    ((0x21, 0x09), "Vcr1"),
    ((0x21, 0x0A), "Dvr/Vcr2"),
    ((0x21, 0x0C), "V-Aux"),

    // Multichannel overriding main input
    ((0x21, 0x10), "MultiChannel Phono"),
    ((0x21, 0x11), "MultiChannel Cd"),
    ((0x21, 0x12), "MultiChannel Tuner"),
    ((0x21, 0x13), "MultiChannel Cd-R"),
    ((0x21, 0x14), "MultiChannel Md/Tape"),
    ((0x21, 0x15), "MultiChannel Dvd"),
    ((0x21, 0x16), "MultiChannel Dtv"),
    ((0x21, 0x17), "MultiChannel Cbl/Sat"),
    ((0x21, 0x19), "MultiChannel Vcr1"),
    ((0x21, 0x1A), "MultiChannel Dvr/Vcr2"),
    ((0x21, 0x1C), "MultiChannel V-Aux"),

    // Audio type without decoder
    ((0x22, 0x00), "Auto"),
    ((0x22, 0x03), "Auto Coax/Opt"),
    ((0x22, 0x04), "Auto Analog"),
    ((0x22, 0x05), "Auto Analog Only"),
    ((0x22, 0x08), "Auto Hdmi"),

    // Audio type for Dts decoder mode
    ((0x22, 0x10), "Dts Auto"),
    ((0x22, 0x13), "Dts Coax/Opt"),
    ((0x22, 0x14), "Dts Analog"),
    ((0x22, 0x15), "Dts Analog Only"),
    ((0x22, 0x18), "Dts Hdmi"),

    // Audio type for AAC decoder mode
    ((0x22, 0x20), "Aac Auto"),
    ((0x22, 0x23), "Aac Coax/Opt"),
    ((0x22, 0x24), "Aac Analog"),
    ((0x22, 0x25), "Aac Analog Only"),
    ((0x22, 0x28), "Aac Hdmi"),

    // Main audio mute
    ((0x23, 0x00), "Off"),
    ((0x23, 0x01), "On"),

    // Zone 2 input
    ((0x24, 0x00), "Phono"),
    ((0x24, 0x01), "Cd"),
    ((0x24, 0x02), "Tuner"),
    ((0x24, 0x03), "Cd-R"),
    ((0x24, 0x04), "Md/Tape"),
    ((0x24, 0x05), "Dvd"),
    ((0x24, 0x06), "Dtv"),
    ((0x24, 0x07), "Cbl/Sat"),
    ((0x24, 0x09), "Vcr1"),
    ((0x24, 0x0A), "Dvr/Vcr2"),
    ((0x24, 0x0C), "V-Aux"),

    // Zone 2 mute
    ((0x25, 0x00), "Off"),
    ((0x25, 0x01), "On"),

    // Main volume
    ((0x26, 0x00), "Infinite"),
    ((0x26, 0xC7), "0 dB"),

    // Zone 2 volume
    ((0x27, 0x00), "Infinite"),
    ((0x27, 0xC7), "0 dB"),

    // DSP effect program
    ((0x28, 0x05), "Vienna"),
    ((0x28, 0x0E), "The Bottom Line"),
    ((0x28, 0x10), "The Roxy Theatre"),
    ((0x28, 0x14), "Disco"),
    ((0x28, 0x16), "Game"),
    ((0x28, 0x17), "7 Channel Stereo"),
    ((0x28, 0x18), "Pop/Rock"),
    ((0x28, 0x20), "Mono Movie"),
    ((0x28, 0x21), "Tv Sports"),
    ((0x28, 0x24), "Spectacle"),
    ((0x28, 0x25), "Sci-Fi"),
    ((0x28, 0x28), "Adventure"),
    ((0x28, 0x29), "General"),
    ((0x28, 0x2C), "Standard"),
    ((0x28, 0x2D), "Enhanced"),
    ((0x28, 0x34), "2 Channel Stereo"),
    ((0x28, 0x36), "Thx Cinema"),
    ((0x28, 0x37), "Thx Music"),
    ((0x28, 0x3C), "Thx Game"),

    // Straight overriding DSP program
    ((0x28, 0x85), "Straight Vienna"),
    ((0x28, 0x8E), "Straight The Bottom Line"),
    ((0x28, 0x90), "Straight The Roxy Theatre"),
    ((0x28, 0x94), "Straight Disco"),
    ((0x28, 0x96), "Straight Game"),
    ((0x28, 0x97), "Straight 7 Channel Stereo"),
    ((0x28, 0x98), "Straight Pop/Rock"),
    ((0x28, 0xA0), "Straight Mono Movie"),
    ((0x28, 0xA1), "Straight Tv Sports"),
    ((0x28, 0xA4), "Straight Spectacle"),
    ((0x28, 0xA5), "Straight Sci-Fi"),
    ((0x28, 0xA8), "Straight Adventure"),
    ((0x28, 0xA9), "Straight General"),
    ((0x28, 0xAC), "Straight Standard"),
    ((0x28, 0xAD), "Straight Enhanced"),
    ((0x28, 0xB4), "Straight 2 Channel Stereo"),
    ((0x28, 0xB6), "Straight Thx Cinema"),
    ((0x28, 0xB7), "Straight Thx Music"),
    ((0x28, 0xBC), "Straight Thx Game"),

    // Tuner preset page
    ((0x29, 0x00), "A"),
    ((0x29, 0x01), "B"),
    ((0x29, 0x02), "C"),
    ((0x29, 0x03), "D"),
    ((0x29, 0x04), "E"),

    // Tuner preset number
    ((0x2A, 0x00), "1"),
    ((0x2A, 0x01), "2"),
    ((0x2A, 0x02), "3"),
    ((0x2A, 0x03), "4"),
    ((0x2A, 0x04), "5"),
    ((0x2A, 0x05), "6"),
    ((0x2A, 0x06), "7"),
    ((0x2A, 0x07), "8"),

    // OSD
    ((0x2B, 0x00), "Full"),
    ((0x2B, 0x01), "Short"),
    ((0x2B, 0x02), "Off"),

    // Sleep delay
    ((0x2C, 0x00), "120"),
    ((0x2C, 0x01), "90"),
    ((0x2C, 0x02), "60"),
    ((0x2C, 0x03), "30"),
    ((0x2C, 0x04), "Off"),

    // Extended surround mode
    ((0x2D, 0x00), "Off"),
    ((0x2D, 0x01), "EX/ES"),
    ((0x2D, 0x02), "Discrete On"),
    ((0x2D, 0x03), "Auto"),
    ((0x2D, 0x04), "EX"),
    ((0x2D, 0x05), "PLIIx Movie"),
    ((0x2D, 0x06), "PLIIx Music"),

    // Speaker Relay A
    ((0x2E, 0x00), "Off"),
    ((0x2E, 0x01), "On"),

    // Speaker Relay B
    ((0x2F, 0x00), "Off"),
    ((0x2F, 0x01), "On"),

    // Headphone
    ((0x34, 0x00), "Off"),
    ((0x34, 0x01), "On"),

    // Speaker B zone
    ((0x3D, 0x00), "Main"),
    ((0x3D, 0x01), "Zone 2"),

    // Zone 2 Bass
    ((0x4B, 0x00), "-10dB"),
    ((0x4B, 0x01), "-8dB"),
    ((0x4B, 0x02), "-6dB"),
    ((0x4B, 0x03), "-4dB"),
    ((0x4B, 0x04), "-2dB"),
    ((0x4B, 0x05), "0dB"),
    ((0x4B, 0x06), "2dB"),
    ((0x4B, 0x07), "4dB"),
    ((0x4B, 0x08), "6dB"),
    ((0x4B, 0x09), "8dB"),
    ((0x4B, 0x0A), "10dB"),

    // Zone 2 Treble
    ((0x4C, 0x00), "-10dB"),
    ((0x4C, 0x01), "-8dB"),
    ((0x4C, 0x02), "-6dB"),
    ((0x4C, 0x03), "-4dB"),
    ((0x4C, 0x04), "-2dB"),
    ((0x4C, 0x05), "0dB"),
    ((0x4C, 0x06), "2dB"),
    ((0x4C, 0x07), "4dB"),
    ((0x4C, 0x08), "6dB"),
    ((0x4C, 0x09), "8dB"),
    ((0x4C, 0x0A), "10dB"),

    // Zone 3 Bass
    ((0x4D, 0x00), "-10dB"),
    ((0x4D, 0x01), "-8dB"),
    ((0x4D, 0x02), "-6dB"),
    ((0x4D, 0x03), "-4dB"),
    ((0x4D, 0x04), "-2dB"),
    ((0x4D, 0x05), "0dB"),
    ((0x4D, 0x06), "2dB"),
    ((0x4D, 0x07), "4dB"),
    ((0x4D, 0x08), "6dB"),
    ((0x4D, 0x09), "8dB"),
    ((0x4D, 0x0A), "10dB"),

    // Zone 3 Treble
    ((0x4E, 0x00), "-10dB"),
    ((0x4E, 0x01), "-8dB"),
    ((0x4E, 0x02), "-6dB"),
    ((0x4E, 0x03), "-4dB"),
    ((0x4E, 0x04), "-2dB"),
    ((0x4E, 0x05), "0dB"),
    ((0x4E, 0x06), "2dB"),
    ((0x4E, 0x07), "4dB"),
    ((0x4E, 0x08), "6dB"),
    ((0x4E, 0x09), "8dB"),
    ((0x4E, 0x0A), "10dB"),

    // Initial Decoder
    ((0x5F, 0x00), "Auto"),
    ((0x5F, 0x01), "Last"),

    // Initial Audio
    ((0x60, 0x00), "Auto"),
    ((0x60, 0x01), "Last"),

    // Dimmer
    ((0x61, 0x00), "-4"),
    ((0x61, 0x01), "-3"),
    ((0x61, 0x02), "-2"),
    ((0x61, 0x03), "-1"),
    ((0x61, 0x04), "0"),

    // Zone 2 volume out
    ((0x66, 0x00), "Variable"),
    ((0x66, 0x01), "Fixed"),

    // Memory guard
    ((0x68, 0x00), "Off"),
    ((0x68, 0x01), "On"),

    // Zone 3 volume out
    ((0x6B, 0x00), "Variable"),
    ((0x6B, 0x01), "Fixed"),

    // 2 channel decoder
    ((0x6E, 0x00), "Pro Logic"),
    ((0x6E, 0x01), "PLIIx Movie"),
    ((0x6E, 0x02), "PLIIx Music"),
    ((0x6E, 0x03), "PLIIx Game"),
    ((0x6E, 0x04), "Neo:6 Cinema"),
    ((0x6E, 0x05), "Neo:6 Music"),

    // Multi channel select
    ((0x7B, 0x00), "6ch"),
    ((0x7B, 0x01), "8ch Tuner"),
    ((0x7B, 0x02), "8ch CD"),
    ((0x7B, 0x03), "8ch CD-R"),
    ((0x7B, 0x04), "8ch MD/TAPE"),
    ((0x7B, 0x05), "8ch DVD"),
    ((0x7B, 0x06), "8ch DTV"),
    ((0x7B, 0x07), "8ch CBL/SAT"),
    ((0x7B, 0x09), "8ch VCR1"),
    ((0x7B, 0x0A), "8ch DVR/VCR2"),
    ((0x7B, 0x0C), "8ch V-AUX"),

    // Night mode parameters
    ((0x8B, 0x00), "Off"),
    ((0x8B, 0x10), "Cinema Level Low"),
    ((0x8B, 0x11), "Cinema Level Middle"),
    ((0x8B, 0x12), "Cinema Level High"),
    ((0x8B, 0x20), "Music Level Low"),
    ((0x8B, 0x21), "Music Level Middle"),
    ((0x8B, 0x22), "Music Level High"),

    // Pure direct
    ((0x8C, 0x00), "Off"),
    ((0x8C, 0x01), "On"),

    // Zone 3 input
    ((0xA0, 0x00), "Phono"),
    ((0xA0, 0x01), "Cd"),
    ((0xA0, 0x02), "Tuner"),
    ((0xA0, 0x03), "Cd-R"),
    ((0xA0, 0x04), "Md/Tape"),
    ((0xA0, 0x05), "Dvd"),
    ((0xA0, 0x06), "Dtv"),
    ((0xA0, 0x07), "Cbl/Sat"),
    ((0xA0, 0x09), "Vcr1"),
    ((0xA0, 0x0A), "Dvr/Vcr2"),
    ((0xA0, 0x0C), "V-Aux"),

    // Zone 3 mute
    ((0xA1, 0x00), "Off"),
    ((0xA1, 0x01), "On"),

    // Zone 3 volume
    ((0xA2, 0x00), "Infinite"),
    ((0xA2, 0xC7), "0 dB"),

    // Mute type
    ((0xA5, 0x00), "Full"),
    ((0xA5, 0x01), "-20 dB"),

    // EQ select type
    ((0xA7, 0x00), "Auto Peq"),
    ((0xA7, 0x01), "Geq"),
    ((0xA7, 0x02), "Eq off"),

    // Tone bypass
    ((0xA8, 0x00), "Auto"),
    ((0xA8, 0x01), "Off"),

    // Fan control
    ((0xB2, 0x00), "Auto"),
    ((0xB2, 0x01), "Continuous"),

    // Speaker impedance
    ((0xB3, 0x00), "8 ohm"),
    ((0xB3, 0x01), "6 ohm"),

    // Remote sensor (IR)
    ((0xB9, 0x00), "On"),
    ((0xB9, 0x01), "Off"),

    // Bi-Amp
    ((0xBB, 0x00), "On"),
    ((0xBB, 0x01), "Off"),

    // Wake on RS232
    ((0xBD, 0x00), "No"),
    ((0xBD, 0x01), "Yes"),
];

/// Display-text types as `(id, name)`.
///
/// Display identifiers are a separate numbering space from reports.
pub static DISPLAYS: &[(u8, &str)] = &[
    (0x00, "TunerFrequency"),
    (0x01, "MainVolume"),
    (0x02, "Zone2Volume"),
    (0x03, "MainInput"),
    (0x04, "Zone2Input"),
    (0x05, "Zone3Volume"),
    (0x06, "Zone3Input"),
    (0xF0, "OperationCode"),
    (0xFF, "Versions"),
];

/// Reports whose value is a volume level in half-decibel steps.
pub const VOLUME_REPORTS: [u8; 3] = [id::MAIN_VOLUME, id::ZONE2_VOLUME, id::ZONE3_VOLUME];

/// Raw volume value corresponding to 0 dB.
const VOLUME_ZERO_DB: i16 = 0xC7;

static REPORT_INDEX: LazyLock<HashMap<u8, &'static str>> =
    LazyLock::new(|| REPORTS.iter().copied().collect());

static VALUE_INDEX: LazyLock<HashMap<(u8, u8), &'static str>> =
    LazyLock::new(|| VALUES.iter().copied().collect());

static DISPLAY_INDEX: LazyLock<HashMap<u8, &'static str>> =
    LazyLock::new(|| DISPLAYS.iter().copied().collect());

/// Symbolic name of report `id`.
pub fn report_name(id: u8) -> Option<&'static str> {
    REPORT_INDEX.get(&id).copied()
}

/// Symbolic name of display-text type `id`.
pub fn display_name(id: u8) -> Option<&'static str> {
    DISPLAY_INDEX.get(&id).copied()
}

/// Table text for `value` of report `id`.
pub fn value_name(id: u8, value: u8) -> Option<&'static str> {
    VALUE_INDEX.get(&(id, value)).copied()
}

/// Whether report `id` carries a volume level.
pub fn is_volume(id: u8) -> bool {
    VOLUME_REPORTS.contains(&id)
}

/// Decibel string for a raw volume value: `(value - 199) / 2` with one
/// decimal place.
///
/// ```
/// use rxvlib_yamaha::reports::volume_db;
///
/// assert_eq!(volume_db(0xC8), "0.5 dB");
/// assert_eq!(volume_db(0x27), "-80.0 dB");
/// ```
pub fn volume_db(value: u8) -> String {
    let half_steps = i16::from(value) - VOLUME_ZERO_DB;
    let db = f32::from(half_steps) / 2.0;
    format!("{db:.1} dB")
}

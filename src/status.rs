//! The fixed 32-byte status frame and its derived views.

use crate::error::{Error, Result};
use crate::values::{
    self, Value, additional_error, error_information, phase_type, printing_phase, ready_phase,
};

/// Size of a status reply in bytes.
pub const FRAME_LEN: usize = 32;

/// One fixed-size status reply from the printer.
///
/// Keeps the raw bytes and decodes fields on access. Every coded field goes
/// through its value space, so a code this library does not know still comes
/// back as a well-formed undefined value instead of failing the decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    raw: [u8; FRAME_LEN],
}

impl Status {
    /// Decode a status reply. The only way this fails is a length other
    /// than the fixed 32 bytes; field values never reject.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let raw: [u8; FRAME_LEN] = data.try_into().map_err(|_| Error::Format {
            expected: FRAME_LEN,
            actual: data.len(),
        })?;
        Ok(Status { raw })
    }

    pub fn raw(&self) -> &[u8; FRAME_LEN] {
        &self.raw
    }

    fn be16(&self, offset: usize) -> u16 {
        u16::from_be_bytes([self.raw[offset], self.raw[offset + 1]])
    }

    /// Offset 0: always 0x80.
    pub fn head_mark(&self) -> u8 {
        self.raw[0]
    }

    /// Offset 1: size of this frame, always 32.
    pub fn frame_size(&self) -> u8 {
        self.raw[1]
    }

    /// Offset 2: always b'B'.
    pub fn vendor_code(&self) -> u8 {
        self.raw[2]
    }

    /// Offset 3: two bytes describing the series and the model.
    pub fn model(&self) -> Value {
        values::model::SPACE.get(self.be16(3))
    }

    /// Offset 5: country code, always b'0'.
    pub fn country_code(&self) -> u8 {
        self.raw[5]
    }

    /// Offset 6: battery level.
    pub fn battery_level(&self) -> Value {
        values::battery_level::SPACE.get(self.raw[6] as u16)
    }

    /// Offset 7: additional error code (PT-P9 series only).
    pub fn extended_error(&self) -> Value {
        additional_error::SPACE.get(self.raw[7] as u16)
    }

    /// Offset 8: two-byte bitmask describing errors.
    pub fn error_information(&self) -> u16 {
        self.be16(8)
    }

    /// Offset 10: media width in millimeters.
    pub fn media_width_mm(&self) -> u8 {
        self.raw[10]
    }

    /// Offset 11: media type.
    pub fn media_type(&self) -> Value {
        values::media_type::SPACE.get(self.raw[11] as u16)
    }

    /// Offset 12: number of colors, always 0.
    pub fn color_count(&self) -> u8 {
        self.raw[12]
    }

    /// Offset 13: high byte of the media length (TD-4D series only; PT
    /// series documentation calls this byte "fonts" and always sets it 0).
    pub fn media_length_msb(&self) -> u8 {
        self.raw[13]
    }

    /// Offset 14: media sensor value (TD-4D series only).
    pub fn media_sensor(&self) -> u8 {
        self.raw[14]
    }

    /// Offset 15: mode.
    pub fn mode(&self) -> u8 {
        self.raw[15]
    }

    /// Offset 16: density, always 0.
    pub fn density(&self) -> u8 {
        self.raw[16]
    }

    /// Offset 17: media length in millimeters; low byte of a two-byte value
    /// on the TD-4D series.
    pub fn media_length_lsb(&self) -> u8 {
        self.raw[17]
    }

    /// Offset 18: why the printer sent this frame.
    pub fn status_type(&self) -> Value {
        values::status_type::SPACE.get(self.raw[18] as u16)
    }

    /// Offset 19: printing phase.
    pub fn phase_type(&self) -> Value {
        phase_type::SPACE.get(self.raw[19] as u16)
    }

    /// Offset 20: two-byte phase number; interpretation depends on the
    /// phase type (see [`Status::phase`]).
    pub fn phase_number(&self) -> u16 {
        self.be16(20)
    }

    /// Offset 22: notification code.
    pub fn notification(&self) -> Value {
        values::notification::SPACE.get(self.raw[22] as u16)
    }

    /// Offset 23: expansion area length in bytes, always 0.
    pub fn expansion_length(&self) -> u8 {
        self.raw[23]
    }

    /// Offset 24: tape color (PT series only).
    pub fn tape_color(&self) -> Value {
        values::tape_color::SPACE.get(self.raw[24] as u16)
    }

    /// Offset 25: text color (PT series only).
    pub fn text_color(&self) -> Value {
        values::text_color::SPACE.get(self.raw[25] as u16)
    }

    /// Offset 26: four-byte bitmask describing hardware settings (some PT
    /// models only).
    pub fn hardware_settings(&self) -> u32 {
        u32::from_be_bytes([self.raw[26], self.raw[27], self.raw[28], self.raw[29]])
    }

    /// Active error conditions, in reporting order: every set bit of the
    /// error bitmask in declared order, then the extended error when a
    /// PT-P9 series model reports one. Empty means no error condition.
    pub fn errors(&self) -> Vec<Value> {
        let mask = self.error_information();
        let mut errors: Vec<Value> = error_information::SPACE
            .iter()
            .filter(|e| e.code() & mask != 0)
            .collect();

        if values::model::PT_P9_SERIES.contains(&self.model().code()) {
            let extended = self.extended_error();
            if !extended.is(&additional_error::NONE) {
                errors.push(extended);
            }
        }

        errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Effective media length in millimeters. The TD-4D series reports a
    /// two-byte big-endian value split across offsets 13 and 17; every
    /// other model uses the single byte at offset 17.
    pub fn media_length(&self) -> u16 {
        if values::model::TD_4D_SERIES.contains(&self.model().code()) {
            u16::from_be_bytes([self.media_length_msb(), self.media_length_lsb()])
        } else {
            self.media_length_lsb() as u16
        }
    }

    /// Phase type paired with the phase-number interpretation that type
    /// selects. Unrecognized phase types pair with no interpreted number.
    pub fn phase(&self) -> (Value, Option<Value>) {
        let ty = self.phase_type();
        if ty.is(&phase_type::READY) {
            (ty, Some(ready_phase::SPACE.get(self.phase_number())))
        } else if ty.is(&phase_type::PRINTING) {
            (ty, Some(printing_phase::SPACE.get(self.phase_number())))
        } else {
            (ty, None)
        }
    }
}

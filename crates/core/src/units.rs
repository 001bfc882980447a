//! Conversion from EMU (English Metric Units) to pixels.
//!
//! 914400 EMU make one inch and pixels are taken at 96 DPI, so one pixel is
//! exactly 9525 EMU.

use crate::{Error, Result};

/// EMU per pixel at 96 DPI.
pub const EMU_PER_PIXEL: i64 = 9525;

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Convert a length in EMU to the nearest whole pixel, rounding halves up.
pub fn emu_to_px(emu: i64) -> i64 {
    // floor(emu / 9525 + 1/2); the remainder test cannot overflow for any i64
    let whole = emu.div_euclid(EMU_PER_PIXEL);
    let remainder = emu.rem_euclid(EMU_PER_PIXEL);
    if 2 * remainder >= EMU_PER_PIXEL {
        whole + 1
    } else {
        whole
    }
}

/// Parse an EMU attribute value.
///
/// Lengths must be integers; anything else is reported rather than coerced.
pub fn parse_emu(attribute: &str, value: &str) -> Result<i64> {
    parse_integer(attribute, value)
}

/// Parse an EMU attribute value and convert it to pixels.
pub fn parse_px(attribute: &str, value: &str) -> Result<i64> {
    parse_emu(attribute, value).map(emu_to_px)
}

/// Parse an integer attribute value such as a font size or guide value.
pub fn parse_integer(attribute: &str, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| Error::InvalidNumber {
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

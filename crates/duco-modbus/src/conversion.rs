// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Conversion between bus words and engineering values.
//!
//! ```text
//! words ──decode_words──▶ RawValue ──format_scaled──▶ FormattedValue
//!                                    scale * raw + offset
//! ```
//!
//! The decode rules follow the device family:
//!
//! | Encoding | Words | Rule                                         |
//! |----------|-------|----------------------------------------------|
//! | Integer  | 1     | two's complement over 16 bits                |
//! | Integer  | 2     | `sum(word[i] << 16*i)`, no sign correction   |
//! | Float32  | 2     | words joined big-endian, IEEE-754 single     |
//!
//! The two-word integer path is unsigned while the one-word path is signed.
//! Existing installations rely on that asymmetry, so it is kept as is.

use crate::error::{ConversionError, ModbusError, ModbusResult, OperationError};
use crate::types::{Encoding, FormattedValue, RegisterSpec};

/// Smallest raw value accepted by [`encode_word`].
pub const MIN_WORD_VALUE: i32 = i16::MIN as i32;

/// Largest raw value accepted by [`encode_word`].
pub const MAX_WORD_VALUE: i32 = u16::MAX as i32;

// =============================================================================
// Two's complement
// =============================================================================

/// Interprets the low `bits` bits of `value` as a two's-complement integer.
///
/// `bits` is clamped to `1..=32`; bits above the width are ignored.
///
/// ```
/// use duco_modbus::conversion::twos_complement;
///
/// assert_eq!(twos_complement(0x7FFF, 16), 32767);
/// assert_eq!(twos_complement(0xFFFF, 16), -1);
/// assert_eq!(twos_complement(0x80, 8), -128);
/// ```
pub fn twos_complement(value: u32, bits: u32) -> i64 {
    let bits = bits.clamp(1, 32);
    let modulus = 1i64 << bits;
    let value = i64::from(value) & (modulus - 1);

    if value & (1i64 << (bits - 1)) != 0 {
        value - modulus
    } else {
        value
    }
}

// =============================================================================
// RawValue
// =============================================================================

/// A decoded number before scale and offset are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    /// Integer payload.
    Integer(i64),
    /// IEEE-754 single payload.
    Float(f32),
}

impl RawValue {
    /// Returns the value as `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(v) => *v as f64,
            Self::Float(v) => f64::from(*v),
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes the words returned for `spec` into a raw value.
///
/// Fails with a conversion error if the device returned fewer or more words
/// than the register spans, or if the layout is not decodable.
pub fn decode_words(spec: &RegisterSpec, words: &[u16]) -> ModbusResult<RawValue> {
    let expected = usize::from(spec.word_count);

    if words.len() < expected {
        return Err(ConversionError::insufficient_data(expected, words.len()).into());
    }
    if words.len() > expected {
        return Err(ConversionError::excess_data(expected, words.len()).into());
    }

    match (spec.encoding, words) {
        (Encoding::Integer, [word]) => Ok(RawValue::Integer(twos_complement(u32::from(*word), 16))),
        (Encoding::Integer, [_, _]) => {
            let raw = words
                .iter()
                .enumerate()
                .map(|(i, word)| u64::from(*word) << (16 * i))
                .sum::<u64>();
            Ok(RawValue::Integer(raw as i64))
        }
        (Encoding::Float32, [high, low]) => {
            let bytes = [high.to_be_bytes(), low.to_be_bytes()].concat();
            let bits = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            Ok(RawValue::Float(f32::from_bits(bits)))
        }
        (encoding, _) => Err(ConversionError::invalid_layout(format!(
            "{encoding} encoding over {} words",
            words.len()
        ))
        .into()),
    }
}

/// Applies scale and offset, then formats to the register's precision.
pub fn format_scaled(spec: &RegisterSpec, raw: RawValue) -> FormattedValue {
    FormattedValue::format(spec.scale * raw.as_f64() + spec.offset, spec.precision)
}

/// Decodes and formats in one step.
pub fn decode_value(spec: &RegisterSpec, words: &[u16]) -> ModbusResult<FormattedValue> {
    decode_words(spec, words).map(|raw| format_scaled(spec, raw))
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes a raw register-domain integer into a single bus word.
///
/// Negative values are stored as their 16-bit two's complement. Values
/// outside `-32768..=65535` are rejected.
pub fn encode_word(address: u16, value: i32) -> ModbusResult<u16> {
    if !(MIN_WORD_VALUE..=MAX_WORD_VALUE).contains(&value) {
        return Err(ModbusError::operation(OperationError::value_out_of_range(
            address,
            i64::from(value),
        )));
    }

    if value < 0 {
        Ok((value as i16) as u16)
    } else {
        Ok(value as u16)
    }
}

// =============================================================================
// Tests
// =============================================================================

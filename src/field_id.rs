// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// field_id: pack/unpack the (type_code, nth) tag into its 1–3 byte form
// (spec.md §4.4). A straight-line match on (type<16, nth<16) is used
// rather than clever bit arithmetic, per spec.md §9's design note; the
// inverse decode mirrors it by high/low nibble inspection.

use crate::definitions::{self, FieldDef, WireType};
use crate::error::{Result, XrplError};

/// Pack `(type_code, nth)` into its wire form.
pub fn pack(type_code: WireType, nth: u8) -> Result<Vec<u8>> {
    let t = type_code.code();
    if !(1..=255).contains(&t) {
        return Err(XrplError::UnsupportedFieldType {
            name: format!("{:?}", type_code),
            type_code: t,
        });
    }
    let t = t as u8;
    if nth == 0 {
        return Err(XrplError::UnsupportedFieldType {
            name: format!("{:?}", type_code),
            type_code: t as i32,
        });
    }

    Ok(match (t < 16, nth < 16) {
        (true, true) => vec![(t << 4) | nth],
        (false, true) => vec![nth, t],
        (true, false) => vec![t << 4, nth],
        (false, false) => vec![0x00, t, nth],
    })
}

/// Unpack a field tag from the front of `binary`, returning the field and
/// the number of bytes the tag consumed.
pub fn unpack(binary: &[u8]) -> Result<(FieldDef, usize)> {
    if binary.is_empty() {
        return Err(XrplError::UnknownField("empty field tag".into()));
    }
    let high = binary[0] >> 4;
    let low = binary[0] & 0x0F;

    let (type_code, nth, len) = if high != 0 {
        let nth = if low != 0 {
            low
        } else {
            *binary.get(1).ok_or_else(|| XrplError::UnknownField("truncated field tag".into()))?
        };
        (high, nth, if low != 0 { 1 } else { 2 })
    } else {
        let type_code = *binary.get(1).ok_or_else(|| XrplError::UnknownField("truncated field tag".into()))?;
        let nth = if low != 0 {
            low
        } else {
            *binary.get(2).ok_or_else(|| XrplError::UnknownField("truncated field tag".into()))?
        };
        (type_code, nth, if low != 0 { 2 } else { 3 })
    };

    let field = definitions::field_by_id(type_code, nth)
        .ok_or_else(|| XrplError::UnknownField(format!("type={type_code}, nth={nth}")))?;
    Ok((field, len))
}

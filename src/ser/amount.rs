// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// ser::amount: native (XRP drops) and issued-currency amount codec
// (spec.md §4.6). Issued-currency values are normalized to a
// (sign, mantissa, exponent) triple using plain base-10 digit-string
// arithmetic rather than binary floating point, per spec.md §9's design
// note — the mantissa always fits comfortably in a u64, so no
// arbitrary-precision integer crate is needed.

use crate::base58;
use crate::error::{Result, XrplError};
use crate::ser::primitives::{decode_u64, encode_u64};

const MIN_MANTISSA: u64 = 10u64.pow(15);
const MAX_MANTISSA: u64 = 10u64.pow(16) - 1;
const MIN_EXP: i32 = -96;
const MAX_EXP: i32 = 80;

const ISSUED_BIT: u64 = 0x8000_0000_0000_0000;
const POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;
const NATIVE_POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;
const MANTISSA_MASK: u64 = 0x003F_FFFF_FFFF_FFFF;

/// A transaction-tree amount value (spec.md §9's `Amount = Drops(i64) |
/// Issued{..}` tagged variant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    Drops(i64),
    Issued {
        /// Decimal literal, e.g. `"200000000"` or `"-1.5"`.
        value: String,
        code: String,
        issuer: String,
    },
}

impl Amount {
    pub fn drops(value: i64) -> Self {
        Self::Drops(value)
    }

    pub fn issued(value: impl Into<String>, code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self::Issued {
            value: value.into(),
            code: code.into(),
            issuer: issuer.into(),
        }
    }
}

/// Parse a decimal literal into `(negative, significant_digits, exponent)`
/// with `value == (-1)^negative * digits_as_integer * 10^exponent` and
/// `digits` free of leading/trailing zeros (empty iff the value is zero).
fn parse_decimal(input: &str) -> Result<(bool, String, i32)> {
    let input = input.trim();
    let (negative, rest) = match input.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let mut parts = rest.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next().unwrap_or("");

    if (int_part.is_empty() && frac_part.is_empty())
        || !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(XrplError::AmountType(format!("not a decimal literal: {input:?}")));
    }

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let mut exponent = -(frac_part.len() as i32);

    while digits.last() == Some(&b'0') {
        digits.pop();
        exponent += 1;
    }
    let leading_zeros = digits.iter().take_while(|&&b| b == b'0').count();
    digits.drain(..leading_zeros);

    let digits = String::from_utf8(digits).expect("ascii digits");
    Ok((negative, digits, exponent))
}

/// Normalize a decimal literal to the issued-currency `(sign, mantissa,
/// exponent)` triple described in spec.md §4.6, before range checks.
pub fn scale_to_xrp_amount(value: &str) -> Result<(bool, u64, i32)> {
    let (negative, digits, e0) = parse_decimal(value)?;
    if digits.is_empty() {
        return Ok((false, 0, 0));
    }

    let ndigits = digits.len() as i32;
    let exponent = e0 + ndigits - 16;
    let mantissa_str: String = if ndigits <= 16 {
        format!("{digits}{}", "0".repeat((16 - ndigits) as usize))
    } else {
        digits[..16].to_string()
    };
    let mantissa: u64 = mantissa_str.parse().expect("16-digit string fits in u64");

    Ok((negative, mantissa, exponent))
}

fn format_decimal(mantissa: u64, exponent: i32) -> String {
    let digits = mantissa.to_string();
    if exponent >= 0 {
        format!("{digits}{}", "0".repeat(exponent as usize))
    } else {
        let frac_len = (-exponent) as usize;
        if digits.len() > frac_len {
            let split = digits.len() - frac_len;
            format!("{}.{}", &digits[..split], &digits[split..])
        } else {
            format!("0.{}{digits}", "0".repeat(frac_len - digits.len()))
        }
    }
}

fn encode_currency(code: &str) -> Result<[u8; 20]> {
    if code.len() != 3 || !code.is_ascii() {
        return Err(XrplError::AmountType(format!(
            "currency code must be 3 ASCII characters: {code:?}"
        )));
    }
    let mut out = [0u8; 20];
    out[12..15].copy_from_slice(code.as_bytes());
    Ok(out)
}

fn decode_currency(data: &[u8]) -> Result<String> {
    let bytes = data
        .get(12..15)
        .ok_or_else(|| XrplError::AmountType("truncated currency code".into()))?;
    Ok(std::str::from_utf8(bytes)
        .map_err(|_| XrplError::AmountType("currency code is not ASCII".into()))?
        .to_string())
}

pub fn encode_amount(amount: &Amount) -> Result<Vec<u8>> {
    match amount {
        Amount::Drops(drops) => {
            let magnitude = drops.unsigned_abs();
            let header = if *drops >= 0 {
                magnitude | NATIVE_POSITIVE_BIT
            } else {
                magnitude
            };
            Ok(encode_u64(header))
        }
        Amount::Issued { value, code, issuer } => {
            let (negative, mantissa, exponent) = scale_to_xrp_amount(value)?;

            let mut header = ISSUED_BIT;
            if mantissa != 0 {
                if exponent < MIN_EXP || mantissa < MIN_MANTISSA {
                    // underflow to zero: only the issued-currency bit is set
                } else if exponent > MAX_EXP || mantissa > MAX_MANTISSA {
                    return Err(XrplError::AmountOutOfRange(format!(
                        "mantissa={mantissa}, exponent={exponent}"
                    )));
                } else {
                    if !negative {
                        header |= POSITIVE_BIT;
                    }
                    header |= ((exponent + 97) as u64) << 54;
                    header |= mantissa;
                }
            }

            let mut out = encode_u64(header);
            out.extend_from_slice(&encode_currency(code)?);
            out.extend_from_slice(&base58::decode_address(issuer)?);
            Ok(out)
        }
    }
}

pub fn decode_amount(data: &[u8]) -> Result<(Amount, usize)> {
    let first = *data.first().ok_or_else(|| XrplError::AmountType("empty amount".into()))?;
    if first & 0x80 == 0 {
        let (header, len) = decode_u64(data)?;
        let is_positive = header & NATIVE_POSITIVE_BIT != 0;
        let magnitude = (header & 0x3FFF_FFFF_FFFF_FFFF) as i64;
        let drops = if is_positive { magnitude } else { -magnitude };
        return Ok((Amount::Drops(drops), len));
    }

    let (header, _) = decode_u64(data)?;
    let is_positive = header & POSITIVE_BIT != 0;
    let exponent = ((header >> 54) & 0xFF) as i32 - 97;
    let mantissa = header & MANTISSA_MASK;

    let code = decode_currency(&data[8..28])?;
    let issuer_bytes = data
        .get(28..48)
        .ok_or_else(|| XrplError::AmountType("truncated issued amount".into()))?;
    let issuer = base58::encode_address(issuer_bytes)?;

    let value = if mantissa == 0 {
        "0".to_string()
    } else {
        let formatted = format_decimal(mantissa, exponent);
        if is_positive {
            formatted
        } else {
            format!("-{formatted}")
        }
    };

    Ok((Amount::Issued { value, code, issuer }, 48))
}

/// Convert a decimal XRP-denominated string to drops (1 XRP = 10^6 drops).
/// Supplemental helper (SPEC_FULL.md §4), not part of the codec proper.
pub fn xrp_to_drops(xrp: &str) -> Result<i64> {
    let (negative, digits, exponent) = parse_decimal(xrp)?;
    if digits.is_empty() {
        return Ok(0);
    }
    // shift the decimal point right by 6 (1 XRP = 1_000_000 drops)
    let shifted_exponent = exponent + 6;
    let drops_str = if shifted_exponent >= 0 {
        format!("{digits}{}", "0".repeat(shifted_exponent as usize))
    } else {
        let drop_digits = digits.len() as i32 + shifted_exponent;
        if drop_digits <= 0 {
            return Ok(0);
        }
        digits[..drop_digits as usize].to_string()
    };
    let magnitude: i64 = drops_str
        .parse()
        .map_err(|_| XrplError::AmountOutOfRange(format!("drops overflow for {xrp:?}")))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Convert a drops amount back to a decimal XRP string.
pub fn drops_to_xrp(drops: i64) -> String {
    let negative = drops < 0;
    let formatted = format_decimal(drops.unsigned_abs(), -6);
    if negative {
        format!("-{formatted}")
    } else {
        formatted
    }
}

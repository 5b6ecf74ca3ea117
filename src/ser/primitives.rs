// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// ser::primitives: fixed-width big-endian integers, fixed-length hashes,
// length-prefixed blobs, and AccountIDs (spec.md §4.5).

use crate::base58;
use crate::error::{Result, XrplError};

pub const MAX_BLOB_LEN: usize = 918_744;

/// Encode the VL length-prefix for a blob of `len` bytes (spec.md §4.5).
pub fn encode_vl_length(len: usize) -> Result<Vec<u8>> {
    if len <= 192 {
        Ok(vec![len as u8])
    } else if len <= 12_480 {
        let adjusted = len - 193;
        Ok(vec![(adjusted >> 8) as u8 + 193, (adjusted & 0xFF) as u8])
    } else if len <= MAX_BLOB_LEN {
        let adjusted = len - 12_481;
        Ok(vec![
            241 + (adjusted >> 16) as u8,
            ((adjusted >> 8) & 0xFF) as u8,
            (adjusted & 0xFF) as u8,
        ])
    } else {
        Err(XrplError::PayloadTooLong { len })
    }
}

/// Decode a VL length-prefix from the front of `data`, returning the
/// decoded length and the number of prefix bytes consumed.
pub fn decode_vl_length(data: &[u8]) -> Result<(usize, usize)> {
    let byte0 = *data.first().ok_or_else(|| XrplError::AddressFormat("empty VL prefix".into()))?;
    if byte0 <= 192 {
        Ok((byte0 as usize, 1))
    } else if byte0 <= 240 {
        let byte1 = *data.get(1).ok_or_else(|| XrplError::AddressFormat("truncated VL prefix".into()))?;
        Ok((193 + (byte0 as usize - 193) * 256 + byte1 as usize, 2))
    } else {
        let byte1 = *data.get(1).ok_or_else(|| XrplError::AddressFormat("truncated VL prefix".into()))?;
        let byte2 = *data.get(2).ok_or_else(|| XrplError::AddressFormat("truncated VL prefix".into()))?;
        Ok((
            12_481 + (byte0 as usize - 241) * 65_536 + byte1 as usize * 256 + byte2 as usize,
            3,
        ))
    }
}

pub fn encode_blob(value: &[u8]) -> Result<Vec<u8>> {
    if value.len() > MAX_BLOB_LEN {
        return Err(XrplError::PayloadTooLong { len: value.len() });
    }
    let mut out = encode_vl_length(value.len())?;
    out.extend_from_slice(value);
    Ok(out)
}

/// Returns the decoded blob and the total bytes consumed (prefix + body).
pub fn decode_blob(data: &[u8]) -> Result<(Vec<u8>, usize)> {
    let (len, prefix_len) = decode_vl_length(data)?;
    let end = prefix_len + len;
    let body = data
        .get(prefix_len..end)
        .ok_or_else(|| XrplError::AddressFormat("truncated blob".into()))?;
    Ok((body.to_vec(), end))
}

pub fn encode_account_id(address: &str) -> Result<Vec<u8>> {
    encode_blob(&base58::decode_address(address)?)
}

pub fn decode_account_id(data: &[u8]) -> Result<(String, usize)> {
    let (bytes, len) = decode_blob(data)?;
    Ok((base58::encode_address(&bytes)?, len))
}

pub fn encode_hash(value: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    if value.len() != expected_len {
        return Err(XrplError::AddressFormat(format!(
            "hash must be {expected_len} bytes, got {}",
            value.len()
        )));
    }
    Ok(value.to_vec())
}

pub fn decode_hash(data: &[u8], len: usize) -> Result<(Vec<u8>, usize)> {
    let body = data
        .get(..len)
        .ok_or_else(|| XrplError::AddressFormat("truncated hash".into()))?;
    Ok((body.to_vec(), len))
}

macro_rules! uint_codec {
    ($enc:ident, $dec:ident, $ty:ty) => {
        pub fn $enc(value: $ty) -> Vec<u8> {
            value.to_be_bytes().to_vec()
        }

        pub fn $dec(data: &[u8]) -> Result<($ty, usize)> {
            const LEN: usize = std::mem::size_of::<$ty>();
            let bytes = data
                .get(..LEN)
                .ok_or_else(|| XrplError::AddressFormat("truncated integer".into()))?;
            let mut arr = [0u8; LEN];
            arr.copy_from_slice(bytes);
            Ok((<$ty>::from_be_bytes(arr), LEN))
        }
    };
}

uint_codec!(encode_u8, decode_u8, u8);
uint_codec!(encode_u16, decode_u16, u16);
uint_codec!(encode_u32, decode_u32, u32);
uint_codec!(encode_u64, decode_u64, u64);

// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// base58: Base58Check encode/decode using the XRPL alphabet
//
// Functions:
//   encode_address()/decode_address() — version 0x00, 20-byte AccountID payload
//   encode_seed()/decode_seed()       — version 0x21, 16-byte family-seed payload

use sha2::{Digest, Sha256};

use crate::error::{Result, XrplError};

const ACCOUNT_VERSION: u8 = 0x00;
const SEED_VERSION: u8 = 0x21;

fn checksum(payload: &[u8]) -> [u8; 4] {
    let first = Sha256::digest(payload);
    let second = Sha256::digest(first);
    let mut out = [0u8; 4];
    out.copy_from_slice(&second[..4]);
    out
}

fn encode_versioned(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 4);
    data.push(version);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(&data));

    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

fn decode_versioned(encoded: &str, version: u8, payload_len: usize) -> Result<Vec<u8>> {
    let data = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .map_err(|e| XrplError::AddressFormat(e.to_string()))?;

    if data.len() < 5 {
        return Err(XrplError::AddressFormat("too short".into()));
    }
    let (body, check) = data.split_at(data.len() - 4);
    if checksum(body) != check {
        return Err(XrplError::AddressFormat("bad checksum".into()));
    }
    if body.len() != 1 + payload_len || body[0] != version {
        return Err(XrplError::AddressFormat(format!(
            "expected version {:#04x} and {} payload bytes",
            version, payload_len
        )));
    }
    Ok(body[1..].to_vec())
}

/// Encode a 20-byte AccountID as an `r...` address.
pub fn encode_address(account_id: &[u8]) -> Result<String> {
    if account_id.len() != 20 {
        return Err(XrplError::AddressFormat("AccountID must be 20 bytes".into()));
    }
    Ok(encode_versioned(ACCOUNT_VERSION, account_id))
}

/// Decode an `r...` address to its 20-byte AccountID.
pub fn decode_address(address: &str) -> Result<[u8; 20]> {
    let bytes = decode_versioned(address, ACCOUNT_VERSION, 20)?;
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Encode a 16-byte family seed as an `s...` secret.
pub fn encode_seed(seed: &[u8; 16]) -> String {
    encode_versioned(SEED_VERSION, seed)
}

/// Decode an `s...` family seed to its 16 raw bytes.
pub fn decode_seed(seed: &str) -> Result<[u8; 16]> {
    let bytes = decode_versioned(seed, SEED_VERSION, 16)?;
    let mut out = [0u8; 16];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // S1 — scenario vector from spec.md §8
    #[test]
    fn decode_address_vector() {
        let expected: [u8; 20] = [
            0xb5, 0xf7, 0x62, 0x79, 0x8a, 0x53, 0xd5, 0x43, 0xa0, 0x14, 0xca, 0xf8, 0xb2, 0x97,
            0xcf, 0xf8, 0xf2, 0xf9, 0x37, 0xe8,
        ];
        let decoded = decode_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn encode_address_vector() {
        let bytes: [u8; 20] = [
            0xb5, 0xf7, 0x62, 0x79, 0x8a, 0x53, 0xd5, 0x43, 0xa0, 0x14, 0xca, 0xf8, 0xb2, 0x97,
            0xcf, 0xf8, 0xf2, 0xf9, 0x37, 0xe8,
        ];
        assert_eq!(
            encode_address(&bytes).unwrap(),
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"
        );
    }

    #[test]
    fn address_roundtrip() {
        for b in [0u8, 1, 2, 255] {
            let bytes = [b; 20];
            let encoded = encode_address(&bytes).unwrap();
            assert_eq!(decode_address(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut addr = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".to_string();
        addr.pop();
        addr.push('x');
        assert!(decode_address(&addr).is_err());
    }

    #[test]
    fn rejects_wrong_version() {
        let seed_text = encode_seed(&[7u8; 16]);
        assert!(decode_address(&seed_text).is_err());
    }

    #[test]
    fn seed_roundtrip() {
        let seed = [0x71, 0xed, 0x06, 0x41, 0x55, 0xff, 0xad, 0xfa, 0x38, 0x78, 0x2c, 0x5e, 0x01, 0x58, 0xcb, 0x26];
        let encoded = encode_seed(&seed);
        assert_eq!(decode_seed(&encoded).unwrap(), seed);
    }

    // S2 — seed text vector from spec.md §8
    #[test]
    fn decode_seed_vector() {
        let decoded = decode_seed("shHM53KPZ87Gwdqarm1bAmPeXg8Tn").unwrap();
        let expected = [
            0x71, 0xed, 0x06, 0x41, 0x55, 0xff, 0xad, 0xfa, 0x38, 0x78, 0x2c, 0x5e, 0x01, 0x58,
            0xcb, 0x26,
        ];
        assert_eq!(decoded, expected);
    }
}

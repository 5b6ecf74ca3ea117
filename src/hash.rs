// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// hash: SHA-512/256 (first-half) and account-ID hashing primitives

use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// First 32 bytes of SHA-512 over the concatenation of `parts`.
pub fn first_half_of_sha512(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..32]);
    out
}

/// AccountID = RIPEMD160(SHA256(compressed_pubkey)).
pub fn account_id(compressed_pubkey: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(compressed_pubkey);
    let ripe = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripe);
    out
}

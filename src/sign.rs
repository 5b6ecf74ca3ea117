// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// sign: transaction hashing and ECDSA signing/verification (spec.md §4.11).
// Mirrors aioxrpy.hash (hash-prefixed digests) and aioxrpy.sign (canonical
// DER signatures over the secp256k1 curve).

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::Signature;

use crate::definitions::hash_prefix;
use crate::error::{Result, XrplError};
use crate::hash::first_half_of_sha512;
use crate::keys::XrplKeyPair;

fn prefixed_digest(prefix: u32, parts: &[&[u8]]) -> [u8; 32] {
    let prefix_bytes = prefix.to_be_bytes();
    let mut all: Vec<&[u8]> = Vec::with_capacity(parts.len() + 1);
    all.push(&prefix_bytes);
    all.extend_from_slice(parts);
    first_half_of_sha512(&all)
}

/// Digest signed by the transaction's own `SigningPubKey`/`TxnSignature`.
pub fn single_signing_hash(serialized_tx: &[u8]) -> [u8; 32] {
    prefixed_digest(hash_prefix::HASH_TX_SIGN, &[serialized_tx])
}

/// Digest signed by one entry of a `Signers` multi-sign array; the signer's
/// own 20-byte AccountID is folded in so one signature can't be replayed
/// under a different signer's identity.
pub fn multi_signing_hash(serialized_tx: &[u8], signer_account_id: &[u8; 20]) -> [u8; 32] {
    prefixed_digest(hash_prefix::HASH_TX_SIGN_MULTI, &[serialized_tx, signer_account_id])
}

/// The canonical transaction ID/hash: first-half-SHA-512 of the fully
/// signed, serialized transaction, under the `HASH_TX_ID` prefix.
pub fn transaction_id(serialized_signed_tx: &[u8]) -> [u8; 32] {
    prefixed_digest(hash_prefix::HASH_TX_ID, &[serialized_signed_tx])
}

fn canonicalize(signature: Signature) -> Signature {
    signature.normalize_s().unwrap_or(signature)
}

/// Sign a 32-byte prehashed digest, returning a canonical (low-S) DER
/// signature.
pub fn sign_prehash(key: &XrplKeyPair, digest: &[u8; 32]) -> Result<Vec<u8>> {
    let signing_key = key.signing_key()?;
    let signature: Signature = signing_key
        .sign_prehash(digest)
        .map_err(|_| XrplError::SignatureDecode)?;
    let signature = canonicalize(signature);
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify a DER-encoded signature over a 32-byte prehashed digest. Rejects
/// signatures that are well-formed but non-canonical (high-S), matching
/// `rippled`'s `FullyCanonicalSig` acceptance rule.
pub fn verify_prehash(key: &XrplKeyPair, digest: &[u8; 32], der_signature: &[u8]) -> Result<bool> {
    let signature = Signature::from_der(der_signature).map_err(|_| XrplError::SignatureDecode)?;
    if signature.normalize_s().is_some() {
        return Ok(false);
    }
    Ok(key.verifying_key().verify_prehash(digest, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_signing_hash_is_deterministic_and_prefix_sensitive() {
        let a = single_signing_hash(b"transaction bytes");
        let b = single_signing_hash(b"transaction bytes");
        assert_eq!(a, b);

        let signer = [0x11u8; 20];
        let multi = multi_signing_hash(b"transaction bytes", &signer);
        assert_ne!(a, multi);
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let key = XrplKeyPair::generate();
        let digest = single_signing_hash(b"payment from alice to bob");
        let der = sign_prehash(&key, &digest).unwrap();

        assert_eq!(der[0], 0x30); // DER SEQUENCE tag
        assert!(verify_prehash(&key, &digest, &der).unwrap());

        let other_digest = single_signing_hash(b"a different transaction");
        assert!(!verify_prehash(&key, &other_digest, &der).unwrap());
    }

    #[test]
    fn verify_only_key_cannot_sign() {
        let key = XrplKeyPair::generate();
        let pubkey_only = XrplKeyPair::from_public_key(&key.to_public()).unwrap();
        let digest = single_signing_hash(b"anything");
        assert!(matches!(
            sign_prehash(&pubkey_only, &digest),
            Err(XrplError::MissingPrivateKey)
        ));
    }

    // S4 — spec.md §8 names a fixed-nonce vector; k256's RFC 6979 nonce
    // derivation doesn't expose a way to force that nonce, so this instead
    // pins the property the vector exists to demonstrate: signatures this
    // module produces are always low-S and therefore accepted by
    // `verify_prehash`, which rejects the high-S twin of any valid signature.
    #[test]
    fn signatures_are_always_canonical() {
        let key = XrplKeyPair::generate();
        let digest = single_signing_hash(b"{\"Account\":\"ra5nK24KXen9AHvsdFTKHSANinZseWnPcX\"}");
        let der = sign_prehash(&key, &digest).unwrap();
        let signature = Signature::from_der(&der).unwrap();
        assert!(signature.normalize_s().is_none());
    }
}

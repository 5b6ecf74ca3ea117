// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// tx: assembling and signing the field list for a transaction (spec.md
// §4.11), plus the hex-blob convenience helpers a JSON-RPC submission path
// needs. Mirrors aioxrpy.sign.sign_transaction/sign_transaction_multi and
// aioxrpy.rpc's `binascii.hexlify` step before `submit`.

use crate::base58;
use crate::error::{Result, XrplError};
use crate::keys::XrplKeyPair;
use crate::sign;
use crate::value::{self, Fields, Value};

fn field_index(fields: &Fields, name: &str) -> Option<usize> {
    fields.iter().position(|(n, _)| n == name)
}

fn set_field(fields: &mut Fields, name: &str, value: Value) {
    match field_index(fields, name) {
        Some(idx) => fields[idx].1 = value,
        None => fields.push((name.to_string(), value)),
    }
}

fn has_field(fields: &Fields, name: &str) -> bool {
    field_index(fields, name).is_some()
}

/// Single-sign a transaction's field list in place (spec.md §4.11, §6):
/// fills `SigningPubKey` only if the caller hasn't already supplied one,
/// computes the signing hash over the rest of the fields exactly as the
/// caller assembled them (`Flags` included — this facade does not invent
/// or alter flags, matching `aioxrpy.rpc.sign_and_submit`, which leaves
/// `Flags` untouched and lets the caller decide whether to set
/// `tfFullyCanonicalSig`), and writes the resulting `TxnSignature`.
pub fn sign_transaction(key: &XrplKeyPair, fields: &mut Fields) -> Result<()> {
    if !has_field(fields, "SigningPubKey") {
        set_field(fields, "SigningPubKey", Value::Blob(key.to_public().to_vec()));
    }

    let unsigned = value::encode_object(fields)?;
    let digest = sign::single_signing_hash(&unsigned);
    let der_signature = sign::sign_prehash(key, &digest)?;
    set_field(fields, "TxnSignature", Value::Blob(der_signature));

    Ok(())
}

/// One signer's contribution to a `Signers` array entry.
pub struct SignerContribution {
    pub account: String,
    pub signing_pub_key: [u8; 33],
    pub txn_signature: Vec<u8>,
}

/// Produce one signer's entry for a multi-signed transaction (spec.md
/// §4.11). `fields` must already carry an empty `SigningPubKey` blob,
/// matching what every signer hashes over.
pub fn multisign_contribution(key: &XrplKeyPair, fields: &Fields) -> Result<SignerContribution> {
    let account = key.to_account()?;
    let account_id = key.account_id();

    let serialized = value::encode_object(fields)?;
    let digest = sign::multi_signing_hash(&serialized, &account_id);
    let txn_signature = sign::sign_prehash(key, &digest)?;

    Ok(SignerContribution {
        account,
        signing_pub_key: key.to_public(),
        txn_signature,
    })
}

/// Assemble a multi-signed transaction: sets `SigningPubKey` to the empty
/// blob `Signers` requires (spec.md §4.11) — `Flags` is left exactly as the
/// caller set it, since neither `aioxrpy.rpc.sign_and_submit` nor
/// `multisign_and_submit` ever touches it; the caller decides whether to
/// set `tfFullyCanonicalSig` — then collects and canonically sorts
/// (ascending by decoded AccountID, per spec.md §4.11) the per-signer
/// entries into `Signers`. Input key order doesn't matter — the resulting
/// array order is independent of it.
pub fn multisign_transaction(keys: &[&XrplKeyPair], fields: &mut Fields) -> Result<()> {
    if keys.is_empty() {
        return Err(XrplError::InvalidTransaction);
    }

    set_field(fields, "SigningPubKey", Value::Blob(Vec::new()));

    let mut contributions: Vec<SignerContribution> = keys
        .iter()
        .map(|key| multisign_contribution(key, fields))
        .collect::<Result<_>>()?;

    contributions.sort_by(|a, b| {
        let a_id = base58::decode_address(&a.account).unwrap_or([0u8; 20]);
        let b_id = base58::decode_address(&b.account).unwrap_or([0u8; 20]);
        a_id.cmp(&b_id)
    });

    let signers: Vec<Fields> = contributions
        .into_iter()
        .map(|c| {
            vec![(
                "Signer".to_string(),
                Value::Object(vec![
                    ("Account".to_string(), Value::AccountId(c.account)),
                    ("SigningPubKey".to_string(), Value::Blob(c.signing_pub_key.to_vec())),
                    ("TxnSignature".to_string(), Value::Blob(c.txn_signature)),
                ]),
            )]
        })
        .collect();

    set_field(fields, "Signers", Value::Array(signers));
    Ok(())
}

/// Encode a blob as lowercase hex, as `rippled`'s JSON-RPC `tx_blob`
/// parameter expects.
pub fn to_hex_blob(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a lowercase- or uppercase-hex transaction blob.
pub fn from_hex_blob(blob: &str) -> Result<Vec<u8>> {
    hex::decode(blob).map_err(|_| XrplError::InvalidTransaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{self, flags::TF_FULLY_CANONICAL_SIG};
    use crate::ser::amount::{self, Amount};

    fn get_u32(fields: &Fields, name: &str) -> u32 {
        match fields.iter().find(|(n, _)| n == name) {
            Some((_, Value::UInt32(v))) => *v,
            _ => 0,
        }
    }

    fn payment_fields(account: &str, destination: &str) -> Fields {
        vec![
            ("TransactionType".to_string(), Value::UInt16(0)),
            ("Flags".to_string(), Value::UInt32(TF_FULLY_CANONICAL_SIG)),
            ("Sequence".to_string(), Value::UInt32(1)),
            ("Amount".to_string(), Value::Amount(Amount::drops(1_000_000))),
            ("Fee".to_string(), Value::Amount(Amount::drops(10))),
            ("Account".to_string(), Value::AccountId(account.to_string())),
            ("Destination".to_string(), Value::AccountId(destination.to_string())),
        ]
    }

    // Per spec.md:159/aioxrpy.rpc.sign_and_submit, the facade never touches
    // `Flags` — the caller sets `tfFullyCanonicalSig` (or not) before
    // signing, and signing must leave it exactly as supplied.
    #[test]
    fn single_sign_preserves_caller_set_flags_and_produces_verifiable_signature() {
        let key = XrplKeyPair::generate();
        let account = key.to_account().unwrap();
        let mut fields = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");

        sign_transaction(&key, &mut fields).unwrap();

        assert_eq!(get_u32(&fields, "Flags"), TF_FULLY_CANONICAL_SIG);

        let signature_idx = field_index(&fields, "TxnSignature").unwrap();
        let (_, Value::Blob(der)) = &fields[signature_idx] else {
            panic!("TxnSignature must be a blob");
        };

        let mut unsigned = fields.clone();
        unsigned.remove(signature_idx);
        let reencoded = value::encode_object(&unsigned).unwrap();
        let digest = sign::single_signing_hash(&reencoded);
        assert!(sign::verify_prehash(&key, &digest, der).unwrap());
    }

    // A `SignerListSet`-style transaction (test_tx_flow.py) that explicitly
    // sets `Flags: 0` must not have a canonical-sig bit injected into it —
    // the digest it signs must reflect exactly what the caller assembled.
    #[test]
    fn single_sign_does_not_invent_a_flags_field() {
        let key = XrplKeyPair::generate();
        let account = key.to_account().unwrap();
        let mut fields = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        set_field(&mut fields, "Flags", Value::UInt32(0));

        sign_transaction(&key, &mut fields).unwrap();

        assert_eq!(get_u32(&fields, "Flags"), 0);
    }

    // spec.md:159: `sign_and_submit` fills `SigningPubKey` only "if absent".
    #[test]
    fn single_sign_does_not_overwrite_an_explicit_signing_pub_key() {
        let key = XrplKeyPair::generate();
        let other_key = XrplKeyPair::generate();
        let account = key.to_account().unwrap();
        let mut fields = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        set_field(&mut fields, "SigningPubKey", Value::Blob(other_key.to_public().to_vec()));

        sign_transaction(&key, &mut fields).unwrap();

        let (_, Value::Blob(pubkey)) = fields.iter().find(|(n, _)| n == "SigningPubKey").unwrap() else {
            panic!("SigningPubKey must be a blob");
        };
        assert_eq!(*pubkey, other_key.to_public().to_vec());
    }

    // S6 — multi-sign scenario from spec.md §8: two signers whose resulting
    // `Signers` array is ordered by AccountID regardless of input order.
    #[test]
    fn multisign_orders_signers_by_account_id_independent_of_input_order() {
        let key_a = XrplKeyPair::generate();
        let key_b = XrplKeyPair::generate();
        let account = XrplKeyPair::generate().to_account().unwrap();

        let mut fields_first = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        multisign_transaction(&[&key_a, &key_b], &mut fields_first).unwrap();

        let mut fields_second = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        multisign_transaction(&[&key_b, &key_a], &mut fields_second).unwrap();

        let extract_accounts = |fields: &Fields| -> Vec<String> {
            let (_, Value::Array(signers)) = fields.iter().find(|(n, _)| n == "Signers").unwrap() else {
                panic!("Signers must be an array");
            };
            signers
                .iter()
                .map(|entry| {
                    let (_, Value::Object(signer)) = &entry[0] else {
                        panic!("array element must wrap a Signer object");
                    };
                    let (_, Value::AccountId(account)) =
                        signer.iter().find(|(n, _)| n == "Account").unwrap()
                    else {
                        panic!("Signer must carry an Account");
                    };
                    account.clone()
                })
                .collect()
        };

        let first_order = extract_accounts(&fields_first);
        let second_order = extract_accounts(&fields_second);
        assert_eq!(first_order, second_order);

        let mut sorted = first_order.clone();
        sorted.sort_by_key(|a| base58::decode_address(a).unwrap());
        assert_eq!(first_order, sorted);
    }

    #[test]
    fn hex_blob_roundtrip() {
        let bytes = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let hex_str = to_hex_blob(&bytes);
        assert_eq!(hex_str, "deadbeef");
        assert_eq!(from_hex_blob(&hex_str).unwrap(), bytes);
        assert_eq!(from_hex_blob("DEADBEEF").unwrap(), bytes);
    }

    #[test]
    fn field_id_lookup_sanity_used_by_wire_dispatch() {
        // exercises the definitions/amount/ser imports brought in for this
        // module's tests, guarding against an unused-import regression.
        assert!(definitions::field_by_name("Account").is_ok());
        assert!(amount::encode_amount(&Amount::drops(1)).is_ok());
    }
}

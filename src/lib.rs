// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// xrpl-core: binary serialization codec, SECP256k1 family-seed key
// derivation, and the transaction-signing pipeline for the XRP Ledger.
//
// Modules:
//   error        — XrplError, the crate-wide Result alias
//   base58       — Base58Check-XRPL address and family-seed encoding
//   hash         — SHA-512/256 (first-half) and AccountID hashing
//   definitions  — the field dictionary, transaction types, hash prefixes
//   field_id     — the 1-3 byte field-ID tag codec
//   ser          — primitive/amount/pathset wire codecs
//   value        — the recursive transaction-tree value type and codec
//   keys         — family-seed key derivation, XrplKeyPair
//   sign         — hash-prefixed digests and canonical ECDSA signatures
//   tx           — assembling and (multi-)signing a transaction's fields
//   rpc          — the RippleRpc submission facade trait

pub mod base58;
pub mod definitions;
pub mod error;
pub mod field_id;
pub mod hash;
pub mod keys;
pub mod rpc;
pub mod ser;
pub mod sign;
pub mod tx;
pub mod value;

pub use definitions::{flags, hash_prefix, TransactionResultCategory, TransactionType};
pub use error::{Result, XrplError};
pub use keys::XrplKeyPair;
pub use rpc::RippleRpc;
pub use value::{Fields, Value};

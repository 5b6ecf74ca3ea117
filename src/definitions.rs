// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// definitions: the static field dictionary (types, fields, transaction
// types, result categories, hash prefixes), loaded once per process from
// a literal definitions table compiled into the crate.
//
// Mirrors aioxrpy.definitions, which loads the same information from a
// bundled definitions.json at import time; this crate bakes the table in
// as a Rust literal instead, since a signing core has no business reading
// files off disk.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Result, XrplError};

/// XRPL wire types (spec.md §6). Meta types and `Done`/`Unknown` are never
/// emitted on the wire but are retained so the field dictionary can
/// recognize and reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum WireType {
    NotPresent = 0,
    UInt16 = 1,
    UInt32 = 2,
    UInt64 = 3,
    Hash128 = 4,
    Hash256 = 5,
    Amount = 6,
    Blob = 7,
    AccountId = 8,
    StObject = 14,
    StArray = 15,
    UInt8 = 16,
    Hash160 = 17,
    PathSet = 18,
    Vector256 = 19,
    Transaction = 10001,
    LedgerEntry = 10002,
    Validation = 10003,
    Done = -1,
    Unknown = -2,
}

impl WireType {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// The byte used when packing/unpacking field IDs; only meaningful for
    /// types that are actually serialized (1..=255).
    fn wire_byte(self) -> Option<u8> {
        let code = self.code();
        if (1..=255).contains(&code) {
            Some(code as u8)
        } else {
            None
        }
    }

    fn from_wire_byte(byte: u8) -> Option<Self> {
        Self::from_code(byte as i32)
    }

    fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::NotPresent,
            1 => Self::UInt16,
            2 => Self::UInt32,
            3 => Self::UInt64,
            4 => Self::Hash128,
            5 => Self::Hash256,
            6 => Self::Amount,
            7 => Self::Blob,
            8 => Self::AccountId,
            14 => Self::StObject,
            15 => Self::StArray,
            16 => Self::UInt8,
            17 => Self::Hash160,
            18 => Self::PathSet,
            19 => Self::Vector256,
            10001 => Self::Transaction,
            10002 => Self::LedgerEntry,
            10003 => Self::Validation,
            -1 => Self::Done,
            -2 => Self::Unknown,
            _ => return None,
        })
    }
}

/// An immutable field descriptor (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub type_code: WireType,
    pub nth: u8,
    pub is_serialized: bool,
    pub is_signing_field: bool,
    pub is_vl_encoded: bool,
}

impl FieldDef {
    /// The 1–3 byte field-ID tag (spec.md §4.4).
    pub fn field_id(&self) -> Result<Vec<u8>> {
        crate::field_id::pack(self.type_code, self.nth)
    }
}

/// `(name, type, nth, is_serialized, is_signing_field, is_vl_encoded)`
///
/// A representative slice of rippled's public `definitions.json`, wide
/// enough to serialize a Payment (with Memos, Paths, multi-signing) and
/// the other transaction shapes exercised by this crate's tests.
const FIELD_TABLE: &[(&str, WireType, u8, bool, bool, bool)] = &[
    // framing markers — never constructed by callers, only recognized by
    // the object/array decoder (spec.md §4.3, §4.8)
    ("ObjectEndMarker", WireType::StObject, 1, true, true, false),
    ("ArrayEndMarker", WireType::StArray, 1, true, true, false),

    // UInt16
    ("LedgerEntryType", WireType::UInt16, 1, true, false, false),
    ("TransactionType", WireType::UInt16, 2, true, true, false),
    ("SignerWeight", WireType::UInt16, 3, true, true, false),
    ("TransferFee", WireType::UInt16, 4, true, true, false),
    ("Version", WireType::UInt16, 16, true, true, false),

    // UInt32
    ("Flags", WireType::UInt32, 2, true, true, false),
    ("SourceTag", WireType::UInt32, 3, true, true, false),
    ("Sequence", WireType::UInt32, 4, true, true, false),
    ("PreviousTxnLgrSeq", WireType::UInt32, 5, true, false, false),
    ("LedgerSequence", WireType::UInt32, 6, true, false, false),
    ("CloseTime", WireType::UInt32, 7, true, false, false),
    ("ParentCloseTime", WireType::UInt32, 8, true, false, false),
    ("SigningTime", WireType::UInt32, 9, true, false, false),
    ("Expiration", WireType::UInt32, 10, true, true, false),
    ("TransferRate", WireType::UInt32, 11, true, true, false),
    ("WalletSize", WireType::UInt32, 12, true, false, false),
    ("OwnerCount", WireType::UInt32, 13, true, false, false),
    ("DestinationTag", WireType::UInt32, 14, true, true, false),
    ("OfferSequence", WireType::UInt32, 25, true, true, false),
    ("FirstLedgerSequence", WireType::UInt32, 26, true, true, false),
    ("LastLedgerSequence", WireType::UInt32, 27, true, true, false),
    ("SetFlag", WireType::UInt32, 33, true, true, false),
    ("ClearFlag", WireType::UInt32, 34, true, true, false),
    ("SignerQuorum", WireType::UInt32, 35, true, true, false),
    ("CancelAfter", WireType::UInt32, 36, true, true, false),
    ("FinishAfter", WireType::UInt32, 37, true, true, false),
    ("SettleDelay", WireType::UInt32, 39, true, true, false),
    ("TicketSequence", WireType::UInt32, 41, true, true, false),

    // UInt64
    ("IndexNext", WireType::UInt64, 1, true, false, false),
    ("IndexPrevious", WireType::UInt64, 2, true, false, false),
    ("BookNode", WireType::UInt64, 3, true, false, false),
    ("OwnerNode", WireType::UInt64, 4, true, false, false),
    ("BaseFee", WireType::UInt64, 5, true, false, false),
    ("ExchangeRate", WireType::UInt64, 6, true, false, false),

    // Hash128
    ("EmailHash", WireType::Hash128, 1, true, true, false),

    // Hash256
    ("LedgerHash", WireType::Hash256, 1, true, false, false),
    ("ParentHash", WireType::Hash256, 2, true, false, false),
    ("TransactionHash", WireType::Hash256, 3, true, false, false),
    ("AccountHash", WireType::Hash256, 4, true, false, false),
    ("PreviousTxnID", WireType::Hash256, 5, true, true, false),
    ("AccountTxnID", WireType::Hash256, 9, true, true, false),
    ("InvoiceID", WireType::Hash256, 17, true, true, false),
    ("CheckID", WireType::Hash256, 24, true, true, false),

    // Amount
    ("Amount", WireType::Amount, 1, true, true, false),
    ("Balance", WireType::Amount, 2, true, false, false),
    ("LimitAmount", WireType::Amount, 3, true, true, false),
    ("TakerPays", WireType::Amount, 4, true, true, false),
    ("TakerGets", WireType::Amount, 5, true, true, false),
    ("LowLimit", WireType::Amount, 6, true, false, false),
    ("HighLimit", WireType::Amount, 7, true, false, false),
    ("Fee", WireType::Amount, 8, true, true, false),
    ("SendMax", WireType::Amount, 9, true, true, false),
    ("DeliverMin", WireType::Amount, 10, true, true, false),

    // Blob (all VL-encoded)
    ("PublicKey", WireType::Blob, 1, true, true, true),
    ("MessageKey", WireType::Blob, 2, true, true, true),
    ("SigningPubKey", WireType::Blob, 3, true, true, true),
    ("TxnSignature", WireType::Blob, 4, true, false, true),
    ("URI", WireType::Blob, 5, true, true, true),
    ("Signature", WireType::Blob, 6, true, true, true),
    ("Domain", WireType::Blob, 7, true, true, true),
    ("MemoType", WireType::Blob, 12, true, true, true),
    ("MemoData", WireType::Blob, 13, true, true, true),
    ("MemoFormat", WireType::Blob, 14, true, true, true),
    ("Fulfillment", WireType::Blob, 16, true, true, true),
    ("Condition", WireType::Blob, 17, true, true, true),

    // AccountID (VL-encoded length-prefixed blob of the 20-byte form)
    ("Account", WireType::AccountId, 1, true, true, true),
    ("Owner", WireType::AccountId, 2, true, true, true),
    ("Destination", WireType::AccountId, 3, true, true, true),
    ("Issuer", WireType::AccountId, 4, true, true, true),
    ("Authorize", WireType::AccountId, 5, true, true, true),
    ("Unauthorize", WireType::AccountId, 6, true, true, true),
    ("RegularKey", WireType::AccountId, 8, true, true, true),

    // STObject (nested objects)
    ("Memo", WireType::StObject, 10, true, true, false),
    ("SignerEntry", WireType::StObject, 11, true, true, false),
    ("Signer", WireType::StObject, 16, true, true, false),

    // STArray
    ("Signers", WireType::StArray, 3, true, false, false),
    ("SignerEntries", WireType::StArray, 4, true, true, false),
    ("Memos", WireType::StArray, 9, true, true, false),

    // UInt8
    ("CloseResolution", WireType::UInt8, 1, true, false, false),
    ("Method", WireType::UInt8, 2, true, true, false),
    ("TransactionResult", WireType::UInt8, 3, true, false, false),
    ("TickSize", WireType::UInt8, 16, true, true, false),

    // Hash160
    ("TakerPaysCurrency", WireType::Hash160, 1, true, true, false),
    ("TakerPaysIssuer", WireType::Hash160, 2, true, true, false),
    ("TakerGetsCurrency", WireType::Hash160, 3, true, true, false),
    ("TakerGetsIssuer", WireType::Hash160, 4, true, true, false),

    // PathSet
    ("Paths", WireType::PathSet, 1, true, true, false),

    // Vector256
    ("Indexes", WireType::Vector256, 1, true, false, true),
    ("Hashes", WireType::Vector256, 2, true, false, true),
    ("Amendments", WireType::Vector256, 3, true, false, true),
];

fn build_fields() -> HashMap<&'static str, FieldDef> {
    FIELD_TABLE
        .iter()
        .map(|&(name, type_code, nth, is_serialized, is_signing_field, is_vl_encoded)| {
            (
                name,
                FieldDef {
                    name,
                    type_code,
                    nth,
                    is_serialized,
                    is_signing_field,
                    is_vl_encoded,
                },
            )
        })
        .collect()
}

fn build_lookup() -> HashMap<(u8, u8), FieldDef> {
    FIELDS
        .values()
        .filter_map(|f| f.type_code.wire_byte().map(|tb| ((tb, f.nth), *f)))
        .collect()
}

/// Field dictionary, by name — populated once at first access.
pub static FIELDS: Lazy<HashMap<&'static str, FieldDef>> = Lazy::new(|| {
    tracing::trace!("loading XRPL field dictionary");
    build_fields()
});

/// Field dictionary, by `(type_code, nth)` — for the decoder.
pub static FIELDS_BY_ID: Lazy<HashMap<(u8, u8), FieldDef>> = Lazy::new(build_lookup);

/// Look up a field by name, as required to encode a mapping key.
pub fn field_by_name(name: &str) -> Result<FieldDef> {
    FIELDS
        .get(name)
        .copied()
        .ok_or_else(|| XrplError::UnknownField(name.to_string()))
}

/// Look up a field by its wire `(type_code, nth)` pair, as required to
/// decode a field tag.
pub fn field_by_id(type_code: u8, nth: u8) -> Option<FieldDef> {
    FIELDS_BY_ID.get(&(type_code, nth)).copied()
}

/// A representative subset of rippled's `TRANSACTION_TYPES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TransactionType {
    Payment = 0,
    EscrowCreate = 1,
    EscrowFinish = 2,
    AccountSet = 3,
    EscrowCancel = 4,
    SetRegularKey = 5,
    OfferCreate = 7,
    OfferCancel = 8,
    TicketCreate = 10,
    SignerListSet = 12,
    PaymentChannelCreate = 13,
    PaymentChannelFund = 14,
    PaymentChannelClaim = 15,
    CheckCreate = 16,
    CheckCash = 17,
    CheckCancel = 18,
    DepositPreauth = 19,
    TrustSet = 20,
    AccountDelete = 21,
}

/// The 3-letter engine-result prefix categories (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionResultCategory {
    Success,
    CostlyFailure,
    Failure,
    LocalFailure,
    MalformedFailure,
    RetriableFailure,
}

impl TransactionResultCategory {
    /// Split a `rippled` `engine_result` string (e.g. `"tesSUCCESS"`) into
    /// its category and the result code, mirroring
    /// `aioxrpy.rpc.RippleJsonRpc.submit`'s `engine_result[:3]` split.
    pub fn from_engine_result(engine_result: &str) -> Result<(Self, &str)> {
        if engine_result.len() < 3 {
            return Err(XrplError::UnknownRippleError(engine_result.to_string()));
        }
        let (prefix, code) = engine_result.split_at(3);
        let category = match prefix {
            "tes" => Self::Success,
            "tec" => Self::CostlyFailure,
            "tef" => Self::Failure,
            "tel" => Self::LocalFailure,
            "tem" => Self::MalformedFailure,
            "ter" => Self::RetriableFailure,
            _ => return Err(XrplError::UnknownRippleError(engine_result.to_string())),
        };
        Ok((category, code))
    }
}

/// 4-byte big-endian hash prefixes used by the signing pipeline (spec.md §4.11).
pub mod hash_prefix {
    pub const HASH_TX_SIGN: u32 = 0x5354_5800; // "STX\0"
    pub const HASH_TX_SIGN_MULTI: u32 = 0x534D_5400; // "SMT\0"
    pub const HASH_TX_ID: u32 = 0x5458_4E00; // "TXN\0"
}

/// `RippleTransactionFlags` from `aioxrpy.definitions`, carried over as a
/// convenience for building transactions (SPEC_FULL.md §4).
pub mod flags {
    pub const TF_FULLY_CANONICAL_SIG: u32 = 0x8000_0000;
}

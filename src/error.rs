// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// error: XRPL codec, key, and transport error kinds

use thiserror::Error;

pub type Result<T> = std::result::Result<T, XrplError>;

/// Errors produced by the codec, key-derivation, and signing core, plus
/// the transport-mapped errors a JSON-RPC facade surfaces from `rippled`.
#[derive(Debug, Error)]
pub enum XrplError {
    #[error("invalid XRPL address or seed encoding: {0}")]
    AddressFormat(String),

    #[error("field {name} has unsupported wire type {type_code}")]
    UnsupportedFieldType { name: String, type_code: i32 },

    #[error("unknown field name: {0}")]
    UnknownField(String),

    #[error("payload too long ({len} bytes, max 918744)")]
    PayloadTooLong { len: usize },

    #[error("amount mantissa/exponent out of canonical range: {0}")]
    AmountOutOfRange(String),

    #[error("amount value is neither an integer nor a well-formed issued-currency mapping: {0}")]
    AmountType(String),

    #[error("DER signature decode failed or signature is non-canonical")]
    SignatureDecode,

    #[error("signing requested on a verify-only key")]
    MissingPrivateKey,

    #[error("path set is missing its terminator byte")]
    MalformedPathSet,

    #[error("account not found")]
    AccountNotFound,

    #[error("invalid transaction")]
    InvalidTransaction,

    #[error("validated ledger unavailable")]
    ValidatedLedgerUnavailable,

    #[error("unknown rippled error: {0}")]
    UnknownRippleError(String),

    #[error("transaction engine result {code} (costly failure)")]
    CostlyFailure { code: String },

    #[error("transaction engine result {code} (failure)")]
    Failure { code: String },

    #[error("transaction engine result {code} (local failure)")]
    LocalFailure { code: String },

    #[error("transaction engine result {code} (malformed)")]
    MalformedFailure { code: String },

    #[error("transaction engine result {code} (retriable)")]
    RetriableFailure { code: String },
}

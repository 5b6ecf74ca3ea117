// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// rpc: the `RippleRpc` submission facade (spec.md §6, C12). The JSON-RPC
// transport itself is an external collaborator — this module only defines
// the trait boundary and the `sign_and_submit`/`multisign_and_submit`
// facades built on top of it, mirroring aioxrpy.rpc.RippleJsonRpc without
// committing this crate to a particular HTTP stack (the teacher's
// `wallet-ui/src/rpc/ripple.rs` proxies the same rippled methods over a
// fixed `reqwest`/wasm transport; this crate keeps that choice external).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as Json;

use crate::definitions::TransactionResultCategory;
use crate::error::{Result, XrplError};
use crate::keys::XrplKeyPair;
use crate::tx;
use crate::value::{Fields, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct FeeInfo {
    pub base: u64,
    pub median: u64,
    pub minimum: u64,
    pub open_ledger: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReserveInfo {
    pub base: u64,
    pub inc: u64,
}

/// A rippled JSON-RPC endpoint. Implementations own the actual HTTP
/// transport; this crate only needs the response shapes it parses.
#[async_trait]
pub trait RippleRpc: Send + Sync {
    async fn account_info(&self, account: &str, ledger_index: &str) -> Result<Json>;
    async fn fee(&self) -> Result<FeeInfo>;
    async fn ledger(&self, index: &str) -> Result<Json>;
    async fn ledger_accept(&self) -> Result<Json>;
    async fn ledger_closed(&self) -> Result<Json>;
    async fn server_info(&self) -> Result<Json>;
    async fn submit(&self, tx_blob: &str) -> Result<Json>;

    /// Current reserve requirement, read from `server_info`'s
    /// `validated_ledger` section.
    async fn get_reserve(&self) -> Result<ReserveInfo> {
        let info = self.server_info().await?;
        let validated_ledger = info
            .get("validated_ledger")
            .ok_or(XrplError::ValidatedLedgerUnavailable)?;
        let base = validated_ledger
            .get("reserve_base_xrp")
            .and_then(Json::as_u64)
            .ok_or(XrplError::ValidatedLedgerUnavailable)?;
        let inc = validated_ledger
            .get("reserve_inc_xrp")
            .and_then(Json::as_u64)
            .ok_or(XrplError::ValidatedLedgerUnavailable)?;
        Ok(ReserveInfo { base, inc })
    }
}

fn field_str(fields: &Fields, name: &str) -> Option<String> {
    fields.iter().find(|(n, _)| n == name).map(|(_, v)| match v {
        Value::AccountId(s) => s.clone(),
        _ => String::new(),
    })
}

fn set_sequence(fields: &mut Fields, sequence: u32) {
    match fields.iter_mut().find(|(n, _)| n == "Sequence") {
        Some((_, v)) => *v = Value::UInt32(sequence),
        None => fields.push(("Sequence".to_string(), Value::UInt32(sequence))),
    }
}

fn has_field(fields: &Fields, name: &str) -> bool {
    fields.iter().any(|(n, _)| n == name)
}

/// Raise the mapped category error for a non-success `engine_result`
/// (spec.md §7, mirroring `aioxrpy.rpc.RippleJsonRpc.submit`).
fn check_engine_result(result: &Json) -> Result<()> {
    let Some(engine_result) = result.get("engine_result").and_then(Json::as_str) else {
        return Ok(());
    };
    let (category, code) = TransactionResultCategory::from_engine_result(engine_result)?;
    match category {
        TransactionResultCategory::Success => Ok(()),
        TransactionResultCategory::CostlyFailure => Err(XrplError::CostlyFailure { code: code.to_string() }),
        TransactionResultCategory::Failure => Err(XrplError::Failure { code: code.to_string() }),
        TransactionResultCategory::LocalFailure => Err(XrplError::LocalFailure { code: code.to_string() }),
        TransactionResultCategory::MalformedFailure => Err(XrplError::MalformedFailure { code: code.to_string() }),
        TransactionResultCategory::RetriableFailure => Err(XrplError::RetriableFailure { code: code.to_string() }),
    }
}

/// Fill `Sequence` from `account_info(Account, ledger_index="current")` if
/// the caller didn't already supply one (spec.md §6).
async fn fill_sequence(rpc: &dyn RippleRpc, fields: &mut Fields) -> Result<()> {
    if has_field(fields, "Sequence") {
        return Ok(());
    }
    let account = field_str(fields, "Account").ok_or(XrplError::InvalidTransaction)?;
    let info = rpc.account_info(&account, "current").await?;
    let sequence = info
        .get("account_data")
        .and_then(|data| data.get("Sequence"))
        .and_then(Json::as_u64)
        .ok_or(XrplError::AccountNotFound)? as u32;
    set_sequence(fields, sequence);
    Ok(())
}

/// Sign, serialize, and submit a transaction with a single key (spec.md
/// §6, C12).
pub async fn sign_and_submit(rpc: &dyn RippleRpc, key: &XrplKeyPair, mut fields: Fields) -> Result<Json> {
    fill_sequence(rpc, &mut fields).await?;
    tx::sign_transaction(key, &mut fields)?;

    let serialized = crate::value::encode_object(&fields)?;
    let tx_blob = tx::to_hex_blob(&serialized);

    tracing::debug!(tx_blob = %tx_blob, "submitting signed transaction");
    let result = rpc.submit(&tx_blob).await?;
    check_engine_result(&result)?;
    Ok(result)
}

/// Sign, serialize, and submit a transaction with multiple keys (spec.md
/// §6, §4.11, C12).
pub async fn multisign_and_submit(rpc: &dyn RippleRpc, keys: &[&XrplKeyPair], mut fields: Fields) -> Result<Json> {
    fill_sequence(rpc, &mut fields).await?;
    tx::multisign_transaction(keys, &mut fields)?;

    let serialized = crate::value::encode_object(&fields)?;
    let tx_blob = tx::to_hex_blob(&serialized);

    tracing::debug!(tx_blob = %tx_blob, signer_count = keys.len(), "submitting multi-signed transaction");
    let result = rpc.submit(&tx_blob).await?;
    check_engine_result(&result)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Amount;
    use std::sync::Mutex;

    struct FakeRpc {
        sequence: u64,
        submitted: Mutex<Vec<String>>,
        engine_result: &'static str,
        account_info_calls: Mutex<u32>,
    }

    #[async_trait]
    impl RippleRpc for FakeRpc {
        async fn account_info(&self, _account: &str, _ledger_index: &str) -> Result<Json> {
            *self.account_info_calls.lock().unwrap() += 1;
            Ok(serde_json::json!({ "account_data": { "Sequence": self.sequence } }))
        }

        async fn fee(&self) -> Result<FeeInfo> {
            Ok(FeeInfo { base: 10, median: 10, minimum: 10, open_ledger: 10 })
        }

        async fn ledger(&self, _index: &str) -> Result<Json> {
            Ok(serde_json::json!({}))
        }

        async fn ledger_accept(&self) -> Result<Json> {
            Ok(serde_json::json!({}))
        }

        async fn ledger_closed(&self) -> Result<Json> {
            Ok(serde_json::json!({}))
        }

        async fn server_info(&self) -> Result<Json> {
            Ok(serde_json::json!({
                "validated_ledger": { "reserve_base_xrp": 10, "reserve_inc_xrp": 2 }
            }))
        }

        async fn submit(&self, tx_blob: &str) -> Result<Json> {
            self.submitted.lock().unwrap().push(tx_blob.to_string());
            Ok(serde_json::json!({ "engine_result": self.engine_result }))
        }
    }

    fn payment_fields(account: &str, destination: &str) -> Fields {
        vec![
            ("TransactionType".to_string(), Value::UInt16(0)),
            ("Account".to_string(), Value::AccountId(account.to_string())),
            ("Destination".to_string(), Value::AccountId(destination.to_string())),
            ("Amount".to_string(), Value::Amount(Amount::drops(1_000_000))),
            ("Fee".to_string(), Value::Amount(Amount::drops(10))),
        ]
    }

    #[tokio::test]
    async fn sign_and_submit_fills_sequence_and_submits_hex_blob() {
        let key = XrplKeyPair::generate();
        let account = key.to_account().unwrap();
        let rpc = FakeRpc { sequence: 42, submitted: Mutex::new(Vec::new()), engine_result: "tesSUCCESS", account_info_calls: Mutex::new(0) };

        let fields = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        let result = sign_and_submit(&rpc, &key, fields).await.unwrap();
        assert_eq!(result["engine_result"], "tesSUCCESS");

        let submitted = rpc.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert!(hex::decode(&submitted[0]).is_ok());
    }

    #[tokio::test]
    async fn submit_maps_failure_category_to_error() {
        let key = XrplKeyPair::generate();
        let account = key.to_account().unwrap();
        let rpc = FakeRpc { sequence: 1, submitted: Mutex::new(Vec::new()), engine_result: "tecUNFUNDED_PAYMENT", account_info_calls: Mutex::new(0) };

        let fields = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        let err = sign_and_submit(&rpc, &key, fields).await.unwrap_err();
        assert!(matches!(err, XrplError::CostlyFailure { code } if code == "UNFUNDED_PAYMENT"));
    }

    #[tokio::test]
    async fn explicit_sequence_is_not_overwritten() {
        let key = XrplKeyPair::generate();
        let account = key.to_account().unwrap();
        let rpc = FakeRpc { sequence: 999, submitted: Mutex::new(Vec::new()), engine_result: "tesSUCCESS", account_info_calls: Mutex::new(0) };

        let mut fields = payment_fields(&account, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        fields.push(("Sequence".to_string(), Value::UInt32(7)));

        sign_and_submit(&rpc, &key, fields).await.unwrap();
        assert_eq!(*rpc.account_info_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn get_reserve_reads_validated_ledger() {
        let rpc = FakeRpc { sequence: 0, submitted: Mutex::new(Vec::new()), engine_result: "tesSUCCESS", account_info_calls: Mutex::new(0) };
        let reserve = rpc.get_reserve().await.unwrap();
        assert_eq!(reserve.base, 10);
        assert_eq!(reserve.inc, 2);
    }
}

// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// value: the recursive transaction-tree value type and the object/array
// codec built on top of ser::{primitives,amount,pathset} (spec.md §4.8).
//
// An STObject-typed field's own encoding never carries its own end marker;
// ObjectEndMarker is a real field that ArraySerializer inserts after each
// element, and the *generic* object decoder simply stops whenever it reads
// that field's tag (or runs out of bytes, which is what happens at the
// root). Both cases fall out of the same loop.

use crate::definitions::{self, FieldDef, WireType};
use crate::error::{Result, XrplError};
use crate::field_id;
use crate::ser::amount::{self, Amount};
use crate::ser::pathset::{self, Path};
use crate::ser::primitives;

pub type Fields = Vec<(String, Value)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Blob(Vec<u8>),
    Hash128([u8; 16]),
    Hash160([u8; 20]),
    Hash256([u8; 32]),
    AccountId(String),
    Amount(Amount),
    Object(Fields),
    Array(Vec<Fields>),
    PathSet(Vec<Path>),
}

fn encode_value(field: &FieldDef, value: &Value) -> Result<Vec<u8>> {
    use WireType::*;
    match (field.type_code, value) {
        (UInt8, Value::UInt8(v)) => Ok(primitives::encode_u8(*v)),
        (UInt16, Value::UInt16(v)) => Ok(primitives::encode_u16(*v)),
        (UInt32, Value::UInt32(v)) => Ok(primitives::encode_u32(*v)),
        (UInt64, Value::UInt64(v)) => Ok(primitives::encode_u64(*v)),
        (Blob, Value::Blob(b)) => primitives::encode_blob(b),
        (AccountId, Value::AccountId(a)) => primitives::encode_account_id(a),
        (Hash128, Value::Hash128(h)) => primitives::encode_hash(h, 16),
        (Hash160, Value::Hash160(h)) => primitives::encode_hash(h, 20),
        (Hash256, Value::Hash256(h)) => primitives::encode_hash(h, 32),
        (Amount, Value::Amount(a)) => amount::encode_amount(a),
        (PathSet, Value::PathSet(p)) => pathset::encode_pathset(p),
        (StObject, Value::Object(fields)) => encode_object(fields),
        (StArray, Value::Array(elements)) => encode_array(elements),
        _ => Err(XrplError::UnsupportedFieldType {
            name: field.name.to_string(),
            type_code: field.type_code.code(),
        }),
    }
}

fn decode_value(field: &FieldDef, data: &[u8]) -> Result<(Value, usize)> {
    use WireType::*;
    Ok(match field.type_code {
        UInt8 => {
            let (v, l) = primitives::decode_u8(data)?;
            (Value::UInt8(v), l)
        }
        UInt16 => {
            let (v, l) = primitives::decode_u16(data)?;
            (Value::UInt16(v), l)
        }
        UInt32 => {
            let (v, l) = primitives::decode_u32(data)?;
            (Value::UInt32(v), l)
        }
        UInt64 => {
            let (v, l) = primitives::decode_u64(data)?;
            (Value::UInt64(v), l)
        }
        Blob => {
            let (b, l) = primitives::decode_blob(data)?;
            (Value::Blob(b), l)
        }
        AccountId => {
            let (a, l) = primitives::decode_account_id(data)?;
            (Value::AccountId(a), l)
        }
        Hash128 => {
            let (h, l) = primitives::decode_hash(data, 16)?;
            let mut arr = [0u8; 16];
            arr.copy_from_slice(&h);
            (Value::Hash128(arr), l)
        }
        Hash160 => {
            let (h, l) = primitives::decode_hash(data, 20)?;
            let mut arr = [0u8; 20];
            arr.copy_from_slice(&h);
            (Value::Hash160(arr), l)
        }
        Hash256 => {
            let (h, l) = primitives::decode_hash(data, 32)?;
            let mut arr = [0u8; 32];
            arr.copy_from_slice(&h);
            (Value::Hash256(arr), l)
        }
        Amount => {
            let (a, l) = amount::decode_amount(data)?;
            (Value::Amount(a), l)
        }
        PathSet => {
            let (p, l) = pathset::decode_pathset(data)?;
            (Value::PathSet(p), l)
        }
        StObject => {
            let (fields, l) = decode_object(data)?;
            (Value::Object(fields), l)
        }
        StArray => {
            let (elements, l) = decode_array(data)?;
            (Value::Array(elements), l)
        }
        _ => {
            return Err(XrplError::UnsupportedFieldType {
                name: field.name.to_string(),
                type_code: field.type_code.code(),
            })
        }
    })
}

/// Encode a mapping in canonical field order (spec.md §3, §4.8). No end
/// marker is ever added here — `ObjectEndMarker`/`ArrayEndMarker` are only
/// inserted by `encode_array`, the one place the wire format actually
/// needs them.
pub fn encode_object(fields: &Fields) -> Result<Vec<u8>> {
    let mut entries = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let field = definitions::field_by_name(name)?;
        let id = field.field_id()?;
        let body = encode_value(&field, value)?;
        entries.push((field, id, body));
    }
    entries.sort_by_key(|(field, _, _)| (field.type_code.code(), field.nth));

    let mut out = Vec::new();
    for (_, id, body) in entries {
        out.extend(id);
        out.extend(body);
    }
    Ok(out)
}

/// Decode a mapping, stopping at `ObjectEndMarker` or at the end of
/// `data`, whichever comes first. The same function serves as the root
/// decoder (no marker present, simply runs to the end) and as the
/// value-decoder for any nested `STObject`-typed field (bounded by the
/// marker the array codec inserted).
pub fn decode_object(data: &[u8]) -> Result<(Fields, usize)> {
    let mut pos = 0;
    let mut fields = Vec::new();

    while pos < data.len() {
        let (field, tag_len) = field_id::unpack(&data[pos..])?;
        pos += tag_len;
        if field.name == "ObjectEndMarker" {
            break;
        }
        let (value, value_len) = decode_value(&field, &data[pos..])?;
        pos += value_len;
        fields.push((field.name.to_string(), value));
    }

    Ok((fields, pos))
}

fn encode_array(elements: &[Fields]) -> Result<Vec<u8>> {
    let end_marker = definitions::field_by_name("ObjectEndMarker")?.field_id()?;
    let array_end = definitions::field_by_name("ArrayEndMarker")?.field_id()?;

    let mut out = Vec::new();
    for element in elements {
        out.extend(encode_object(element)?);
        out.extend(&end_marker);
    }
    out.extend(array_end);
    Ok(out)
}

fn decode_array(data: &[u8]) -> Result<(Vec<Fields>, usize)> {
    let mut pos = 0;
    let mut elements = Vec::new();

    loop {
        let (field, tag_len) = field_id::unpack(&data[pos..])?;
        if field.name == "ArrayEndMarker" {
            pos += tag_len;
            break;
        }
        pos += tag_len;
        let (value, value_len) = decode_value(&field, &data[pos..])?;
        pos += value_len;
        elements.push(vec![(field.name.to_string(), value)]);
    }

    Ok((elements, pos))
}

/// Serialize a transaction-tree root mapping (spec.md §4.8 — "no end
/// marker at root").
pub fn serialize(tx: &Fields) -> Result<Vec<u8>> {
    encode_object(tx)
}

/// Deserialize a transaction-tree root mapping from a fully-formed,
/// unframed buffer.
pub fn deserialize(data: &[u8]) -> Result<Fields> {
    let (fields, _) = decode_object(data)?;
    Ok(fields)
}

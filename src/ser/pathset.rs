// Rusby Wallet — Copyright (C) 2025 axpnet
// SPDX-License-Identifier: GPL-3.0-or-later
//
// ser::pathset: the PathSet codec (spec.md §4.7). A PathSet is a list of
// paths, each a list of hops, framed by 0xFF between paths and 0x00 to
// terminate the whole set. Each hop carries a type-bitmask byte
// (account/currency/issuer) followed by only the fields that bitmask
// names.

use crate::base58;
use crate::error::{Result, XrplError};

const TYPE_ACCOUNT: u8 = 0x01;
const TYPE_CURRENCY: u8 = 0x10;
const TYPE_ISSUER: u8 = 0x20;
const PATH_SEPARATOR: u8 = 0xFF;
const PATH_SET_END: u8 = 0x00;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hop {
    pub account: Option<String>,
    pub currency: Option<[u8; 20]>,
    pub issuer: Option<String>,
}

pub type Path = Vec<Hop>;

fn encode_hop(hop: &Hop) -> Result<Vec<u8>> {
    let mut kind = 0u8;
    if hop.account.is_some() {
        kind |= TYPE_ACCOUNT;
    }
    if hop.currency.is_some() {
        kind |= TYPE_CURRENCY;
    }
    if hop.issuer.is_some() {
        kind |= TYPE_ISSUER;
    }

    let mut out = vec![kind];
    if let Some(account) = &hop.account {
        out.extend_from_slice(&base58::decode_address(account)?);
    }
    if let Some(currency) = &hop.currency {
        out.extend_from_slice(currency);
    }
    if let Some(issuer) = &hop.issuer {
        out.extend_from_slice(&base58::decode_address(issuer)?);
    }
    Ok(out)
}

pub fn encode_pathset(paths: &[Path]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            out.push(PATH_SEPARATOR);
        }
        for hop in path {
            out.extend(encode_hop(hop)?);
        }
    }
    out.push(PATH_SET_END);
    Ok(out)
}

pub fn decode_pathset(data: &[u8]) -> Result<(Vec<Path>, usize)> {
    let mut paths: Vec<Path> = Vec::new();
    let mut current: Option<Path> = None;
    let mut pos = 0usize;

    loop {
        let kind = *data
            .get(pos)
            .ok_or(XrplError::MalformedPathSet)?;
        pos += 1;

        if kind == PATH_SET_END {
            if let Some(path) = current.take() {
                paths.push(path);
            }
            break;
        }
        if kind == PATH_SEPARATOR {
            paths.push(current.take().unwrap_or_default());
            continue;
        }

        let mut hop = Hop::default();
        if kind & TYPE_ACCOUNT != 0 {
            let bytes = data.get(pos..pos + 20).ok_or(XrplError::MalformedPathSet)?;
            hop.account = Some(base58::encode_address(bytes)?);
            pos += 20;
        }
        if kind & TYPE_CURRENCY != 0 {
            let bytes = data.get(pos..pos + 20).ok_or(XrplError::MalformedPathSet)?;
            let mut currency = [0u8; 20];
            currency.copy_from_slice(bytes);
            hop.currency = Some(currency);
            pos += 20;
        }
        if kind & TYPE_ISSUER != 0 {
            let bytes = data.get(pos..pos + 20).ok_or(XrplError::MalformedPathSet)?;
            hop.issuer = Some(base58::encode_address(bytes)?);
            pos += 20;
        }
        if kind & !(TYPE_ACCOUNT | TYPE_CURRENCY | TYPE_ISSUER) != 0 {
            return Err(XrplError::MalformedPathSet);
        }

        current.get_or_insert_with(Vec::new).push(hop);
    }

    Ok((paths, pos))
}

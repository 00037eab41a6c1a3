//! Minimal decoder for base64 XDR `ScVal`s.
//!
//! `getEvents` returns every topic and the event value as base64 XDR. The
//! crowdfund contract publishes symbols, `u64` project ids and addresses as
//! topics, and `#[contracttype]` structs as values. Those structs arrive as
//! an `ScMap` keyed by field-name symbols, with `i128` amounts.
//!
//! Addresses are rendered as strkeys (`G...` / `C...`), the same text the
//! RPC uses in its JSON output.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Map, Value};

use crate::errors::{IndexerError, Result};

const SCV_BOOL: u32 = 0;
const SCV_VOID: u32 = 1;
const SCV_U32: u32 = 3;
const SCV_I32: u32 = 4;
const SCV_U64: u32 = 5;
const SCV_I64: u32 = 6;
const SCV_TIMEPOINT: u32 = 7;
const SCV_DURATION: u32 = 8;
const SCV_I128: u32 = 10;
const SCV_STRING: u32 = 14;
const SCV_SYMBOL: u32 = 15;
const SCV_VEC: u32 = 16;
const SCV_MAP: u32 = 17;
const SCV_ADDRESS: u32 = 18;

const SC_ADDRESS_TYPE_ACCOUNT: u32 = 0;
const SC_ADDRESS_TYPE_CONTRACT: u32 = 1;
const PUBLIC_KEY_TYPE_ED25519: u32 = 0;

/// Maximum length of an `ScSymbol`.
const SYMBOL_MAX_LEN: usize = 32;

/// Nesting limit for vectors and maps.
const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScValue {
    Void,
    Bool(bool),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    I128(i128),
    String(String),
    Symbol(String),
    /// Strkey of an account or contract.
    Address(String),
    Vec(Vec<ScValue>),
    Map(Vec<(ScValue, ScValue)>),
}

impl ScValue {
    /// Text form of a topic, as stored in the database.
    pub fn into_text(self) -> String {
        match self {
            Self::Symbol(s) | Self::String(s) | Self::Address(s) => s,
            Self::U32(n) => n.to_string(),
            Self::I32(n) => n.to_string(),
            Self::U64(n) => n.to_string(),
            Self::I64(n) => n.to_string(),
            Self::I128(n) => n.to_string(),
            other => other.to_json().to_string(),
        }
    }

    /// JSON view of the value. Maps with symbol or string keys become
    /// objects; 64-bit integers stay numbers and `i128` becomes a decimal
    /// string so no precision is lost.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Void => Value::Null,
            Self::Bool(b) => json!(b),
            Self::U32(n) => json!(n),
            Self::I32(n) => json!(n),
            Self::U64(n) => json!(n),
            Self::I64(n) => json!(n),
            Self::I128(n) => json!(n.to_string()),
            Self::String(s) | Self::Symbol(s) | Self::Address(s) => json!(s),
            Self::Vec(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => {
                let mut object = Map::new();
                for (key, val) in entries {
                    let key = match key {
                        Self::Symbol(s) | Self::String(s) => s.clone(),
                        other => other.to_json().to_string(),
                    };
                    object.insert(key, val.to_json());
                }
                Value::Object(object)
            }
        }
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| IndexerError::Xdr(format!("truncated at byte {}", self.pos)))?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.take(N)?
            .try_into()
            .map_err(|_| IndexerError::Xdr(format!("expected {N} bytes")))
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.array()?))
    }

    /// `Int128Parts { hi: int64, lo: uint64 }`
    fn i128(&mut self) -> Result<i128> {
        let hi = self.i64()? as i128;
        let lo = self.u64()? as i128;
        Ok((hi << 64) | lo)
    }

    /// Variable-length opaque data, padded to a multiple of four bytes.
    fn opaque(&mut self, max: Option<usize>) -> Result<&'a [u8]> {
        let len = self.u32()? as usize;
        if let Some(max) = max {
            if len > max {
                return Err(IndexerError::Xdr(format!("length {len} exceeds {max}")));
            }
        }
        let data = self.take(len)?;
        self.take((4 - len % 4) % 4)?;
        Ok(data)
    }

    fn text(&mut self, max: Option<usize>) -> Result<String> {
        let raw = self.opaque(max)?;
        std::str::from_utf8(raw)
            .map(str::to_string)
            .map_err(|e| IndexerError::Xdr(format!("text is not utf-8: {e}")))
    }

    /// Element count of an optional (`*`) vector or map; absent means empty.
    fn optional_len(&mut self) -> Result<usize> {
        match self.u32()? {
            0 => Ok(0),
            1 => Ok(self.u32()? as usize),
            other => Err(IndexerError::Xdr(format!("bad optional flag {other}"))),
        }
    }

    fn address(&mut self) -> Result<String> {
        match self.u32()? {
            SC_ADDRESS_TYPE_ACCOUNT => {
                let key_type = self.u32()?;
                if key_type != PUBLIC_KEY_TYPE_ED25519 {
                    return Err(IndexerError::Xdr(format!("unknown key type {key_type}")));
                }
                Ok(stellar_strkey::ed25519::PublicKey(self.array()?).to_string())
            }
            SC_ADDRESS_TYPE_CONTRACT => Ok(stellar_strkey::Contract(self.array()?).to_string()),
            other => Err(IndexerError::Xdr(format!("unknown address type {other}"))),
        }
    }

    fn value(&mut self, depth: usize) -> Result<ScValue> {
        if depth > MAX_DEPTH {
            return Err(IndexerError::Xdr("value nested too deeply".to_string()));
        }

        match self.u32()? {
            SCV_BOOL => Ok(ScValue::Bool(self.u32()? != 0)),
            SCV_VOID => Ok(ScValue::Void),
            SCV_U32 => Ok(ScValue::U32(self.u32()?)),
            SCV_I32 => Ok(ScValue::I32(self.i32()?)),
            SCV_U64 | SCV_TIMEPOINT | SCV_DURATION => Ok(ScValue::U64(self.u64()?)),
            SCV_I64 => Ok(ScValue::I64(self.i64()?)),
            SCV_I128 => Ok(ScValue::I128(self.i128()?)),
            SCV_STRING => Ok(ScValue::String(self.text(None)?)),
            SCV_SYMBOL => Ok(ScValue::Symbol(self.text(Some(SYMBOL_MAX_LEN))?)),
            SCV_VEC => {
                let len = self.optional_len()?;
                let mut items = Vec::new();
                for _ in 0..len {
                    items.push(self.value(depth + 1)?);
                }
                Ok(ScValue::Vec(items))
            }
            SCV_MAP => {
                let len = self.optional_len()?;
                let mut entries = Vec::new();
                for _ in 0..len {
                    let key = self.value(depth + 1)?;
                    let val = self.value(depth + 1)?;
                    entries.push((key, val));
                }
                Ok(ScValue::Map(entries))
            }
            SCV_ADDRESS => Ok(ScValue::Address(self.address()?)),
            other => Err(IndexerError::Xdr(format!("unsupported ScVal discriminant {other}"))),
        }
    }
}

/// Decode one base64 XDR `ScVal`.
pub fn decode(b64: &str) -> Result<ScValue> {
    let bytes = STANDARD.decode(b64.trim())?;
    Reader::new(&bytes).value(0)
}

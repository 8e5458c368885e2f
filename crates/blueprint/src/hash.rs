// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical JSON and content-derived prompt IDs.
//!
//! Object keys are sorted recursively so that two documents differing only
//! in key order hash identically. Numbers follow JavaScript formatting
//! (`1.0` is written `1`) so IDs agree with other blueprint tooling.

use serde_json::{Number, Value};
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Prefix of generated prompt IDs
pub const HASH_ID_PREFIX: &str = "hash-";

/// Hex characters of the digest kept in a generated ID
pub const HASH_ID_LENGTH: usize = 12;

/// Serialize a value as compact JSON with recursively sorted object keys.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Derive a stable `hash-<12 hex>` ID from a value's canonical JSON.
pub fn content_hash_id(value: &Value) -> String {
    let digest = Sha256::digest(canonical_json(value).as_bytes());
    let hex = hex::encode(digest);
    format!("{}{}", HASH_ID_PREFIX, &hex[..HASH_ID_LENGTH])
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

// Integral floats below 1e21 print without a fraction, as in JavaScript.
fn write_number(n: &Number, out: &mut String) {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            let _ = write!(out, "{}", f as i128);
        }
        _ => {
            let _ = write!(out, "{}", n);
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    match serde_json::to_string(s) {
        Ok(encoded) => out.push_str(&encoded),
        Err(_) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
    }
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;

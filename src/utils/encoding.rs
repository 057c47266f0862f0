//! Address encoding primitives
//!
//! Pure, allocation-light checks for the encodings the format matcher needs:
//! Base58Check (double-SHA256 checksum), EVM hex, CashAddr and SegWit
//! bech32/bech32m. Nothing here knows which blockchain uses which encoding.

use alloy_primitives::Address as EvmAddress;
use sha2::{Digest, Sha256};
use std::str::FromStr;

use super::constants::{
    BITCOIN_SEGWIT_HRP, CASHADDR_PREFIX, EVM_ADDRESS_LEN, EVM_PREFIX, LITECOIN_SEGWIT_HRP,
};

/// CashAddr reuses the bech32 alphabet
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const CHECKSUM_LEN: usize = 4;

// ============================================
// Base58Check
// ============================================

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Decode a Base58Check string and verify its checksum.
/// Returns the payload (version byte first) without the checksum.
pub fn base58check_decode(input: &str) -> Option<Vec<u8>> {
    let bytes = bs58::decode(input).into_vec().ok()?;
    if bytes.len() <= CHECKSUM_LEN {
        return None;
    }
    let (payload, check) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if checksum(payload) != check {
        return None;
    }
    Some(payload.to_vec())
}

/// Encode a payload (version byte first) as Base58Check
pub fn base58check_encode(payload: &[u8]) -> String {
    let mut bytes = payload.to_vec();
    bytes.extend_from_slice(&checksum(payload));
    bs58::encode(bytes).into_string()
}

// ============================================
// EVM hex
// ============================================

/// `0x` followed by exactly 40 hex digits, any case. No EIP-55 enforcement.
pub fn is_evm_hex(input: &str) -> bool {
    input.len() == EVM_ADDRESS_LEN
        && input.starts_with(EVM_PREFIX)
        && input[EVM_PREFIX.len()..].bytes().all(|b| b.is_ascii_hexdigit())
        && EvmAddress::from_str(input).is_ok()
}

// ============================================
// Shared 5-bit helpers
// ============================================

fn charset_value(c: u8) -> Option<u8> {
    CHARSET.iter().position(|&x| x == c).map(|p| p as u8)
}

/// Reject mixed case, return the lowercase form
fn single_case_lower(input: &str) -> Option<String> {
    let has_lower = input.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = input.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return None;
    }
    Some(input.to_ascii_lowercase())
}

/// Regroup 5-bit values into bytes, rejecting non-zero padding
fn five_to_eight(data: &[u8]) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * 5 / 8);
    for &value in data {
        acc = (acc << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || (acc << (8 - bits)) & 0xff != 0 {
        return None;
    }
    Some(out)
}

// ============================================
// CashAddr
// ============================================

fn cashaddr_polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

fn cashaddr_prefix_values(prefix: &str) -> Vec<u8> {
    let mut values: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    values.push(0);
    values
}

/// 160-bit hash: 34 data chars + 8 checksum chars
const CASHADDR_PAYLOAD_CHARS: usize = 42;
const CASHADDR_CHECKSUM_CHARS: usize = 8;

/// Validate a mainnet CashAddr (prefix optional) and return its canonical
/// lowercase `bitcoincash:` form.
pub fn cashaddr_normalize(input: &str) -> Option<String> {
    let lower = single_case_lower(input)?;
    let payload = match lower.split_once(':') {
        Some((prefix, payload)) if prefix == CASHADDR_PREFIX => payload,
        Some(_) => return None,
        None => lower.as_str(),
    };
    if payload.len() != CASHADDR_PAYLOAD_CHARS {
        return None;
    }
    // Version byte: type 0 (P2PKH) -> 'q', type 1 (P2SH) -> 'p'; size bits 0 (160-bit)
    if !matches!(payload.as_bytes()[0], b'q' | b'p') {
        return None;
    }

    let data: Vec<u8> = payload
        .bytes()
        .map(charset_value)
        .collect::<Option<Vec<u8>>>()?;

    let mut values = cashaddr_prefix_values(CASHADDR_PREFIX);
    values.extend_from_slice(&data);
    if cashaddr_polymod(&values) != 0 {
        return None;
    }

    // Version byte + 20-byte hash
    let decoded = five_to_eight(&data[..data.len() - CASHADDR_CHECKSUM_CHARS])?;
    if decoded.len() != 21 {
        return None;
    }

    Some(format!("{}:{}", CASHADDR_PREFIX, payload))
}

// ============================================
// SegWit (bech32 / bech32m)
// ============================================

/// A decoded SegWit address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegwitAddress {
    pub hrp: String,
    pub witness_version: u8,
    /// Canonical lowercase spelling
    pub normalized: String,
}

/// Validate a mainnet Bitcoin or Litecoin SegWit address.
///
/// Checksum variant, witness version and program length are checked by
/// `bech32::segwit::decode` (bech32 for v0, bech32m for v1+).
pub fn segwit_decode(input: &str) -> Option<SegwitAddress> {
    let lower = single_case_lower(input)?;
    let (hrp, version, _program) = bech32::segwit::decode(&lower).ok()?;

    let hrp = hrp.to_lowercase();
    if hrp != BITCOIN_SEGWIT_HRP && hrp != LITECOIN_SEGWIT_HRP {
        return None;
    }

    Some(SegwitAddress {
        hrp,
        witness_version: version.to_u8(),
        normalized: lower,
    })
}

/// Test fixtures: encoders mirroring the decoders above
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    fn eight_to_five(data: &[u8]) -> Vec<u8> {
        let mut acc: u32 = 0;
        let mut bits: u32 = 0;
        let mut out = Vec::new();
        for &byte in data {
            acc = (acc << 8) | byte as u32;
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                out.push(((acc >> bits) & 0x1f) as u8);
            }
        }
        if bits > 0 {
            out.push(((acc << (5 - bits)) & 0x1f) as u8);
        }
        out
    }

    /// CashAddr for a version byte + 20-byte hash
    pub fn cashaddr_encode(version: u8, hash: &[u8; 20]) -> String {
        let mut payload = vec![version];
        payload.extend_from_slice(hash);
        let data = eight_to_five(&payload);

        let mut values = cashaddr_prefix_values(CASHADDR_PREFIX);
        values.extend_from_slice(&data);
        values.extend_from_slice(&[0u8; CASHADDR_CHECKSUM_CHARS]);
        let m = cashaddr_polymod(&values);

        let mut out = format!("{}:", CASHADDR_PREFIX);
        for v in &data {
            out.push(CHARSET[*v as usize] as char);
        }
        for i in 0..CASHADDR_CHECKSUM_CHARS {
            let v = ((m >> (5 * (7 - i))) & 0x1f) as usize;
            out.push(CHARSET[v] as char);
        }
        out
    }

    /// SegWit address for the given HRP, witness version and program
    pub fn segwit_encode(hrp: &str, witness_version: u8, program: &[u8]) -> String {
        let hrp = bech32::Hrp::parse(hrp).unwrap();
        let version = bech32::Fe32::try_from(witness_version).unwrap();
        bech32::segwit::encode(hrp, version, program).unwrap()
    }
}

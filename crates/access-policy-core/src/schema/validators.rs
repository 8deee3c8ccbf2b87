//! Field validators shared by access policy schemas
//!
//! Boolean fields need no validator: the `Bool` type check already rejects
//! strings and numbers.

use serde_json::Value;
use std::net::IpAddr;

use super::{join_path, ValidationFinding};

/// Reject empty or whitespace-only strings
pub fn validate_non_empty_string(value: &Value, path: &str) -> Vec<ValidationFinding> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Vec::new(),
        _ => vec![ValidationFinding::error(
            "E_EMPTY",
            "value must be a non-empty string",
            path,
        )],
    }
}

/// Require at least one non-empty string element
pub fn validate_non_empty_list(value: &Value, path: &str) -> Vec<ValidationFinding> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    if items.is_empty() {
        return vec![ValidationFinding::error(
            "E_EMPTY",
            "at least one element is required",
            path,
        )];
    }
    items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| validate_non_empty_string(item, &join_path(path, &index.to_string())))
        .collect()
}

/// Every element must be an IP address or a CIDR range
pub fn validate_ip_or_cidr_list(value: &Value, path: &str) -> Vec<ValidationFinding> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let raw = item.as_str()?;
            if is_ip_or_cidr(raw) {
                None
            } else {
                Some(ValidationFinding::error(
                    "E_INVALID_IP",
                    format!("'{}' is not a valid IP address or CIDR range", raw),
                    join_path(path, &index.to_string()),
                ))
            }
        })
        .collect()
}

fn is_ip_or_cidr(raw: &str) -> bool {
    let (addr, prefix) = match raw.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (raw, None),
    };
    let Ok(ip) = addr.parse::<IpAddr>() else {
        return false;
    };
    match prefix {
        None => true,
        Some(prefix) => {
            let max = if ip.is_ipv4() { 32 } else { 128 };
            prefix.parse::<u8>().map(|p| p <= max).unwrap_or(false)
        }
    }
}

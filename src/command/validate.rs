//! Input predicates applied before any value reaches a command template.

use crate::error::AddressError;
use std::net::Ipv4Addr;

/// Parse a dotted-quad IPv4 address.
///
/// Exactly four `.`-separated groups of one to three ASCII digits, each at
/// most 255, and nothing else: no sign, no surrounding whitespace, no
/// trailing characters. Leading zeros are accepted and normalized away by
/// the returned [`Ipv4Addr`].
pub fn parse_ipv4(input: &str) -> Result<Ipv4Addr, AddressError> {
    let malformed = || AddressError::Malformed(input.to_string());

    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 4 {
        return Err(malformed());
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let value: u32 = part.parse().map_err(|_| malformed())?;
        *slot = u8::try_from(value).map_err(|_| AddressError::OctetOutOfRange {
            value: input.to_string(),
            octet: value,
        })?;
    }

    Ok(Ipv4Addr::from(octets))
}

pub fn is_ipv4(input: &str) -> bool {
    parse_ipv4(input).is_ok()
}

/// Longest identifier accepted by [`is_valid_set_name`].
pub const MAX_NAME_LEN: usize = 63;

/// Check that a name can be used as an nft set, table or family argument.
///
/// Must start with a letter or underscore, contain only ASCII letters,
/// digits and underscores, and be at most [`MAX_NAME_LEN`] long.
pub fn is_valid_set_name(name: &str) -> bool {
    if name.len() > MAX_NAME_LEN {
        return false;
    }
    let Some(first_char) = name.chars().next() else {
        return false;
    };
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return false;
    }

    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

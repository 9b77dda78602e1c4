//! IPv6 address and CIDR notation utilities.
//!
//! Provides [`Ipv6Net`] struct for representing IPv6 networks with a prefix length,
//! along with utility functions for subnet calculations on the 128 bit address space.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv6Addr;
use std::str::FromStr;

/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH: u8 = 128;

/// Convert a CIDR prefix length to a network mask as u128.
///
/// # Examples
/// ```
/// use homelab_net_tools::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(64).unwrap(), 0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u128, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = (MAX_LENGTH - len) as u32;
        // shifting by 128 is an overflow, /0 has no network bits
        Ok(u128::MAX.checked_shl(right_len).unwrap_or(0))
    }
}

/// Number of addresses in a network of the given prefix length.
///
/// A /0 holds 2^128 addresses which does not fit a u128, so it is an error.
pub fn block_size(len: u8) -> Result<u128, Box<dyn Error>> {
    if len > MAX_LENGTH {
        return Err("Network length is too long".into());
    }
    1u128
        .checked_shl((MAX_LENGTH - len) as u32)
        .ok_or_else(|| "Block size of /0 does not fit in 128 bits".into())
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv6Addr::from(u128::from(addr) & mask))
}

/// Calculate the last address of the network for a given IP and prefix length.
pub fn last_addr(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv6Addr::from((u128::from(addr) & mask) | !mask))
}

/// Add a plain integer offset to an address.
pub fn addr_offset(addr: Ipv6Addr, offset: u128) -> Result<Ipv6Addr, Box<dyn Error>> {
    let bits = u128::from(addr)
        .checked_add(offset)
        .ok_or_else(|| format!("Address {addr} + {offset} overflowed"))?;
    Ok(Ipv6Addr::from(bits))
}

/// Parse a prefix length, only plain ascii digits are accepted ("+5" and " 5" are not).
fn parse_prefix_len(text: &str) -> Result<u8, Box<dyn Error>> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("Invalid prefix length {text}").into());
    }
    let mask: u8 = text
        .parse()
        .map_err(|_| format!("Invalid prefix length {text}"))?;
    if mask > MAX_LENGTH {
        return Err("Network length is too long".into());
    }
    Ok(mask)
}

/// IPv6 network with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv6Net {
    /// The IPv6 address.
    pub addr: Ipv6Addr,
    /// The prefix length (0-128).
    pub mask: u8,
}

impl Serialize for Ipv6Net {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv6Net {
    fn deserialize<D>(deserializer: D) -> Result<Ipv6Net, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv6Net::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl FromStr for Ipv6Net {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Net::new(s)
    }
}

impl Ipv6Net {
    /// Create a new [`Ipv6Net`] from a CIDR string (e.g., "2001:db8::/56").
    ///
    /// Host bits are kept as given, use [`Ipv6Net::network`] for a strict parse.
    pub fn new(addr_cidr: &str) -> Result<Ipv6Net, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err("Invalid address/mask".into());
        }
        let addr: Ipv6Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask = parse_prefix_len(parts[1])?;
        Ok(Ipv6Net { addr, mask })
    }

    /// Strictly parse a network.
    ///
    /// A missing prefix length means a single address (/128). Host bits set below
    /// the prefix length are rejected, `2001:db8::1/56` is not a network.
    pub fn network(text: &str) -> Result<Ipv6Net, Box<dyn Error>> {
        let text = text.trim();
        let net = match text.split_once('/') {
            Some(_) => Ipv6Net::new(text)?,
            None => Ipv6Net {
                addr: text
                    .parse()
                    .map_err(|_| format!("Invalid address {text}"))?,
                mask: MAX_LENGTH,
            },
        };
        if net.lo() != net.addr {
            return Err(format!("{net} has host bits set").into());
        }
        Ok(net)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv6Addr {
        cut_addr(self.addr, self.mask)
            .unwrap_or_else(|e| panic!("Error calculating minimum address for {}: {}", self, e))
    }

    /// Get the highest address in the subnet.
    pub fn hi(&self) -> Ipv6Addr {
        last_addr(self.addr, self.mask)
            .unwrap_or_else(|e| panic!("Error calculating last address for {}: {}", self, e))
    }

    /// True if `addr` lies inside this network.
    pub fn contains(&self, addr: Ipv6Addr) -> bool {
        self.lo() <= addr && addr <= self.hi()
    }

    /// True if `other` is fully inside this network.
    pub fn contains_net(&self, other: &Ipv6Net) -> bool {
        other.mask >= self.mask && self.contains(other.lo())
    }

    /// Number of `new_mask` sized subnets in this network.
    pub fn subnet_count(&self, new_mask: u8) -> Result<u128, Box<dyn Error>> {
        if new_mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        if new_mask < self.mask {
            return Err(format!("Can not split /{} into larger /{new_mask} subnets", self.mask).into());
        }
        1u128
            .checked_shl((new_mask - self.mask) as u32)
            .ok_or_else(|| format!("Subnet count of {self} into /{new_mask} overflowed").into())
    }

    /// Get the `index`-th `new_mask` subnet of this network, counting from 0.
    pub fn nth_subnet(&self, new_mask: u8, index: u128) -> Result<Ipv6Net, Box<dyn Error>> {
        let count = self.subnet_count(new_mask)?;
        if index >= count {
            return Err(format!("{self} has no /{new_mask} subnet at index {index}").into());
        }
        // index < count so the product stays inside the network
        let step = block_size(new_mask)?;
        let addr = addr_offset(self.lo(), index * step)?;
        Ok(Ipv6Net {
            addr,
            mask: new_mask,
        })
    }

    /// Split this network into `new_mask` sized subnets, in ascending address order.
    ///
    /// The returned iterator is lazy, a /0 holds 2^64 /64 subnets.
    pub fn subnets(&self, new_mask: u8) -> Result<Subnets, Box<dyn Error>> {
        let remaining = self.subnet_count(new_mask)?;
        Ok(Subnets {
            next: u128::from(self.lo()),
            step: 1u128.checked_shl((MAX_LENGTH - new_mask) as u32).unwrap_or(0),
            remaining,
            mask: new_mask,
        })
    }
}

impl std::fmt::Display for Ipv6Net {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

/// Lazy ascending sequence of equally sized subnets, see [`Ipv6Net::subnets`].
#[derive(Debug, Clone)]
pub struct Subnets {
    next: u128,
    step: u128,
    remaining: u128,
    mask: u8,
}

impl Subnets {
    /// Subnets not yet returned, may exceed `usize`.
    pub fn remaining(&self) -> u128 {
        self.remaining
    }
}

impl Iterator for Subnets {
    type Item = Ipv6Net;

    fn next(&mut self) -> Option<Ipv6Net> {
        if self.remaining == 0 {
            return None;
        }
        let net = Ipv6Net {
            addr: Ipv6Addr::from(self.next),
            mask: self.mask,
        };
        self.remaining -= 1;
        // wraps only after the last subnet at the top of the address space
        self.next = self.next.wrapping_add(self.step);
        Some(net)
    }

    fn nth(&mut self, n: usize) -> Option<Ipv6Net> {
        let n = n as u128;
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        self.remaining -= n;
        self.next = self.next.wrapping_add(self.step.wrapping_mul(n));
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

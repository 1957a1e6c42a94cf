/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::cmp::Ordering;
use std::fmt;

use crate::{AddressFamily, RangeAddr, RangeError};

/// An inclusive `[start, end]` address range within one address family.
///
/// Construction enforces that both bounds share a family and that
/// `start <= end`, so a value of this type is always a usable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpRange {
    start: RangeAddr,
    end: RangeAddr,
}

impl IpRange {
    pub fn new(start: RangeAddr, end: RangeAddr) -> Result<Self, RangeError> {
        match start.try_cmp(&end) {
            Err(_) => Err(RangeError::FamilyMismatch),
            Ok(Ordering::Greater) => Err(RangeError::Inverted { start, end }),
            Ok(_) => Ok(IpRange { start, end }),
        }
    }

    pub fn start(&self) -> RangeAddr {
        self.start
    }

    pub fn end(&self) -> RangeAddr {
        self.end
    }

    pub fn family(&self) -> AddressFamily {
        self.start.family()
    }

    /// Whether `addr` lies within the range. Addresses of the other
    /// family are never contained.
    pub fn contains(&self, addr: RangeAddr) -> bool {
        matches!(self.start.try_cmp(&addr), Ok(Ordering::Less | Ordering::Equal))
            && matches!(addr.try_cmp(&self.end), Ok(Ordering::Less | Ordering::Equal))
    }

    /// Bounds as raw integers when this is an IPv4 range.
    pub fn v4_bounds(&self) -> Option<(u32, u32)> {
        match (self.start, self.end) {
            (RangeAddr::V4(s), RangeAddr::V4(e)) => Some((s, e)),
            _ => None,
        }
    }

    /// Bounds as raw integers when this is an IPv6 range.
    pub fn v6_bounds(&self) -> Option<(u128, u128)> {
        match (self.start, self.end) {
            (RangeAddr::V6(s), RangeAddr::V6(e)) => Some((s, e)),
            _ => None,
        }
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn addr(s: &str) -> RangeAddr {
        RangeAddr::from_str(s).unwrap()
    }

    #[test]
    fn new_valid() {
        let r = IpRange::new(addr("10.0.0.0"), addr("10.0.0.255")).unwrap();
        assert_eq!(r.family(), AddressFamily::Ipv4);

        // a single address range is allowed
        let r = IpRange::new(addr("10.0.0.1"), addr("10.0.0.1")).unwrap();
        assert_eq!(r.start(), r.end());
    }

    #[test]
    fn new_inverted() {
        let r = IpRange::new(addr("10.0.1.0"), addr("10.0.0.255"));
        assert!(matches!(r, Err(RangeError::Inverted { .. })));
    }

    #[test]
    fn new_family_mismatch() {
        let r = IpRange::new(addr("10.0.0.0"), addr("2001:db8::1"));
        assert_eq!(r, Err(RangeError::FamilyMismatch));
    }

    #[test]
    fn contains_bounds() {
        let r = IpRange::new(addr("10.0.0.0"), addr("10.0.0.255")).unwrap();
        assert!(r.contains(addr("10.0.0.0")));
        assert!(r.contains(addr("10.0.0.128")));
        assert!(r.contains(addr("10.0.0.255")));
        assert!(!r.contains(addr("9.255.255.255")));
        assert!(!r.contains(addr("10.0.1.0")));
    }

    #[test]
    fn contains_other_family() {
        let r = IpRange::new(addr("::"), addr("ffff:ffff:ffff:ffff::")).unwrap();
        assert!(!r.contains(addr("10.0.0.1")));
    }

    #[test]
    fn bounds_accessors() {
        let r = IpRange::new(addr("10.0.0.0"), addr("10.0.0.255")).unwrap();
        assert_eq!(r.v4_bounds(), Some((0x0a000000, 0x0a0000ff)));
        assert_eq!(r.v6_bounds(), None);
    }
}

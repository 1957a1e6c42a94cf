/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::{AddressError, AddressFamily, FamilyMismatch};

/// An IP address held as a fixed-width unsigned integer, so that each
/// address family can be ordered numerically instead of lexically.
///
/// Addresses of different families do not compare; ordering is only
/// available through [`RangeAddr::try_cmp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeAddr {
    V4(u32),
    V6(u128),
}

impl RangeAddr {
    pub fn family(&self) -> AddressFamily {
        match self {
            RangeAddr::V4(_) => AddressFamily::Ipv4,
            RangeAddr::V6(_) => AddressFamily::Ipv6,
        }
    }

    pub fn try_cmp(&self, other: &RangeAddr) -> Result<Ordering, FamilyMismatch> {
        match (self, other) {
            (RangeAddr::V4(a), RangeAddr::V4(b)) => Ok(a.cmp(b)),
            (RangeAddr::V6(a), RangeAddr::V6(b)) => Ok(a.cmp(b)),
            _ => Err(FamilyMismatch),
        }
    }
}

impl From<IpAddr> for RangeAddr {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => RangeAddr::V4(v4.to_bits()),
            IpAddr::V6(v6) => RangeAddr::V6(v6.to_bits()),
        }
    }
}

impl FromStr for RangeAddr {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpAddr::from_str(s)
            .map(RangeAddr::from)
            .map_err(|_| AddressError::Invalid(s.to_string()))
    }
}

impl fmt::Display for RangeAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeAddr::V4(v) => Ipv4Addr::from_bits(*v).fmt(f),
            RangeAddr::V6(v) => Ipv6Addr::from_bits(*v).fmt(f),
        }
    }
}

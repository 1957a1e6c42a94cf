/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

const ALL_CONTINENT_NAMES: &[&str] = &[
    "Africa",
    "Antarctica",
    "Asia",
    "Europe",
    "North America",
    "Oceania",
    "South America",
];

/// The fixed 7-entry continent code table used to translate reference
/// data continent codes to continent names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ContinentCode {
    AF,
    AN,
    AS,
    EU,
    NA,
    OC,
    SA,
}

impl ContinentCode {
    pub fn name(&self) -> &'static str {
        ALL_CONTINENT_NAMES[*self as usize]
    }
}

impl FromStr for ContinentCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return Err(());
        }
        match (b[0].to_ascii_uppercase(), b[1].to_ascii_uppercase()) {
            (b'A', b'F') => Ok(ContinentCode::AF),
            (b'A', b'N') => Ok(ContinentCode::AN),
            (b'A', b'S') => Ok(ContinentCode::AS),
            (b'E', b'U') => Ok(ContinentCode::EU),
            (b'N', b'A') => Ok(ContinentCode::NA),
            (b'O', b'C') => Ok(ContinentCode::OC),
            (b'S', b'A') => Ok(ContinentCode::SA),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ContinentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_name() {
        assert_eq!(ContinentCode::AF.name(), "Africa");
        assert_eq!(ContinentCode::AN.name(), "Antarctica");
        assert_eq!(ContinentCode::AS.name(), "Asia");
        assert_eq!(ContinentCode::EU.name(), "Europe");
        assert_eq!(ContinentCode::NA.name(), "North America");
        assert_eq!(ContinentCode::OC.name(), "Oceania");
        assert_eq!(ContinentCode::SA.name(), "South America");
    }

    #[test]
    fn from_str_any_case() {
        assert_eq!(ContinentCode::from_str("EU").unwrap(), ContinentCode::EU);
        assert_eq!(ContinentCode::from_str("eu").unwrap(), ContinentCode::EU);
        assert_eq!(ContinentCode::from_str("Na").unwrap(), ContinentCode::NA);
        assert_eq!(ContinentCode::from_str("aS").unwrap(), ContinentCode::AS);
    }

    #[test]
    fn from_str_unmapped() {
        assert!(ContinentCode::from_str("XX").is_err());
        assert!(ContinentCode::from_str("").is_err());
        assert!(ContinentCode::from_str("A").is_err());
        assert!(ContinentCode::from_str("Asia").is_err());
        assert!(ContinentCode::from_str("EU ").is_err());
    }
}

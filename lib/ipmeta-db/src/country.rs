/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::str::FromStr;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;

use ipmeta_types::ContinentCode;

/// Primary reference: one entry of the ISO-3166 country table. The
/// `region` field already holds a continent name.
#[derive(Debug, Clone)]
pub struct IsoCountryEntry {
    pub alpha2: SmolStr,
    pub name: String,
    pub region: String,
}

/// Fallback reference: one entry of the GeoNames country table. Its
/// continent is a two-letter code that still needs translation.
#[derive(Debug, Clone)]
pub struct GeoNameCountryEntry {
    pub code: SmolStr,
    pub code3: SmolStr,
    pub name: String,
    pub continent_code: SmolStr,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountryResolveError {
    #[error("country code {0} is not in any reference table")]
    UnknownCountry(SmolStr),
    /// The fallback table matched, but its continent code is outside the
    /// fixed translation table. A distinct reason so that operators can
    /// tell stale reference data from a plain miss.
    #[error("country code {0} maps to unmapped continent code {1}")]
    UnmappedContinent(SmolStr, SmolStr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCountry<'a> {
    pub country_name: &'a str,
    pub continent_name: &'a str,
}

/// Resolves a country code to `(country name, continent name)` with a
/// deterministic two-source fallback chain: the ISO table wins, the
/// GeoNames table is consulted only on a primary miss.
///
/// Both tables are keyed case-insensitively and fully in memory; the
/// resolver is immutable once built.
pub struct CountryResolver {
    primary: FxHashMap<SmolStr, IsoCountryEntry>,
    fallback: FxHashMap<SmolStr, GeoNameCountryEntry>,
}

impl CountryResolver {
    pub fn new(primary: Vec<IsoCountryEntry>, fallback: Vec<GeoNameCountryEntry>) -> Self {
        let primary = primary
            .into_iter()
            .map(|e| (upper_key(&e.alpha2), e))
            .collect();
        let fallback = fallback
            .into_iter()
            .map(|e| (upper_key(&e.code), e))
            .collect();
        CountryResolver { primary, fallback }
    }

    pub fn resolve(&self, country_code: &str) -> Result<ResolvedCountry<'_>, CountryResolveError> {
        let key = upper_key(country_code);
        if let Some(iso) = self.primary.get(&key) {
            return Ok(ResolvedCountry {
                country_name: &iso.name,
                continent_name: &iso.region,
            });
        }
        let Some(geo) = self.fallback.get(&key) else {
            return Err(CountryResolveError::UnknownCountry(key));
        };
        let Ok(continent) = ContinentCode::from_str(&geo.continent_code) else {
            return Err(CountryResolveError::UnmappedContinent(
                key,
                geo.continent_code.clone(),
            ));
        };
        Ok(ResolvedCountry {
            country_name: &geo.name,
            continent_name: continent.name(),
        })
    }
}

fn upper_key(s: &str) -> SmolStr {
    SmolStr::new(s.to_ascii_uppercase())
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use log::{debug, warn};

use ipmeta_db::{CityRecord, CountryResolveError, CountryResolver};

use crate::EnrichStats;

/// A city range record together with its resolved country and continent
/// names.
#[derive(Debug, Clone)]
pub struct EnrichedCityRecord {
    pub record: CityRecord,
    pub country_name: String,
    pub continent_name: String,
}

impl EnrichedCityRecord {
    /// Field layout of the published city shards.
    pub fn csv_fields(&self) -> [String; 10] {
        let r = &self.record;
        [
            r.range.start().to_string(),
            r.range.end().to_string(),
            r.continent_code.to_string(),
            r.country_code.to_string(),
            self.continent_name.clone(),
            self.country_name.clone(),
            r.state_province.clone(),
            r.city.clone(),
            r.latitude.to_string(),
            r.longitude.to_string(),
        ]
    }
}

/// A streaming transform over city records: output order equals input
/// order, dropped records are logged and counted under their reason.
pub struct CityEnrichIter<'a, I> {
    countries: &'a CountryResolver,
    stats: &'a EnrichStats,
    input: I,
}

impl<'a, I> CityEnrichIter<'a, I> {
    pub(crate) fn new(countries: &'a CountryResolver, stats: &'a EnrichStats, input: I) -> Self {
        CityEnrichIter {
            countries,
            stats,
            input,
        }
    }
}

impl<I> Iterator for CityEnrichIter<'_, I>
where
    I: Iterator<Item = CityRecord>,
{
    type Item = EnrichedCityRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = self.input.next()?;
            self.stats.add_city_total();

            if record.is_reserved() {
                self.stats.add_city_reserved();
                debug!("skipping reserved range {}", record.range);
                continue;
            }

            match self.countries.resolve(&record.country_code) {
                Ok(resolved) => {
                    self.stats.add_city_emitted();
                    return Some(EnrichedCityRecord {
                        country_name: resolved.country_name.to_string(),
                        continent_name: resolved.continent_name.to_string(),
                        record,
                    });
                }
                Err(e @ CountryResolveError::UnknownCountry(_)) => {
                    self.stats.add_country_unresolved();
                    warn!("dropping range {}: {e}", record.range);
                }
                Err(e @ CountryResolveError::UnmappedContinent(..)) => {
                    self.stats.add_continent_unmapped();
                    warn!("dropping range {}: {e}", record.range);
                }
            }
        }
    }
}

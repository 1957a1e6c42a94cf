/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::collections::BTreeSet;
use std::sync::Arc;

use ipmeta_db::{AsnRecord, CityRecord, CountryResolver, GeoNameCountryEntry, IpRangeIndex, IsoCountryEntry};

use crate::city::CityEnrichIter;
use crate::{EnrichStats, datacenter};

/// Shared state for one batch run: the reference resolvers, the ASN
/// containment index and the run counters. Built once from fully
/// materialized inputs, read-only afterwards.
pub struct PipelineContext {
    countries: CountryResolver,
    asn_index: IpRangeIndex<AsnRecord>,
    stats: Arc<EnrichStats>,
}

impl PipelineContext {
    pub fn build(
        iso_countries: Vec<IsoCountryEntry>,
        geonames_countries: Vec<GeoNameCountryEntry>,
        asn_records: Vec<AsnRecord>,
    ) -> Self {
        let countries = CountryResolver::new(iso_countries, geonames_countries);
        let asn_index = IpRangeIndex::build(asn_records.into_iter().map(|r| (r.range, r)));
        PipelineContext {
            countries,
            asn_index,
            stats: Arc::new(EnrichStats::default()),
        }
    }

    pub fn countries(&self) -> &CountryResolver {
        &self.countries
    }

    pub fn asn_index(&self) -> &IpRangeIndex<AsnRecord> {
        &self.asn_index
    }

    pub fn stats(&self) -> &EnrichStats {
        &self.stats
    }

    /// City enrichment: a lazy, order-preserving stream of enriched
    /// records. Reserved (ZZ) and unresolvable rows are dropped and
    /// counted, never fatal.
    pub fn enrich_cities<I>(&self, input: I) -> CityEnrichIter<'_, I::IntoIter>
    where
        I: IntoIterator<Item = CityRecord>,
    {
        CityEnrichIter::new(&self.countries, &self.stats, input.into_iter())
    }

    /// Datacenter list matching: resolve each address/CIDR token against
    /// the ASN index across `workers` threads and collect the distinct
    /// matched AS numbers in ascending order.
    pub fn match_datacenter_asns(&self, entries: &[String], workers: usize) -> BTreeSet<u64> {
        datacenter::match_entries(&self.asn_index, &self.stats, entries, workers)
    }
}

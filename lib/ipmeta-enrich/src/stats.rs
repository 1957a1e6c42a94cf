/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default, Clone, Copy, Debug)]
pub struct EnrichSnapshot {
    pub city_total: u64,
    pub city_emitted: u64,
    pub city_reserved: u64,
    pub country_unresolved: u64,
    pub continent_unmapped: u64,
    pub address_invalid: u64,
    pub asn_matched: u64,
    pub asn_unmatched: u64,
}

/// Counters for one batch run. Every dropped record is counted under its
/// drop reason, so a run summary can tell stale reference data (unmapped
/// continent codes) from plain reference misses.
#[derive(Default)]
pub struct EnrichStats {
    city_total: AtomicU64,
    city_emitted: AtomicU64,
    city_reserved: AtomicU64,
    country_unresolved: AtomicU64,
    continent_unmapped: AtomicU64,
    address_invalid: AtomicU64,
    asn_matched: AtomicU64,
    asn_unmatched: AtomicU64,
}

impl EnrichStats {
    pub(crate) fn add_city_total(&self) {
        self.city_total.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_city_emitted(&self) {
        self.city_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_city_reserved(&self) {
        self.city_reserved.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_country_unresolved(&self) {
        self.country_unresolved.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_continent_unmapped(&self) {
        self.continent_unmapped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_address_invalid(&self) {
        self.address_invalid.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_asn_matched(&self) {
        self.asn_matched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_asn_unmatched(&self) {
        self.asn_unmatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> EnrichSnapshot {
        EnrichSnapshot {
            city_total: self.city_total.load(Ordering::Relaxed),
            city_emitted: self.city_emitted.load(Ordering::Relaxed),
            city_reserved: self.city_reserved.load(Ordering::Relaxed),
            country_unresolved: self.country_unresolved.load(Ordering::Relaxed),
            continent_unmapped: self.continent_unmapped.load(Ordering::Relaxed),
            address_invalid: self.address_invalid.load(Ordering::Relaxed),
            asn_matched: self.asn_matched.load(Ordering::Relaxed),
            asn_unmatched: self.asn_unmatched.load(Ordering::Relaxed),
        }
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

mod record;
pub use record::{AsnRecord, CityRecord};

mod index;
pub use index::IpRangeIndex;

mod country;
pub use country::{
    CountryResolveError, CountryResolver, GeoNameCountryEntry, IsoCountryEntry, ResolvedCountry,
};

pub mod file;

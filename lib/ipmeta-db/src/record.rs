/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use smol_str::SmolStr;

use ipmeta_types::IpRange;

/// One row of the ASN range dataset.
#[derive(Debug, Clone)]
pub struct AsnRecord {
    pub range: IpRange,
    pub number: u64,
    pub country: Option<SmolStr>,
    pub organization: String,
}

impl AsnRecord {
    /// The dataset marks unannounced address space with AS0, no country
    /// and a "Not routed" placeholder organization. This is a recognized
    /// sentinel, not malformed data.
    pub fn is_non_routable(&self) -> bool {
        self.number == 0
            && self.country.is_none()
            && self.organization.eq_ignore_ascii_case("Not routed")
    }
}

/// One row of the city range dataset.
#[derive(Debug, Clone)]
pub struct CityRecord {
    pub range: IpRange,
    pub continent_code: SmolStr,
    pub country_code: SmolStr,
    pub state_province: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityRecord {
    /// Country code ZZ marks reserved/unknown address space; such rows
    /// are never enriched.
    pub fn is_reserved(&self) -> bool {
        self.country_code.eq_ignore_ascii_case("ZZ")
    }
}

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;

use smol_str::SmolStr;

use ipmeta_db::{AsnRecord, CityRecord, GeoNameCountryEntry, IsoCountryEntry};
use ipmeta_enrich::{PipelineContext, asn_document, write_sharded};
use ipmeta_types::{IpRange, RangeAddr};

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{}_{}", prefix, std::process::id()));
        std::fs::create_dir_all(&path).expect("failed to create test directory");
        TempDir { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn range(start: &str, end: &str) -> IpRange {
    IpRange::new(
        RangeAddr::from_str(start).unwrap(),
        RangeAddr::from_str(end).unwrap(),
    )
    .unwrap()
}

fn city(start: &str, end: &str, country: &str, name: &str) -> CityRecord {
    CityRecord {
        range: range(start, end),
        continent_code: SmolStr::new("XX"),
        country_code: SmolStr::new(country),
        state_province: "State".to_string(),
        city: name.to_string(),
        latitude: 10.25,
        longitude: -3.5,
    }
}

fn sample_context() -> PipelineContext {
    PipelineContext::build(
        vec![IsoCountryEntry {
            alpha2: SmolStr::new("JP"),
            name: "Japan".to_string(),
            region: "Asia".to_string(),
        }],
        vec![GeoNameCountryEntry {
            code: SmolStr::new("DE"),
            code3: SmolStr::new("DEU"),
            name: "Germany".to_string(),
            continent_code: SmolStr::new("EU"),
        }],
        vec![AsnRecord {
            range: range("10.0.0.0", "10.0.0.255"),
            number: 64512,
            country: Some(SmolStr::new("US")),
            organization: "X".to_string(),
        }],
    )
}

#[test]
fn city_enrichment_to_shards() {
    let ctx = sample_context();
    let dir = TempDir::new("ipmeta_enrich_flow_city");
    let base = dir.path().join("city.csv");

    let input = vec![
        city("1.0.0.0", "1.0.0.255", "JP", "Tokyo"),
        city("2.0.0.0", "2.0.0.255", "ZZ", "Nowhere"),
        city("3.0.0.0", "3.0.0.255", "DE", "Berlin, Mitte"),
        city("4.0.0.0", "4.0.0.255", "QQ", "Lost"),
        city("5.0.0.0", "5.0.0.255", "JP", "Osaka"),
    ];

    let enriched = ctx.enrich_cities(input).map(|r| r.csv_fields());
    let manifest = write_sharded(enriched, &base, 2).unwrap();

    // 3 of 5 records survive: ZZ and the unknown country are dropped
    assert_eq!(manifest.shard_count(), 2);
    assert_eq!(manifest.files(), ["city.csv-1", "city.csv-2"]);

    let manifest_path = dir.path().join("all_city.txt");
    manifest.write_to(&manifest_path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&manifest_path).unwrap(),
        "city.csv-1\ncity.csv-2\n"
    );

    let mut rows = Vec::new();
    for name in manifest.files() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(dir.path().join(name))
            .unwrap();
        for record in reader.records() {
            rows.push(record.unwrap());
        }
    }
    assert_eq!(rows.len(), 3);
    // order equals input order
    assert_eq!(&rows[0][0], "1.0.0.0");
    assert_eq!(&rows[0][4], "Asia");
    assert_eq!(&rows[0][5], "Japan");
    assert_eq!(&rows[1][0], "3.0.0.0");
    assert_eq!(&rows[1][4], "Europe");
    assert_eq!(&rows[1][5], "Germany");
    // embedded separator survives the round trip
    assert_eq!(&rows[1][7], "Berlin, Mitte");
    assert_eq!(&rows[2][0], "5.0.0.0");

    let stats = ctx.stats().snapshot();
    assert_eq!(stats.city_total, 5);
    assert_eq!(stats.city_emitted, 3);
    assert_eq!(stats.city_reserved, 1);
    assert_eq!(stats.country_unresolved, 1);
}

#[test]
fn datacenter_match_to_document() {
    let ctx = sample_context();

    let entries = vec!["10.0.0.5".to_string(), "192.168.1.1".to_string()];
    let matched = ctx.match_datacenter_asns(&entries, 2);

    assert_eq!(matched.iter().copied().collect::<Vec<_>>(), vec![64512]);
    assert_eq!(
        asn_document(&matched),
        serde_json::json!({"asn": [64512]})
    );
}

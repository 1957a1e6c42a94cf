/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::anyhow;
use flate2::bufread::GzDecoder;
use smol_str::SmolStr;

use ipmeta_types::{IpRange, RangeAddr};

use crate::{AsnRecord, CityRecord, GeoNameCountryEntry, IsoCountryEntry};

fn open_input(file: &Path) -> anyhow::Result<Box<dyn Read>> {
    let f = File::open(file).map_err(|e| anyhow!("failed to open file {}: {e}", file.display()))?;
    if file.extension().and_then(|ext| ext.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(BufReader::new(f))))
    } else {
        Ok(Box::new(f))
    }
}

/// Load the ASN range dataset (iptoasn.com combined TSV), optionally
/// gzip compressed. Any malformed line is fatal: a partially indexed
/// reference dataset is worse than no dataset.
pub fn load_asn(file: &Path) -> anyhow::Result<Vec<AsnRecord>> {
    load_asn_from_tsv(open_input(file)?)
}

fn load_asn_from_tsv<R: io::Read>(stream: R) -> anyhow::Result<Vec<AsnRecord>> {
    let mut records = Vec::new();

    let reader = BufReader::new(stream);
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| anyhow!("failed to read line #{i}: {e}"))?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut items = line.splitn(5, '\t');
        let (Some(start), Some(end), Some(asn), Some(country), Some(org)) = (
            items.next(),
            items.next(),
            items.next(),
            items.next(),
            items.next(),
        ) else {
            return Err(anyhow!("invalid line #{i}: expected 5 tab separated fields"));
        };

        let start = RangeAddr::from_str(start).map_err(|e| anyhow!("invalid line #{i}: {e}"))?;
        let end = RangeAddr::from_str(end).map_err(|e| anyhow!("invalid line #{i}: {e}"))?;
        let range = IpRange::new(start, end).map_err(|e| anyhow!("invalid line #{i}: {e}"))?;
        let number = u64::from_str(asn).map_err(|_| anyhow!("invalid as number {asn} in line #{i}"))?;
        let country = if country.is_empty() || country.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(SmolStr::new(country))
        };

        records.push(AsnRecord {
            range,
            number,
            country,
            organization: org.to_string(),
        });
    }

    Ok(records)
}

/// Load the city range dataset (DB-IP city lite CSV), optionally gzip
/// compressed.
pub fn load_city(file: &Path) -> anyhow::Result<Vec<CityRecord>> {
    load_city_from_csv(open_input(file)?)
}

fn load_city_from_csv<R: io::Read>(stream: R) -> anyhow::Result<Vec<CityRecord>> {
    let mut records = Vec::new();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(stream);
    for (i, r) in reader.records().enumerate() {
        let record = r.map_err(|e| anyhow!("failed to read record #{i}: {e}"))?;
        if record.len() < 8 {
            return Err(anyhow!(
                "invalid record #{i}: expected 8 fields, got {}",
                record.len()
            ));
        }

        let start = RangeAddr::from_str(&record[0]).map_err(|e| anyhow!("invalid record #{i}: {e}"))?;
        let end = RangeAddr::from_str(&record[1]).map_err(|e| anyhow!("invalid record #{i}: {e}"))?;
        let range = IpRange::new(start, end).map_err(|e| anyhow!("invalid record #{i}: {e}"))?;
        let latitude = f64::from_str(&record[6])
            .map_err(|_| anyhow!("invalid latitude {} in record #{i}", &record[6]))?;
        let longitude = f64::from_str(&record[7])
            .map_err(|_| anyhow!("invalid longitude {} in record #{i}", &record[7]))?;

        records.push(CityRecord {
            range,
            continent_code: SmolStr::new(&record[2]),
            country_code: SmolStr::new(&record[3]),
            state_province: record[4].to_string(),
            city: record[5].to_string(),
            latitude,
            longitude,
        });
    }

    Ok(records)
}

/// Load the primary country reference table, a JSON array of ISO-3166
/// objects carrying `name`, `alpha-2` and `region` fields.
pub fn load_iso_countries(file: &Path) -> anyhow::Result<Vec<IsoCountryEntry>> {
    load_iso_from_json(open_input(file)?)
}

fn load_iso_from_json<R: io::Read>(stream: R) -> anyhow::Result<Vec<IsoCountryEntry>> {
    let value: serde_json::Value =
        serde_json::from_reader(stream).map_err(|e| anyhow!("invalid json document: {e}"))?;
    let Some(array) = value.as_array() else {
        return Err(anyhow!("the json document is not an array"));
    };

    let mut entries = Vec::with_capacity(array.len());
    for (i, v) in array.iter().enumerate() {
        let Some(obj) = v.as_object() else {
            return Err(anyhow!("element #{i} is not an object"));
        };
        let name = get_str_field(obj, "name", i)?;
        let alpha2 = get_str_field(obj, "alpha-2", i)?;
        let region = get_str_field(obj, "region", i)?;
        entries.push(IsoCountryEntry {
            alpha2: SmolStr::new(alpha2),
            name: name.to_string(),
            region: region.to_string(),
        });
    }

    Ok(entries)
}

fn get_str_field<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    key: &str,
    i: usize,
) -> anyhow::Result<&'a str> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("element #{i} has no string field {key}"))
}

/// Load the fallback country reference table (GeoNames countryInfo.txt):
/// tab separated, `#` comment lines, country code / iso3 / name /
/// continent code in columns 0, 1, 4 and 8.
pub fn load_geonames_countries(file: &Path) -> anyhow::Result<Vec<GeoNameCountryEntry>> {
    load_geonames_from_text(open_input(file)?)
}

fn load_geonames_from_text<R: io::Read>(stream: R) -> anyhow::Result<Vec<GeoNameCountryEntry>> {
    let mut entries = Vec::new();

    let reader = BufReader::new(stream);
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| anyhow!("failed to read line #{i}: {e}"))?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let items: Vec<&str> = line.split('\t').collect();
        if items.len() < 9 {
            return Err(anyhow!(
                "invalid line #{i}: expected at least 9 tab separated fields, got {}",
                items.len()
            ));
        }
        entries.push(GeoNameCountryEntry {
            code: SmolStr::new(items[0]),
            code3: SmolStr::new(items[1]),
            name: items[4].to_string(),
            continent_code: SmolStr::new(items[8]),
        });
    }

    Ok(entries)
}

/// Load a plain text address/CIDR list (one token per line, `#` comment
/// lines skipped), such as the firehol datacenters netset.
pub fn load_address_list(file: &Path) -> anyhow::Result<Vec<String>> {
    load_address_list_from_text(open_input(file)?)
}

fn load_address_list_from_text<R: io::Read>(stream: R) -> anyhow::Result<Vec<String>> {
    let mut entries = Vec::new();

    let reader = BufReader::new(stream);
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| anyhow!("failed to read line #{i}: {e}"))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        entries.push(token.to_string());
    }

    Ok(entries)
}

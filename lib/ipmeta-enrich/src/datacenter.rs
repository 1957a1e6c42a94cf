/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Mutex;

use log::warn;

use ipmeta_db::{AsnRecord, IpRangeIndex};
use ipmeta_types::RangeAddr;

use crate::EnrichStats;

pub(crate) fn match_entries(
    index: &IpRangeIndex<AsnRecord>,
    stats: &EnrichStats,
    entries: &[String],
    workers: usize,
) -> BTreeSet<u64> {
    let matched = Mutex::new(BTreeSet::new());
    let workers = workers.max(1);
    let chunk_size = entries.len().div_ceil(workers).max(1);

    // each containment query is independent and read-only, so the list
    // can be split across workers that merge into one ordered collector
    std::thread::scope(|s| {
        let matched = &matched;
        for chunk in entries.chunks(chunk_size) {
            s.spawn(move || {
                let mut local = BTreeSet::new();
                for entry in chunk {
                    if let Some(asn) = match_entry(index, stats, entry) {
                        local.insert(asn);
                    }
                }
                matched.lock().unwrap().extend(local);
            });
        }
    });

    matched.into_inner().unwrap()
}

fn match_entry(index: &IpRangeIndex<AsnRecord>, stats: &EnrichStats, entry: &str) -> Option<u64> {
    // only the leading address of a CIDR token is tested against the index
    let text = entry.split_once('/').map_or(entry, |(addr, _)| addr);
    let Ok(addr) = RangeAddr::from_str(text) else {
        stats.add_address_invalid();
        warn!("invalid datacenter entry {entry:?}");
        return None;
    };

    match index.containing(addr) {
        Some(record) if record.number > 0 => {
            stats.add_asn_matched();
            Some(record.number)
        }
        _ => {
            stats.add_asn_unmatched();
            None
        }
    }
}

/// The matched AS numbers as a single structured document:
/// `{"asn": [..]}` with the numbers in ascending order.
pub fn asn_document(asn_set: &BTreeSet<u64>) -> serde_json::Value {
    serde_json::json!({
        "asn": asn_set.iter().collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PipelineContext;
    use ipmeta_types::IpRange;
    use smol_str::SmolStr;

    fn asn(start: &str, end: &str, number: u64, org: &str) -> AsnRecord {
        AsnRecord {
            range: IpRange::new(
                RangeAddr::from_str(start).unwrap(),
                RangeAddr::from_str(end).unwrap(),
            )
            .unwrap(),
            number,
            country: if number == 0 { None } else { Some(SmolStr::new("US")) },
            organization: org.to_string(),
        }
    }

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedup_and_order() {
        let ctx = PipelineContext::build(
            Vec::new(),
            Vec::new(),
            vec![
                asn("1.0.0.0", "1.0.0.255", 70, "A"),
                asn("2.0.0.0", "2.0.0.255", 15, "B"),
                asn("3.0.0.0", "3.0.0.255", 0, "Not routed"),
            ],
        );
        let input = entries(&[
            "1.0.0.1", // 70
            "2.0.0.1", // 15
            "1.0.0.2", // 70 again
            "3.0.0.1", // AS0, excluded
            "2.0.0.2", // 15 again
            "9.9.9.9", // unmatched
        ]);
        let matched = ctx.match_datacenter_asns(&input, 2);
        assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec![15, 70]);

        let stats = ctx.stats().snapshot();
        assert_eq!(stats.asn_matched, 4);
        assert_eq!(stats.asn_unmatched, 2);
    }

    #[test]
    fn cidr_token_uses_leading_address() {
        let ctx = PipelineContext::build(
            Vec::new(),
            Vec::new(),
            vec![asn("10.0.0.0", "10.0.0.127", 64512, "X")],
        );
        // the block reaches past the range end, only 10.0.0.0 is tested
        let matched = ctx.match_datacenter_asns(&entries(&["10.0.0.0/24"]), 1);
        assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec![64512]);
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let ctx = PipelineContext::build(
            Vec::new(),
            Vec::new(),
            vec![asn("10.0.0.0", "10.0.0.255", 64512, "X")],
        );
        let matched = ctx.match_datacenter_asns(&entries(&["nonsense", "10.0.0.5"]), 1);
        assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec![64512]);
        assert_eq!(ctx.stats().snapshot().address_invalid, 1);
    }

    #[test]
    fn more_workers_than_entries() {
        let ctx = PipelineContext::build(
            Vec::new(),
            Vec::new(),
            vec![asn("10.0.0.0", "10.0.0.255", 64512, "X")],
        );
        let matched = ctx.match_datacenter_asns(&entries(&["10.0.0.5"]), 16);
        assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec![64512]);
    }

    #[test]
    fn document_layout() {
        let ctx = PipelineContext::build(
            Vec::new(),
            Vec::new(),
            vec![asn("10.0.0.0", "10.0.0.255", 64512, "X")],
        );
        let matched = ctx.match_datacenter_asns(&entries(&["10.0.0.5", "192.168.1.1"]), 2);
        let doc = asn_document(&matched);
        assert_eq!(doc, serde_json::json!({"asn": [64512]}));
    }
}

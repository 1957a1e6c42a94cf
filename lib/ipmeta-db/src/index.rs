/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use ipmeta_types::{IpRange, RangeAddr};

struct FamilyTable<K, T> {
    entries: Vec<(K, K, T)>,
}

impl<K: Copy + Ord, T> FamilyTable<K, T> {
    fn build(mut entries: Vec<(K, K, T)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        FamilyTable { entries }
    }

    fn containing(&self, key: K) -> Option<&T> {
        let idx = self.entries.partition_point(|e| e.0 <= key);
        if idx == 0 {
            return None;
        }
        let (_, end, value) = &self.entries[idx - 1];
        if key <= *end {
            return Some(value);
        }
        // The dataset declares its ranges non-overlapping, which makes the
        // candidate above the only possible hit. If that assumption is
        // broken, rescan in sorted order so the first range by start wins.
        for (start, end, value) in &self.entries[..idx - 1] {
            if *start > key {
                break;
            }
            if key <= *end {
                return Some(value);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A read-only containment index over `(IpRange, payload)` entries.
///
/// Both address families are indexed independently; a query is routed by
/// the family of the queried address. Construction sorts each family
/// table by range start (ties by end), queries then cost O(log n).
pub struct IpRangeIndex<T> {
    v4: FamilyTable<u32, T>,
    v6: FamilyTable<u128, T>,
}

impl<T> IpRangeIndex<T> {
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (IpRange, T)>,
    {
        let mut v4 = Vec::new();
        let mut v6 = Vec::new();
        for (range, value) in entries {
            if let Some((start, end)) = range.v4_bounds() {
                v4.push((start, end, value));
            } else if let Some((start, end)) = range.v6_bounds() {
                v6.push((start, end, value));
            }
        }
        IpRangeIndex {
            v4: FamilyTable::build(v4),
            v6: FamilyTable::build(v6),
        }
    }

    /// Find the payload of the range containing `addr`, if any.
    pub fn containing(&self, addr: RangeAddr) -> Option<&T> {
        match addr {
            RangeAddr::V4(v) => self.v4.containing(v),
            RangeAddr::V6(v) => self.v6.containing(v),
        }
    }

    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

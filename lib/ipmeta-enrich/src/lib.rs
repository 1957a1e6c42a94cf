/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

mod stats;
pub use stats::{EnrichSnapshot, EnrichStats};

mod context;
pub use context::PipelineContext;

mod city;
pub use city::{CityEnrichIter, EnrichedCityRecord};

mod datacenter;
pub use datacenter::asn_document;

mod split;
pub use split::{DEFAULT_SHARD_CAPACITY, ShardManifest, ShardedCsvWriter, write_sharded};

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::anyhow;

/// Shard capacity used for the published datasets.
pub const DEFAULT_SHARD_CAPACITY: usize = 500_000;

/// The shard files produced by one write run, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardManifest {
    files: Vec<String>,
}

impl ShardManifest {
    pub fn shard_count(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Write the manifest as a plain list, one shard file name per line.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let f = File::create(path)
            .map_err(|e| anyhow!("failed to create manifest file {}: {e}", path.display()))?;
        let mut writer = BufWriter::new(f);
        for name in &self.files {
            writeln!(writer, "{name}")
                .map_err(|e| anyhow!("failed to write manifest file {}: {e}", path.display()))?;
        }
        writer
            .flush()
            .map_err(|e| anyhow!("failed to flush manifest file {}: {e}", path.display()))?;
        Ok(())
    }
}

/// Streams CSV records across size-capped shard files named
/// `<base>-<n>`, n counted from 1 in creation order.
///
/// Fields are quoted only when they contain the separator, the quote
/// character or a line terminator, with embedded quotes doubled. A shard
/// only enters the manifest once it has been fully flushed and closed,
/// so an I/O failure can never leave a partial shard referenced.
pub struct ShardedCsvWriter {
    dir: PathBuf,
    base_name: String,
    capacity: usize,
    shard_index: usize,
    written: usize,
    current: Option<csv::Writer<BufWriter<File>>>,
    manifest: Vec<String>,
}

impl ShardedCsvWriter {
    pub fn new(base: impl Into<PathBuf>, capacity: usize) -> anyhow::Result<Self> {
        if capacity == 0 {
            return Err(anyhow!("shard capacity must not be zero"));
        }
        let base: PathBuf = base.into();
        let Some(base_name) = base.file_name().and_then(|n| n.to_str()) else {
            return Err(anyhow!("invalid shard base path {}", base.display()));
        };
        Ok(ShardedCsvWriter {
            base_name: base_name.to_string(),
            dir: base.parent().map_or_else(PathBuf::new, Path::to_path_buf),
            capacity,
            shard_index: 0,
            written: 0,
            current: None,
            manifest: Vec::new(),
        })
    }

    fn open_next_shard(&mut self) -> anyhow::Result<()> {
        let name = format!("{}-{}", self.base_name, self.shard_index + 1);
        let path = self.dir.join(&name);
        let file = File::create(&path)
            .map_err(|e| anyhow!("failed to create shard file {}: {e}", path.display()))?;
        self.shard_index += 1;
        self.written = 0;
        self.current = Some(csv::Writer::from_writer(BufWriter::new(file)));
        Ok(())
    }

    fn close_current_shard(&mut self) -> anyhow::Result<()> {
        let Some(writer) = self.current.take() else {
            return Ok(());
        };
        let name = format!("{}-{}", self.base_name, self.shard_index);
        let mut inner = writer
            .into_inner()
            .map_err(|e| anyhow!("failed to flush shard file {name}: {e}"))?;
        inner
            .flush()
            .map_err(|e| anyhow!("failed to flush shard file {name}: {e}"))?;
        // only a fully flushed and closed shard may be referenced
        self.manifest.push(name);
        Ok(())
    }

    pub fn write_record<I, F>(&mut self, record: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        if self.current.is_none() {
            self.open_next_shard()?;
        }
        let writer = self
            .current
            .as_mut()
            .ok_or_else(|| anyhow!("no open shard file"))?;
        writer.write_record(record).map_err(|e| {
            anyhow!(
                "failed to write record to shard file {}-{}: {e}",
                self.base_name,
                self.shard_index
            )
        })?;
        self.written += 1;
        if self.written >= self.capacity {
            self.close_current_shard()?;
        }
        Ok(())
    }

    /// Close the open shard, if any, and hand out the manifest.
    pub fn finish(mut self) -> anyhow::Result<ShardManifest> {
        self.close_current_shard()?;
        Ok(ShardManifest {
            files: self.manifest,
        })
    }
}

/// Drain `records` into shards of at most `capacity` records below
/// `base` and return the manifest.
pub fn write_sharded<R, I, F>(
    records: R,
    base: impl Into<PathBuf>,
    capacity: usize,
) -> anyhow::Result<ShardManifest>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = ShardedCsvWriter::new(base, capacity)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()
}

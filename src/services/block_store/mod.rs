//! Time-block store interface.
//!
//! The grid never persists anything itself; it reads the day's blocks from a
//! [`TimeBlockStore`] and hands creation and edit requests back to it.
//! [`InMemoryBlockStore`] backs the demo host and the tests, with JSON
//! snapshots for seeding.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use crate::models::time_block::{TimeBlock, TimeBlockUpdate};

/// Event-store collaborator consumed by the time-table.
pub trait TimeBlockStore {
    /// Blocks of `date`, in creation order.
    fn blocks_for_day(&self, date: NaiveDate) -> Vec<TimeBlock>;

    /// Store a new block on `date`. The store assigns the id.
    fn create(&mut self, date: NaiveDate, block: TimeBlock) -> Result<TimeBlock>;

    fn update(&mut self, block_id: &str, update: &TimeBlockUpdate) -> Result<TimeBlock>;

    fn delete(&mut self, block_id: &str) -> Result<()>;
}

/// Process-local store keyed by day.
#[derive(Debug, Default)]
pub struct InMemoryBlockStore {
    days: BTreeMap<NaiveDate, Vec<TimeBlock>>,
    next_id: u64,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a JSON array of blocks. Blocks without a date go to
    /// `default_date`; blocks without an id get one.
    pub fn from_json(json: &str, default_date: NaiveDate) -> Result<Self> {
        let blocks: Vec<TimeBlock> =
            serde_json::from_str(json).context("Failed to parse time blocks JSON")?;
        let mut store = Self::new();
        for block in blocks {
            let date = block.date.unwrap_or(default_date);
            if let Err(err) = store.insert(date, block) {
                log::warn!("Skipping seeded time block: {:#}", err);
            }
        }
        Ok(store)
    }

    pub fn load_json(path: &Path, default_date: NaiveDate) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read time blocks from {}", path.display()))?;
        Self::from_json(&data, default_date)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let blocks: Vec<&TimeBlock> = self.days.values().flatten().collect();
        let data = serde_json::to_string_pretty(&blocks)?;
        fs::write(path, data)
            .with_context(|| format!("failed to write time blocks to {}", path.display()))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, date: NaiveDate, mut block: TimeBlock) -> Result<TimeBlock> {
        block.validate().map_err(|e| anyhow!(e))?;
        if block.id.is_empty() {
            self.next_id += 1;
            block.id = format!("block-{}", self.next_id);
        }
        if self.find(&block.id).is_some() {
            return Err(anyhow!("Time block {} already exists", block.id));
        }
        block.date = Some(date);
        self.days.entry(date).or_default().push(block.clone());
        Ok(block)
    }

    fn find(&self, block_id: &str) -> Option<(NaiveDate, usize)> {
        self.days.iter().find_map(|(date, blocks)| {
            blocks
                .iter()
                .position(|block| block.id == block_id)
                .map(|index| (*date, index))
        })
    }
}

impl TimeBlockStore for InMemoryBlockStore {
    fn blocks_for_day(&self, date: NaiveDate) -> Vec<TimeBlock> {
        self.days.get(&date).cloned().unwrap_or_default()
    }

    fn create(&mut self, date: NaiveDate, mut block: TimeBlock) -> Result<TimeBlock> {
        block.id.clear();
        let block = self.insert(date, block)?;
        log::info!(
            "Created time block {} on {} ({:?} - {:?})",
            block.id,
            date,
            block.start_time,
            block.end_time
        );
        Ok(block)
    }

    fn update(&mut self, block_id: &str, update: &TimeBlockUpdate) -> Result<TimeBlock> {
        let (date, index) = self
            .find(block_id)
            .ok_or_else(|| anyhow!("Time block {} not found", block_id))?;
        let blocks = self
            .days
            .get_mut(&date)
            .ok_or_else(|| anyhow!("Time block {} not found", block_id))?;

        let updated = update.apply_to(&blocks[index]);
        updated
            .validate()
            .map_err(|e| anyhow!("Invalid update for time block {}: {}", block_id, e))?;
        blocks[index] = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, block_id: &str) -> Result<()> {
        let (date, index) = self
            .find(block_id)
            .ok_or_else(|| anyhow!("Time block {} not found", block_id))?;
        if let Some(blocks) = self.days.get_mut(&date) {
            blocks.remove(index);
            if blocks.is_empty() {
                self.days.remove(&date);
            }
        }
        Ok(())
    }
}

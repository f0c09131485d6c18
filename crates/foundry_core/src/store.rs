/// Artifacts returned for one successfully processed strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyArtifacts {
    pub link: String,
    pub strategy: String,
    pub backtest: String,
    pub strategy_file: String,
    pub backtest_file: String,
}

/// Body of a result row: generated artifacts or an inline error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    Success(StrategyArtifacts),
    Error { message: String },
}

/// One result row, addressed by a stable id derived from the strategy
/// number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub id: String,
    pub strategy_number: u32,
    pub body: ResultBody,
}

impl ResultEntry {
    pub fn new(strategy_number: u32, body: ResultBody) -> Self {
        Self {
            id: format!("strategy-{strategy_number}"),
            strategy_number,
            body,
        }
    }
}

/// Result rows in first-seen order, keyed by entry id.
///
/// An upsert with a known id replaces that row in place and keeps its
/// position; an unknown id appends. Replaying identical content changes
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultStore {
    entries: Vec<ResultEntry>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new row or replaces an existing one. Returns true when
    /// visible content actually changed.
    pub fn upsert(&mut self, entry: ResultEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                if *existing == entry {
                    false
                } else {
                    *existing = entry;
                    true
                }
            }
            None => {
                self.entries.push(entry);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ResultEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

use crate::prelude::*;

/// Mixed into the key when the maximizing side is to move
const MAX_SIDE_KEY: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScoreTypes {
    /// Score is the exact evaluation [alpha < score < beta]
    #[default]
    Exact,
    /// Score is at least this value, i.e, beta cutoff [score >= beta]
    LowerBound,
    /// Score is at most this value, i.e, alpha not improved [score <= alpha]
    UpperBound,
}

impl ScoreTypes {
    /// Bound kind of `score` returned from a search over `(alpha, beta)`
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            ScoreTypes::UpperBound
        } else if score >= beta {
            ScoreTypes::LowerBound
        } else {
            ScoreTypes::Exact
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub key: u64,
    pub score: i32,
    pub depth: u16,
    pub score_type: ScoreTypes,
}

impl TranspositionEntry {
    pub fn new(key: u64, score: i32, depth: u16, score_type: ScoreTypes) -> Self {
        Self {
            key,
            score,
            depth,
            score_type,
        }
    }
}

/// Outcome of probing the table at a node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The stored bound decides the node
    Cutoff(i32),
    /// Continue searching with this (possibly narrowed) window
    Window(i32, i32),
}

#[derive(Debug)]
pub struct TranspositionTable {
    entries: Vec<TranspositionEntry>,
    size: usize,
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> miette::Result<Self> {
        miette::ensure!(size_mb > 0, "Transposition table size must be positive");

        let entry_size = std::mem::size_of::<TranspositionEntry>();
        let num_entries = (size_mb * 1024 * 1024) / entry_size;
        let size = num_entries.next_power_of_two();

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(size)
            .into_diagnostic()
            .with_context(|| format!("Allocating {size} table entries"))?;
        entries.resize(size, TranspositionEntry::default());

        Ok(Self { entries, size })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Key of `state` with `color` to move
    #[inline(always)]
    pub fn key<S: GameState>(state: &S, color: Color) -> u64 {
        let hash = state.position_hash();
        if color == 1 { hash ^ MAX_SIDE_KEY } else { hash }
    }

    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        key as usize & (self.size - 1)
    }

    pub fn probe(&self, key: u64) -> Option<&TranspositionEntry> {
        let entry = &self.entries[self.index(key)];
        // depth 0 is never stored, so it marks an empty slot
        if entry.key == key && entry.depth > 0 {
            Some(entry)
        } else {
            None
        }
    }

    /// Looks `key` up for a node searched to exactly `depth` over
    /// `(alpha, beta)`.
    ///
    /// Only entries of the same depth are used, so a hit never changes the
    /// value a depth-limited search computes.
    pub fn probe_window(&self, key: u64, depth: u16, mut alpha: i32, mut beta: i32) -> Probe {
        let Some(entry) = self.probe(key) else {
            return Probe::Window(alpha, beta);
        };
        if entry.depth != depth {
            return Probe::Window(alpha, beta);
        }

        match entry.score_type {
            ScoreTypes::Exact => return Probe::Cutoff(entry.score),
            // The true score is 'at least' the stored one
            ScoreTypes::LowerBound => alpha = alpha.max(entry.score),
            // The true score is 'at most' the stored one
            ScoreTypes::UpperBound => beta = beta.min(entry.score),
        }

        if alpha >= beta {
            Probe::Cutoff(entry.score)
        } else {
            Probe::Window(alpha, beta)
        }
    }

    pub fn store(&mut self, new_entry: TranspositionEntry) {
        let index = self.index(new_entry.key);
        let entry = &mut self.entries[index];

        // Always replace scheme.
        *entry = new_entry;
    }

    pub fn clear(&mut self) {
        self.entries.fill(TranspositionEntry::default());
    }

    /// Per-mille of the first thousand slots in use
    pub fn hash_full(&self) -> u16 {
        let sample = self.size.min(1000);
        let used = self.entries[..sample]
            .iter()
            .filter(|e| e.depth > 0)
            .count();
        (used * 1000 / sample.max(1)) as u16
    }
}

impl Searcher {
    /// Probes the table for a node, counting the probe.
    /// Without a table the window passes through unchanged.
    pub(crate) fn tt_probe<S: GameState>(
        &mut self,
        state: &S,
        depth: u16,
        color: Color,
        alpha: i32,
        beta: i32,
    ) -> Probe {
        let Some(tt) = self.tt.as_ref() else {
            return Probe::Window(alpha, beta);
        };
        self.stats.tt_probes += 1;
        let probe = tt.probe_window(TranspositionTable::key(state, color), depth, alpha, beta);
        if let Probe::Cutoff(score) = probe {
            self.stats.tt_hits += 1;
            trace!("TT cutoff at depth {depth}: {score}");
        }
        probe
    }

    /// Stores the result of searching a node over `(alpha, beta)`
    pub(crate) fn tt_store<S: GameState>(
        &mut self,
        state: &S,
        depth: u16,
        color: Color,
        score: i32,
        alpha: i32,
        beta: i32,
    ) {
        if depth < self.tt_min_depth.max(1) {
            return;
        }
        if let Some(tt) = self.tt.as_mut() {
            tt.store(TranspositionEntry::new(
                TranspositionTable::key(state, color),
                score,
                depth,
                ScoreTypes::classify(score, alpha, beta),
            ));
        }
    }
}

//! Priority-queue entries and reusable per-query scratch state.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A tentative distance pushed onto the frontier.
///
/// Records are never updated in place. An improvement pushes a fresh record
/// and bumps the node's lookup slot, leaving the old record to be discarded
/// when it surfaces.
#[derive(Debug, Clone, Copy)]
pub(super) struct Record {
    pub(super) distance: f64,
    pub(super) node: usize,
    pub(super) id: u64,
}

impl Ord for Record {
    // Reversed so `BinaryHeap` pops the smallest distance; ties go to the
    // lower node index to keep results independent of insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Record {}

/// Dense per-node arrays sized to one graph.
///
/// Only the nodes listed in `touched` carry non-default values, so resetting
/// costs time proportional to the previous query rather than the graph.
#[derive(Debug, Default)]
pub(super) struct Scratch {
    best: Vec<f64>,
    latest: Vec<u64>,
    settled: Vec<bool>,
    parent: Vec<Option<usize>>,
    target: Vec<bool>,
    dirty: Vec<bool>,
    touched: Vec<usize>,
    heap: BinaryHeap<Record>,
    next_record: u64,
}

#[expect(
    clippy::indexing_slicing,
    reason = "scratch arrays are sized to the graph that produces every index"
)]
impl Scratch {
    pub(super) fn new(nodes: usize) -> Self {
        Self {
            best: vec![f64::INFINITY; nodes],
            latest: vec![0; nodes],
            settled: vec![false; nodes],
            parent: vec![None; nodes],
            target: vec![false; nodes],
            dirty: vec![false; nodes],
            touched: Vec::new(),
            heap: BinaryHeap::new(),
            next_record: 0,
        }
    }

    pub(super) fn reset(&mut self) {
        for idx in self.touched.drain(..) {
            self.best[idx] = f64::INFINITY;
            self.latest[idx] = 0;
            self.settled[idx] = false;
            self.parent[idx] = None;
            self.target[idx] = false;
            self.dirty[idx] = false;
        }
        self.heap.clear();
    }

    pub(super) fn mark_target(&mut self, idx: usize) {
        self.touch(idx);
        self.target[idx] = true;
    }

    pub(super) fn is_target(&self, idx: usize) -> bool {
        self.target[idx]
    }

    /// Record `distance` for `idx` if it strictly improves on the best known.
    pub(super) fn offer(&mut self, idx: usize, distance: f64, parent: Option<usize>) {
        if self.settled[idx] || distance >= self.best[idx] {
            return;
        }
        self.touch(idx);
        self.next_record += 1;
        self.best[idx] = distance;
        self.parent[idx] = parent;
        self.latest[idx] = self.next_record;
        self.heap.push(Record {
            distance,
            node: idx,
            id: self.next_record,
        });
    }

    /// Pop the next live record, finalising its node.
    ///
    /// Stale records are skipped. Returns `None` once the frontier is empty
    /// or its minimum exceeds `max_distance`.
    pub(super) fn settle_next(&mut self, max_distance: f64) -> Option<Record> {
        while let Some(record) = self.heap.pop() {
            if record.distance > max_distance {
                self.heap.clear();
                return None;
            }
            if self.settled[record.node] || self.latest[record.node] != record.id {
                continue;
            }
            self.settled[record.node] = true;
            return Some(record);
        }
        None
    }

    pub(super) fn distance(&self, idx: usize) -> f64 {
        self.best[idx]
    }

    pub(super) fn parent(&self, idx: usize) -> Option<usize> {
        self.parent[idx]
    }

    /// Finalised nodes with their distances.
    pub(super) fn settled(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.touched
            .iter()
            .filter(|&&idx| self.settled[idx])
            .map(|&idx| (idx, self.best[idx]))
    }

    fn touch(&mut self, idx: usize) {
        if !self.dirty[idx] {
            self.dirty[idx] = true;
            self.touched.push(idx);
        }
    }
}

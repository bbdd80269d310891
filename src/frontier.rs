//! Min-priority frontiers for the shortest-path search.
//!
//! All implementations pop the entry with the smallest tentative distance.
//! Ties pop in unspecified order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use orx_priority_queue::{BinaryHeapWithMap, PriorityQueue as _, PriorityQueueDecKey};
use priority_queue::PriorityQueue;

use crate::stations::StationId;

pub type Cost = f64;

pub trait Frontier {
    fn push(&mut self, station: StationId, cost: Cost);
    fn pop(&mut self) -> Option<(StationId, Cost)>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Binary heap that keeps superseded entries around; the search sees them
/// again when popped.
#[derive(Debug, Default)]
pub struct LazyHeap {
    heap: BinaryHeap<Reverse<(OrderedFloat<Cost>, StationId)>>,
}

impl LazyHeap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LazyHeap {
    fn push(&mut self, station: StationId, cost: Cost) {
        self.heap.push(Reverse((OrderedFloat(cost), station)));
    }

    fn pop(&mut self) -> Option<(StationId, Cost)> {
        self.heap
            .pop()
            .map(|Reverse((cost, station))| (station, cost.into_inner()))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Indexed heap with decrease-key; holds at most one entry per station.
#[derive(Debug, Default)]
pub struct KeyedHeap {
    pq: PriorityQueue<StationId, Reverse<OrderedFloat<Cost>>>,
}

impl KeyedHeap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for KeyedHeap {
    fn push(&mut self, station: StationId, cost: Cost) {
        // Max-queue over reversed costs: "increase" lowers the distance.
        self.pq.push_increase(station, Reverse(OrderedFloat(cost)));
    }

    fn pop(&mut self) -> Option<(StationId, Cost)> {
        self.pq
            .pop()
            .map(|(station, Reverse(cost))| (station, cost.into_inner()))
    }

    fn len(&self) -> usize {
        self.pq.len()
    }
}

/// `orx-priority-queue` heap with a position map; holds at most one entry
/// per station.
#[derive(Debug)]
pub struct OrxHeap {
    pq: BinaryHeapWithMap<StationId, Cost>,
}

impl OrxHeap {
    pub fn new() -> Self {
        Self {
            pq: BinaryHeapWithMap::new(),
        }
    }
}

impl Default for OrxHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier for OrxHeap {
    fn push(&mut self, station: StationId, cost: Cost) {
        self.pq.decrease_key_or_push(&station, cost);
    }

    fn pop(&mut self) -> Option<(StationId, Cost)> {
        self.pq.pop()
    }

    fn len(&self) -> usize {
        self.pq.len()
    }
}

/// Selects a frontier implementation at runtime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FrontierKind {
    /// Binary heap, stale duplicates allowed
    #[default]
    Lazy,
    /// priority-queue crate, decrease-key
    Keyed,
    /// orx-priority-queue crate, decrease-key
    Orx,
}

impl FrontierKind {
    pub const ALL: [FrontierKind; 3] = [FrontierKind::Lazy, FrontierKind::Keyed, FrontierKind::Orx];

    pub fn build(self) -> Box<dyn Frontier> {
        match self {
            FrontierKind::Lazy => Box::new(LazyHeap::new()),
            FrontierKind::Keyed => Box::new(KeyedHeap::new()),
            FrontierKind::Orx => Box::new(OrxHeap::new()),
        }
    }
}

impl<F: Frontier + ?Sized> Frontier for Box<F> {
    fn push(&mut self, station: StationId, cost: Cost) {
        (**self).push(station, cost);
    }

    fn pop(&mut self) -> Option<(StationId, Cost)> {
        (**self).pop()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

//! Top-k ranking per measure and the cross-measure consensus.
//!
//! # Ranking
//!
//! Nodes are ordered by descending score. Equal scores are ordered by
//! ascending protein id, so the same scores always produce the same
//! top-k, independent of map iteration order.
//!
//! # Consensus
//!
//! The consensus set is the intersection of every measure's top-k. A
//! protein in it is simultaneously a hub, a bridge, close to everything,
//! connected to other hubs, and a random-walk attractor.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::metrics::{Centralities, Measure, Scores};

/// Number of top-ranked nodes kept per measure.
pub const TOP_K: usize = 5;

/// One ranked entry of a [`TopSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    /// 1-based rank.
    pub rank: usize,
    pub node: String,
    pub score: f64,
}

/// The top-k nodes under one measure, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSet {
    pub measure: Measure,
    pub ranked: Vec<RankedNode>,
}

impl TopSet {
    /// Return `true` if `node` is among the top-k.
    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.ranked.iter().any(|r| r.node == node)
    }

    /// Node ids in rank order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.ranked.iter().map(|r| r.node.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }
}

/// Per-measure top sets and their intersection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consensus {
    /// Top sets in [`Measure::ALL`] order.
    pub top_sets: Vec<TopSet>,
    /// Nodes present in every top set, sorted by id.
    pub common: BTreeSet<String>,
}

impl Consensus {
    /// Top set for one measure.
    #[must_use]
    pub fn top_set(&self, measure: Measure) -> Option<&TopSet> {
        self.top_sets.iter().find(|t| t.measure == measure)
    }
}

/// Descending score, then ascending id.
fn rank_order(a: (&String, &f64), b: (&String, &f64)) -> Ordering {
    b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// The `k` best nodes of one score map.
#[must_use]
pub fn top_k(measure: Measure, scores: &Scores, k: usize) -> TopSet {
    let mut entries: Vec<(&String, &f64)> = scores.iter().collect();
    entries.sort_by(|a, b| rank_order(*a, *b));

    let ranked = entries
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(i, (node, score))| RankedNode {
            rank: i + 1,
            node: node.clone(),
            score: *score,
        })
        .collect();

    TopSet { measure, ranked }
}

/// Top-[`TOP_K`] per measure and their intersection.
#[must_use]
pub fn find_consensus(centralities: &Centralities) -> Consensus {
    find_consensus_with(centralities, TOP_K)
}

/// Top-`k` per measure and their intersection.
#[must_use]
#[instrument(skip(centralities))]
pub fn find_consensus_with(centralities: &Centralities, k: usize) -> Consensus {
    let top_sets: Vec<TopSet> = centralities
        .iter()
        .map(|(measure, scores)| top_k(measure, scores, k))
        .collect();

    let common: BTreeSet<String> = match top_sets.split_first() {
        Some((first, rest)) => first
            .nodes()
            .filter(|node| rest.iter().all(|t| t.contains(node)))
            .map(str::to_string)
            .collect(),
        None => BTreeSet::new(),
    };

    debug!(common = common.len(), "consensus computed");

    Consensus { top_sets, common }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Allocation of connected cell regions on a partially claimed board.
//!
//! Each trial starts a breadth-first search from a uniformly random free
//! cell and grows until it holds the requested count or runs out of free
//! neighbors. The largest region over [`MAX_CLUSTER_TRIALS`] trials wins;
//! a trial reaching the full count stops the search early.
//!
//! If no trial reaches the count, the best region is padded with free cells
//! drawn uniformly from the rest of the board. Padding cells may break
//! adjacency. If the board has fewer free cells than requested, every free
//! cell is returned.

use std::collections::{BTreeSet, VecDeque};

use coinfall_core::constants::MAX_CLUSTER_TRIALS;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Grid;

/// How well an allocation met its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterQuality {
    /// A single connected region of the requested size.
    Connected,
    /// The largest connected region found held `connected` cells; the rest is padding.
    Padded { connected: usize },
    /// Fewer free cells than requested; all `available` free cells returned.
    Truncated { available: usize },
}

/// Cells chosen for one combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterOutcome {
    /// Distinct, previously unclaimed cell indices. Region cells come first,
    /// in breadth-first order, followed by any padding.
    pub cells: Vec<usize>,
    pub quality: ClusterQuality,
}

/// Allocate `count` free cells, connected when the free space allows it.
pub fn allocate<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    count: usize,
    claimed: &BTreeSet<usize>,
) -> ClusterOutcome {
    allocate_with_trials(rng, grid, count, claimed, MAX_CLUSTER_TRIALS)
}

/// [`allocate`] with an explicit trial budget.
pub fn allocate_with_trials<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    count: usize,
    claimed: &BTreeSet<usize>,
    trials: u32,
) -> ClusterOutcome {
    let free: Vec<usize> = (0..grid.len()).filter(|i| !claimed.contains(i)).collect();
    let target = count.min(free.len());

    let mut best: Vec<usize> = Vec::new();
    if target > 0 {
        for _ in 0..trials {
            let Some(&start) = free.choose(rng) else {
                break;
            };
            let region = grow_region(grid, start, target, claimed);
            if region.len() > best.len() {
                best = region;
            }
            if best.len() == target {
                break;
            }
        }
    }

    let connected = best.len();
    if connected < target {
        let mut rest: Vec<usize> = free.iter().copied().filter(|i| !best.contains(i)).collect();
        rest.shuffle(rng);
        best.extend(rest.into_iter().take(target - connected));
    }

    let quality = if target < count {
        ClusterQuality::Truncated { available: free.len() }
    } else if connected < target {
        ClusterQuality::Padded { connected }
    } else {
        ClusterQuality::Connected
    };

    ClusterOutcome { cells: best, quality }
}

/// Breadth-first growth from `start` through unclaimed cells, stopping at `limit`.
fn grow_region(grid: &Grid, start: usize, limit: usize, claimed: &BTreeSet<usize>) -> Vec<usize> {
    let mut region = Vec::with_capacity(limit);
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(cell) = queue.pop_front() {
        region.push(cell);
        if region.len() == limit {
            break;
        }
        for &n in grid.neighbors(cell) {
            if !visited[n] && !claimed.contains(&n) {
                visited[n] = true;
                queue.push_back(n);
            }
        }
    }

    region
}

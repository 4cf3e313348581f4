//! Ball-ball collision detection and response
//!
//! Every group is tested against every group, itself included, so each
//! overlapping pair is seen from both sides. A pair is acted on the first
//! time it is seen in a tick and ignored afterwards.
//!
//! Same-group pairs merge: the larger ball wins, whichever side it was seen
//! from, grows, and the other is removed at the end of the tick. Equal radii
//! go to the ball seen first. A same-group pair only bounces when a ball
//! swallowed earlier in the tick would win, or when a ball that already
//! grew would lose. Pairs from different groups always bounce.

use std::collections::HashSet;

use rand::Rng;

use super::body::{Body, BodyId};
use super::state::ColorGroup;
use crate::config::OverlapTest;

/// What happened during one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Overlapping ordered pairs found, self-pairs excluded
    pub detected: usize,
    /// Distinct pairs acted on
    pub resolved: usize,
    /// Pairs that bounced
    pub bounces: usize,
    /// Balls that grew, in order
    pub grown: Vec<BodyId>,
    /// Balls to remove once the pass is over
    pub removed: Vec<BodyId>,
}

impl CollisionReport {
    pub fn is_quiet(&self) -> bool {
        self.detected == 0
    }
}

/// Applies the grow/bounce/remove policy across all groups
#[derive(Debug, Default)]
pub struct CollisionResolver {
    overlap: OverlapTest,
    seen: HashSet<(BodyId, BodyId)>,
    grown: HashSet<BodyId>,
    removed: HashSet<BodyId>,
}

impl CollisionResolver {
    pub fn new(overlap: OverlapTest) -> Self {
        Self {
            overlap,
            ..Default::default()
        }
    }

    /// Run one full pass. Groups are mutated in place except for removals,
    /// which are only reported; see [`apply_removals`].
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        groups: &mut [ColorGroup],
        rng: &mut R,
    ) -> CollisionReport {
        self.seen.clear();
        self.grown.clear();
        self.removed.clear();

        let mut report = CollisionReport::default();

        for g1 in 0..groups.len() {
            for g2 in 0..groups.len() {
                // Pairs for this group combination are collected up front,
                // so growth during the loop does not add new contacts.
                let hits = find_overlaps(&groups[g1], &groups[g2], self.overlap);
                report.detected += hits.len();

                for (i, j) in hits {
                    let (first, second) = pair_mut(groups, (g1, i), (g2, j));
                    if !self.seen.insert(pair_key(first.id, second.id)) {
                        continue;
                    }
                    report.resolved += 1;

                    if g1 == g2 {
                        self.resolve_same_color(first, second, rng, &mut report);
                    } else {
                        first.bounce(rng);
                        second.bounce(rng);
                        report.bounces += 1;
                    }
                }
            }
        }

        if !report.is_quiet() {
            log::trace!(
                "Collisions: {} detected, {} resolved, {} bounced, {} merged",
                report.detected,
                report.resolved,
                report.bounces,
                report.removed.len()
            );
        }

        report
    }

    fn resolve_same_color<R: Rng + ?Sized>(
        &mut self,
        first: &mut Body,
        second: &mut Body,
        rng: &mut R,
        report: &mut CollisionReport,
    ) {
        let (winner, loser) = if second.radius > first.radius {
            (second, first)
        } else {
            (first, second)
        };

        // Already swallowed by someone else this tick
        if self.removed.contains(&loser.id) {
            return;
        }

        // A ball marked for removal cannot win, and a ball that grew this
        // tick cannot be swallowed.
        if self.removed.contains(&winner.id) || self.grown.contains(&loser.id) {
            winner.bounce(rng);
            loser.bounce(rng);
            report.bounces += 1;
            return;
        }

        if self.grown.insert(winner.id) {
            winner.grow();
            report.grown.push(winner.id);
        }
        self.removed.insert(loser.id);
        report.removed.push(loser.id);
        log::debug!(
            "Ball {} absorbed {} (radius now {})",
            winner.id,
            loser.id,
            winner.radius
        );
    }
}

/// Index pairs `(i, j)` where `a.bodies[i]` overlaps `b.bodies[j]`.
/// A ball never overlaps itself.
pub fn find_overlaps(a: &ColorGroup, b: &ColorGroup, test: OverlapTest) -> Vec<(usize, usize)> {
    let mut hits = Vec::new();
    for (i, first) in a.bodies.iter().enumerate() {
        for (j, second) in b.bodies.iter().enumerate() {
            if first.id != second.id && first.overlaps(second, test) {
                hits.push((i, j));
            }
        }
    }
    hits
}

/// Drop every listed ball from whichever group holds it. Returns how many
/// were removed.
pub fn apply_removals(groups: &mut [ColorGroup], removed: &[BodyId]) -> usize {
    if removed.is_empty() {
        return 0;
    }
    let mut count = 0;
    for group in groups.iter_mut() {
        let before = group.bodies.len();
        group.bodies.retain(|b| !removed.contains(&b.id));
        count += before - group.bodies.len();
    }
    count
}

#[inline]
fn pair_key(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Two distinct balls borrowed mutably at once, returned in argument order
fn pair_mut(
    groups: &mut [ColorGroup],
    a: (usize, usize),
    b: (usize, usize),
) -> (&mut Body, &mut Body) {
    if a.0 == b.0 {
        let bodies = &mut groups[a.0].bodies;
        if a.1 < b.1 {
            let (lo, hi) = bodies.split_at_mut(b.1);
            (&mut lo[a.1], &mut hi[0])
        } else {
            let (lo, hi) = bodies.split_at_mut(a.1);
            (&mut hi[0], &mut lo[b.1])
        }
    } else if a.0 < b.0 {
        let (lo, hi) = groups.split_at_mut(b.0);
        (&mut lo[a.0].bodies[a.1], &mut hi[0].bodies[b.1])
    } else {
        let (lo, hi) = groups.split_at_mut(a.0);
        (&mut hi[0].bodies[a.1], &mut lo[b.0].bodies[b.1])
    }
}

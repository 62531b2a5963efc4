//! Topology legality checks.
//!
//! A circuit is legal when the feed enters a real unit, every unit is
//! reachable from the feed, no unit routes a stream to itself or both
//! streams to one place, every out-of-range target is the terminal of its
//! own stream, and both terminals are reached.

use super::error::TopologyViolation;
use super::types::{Circuit, Route, CONCENTRATE_EXIT, NUM_UNITS, TAILINGS_EXIT};

impl Circuit {
    /// Returns `true` if the topology is legal.
    ///
    /// Resets and rewrites every unit's `visited` mark and both
    /// "reaches exit" flags.
    pub fn check_validity(&mut self) -> bool {
        self.validate().is_ok()
    }

    /// Checks the topology, naming the first violated rule.
    pub fn validate(&mut self) -> Result<(), TopologyViolation> {
        for unit in &mut self.units {
            unit.visited = false;
        }
        self.reaches_concentrate_exit = false;
        self.reaches_tailings_exit = false;

        match Route::of(self.feed_unit) {
            Route::Unit(_) => {}
            Route::Concentrate | Route::Tailings => {
                return Err(TopologyViolation::FeedIsTerminal(self.feed_unit))
            }
            Route::Invalid(t) => return Err(TopologyViolation::FeedOutOfRange(t)),
        }

        self.mark_reachable();

        for (i, unit) in self.units.iter().enumerate() {
            if !unit.visited {
                return Err(TopologyViolation::Unreachable(i));
            }
            if unit.concentrate_target == unit.tailings_target {
                return Err(TopologyViolation::IdenticalTargets(i));
            }
            if unit.concentrate_target == i || unit.tailings_target == i {
                return Err(TopologyViolation::SelfLoop(i));
            }
            if unit.concentrate_target >= NUM_UNITS && unit.concentrate_target != CONCENTRATE_EXIT
            {
                return Err(TopologyViolation::MisroutedExit {
                    unit: i,
                    stream: "concentrate",
                    target: unit.concentrate_target,
                });
            }
            if unit.tailings_target >= NUM_UNITS && unit.tailings_target != TAILINGS_EXIT {
                return Err(TopologyViolation::MisroutedExit {
                    unit: i,
                    stream: "tailings",
                    target: unit.tailings_target,
                });
            }
        }

        if !self.reaches_concentrate_exit {
            return Err(TopologyViolation::NoConcentrateExit);
        }
        if !self.reaches_tailings_exit {
            return Err(TopologyViolation::NoTailingsExit);
        }
        Ok(())
    }

    /// Depth-first walk from the feed, marking every unit it touches.
    ///
    /// Revisiting a marked unit is a no-op, so cycles terminate. Any
    /// out-of-range edge counts as leaving through its stream's exit.
    fn mark_reachable(&mut self) {
        let mut stack = Vec::with_capacity(2 * NUM_UNITS);
        stack.push(self.feed_unit);

        while let Some(idx) = stack.pop() {
            let unit = &mut self.units[idx];
            if unit.visited {
                continue;
            }
            unit.visited = true;

            let (conc, tails) = (unit.concentrate_target, unit.tailings_target);
            // Push tailings first so the concentrate branch is walked first.
            if tails < NUM_UNITS {
                stack.push(tails);
            } else {
                self.reaches_tailings_exit = true;
            }
            if conc < NUM_UNITS {
                stack.push(conc);
            } else {
                self.reaches_concentrate_exit = true;
            }
        }
    }
}

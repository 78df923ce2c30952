// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Dynamic-programming solver for crew distribution problems.
//!
//! State `(i, k)` is the best total output achievable by the first `i`
//! objects spending exactly `k` crew units. The base row is reachable
//! only at `k = 0`, so every reported distribution spends the whole pool;
//! if no combination of table rows sums to the pool size, the final state
//! stays unreachable and the problem is infeasible.
//!
//! For each state the per-object unit count is scanned from zero upward
//! and a candidate replaces the current best only on strict improvement,
//! so equal-output ties resolve toward fewer units on the object under
//! consideration. Together with the fixed scan order this makes the
//! reconstructed distribution deterministic.

use gantry_model::{
    distribution::DistributionProblem,
    solution::DistributionSolution,
};
use gantry_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    result::SolverOutcome,
    stats::SolverStatisticsBuilder,
};
use num_traits::Zero;
use tracing::debug;

/// An exact solver for [`DistributionProblem`]s.
///
/// Generic over the table output type `T`; `Ord` keeps the comparison
/// exact, which is why the tables carry integers rather than floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrewDistributionSolver;

impl CrewDistributionSolver {
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Solves the given problem to proven optimality or proven
    /// infeasibility, consulting `monitor` at every table cell.
    pub fn solve<T, M>(
        &self,
        problem: &DistributionProblem<T>,
        mut monitor: M,
    ) -> SolverOutcome<DistributionSolution<T>>
    where
        T: Copy + Ord + Zero,
        M: SearchMonitor<DistributionSolution<T>>,
    {
        let start = std::time::Instant::now();
        monitor.on_enter_search();

        let num_objects = problem.num_objects();
        let pool = problem.pool();
        let stride = pool + 1;

        // value[i * stride + k]: best total output of the first i objects
        // spending exactly k units; None marks an unreachable state.
        let mut value: Vec<Option<T>> = vec![None; (num_objects + 1) * stride];
        let mut choice: Vec<usize> = vec![0; (num_objects + 1) * stride];
        value[0] = Some(T::zero());

        let mut cells: u64 = 0;
        let mut abort: Option<String> = None;

        'forward: for i in 1..=num_objects {
            let table = problem.table((i - 1).into());
            for k in 0..=pool {
                cells += 1;
                monitor.on_step();
                if let SearchCommand::Terminate(reason) = monitor.search_command() {
                    abort = Some(reason);
                    break 'forward;
                }

                let mut best: Option<T> = None;
                let mut best_units = 0;
                for (units, &output) in table.iter().enumerate().take(k + 1) {
                    let Some(prev) = value[(i - 1) * stride + (k - units)] else {
                        continue;
                    };
                    let candidate = prev + output;
                    // Strict improvement only: ties keep the smaller unit
                    // count found first.
                    if best.map_or(true, |b| candidate > b) {
                        best = Some(candidate);
                        best_units = units;
                    }
                }
                value[i * stride + k] = best;
                choice[i * stride + k] = best_units;
            }
        }

        monitor.on_exit_search();

        let finished = abort.is_none();
        let total = if finished {
            value[num_objects * stride + pool]
        } else {
            None
        };

        let statistics = SolverStatisticsBuilder::new()
            .steps_taken(cells)
            .solutions_found(u64::from(total.is_some()))
            .solve_duration(start.elapsed())
            .build();

        debug!(cells, reachable = total.is_some(), "distribution solve finished");

        if let Some(reason) = abort {
            return SolverOutcome::aborted(None, reason, statistics);
        }
        let Some(total) = total else {
            // The tables cannot absorb the whole pool.
            return SolverOutcome::infeasible(statistics);
        };

        // Backward pass: peel off each object's chosen unit count.
        let mut assignments = vec![0; num_objects];
        let mut remaining = pool;
        for i in (1..=num_objects).rev() {
            let units = choice[i * stride + remaining];
            assignments[i - 1] = units;
            remaining -= units;
        }
        debug_assert_eq!(remaining, 0, "reconstruction left {} units unspent", remaining);

        let outputs: Vec<T> = assignments
            .iter()
            .enumerate()
            .map(|(i, &units)| problem.table(i.into())[units])
            .collect();
        let solution = DistributionSolution::new(total, assignments, outputs);
        debug_assert_eq!(solution.assigned_units(), pool);

        monitor.on_solution_found(&solution);
        SolverOutcome::optimal(solution, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::distribution::DistributionProblemBuilder;
    use gantry_search::monitor::{deadline::DeadlineMonitor, no_op::NoOpMonitor};
    use gantry_search::result::TerminationReason;
    use std::time::Duration;

    /// The four-site crew distribution instance: outputs in thousands of
    /// rubles per assigned crew count.
    fn four_sites() -> DistributionProblem<i64> {
        DistributionProblemBuilder::new()
            .object("residential-highway", vec![0, 100, 230, 350, 370])
            .object("business-center", vec![0, 110, 230, 290, 360])
            .object("hotel-road", vec![0, 90, 190, 280, 350])
            .object("express-highway", vec![0, 140, 220, 310, 320])
            .pool(4)
            .build()
            .expect("problem builds")
    }

    fn solve(problem: &DistributionProblem<i64>) -> SolverOutcome<DistributionSolution<i64>> {
        CrewDistributionSolver::new().solve(problem, NoOpMonitor::new())
    }

    /// Brute-force reference over all exact-pool distributions, scanning
    /// unit counts lexicographically so ties resolve the same way.
    fn brute_force(problem: &DistributionProblem<i64>) -> Option<(i64, Vec<usize>)> {
        fn walk(
            problem: &DistributionProblem<i64>,
            object: usize,
            remaining: usize,
            current: &mut Vec<usize>,
            best: &mut Option<(i64, Vec<usize>)>,
        ) {
            if object == problem.num_objects() {
                if remaining != 0 {
                    return;
                }
                let total: i64 = current
                    .iter()
                    .enumerate()
                    .map(|(i, &units)| problem.table(i.into())[units])
                    .sum();
                if best.as_ref().map_or(true, |(b, _)| total > *b) {
                    *best = Some((total, current.clone()));
                }
                return;
            }
            let max_units = problem.max_units(object.into()).min(remaining);
            for units in 0..=max_units {
                current.push(units);
                walk(problem, object + 1, remaining - units, current, best);
                current.pop();
            }
        }

        let mut best = None;
        walk(problem, 0, problem.pool(), &mut Vec::new(), &mut best);
        best
    }

    #[test]
    fn test_four_sites_optimum() {
        let outcome = solve(&four_sites());
        assert!(outcome.is_optimal());
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.total_output(), 490);
        assert_eq!(solution.assignments(), &[3, 0, 0, 1]);
        assert_eq!(solution.outputs(), &[350, 0, 0, 140]);
        assert_eq!(solution.assigned_units(), 4);
    }

    #[test]
    fn test_matches_brute_force() {
        let problem = four_sites();
        let outcome = solve(&problem);
        let (total, assignments) = brute_force(&problem).expect("feasible");
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.total_output(), total);
        assert_eq!(solution.assignments(), assignments.as_slice());
    }

    #[test]
    fn test_zero_pool_assigns_nothing() {
        let problem = DistributionProblemBuilder::new()
            .object("site", vec![0, 50])
            .pool(0)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.total_output(), 0);
        assert_eq!(solution.assignments(), &[0]);
    }

    #[test]
    fn test_pool_beyond_table_capacity_is_infeasible() {
        // Two objects absorbing at most 1 unit each cannot spend 3.
        let problem = DistributionProblemBuilder::new()
            .object("a", vec![0, 10])
            .object("b", vec![0, 20])
            .pool(3)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.reason, TerminationReason::InfeasibilityProven);
    }

    #[test]
    fn test_short_tables_force_spreading() {
        let problem = DistributionProblemBuilder::new()
            .object("a", vec![0, 10])
            .object("b", vec![0, 1])
            .pool(2)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.assignments(), &[1, 1]);
        assert_eq!(solution.total_output(), 11);
    }

    #[test]
    fn test_equal_output_tie_prefers_fewer_units_on_later_object() {
        // Every split of 2 units yields 10. The scan at the final state
        // keeps the smallest unit count for the object being added, so
        // the later object ends up with zero.
        let problem = DistributionProblemBuilder::new()
            .object("a", vec![0, 5, 10])
            .object("b", vec![0, 5, 10])
            .pool(2)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.assignments(), &[2, 0]);
    }

    #[test]
    fn test_resolving_is_deterministic() {
        let problem = four_sites();
        let first = solve(&problem);
        let second = solve(&problem);
        assert_eq!(first.solution(), second.solution());
        assert_eq!(first.statistics.steps_taken, second.statistics.steps_taken);
    }

    #[test]
    fn test_deadline_abort_reports_aborted_reason() {
        let problem = four_sites();
        let monitor = DeadlineMonitor::with_clock_check_mask(Duration::ZERO, 0);
        let outcome = CrewDistributionSolver::new().solve(&problem, monitor);
        assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
        assert!(outcome.solution().is_none());
    }
}

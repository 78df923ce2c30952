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

//! Primal simplex solver for continuous allocation problems.
//!
//! The tableau carries one row per per-item maximum followed by one row
//! per resource capacity, all of the form `Σ a_ij x_j <= b_i` with
//! `b_i >= 0`, so the slack basis is feasible from the start. Pivoting
//! follows Bland's rule on both the entering and the leaving choice:
//! smallest-index entering column with a negative reduced cost, smallest
//! ratio leaving row with ties broken by the smallest basis index. Every
//! intermediate basis is primal feasible, which lets an aborted run
//! still hand back its current vertex as a feasible solution.

use gantry_core::num::constants::VOLUME_EPSILON;
use gantry_model::{
    allocation::AllocationProblem,
    solution::{AllocationSolution, PrecisionWarning},
};
use gantry_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    result::SolverOutcome,
    stats::SolverStatisticsBuilder,
};
use tracing::{debug, warn};

/// Reduced costs larger than this (in absolute value) count as nonzero
/// when picking the entering column.
const REDUCED_COST_TOLERANCE: f64 = 1e-9;

/// Column entries must exceed this to be usable as pivots; smaller
/// values are treated as zero in the ratio test.
const PIVOT_TOLERANCE: f64 = 1e-9;

/// An exact solver for [`AllocationProblem`]s.
///
/// The solver itself is stateless; each call to [`solve`] builds a fresh
/// tableau.
///
/// [`solve`]: AllocationSolver::solve
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationSolver;

impl AllocationSolver {
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Solves the given problem to proven optimality, consulting
    /// `monitor` at every pivot.
    ///
    /// The origin is always feasible for an allocation problem, so the
    /// answer is either an optimal vertex, a proven unbounded objective,
    /// or — on abort — the feasible vertex the run had reached.
    pub fn solve<M>(
        &self,
        problem: &AllocationProblem,
        mut monitor: M,
    ) -> SolverOutcome<AllocationSolution>
    where
        M: SearchMonitor<AllocationSolution>,
    {
        let start = std::time::Instant::now();
        monitor.on_enter_search();

        let mut rows: Vec<(Vec<f64>, f64)> = Vec::with_capacity(
            problem.num_items() + problem.num_resources(),
        );
        for (i, &max_volume) in problem.max_volumes().iter().enumerate() {
            let mut coefficients = vec![0.0; problem.num_items()];
            coefficients[i] = 1.0;
            rows.push((coefficients, max_volume));
        }
        for constraint in problem.model().constraints() {
            rows.push((constraint.coefficients().to_vec(), constraint.bound()));
        }

        let mut tableau = Tableau::new(problem.incomes(), &rows);
        let mut pivots: u64 = 0;
        let status = loop {
            monitor.on_step();
            pivots += 1;
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                break RunStatus::Aborted(reason);
            }
            match tableau.step() {
                PivotStep::Optimal => break RunStatus::Optimal,
                PivotStep::Unbounded => break RunStatus::Unbounded,
                PivotStep::Pivoted => {}
            }
        };

        monitor.on_exit_search();

        let statistics = SolverStatisticsBuilder::new()
            .steps_taken(pivots)
            .solutions_found(u64::from(matches!(status, RunStatus::Optimal)))
            .solve_duration(start.elapsed())
            .build();

        debug!(pivots, status = ?status, "allocation solve finished");

        match status {
            RunStatus::Optimal => {
                let solution = assemble_solution(problem, tableau.decisions());
                SolverOutcome::optimal(solution, statistics)
            }
            RunStatus::Unbounded => SolverOutcome::unbounded(statistics),
            RunStatus::Aborted(reason) => {
                // Every simplex iterate is primal feasible, so the vertex
                // reached so far is a legitimate (unproven) solution.
                let solution = assemble_solution(problem, tableau.decisions());
                SolverOutcome::aborted(Some(solution), reason, statistics)
            }
        }
    }
}

#[derive(Debug)]
enum RunStatus {
    Optimal,
    Unbounded,
    Aborted(String),
}

/// Snaps negligible volumes to zero and recomputes totals, usage, and
/// precision warnings from the final decision values.
fn assemble_solution(problem: &AllocationProblem, mut volumes: Vec<f64>) -> AllocationSolution {
    for volume in &mut volumes {
        if *volume < VOLUME_EPSILON {
            *volume = 0.0;
        }
    }
    let model = problem.model();
    let objective_value = model.objective_value(&volumes);
    let usage = model.usage(&volumes);
    let warnings: Vec<PrecisionWarning> = usage
        .iter()
        .filter_map(|u| PrecisionWarning::check(u.label(), u.used(), u.bound()))
        .collect();
    for warning in &warnings {
        warn!(%warning, "resource cap exceeded beyond tolerance");
    }
    AllocationSolution::new(objective_value, volumes, usage, warnings)
}

/// The outcome of one pivot attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PivotStep {
    /// No entering column: the current basis is optimal.
    Optimal,
    /// One pivot was performed.
    Pivoted,
    /// An entering column has no positive entry: the objective grows
    /// without bound along it.
    Unbounded,
}

/// A dense simplex tableau in standard maximization form.
///
/// Columns are the `num_vars` structural variables followed by one slack
/// per row; `objective` holds the negated reduced-cost row with the
/// running objective value in its last entry.
struct Tableau {
    num_vars: usize,
    rows: Vec<Vec<f64>>,
    objective: Vec<f64>,
    basis: Vec<usize>,
}

impl Tableau {
    /// Builds the initial tableau with the all-slack basis.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if a right-hand side is negative, which
    /// would make the slack basis infeasible.
    fn new(objective: &[f64], rows: &[(Vec<f64>, f64)]) -> Self {
        let num_vars = objective.len();
        let num_rows = rows.len();
        let width = num_vars + num_rows + 1;

        let mut tableau_rows = Vec::with_capacity(num_rows);
        for (i, (coefficients, bound)) in rows.iter().enumerate() {
            debug_assert_eq!(coefficients.len(), num_vars);
            debug_assert!(
                *bound >= 0.0,
                "row {} has negative right-hand side {}, slack basis infeasible",
                i,
                bound
            );
            let mut row = vec![0.0; width];
            row[..num_vars].copy_from_slice(coefficients);
            row[num_vars + i] = 1.0;
            row[width - 1] = *bound;
            tableau_rows.push(row);
        }

        let mut objective_row = vec![0.0; width];
        for (j, &c) in objective.iter().enumerate() {
            objective_row[j] = -c;
        }

        Self {
            num_vars,
            rows: tableau_rows,
            objective: objective_row,
            basis: (num_vars..num_vars + num_rows).collect(),
        }
    }

    /// Performs one pivot under Bland's rule.
    fn step(&mut self) -> PivotStep {
        let width = self.objective.len();
        let num_columns = width - 1;

        // Entering: the smallest-index column with a negative reduced cost.
        let entering = (0..num_columns)
            .find(|&j| self.objective[j] < -REDUCED_COST_TOLERANCE);
        let entering = match entering {
            Some(j) => j,
            None => return PivotStep::Optimal,
        };

        // Leaving: the smallest ratio; ties go to the smallest basis
        // index so that cycling is impossible.
        let mut leaving: Option<(usize, f64)> = None;
        for (i, row) in self.rows.iter().enumerate() {
            let entry = row[entering];
            if entry <= PIVOT_TOLERANCE {
                continue;
            }
            let ratio = row[width - 1] / entry;
            let better = match leaving {
                None => true,
                Some((best_row, best_ratio)) => {
                    ratio < best_ratio - PIVOT_TOLERANCE
                        || ((ratio - best_ratio).abs() <= PIVOT_TOLERANCE
                            && self.basis[i] < self.basis[best_row])
                }
            };
            if better {
                leaving = Some((i, ratio));
            }
        }
        let (leaving, _) = match leaving {
            Some(choice) => choice,
            None => return PivotStep::Unbounded,
        };

        self.pivot(leaving, entering);
        PivotStep::Pivoted
    }

    /// Pivots on `(row, column)`: normalizes the pivot row and eliminates
    /// the column from every other row and the objective.
    fn pivot(&mut self, row: usize, column: usize) {
        let width = self.objective.len();
        let pivot_value = self.rows[row][column];
        for j in 0..width {
            self.rows[row][j] /= pivot_value;
        }

        for i in 0..self.rows.len() {
            if i == row {
                continue;
            }
            let factor = self.rows[i][column];
            if factor == 0.0 {
                continue;
            }
            for j in 0..width {
                self.rows[i][j] -= factor * self.rows[row][j];
            }
        }

        let factor = self.objective[column];
        if factor != 0.0 {
            for j in 0..width {
                self.objective[j] -= factor * self.rows[row][j];
            }
        }

        self.basis[row] = column;
    }

    /// Reads the structural variable values out of the current basis.
    fn decisions(&self) -> Vec<f64> {
        let width = self.objective.len();
        let mut decisions = vec![0.0; self.num_vars];
        for (i, &variable) in self.basis.iter().enumerate() {
            if variable < self.num_vars {
                decisions[variable] = self.rows[i][width - 1];
            }
        }
        decisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::allocation::AllocationProblemBuilder;
    use gantry_model::index::ItemIndex;
    use gantry_search::monitor::{deadline::DeadlineMonitor, no_op::NoOpMonitor};
    use gantry_search::result::TerminationReason;
    use std::time::Duration;

    /// The highway production program: eight road works, two shared
    /// resource pools.
    fn production_problem() -> AllocationProblem {
        let names = [
            "clearing", "earthworks", "foundation", "lower-asphalt", "upper-asphalt",
            "drainage", "barriers", "marking",
        ];
        let incomes = [39.0, 36.0, 36.0, 37.0, 38.0, 32.0, 32.0, 33.0];
        let max_volumes = [600.0, 700.0, 450.0, 800.0, 520.0, 800.0, 600.0, 600.0];
        let worker_rates = [4.0, 7.0, 7.0, 5.0, 4.0, 3.0, 3.0, 4.0];
        let material_rates = [3.0, 1.0, 5.0, 8.0, 3.0, 5.0, 3.0, 4.0];

        let mut builder = AllocationProblemBuilder::new();
        for (i, name) in names.iter().enumerate() {
            builder = builder
                .work_item(name, incomes[i], max_volumes[i])
                .consumption(name, "workers", worker_rates[i])
                .consumption(name, "materials", material_rates[i]);
        }
        builder
            .capacity("workers", 19_000.0)
            .capacity("materials", 19_000.0)
            .build()
            .expect("problem builds")
    }

    fn solve(problem: &AllocationProblem) -> SolverOutcome<AllocationSolution> {
        AllocationSolver::new().solve(problem, NoOpMonitor::new())
    }

    #[test]
    fn test_production_program_optimum() {
        let outcome = solve(&production_problem());
        assert!(outcome.is_optimal());
        let solution = outcome.solution().expect("optimal");

        let expected = [600.0, 440.0, 120.0, 800.0, 520.0, 800.0, 600.0, 600.0];
        for (volume, want) in solution.volumes().iter().zip(expected) {
            assert!(
                (volume - want).abs() < 1e-6,
                "volume {volume} differs from expected {want}"
            );
        }
        assert!((solution.objective_value() - 157_520.0).abs() < 1e-6);
        // Both resource pools are exhausted exactly at the optimum.
        for usage in solution.usage() {
            assert!((usage.used() - 19_000.0).abs() < 1e-6);
            assert!(usage.is_satisfied());
        }
        assert!(solution.warnings().is_empty());
        assert_eq!(solution.performed_count(), 8);
    }

    #[test]
    fn test_small_lp_by_hand() {
        // max 3x + 2y, x + y <= 4, x <= 2, y <= 10: optimum (2, 2).
        let problem = AllocationProblemBuilder::new()
            .work_item("x", 3.0, 2.0)
            .work_item("y", 2.0, 10.0)
            .consumption("x", "pool", 1.0)
            .consumption("y", "pool", 1.0)
            .capacity("pool", 4.0)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        let solution = outcome.solution().expect("optimal");
        assert!((solution.volume(ItemIndex::new(0)) - 2.0).abs() < 1e-9);
        assert!((solution.volume(ItemIndex::new(1)) - 2.0).abs() < 1e-9);
        assert!((solution.objective_value() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_capacity_pins_everything_to_zero() {
        let problem = AllocationProblemBuilder::new()
            .work_item("dig", 5.0, 100.0)
            .consumption("dig", "labor", 2.0)
            .capacity("labor", 0.0)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.volumes(), &[0.0]);
        assert_eq!(solution.objective_value(), 0.0);
        assert_eq!(solution.performed_count(), 0);
    }

    #[test]
    fn test_zero_max_volume_is_never_allocated() {
        let problem = AllocationProblemBuilder::new()
            .work_item("frozen", 100.0, 0.0)
            .work_item("active", 1.0, 5.0)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.volume(ItemIndex::new(0)), 0.0);
        assert!((solution.volume(ItemIndex::new(1)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_income_scaling_leaves_volumes_unchanged() {
        let base = solve(&production_problem());
        let scaled_problem = {
            let names = ["clearing", "earthworks", "foundation", "lower-asphalt",
                "upper-asphalt", "drainage", "barriers", "marking"];
            let incomes = [78.0, 72.0, 72.0, 74.0, 76.0, 64.0, 64.0, 66.0];
            let max_volumes = [600.0, 700.0, 450.0, 800.0, 520.0, 800.0, 600.0, 600.0];
            let worker_rates = [4.0, 7.0, 7.0, 5.0, 4.0, 3.0, 3.0, 4.0];
            let material_rates = [3.0, 1.0, 5.0, 8.0, 3.0, 5.0, 3.0, 4.0];
            let mut builder = AllocationProblemBuilder::new();
            for (i, name) in names.iter().enumerate() {
                builder = builder
                    .work_item(name, incomes[i], max_volumes[i])
                    .consumption(name, "workers", worker_rates[i])
                    .consumption(name, "materials", material_rates[i]);
            }
            builder
                .capacity("workers", 19_000.0)
                .capacity("materials", 19_000.0)
                .build()
                .expect("builds")
        };
        let scaled = solve(&scaled_problem);

        let base_solution = base.solution().expect("optimal");
        let scaled_solution = scaled.solution().expect("optimal");
        for (a, b) in base_solution.volumes().iter().zip(scaled_solution.volumes()) {
            assert!((a - b).abs() < 1e-6);
        }
        assert!(
            (scaled_solution.objective_value() - 2.0 * base_solution.objective_value()).abs()
                < 1e-6
        );
    }

    #[test]
    fn test_tiny_optimal_volume_is_snapped_to_zero() {
        let problem = AllocationProblemBuilder::new()
            .work_item("sliver", 10.0, 0.005)
            .work_item("bulk", 1.0, 3.0)
            .build()
            .expect("builds");
        let outcome = solve(&problem);
        let solution = outcome.solution().expect("optimal");
        // The sliver's optimal volume 0.005 sits below the volume epsilon.
        assert_eq!(solution.volume(ItemIndex::new(0)), 0.0);
        assert_eq!(solution.performed_count(), 1);
        assert!((solution.objective_value() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unbounded_objective_detected() {
        // Exercised at the tableau level: one variable, positive income,
        // no rows at all, so no ceiling stops the objective.
        let mut tableau = Tableau::new(&[1.0], &[]);
        assert_eq!(tableau.step(), PivotStep::Unbounded);
    }

    #[test]
    fn test_deadline_abort_returns_current_vertex() {
        let problem = production_problem();
        let monitor = DeadlineMonitor::with_clock_check_mask(Duration::ZERO, 0);
        let outcome = AllocationSolver::new().solve(&problem, monitor);

        assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
        // The run stopped at the initial vertex, which is the origin and
        // trivially feasible.
        let solution = outcome.solution().expect("feasible vertex");
        assert!(solution.volumes().iter().all(|v| *v == 0.0));
        assert!(solution.usage().iter().all(|u| u.is_satisfied()));
    }

    #[test]
    fn test_resolving_is_deterministic() {
        let problem = production_problem();
        let first = solve(&problem);
        let second = solve(&problem);
        assert_eq!(first.solution(), second.solution());
        assert_eq!(first.statistics.steps_taken, second.statistics.steps_taken);
    }
}

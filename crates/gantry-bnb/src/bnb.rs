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

//! Branch-and-bound solver for 0/1 project selection.
//!
//! The engine walks the binary decision tree in declaration order, fixing
//! each item to "include" before "exclude", and maintains incremental
//! pruning state per constraint: the left-hand-side contribution of the
//! fixed prefix plus the attainable positive/negative residual over the
//! still-free suffix. A node is pruned when some constraint cannot be
//! satisfied by any completion, or when the optimistic value of the best
//! completion cannot strictly beat the incumbent.
//!
//! The branching order and strict-improvement incumbent rule make the
//! result deterministic: re-solving the same problem yields bit-identical
//! selections, and among equal-value optima the subset found first in
//! include-before-exclude order wins.

use gantry_model::{
    index::ItemIndex,
    linear::Relation,
    selection::SelectionProblem,
    solution::SelectionSolution,
};
use gantry_search::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    result::SolverOutcome,
    stats::SolverStatisticsBuilder,
};
use tracing::debug;

/// An exact solver for [`SelectionProblem`]s.
///
/// The solver itself is stateless; all per-run state lives in a search
/// session created inside [`solve`].
///
/// [`solve`]: SelectionSolver::solve
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSolver;

impl SelectionSolver {
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Solves the given problem to proven optimality or proven
    /// infeasibility, consulting `monitor` at every search node.
    pub fn solve<M>(
        &self,
        problem: &SelectionProblem,
        mut monitor: M,
    ) -> SolverOutcome<SelectionSolution>
    where
        M: SearchMonitor<SelectionSolution>,
    {
        let start = std::time::Instant::now();
        monitor.on_enter_search();

        let mut session = SearchSession::new(problem);
        let abort = session.dive(0, &mut monitor);

        monitor.on_exit_search();

        let statistics = SolverStatisticsBuilder::new()
            .steps_taken(session.nodes_explored)
            .solutions_found(session.solutions_found)
            .solve_duration(start.elapsed())
            .build();

        debug!(
            nodes = session.nodes_explored,
            solutions = session.solutions_found,
            aborted = abort.is_some(),
            "selection search finished"
        );

        match abort {
            Some(reason) => SolverOutcome::aborted(session.incumbent, reason, statistics),
            None => match session.incumbent {
                Some(best) => SolverOutcome::optimal(best, statistics),
                None => SolverOutcome::infeasible(statistics),
            },
        }
    }
}

/// Per-run search state.
///
/// `fixed_lhs[c]` is the left-hand-side contribution of the already-fixed
/// prefix to constraint `c`; `pos_residual[c]`/`neg_residual[c]` are the
/// sums of positive/negative coefficients of the still-free suffix, so
/// `fixed_lhs + neg_residual ..= fixed_lhs + pos_residual` is exactly the
/// attainable left-hand-side interval at the current node.
struct SearchSession<'a> {
    problem: &'a SelectionProblem,
    decisions: Vec<f64>,
    fixed_lhs: Vec<f64>,
    pos_residual: Vec<f64>,
    neg_residual: Vec<f64>,
    fixed_value: f64,
    pos_value_residual: f64,
    incumbent: Option<SelectionSolution>,
    incumbent_value: f64,
    nodes_explored: u64,
    solutions_found: u64,
}

impl<'a> SearchSession<'a> {
    fn new(problem: &'a SelectionProblem) -> Self {
        let model = problem.model();
        let num_items = model.num_variables();
        let num_constraints = model.num_constraints();

        let mut pos_residual = vec![0.0; num_constraints];
        let mut neg_residual = vec![0.0; num_constraints];
        for (c, constraint) in model.constraints().iter().enumerate() {
            for &coefficient in constraint.coefficients() {
                if coefficient > 0.0 {
                    pos_residual[c] += coefficient;
                } else {
                    neg_residual[c] += coefficient;
                }
            }
        }
        let pos_value_residual: f64 = model.objective().iter().filter(|v| **v > 0.0).sum();

        Self {
            problem,
            decisions: vec![0.0; num_items],
            fixed_lhs: vec![0.0; num_constraints],
            pos_residual,
            neg_residual,
            fixed_value: 0.0,
            pos_value_residual,
            incumbent: None,
            incumbent_value: f64::NEG_INFINITY,
            nodes_explored: 0,
            solutions_found: 0,
        }
    }

    /// Explores the subtree rooted at `depth`. Returns the monitor's
    /// reason string if the run was aborted.
    fn dive<M>(&mut self, depth: usize, monitor: &mut M) -> Option<String>
    where
        M: SearchMonitor<SelectionSolution>,
    {
        self.nodes_explored = self.nodes_explored.wrapping_add(1);
        monitor.on_step();
        if let SearchCommand::Terminate(reason) = monitor.search_command() {
            return Some(reason);
        }

        if self.is_pruned() {
            return None;
        }

        let num_items = self.problem.num_items();
        if depth == num_items {
            self.record_leaf(monitor);
            return None;
        }

        // Move item `depth` from the free suffix into the fixed prefix.
        let model = self.problem.model();
        for (c, constraint) in model.constraints().iter().enumerate() {
            let coefficient = constraint.coefficients()[depth];
            if coefficient > 0.0 {
                self.pos_residual[c] -= coefficient;
            } else {
                self.neg_residual[c] -= coefficient;
            }
        }
        let value = self.problem.values()[depth];
        if value > 0.0 {
            self.pos_value_residual -= value;
        }

        // Include branch first; among equal-value optima this makes the
        // earliest-declared subset win.
        self.decisions[depth] = 1.0;
        self.fixed_value += value;
        for (c, constraint) in model.constraints().iter().enumerate() {
            self.fixed_lhs[c] += constraint.coefficients()[depth];
        }
        let mut abort = self.dive(depth + 1, monitor);
        self.fixed_value -= value;
        for (c, constraint) in model.constraints().iter().enumerate() {
            self.fixed_lhs[c] -= constraint.coefficients()[depth];
        }

        if abort.is_none() {
            self.decisions[depth] = 0.0;
            abort = self.dive(depth + 1, monitor);
        }

        // Return item `depth` to the free suffix.
        for (c, constraint) in model.constraints().iter().enumerate() {
            let coefficient = constraint.coefficients()[depth];
            if coefficient > 0.0 {
                self.pos_residual[c] += coefficient;
            } else {
                self.neg_residual[c] += coefficient;
            }
        }
        if value > 0.0 {
            self.pos_value_residual += value;
        }

        abort
    }

    /// Whether no completion of the current prefix can both satisfy every
    /// constraint and strictly beat the incumbent.
    fn is_pruned(&self) -> bool {
        let model = self.problem.model();
        for (c, constraint) in model.constraints().iter().enumerate() {
            let lhs_min = self.fixed_lhs[c] + self.neg_residual[c];
            let lhs_max = self.fixed_lhs[c] + self.pos_residual[c];
            let bound = constraint.bound();
            let violated = match constraint.relation() {
                Relation::Le => !Relation::Le.holds(lhs_min, bound),
                Relation::Ge => !Relation::Ge.holds(lhs_max, bound),
                Relation::Eq => {
                    !Relation::Le.holds(lhs_min, bound) || !Relation::Ge.holds(lhs_max, bound)
                }
            };
            if violated {
                return true;
            }
        }

        // The best completion takes every free item with positive value.
        self.fixed_value + self.pos_value_residual <= self.incumbent_value
    }

    /// Records the current full assignment as the new incumbent if it
    /// strictly improves on the previous one.
    fn record_leaf<M>(&mut self, monitor: &mut M)
    where
        M: SearchMonitor<SelectionSolution>,
    {
        let model = self.problem.model();
        // At a leaf the residuals are zero, so the interval check above
        // already verified every constraint exactly.
        debug_assert!(
            model.is_feasible(&self.decisions),
            "reached a leaf whose assignment violates a constraint"
        );

        let value = model.objective_value(&self.decisions);
        if value <= self.incumbent_value {
            return;
        }

        let selected: Vec<ItemIndex> = self
            .decisions
            .iter()
            .enumerate()
            .filter(|(_, x)| **x > 0.5)
            .map(|(i, _)| ItemIndex::new(i))
            .collect();
        let usage = model.usage(&self.decisions);
        let solution = SelectionSolution::new(value, selected, usage);

        debug!(value, "new incumbent selection");
        monitor.on_solution_found(&solution);
        self.incumbent = Some(solution);
        self.incumbent_value = value;
        self.solutions_found += 1;
    }
}

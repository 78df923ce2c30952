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

//! Problem dispatch and uniform run configuration.
//!
//! The three engines share their monitor and outcome plumbing but differ
//! in problem and solution types, so the facade keeps them behind closed
//! enums: a [`PlanningProblem`] goes in, the matching [`PlanningOutcome`]
//! variant comes out. Callers that need engine-specific detail match on
//! the outcome; callers that only care about status use the accessors.

use gantry_bnb::bnb::SelectionSolver;
use gantry_dp::dp::CrewDistributionSolver;
use gantry_model::{
    allocation::AllocationProblem,
    distribution::DistributionProblem,
    selection::SelectionProblem,
    solution::{AllocationSolution, DistributionSolution, SelectionSolution},
};
use gantry_search::{
    monitor::{composite::CompositeMonitor, deadline::DeadlineMonitor},
    result::{SolverOutcome, TerminationReason},
    stats::SolverStatistics,
};
use gantry_simplex::simplex::AllocationSolver;
use tracing::info;

/// A planning problem, one variant per engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanningProblem {
    /// 0/1 project selection under resource bounds and logical relations.
    Selection(SelectionProblem),
    /// Continuous volume allocation under resource capacities.
    Allocation(AllocationProblem),
    /// Indivisible crew distribution over tabulated outputs.
    CrewDistribution(DistributionProblem<i64>),
}

impl PlanningProblem {
    /// A short human-readable kind tag, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanningProblem::Selection(_) => "selection",
            PlanningProblem::Allocation(_) => "allocation",
            PlanningProblem::CrewDistribution(_) => "crew-distribution",
        }
    }
}

/// The outcome of a planning run, mirroring the problem kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanningOutcome {
    Selection(SolverOutcome<SelectionSolution>),
    Allocation(SolverOutcome<AllocationSolution>),
    CrewDistribution(SolverOutcome<DistributionSolution<i64>>),
}

impl PlanningOutcome {
    /// Why the engine stopped.
    pub fn reason(&self) -> &TerminationReason {
        match self {
            PlanningOutcome::Selection(outcome) => &outcome.reason,
            PlanningOutcome::Allocation(outcome) => &outcome.reason,
            PlanningOutcome::CrewDistribution(outcome) => &outcome.reason,
        }
    }

    /// The run statistics.
    pub fn statistics(&self) -> &SolverStatistics {
        match self {
            PlanningOutcome::Selection(outcome) => &outcome.statistics,
            PlanningOutcome::Allocation(outcome) => &outcome.statistics,
            PlanningOutcome::CrewDistribution(outcome) => &outcome.statistics,
        }
    }

    /// Whether the run produced a proven-optimal solution.
    pub fn is_optimal(&self) -> bool {
        match self {
            PlanningOutcome::Selection(outcome) => outcome.is_optimal(),
            PlanningOutcome::Allocation(outcome) => outcome.is_optimal(),
            PlanningOutcome::CrewDistribution(outcome) => outcome.is_optimal(),
        }
    }

    /// Whether the run proved the problem infeasible.
    pub fn is_infeasible(&self) -> bool {
        match self {
            PlanningOutcome::Selection(outcome) => outcome.is_infeasible(),
            PlanningOutcome::Allocation(outcome) => outcome.is_infeasible(),
            PlanningOutcome::CrewDistribution(outcome) => outcome.is_infeasible(),
        }
    }

    /// Whether the run produced any solution, proven optimal or not.
    pub fn has_solution(&self) -> bool {
        match self {
            PlanningOutcome::Selection(outcome) => outcome.has_solution(),
            PlanningOutcome::Allocation(outcome) => outcome.has_solution(),
            PlanningOutcome::CrewDistribution(outcome) => outcome.has_solution(),
        }
    }
}

impl std::fmt::Display for PlanningOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanningOutcome::Selection(outcome) => write!(f, "{}", outcome),
            PlanningOutcome::Allocation(outcome) => write!(f, "{}", outcome),
            PlanningOutcome::CrewDistribution(outcome) => write!(f, "{}", outcome),
        }
    }
}

/// The facade solver: dispatches a [`PlanningProblem`] to its engine
/// under a uniform wall-clock budget.
#[derive(Debug, Clone, Default)]
pub struct PlanningSolver {
    time_limit: Option<std::time::Duration>,
}

impl PlanningSolver {
    /// Creates a solver with no time limit.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The configured wall-clock budget, if any.
    #[inline]
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        self.time_limit
    }

    /// Solves the given problem with the matching engine.
    pub fn solve(&self, problem: &PlanningProblem) -> PlanningOutcome {
        info!(kind = problem.kind(), "dispatching planning problem");
        let outcome = match problem {
            PlanningProblem::Selection(problem) => {
                PlanningOutcome::Selection(SelectionSolver::new().solve(problem, self.monitor()))
            }
            PlanningProblem::Allocation(problem) => {
                PlanningOutcome::Allocation(AllocationSolver::new().solve(problem, self.monitor()))
            }
            PlanningProblem::CrewDistribution(problem) => PlanningOutcome::CrewDistribution(
                CrewDistributionSolver::new().solve(problem, self.monitor()),
            ),
        };
        info!(
            kind = problem.kind(),
            reason = %outcome.reason(),
            steps = outcome.statistics().steps_taken,
            "planning run finished"
        );
        outcome
    }

    /// Assembles the monitor stack for one run.
    fn monitor<S: 'static>(&self) -> CompositeMonitor<'static, S> {
        let mut composite = CompositeMonitor::new();
        if let Some(budget) = self.time_limit {
            composite.add_monitor(DeadlineMonitor::new(budget));
        }
        composite
    }
}

/// Builder for [`PlanningSolver`].
#[derive(Debug, Clone, Default)]
pub struct PlanningSolverBuilder {
    time_limit: Option<std::time::Duration>,
}

impl PlanningSolverBuilder {
    /// Creates a builder with no limits configured.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the wall-clock time of each run; the engines stop
    /// cooperatively once the budget is spent.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: std::time::Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Builds the solver.
    #[inline]
    pub fn build(self) -> PlanningSolver {
        PlanningSolver {
            time_limit: self.time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::allocation::AllocationProblemBuilder;
    use gantry_model::distribution::DistributionProblemBuilder;
    use gantry_model::selection::SelectionProblemBuilder;
    use std::time::Duration;

    fn selection_problem() -> PlanningProblem {
        PlanningProblem::Selection(
            SelectionProblemBuilder::new()
                .item("a", 3.0)
                .item("b", 2.0)
                .consumption("a", "budget", 2.0)
                .consumption("b", "budget", 1.0)
                .ceiling("budget", 2.0)
                .build()
                .expect("builds"),
        )
    }

    fn allocation_problem() -> PlanningProblem {
        PlanningProblem::Allocation(
            AllocationProblemBuilder::new()
                .work_item("dig", 3.0, 2.0)
                .work_item("pave", 2.0, 10.0)
                .consumption("dig", "pool", 1.0)
                .consumption("pave", "pool", 1.0)
                .capacity("pool", 4.0)
                .build()
                .expect("builds"),
        )
    }

    fn distribution_problem() -> PlanningProblem {
        PlanningProblem::CrewDistribution(
            DistributionProblemBuilder::new()
                .object("north", vec![0, 100, 230])
                .object("south", vec![0, 110, 230])
                .pool(2)
                .build()
                .expect("builds"),
        )
    }

    #[test]
    fn test_dispatches_selection() {
        let outcome = PlanningSolver::new().solve(&selection_problem());
        assert!(outcome.is_optimal());
        let PlanningOutcome::Selection(inner) = outcome else {
            panic!("expected a selection outcome");
        };
        let solution = inner.solution().expect("optimal");
        // Taking "a" alone beats "b" alone under the budget of 2.
        assert_eq!(solution.objective_value(), 3.0);
    }

    #[test]
    fn test_dispatches_allocation() {
        let outcome = PlanningSolver::new().solve(&allocation_problem());
        assert!(outcome.is_optimal());
        let PlanningOutcome::Allocation(inner) = outcome else {
            panic!("expected an allocation outcome");
        };
        let solution = inner.solution().expect("optimal");
        assert!((solution.objective_value() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_dispatches_crew_distribution() {
        let outcome = PlanningSolver::new().solve(&distribution_problem());
        assert!(outcome.is_optimal());
        let PlanningOutcome::CrewDistribution(inner) = outcome else {
            panic!("expected a crew distribution outcome");
        };
        let solution = inner.solution().expect("optimal");
        // Two crews on one site (230) beat one on each (210).
        assert_eq!(solution.total_output(), 230);
        assert_eq!(solution.assigned_units(), 2);
    }

    #[test]
    fn test_builder_carries_time_limit() {
        let solver = PlanningSolverBuilder::new()
            .with_time_limit(Duration::from_secs(5))
            .build();
        assert_eq!(solver.time_limit(), Some(Duration::from_secs(5)));

        // A generous budget does not disturb a small solve.
        let outcome = solver.solve(&distribution_problem());
        assert!(outcome.is_optimal());
        assert_eq!(*outcome.reason(), TerminationReason::OptimalityProven);
    }

    #[test]
    fn test_infeasible_problem_surfaces_as_value() {
        let problem = PlanningProblem::CrewDistribution(
            DistributionProblemBuilder::new()
                .object("only", vec![0, 10])
                .pool(5)
                .build()
                .expect("builds"),
        );
        let outcome = PlanningSolver::new().solve(&problem);
        assert!(outcome.is_infeasible());
        assert!(!outcome.has_solution());
    }
}

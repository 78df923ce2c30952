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

use crate::stats::SolverStatistics;

/// The answer an engine gives about a well-formed problem, generic over
/// the solution type `S`.
///
/// A problem with no admissible plan is a legitimate answer, not an
/// error; the same goes for an objective that can grow without bound.
/// Both are values here so a caller has to look at them.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult<S> {
    /// The problem has no admissible plan, and this has been proven.
    Infeasible,
    /// The objective can be improved without limit; no finite optimum
    /// exists.
    Unbounded,
    /// A solution was found and its optimality proven.
    Optimal(S),
    /// A solution was found, but the run stopped before optimality was
    /// proven.
    Feasible(S),
    /// The run terminated without finding a solution and without proving
    /// infeasibility.
    Unknown,
}

impl<S> SolverResult<S> {
    /// Returns the carried solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&S> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            _ => None,
        }
    }

    /// Consumes the result, returning the carried solution, if any.
    #[inline]
    pub fn into_solution(self) -> Option<S> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            _ => None,
        }
    }
}

impl<S> std::fmt::Display for SolverResult<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Unbounded => write!(f, "Unbounded"),
            SolverResult::Optimal(_) => write!(f, "Optimal"),
            SolverResult::Feasible(_) => write!(f, "Feasible"),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the engine stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The engine found and proved optimality of a solution.
    OptimalityProven,
    /// The engine proved that the problem is infeasible.
    InfeasibilityProven,
    /// The engine proved that the objective is unbounded.
    UnboundednessProven,
    /// The engine aborted due to a monitor command (deadline, external
    /// cancellation, etc.). The string carries the monitor's reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::UnboundednessProven => write!(f, "Unboundedness Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Everything an engine run reports back: the result, why it stopped,
/// and the run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome<S> {
    pub result: SolverResult<S>,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl<S> SolverOutcome<S> {
    #[inline]
    pub fn new(
        result: SolverResult<S>,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    /// An outcome carrying a proven-optimal solution.
    #[inline]
    pub fn optimal(solution: S, statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Optimal(solution),
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    /// An outcome reporting proven infeasibility.
    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            statistics,
        )
    }

    /// An outcome reporting a proven unbounded objective.
    #[inline]
    pub fn unbounded(statistics: SolverStatistics) -> Self {
        Self::new(
            SolverResult::Unbounded,
            TerminationReason::UnboundednessProven,
            statistics,
        )
    }

    /// An outcome for an aborted run: the incumbent (if any) is reported
    /// as feasible-but-unproven, otherwise the result is unknown.
    #[inline]
    pub fn aborted(incumbent: Option<S>, reason: String, statistics: SolverStatistics) -> Self {
        let result = match incumbent {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        };
        Self::new(result, TerminationReason::Aborted(reason), statistics)
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        matches!(self.result, SolverResult::Unbounded)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolverResult::Optimal(_) | SolverResult::Feasible(_)
        )
    }

    /// Returns the carried solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&S> {
        self.result.solution()
    }

    /// Consumes the outcome, returning the carried solution, if any.
    #[inline]
    pub fn into_solution(self) -> Option<S> {
        self.result.into_solution()
    }
}

impl<S> std::fmt::Display for SolverOutcome<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Reason: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SolverStatisticsBuilder;

    fn stats() -> SolverStatistics {
        SolverStatisticsBuilder::new().build()
    }

    #[test]
    fn test_optimal_outcome_shape() {
        let outcome = SolverOutcome::optimal(42u32, stats());
        assert!(outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(outcome.reason, TerminationReason::OptimalityProven);
        assert_eq!(outcome.solution(), Some(&42));
        assert_eq!(outcome.into_solution(), Some(42));
    }

    #[test]
    fn test_infeasible_outcome_has_no_solution() {
        let outcome = SolverOutcome::<u32>::infeasible(stats());
        assert!(outcome.is_infeasible());
        assert!(!outcome.has_solution());
        assert_eq!(outcome.solution(), None);
    }

    #[test]
    fn test_unbounded_outcome_shape() {
        let outcome = SolverOutcome::<u32>::unbounded(stats());
        assert!(outcome.is_unbounded());
        assert_eq!(outcome.reason, TerminationReason::UnboundednessProven);
    }

    #[test]
    fn test_aborted_with_incumbent_is_feasible() {
        let outcome = SolverOutcome::aborted(Some(7u32), "deadline exceeded".to_string(), stats());
        assert!(outcome.is_feasible());
        assert!(!outcome.is_optimal());
        assert_eq!(outcome.solution(), Some(&7));
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("deadline exceeded".to_string())
        );
    }

    #[test]
    fn test_aborted_without_incumbent_is_unknown() {
        let outcome = SolverOutcome::<u32>::aborted(None, "cancelled".to_string(), stats());
        assert_eq!(outcome.result, SolverResult::Unknown);
        assert!(!outcome.has_solution());
    }

    #[test]
    fn test_display_names_the_result_and_reason() {
        let outcome = SolverOutcome::<u32>::infeasible(stats());
        let rendered = format!("{}", outcome);
        assert!(rendered.contains("Result: Infeasible"));
        assert!(rendered.contains("Reason: Infeasibility Proven"));
    }
}

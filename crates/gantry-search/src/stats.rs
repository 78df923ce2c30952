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

/// Statistics collected during an engine run.
///
/// `steps_taken` counts the engine's natural unit of work: search nodes
/// for branch-and-bound, pivots for simplex, table cells for the
/// dynamic program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Units of work performed during the run.
    pub steps_taken: u64,
    /// Number of improving solutions found during the run.
    pub solutions_found: u64,
    /// Total duration of the run.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Steps Taken: {}", self.steps_taken)?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    steps_taken: u64,
    solutions_found: u64,
    solve_duration: std::time::Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    /// Creates a new `SolverStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            steps_taken: 0,
            solutions_found: 0,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    /// Sets the number of units of work performed.
    #[inline]
    pub fn steps_taken(mut self, steps_taken: u64) -> Self {
        self.steps_taken = steps_taken;
        self
    }

    /// Sets the number of improving solutions found.
    #[inline]
    pub fn solutions_found(mut self, solutions_found: u64) -> Self {
        self.solutions_found = solutions_found;
        self
    }

    /// Sets the total run duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolverStatistics` instance.
    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            steps_taken: self.steps_taken,
            solutions_found: self.solutions_found,
            solve_duration: self.solve_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SolverStatistics;
    use super::SolverStatisticsBuilder;
    use std::time::Duration;

    #[test]
    fn test_builder_constructs_expected_struct() {
        let stats = SolverStatisticsBuilder::new()
            .steps_taken(128)
            .solutions_found(3)
            .solve_duration(Duration::from_millis(1234))
            .build();

        assert_eq!(stats.steps_taken, 128);
        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.solve_duration, Duration::from_millis(1234));
    }

    #[test]
    fn test_builder_defaults_are_zero() {
        let stats = SolverStatisticsBuilder::new().build();
        assert_eq!(stats.steps_taken, 0);
        assert_eq!(stats.solutions_found, 0);
        assert_eq!(stats.solve_duration, Duration::ZERO);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SolverStatistics {
            steps_taken: 64,
            solutions_found: 2,
            solve_duration: Duration::from_millis(1234),
        };

        let rendered = format!("{}", stats);
        assert!(rendered.contains("Solver Statistics:"), "missing header");
        assert!(rendered.contains("Steps Taken: 64"), "missing steps_taken");
        assert!(
            rendered.contains("Solutions Found: 2"),
            "missing solutions_found"
        );
        assert!(
            rendered.contains("Solve Duration (secs): 1.234"),
            "missing solve_duration"
        );
    }
}

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

//! # Deadline Monitor
//!
//! A lightweight monitor that enforces a wall-clock budget on an engine
//! run. It periodically checks elapsed time (using a bitmask-based step
//! filter) and requests termination once the configured `Duration` has
//! been exceeded.
//!
//! Exact solving can be compute-intensive, and callers often need a
//! predictable upper bound on response time. Reading the clock at every
//! step would dominate small DP cells and search nodes, so the check
//! only runs when `(steps & clock_check_mask) == 0`; the default mask
//! (`0x3FFF`) checks roughly every 16,384 steps.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineMonitor<S> {
    clock_check_mask: u64,
    steps: u64,
    budget: std::time::Duration,
    start_time: std::time::Instant,
    _phantom: std::marker::PhantomData<S>,
}

impl<S> DeadlineMonitor<S> {
    /// Default mask: check every 16,384 steps (2^14).
    /// 16384 - 1 = 16383 = 0x3FFF
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(budget: std::time::Duration) -> Self {
        Self {
            clock_check_mask: Self::DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            budget,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_clock_check_mask(budget: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            budget,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S> SearchMonitor<S> for DeadlineMonitor<S> {
    fn name(&self) -> &str {
        "DeadlineMonitor"
    }

    fn on_enter_search(&mut self) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _solution: &S) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.budget {
            return SearchCommand::Terminate("deadline exceeded".to_string());
        }
        SearchCommand::Continue
    }
}

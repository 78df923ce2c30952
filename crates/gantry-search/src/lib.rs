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

//! # Gantry Search
//!
//! **Infrastructure shared by the three solving engines.**
//!
//! Every engine in the workspace — branch-and-bound selection, simplex
//! allocation, dynamic-programming crew distribution — is a pure,
//! synchronous function from a problem to an outcome. What they share is
//! not an algorithm but the plumbing around one:
//!
//! * **`monitor`**: cooperative cancellation. Engines call into a
//!   [`monitor::search_monitor::SearchMonitor`] at natural iteration
//!   boundaries (each search node, pivot, or table cell) and stop cleanly
//!   when it requests termination.
//! * **`result`**: the common outcome shape — optimal / feasible-unproven /
//!   infeasible / unbounded / unknown — generic over the engine's solution
//!   type. Infeasibility is a value, never a panic or an error.
//! * **`stats`**: per-run counters and timing.

pub mod monitor;
pub mod result;
pub mod stats;

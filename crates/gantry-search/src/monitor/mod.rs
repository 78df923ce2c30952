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

//! # Search Monitors
//!
//! Pluggable observers and controllers for engine lifecycle events.
//! Monitors can log progress, collect metrics, enforce budgets, and issue
//! termination commands to stop a run cooperatively.
//!
//! ## Submodules
//!
//! - `search_monitor`: Core trait (`SearchMonitor<S>`) and `SearchCommand`
//!   enum, defining lifecycle hooks and control flow.
//! - `composite`: Aggregate multiple monitors into a single composite.
//! - `deadline`: Wall-clock deadline monitor with step-filtered checks.
//! - `no_op`: The do-nothing monitor used when no control is requested.
//!
//! The engines consult the monitor at every natural iteration boundary
//! (search node, pivot, table cell), so `on_step` and `search_command`
//! sit on the hot path and must stay cheap.

pub mod composite;
pub mod deadline;
pub mod no_op;
pub mod search_monitor;

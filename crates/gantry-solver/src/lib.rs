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

//! # Gantry Solver
//!
//! **The high-level entry point of the workspace.**
//!
//! A construction-planning caller deals with three kinds of decisions:
//! which projects to take on, how much of each work item to perform, and
//! how to split indivisible crews over sites. This crate wraps the three
//! dedicated engines behind one [`solver::PlanningSolver`] that accepts a
//! [`solver::PlanningProblem`], applies the configured wall-clock budget
//! uniformly, and returns a [`solver::PlanningOutcome`] mirroring the
//! problem kind.
//!
//! Each engine stays independently usable; this facade only adds
//! dispatch, shared monitor wiring, and run logging.

pub mod solver;

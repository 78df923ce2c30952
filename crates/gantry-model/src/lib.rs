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

//! # Gantry Model
//!
//! **The Core Domain Model for the Gantry Construction-Planning Solvers.**
//!
//! This crate defines the data structures shared by the three solving
//! engines: binary project selection (`gantry-bnb`), continuous volume
//! allocation (`gantry-simplex`), and discrete crew distribution
//! (`gantry-dp`). It is the data interchange layer between problem
//! construction (caller input) and the engines.
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **solving**:
//!
//! * **`index`**: strongly-typed wrappers (`ItemIndex`, `ObjectIndex`) to
//!   prevent logical indexing errors across the problem kinds.
//! * **`linear`**: `LinearModel` — a maximization objective plus relational
//!   constraints over named decision variables. The shared vocabulary of
//!   the two linear engines; it offers no solving behavior itself.
//! * **`selection` / `allocation` / `distribution`**: the immutable problem
//!   types and their mutating builders. Builders validate eagerly and fail
//!   with [`error::ModelError`]; a built problem is always well-formed.
//! * **`solution`**: the output formats, including objective values,
//!   per-constraint `(used, limit)` diagnostics, and precision warnings.
//!
//! ## Design Philosophy
//!
//! 1. **Fail-Fast**: dangling name references, non-finite bounds, and
//!    negative capacities are rejected at build time so the engines never
//!    see an invalid problem.
//! 2. **Caller-Owned Output**: solutions are produced fresh per solve call
//!    and carry no back-reference to the problem; there is no shared
//!    mutable state anywhere in the model.

pub mod allocation;
pub mod distribution;
pub mod error;
pub mod index;
pub mod linear;
pub mod selection;
pub mod solution;

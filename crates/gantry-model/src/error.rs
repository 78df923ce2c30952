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

//! Construction-time errors for the problem builders.
//!
//! A `ModelError` always aborts the construction call that raised it; no
//! partially-built problem ever reaches a solver. Infeasibility and
//! unboundedness are *not* errors — they are normal solver outcomes and
//! live in the result types of `gantry-search`.

use thiserror::Error;

/// A malformed problem definition, detected before any solving attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Two declarations share the same name within one problem.
    #[error("duplicate name '{0}'")]
    DuplicateName(String),

    /// A constraint term references a variable that was never declared.
    #[error("constraint '{label}' references undeclared variable '{name}'")]
    UndeclaredVariable { label: String, name: String },

    /// A logical relation references an item that was never declared.
    #[error("logical relation references undeclared item '{0}'")]
    UndeclaredRelationItem(String),

    /// A logical relation names the same item on both sides.
    #[error("logical relation references item '{0}' twice")]
    SelfRelation(String),

    /// A constraint bound is NaN or infinite.
    #[error("constraint '{label}' has non-finite bound {bound}")]
    NonFiniteBound { label: String, bound: f64 },

    /// A constraint coefficient is NaN or infinite.
    #[error("constraint '{label}' has a non-finite coefficient for '{name}'")]
    NonFiniteCoefficient { label: String, name: String },

    /// An objective coefficient is NaN or infinite.
    #[error("non-finite objective coefficient for '{0}'")]
    NonFiniteObjective(String),

    /// A shared resource capacity is negative.
    #[error("negative capacity {value} for resource '{resource}'")]
    NegativeCapacity { resource: String, value: f64 },

    /// A per-item maximum volume is negative.
    #[error("negative maximum volume {value} for work item '{name}'")]
    NegativeMaxVolume { name: String, value: f64 },

    /// The problem declares no decision variables at all.
    #[error("problem declares no decision variables")]
    NoVariables,

    /// A crew-output lookup table has no rows.
    #[error("output table for object '{0}' is empty")]
    EmptyOutputTable(String),

    /// A crew-output lookup table does not map zero crews to zero output.
    #[error("output table for object '{0}' must map zero crews to zero output")]
    NonZeroTableBase(String),
}

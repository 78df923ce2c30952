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

//! The shared linear vocabulary consumed by the selection and allocation
//! engines.
//!
//! A [`LinearModel`] holds a maximization objective (a weighted sum of
//! named decision variables) and an ordered list of relational constraints.
//! It offers no solving behavior itself; what "solving" means — binary
//! choices under branch-and-bound versus continuous volumes under the
//! simplex method — is decided by the engine that consumes it.
//!
//! Construction goes through [`LinearModelBuilder`], which resolves
//! constraint terms by variable name and fails with [`ModelError`] on a
//! dangling reference or a non-finite bound or coefficient. A built model
//! is immutable and always well-formed.

use crate::{
    error::ModelError,
    index::{ConstraintIndex, ItemIndex},
    solution::ConstraintUsage,
};
use gantry_core::num::constants::{eq_within, ge_within, le_within};
use rustc_hash::FxHashMap;

/// The relation of a linear constraint against its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Left-hand side must not exceed the bound.
    Le,
    /// Left-hand side must reach the bound.
    Ge,
    /// Left-hand side must equal the bound.
    Eq,
}

impl Relation {
    /// Checks `lhs <relation> bound` within the workspace feasibility
    /// tolerance.
    #[inline]
    pub fn holds(&self, lhs: f64, bound: f64) -> bool {
        match self {
            Relation::Le => le_within(lhs, bound),
            Relation::Ge => ge_within(lhs, bound),
            Relation::Eq => eq_within(lhs, bound),
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
            Relation::Eq => write!(f, "=="),
        }
    }
}

/// A single linear constraint: `Σ coefficients[i] · x_i  <relation>  bound`.
///
/// Coefficients are stored densely, indexed by the variable order of the
/// owning model; variables a constraint does not mention carry a zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    label: String,
    coefficients: Vec<f64>,
    relation: Relation,
    bound: f64,
}

impl LinearConstraint {
    /// The diagnostic label of this constraint (e.g. a resource tag).
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The dense coefficient row, one entry per model variable.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The relation against the bound.
    #[inline]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The numeric bound. Always finite.
    #[inline]
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Evaluates the left-hand side for the given decision values.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `decisions` has the wrong length.
    #[inline]
    pub fn lhs(&self, decisions: &[f64]) -> f64 {
        debug_assert_eq!(
            decisions.len(),
            self.coefficients.len(),
            "called `LinearConstraint::lhs` with {} decision values for {} coefficients",
            decisions.len(),
            self.coefficients.len()
        );

        self.coefficients
            .iter()
            .zip(decisions)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// Checks whether the given decision values satisfy this constraint
    /// within tolerance.
    #[inline]
    pub fn is_satisfied(&self, decisions: &[f64]) -> bool {
        self.relation.holds(self.lhs(decisions), self.bound)
    }
}

impl std::fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.label, self.relation, self.bound)
    }
}

/// An immutable linear maximization model over named decision variables.
///
/// Constraint order is the declaration order and is preserved for
/// diagnostic reporting; it has no effect on correctness.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    variable_names: Vec<String>,
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl LinearModel {
    /// Returns the number of decision variables.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.variable_names.len()
    }

    /// Returns the number of constraints.
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the names of all decision variables in declaration order.
    #[inline]
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Returns the name of the given variable.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_variables()`.
    #[inline]
    pub fn variable_name(&self, index: ItemIndex) -> &str {
        &self.variable_names[index.get()]
    }

    /// Returns the objective coefficients, one per variable.
    #[inline]
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Returns all constraints in declaration order.
    #[inline]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Returns the given constraint.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_constraints()`.
    #[inline]
    pub fn constraint(&self, index: ConstraintIndex) -> &LinearConstraint {
        &self.constraints[index.get()]
    }

    /// Evaluates the objective for the given decision values.
    #[inline]
    pub fn objective_value(&self, decisions: &[f64]) -> f64 {
        debug_assert_eq!(decisions.len(), self.objective.len());
        self.objective
            .iter()
            .zip(decisions)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// Checks whether the given decision values satisfy every constraint
    /// within tolerance.
    pub fn is_feasible(&self, decisions: &[f64]) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(decisions))
    }

    /// Computes `(used, limit)` diagnostics for every constraint, in
    /// declaration order. This is exactly what a reporting layer needs to
    /// print "used ≤ limit" checklists without recomputation.
    pub fn usage(&self, decisions: &[f64]) -> Vec<ConstraintUsage> {
        self.constraints
            .iter()
            .map(|c| ConstraintUsage::new(c.label.clone(), c.relation, c.lhs(decisions), c.bound))
            .collect()
    }
}

/// A mutable builder producing a validated [`LinearModel`].
#[derive(Debug, Clone, Default)]
pub struct LinearModelBuilder {
    variable_names: Vec<String>,
    objective: Vec<f64>,
    pending: Vec<PendingConstraint>,
}

#[derive(Debug, Clone)]
struct PendingConstraint {
    label: String,
    terms: Vec<(String, f64)>,
    relation: Relation,
    bound: f64,
}

impl LinearModelBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a decision variable with its objective coefficient.
    /// Declaration order fixes the variable order of the built model.
    pub fn variable(mut self, name: &str, objective: f64) -> Self {
        self.variable_names.push(name.to_string());
        self.objective.push(objective);
        self
    }

    /// Adds a constraint `Σ term_coef · term_var  <relation>  bound`.
    /// Terms reference variables by name; unresolved names fail `build`.
    pub fn constraint(
        mut self,
        label: &str,
        terms: &[(&str, f64)],
        relation: Relation,
        bound: f64,
    ) -> Self {
        self.pending.push(PendingConstraint {
            label: label.to_string(),
            terms: terms.iter().map(|(n, c)| (n.to_string(), *c)).collect(),
            relation,
            bound,
        });
        self
    }

    /// Validates and builds the model.
    pub fn build(self) -> Result<LinearModel, ModelError> {
        if self.variable_names.is_empty() {
            return Err(ModelError::NoVariables);
        }

        let mut index_by_name: FxHashMap<&str, usize> =
            FxHashMap::with_capacity_and_hasher(self.variable_names.len(), Default::default());
        for (i, name) in self.variable_names.iter().enumerate() {
            if index_by_name.insert(name.as_str(), i).is_some() {
                return Err(ModelError::DuplicateName(name.clone()));
            }
            if !self.objective[i].is_finite() {
                return Err(ModelError::NonFiniteObjective(name.clone()));
            }
        }

        let mut constraints = Vec::with_capacity(self.pending.len());
        for pending in &self.pending {
            if !pending.bound.is_finite() {
                return Err(ModelError::NonFiniteBound {
                    label: pending.label.clone(),
                    bound: pending.bound,
                });
            }

            let mut coefficients = vec![0.0; self.variable_names.len()];
            for (name, coefficient) in &pending.terms {
                let index = *index_by_name.get(name.as_str()).ok_or_else(|| {
                    ModelError::UndeclaredVariable {
                        label: pending.label.clone(),
                        name: name.clone(),
                    }
                })?;
                if !coefficient.is_finite() {
                    return Err(ModelError::NonFiniteCoefficient {
                        label: pending.label.clone(),
                        name: name.clone(),
                    });
                }
                // Repeated terms for the same variable accumulate.
                coefficients[index] += coefficient;
            }

            constraints.push(LinearConstraint {
                label: pending.label.clone(),
                coefficients,
                relation: pending.relation,
                bound: pending.bound,
            });
        }

        Ok(LinearModel {
            variable_names: self.variable_names,
            objective: self.objective,
            constraints,
        })
    }
}

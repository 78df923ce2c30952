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

//! 0/1 selection problems: choose a subset of candidate projects that
//! maximizes total value under resource ceilings/floors and pairwise
//! logical relations.
//!
//! Logical relations are not a separate mechanism at solve time: the
//! builder folds them into the underlying [`LinearModel`] as ordinary
//! constraints over the same binary variables (`x_a - x_b == 0` for an
//! equality pair, `x_a + x_b <= 1` for a mutually exclusive pair). The
//! typed [`LogicalRelation`] list is kept alongside purely for reporting.

use crate::{
    error::ModelError,
    index::ItemIndex,
    linear::{LinearModel, LinearModelBuilder, Relation},
};

/// A pairwise logical relation between two binary decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalRelation {
    /// Both items are selected, or neither is.
    Equal(ItemIndex, ItemIndex),
    /// At most one of the two items is selected.
    MutuallyExclusive(ItemIndex, ItemIndex),
}

impl std::fmt::Display for LogicalRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalRelation::Equal(a, b) => write!(f, "equal({}, {})", a.get(), b.get()),
            LogicalRelation::MutuallyExclusive(a, b) => {
                write!(f, "exclusive({}, {})", a.get(), b.get())
            }
        }
    }
}

/// An immutable 0/1 selection problem.
///
/// Decision variables are binary by construction; the solver needs no
/// rounding step. Built via [`SelectionProblemBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionProblem {
    model: LinearModel,
    relations: Vec<LogicalRelation>,
}

impl SelectionProblem {
    /// Returns the number of candidate items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.model.num_variables()
    }

    /// Returns the item names in declaration order.
    #[inline]
    pub fn item_names(&self) -> &[String] {
        self.model.variable_names()
    }

    /// Returns the name of one item.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not in `0..num_items()`.
    #[inline]
    pub fn item_name(&self, item: ItemIndex) -> &str {
        self.model.variable_name(item)
    }

    /// Returns the value coefficient per item.
    #[inline]
    pub fn values(&self) -> &[f64] {
        self.model.objective()
    }

    /// Returns the underlying linear model (resource bounds followed by
    /// the constraints the logical relations were folded into).
    #[inline]
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Returns the declared logical relations, for reporting.
    #[inline]
    pub fn relations(&self) -> &[LogicalRelation] {
        &self.relations
    }
}

/// Builder for [`SelectionProblem`].
///
/// Items, consumptions, bounds, and relations may be declared in any
/// order; all name references are resolved and validated in [`build`].
///
/// [`build`]: SelectionProblemBuilder::build
#[derive(Debug, Clone, Default)]
pub struct SelectionProblemBuilder {
    items: Vec<(String, f64)>,
    consumptions: Vec<(String, String, f64)>,
    bounds: Vec<(String, Relation, f64)>,
    relations: Vec<(String, String, bool)>, // (a, b, is_equal)
}

impl SelectionProblemBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a candidate item with its value coefficient.
    pub fn item(mut self, name: &str, value: f64) -> Self {
        self.items.push((name.to_string(), value));
        self
    }

    /// Declares the per-unit consumption of `resource` by `item`.
    /// Items without a declared consumption for a resource consume zero.
    pub fn consumption(mut self, item: &str, resource: &str, amount: f64) -> Self {
        self.consumptions
            .push((item.to_string(), resource.to_string(), amount));
        self
    }

    /// Bounds the total consumption of `resource` from above.
    pub fn ceiling(mut self, resource: &str, bound: f64) -> Self {
        self.bounds.push((resource.to_string(), Relation::Le, bound));
        self
    }

    /// Bounds the total consumption of `resource` from below.
    pub fn floor(mut self, resource: &str, bound: f64) -> Self {
        self.bounds.push((resource.to_string(), Relation::Ge, bound));
        self
    }

    /// Requires that `a` and `b` are both selected or both excluded.
    pub fn require_equal(mut self, a: &str, b: &str) -> Self {
        self.relations.push((a.to_string(), b.to_string(), true));
        self
    }

    /// Requires that at most one of `a` and `b` is selected.
    pub fn mutually_exclusive(mut self, a: &str, b: &str) -> Self {
        self.relations.push((a.to_string(), b.to_string(), false));
        self
    }

    /// Validates and builds the problem.
    pub fn build(self) -> Result<SelectionProblem, ModelError> {
        let mut model = LinearModelBuilder::new();
        for (name, value) in &self.items {
            model = model.variable(name, *value);
        }

        // One constraint per declared resource bound, in declaration order.
        for (resource, relation, bound) in &self.bounds {
            let terms: Vec<(&str, f64)> = self
                .consumptions
                .iter()
                .filter(|(_, tag, _)| tag == resource)
                .map(|(item, _, amount)| (item.as_str(), *amount))
                .collect();
            model = model.constraint(resource, &terms, *relation, *bound);
        }

        // Fold logical relations into the model as binary constraints.
        for (a, b, is_equal) in &self.relations {
            if a == b {
                return Err(ModelError::SelfRelation(a.clone()));
            }
            let (label, terms, relation, bound) = if *is_equal {
                (
                    format!("equal({}, {})", a, b),
                    [(a.as_str(), 1.0), (b.as_str(), -1.0)],
                    Relation::Eq,
                    0.0,
                )
            } else {
                (
                    format!("exclusive({}, {})", a, b),
                    [(a.as_str(), 1.0), (b.as_str(), 1.0)],
                    Relation::Le,
                    1.0,
                )
            };
            model = model.constraint(&label, &terms, relation, bound);
        }

        let model = model.build().map_err(|e| match e {
            // A dangling name inside a relation constraint is reported as a
            // relation error, not a generic constraint error.
            ModelError::UndeclaredVariable { label, name }
                if label.starts_with("equal(") || label.starts_with("exclusive(") =>
            {
                ModelError::UndeclaredRelationItem(name)
            }
            other => other,
        })?;

        // Resolve the typed relation list against the final variable order.
        let index_of = |name: &String| -> Result<ItemIndex, ModelError> {
            model
                .variable_names()
                .iter()
                .position(|n| n == name)
                .map(ItemIndex::new)
                .ok_or_else(|| ModelError::UndeclaredRelationItem(name.clone()))
        };
        let mut relations = Vec::with_capacity(self.relations.len());
        for (a, b, is_equal) in &self.relations {
            let relation = if *is_equal {
                LogicalRelation::Equal(index_of(a)?, index_of(b)?)
            } else {
                LogicalRelation::MutuallyExclusive(index_of(a)?, index_of(b)?)
            };
            relations.push(relation);
        }

        Ok(SelectionProblem { model, relations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_problem() -> SelectionProblem {
        SelectionProblemBuilder::new()
            .item("a", 3.0)
            .item("b", 2.0)
            .item("c", 1.0)
            .consumption("a", "budget", 5.0)
            .consumption("b", "budget", 4.0)
            .consumption("c", "budget", 3.0)
            .ceiling("budget", 9.0)
            .mutually_exclusive("a", "b")
            .build()
            .expect("problem builds")
    }

    #[test]
    fn test_build_and_accessors() {
        let problem = small_problem();
        assert_eq!(problem.num_items(), 3);
        assert_eq!(problem.values(), &[3.0, 2.0, 1.0]);
        assert_eq!(problem.item_name(ItemIndex::new(1)), "b");
        assert_eq!(problem.relations().len(), 1);
        // One resource bound plus one folded relation constraint.
        assert_eq!(problem.model().num_constraints(), 2);
    }

    #[test]
    fn test_relations_become_model_constraints() {
        let problem = SelectionProblemBuilder::new()
            .item("a", 1.0)
            .item("b", 1.0)
            .require_equal("a", "b")
            .build()
            .expect("problem builds");

        let constraint = &problem.model().constraints()[0];
        assert_eq!(constraint.coefficients(), &[1.0, -1.0]);
        assert_eq!(constraint.relation(), Relation::Eq);
        assert_eq!(constraint.bound(), 0.0);
        // Both-or-neither holds, mixed does not.
        assert!(constraint.is_satisfied(&[1.0, 1.0]));
        assert!(constraint.is_satisfied(&[0.0, 0.0]));
        assert!(!constraint.is_satisfied(&[1.0, 0.0]));
    }

    #[test]
    fn test_exclusive_relation_constraint_shape() {
        let problem = small_problem();
        let constraint = &problem.model().constraints()[1];
        assert_eq!(constraint.coefficients(), &[1.0, 1.0, 0.0]);
        assert_eq!(constraint.relation(), Relation::Le);
        assert_eq!(constraint.bound(), 1.0);
    }

    #[test]
    fn test_unknown_relation_item_is_an_error() {
        let err = SelectionProblemBuilder::new()
            .item("a", 1.0)
            .mutually_exclusive("a", "ghost")
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::UndeclaredRelationItem("ghost".to_string()));
    }

    #[test]
    fn test_self_relation_is_an_error() {
        let err = SelectionProblemBuilder::new()
            .item("a", 1.0)
            .require_equal("a", "a")
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::SelfRelation("a".to_string()));
    }

    #[test]
    fn test_dangling_consumption_is_an_error() {
        let err = SelectionProblemBuilder::new()
            .item("a", 1.0)
            .consumption("ghost", "budget", 1.0)
            .ceiling("budget", 10.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::UndeclaredVariable {
                label: "budget".to_string(),
                name: "ghost".to_string(),
            }
        );
    }
}

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

//! Continuous allocation problems: choose a non-negative volume per work
//! item maximizing total income under per-item maxima and shared resource
//! ceilings.
//!
//! The resource ceilings live in the underlying [`LinearModel`] (one `<=`
//! row per resource, in declaration order); the per-item maxima are kept
//! as variable bounds next to it, the way an LP treats box constraints.
//! By construction every model row is a `<=` against a non-negative,
//! finite bound, which is exactly the shape the simplex engine relies on
//! to start from the slack basis.

use crate::{
    error::ModelError,
    index::ItemIndex,
    linear::{LinearModel, LinearModelBuilder, Relation},
};

/// An immutable continuous allocation problem.
///
/// Decision variables are continuous and bounded below by zero; the only
/// upper bounds are the per-item maxima and the resource ceilings.
/// Built via [`AllocationProblemBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationProblem {
    model: LinearModel,
    max_volumes: Vec<f64>,
}

impl AllocationProblem {
    /// Returns the number of work items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.model.num_variables()
    }

    /// Returns the number of shared resource ceilings.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.model.num_constraints()
    }

    /// Returns the work item names in declaration order.
    #[inline]
    pub fn item_names(&self) -> &[String] {
        self.model.variable_names()
    }

    /// Returns the name of one work item.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not in `0..num_items()`.
    #[inline]
    pub fn item_name(&self, item: ItemIndex) -> &str {
        self.model.variable_name(item)
    }

    /// Returns the per-unit income per item.
    #[inline]
    pub fn incomes(&self) -> &[f64] {
        self.model.objective()
    }

    /// Returns the maximum volume per item.
    #[inline]
    pub fn max_volumes(&self) -> &[f64] {
        &self.max_volumes
    }

    /// Returns the maximum volume for one item.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not in `0..num_items()`.
    #[inline]
    pub fn max_volume(&self, item: ItemIndex) -> f64 {
        self.max_volumes[item.get()]
    }

    /// Returns the per-unit consumption rates of one resource, one entry
    /// per item.
    ///
    /// # Panics
    ///
    /// Panics if `resource` is not in `0..num_resources()`.
    #[inline]
    pub fn rates(&self, resource: usize) -> &[f64] {
        self.model.constraints()[resource].coefficients()
    }

    /// Returns the capacity of one resource.
    ///
    /// # Panics
    ///
    /// Panics if `resource` is not in `0..num_resources()`.
    #[inline]
    pub fn capacity(&self, resource: usize) -> f64 {
        self.model.constraints()[resource].bound()
    }

    /// Returns the underlying linear model (the resource ceiling rows).
    #[inline]
    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

/// Builder for [`AllocationProblem`].
#[derive(Debug, Clone, Default)]
pub struct AllocationProblemBuilder {
    items: Vec<(String, f64, f64)>, // (name, income, max volume)
    consumptions: Vec<(String, String, f64)>,
    capacities: Vec<(String, f64)>,
}

impl AllocationProblemBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a work item with its per-unit income and maximum volume.
    pub fn work_item(mut self, name: &str, income: f64, max_volume: f64) -> Self {
        self.items.push((name.to_string(), income, max_volume));
        self
    }

    /// Declares the per-unit consumption rate of `resource` by `item`.
    /// Items without a declared rate for a resource consume zero.
    pub fn consumption(mut self, item: &str, resource: &str, rate: f64) -> Self {
        self.consumptions
            .push((item.to_string(), resource.to_string(), rate));
        self
    }

    /// Declares a shared resource with its capacity (a `<=` ceiling).
    pub fn capacity(mut self, resource: &str, capacity: f64) -> Self {
        self.capacities.push((resource.to_string(), capacity));
        self
    }

    /// Validates and builds the problem.
    pub fn build(self) -> Result<AllocationProblem, ModelError> {
        for (name, _, max_volume) in &self.items {
            if !max_volume.is_finite() || *max_volume < 0.0 {
                return Err(ModelError::NegativeMaxVolume {
                    name: name.clone(),
                    value: *max_volume,
                });
            }
        }
        for (resource, capacity) in &self.capacities {
            if capacity.is_finite() && *capacity < 0.0 {
                return Err(ModelError::NegativeCapacity {
                    resource: resource.clone(),
                    value: *capacity,
                });
            }
        }

        let mut model = LinearModelBuilder::new();
        for (name, income, _) in &self.items {
            model = model.variable(name, *income);
        }
        for (resource, capacity) in &self.capacities {
            let terms: Vec<(&str, f64)> = self
                .consumptions
                .iter()
                .filter(|(_, tag, _)| tag == resource)
                .map(|(item, _, rate)| (item.as_str(), *rate))
                .collect();
            model = model.constraint(resource, &terms, Relation::Le, *capacity);
        }
        let model = model.build()?;

        let max_volumes = self.items.iter().map(|(_, _, max)| *max).collect();
        Ok(AllocationProblem { model, max_volumes })
    }
}

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

//! Crew distribution problems: partition a fixed pool of indivisible crew
//! units among construction objects, where each object's output as a
//! function of its crew count is given by a lookup table rather than a
//! formula.
//!
//! A table row for zero crews must be zero output (the no-allocation case
//! is always tabulated); unit counts beyond a table's last row are not
//! admissible for that object and are never indexed.

use crate::{error::ModelError, index::ObjectIndex};
use num_traits::Zero;

/// An immutable crew distribution problem.
///
/// Generic over the output number type `T` so integer and floating-point
/// tables both work. Built via [`DistributionProblemBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionProblem<T> {
    object_names: Vec<String>,
    tables: Vec<Vec<T>>,
    pool: usize,
}

impl<T> DistributionProblem<T>
where
    T: Copy,
{
    /// Returns the number of construction objects.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.object_names.len()
    }

    /// Returns the object names in declaration order.
    #[inline]
    pub fn object_names(&self) -> &[String] {
        &self.object_names
    }

    /// Returns the name of one object.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not in `0..num_objects()`.
    #[inline]
    pub fn object_name(&self, object: ObjectIndex) -> &str {
        &self.object_names[object.get()]
    }

    /// Returns the total number of crew units to distribute.
    #[inline]
    pub fn pool(&self) -> usize {
        self.pool
    }

    /// Returns the full lookup table of one object; entry `x` is the
    /// output at `x` assigned crews.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not in `0..num_objects()`.
    #[inline]
    pub fn table(&self, object: ObjectIndex) -> &[T] {
        &self.tables[object.get()]
    }

    /// Returns the largest admissible crew count for one object.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not in `0..num_objects()`.
    #[inline]
    pub fn max_units(&self, object: ObjectIndex) -> usize {
        self.tables[object.get()].len() - 1
    }

    /// Returns the tabulated output of `object` at `units` assigned
    /// crews, or `None` if the table does not extend that far.
    #[inline]
    pub fn output(&self, object: ObjectIndex, units: usize) -> Option<T> {
        self.tables[object.get()].get(units).copied()
    }
}

/// Builder for [`DistributionProblem`].
#[derive(Debug, Clone)]
pub struct DistributionProblemBuilder<T> {
    objects: Vec<(String, Vec<T>)>,
    pool: usize,
}

impl<T> Default for DistributionProblemBuilder<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            pool: 0,
        }
    }
}

impl<T> DistributionProblemBuilder<T>
where
    T: Copy + PartialEq + Zero,
{
    /// Creates an empty builder with a pool of zero units.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a construction object with its output lookup table;
    /// entry `x` of the table is the output at `x` assigned crews.
    pub fn object(mut self, name: &str, table: Vec<T>) -> Self {
        self.objects.push((name.to_string(), table));
        self
    }

    /// Sets the total number of crew units to distribute.
    pub fn pool(mut self, units: usize) -> Self {
        self.pool = units;
        self
    }

    /// Validates and builds the problem.
    pub fn build(self) -> Result<DistributionProblem<T>, ModelError> {
        if self.objects.is_empty() {
            return Err(ModelError::NoVariables);
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.objects.len());
        for (name, table) in &self.objects {
            if seen.contains(&name.as_str()) {
                return Err(ModelError::DuplicateName(name.clone()));
            }
            seen.push(name);

            if table.is_empty() {
                return Err(ModelError::EmptyOutputTable(name.clone()));
            }
            if table[0] != T::zero() {
                return Err(ModelError::NonZeroTableBase(name.clone()));
            }
        }

        let (object_names, tables) = self.objects.into_iter().unzip();
        Ok(DistributionProblem {
            object_names,
            tables,
            pool: self.pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_problem() -> DistributionProblem<i64> {
        DistributionProblemBuilder::new()
            .object("site a", vec![0, 100, 230])
            .object("site b", vec![0, 110, 230])
            .pool(2)
            .build()
            .expect("problem builds")
    }

    #[test]
    fn test_build_and_accessors() {
        let problem = small_problem();
        assert_eq!(problem.num_objects(), 2);
        assert_eq!(problem.pool(), 2);
        assert_eq!(problem.table(ObjectIndex::new(0)), &[0, 100, 230]);
        assert_eq!(problem.max_units(ObjectIndex::new(1)), 2);
        assert_eq!(problem.object_name(ObjectIndex::new(1)), "site b");
    }

    #[test]
    fn test_output_beyond_table_is_none() {
        let problem = small_problem();
        assert_eq!(problem.output(ObjectIndex::new(0), 2), Some(230));
        assert_eq!(problem.output(ObjectIndex::new(0), 3), None);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let err = DistributionProblemBuilder::<i64>::new()
            .object("site", Vec::new())
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::EmptyOutputTable("site".to_string()));
    }

    #[test]
    fn test_non_zero_base_is_an_error() {
        let err = DistributionProblemBuilder::new()
            .object("site", vec![5, 10])
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::NonZeroTableBase("site".to_string()));
    }

    #[test]
    fn test_no_objects_is_an_error() {
        let err = DistributionProblemBuilder::<i64>::new().build().unwrap_err();
        assert_eq!(err, ModelError::NoVariables);
    }

    #[test]
    fn test_duplicate_object_is_an_error() {
        let err = DistributionProblemBuilder::new()
            .object("site", vec![0, 1])
            .object("site", vec![0, 2])
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateName("site".to_string()));
    }
}

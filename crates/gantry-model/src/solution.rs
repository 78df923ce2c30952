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

//! Solution types produced by the three engines.
//!
//! Every solution is a fresh value owned by the caller: no back-reference
//! to the problem, no shared state. Totals and per-constraint usage are
//! recomputed by the engines from the final decision values (checked, not
//! assumed), so a reporting layer can render "used ≤ limit" diagnostics
//! without touching the problem again.

use crate::{
    index::{ItemIndex, ObjectIndex},
    linear::Relation,
};
use gantry_core::num::constants::{excess_over, VOLUME_EPSILON};

/// The achieved `(used, limit)` pair for one declared constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintUsage {
    label: String,
    relation: Relation,
    used: f64,
    bound: f64,
}

impl ConstraintUsage {
    /// Constructs a usage record.
    #[inline]
    pub fn new(label: String, relation: Relation, used: f64, bound: f64) -> Self {
        Self {
            label,
            relation,
            used,
            bound,
        }
    }

    /// The constraint label (e.g. the resource tag).
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The constraint relation.
    #[inline]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The achieved left-hand-side value.
    #[inline]
    pub fn used(&self) -> f64 {
        self.used
    }

    /// The declared bound.
    #[inline]
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Whether the achieved value satisfies the relation within tolerance.
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        self.relation.holds(self.used, self.bound)
    }
}

impl std::fmt::Display for ConstraintUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {} {} [{}]",
            self.label,
            self.used,
            self.relation,
            self.bound,
            if self.is_satisfied() { "ok" } else { "violated" }
        )
    }
}

/// A warning that a resource usage exceeds its cap by more than the
/// numeric tolerance. Surfaced alongside the solution rather than
/// suppressing it, since the totals still need reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionWarning {
    label: String,
    used: f64,
    bound: f64,
    excess: f64,
}

impl PrecisionWarning {
    /// Builds a warning if `used` exceeds `bound` beyond tolerance.
    pub fn check(label: &str, used: f64, bound: f64) -> Option<Self> {
        let excess = excess_over(used, bound);
        (excess > 0.0).then(|| Self {
            label: label.to_string(),
            used,
            bound,
            excess,
        })
    }

    /// The constraint label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The achieved usage.
    #[inline]
    pub fn used(&self) -> f64 {
        self.used
    }

    /// The declared cap.
    #[inline]
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// How far beyond the tolerance the cap was exceeded.
    #[inline]
    pub fn excess(&self) -> f64 {
        self.excess
    }
}

impl std::fmt::Display for PrecisionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "usage {} of '{}' exceeds cap {} by {} beyond tolerance",
            self.used, self.label, self.bound, self.excess
        )
    }
}

/// The chosen subset for a selection problem.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSolution {
    objective_value: f64,
    selected: Vec<ItemIndex>,
    usage: Vec<ConstraintUsage>,
}

impl SelectionSolution {
    /// Constructs a new `SelectionSolution`. `selected` must be sorted in
    /// declaration order.
    pub fn new(objective_value: f64, selected: Vec<ItemIndex>, usage: Vec<ConstraintUsage>) -> Self {
        debug_assert!(
            selected.windows(2).all(|w| w[0] < w[1]),
            "called `SelectionSolution::new` with unsorted or duplicated item indices"
        );

        Self {
            objective_value,
            selected,
            usage,
        }
    }

    /// The total value of the chosen subset.
    #[inline]
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// The chosen items in declaration order.
    #[inline]
    pub fn selected(&self) -> &[ItemIndex] {
        &self.selected
    }

    /// Whether the given item was chosen.
    #[inline]
    pub fn is_selected(&self, item: ItemIndex) -> bool {
        self.selected.binary_search(&item).is_ok()
    }

    /// Per-constraint `(used, limit)` diagnostics in declaration order.
    #[inline]
    pub fn usage(&self) -> &[ConstraintUsage] {
        &self.usage
    }
}

impl std::fmt::Display for SelectionSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Selection Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(
            f,
            "   Selected Items:  {:?}",
            self.selected.iter().map(|i| i.get()).collect::<Vec<_>>()
        )?;
        for usage in &self.usage {
            writeln!(f, "   {}", usage)?;
        }
        Ok(())
    }
}

/// The continuous volume per work item for an allocation problem.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSolution {
    objective_value: f64,
    volumes: Vec<f64>,
    usage: Vec<ConstraintUsage>,
    warnings: Vec<PrecisionWarning>,
}

impl AllocationSolution {
    /// Constructs a new `AllocationSolution`.
    pub fn new(
        objective_value: f64,
        volumes: Vec<f64>,
        usage: Vec<ConstraintUsage>,
        warnings: Vec<PrecisionWarning>,
    ) -> Self {
        Self {
            objective_value,
            volumes,
            usage,
            warnings,
        }
    }

    /// The total income achieved.
    #[inline]
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// The volume per work item, in declaration order. Values below the
    /// volume epsilon have been snapped to zero.
    #[inline]
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// The volume for one work item.
    ///
    /// # Panics
    ///
    /// Panics if `item` is out of bounds.
    #[inline]
    pub fn volume(&self, item: ItemIndex) -> f64 {
        self.volumes[item.get()]
    }

    /// The number of work items actually performed (volume above epsilon).
    #[inline]
    pub fn performed_count(&self) -> usize {
        self.volumes.iter().filter(|v| **v > VOLUME_EPSILON).count()
    }

    /// Per-constraint `(used, limit)` diagnostics in declaration order.
    #[inline]
    pub fn usage(&self) -> &[ConstraintUsage] {
        &self.usage
    }

    /// Numeric precision warnings, empty in the common case.
    #[inline]
    pub fn warnings(&self) -> &[PrecisionWarning] {
        &self.warnings
    }
}

impl std::fmt::Display for AllocationSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Summary")?;
        writeln!(f, "   Total Income: {:.2}", self.objective_value)?;
        writeln!(f, "   {:<10} | {:<12}", "Item", "Volume")?;
        writeln!(f, "   {:-<10}-+-{:-<12}", "", "")?;
        for (i, volume) in self.volumes.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<12.2}", i, volume)?;
        }
        for usage in &self.usage {
            writeln!(f, "   {}", usage)?;
        }
        for warning in &self.warnings {
            writeln!(f, "   warning: {}", warning)?;
        }
        Ok(())
    }
}

/// The integer crew count per object for a distribution problem, plus the
/// tabulated output each object achieves at that count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSolution<T> {
    total_output: T,
    assignments: Vec<usize>,
    outputs: Vec<T>,
}

impl<T> DistributionSolution<T>
where
    T: Copy,
{
    /// Constructs a new `DistributionSolution`.
    ///
    /// # Panics
    ///
    /// Panics if `assignments` and `outputs` have different lengths.
    pub fn new(total_output: T, assignments: Vec<usize>, outputs: Vec<T>) -> Self {
        assert_eq!(
            assignments.len(),
            outputs.len(),
            "called `DistributionSolution::new` with inconsistent vector lengths: assignments.len() = {}, outputs.len() = {}",
            assignments.len(),
            outputs.len()
        );

        Self {
            total_output,
            assignments,
            outputs,
        }
    }

    /// The maximal total output achieved.
    #[inline]
    pub fn total_output(&self) -> T {
        self.total_output
    }

    /// The crew count per object, in declaration order.
    #[inline]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// The crew count for one object.
    ///
    /// # Panics
    ///
    /// Panics if `object` is out of bounds.
    #[inline]
    pub fn crews_for_object(&self, object: ObjectIndex) -> usize {
        self.assignments[object.get()]
    }

    /// The tabulated output per object at the chosen crew counts.
    #[inline]
    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }

    /// The total number of crew units assigned.
    #[inline]
    pub fn assigned_units(&self) -> usize {
        self.assignments.iter().sum()
    }

    /// The number of objects in this solution.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.assignments.len()
    }
}

impl<T> std::fmt::Display for DistributionSolution<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Distribution Summary")?;
        writeln!(f, "   Total Output: {}", self.total_output)?;
        writeln!(f, "   {:<10} | {:<10} | {:<12}", "Object", "Crews", "Output")?;
        writeln!(f, "   {:-<10}-+-{:-<10}-+-{:-<12}", "", "", "")?;
        for i in 0..self.num_objects() {
            writeln!(
                f,
                "   {:<10} | {:<10} | {:<12}",
                i, self.assignments[i], self.outputs[i]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(label: &str, relation: Relation, used: f64, bound: f64) -> ConstraintUsage {
        ConstraintUsage::new(label.to_string(), relation, used, bound)
    }

    #[test]
    fn test_constraint_usage_satisfaction() {
        assert!(usage("budget", Relation::Le, 9.0, 10.0).is_satisfied());
        assert!(!usage("budget", Relation::Le, 11.0, 10.0).is_satisfied());
        assert!(usage("profit", Relation::Ge, 11.0, 10.0).is_satisfied());
    }

    #[test]
    fn test_precision_warning_only_beyond_tolerance() {
        assert!(PrecisionWarning::check("cap", 10.0 + 1e-8, 10.0).is_none());
        let warning = PrecisionWarning::check("cap", 10.5, 10.0).expect("warning");
        assert_eq!(warning.label(), "cap");
        assert!((warning.excess() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_selection_solution_membership() {
        let sol = SelectionSolution::new(
            5.0,
            vec![ItemIndex::new(1), ItemIndex::new(3)],
            Vec::new(),
        );
        assert!(sol.is_selected(ItemIndex::new(1)));
        assert!(sol.is_selected(ItemIndex::new(3)));
        assert!(!sol.is_selected(ItemIndex::new(0)));
        assert_eq!(sol.objective_value(), 5.0);
    }

    #[test]
    fn test_allocation_solution_performed_count() {
        let sol = AllocationSolution::new(
            10.0,
            vec![5.0, 0.0, 0.005, 2.0],
            Vec::new(),
            Vec::new(),
        );
        // 0.005 is below the volume epsilon and does not count.
        assert_eq!(sol.performed_count(), 2);
        assert_eq!(sol.volume(ItemIndex::new(3)), 2.0);
    }

    #[test]
    fn test_distribution_solution_totals() {
        let sol = DistributionSolution::new(490i64, vec![3, 0, 0, 1], vec![350, 0, 0, 140]);
        assert_eq!(sol.total_output(), 490);
        assert_eq!(sol.assigned_units(), 4);
        assert_eq!(sol.crews_for_object(ObjectIndex::new(0)), 3);
        assert_eq!(sol.num_objects(), 4);
    }

    #[test]
    #[should_panic(expected = "inconsistent vector lengths")]
    fn test_distribution_solution_length_mismatch_panics() {
        let _ = DistributionSolution::new(0i64, vec![1, 2], vec![10]);
    }
}

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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};

/// A composite monitor that aggregates multiple monitors and forwards
/// events to all of them.
///
/// `search_command` answers `Terminate` as soon as any member does; the
/// first terminating member wins and its reason is reported verbatim.
pub struct CompositeMonitor<'a, S> {
    monitors: Vec<Box<dyn SearchMonitor<S> + 'a>>,
}

impl<S> std::fmt::Debug for CompositeMonitor<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitors_str = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");

        f.debug_struct("CompositeMonitor")
            .field("monitors", &monitors_str)
            .finish()
    }
}

impl<S> Default for CompositeMonitor<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S> CompositeMonitor<'a, S> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> CompositeMonitor<'a, S> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` from a vector of boxed monitors.
    #[inline]
    pub fn from_vec(monitors: Vec<Box<dyn SearchMonitor<S> + 'a>>) -> CompositeMonitor<'a, S> {
        CompositeMonitor { monitors }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<S> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<S> SearchMonitor<S> for CompositeMonitor<'_, S> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search();
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    fn on_solution_found(&mut self, solution: &S) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        // A plain loop instead of `find_map`: this is polled once per
        // engine step, and the loop avoids building an `Option` per
        // member on the hot path.
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysTerminate(&'static str);

    impl<S> SearchMonitor<S> for AlwaysTerminate {
        fn name(&self) -> &str {
            "AlwaysTerminate"
        }
        fn on_enter_search(&mut self) {}
        fn on_exit_search(&mut self) {}
        fn on_solution_found(&mut self, _solution: &S) {}
        fn on_step(&mut self) {}
        fn search_command(&self) -> SearchCommand {
            SearchCommand::Terminate(self.0.to_string())
        }
    }

    struct CountingMonitor {
        steps: u64,
        solutions: u64,
    }

    impl<S> SearchMonitor<S> for CountingMonitor {
        fn name(&self) -> &str {
            "CountingMonitor"
        }
        fn on_enter_search(&mut self) {}
        fn on_exit_search(&mut self) {}
        fn on_solution_found(&mut self, _solution: &S) {
            self.solutions += 1;
        }
        fn on_step(&mut self) {
            self.steps += 1;
        }
        fn search_command(&self) -> SearchCommand {
            SearchCommand::Continue
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::<'_, ()>::new();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_first_terminating_member_wins() {
        let mut composite = CompositeMonitor::<'_, ()>::new();
        composite.add_monitor(AlwaysTerminate("first"));
        composite.add_monitor(AlwaysTerminate("second"));
        assert_eq!(composite.len(), 2);
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("first".to_string())
        );
    }

    #[test]
    fn test_events_are_forwarded_to_all_members() {
        let mut composite = CompositeMonitor::<'_, u32>::from_vec(vec![Box::new(
            CountingMonitor {
                steps: 0,
                solutions: 0,
            },
        )]);
        composite.on_enter_search();
        composite.on_step();
        composite.on_step();
        composite.on_solution_found(&7);
        composite.on_exit_search();
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }
}

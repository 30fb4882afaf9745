//! Dependency graph between recognizers.
//!
//! Two relations, both keyed by [`RecognizerId`]:
//! - **simultaneous** (symmetric): both recognizers may be active at once.
//! - **requires failure of** (asymmetric): the dependent may not recognize
//!   while the prerequisite is still `Possible`. The inverse edge
//!   ("required to fail by") is maintained alongside so a failing recognizer
//!   can find the dependents waiting on it.
//!
//! Adjacency sets are ordered, so every query iterates in registration order.

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;

use std::collections::{BTreeMap, BTreeSet};

use crate::registry::RecognizerId;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    simultaneous: BTreeMap<RecognizerId, BTreeSet<RecognizerId>>,
    requires_failure_of: BTreeMap<RecognizerId, BTreeSet<RecognizerId>>,
    required_to_fail_by: BTreeMap<RecognizerId, BTreeSet<RecognizerId>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `a` and `b` mutually simultaneous. Idempotent.
    pub fn add_simultaneous(&mut self, a: RecognizerId, b: RecognizerId) {
        self.simultaneous.entry(a).or_default().insert(b);
        self.simultaneous.entry(b).or_default().insert(a);
    }

    /// Declare that `dependent` waits for `prerequisite` to fail. Idempotent.
    pub fn add_failure_requirement(&mut self, dependent: RecognizerId, prerequisite: RecognizerId) {
        self.requires_failure_of.entry(dependent).or_default().insert(prerequisite);
        self.required_to_fail_by.entry(prerequisite).or_default().insert(dependent);
    }

    #[must_use]
    pub fn can_recognize_with(&self, a: RecognizerId, b: RecognizerId) -> bool {
        self.simultaneous.get(&a).is_some_and(|set| set.contains(&b))
    }

    #[must_use]
    pub fn requires_failure_of(&self, dependent: RecognizerId, prerequisite: RecognizerId) -> bool {
        self.requires_failure_of.get(&dependent).is_some_and(|set| set.contains(&prerequisite))
    }

    /// Recognizers that declared they wait for `prerequisite` to fail.
    #[must_use]
    pub fn dependents_of(&self, prerequisite: RecognizerId) -> Vec<RecognizerId> {
        self.required_to_fail_by
            .get(&prerequisite)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Drop every edge touching `id`.
    pub fn remove(&mut self, id: RecognizerId) {
        for map in [&mut self.simultaneous, &mut self.requires_failure_of, &mut self.required_to_fail_by] {
            map.remove(&id);
            for set in map.values_mut() {
                set.remove(&id);
            }
        }
    }
}

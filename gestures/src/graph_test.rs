use super::*;

fn id(n: usize) -> RecognizerId {
    RecognizerId(n)
}

#[test]
fn empty_graph_has_no_relations() {
    let g = DependencyGraph::new();
    assert!(!g.can_recognize_with(id(0), id(1)));
    assert!(!g.requires_failure_of(id(0), id(1)));
    assert!(g.dependents_of(id(1)).is_empty());
}

#[test]
fn simultaneity_is_symmetric() {
    let mut g = DependencyGraph::new();
    g.add_simultaneous(id(0), id(1));
    assert!(g.can_recognize_with(id(0), id(1)));
    assert!(g.can_recognize_with(id(1), id(0)));
    assert!(!g.can_recognize_with(id(0), id(2)));
}

#[test]
fn failure_requirement_is_asymmetric_with_inverse_edge() {
    let mut g = DependencyGraph::new();
    g.add_failure_requirement(id(3), id(1));
    assert!(g.requires_failure_of(id(3), id(1)));
    assert!(!g.requires_failure_of(id(1), id(3)));
    assert_eq!(g.dependents_of(id(1)), vec![id(3)]);
    assert!(g.dependents_of(id(3)).is_empty());
}

#[test]
fn dependents_iterate_in_registration_order() {
    let mut g = DependencyGraph::new();
    g.add_failure_requirement(id(5), id(0));
    g.add_failure_requirement(id(2), id(0));
    g.add_failure_requirement(id(4), id(0));
    assert_eq!(g.dependents_of(id(0)), vec![id(2), id(4), id(5)]);
}

#[test]
fn declarations_are_idempotent() {
    let mut g = DependencyGraph::new();
    g.add_simultaneous(id(0), id(1));
    g.add_simultaneous(id(1), id(0));
    g.add_failure_requirement(id(2), id(0));
    g.add_failure_requirement(id(2), id(0));
    assert_eq!(g.dependents_of(id(0)), vec![id(2)]);
    assert!(g.can_recognize_with(id(0), id(1)));
}

#[test]
fn remove_drops_all_edges() {
    let mut g = DependencyGraph::new();
    g.add_simultaneous(id(0), id(1));
    g.add_failure_requirement(id(2), id(1));
    g.add_failure_requirement(id(1), id(3));
    g.remove(id(1));
    assert!(!g.can_recognize_with(id(0), id(1)));
    assert!(!g.can_recognize_with(id(1), id(0)));
    assert!(!g.requires_failure_of(id(2), id(1)));
    assert!(g.dependents_of(id(1)).is_empty());
    assert!(g.dependents_of(id(3)).is_empty());
}

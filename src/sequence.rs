//! Canonical member order: root ancestors first, then breadth-first by
//! children cohort, siblings by birth year.

use crate::graph::FamilyGraph;
use crate::model::Member;
use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

/// Sibling ordering: earliest birth year first, undated last, ties by id.
pub fn sibling_cmp(a: &Member, b: &Member) -> Ordering {
    let year_key = |m: &Member| match m.birth_year() {
        Some(year) => (0, year),
        None => (1, 0),
    };
    year_key(a)
        .cmp(&year_key(b))
        .then_with(|| a.id.cmp(&b.id))
}

/// Children of `id` in sibling order.
pub fn sorted_children<'a>(graph: &FamilyGraph<'a>, id: &str) -> Vec<&'a Member> {
    let mut children = graph.children_of(id).to_vec();
    children.sort_by(|a, b| sibling_cmp(a, b));
    children
}

/// Total order over every member of `members`, each exactly once.
pub fn order(members: &[Member]) -> Vec<&Member> {
    order_graph(&FamilyGraph::new(members))
}

/// Breadth-first order from the root members (no parent links), siblings in
/// [`sibling_cmp`] order, then every unreached member in input order.
///
/// A child is listed under its resolved father, or its resolved mother when
/// the father id is missing or dangles. Members whose parent ids all dangle,
/// and parent cycles, are left unreached.
pub fn order_graph<'a>(graph: &FamilyGraph<'a>) -> Vec<&'a Member> {
    let mut roots: Vec<&Member> = graph
        .members()
        .iter()
        .copied()
        .filter(|m| !m.has_parent_link())
        .collect();
    roots.sort_by(|a, b| sibling_cmp(a, b));

    let mut ordered = Vec::with_capacity(graph.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.len());
    let mut queue: VecDeque<&Member> = VecDeque::new();

    for root in roots {
        if visited.insert(root.id.as_str()) {
            queue.push_back(root);
        }
    }

    while let Some(member) = queue.pop_front() {
        ordered.push(member);
        for child in sorted_children(graph, &member.id) {
            if visited.insert(child.id.as_str()) {
                queue.push_back(child);
            }
        }
    }

    // Orphaned subgraphs and parent cycles never reach the queue.
    for &member in graph.members() {
        if visited.insert(member.id.as_str()) {
            ordered.push(member);
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;

    fn ids<'a>(ordered: &[&'a Member]) -> Vec<&'a str> {
        ordered.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_siblings_by_birth_year_undated_last() {
        let members = vec![
            Member::new("dad", "Dad", Gender::Male, 1),
            Member::new("b", "B", Gender::Male, 2).with_father("dad").born("1950"),
            Member::new("u", "U", Gender::Female, 2).with_father("dad"),
            Member::new("a", "A", Gender::Female, 2).with_father("dad").born("1945-07-01"),
            Member::new("c", "C", Gender::Male, 2).with_father("dad").born("1960"),
        ];
        let ordered = order(&members);

        assert_eq!(ids(&ordered), vec!["dad", "a", "b", "c", "u"]);
    }

    #[test]
    fn test_unparseable_birth_date_sorts_last() {
        let members = vec![
            Member::new("dad", "Dad", Gender::Male, 1),
            Member::new("x", "X", Gender::Male, 2).with_father("dad").born("circa"),
            Member::new("y", "Y", Gender::Male, 2).with_father("dad").born("1990"),
        ];
        assert_eq!(ids(&order(&members)), vec!["dad", "y", "x"]);
    }

    #[test]
    fn test_breadth_first_across_generations() {
        let members = vec![
            Member::new("gc", "Grandchild", Gender::Male, 3).with_father("c1"),
            Member::new("c2", "Child 2", Gender::Male, 2).with_father("root").born("1960"),
            Member::new("c1", "Child 1", Gender::Male, 2).with_father("root").born("1950"),
            Member::new("root", "Root", Gender::Male, 1),
        ];
        assert_eq!(ids(&order(&members)), vec!["root", "c1", "c2", "gc"]);
    }

    #[test]
    fn test_mother_only_cohort() {
        let members = vec![
            Member::new("mom", "Mom", Gender::Female, 1),
            Member::new("kid", "Kid", Gender::Male, 2).with_mother("mom"),
        ];
        assert_eq!(ids(&order(&members)), vec!["mom", "kid"]);
    }

    #[test]
    fn test_dangling_father_falls_back_to_mother() {
        let members = vec![
            Member::new("kid", "Kid", Gender::Male, 2)
                .with_father("ghost")
                .with_mother("mom"),
            Member::new("lost", "Lost", Gender::Male, 2).with_father("ghost"),
            Member::new("mom", "Mom", Gender::Female, 1),
        ];
        assert_eq!(ids(&order(&members)), vec!["mom", "kid", "lost"]);
    }

    #[test]
    fn test_unreachable_members_appended_in_input_order() {
        let members = vec![
            Member::new("loop-a", "A", Gender::Male, 2).with_father("loop-b"),
            Member::new("root", "Root", Gender::Male, 1),
            Member::new("orphan", "Orphan", Gender::Male, 2).with_father("ghost"),
            Member::new("loop-b", "B", Gender::Male, 2).with_father("loop-a"),
        ];
        let ordered = order(&members);

        assert_eq!(ids(&ordered), vec!["root", "loop-a", "orphan", "loop-b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(order(&[]).is_empty());
    }
}

//! Visual connection set derived from the member graph.

use crate::graph::FamilyGraph;
use crate::model::partner_order;
use std::collections::HashSet;
use tracing::debug;

use super::types::{EdgeKind, LayoutEdge};

/// Father links, mother links where no father link is drawn, and one
/// spouse link per pair. References that do not resolve are dropped.
pub fn build_edges(graph: &FamilyGraph) -> Vec<LayoutEdge> {
    let mut edges = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut push = |kind: EdgeKind, source: &str, target: &str| {
        let id = format!("{}:{}->{}", kind.prefix(), source, target);
        if seen.insert(id.clone()) {
            edges.push(LayoutEdge {
                id,
                source: source.to_string(),
                target: target.to_string(),
                kind,
            });
        }
    };

    for &member in graph.members() {
        if let Some(father) = graph.father(member) {
            push(EdgeKind::Father, &father.id, &member.id);
        } else if let Some(mother) = graph.mother(member) {
            push(EdgeKind::Mother, &mother.id, &member.id);
        } else if member.has_parent_link() {
            debug!(member_id = %member.id, "parent link does not resolve, no edge drawn");
        }

        if let Some(spouse) = graph.spouse(member) {
            let (left, right) = partner_order(member, spouse);
            push(EdgeKind::Spouse, &left.id, &right.id);
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Member};

    fn edges_of(members: &[Member]) -> Vec<(EdgeKind, String, String)> {
        build_edges(&FamilyGraph::new(members))
            .into_iter()
            .map(|e| (e.kind, e.source, e.target))
            .collect()
    }

    #[test]
    fn test_father_link_preferred_over_mother() {
        let members = vec![
            Member::new("f", "F", Gender::Male, 1),
            Member::new("m", "M", Gender::Female, 1),
            Member::new("c", "C", Gender::Male, 2).with_father("f").with_mother("m"),
        ];
        assert_eq!(
            edges_of(&members),
            vec![(EdgeKind::Father, "f".to_string(), "c".to_string())]
        );
    }

    #[test]
    fn test_mother_link_fallback() {
        let members = vec![
            Member::new("m", "M", Gender::Female, 1),
            Member::new("c", "C", Gender::Male, 2).with_father("ghost").with_mother("m"),
        ];
        assert_eq!(
            edges_of(&members),
            vec![(EdgeKind::Mother, "m".to_string(), "c".to_string())]
        );
    }

    #[test]
    fn test_one_spouse_edge_per_pair_regardless_of_order() {
        let wife = Member::new("w", "W", Gender::Female, 1).with_spouse("h");
        let husband = Member::new("h", "H", Gender::Male, 1).with_spouse("w");

        let forward = edges_of(&[wife.clone(), husband.clone()]);
        let backward = edges_of(&[husband, wife]);

        assert_eq!(forward, vec![(EdgeKind::Spouse, "h".to_string(), "w".to_string())]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_one_sided_spouse_link_drawn() {
        let members = vec![
            Member::new("a", "A", Gender::Female, 1).with_spouse("b"),
            Member::new("b", "B", Gender::Female, 1),
        ];
        assert_eq!(
            edges_of(&members),
            vec![(EdgeKind::Spouse, "a".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn test_dangling_references_dropped() {
        let members = vec![
            Member::new("a", "A", Gender::Male, 2)
                .with_father("ghost")
                .with_mother("ghost-mother")
                .with_spouse("nobody"),
        ];
        assert!(edges_of(&members).is_empty());
    }

    #[test]
    fn test_edge_ids_unique() {
        let members = vec![
            Member::new("f", "F", Gender::Male, 1).with_spouse("m"),
            Member::new("m", "M", Gender::Female, 1).with_spouse("f"),
            Member::new("a", "A", Gender::Male, 2).with_father("f"),
            Member::new("b", "B", Gender::Male, 2).with_father("f"),
        ];
        let edges = build_edges(&FamilyGraph::new(&members));
        let ids: HashSet<&str> = edges.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(edges.len(), 3);
        assert_eq!(ids.len(), 3);
    }
}

//! Raw connectivity over the undirected parent/child/spouse view.

use crate::graph::FamilyGraph;
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    ParentChild,
    Spouse,
}

pub struct FamilyNetwork<'a> {
    graph: UnGraph<&'a str, Link>,
    index: HashMap<&'a str, NodeIndex>,
}

impl<'a> FamilyNetwork<'a> {
    pub fn new(family: &FamilyGraph<'a>) -> Self {
        let mut graph = UnGraph::with_capacity(family.len(), family.len() * 2);
        let mut index = HashMap::with_capacity(family.len());
        for &member in family.members() {
            index.insert(member.id.as_str(), graph.add_node(member.id.as_str()));
        }

        for &member in family.members() {
            let child = index[member.id.as_str()];
            for parent in family.parents(member) {
                let parent = index[parent.id.as_str()];
                if graph.find_edge(parent, child).is_none() {
                    graph.add_edge(parent, child, Link::ParentChild);
                }
            }
            if let Some(spouse) = family.spouse(member) {
                let spouse = index[spouse.id.as_str()];
                if graph.find_edge(child, spouse).is_none() {
                    graph.add_edge(child, spouse, Link::Spouse);
                }
            }
        }

        Self { graph, index }
    }

    /// Shortest path of member ids from `from` to `to`, both ends included.
    pub fn path(&self, from: &str, to: &str) -> Option<Vec<&'a str>> {
        let start = *self.index.get(from)?;
        let goal = *self.index.get(to)?;
        let (_, nodes) = astar(&self.graph, start, |n| n == goal, |_| 1usize, |_| 0)?;
        Some(nodes.into_iter().map(|n| self.graph[n]).collect())
    }
}

pub fn find_path<'a>(family: &FamilyGraph<'a>, from: &str, to: &str) -> Option<Vec<&'a str>> {
    FamilyNetwork::new(family).path(from, to)
}

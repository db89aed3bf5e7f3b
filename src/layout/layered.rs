//! Generic layered graph layout.
//!
//! Nodes carry an explicit rank; the solver orders nodes within each rank
//! to reduce crossings (barycenter sweeps) and assigns coordinates. It knows
//! nothing about families: couples and staircases are applied on top.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq)]
pub struct RankNode {
    pub id: String,
    /// Tier, top to bottom. Ranks need not be contiguous.
    pub rank: i64,
    pub width: f64,
    pub height: f64,
    /// Extra space the node needs below its box; the next rank starts
    /// after the deepest `height + descent` of this one.
    pub descent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RankGraph {
    pub nodes: Vec<RankNode>,
    /// (upper, lower) pairs of indices into `nodes`.
    pub edges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Assigns a box to every node of a ranked graph.
pub trait HierarchicalLayout {
    /// Returns one box per node, indexed like `graph.nodes`. Must be
    /// deterministic and must not fail on cycles, self-loops, or edges
    /// that point upward.
    fn arrange(&self, graph: &RankGraph) -> Vec<UnitBox>;
}

pub struct LayeredLayout {
    pub node_gap_x: f64,
    pub rank_gap: f64,
    pub margin: f64,
    /// Down+up barycenter sweeps; the ordering with fewest crossings wins.
    pub sweeps: usize,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self {
            node_gap_x: 40.0,
            rank_gap: 80.0,
            margin: 40.0,
            sweeps: 4,
        }
    }
}

impl HierarchicalLayout for LayeredLayout {
    fn arrange(&self, graph: &RankGraph) -> Vec<UnitBox> {
        if graph.nodes.is_empty() {
            return Vec::new();
        }

        // Phase 1: graph and layers
        let dag = build_dag(graph);
        let (mut layers, layer_of) = assign_layers(graph);

        // Phase 2: crossing reduction
        order_layers(&dag, &mut layers, &layer_of, self.sweeps);

        // Phase 3: coordinates
        let xs = self.assign_x(&dag, graph, &layers);
        let ys = self.assign_y(graph, &layers);

        graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| UnitBox {
                x: xs[i],
                y: ys[i],
                width: node.width,
                height: node.height,
            })
            .collect()
    }
}

impl LayeredLayout {
    fn assign_x(&self, dag: &DiGraph<(), ()>, graph: &RankGraph, layers: &[Vec<usize>]) -> Vec<f64> {
        let mut left = vec![0.0; graph.nodes.len()];
        for layer in layers {
            let mut x = 0.0;
            for &v in layer {
                left[v] = x;
                x += graph.nodes[v].width + self.node_gap_x;
            }
        }

        // Children move under their parents, then parents re-center over children.
        for layer in layers.iter().skip(1) {
            self.align_layer(dag, graph, layer, &mut left, Direction::Incoming);
        }
        for layer in layers.iter().rev().skip(1) {
            self.align_layer(dag, graph, layer, &mut left, Direction::Outgoing);
        }

        let min_x = left.iter().copied().fold(f64::INFINITY, f64::min);
        left.iter().map(|x| x - min_x + self.margin).collect()
    }

    fn align_layer(
        &self,
        dag: &DiGraph<(), ()>,
        graph: &RankGraph,
        layer: &[usize],
        left: &mut [f64],
        dir: Direction,
    ) {
        let mut prev_right = f64::NEG_INFINITY;
        for &v in layer {
            let width = graph.nodes[v].width;
            let centers: Vec<f64> = dag
                .neighbors_directed(NodeIndex::new(v), dir)
                .map(|u| left[u.index()] + graph.nodes[u.index()].width / 2.0)
                .collect();
            let desired = if centers.is_empty() {
                left[v]
            } else {
                centers.iter().sum::<f64>() / centers.len() as f64 - width / 2.0
            };
            let x = desired.max(prev_right + self.node_gap_x);
            left[v] = x;
            prev_right = x + width;
        }
    }

    fn assign_y(&self, graph: &RankGraph, layers: &[Vec<usize>]) -> Vec<f64> {
        let mut ys = vec![0.0; graph.nodes.len()];
        let mut y = self.margin;
        for layer in layers {
            let height = layer
                .iter()
                .map(|&v| graph.nodes[v].height + graph.nodes[v].descent.max(0.0))
                .fold(0.0, f64::max);
            for &v in layer {
                ys[v] = y;
            }
            y += height + self.rank_gap;
        }
        ys
    }
}

fn build_dag(graph: &RankGraph) -> DiGraph<(), ()> {
    let n = graph.nodes.len();
    let mut dag = DiGraph::with_capacity(n, graph.edges.len());
    for _ in 0..n {
        dag.add_node(());
    }

    let unique: BTreeSet<(usize, usize)> = graph
        .edges
        .iter()
        .copied()
        .filter(|&(from, to)| from != to && from < n && to < n)
        .collect();
    for (from, to) in unique {
        dag.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
    }
    dag
}

/// Layers in ascending rank order, nodes in input order; plus node -> layer.
fn assign_layers(graph: &RankGraph) -> (Vec<Vec<usize>>, Vec<usize>) {
    let mut by_rank: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, node) in graph.nodes.iter().enumerate() {
        by_rank.entry(node.rank).or_default().push(i);
    }

    let layers: Vec<Vec<usize>> = by_rank.into_values().collect();
    let mut layer_of = vec![0; graph.nodes.len()];
    for (l, layer) in layers.iter().enumerate() {
        for &v in layer {
            layer_of[v] = l;
        }
    }
    (layers, layer_of)
}

fn positions(layers: &[Vec<usize>], node_count: usize) -> Vec<usize> {
    let mut pos = vec![0; node_count];
    for layer in layers {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }
    pos
}

fn order_layers(dag: &DiGraph<(), ()>, layers: &mut [Vec<usize>], layer_of: &[usize], sweeps: usize) {
    let mut best = layers.to_vec();
    let mut best_crossings = count_crossings(dag, layers, layer_of);

    for _ in 0..sweeps {
        if best_crossings == 0 {
            break;
        }
        for l in 1..layers.len() {
            reorder(dag, layers, l, Direction::Incoming);
        }
        for l in (0..layers.len().saturating_sub(1)).rev() {
            reorder(dag, layers, l, Direction::Outgoing);
        }

        let crossings = count_crossings(dag, layers, layer_of);
        if crossings < best_crossings {
            best = layers.to_vec();
            best_crossings = crossings;
        }
    }

    layers.clone_from_slice(&best);
}

/// Sort one layer by the mean position of its neighbors in `dir`.
/// Nodes without neighbors keep their slot; ties keep current order.
fn reorder(dag: &DiGraph<(), ()>, layers: &mut [Vec<usize>], l: usize, dir: Direction) {
    let pos = positions(layers, dag.node_count());
    let mut keyed: Vec<(f64, usize, usize)> = layers[l]
        .iter()
        .map(|&v| {
            let neighbors: Vec<f64> = dag
                .neighbors_directed(NodeIndex::new(v), dir)
                .map(|u| pos[u.index()] as f64)
                .collect();
            let barycenter = if neighbors.is_empty() {
                pos[v] as f64
            } else {
                neighbors.iter().sum::<f64>() / neighbors.len() as f64
            };
            (barycenter, pos[v], v)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    layers[l] = keyed.into_iter().map(|(_, _, v)| v).collect();
}

/// Crossings between adjacent layers only.
fn count_crossings(dag: &DiGraph<(), ()>, layers: &[Vec<usize>], layer_of: &[usize]) -> usize {
    let pos = positions(layers, dag.node_count());
    let mut total = 0;

    for l in 0..layers.len().saturating_sub(1) {
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for &u in &layers[l] {
            for v in dag.neighbors_directed(NodeIndex::new(u), Direction::Outgoing) {
                if layer_of[v.index()] == l + 1 {
                    segments.push((pos[u], pos[v.index()]));
                }
            }
        }

        for (i, &(a1, b1)) in segments.iter().enumerate() {
            for &(a2, b2) in &segments[i + 1..] {
                if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
                    total += 1;
                }
            }
        }
    }

    total
}

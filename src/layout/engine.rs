//! Layout engine core implementation.

use crate::graph::FamilyGraph;
use crate::grouping::{Grouping, group};
use crate::measure::TextMetrics;
use crate::model::Member;
use crate::sequence::order_graph;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use super::couple::{split_unit, unit_width};
use super::edges::build_edges;
use super::layered::{HierarchicalLayout, LayeredLayout, RankGraph, RankNode, UnitBox};
use super::staircase::staircase_offsets;
use super::types::{FamilyLayout, LayoutNode, NodeData, RenderContext};

/// Layout engine configuration and computation.
pub struct LayoutEngine<L: HierarchicalLayout = LayeredLayout> {
    pub metrics: TextMetrics,
    /// Horizontal gap between the two cards of a couple.
    pub spouse_gap: f64,
    /// How far the left partner of a couple is raised above the right one.
    pub senior_lift: f64,
    /// Vertical step between siblings sharing a row.
    pub staircase_step: f64,
    /// Space kept around the drawing when computing canvas size.
    pub margin: f64,
    pub solver: L,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
            spouse_gap: 20.0,
            senior_lift: 10.0,
            staircase_step: 30.0,
            margin: 40.0,
            solver: LayeredLayout::default(),
        }
    }
}

impl<L: HierarchicalLayout> LayoutEngine<L> {
    /// Swap the rank solver, keeping couple and staircase settings.
    pub fn with_solver<M: HierarchicalLayout>(self, solver: M) -> LayoutEngine<M> {
        LayoutEngine {
            metrics: self.metrics,
            spouse_gap: self.spouse_gap,
            senior_lift: self.senior_lift,
            staircase_step: self.staircase_step,
            margin: self.margin,
            solver,
        }
    }

    /// Compute layout for the given members.
    pub fn layout(&self, members: &[Member]) -> FamilyLayout {
        self.layout_with(members, &RenderContext::default())
    }

    /// Compute layout, copying `ctx` into every node's payload.
    pub fn layout_with<H: Clone>(&self, members: &[Member], ctx: &RenderContext<H>) -> FamilyLayout<H> {
        let graph = FamilyGraph::new(members);
        if graph.is_empty() {
            return FamilyLayout {
                nodes: Vec::new(),
                edges: Vec::new(),
                width: 0.0,
                height: 0.0,
            };
        }

        // Phase 1: canonical order and couple units
        let ordered = order_graph(&graph);
        let grouping = group(&ordered, &graph);

        // Phase 2: staircase offsets for siblings sharing a rank
        let ranks: Vec<i64> = grouping
            .groups
            .iter()
            .map(|unit| i64::from(unit.generation()))
            .collect();
        let offsets = staircase_offsets(&graph, &grouping, &ranks, self.staircase_step);

        // Phase 3: unit rank graph, reserving room for the stairs
        let (card_width, card_height) = self.card_size(&graph);
        let rank_graph = self.rank_graph(&graph, &grouping, &ranks, &offsets, card_width, card_height);

        // Phase 4: generic rank layout
        let boxes = self.arrange_units(&rank_graph);

        // Phase 5: per-member positions
        let mut nodes = Vec::with_capacity(graph.len());
        for (idx, unit) in grouping.groups.iter().enumerate() {
            let slots = split_unit(unit, boxes[idx], card_width, self.spouse_gap, self.senior_lift);
            for (&member, slot) in unit.members.iter().zip(slots) {
                nodes.push(LayoutNode {
                    member_id: slot.member_id,
                    group_id: unit.id.clone(),
                    x: slot.x,
                    y: slot.y + offsets[idx],
                    width: card_width,
                    height: card_height,
                    data: node_data(member, ctx),
                });
            }
        }

        // Phase 6: connections
        let edges = build_edges(&graph);

        let width = nodes.iter().map(|n| n.x + n.width).fold(0.0, f64::max) + self.margin;
        let height = nodes.iter().map(|n| n.y + n.height).fold(0.0, f64::max) + self.margin;

        debug!(
            members = nodes.len(),
            units = grouping.groups.len(),
            edges = edges.len(),
            "family layout computed"
        );

        FamilyLayout {
            nodes,
            edges,
            width,
            height,
        }
    }

    /// Uniform card size fitting every member's name and life span.
    fn card_size(&self, graph: &FamilyGraph) -> (f64, f64) {
        graph
            .members()
            .iter()
            .map(|m| self.metrics.card_size(&m.name, m.life_span().as_deref()))
            .fold((0.0, 0.0), |(w, h), (mw, mh)| (f64::max(w, mw), f64::max(h, mh)))
    }

    /// One node per unit at its rank; an edge wherever a member of the lower
    /// unit has a parent in the upper one. A unit's stair offset becomes its
    /// descent so the next rank clears it.
    fn rank_graph(
        &self,
        graph: &FamilyGraph,
        grouping: &Grouping,
        ranks: &[i64],
        offsets: &[f64],
        card_width: f64,
        card_height: f64,
    ) -> RankGraph {
        let nodes = grouping
            .groups
            .iter()
            .enumerate()
            .map(|(idx, unit)| RankNode {
                id: unit.id.clone(),
                rank: ranks[idx],
                width: unit_width(unit.members.len(), card_width, self.spouse_gap),
                height: card_height,
                descent: offsets[idx],
            })
            .collect();

        let mut edges = BTreeSet::new();
        for (child_unit, unit) in grouping.groups.iter().enumerate() {
            for &member in &unit.members {
                for parent in graph.parents(member) {
                    match grouping.group_of(&parent.id) {
                        Some(parent_unit) if parent_unit != child_unit => {
                            edges.insert((parent_unit, child_unit));
                        }
                        _ => {}
                    }
                }
            }
        }

        RankGraph {
            nodes,
            edges: edges.into_iter().collect(),
        }
    }

    fn arrange_units(&self, rank_graph: &RankGraph) -> Vec<UnitBox> {
        let mut boxes = self.solver.arrange(rank_graph);
        if boxes.len() != rank_graph.nodes.len() {
            warn!(
                expected = rank_graph.nodes.len(),
                got = boxes.len(),
                "rank solver returned wrong number of boxes"
            );
            boxes.resize(
                rank_graph.nodes.len(),
                UnitBox {
                    x: self.margin,
                    y: self.margin,
                    width: 0.0,
                    height: 0.0,
                },
            );
        }
        boxes
    }
}

fn node_data<H: Clone>(member: &Member, ctx: &RenderContext<H>) -> NodeData<H> {
    NodeData {
        name: member.name.clone(),
        gender: member.gender,
        generation: member.generation,
        life_span: member.life_span(),
        deceased: member.is_deceased(),
        dark_mode: ctx.dark_mode,
        on_select: ctx.on_select.clone(),
    }
}

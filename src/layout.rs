//! Family tree layout: couple units ranked by generation, laid out by a
//! generic layered solver, then split into member cards and staircased.

mod couple;
mod edges;
mod engine;
mod layered;
mod staircase;
mod types;

pub use couple::{MemberSlot, split_unit, unit_width};
pub use edges::build_edges;
pub use engine::LayoutEngine;
pub use layered::{HierarchicalLayout, LayeredLayout, RankGraph, RankNode, UnitBox};
pub use staircase::staircase_offsets;
pub use types::{EdgeKind, FamilyLayout, LayoutEdge, LayoutNode, NodeData, RenderContext};

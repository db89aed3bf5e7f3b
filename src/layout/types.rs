//! Data structures for layout output.

use crate::model::Gender;
use serde::{Deserialize, Serialize};

/// Presentation metadata threaded into every node's payload.
///
/// `on_select` is an opaque click-target handle; the engine only clones it
/// into node data and never calls it.
#[derive(Debug, Clone, Default)]
pub struct RenderContext<H = ()> {
    pub dark_mode: bool,
    pub on_select: Option<H>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData<H = ()> {
    pub name: String,
    pub gender: Gender,
    pub generation: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_span: Option<String>,
    pub deceased: bool,
    pub dark_mode: bool,
    #[serde(skip)]
    pub on_select: Option<H>,
}

/// A positioned member card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = ""))]
pub struct LayoutNode<H = ()> {
    pub member_id: String,
    /// Couple or single unit the member was laid out in.
    pub group_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub data: NodeData<H>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    #[serde(rename = "father-link")]
    Father,
    /// Drawn only when the child has no father link.
    #[serde(rename = "mother-link")]
    Mother,
    #[serde(rename = "spouse-link")]
    Spouse,
}

impl EdgeKind {
    pub fn prefix(self) -> &'static str {
        match self {
            EdgeKind::Father => "father",
            EdgeKind::Mother => "mother",
            EdgeKind::Spouse => "spouse",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

/// The complete layout result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = ""))]
pub struct FamilyLayout<H = ()> {
    pub nodes: Vec<LayoutNode<H>>,
    pub edges: Vec<LayoutEdge>,
    pub width: f64,
    pub height: f64,
}

impl<H> FamilyLayout<H> {
    pub fn node(&self, member_id: &str) -> Option<&LayoutNode<H>> {
        self.nodes.iter().find(|n| n.member_id == member_id)
    }
}

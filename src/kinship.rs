//! Kinship labels between a viewer and a target member.
//!
//! Classification is driven by direct links and the stated generation
//! delta, not by true graph distance. A member whose stated generation
//! disagrees with their parent chain can therefore be mislabeled; the raw
//! connectivity in [`path`] is only used to enrich the fallback description.

pub mod path;
pub mod vocabulary;

use crate::graph::FamilyGraph;
use crate::model::{Gender, Member};
use serde::{Deserialize, Serialize};

pub use path::{FamilyNetwork, find_path};
pub use vocabulary::{English, Korean, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Paternal,
    Maternal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Kinship {
    Myself,
    Spouse { gender: Gender },
    Father,
    Mother,
    Child { gender: Gender },
    Sibling { gender: Gender },
    Grandparent { side: Side, gender: Gender },
    Grandchild { gender: Gender },
    /// Uncle or aunt.
    ParentSibling { side: Side, gender: Gender },
    /// Three or more generations up.
    Ancestor { generations: u32, gender: Gender },
    /// Three or more generations down.
    Descendant { generations: u32, gender: Gender },
    /// Nothing more specific; `delta` is target minus viewer generation.
    Lineage { delta: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationResult {
    pub kinship: Kinship,
    pub label: String,
    pub description: String,
}

/// Classify `target` relative to `viewer`. First matching rule wins.
pub fn classify(viewer: &Member, target: &Member, graph: &FamilyGraph) -> Kinship {
    if viewer.id == target.id {
        return Kinship::Myself;
    }

    let gender = target.gender;
    if links_to(&viewer.spouse_id, target) && links_to(&target.spouse_id, viewer) {
        return Kinship::Spouse { gender };
    }
    if links_to(&viewer.father_id, target) {
        return Kinship::Father;
    }
    if links_to(&viewer.mother_id, target) {
        return Kinship::Mother;
    }
    if links_to(&target.father_id, viewer) || links_to(&target.mother_id, viewer) {
        return Kinship::Child { gender };
    }

    let delta = i64::from(target.generation) - i64::from(viewer.generation);
    if delta == 0 && shares_parent(viewer, target) {
        return Kinship::Sibling { gender };
    }

    match delta {
        -2 => Kinship::Grandparent {
            side: grandparent_side(viewer, target, graph),
            gender,
        },
        2 => Kinship::Grandchild { gender },
        -1 => Kinship::ParentSibling {
            side: parent_sibling_side(viewer, target, graph),
            gender,
        },
        d if d <= -3 => Kinship::Ancestor {
            generations: generations(d),
            gender,
        },
        d if d >= 3 => Kinship::Descendant {
            generations: generations(d),
            gender,
        },
        d => Kinship::Lineage { delta: d },
    }
}

fn links_to(link: &Option<String>, member: &Member) -> bool {
    link.as_deref() == Some(member.id.as_str())
}

fn shares_parent(a: &Member, b: &Member) -> bool {
    (a.father_id.is_some() && a.father_id == b.father_id)
        || (a.mother_id.is_some() && a.mother_id == b.mother_id)
}

fn generations(delta: i64) -> u32 {
    u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX)
}

/// Paternal when the target is a parent of the viewer's father.
fn grandparent_side(viewer: &Member, target: &Member, graph: &FamilyGraph) -> Side {
    match graph.father(viewer) {
        Some(father) if links_to(&father.father_id, target) || links_to(&father.mother_id, target) => {
            Side::Paternal
        }
        _ => Side::Maternal,
    }
}

/// Paternal when the target is a sibling of the viewer's father.
fn parent_sibling_side(viewer: &Member, target: &Member, graph: &FamilyGraph) -> Side {
    match graph.father(viewer) {
        Some(father) if father.id != target.id && shares_parent(father, target) => Side::Paternal,
        _ => Side::Maternal,
    }
}

pub struct KinshipResolver<V: Vocabulary = English> {
    vocabulary: V,
}

impl Default for KinshipResolver {
    fn default() -> Self {
        Self::new(English)
    }
}

impl<V: Vocabulary> KinshipResolver<V> {
    pub fn new(vocabulary: V) -> Self {
        Self { vocabulary }
    }

    pub fn relate(&self, viewer: &Member, target: &Member, members: &[Member]) -> RelationResult {
        self.relate_in(viewer, target, &FamilyGraph::new(members))
    }

    /// Same as [`relate`](Self::relate) over an already built graph.
    pub fn relate_in(&self, viewer: &Member, target: &Member, graph: &FamilyGraph) -> RelationResult {
        let kinship = classify(viewer, target, graph);
        let hops = match kinship {
            Kinship::Lineage { .. } => {
                find_path(graph, &viewer.id, &target.id).map(|path| path.len().saturating_sub(1))
            }
            _ => None,
        };

        RelationResult {
            kinship,
            label: self.vocabulary.label(&kinship),
            description: self.vocabulary.describe(&kinship, viewer, target, hops),
        }
    }
}

/// Relationship of `target` as seen from `viewer`, in English.
pub fn relate(viewer: &Member, target: &Member, members: &[Member]) -> RelationResult {
    KinshipResolver::default().relate(viewer, target, members)
}

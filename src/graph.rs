//! In-memory member graph: id index plus derived parent/child/spouse adjacency.

use crate::model::Member;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A malformed reference found in the member set.
///
/// None of these stop a layout; they are reported so callers can clean the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    DuplicateId { id: String },
    SelfReference { id: String },
    DanglingFather { id: String, father_id: String },
    DanglingMother { id: String, mother_id: String },
    DanglingSpouse { id: String, spouse_id: String },
    AsymmetricSpouse { id: String, spouse_id: String },
    GenerationGap { id: String, parent_id: String, expected: u32, actual: u32 },
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::DuplicateId { id } => write!(f, "{}: duplicate id, later entries ignored", id),
            Anomaly::SelfReference { id } => write!(f, "{}: references itself", id),
            Anomaly::DanglingFather { id, father_id } => {
                write!(f, "{}: father {} is not in the member set", id, father_id)
            }
            Anomaly::DanglingMother { id, mother_id } => {
                write!(f, "{}: mother {} is not in the member set", id, mother_id)
            }
            Anomaly::DanglingSpouse { id, spouse_id } => {
                write!(f, "{}: spouse {} is not in the member set", id, spouse_id)
            }
            Anomaly::AsymmetricSpouse { id, spouse_id } => {
                write!(f, "{}: spouse {} does not point back", id, spouse_id)
            }
            Anomaly::GenerationGap {
                id,
                parent_id,
                expected,
                actual,
            } => write!(
                f,
                "{}: generation {} but parent {} implies {}",
                id, actual, parent_id, expected
            ),
        }
    }
}

/// Read-only view over one member snapshot.
pub struct FamilyGraph<'a> {
    /// Unique members in input order.
    members: Vec<&'a Member>,
    by_id: HashMap<&'a str, &'a Member>,
    /// Cohort parent id -> children in input order.
    children: HashMap<&'a str, Vec<&'a Member>>,
    duplicates: Vec<&'a str>,
}

impl<'a> FamilyGraph<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        let mut by_id: HashMap<&str, &Member> = HashMap::with_capacity(members.len());
        let mut unique = Vec::with_capacity(members.len());
        let mut duplicates = Vec::new();

        for member in members {
            if by_id.contains_key(member.id.as_str()) {
                warn!(member_id = %member.id, "duplicate member id, keeping first occurrence");
                duplicates.push(member.id.as_str());
                continue;
            }
            by_id.insert(member.id.as_str(), member);
            unique.push(member);
        }

        let mut graph = Self {
            members: unique,
            by_id,
            children: HashMap::new(),
            duplicates,
        };

        let mut children: HashMap<&'a str, Vec<&'a Member>> = HashMap::new();
        for &member in &graph.members {
            if let Some(parent) = graph.cohort_parent(member) {
                children.entry(parent.id.as_str()).or_default().push(member);
            }
        }
        graph.children = children;
        graph
    }

    pub fn members(&self) -> &[&'a Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'a Member> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    fn resolve(&self, member: &Member, link: Option<&str>) -> Option<&'a Member> {
        link.filter(|&id| id != member.id).and_then(|id| self.get(id))
    }

    pub fn father(&self, member: &Member) -> Option<&'a Member> {
        self.resolve(member, member.father_id.as_deref())
    }

    pub fn mother(&self, member: &Member) -> Option<&'a Member> {
        self.resolve(member, member.mother_id.as_deref())
    }

    /// Resolved spouse; dangling and self links resolve to None.
    pub fn spouse(&self, member: &Member) -> Option<&'a Member> {
        self.resolve(member, member.spouse_id.as_deref())
    }

    pub fn parents(&self, member: &Member) -> impl Iterator<Item = &'a Member> {
        self.father(member).into_iter().chain(self.mother(member))
    }

    /// The parent whose children cohort this member belongs to: the father
    /// when he resolves, otherwise the mother.
    pub fn cohort_parent(&self, member: &Member) -> Option<&'a Member> {
        self.father(member).or_else(|| self.mother(member))
    }

    /// Children cohort keyed by `id`, in input order.
    pub fn children_of(&self, id: &str) -> &[&'a Member] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn anomalies(&self) -> Vec<Anomaly> {
        let mut found: Vec<Anomaly> = self
            .duplicates
            .iter()
            .map(|id| Anomaly::DuplicateId { id: id.to_string() })
            .collect();

        for &member in &self.members {
            let id = member.id.clone();
            let links = [
                member.father_id.as_deref(),
                member.mother_id.as_deref(),
                member.spouse_id.as_deref(),
            ];
            if links.iter().flatten().any(|&link| link == member.id) {
                found.push(Anomaly::SelfReference { id: id.clone() });
            }

            if let Some(father_id) = member.father_id.as_deref() {
                if father_id != member.id && !self.contains(father_id) {
                    found.push(Anomaly::DanglingFather {
                        id: id.clone(),
                        father_id: father_id.to_string(),
                    });
                }
            }
            if let Some(mother_id) = member.mother_id.as_deref() {
                if mother_id != member.id && !self.contains(mother_id) {
                    found.push(Anomaly::DanglingMother {
                        id: id.clone(),
                        mother_id: mother_id.to_string(),
                    });
                }
            }
            if let Some(spouse_id) = member.spouse_id.as_deref() {
                match self.spouse(member) {
                    Some(spouse) if spouse.spouse_id.as_deref() != Some(member.id.as_str()) => {
                        found.push(Anomaly::AsymmetricSpouse {
                            id: id.clone(),
                            spouse_id: spouse_id.to_string(),
                        });
                    }
                    None if spouse_id != member.id => {
                        found.push(Anomaly::DanglingSpouse {
                            id: id.clone(),
                            spouse_id: spouse_id.to_string(),
                        });
                    }
                    _ => {}
                }
            }

            for parent in self.parents(member) {
                // Nothing can follow the last generation, so no gap to report.
                let Some(expected) = parent.generation.checked_add(1) else {
                    continue;
                };
                if member.generation != expected {
                    found.push(Anomaly::GenerationGap {
                        id: id.clone(),
                        parent_id: parent.id.clone(),
                        expected,
                        actual: member.generation,
                    });
                }
            }
        }

        if !found.is_empty() {
            debug!(count = found.len(), "member set has malformed references");
        }
        found
    }
}

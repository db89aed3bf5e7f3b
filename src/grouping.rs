//! Partition members into couple and single units, the nodes of the rank layout.

use crate::graph::FamilyGraph;
use crate::model::{Member, partner_order};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit<'a> {
    /// `couple-<left id>` or `single-<id>`.
    pub id: String,
    /// One member, or two partners with the left one first.
    pub members: Vec<&'a Member>,
}

impl<'a> Unit<'a> {
    fn couple(left: &'a Member, right: &'a Member) -> Self {
        Self {
            id: format!("couple-{}", left.id),
            members: vec![left, right],
        }
    }

    fn single(member: &'a Member) -> Self {
        Self {
            id: format!("single-{}", member.id),
            members: vec![member],
        }
    }

    pub fn is_couple(&self) -> bool {
        self.members.len() == 2
    }

    /// Lowest stated generation among the unit's members.
    pub fn generation(&self) -> u32 {
        self.members.iter().map(|m| m.generation).min().unwrap_or(0)
    }
}

pub struct Grouping<'a> {
    pub groups: Vec<Unit<'a>>,
    /// Member id -> index into `groups`.
    pub member_to_group: HashMap<&'a str, usize>,
}

impl<'a> Grouping<'a> {
    pub fn group_of(&self, member_id: &str) -> Option<usize> {
        self.member_to_group.get(member_id).copied()
    }

    pub fn unit(&self, member_id: &str) -> Option<&Unit<'a>> {
        self.group_of(member_id).map(|idx| &self.groups[idx])
    }
}

/// Group members in the given order; a member consumed as someone's
/// spouse is never grouped again.
pub fn group<'a>(ordered: &[&'a Member], graph: &FamilyGraph<'a>) -> Grouping<'a> {
    let mut groups = Vec::new();
    let mut member_to_group = HashMap::with_capacity(ordered.len());
    let mut processed: HashSet<&str> = HashSet::with_capacity(ordered.len());

    for &member in ordered {
        if !processed.insert(member.id.as_str()) {
            continue;
        }

        let spouse = graph
            .spouse(member)
            .filter(|spouse| !processed.contains(spouse.id.as_str()));

        let unit = match spouse {
            Some(spouse) => {
                processed.insert(spouse.id.as_str());
                let (left, right) = partner_order(member, spouse);
                Unit::couple(left, right)
            }
            None => {
                if member.spouse_id.is_some() {
                    debug!(member_id = %member.id, "spouse unresolved or already paired, grouping as single");
                }
                Unit::single(member)
            }
        };

        for m in &unit.members {
            member_to_group.insert(m.id.as_str(), groups.len());
        }
        groups.push(unit);
    }

    Grouping {
        groups,
        member_to_group,
    }
}

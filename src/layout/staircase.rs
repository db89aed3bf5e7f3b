//! Staircase de-collision for sibling units sharing a row.

use crate::graph::FamilyGraph;
use crate::grouping::Grouping;
use crate::model::Member;
use crate::sequence::sibling_cmp;
use std::collections::BTreeMap;

/// Vertical offset per unit, indexed like `grouping.groups` and `ranks`.
///
/// Siblings (units whose lineage member shares a parent unit) on the same
/// rank are pushed down `step * i` in sibling order. The offset applies to
/// the whole unit, so a married sibling moves with their spouse. Offsets are
/// computed before any coordinates exist so the solver can reserve room for
/// them below each rank.
pub fn staircase_offsets(
    graph: &FamilyGraph,
    grouping: &Grouping,
    ranks: &[i64],
    step: f64,
) -> Vec<f64> {
    let mut offsets = vec![0.0; grouping.groups.len()];

    // Parent unit -> (lineage member, child unit)
    let mut cohorts: BTreeMap<usize, Vec<(&Member, usize)>> = BTreeMap::new();
    for (idx, unit) in grouping.groups.iter().enumerate() {
        let lineage = unit.members.iter().find_map(|&member| {
            graph
                .cohort_parent(member)
                .and_then(|parent| grouping.group_of(&parent.id))
                .filter(|&parent_unit| parent_unit != idx)
                .map(|parent_unit| (member, parent_unit))
        });
        if let Some((member, parent_unit)) = lineage {
            cohorts.entry(parent_unit).or_default().push((member, idx));
        }
    }

    for siblings in cohorts.values_mut() {
        siblings.sort_by(|a, b| sibling_cmp(a.0, b.0));

        let mut rows: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for &(_, unit) in siblings.iter() {
            rows.entry(ranks[unit]).or_default().push(unit);
        }

        for units in rows.into_values() {
            if units.len() < 2 {
                continue;
            }
            for (i, unit) in units.into_iter().enumerate() {
                offsets[unit] = i as f64 * step;
            }
        }
    }

    offsets
}

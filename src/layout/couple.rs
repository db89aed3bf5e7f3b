//! Split unit boxes into per-member card slots.

use crate::grouping::Unit;

use super::layered::UnitBox;

#[derive(Debug, Clone, PartialEq)]
pub struct MemberSlot {
    pub member_id: String,
    pub x: f64,
    pub y: f64,
}

/// Width of a unit holding `members` cards of `card_width`.
pub fn unit_width(members: usize, card_width: f64, spouse_gap: f64) -> f64 {
    if members >= 2 {
        card_width * 2.0 + spouse_gap
    } else {
        card_width
    }
}

/// Card slots for a unit, left partner first.
///
/// In a couple the left (senior) partner sits `senior_lift` above the other.
pub fn split_unit(
    unit: &Unit,
    bx: UnitBox,
    card_width: f64,
    spouse_gap: f64,
    senior_lift: f64,
) -> Vec<MemberSlot> {
    match unit.members.as_slice() {
        [left, right] => vec![
            MemberSlot {
                member_id: left.id.clone(),
                x: bx.x,
                y: bx.y - senior_lift,
            },
            MemberSlot {
                member_id: right.id.clone(),
                x: bx.x + card_width + spouse_gap,
                y: bx.y,
            },
        ],
        members => members
            .iter()
            .map(|m| MemberSlot {
                member_id: m.id.clone(),
                x: bx.x + (bx.width - card_width) / 2.0,
                y: bx.y,
            })
            .collect(),
    }
}

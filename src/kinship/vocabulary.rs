//! Language-specific kinship words.

use crate::model::{Gender, Member};

use super::{Kinship, Side};

pub trait Vocabulary {
    fn label(&self, kinship: &Kinship) -> String;

    /// Human-readable justification. `hops` is the path length for
    /// [`Kinship::Lineage`], `None` when no connection is recorded.
    fn describe(&self, kinship: &Kinship, viewer: &Member, target: &Member, hops: Option<usize>) -> String;
}

fn gendered(gender: Gender, male: &str, female: &str) -> String {
    match gender {
        Gender::Male => male.to_string(),
        Gender::Female => female.to_string(),
    }
}

pub struct English;

/// Beyond this many "great-" prefixes the count is written as a number.
const MAX_SPELLED_GREATS: u32 = 3;

impl Vocabulary for English {
    fn label(&self, kinship: &Kinship) -> String {
        match *kinship {
            Kinship::Myself => "self".to_string(),
            Kinship::Spouse { gender } => gendered(gender, "husband", "wife"),
            Kinship::Father => "father".to_string(),
            Kinship::Mother => "mother".to_string(),
            Kinship::Child { gender } => gendered(gender, "son", "daughter"),
            Kinship::Sibling { gender } => gendered(gender, "brother", "sister"),
            Kinship::Grandparent { side, gender } => format!(
                "{} {}",
                english_side(side),
                gendered(gender, "grandfather", "grandmother")
            ),
            Kinship::Grandchild { gender } => gendered(gender, "grandson", "granddaughter"),
            Kinship::ParentSibling { side, gender } => {
                format!("{} {}", english_side(side), gendered(gender, "uncle", "aunt"))
            }
            Kinship::Ancestor { generations, gender } => {
                let greats = generations.saturating_sub(2);
                let title = gendered(gender, "grandfather", "grandmother");
                if greats <= MAX_SPELLED_GREATS {
                    format!("{}{}", "great-".repeat(greats as usize), title)
                } else {
                    format!("{}x-great-{}", greats, title)
                }
            }
            Kinship::Descendant { generations: 3, gender } => {
                gendered(gender, "great-grandson", "great-granddaughter")
            }
            Kinship::Descendant { generations, .. } => {
                format!("descendant, {} generations below", generations)
            }
            Kinship::Lineage { .. } => "relative".to_string(),
        }
    }

    fn describe(&self, kinship: &Kinship, viewer: &Member, target: &Member, hops: Option<usize>) -> String {
        match *kinship {
            Kinship::Myself => String::new(),
            Kinship::Lineage { delta } => {
                let connection = match hops {
                    Some(1) => "1 link away".to_string(),
                    Some(n) => format!("{} links away", n),
                    None => "no recorded connection".to_string(),
                };
                format!(
                    "{} shares {}'s lineage, {:+} generations apart ({})",
                    target.name, viewer.name, delta, connection
                )
            }
            _ => format!("{} is {}'s {}", target.name, viewer.name, self.label(kinship)),
        }
    }
}

fn english_side(side: Side) -> &'static str {
    match side {
        Side::Paternal => "paternal",
        Side::Maternal => "maternal",
    }
}

pub struct Korean;

impl Vocabulary for Korean {
    fn label(&self, kinship: &Kinship) -> String {
        match *kinship {
            Kinship::Myself => "본인".to_string(),
            Kinship::Spouse { gender } => gendered(gender, "남편", "아내"),
            Kinship::Father => "아버지".to_string(),
            Kinship::Mother => "어머니".to_string(),
            Kinship::Child { gender } => gendered(gender, "아들", "딸"),
            Kinship::Sibling { gender } => gendered(gender, "형제", "자매"),
            Kinship::Grandparent {
                side: Side::Paternal,
                gender,
            } => gendered(gender, "할아버지", "할머니"),
            Kinship::Grandparent {
                side: Side::Maternal,
                gender,
            } => gendered(gender, "외할아버지", "외할머니"),
            Kinship::Grandchild { gender } => gendered(gender, "손자", "손녀"),
            Kinship::ParentSibling {
                side: Side::Paternal,
                gender,
            } => gendered(gender, "삼촌", "고모"),
            Kinship::ParentSibling {
                side: Side::Maternal,
                gender,
            } => gendered(gender, "외삼촌", "이모"),
            Kinship::Ancestor {
                generations: 3,
                gender,
            } => gendered(gender, "증조할아버지", "증조할머니"),
            Kinship::Ancestor {
                generations: 4,
                gender,
            } => gendered(gender, "고조할아버지", "고조할머니"),
            Kinship::Ancestor { generations, .. } => format!("{}대 조상", generations),
            Kinship::Descendant {
                generations: 3,
                gender,
            } => gendered(gender, "증손자", "증손녀"),
            Kinship::Descendant { generations, .. } => format!("{}대손", generations),
            Kinship::Lineage { .. } => "혈족".to_string(),
        }
    }

    fn describe(&self, kinship: &Kinship, viewer: &Member, target: &Member, hops: Option<usize>) -> String {
        match *kinship {
            Kinship::Myself => String::new(),
            Kinship::Lineage { delta } => {
                let connection = match hops {
                    Some(n) => format!("{}단계 연결", n),
                    None => "연결 기록 없음".to_string(),
                };
                format!(
                    "{}님은 {}님과 같은 혈족입니다 (세대 차이 {:+}, {})",
                    target.name, viewer.name, delta, connection
                )
            }
            _ => format!("{}님은 {}님의 {}입니다", target.name, viewer.name, self.label(kinship)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_ancestor_titles_scale() {
        let label = |generations| {
            English.label(&Kinship::Ancestor {
                generations,
                gender: Gender::Female,
            })
        };
        assert_eq!(label(3), "great-grandmother");
        assert_eq!(label(4), "great-great-grandmother");
        assert_eq!(label(5), "great-great-great-grandmother");
        assert_eq!(label(6), "4x-great-grandmother");
    }

    #[test]
    fn test_english_remote_ancestor_label_stays_short() {
        let kinship = Kinship::Ancestor {
            generations: u32::MAX,
            gender: Gender::Male,
        };
        assert_eq!(English.label(&kinship), format!("{}x-great-grandfather", u32::MAX - 2));

        let viewer = Member::new("v", "Viewer", Gender::Male, u32::MAX);
        let target = Member::new("t", "Root", Gender::Male, 1);
        let text = English.describe(&kinship, &viewer, &target, None);
        assert!(text.len() < 100);
    }

    #[test]
    fn test_english_descendant_three_vs_more() {
        let three = English.label(&Kinship::Descendant {
            generations: 3,
            gender: Gender::Male,
        });
        let four = English.label(&Kinship::Descendant {
            generations: 4,
            gender: Gender::Male,
        });
        assert_eq!(three, "great-grandson");
        assert_eq!(four, "descendant, 4 generations below");
    }

    #[test]
    fn test_korean_generation_titles() {
        assert_eq!(
            Korean.label(&Kinship::Ancestor {
                generations: 4,
                gender: Gender::Male
            }),
            "고조할아버지"
        );
        assert_eq!(
            Korean.label(&Kinship::Ancestor {
                generations: 6,
                gender: Gender::Male
            }),
            "6대 조상"
        );
        assert_eq!(
            Korean.label(&Kinship::Descendant {
                generations: 3,
                gender: Gender::Female
            }),
            "증손녀"
        );
        assert_eq!(
            Korean.label(&Kinship::Descendant {
                generations: 5,
                gender: Gender::Female
            }),
            "5대손"
        );
    }

    #[test]
    fn test_descriptions() {
        let viewer = Member::new("a", "Ann", Gender::Female, 2);
        let target = Member::new("b", "Bob", Gender::Male, 1);

        assert_eq!(
            English.describe(&Kinship::Father, &viewer, &target, None),
            "Bob is Ann's father"
        );
        assert_eq!(
            Korean.describe(&Kinship::Father, &viewer, &target, None),
            "Bob님은 Ann님의 아버지입니다"
        );
        assert_eq!(
            English.describe(&Kinship::Lineage { delta: -1 }, &viewer, &target, Some(1)),
            "Bob shares Ann's lineage, -1 generations apart (1 link away)"
        );
    }
}

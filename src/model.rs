use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A person in the family record, as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    /// Cohort number; 1 is the root ancestral generation.
    pub generation: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<String>,
}

impl Member {
    pub fn new(id: &str, name: &str, gender: Gender, generation: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            gender,
            generation,
            birth_date: None,
            death_date: None,
            father_id: None,
            mother_id: None,
            spouse_id: None,
        }
    }

    pub fn with_father(mut self, id: &str) -> Self {
        self.father_id = Some(id.to_string());
        self
    }

    pub fn with_mother(mut self, id: &str) -> Self {
        self.mother_id = Some(id.to_string());
        self
    }

    pub fn with_spouse(mut self, id: &str) -> Self {
        self.spouse_id = Some(id.to_string());
        self
    }

    pub fn born(mut self, date: &str) -> Self {
        self.birth_date = Some(date.to_string());
        self
    }

    pub fn died(mut self, date: &str) -> Self {
        self.death_date = Some(date.to_string());
        self
    }

    /// Leading year of the birth date, if it starts with digits.
    pub fn birth_year(&self) -> Option<i32> {
        self.birth_date.as_deref().and_then(leading_year)
    }

    pub fn death_year(&self) -> Option<i32> {
        self.death_date.as_deref().and_then(leading_year)
    }

    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some()
    }

    /// "1920 - 1987", "1950 -", "- 1987" or None when neither year is known.
    pub fn life_span(&self) -> Option<String> {
        match (self.birth_year(), self.death_year()) {
            (None, None) if self.is_deceased() => Some("- ?".to_string()),
            (None, None) => None,
            (Some(b), None) if self.is_deceased() => Some(format!("{} - ?", b)),
            (Some(b), None) => Some(format!("{} -", b)),
            (None, Some(d)) => Some(format!("- {}", d)),
            (Some(b), Some(d)) => Some(format!("{} - {}", b, d)),
        }
    }

    pub fn has_parent_link(&self) -> bool {
        self.father_id.is_some() || self.mother_id.is_some()
    }
}

fn leading_year(date: &str) -> Option<i32> {
    let digits: String = date
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(9)
        .collect();
    digits.parse().ok()
}

/// Orders two partners as (left, right).
///
/// The male partner sits on the left when genders differ; otherwise the
/// smaller id does, so the pairing never flips between runs.
pub fn partner_order<'a>(a: &'a Member, b: &'a Member) -> (&'a Member, &'a Member) {
    match (a.gender, b.gender) {
        (Gender::Female, Gender::Male) => (b, a),
        (Gender::Male, Gender::Female) => (a, b),
        _ if b.id < a.id => (b, a),
        _ => (a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_year_iso() {
        let m = Member::new("a", "A", Gender::Male, 1).born("1950-03-02");
        assert_eq!(m.birth_year(), Some(1950));
    }

    #[test]
    fn test_birth_year_unparseable() {
        let m = Member::new("a", "A", Gender::Male, 1).born("unknown");
        assert_eq!(m.birth_year(), None);
        let m = Member::new("a", "A", Gender::Male, 1);
        assert_eq!(m.birth_year(), None);
    }

    #[test]
    fn test_life_span() {
        let m = Member::new("a", "A", Gender::Male, 1)
            .born("1920-01-01")
            .died("1987");
        assert_eq!(m.life_span().as_deref(), Some("1920 - 1987"));
        let m = Member::new("b", "B", Gender::Female, 1).died("");
        assert_eq!(m.life_span().as_deref(), Some("- ?"));
        assert!(Member::new("c", "C", Gender::Male, 1).life_span().is_none());
    }

    #[test]
    fn test_partner_order_by_gender() {
        let wife = Member::new("a", "A", Gender::Female, 1);
        let husband = Member::new("z", "Z", Gender::Male, 1);
        let (left, right) = partner_order(&wife, &husband);
        assert_eq!(left.id, "z");
        assert_eq!(right.id, "a");
    }

    #[test]
    fn test_partner_order_same_gender_by_id() {
        let a = Member::new("b", "B", Gender::Female, 1);
        let b = Member::new("a", "A", Gender::Female, 1);
        assert_eq!(partner_order(&a, &b).0.id, "a");
        assert_eq!(partner_order(&b, &a).0.id, "a");
    }

    #[test]
    fn test_member_json_field_names() {
        let json = r#"{"id":"1","name":"Kim","gender":"male","generation":2,"fatherId":"0","birthDate":"1960"}"#;
        let m: Member = serde_json::from_str(json).unwrap();
        assert_eq!(m.father_id.as_deref(), Some("0"));
        assert_eq!(m.birth_year(), Some(1960));
        assert!(m.spouse_id.is_none());
    }
}

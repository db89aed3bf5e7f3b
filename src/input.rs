//! Member JSON boundary: the only place the crate reports errors.

use crate::model::Member;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid member JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Member #{0} has an empty id")]
    EmptyId(usize),
    #[error("Member {0:?} has an empty name")]
    EmptyName(String),
    #[error("Member {0:?} has generation 0, generations start at 1")]
    ZeroGeneration(String),
    #[error("Duplicate member id {0:?}")]
    DuplicateId(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<Member>),
    Wrapped { members: Vec<Member> },
}

/// Parse a JSON array of members, or an object with a `members` array.
pub fn parse_members(json: &str) -> Result<Vec<Member>, LoadError> {
    let members = match serde_json::from_str::<Document>(json)? {
        Document::List(members) => members,
        Document::Wrapped { members } => members,
    };
    validate(&members)?;
    Ok(members)
}

fn validate(members: &[Member]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(members.len());
    for (idx, member) in members.iter().enumerate() {
        if member.id.trim().is_empty() {
            return Err(LoadError::EmptyId(idx));
        }
        if member.name.trim().is_empty() {
            return Err(LoadError::EmptyName(member.id.clone()));
        }
        if member.generation == 0 {
            return Err(LoadError::ZeroGeneration(member.id.clone()));
        }
        if !seen.insert(member.id.as_str()) {
            return Err(LoadError::DuplicateId(member.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;

    #[test]
    fn test_parse_array() {
        let json = r#"[
            {"id": "1", "name": "김철수", "gender": "male", "generation": 1, "spouseId": "2"},
            {"id": "2", "name": "이영희", "gender": "female", "generation": 1, "spouseId": "1"}
        ]"#;
        let members = parse_members(json).unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[1].gender, Gender::Female);
        assert_eq!(members[0].spouse_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_wrapped() {
        let json = r#"{"members": [{"id": "1", "name": "A", "gender": "male", "generation": 1}]}"#;
        assert_eq!(parse_members(json).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_demo_family() {
        let members = parse_members(include_str!("../demos/kim_family.json")).unwrap();
        assert_eq!(members.len(), 12);
        assert!(members[0].is_deceased());
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_members("[]").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_members("[{").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let json = r#"[{"id": "1", "name": "A", "gender": "other", "generation": 1}]"#;
        assert!(matches!(parse_members(json), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_duplicate_id() {
        let json = r#"[
            {"id": "1", "name": "A", "gender": "male", "generation": 1},
            {"id": "1", "name": "B", "gender": "male", "generation": 1}
        ]"#;
        let err = parse_members(json).unwrap_err();
        assert_eq!(err.to_string(), r#"Duplicate member id "1""#);
    }

    #[test]
    fn test_empty_name_and_zero_generation() {
        let json = r#"[{"id": "1", "name": " ", "gender": "male", "generation": 1}]"#;
        assert!(matches!(parse_members(json), Err(LoadError::EmptyName(_))));

        let json = r#"[{"id": "1", "name": "A", "gender": "male", "generation": 0}]"#;
        assert!(matches!(parse_members(json), Err(LoadError::ZeroGeneration(_))));
    }
}

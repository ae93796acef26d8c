//! Subjects used to attribute study time.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{PersistenceAdapter, SUBJECTS_KEY};

/// Name recorded when a session's subject cannot be resolved.
pub const GENERAL_SUBJECT_NAME: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    /// Unique among subjects, ignoring case.
    pub name: String,
    pub color: String,
}

/// Name of the subject with `id`, or `"General"` when there is none.
pub fn resolve_subject_name<'a>(subjects: &'a [Subject], id: &str) -> &'a str {
    subjects
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name.as_str())
        .unwrap_or(GENERAL_SUBJECT_NAME)
}

pub fn list_subjects<S: PersistenceAdapter>(store: &S) -> Result<Vec<Subject>> {
    Ok(store.load_list(SUBJECTS_KEY)?)
}

/// Add a subject and write the updated list back.
///
/// # Errors
/// Fails on an empty name, on a name already used by another subject
/// (compared case-insensitively), or when the store fails.
pub fn add_subject<S: PersistenceAdapter>(store: &S, name: &str, color: &str) -> Result<Subject> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".into(),
            message: "subject name must not be empty".into(),
        }
        .into());
    }

    let mut subjects: Vec<Subject> = store.load_list(SUBJECTS_KEY)?;
    let lowered = name.to_lowercase();
    if subjects.iter().any(|s| s.name.to_lowercase() == lowered) {
        return Err(ValidationError::DuplicateSubject(name.to_string()).into());
    }

    let subject = Subject {
        id: store.generate_id(),
        name: name.to_string(),
        color: color.to_string(),
    };
    subjects.push(subject.clone());
    store.save_list(SUBJECTS_KEY, &subjects)?;
    tracing::debug!(id = %subject.id, name = %subject.name, "subject added");
    Ok(subject)
}

/// Remove the subject with `id`. Returns whether anything was removed.
///
/// Sessions already recorded keep the subject name they were written with.
pub fn remove_subject<S: PersistenceAdapter>(store: &S, id: &str) -> Result<bool> {
    let mut subjects: Vec<Subject> = store.load_list(SUBJECTS_KEY)?;
    let before = subjects.len();
    subjects.retain(|s| s.id != id);
    if subjects.len() == before {
        return Ok(false);
    }
    store.save_list(SUBJECTS_KEY, &subjects)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::MemoryStore;

    #[test]
    fn add_and_list_preserves_order() {
        let store = MemoryStore::new();
        add_subject(&store, "Math", "#f00").unwrap();
        add_subject(&store, "  Physics ", "#0f0").unwrap();
        let names: Vec<String> = list_subjects(&store)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Math", "Physics"]);
    }

    #[test]
    fn duplicate_names_rejected_ignoring_case() {
        let store = MemoryStore::new();
        add_subject(&store, "Math", "#f00").unwrap();
        let err = add_subject(&store, "mATH", "#00f").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DuplicateSubject(_))
        ));
        assert_eq!(list_subjects(&store).unwrap().len(), 1);
    }

    #[test]
    fn blank_name_rejected() {
        let store = MemoryStore::new();
        assert!(add_subject(&store, "   ", "#f00").is_err());
    }

    #[test]
    fn remove_reports_whether_found() {
        let store = MemoryStore::new();
        let math = add_subject(&store, "Math", "#f00").unwrap();
        assert!(remove_subject(&store, &math.id).unwrap());
        assert!(!remove_subject(&store, &math.id).unwrap());
        assert!(list_subjects(&store).unwrap().is_empty());
    }

    #[test]
    fn unresolved_subject_falls_back_to_general() {
        let subjects = vec![Subject {
            id: "s1".into(),
            name: "History".into(),
            color: "#000".into(),
        }];
        assert_eq!(resolve_subject_name(&subjects, "s1"), "History");
        assert_eq!(resolve_subject_name(&subjects, "gone"), "General");
        assert_eq!(resolve_subject_name(&[], "general"), "General");
    }
}

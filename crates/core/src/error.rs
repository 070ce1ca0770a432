use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more input fields violated their rules. Every failing field
    /// is listed, not just the first.
    #[error("Validation failed for fields: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    InvalidFields(FieldErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = CoreError::NotFound {
            entity: "Ticket",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: Ticket with id 7");
    }

    #[test]
    fn display_invalid_fields_lists_field_names() {
        let mut fields = FieldErrors::new();
        fields.insert("title".into(), vec!["too short".into()]);
        fields.insert("description".into(), vec!["missing".into()]);
        let err = CoreError::InvalidFields(fields);
        assert_eq!(
            err.to_string(),
            "Validation failed for fields: description, title"
        );
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{entity} not found: {key}")]
    MissingReference { entity: &'static str, key: String },
}

impl SeedError {
    pub fn missing(entity: &'static str, key: impl ToString) -> Self {
        Self::MissingReference { entity, key: key.to_string() }
    }

    /// Storage failures end the run; everything else only skips the current item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

pub type SeedResult<T> = Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_errors_are_fatal() {
        assert!(SeedError::Storage(sea_orm::DbErr::Custom("disk full".into())).is_fatal());
        assert!(!SeedError::Validation("rating out of range".into()).is_fatal());
        assert!(!SeedError::missing("genre", 42).is_fatal());
    }

    #[test]
    fn missing_reference_names_entity_and_key() {
        let err = SeedError::missing("user", "nobody@example.com");
        assert_eq!(err.to_string(), "user not found: nobody@example.com");
    }
}

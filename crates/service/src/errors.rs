use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Lift model-level validation failures into `Validation`, keep the rest as-is.
    pub fn from_model(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => Self::Validation(msg),
            other => Self::Model(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use models::errors::ModelError;

    #[test]
    fn not_found_message() {
        assert_eq!(ServiceError::not_found("article").to_string(), "not found: article not found");
    }

    #[test]
    fn model_validation_becomes_validation() {
        let e = ServiceError::from_model(ModelError::Validation("title must not be empty".into()));
        assert!(matches!(e, ServiceError::Validation(ref m) if m == "title must not be empty"));
        let e = ServiceError::from_model(ModelError::Db("boom".into()));
        assert!(matches!(e, ServiceError::Model(ModelError::Db(_))));
    }
}

use thiserror::Error;

/// Errors surfaced by the extract/transform/load stages.
///
/// Per-cell coercion failures never reach this type; they degrade to
/// null and are resolved by the missing-value policy. Only structural
/// problems (missing mandatory columns, a whole column violating its
/// type contract, unreadable source, failed writes) abort a run.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("coercion failed in stage {stage} for field {field}: {reason}")]
    Coercion {
        stage: String,
        field: String,
        reason: String,
    },
    #[error("load failed: {0}")]
    Load(String),
    #[error("dataframe error: {0}")]
    Frame(#[from] polars::error::PolarsError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EtlError {
    /// Build a coercion error naming the failing stage and field.
    pub fn coercion(
        stage: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            stage: stage.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_error_names_stage_and_field() {
        let error = EtlError::coercion("coerce", "bank_loans", "no parseable values");
        assert_eq!(
            error.to_string(),
            "coercion failed in stage coerce for field bank_loans: no parseable values"
        );
    }
}

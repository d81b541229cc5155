//! Per-run pipeline configuration.

/// How the `sex` field token substitution is applied.
///
/// The upstream system replaced `MALE` and then `FEMALE` as substrings
/// of the upper-cased value, which turns `FEMALE` into `FEM` before the
/// second pattern can match. [`SexMappingMode::Substring`] reproduces
/// that behavior for output parity; [`SexMappingMode::Exact`] applies
/// the mapping only to exact tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SexMappingMode {
    #[default]
    Substring,
    Exact,
}

/// Options for one pipeline run.
///
/// Constructed by the caller and handed to the orchestrator; nothing
/// here is process-wide state.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub sex_mapping: SexMappingMode,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sex_mapping(mut self, mode: SexMappingMode) -> Self {
        self.sex_mapping = mode;
        self
    }
}

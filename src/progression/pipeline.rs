//! Load -> validate -> transform, memoised per source path

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{ProfileDocument, ProgressionModel, transform};
use crate::error::PipelineError;
use crate::schema::{SchemaValidator, read_document};

/// One-shot batch transform with a per-path cache.
///
/// Failures are surfaced to the caller; nothing is cached for a failed path.
#[derive(Debug, Default)]
pub struct ProgressionPipeline {
    validator: SchemaValidator,
    cache: HashMap<PathBuf, Rc<ProgressionModel>>,
}

impl ProgressionPipeline {
    pub fn new(validator: SchemaValidator) -> Self {
        Self {
            validator,
            cache: HashMap::new(),
        }
    }

    /// Pipeline validating against the schema file at `schema_path`, if any
    pub fn with_schema_file(schema_path: Option<&Path>) -> Self {
        Self::new(SchemaValidator::from_optional_file(schema_path))
    }

    /// Load, validate and transform the profile at `path`.
    ///
    /// A second call with the same path returns the cached model without
    /// touching the file again.
    pub fn load_and_transform(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Rc<ProgressionModel>, PipelineError> {
        let path = path.as_ref();
        if let Some(model) = self.cache.get(path) {
            log::debug!("Using cached progression for {}", path.display());
            return Ok(Rc::clone(model));
        }

        let raw = read_document(path)?;

        let violations = self.validator.validate(&raw);
        if !violations.is_empty() {
            return Err(PipelineError::Validation {
                path: path.to_path_buf(),
                violations,
            });
        }

        let doc: ProfileDocument =
            serde_json::from_value(raw).map_err(|source| PipelineError::Shape {
                path: path.to_path_buf(),
                source,
            })?;

        let model = Rc::new(transform(&doc));
        log::info!(
            "Loaded profile {} (level {}, {} achievements)",
            path.display(),
            model.player.current_level,
            model.achievements.len()
        );
        self.cache.insert(path.to_path_buf(), Rc::clone(&model));
        Ok(model)
    }

    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        self.cache.contains_key(path.as_ref())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = include_str!("../../data/resume.json");

    fn schema_validator() -> SchemaValidator {
        let schema = serde_json::from_str(include_str!("../../schemas/portfolio_schema.json"))
            .unwrap();
        SchemaValidator::from_value(&schema)
    }

    #[test]
    fn test_sample_profile_transforms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        fs::write(&path, SAMPLE).unwrap();

        let mut pipeline = ProgressionPipeline::new(schema_validator());
        let model = pipeline.load_and_transform(&path).unwrap();

        assert_eq!(model.player.name, "Jordan Reyes");
        assert_eq!(model.player.avatar, crate::progression::Avatar::Analyst);
        assert_eq!(model.skill_categories[0].name, "Business Analysis");
        assert_eq!(model.experience[0].level_requirement, 15);
        assert_eq!(model.experience[1].level_requirement, 5);
        let names: Vec<&str> = model.achievements.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Story Master", "Squad Leader"]);
    }

    #[test]
    fn test_second_call_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        fs::write(&path, SAMPLE).unwrap();

        let mut pipeline = ProgressionPipeline::default();
        let first = pipeline.load_and_transform(&path).unwrap();
        fs::remove_file(&path).unwrap();
        let second = pipeline.load_and_transform(&path).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert!(pipeline.is_cached(&path));

        pipeline.clear_cache();
        assert!(matches!(
            pipeline.load_and_transform(&path),
            Err(PipelineError::DataNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_profile_fails_loud() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        fs::write(&path, "{\n  \"skills\": {\n    \"a\": [\"x\",]\n  }\n}").unwrap();

        let mut pipeline = ProgressionPipeline::default();
        let err = pipeline.load_and_transform(&path).unwrap_err();
        match &err {
            PipelineError::Malformed { line, .. } => assert_eq!(*line, 3),
            other => panic!("expected Malformed, got {other:?}"),
        }
        assert!(!pipeline.is_cached(&path));
    }

    #[test]
    fn test_schema_violations_are_aggregated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        fs::write(
            &path,
            r#"{"skills": {"a": [1, 2]}, "professional_experience": [{"role": "x"}]}"#,
        )
        .unwrap();

        let mut pipeline = ProgressionPipeline::new(schema_validator());
        match pipeline.load_and_transform(&path) {
            Err(PipelineError::Validation { violations, .. }) => {
                assert_eq!(violations.len(), 3, "{violations:?}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_schema_means_no_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        fs::write(&path, r#"{"certifications": ["PMP"]}"#).unwrap();

        let mut pipeline =
            ProgressionPipeline::with_schema_file(Some(&dir.path().join("missing_schema.json")));
        let model = pipeline.load_and_transform(&path).unwrap();
        assert_eq!(model.player.current_level, 3);
    }

    #[test]
    fn test_wrong_shape_without_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        fs::write(&path, r#"{"certifications": "PMP"}"#).unwrap();

        let mut pipeline = ProgressionPipeline::default();
        assert!(matches!(
            pipeline.load_and_transform(&path),
            Err(PipelineError::Shape { .. })
        ));
    }
}

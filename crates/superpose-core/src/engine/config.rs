use crate::core::io::source::{InputSource, SourceError};
use crate::core::utils::geometry::{RigidTransform, TransformSpecError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Output file is not provided")]
    OutputPathMissing,
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Transform(#[from] TransformSpecError),
}

/// One of the two inputs of a superposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// An input together with the model and chain to take from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSelection {
    pub source: InputSource,
    /// `None` selects the first chain of the chosen model.
    pub chain: Option<String>,
    /// `None` (or a serial no model carries) selects the first model.
    pub model: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuperposeConfig {
    /// Present only when the first chain is part of the output.
    pub first: Option<InputSelection>,
    pub second: InputSelection,
    pub transform: Option<RigidTransform>,
    pub transform_second: bool,
    pub output: PathBuf,
}

impl SuperposeConfig {
    /// The side the transform is applied to, if any.
    ///
    /// The second chain when `transform_second` is set, otherwise the first
    /// chain provided it is written out.
    pub fn transform_side(&self) -> Option<Side> {
        self.transform.as_ref()?;
        if self.transform_second {
            Some(Side::Second)
        } else if self.first.is_some() {
            Some(Side::First)
        } else {
            None
        }
    }
}

#[derive(Default)]
pub struct SuperposeConfigBuilder {
    first_input: Option<String>,
    first_chain: Option<String>,
    first_model: Option<i32>,
    second_input: Option<String>,
    second_chain: Option<String>,
    second_model: Option<i32>,
    save_first: bool,
    transform_second: bool,
    rotation: Option<Vec<f64>>,
    translation: Option<Vec<f64>>,
    output: Option<PathBuf>,
}

impl SuperposeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_input(mut self, address: impl Into<String>) -> Self {
        self.first_input = Some(address.into());
        self
    }

    pub fn first_chain(mut self, chain: impl Into<String>) -> Self {
        self.first_chain = Some(chain.into());
        self
    }

    pub fn first_model(mut self, serial: i32) -> Self {
        self.first_model = Some(serial);
        self
    }

    pub fn second_input(mut self, address: impl Into<String>) -> Self {
        self.second_input = Some(address.into());
        self
    }

    pub fn second_chain(mut self, chain: impl Into<String>) -> Self {
        self.second_chain = Some(chain.into());
        self
    }

    pub fn second_model(mut self, serial: i32) -> Self {
        self.second_model = Some(serial);
        self
    }

    pub fn save_first(mut self, save: bool) -> Self {
        self.save_first = save;
        self
    }

    pub fn transform_second(mut self, second: bool) -> Self {
        self.transform_second = second;
        self
    }

    pub fn rotation(mut self, values: Vec<f64>) -> Self {
        self.rotation = Some(values);
        self
    }

    pub fn translation(mut self, values: Vec<f64>) -> Self {
        self.translation = Some(values);
        self
    }

    pub fn output(mut self, path: PathBuf) -> Self {
        self.output = Some(path);
        self
    }

    /// Validates every argument before any structure is read.
    ///
    /// Checks run in a fixed order and the first failure is returned: first
    /// input (only when saved), second input, output path, rotation arity,
    /// translation arity, rotation/translation pairing.
    pub fn build(self) -> Result<SuperposeConfig, ConfigError> {
        let first = if self.save_first {
            Some(resolve_selection(
                self.first_input,
                self.first_chain,
                self.first_model,
            )?)
        } else {
            None
        };
        let second =
            resolve_selection(self.second_input, self.second_chain, self.second_model)?;
        let output = self
            .output
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::OutputPathMissing)?;
        let transform =
            RigidTransform::from_components(self.rotation.as_deref(), self.translation.as_deref())?;

        Ok(SuperposeConfig {
            first,
            second,
            transform,
            transform_second: self.transform_second,
            output,
        })
    }
}

fn resolve_selection(
    address: Option<String>,
    chain: Option<String>,
    model: Option<i32>,
) -> Result<InputSelection, ConfigError> {
    // An absent address is an input that cannot be found.
    let address = address
        .filter(|a| !a.is_empty())
        .ok_or_else(|| SourceError::InputNotFound(PathBuf::new()))?;
    let source = InputSource::parse(&address)?;
    source.ensure_exists()?;
    Ok(InputSelection {
        source,
        chain: chain.filter(|c| !c.is_empty()),
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::TransformComponent;
    use tempfile::TempDir;

    struct TestSetup {
        _dir: TempDir,
        first: String,
        second: String,
        output: PathBuf,
    }

    fn setup() -> TestSetup {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let first = dir.path().join("first.pdb");
        let second = dir.path().join("second.cif");
        std::fs::write(&first, "").unwrap();
        std::fs::write(&second, "").unwrap();
        TestSetup {
            output: dir.path().join("out.pdb"),
            first: first.to_string_lossy().into_owned(),
            second: second.to_string_lossy().into_owned(),
            _dir: dir,
        }
    }

    fn complete_builder(setup: &TestSetup) -> SuperposeConfigBuilder {
        SuperposeConfigBuilder::new()
            .first_input(setup.first.as_str())
            .second_input(setup.second.as_str())
            .output(setup.output.clone())
    }

    #[test]
    fn build_succeeds_with_minimal_parameters() {
        let setup = setup();
        let config = complete_builder(&setup).build().unwrap();

        assert!(config.first.is_none());
        assert_eq!(config.second.chain, None);
        assert_eq!(config.second.model, None);
        assert_eq!(config.transform, None);
        assert_eq!(config.transform_side(), None);
    }

    #[test]
    fn build_keeps_first_input_only_when_saved() {
        let setup = setup();
        let config = complete_builder(&setup)
            .save_first(true)
            .first_chain("A")
            .first_model(2)
            .build()
            .unwrap();

        let first = config.first.unwrap();
        assert_eq!(first.chain.as_deref(), Some("A"));
        assert_eq!(first.model, Some(2));
    }

    #[test]
    fn build_treats_empty_chain_as_unspecified() {
        let setup = setup();
        let config = complete_builder(&setup).second_chain("").build().unwrap();
        assert_eq!(config.second.chain, None);
    }

    #[test]
    fn build_fails_when_saved_first_input_is_missing() {
        let setup = setup();
        let result = SuperposeConfigBuilder::new()
            .save_first(true)
            .second_input(setup.second.as_str())
            .output(setup.output.clone())
            .build();
        match result {
            Err(ConfigError::Source(SourceError::InputNotFound(path))) => {
                assert!(path.as_os_str().is_empty())
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn build_reports_empty_second_input_as_not_found() {
        let setup = setup();
        let result = SuperposeConfigBuilder::new()
            .second_input("")
            .output(setup.output.clone())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Source(SourceError::InputNotFound(_)))
        ));
    }

    #[test]
    fn build_ignores_unsaved_first_input() {
        let setup = setup();
        let config = complete_builder(&setup)
            .first_input("/definitely/not/here.pdb")
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn build_fails_when_second_input_does_not_exist() {
        let setup = setup();
        let result = complete_builder(&setup)
            .second_input("/definitely/not/here.pdb")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Source(SourceError::InputNotFound(_)))
        ));
    }

    #[test]
    fn build_rejects_tar_without_member() {
        let setup = setup();
        let result = complete_builder(&setup).second_input("foo.tar").build();
        assert!(matches!(
            result,
            Err(ConfigError::Source(SourceError::ArchiveMemberMissing { member: None, .. }))
        ));
    }

    #[test]
    fn build_checks_inputs_before_output() {
        let setup = setup();
        let result = SuperposeConfigBuilder::new()
            .second_input("/definitely/not/here.pdb")
            .build();
        assert!(matches!(result, Err(ConfigError::Source(_))));

        let result = SuperposeConfigBuilder::new()
            .second_input(setup.second.as_str())
            .build();
        assert!(matches!(result, Err(ConfigError::OutputPathMissing)));
    }

    #[test]
    fn build_rejects_short_rotation() {
        let setup = setup();
        let result = complete_builder(&setup)
            .rotation(vec![0.0; 8])
            .translation(vec![0.0; 3])
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Transform(TransformSpecError::MalformedArity {
                component: TransformComponent::Rotation,
                found: 8,
                ..
            }))
        ));
    }

    #[test]
    fn build_rejects_rotation_without_translation() {
        let setup = setup();
        let result = complete_builder(&setup).rotation(vec![0.0; 9]).build();
        assert!(matches!(
            result,
            Err(ConfigError::Transform(TransformSpecError::Incomplete {
                missing: TransformComponent::Translation
            }))
        ));
    }

    #[test]
    fn transform_side_follows_flags() {
        let setup = setup();
        let identity = vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let with_transform = || {
            complete_builder(&setup)
                .rotation(identity.clone())
                .translation(vec![1.0, 2.0, 3.0])
        };

        let second = with_transform().transform_second(true).build().unwrap();
        assert_eq!(second.transform_side(), Some(Side::Second));

        let first = with_transform().save_first(true).build().unwrap();
        assert_eq!(first.transform_side(), Some(Side::First));

        let nowhere = with_transform().build().unwrap();
        assert!(nowhere.transform.is_some());
        assert_eq!(nowhere.transform_side(), None);
    }
}

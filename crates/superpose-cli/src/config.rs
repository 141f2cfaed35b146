use crate::cli::SuperposeArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use superpose::engine::config as core_config;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialInputConfig {
    input: Option<String>,
    chain: Option<String>,
    model: Option<i32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTransformConfig {
    rotation: Option<Vec<f64>>,
    translation: Option<Vec<f64>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSuperposeConfig {
    output: Option<PathBuf>,
    #[serde(rename = "save-first")]
    save_first: Option<bool>,
    #[serde(rename = "transform-second")]
    transform_second: Option<bool>,
    first: Option<PartialInputConfig>,
    second: Option<PartialInputConfig>,
    transform: Option<PartialTransformConfig>,
}

impl PartialSuperposeConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or starts from an empty configuration.
    pub fn load(args: &SuperposeArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Overlays command-line values on the file values and validates the result.
    ///
    /// Flags given on the command line switch their setting on; they cannot
    /// switch off a setting enabled in the file.
    pub fn merge_with_cli(mut self, args: &SuperposeArgs) -> Result<core_config::SuperposeConfig> {
        let first = self.first.take().unwrap_or_default();
        let second = self.second.take().unwrap_or_default();
        let transform = self.transform.take().unwrap_or_default();

        let mut builder = core_config::SuperposeConfigBuilder::new()
            .save_first(args.save_first || self.save_first.unwrap_or(false))
            .transform_second(args.referenced || self.transform_second.unwrap_or(false));

        if let Some(input) = args.first_input.clone().or(first.input) {
            builder = builder.first_input(input);
        }
        if let Some(chain) = args.first_chain.clone().or(first.chain) {
            builder = builder.first_chain(chain);
        }
        if let Some(model) = args.first_model.or(first.model) {
            builder = builder.first_model(model);
        }
        if let Some(input) = args.second_input.clone().or(second.input) {
            builder = builder.second_input(input);
        }
        if let Some(chain) = args.second_chain.clone().or(second.chain) {
            builder = builder.second_chain(chain);
        }
        if let Some(model) = args.second_model.or(second.model) {
            builder = builder.second_model(model);
        }
        if let Some(rotation) = args.rotation.clone().or(transform.rotation) {
            builder = builder.rotation(rotation);
        }
        if let Some(translation) = args.translation.clone().or(transform.translation) {
            builder = builder.translation(translation);
        }
        if let Some(output) = args.output.clone().or(self.output.take()) {
            builder = builder.output(output);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use superpose::core::io::source::SourceError;
    use superpose::core::utils::geometry::TransformSpecError;
    use superpose::engine::config::{ConfigError, Side};
    use tempfile::TempDir;

    struct Workspace {
        dir: TempDir,
        first: String,
        second: String,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let first = dir.path().join("first.pdb");
            let second = dir.path().join("second.cif");
            fs::write(&first, "").unwrap();
            fs::write(&second, "").unwrap();
            Self {
                first: first.to_string_lossy().into_owned(),
                second: second.to_string_lossy().into_owned(),
                dir,
            }
        }

        fn config_file(&self, content: &str) -> PathBuf {
            let path = self.dir.path().join("superpose.toml");
            fs::write(&path, content).unwrap();
            path
        }
    }

    fn args_with_config(path: PathBuf) -> SuperposeArgs {
        SuperposeArgs {
            config: Some(path),
            ..Default::default()
        }
    }

    #[test]
    fn load_from_file_builds_complete_config() {
        let ws = Workspace::new();
        let path = ws.config_file(&format!(
            r#"
        output = "out.pdb"
        save-first = true

        [first]
        input = "{}"
        chain = "A"
        model = 3

        [second]
        input = "{}"
        chain = ""

        [transform]
        rotation = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        translation = [0.0, 0.0, 5.0]
        "#,
            ws.first, ws.second
        ));
        let args = args_with_config(path);

        let config = PartialSuperposeConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        let first = config.first.as_ref().unwrap();
        assert_eq!(first.chain.as_deref(), Some("A"));
        assert_eq!(first.model, Some(3));
        assert_eq!(config.second.chain, None);
        assert_eq!(config.output, PathBuf::from("out.pdb"));
        assert_eq!(config.transform_side(), Some(Side::First));
    }

    #[test]
    fn cli_args_override_file_values() {
        let ws = Workspace::new();
        let path = ws.config_file(&format!(
            r#"
        output = "from-file.pdb"

        [second]
        input = "{}"
        chain = "X"
        "#,
            ws.second
        ));
        let args = SuperposeArgs {
            second_chain: Some("Y".into()),
            output: Some(PathBuf::from("from-cli.pdb")),
            referenced: true,
            rotation: Some(vec![0.0; 9]),
            translation: Some(vec![0.0; 3]),
            ..args_with_config(path)
        };

        let config = PartialSuperposeConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.second.chain.as_deref(), Some("Y"));
        assert_eq!(config.output, PathBuf::from("from-cli.pdb"));
        assert_eq!(config.transform_side(), Some(Side::Second));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let ws = Workspace::new();
        let path = ws.config_file("[second]\nfile = \"x.pdb\"\n");
        assert!(matches!(
            PartialSuperposeConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let ws = Workspace::new();
        let args = args_with_config(ws.dir.path().join("absent.toml"));
        assert!(matches!(
            PartialSuperposeConfig::load(&args),
            Err(CliError::Io(_))
        ));
    }

    #[test]
    fn validation_errors_surface_unchanged() {
        let ws = Workspace::new();
        let args = SuperposeArgs {
            second_input: Some(ws.second.clone()),
            output: Some(PathBuf::from("out.pdb")),
            rotation: Some(vec![0.0; 9]),
            ..Default::default()
        };
        let err = PartialSuperposeConfig::default()
            .merge_with_cli(&args)
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::Transform(TransformSpecError::Incomplete { .. }))
        ));

        let args = SuperposeArgs {
            second_input: Some("archive.tar".into()),
            ..Default::default()
        };
        let err = PartialSuperposeConfig::default()
            .merge_with_cli(&args)
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::Source(SourceError::ArchiveMemberMissing { .. }))
        ));
    }
}

use clap::{Args, Parser};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Superpose two macromolecular chains and write them, renamed A and B, to one PDB file.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    #[command(flatten)]
    pub args: SuperposeArgs,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Inputs, selection, transform and output of one superposition.
#[derive(Args, Debug, Default)]
pub struct SuperposeArgs {
    // --- Inputs ---
    /// First input structure (PDB or mmCIF, optionally .gz, or ARCHIVE.tar:MEMBER).
    #[arg(long = "i1", visible_alias = "file1", value_name = "INPUT")]
    pub first_input: Option<String>,

    /// Second input structure; its header metadata is written to the output.
    #[arg(long = "i2", visible_alias = "file2", value_name = "INPUT")]
    pub second_input: Option<String>,

    // --- Selection ---
    /// Chain of the first structure (default: the first chain).
    #[arg(long = "c1", visible_alias = "chain1", value_name = "ID")]
    pub first_chain: Option<String>,

    /// Chain of the second structure (default: the first chain).
    #[arg(long = "c2", visible_alias = "chain2", value_name = "ID")]
    pub second_chain: Option<String>,

    /// Model serial of the first structure (default or unknown: the first model).
    #[arg(
        long = "m1",
        visible_alias = "model1",
        value_name = "SERIAL",
        allow_negative_numbers = true
    )]
    pub first_model: Option<i32>,

    /// Model serial of the second structure (default or unknown: the first model).
    #[arg(
        long = "m2",
        visible_alias = "model2",
        value_name = "SERIAL",
        allow_negative_numbers = true
    )]
    pub second_model: Option<i32>,

    // --- Transform ---
    /// Rotation matrix as 9 comma-separated values in row-major order.
    #[arg(
        short = 'r',
        long,
        value_name = "A0,..,A8",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub rotation: Option<Vec<f64>>,

    /// Translation vector as 3 comma-separated values.
    #[arg(
        short = 't',
        long,
        value_name = "X,Y,Z",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub translation: Option<Vec<f64>>,

    /// Apply the transform to the second structure instead of the first.
    #[arg(short = '2', long)]
    pub referenced: bool,

    // --- Output ---
    /// Write the first structure's chain too (as chain A).
    #[arg(short = 's', long = "save1")]
    pub save_first: bool,

    /// Output PDB file.
    #[arg(short = 'o', long = "outfile", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Optional TOML configuration file; command-line values take precedence.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_spellings() {
        let cli = Cli::try_parse_from([
            "superpose",
            "--i1",
            "a.pdb",
            "--file2",
            "b.cif",
            "--c1",
            "A",
            "--chain2",
            "B",
            "--m1",
            "2",
            "-s",
            "-2",
            "-o",
            "out.pdb",
        ])
        .unwrap();
        let args = cli.args;
        assert_eq!(args.first_input.as_deref(), Some("a.pdb"));
        assert_eq!(args.second_input.as_deref(), Some("b.cif"));
        assert_eq!(args.first_chain.as_deref(), Some("A"));
        assert_eq!(args.second_chain.as_deref(), Some("B"));
        assert_eq!(args.first_model, Some(2));
        assert_eq!(args.second_model, None);
        assert!(args.save_first);
        assert!(args.referenced);
        assert_eq!(args.output, Some(PathBuf::from("out.pdb")));
    }

    #[test]
    fn parses_comma_separated_transform() {
        let cli = Cli::try_parse_from([
            "superpose",
            "-r",
            "1,0,0,0,-1,0,0,0,-1",
            "-t",
            "-1.5,2,0.25",
        ])
        .unwrap();
        assert_eq!(
            cli.args.rotation,
            Some(vec![1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0])
        );
        assert_eq!(cli.args.translation, Some(vec![-1.5, 2.0, 0.25]));
    }

    #[test]
    fn verbosity_flags_count_and_conflict_with_quiet() {
        let cli = Cli::try_parse_from(["superpose", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(Cli::try_parse_from(["superpose", "-v", "-q"]).is_err());
    }
}

use crate::cli::SuperposeArgs;
use crate::config::PartialSuperposeConfig;
use crate::error::Result;
use superpose::engine::config::Side;
use superpose::workflows;
use superpose::workflows::superpose::SideSummary;
use tracing::info;

fn describe(side: &str, summary: &SideSummary) -> String {
    let model = summary
        .model
        .map_or_else(|| "-".to_string(), |serial| serial.to_string());
    format!(
        "{} {} ({}): chain {}, model {}, {} residues, {} atoms",
        side,
        summary.input,
        summary.format,
        summary.chain,
        model,
        summary.amino_acids,
        summary.atoms
    )
}

pub fn run(args: SuperposeArgs) -> Result<()> {
    let partial_config = PartialSuperposeConfig::load(&args)?;
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;

    info!("Invoking the core superposition workflow...");
    let summary = workflows::superpose::run(&final_config)?;

    if let Some(first) = &summary.first {
        info!("{}", describe("First:", first));
    }
    info!("{}", describe("Second:", &summary.second));
    match summary.transformed {
        Some(Side::First) => info!("Transform applied to the first chain."),
        Some(Side::Second) => info!("Transform applied to the second chain."),
        None => info!("No transform applied."),
    }
    info!("Output written to {}", summary.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PDB_TEXT: &str = "\
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C
ATOM      2  CA  GLY A   2       4.000   5.000   6.000  1.00  0.00           C
END
";

    #[test]
    fn run_writes_output_for_valid_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        fs::write(&input, PDB_TEXT).unwrap();
        let input = input.to_string_lossy().into_owned();

        let args = SuperposeArgs {
            first_input: Some(input.clone()),
            second_input: Some(input),
            save_first: true,
            output: Some(output.clone()),
            ..Default::default()
        };
        run(args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("HEADER"));
        assert_eq!(written.lines().filter(|l| l.starts_with("ATOM")).count(), 4);
    }

    #[test]
    fn run_reports_missing_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        fs::write(&input, PDB_TEXT).unwrap();

        let args = SuperposeArgs {
            second_input: Some(input.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let err = run(args).unwrap_err();
        assert_eq!(err.to_string(), "Output file is not provided");
    }

    #[test]
    fn describe_formats_one_side() {
        let summary = SideSummary {
            input: "a.pdb".into(),
            format: superpose::core::io::ladder::StructureFormat::Pdb,
            chain: "A".into(),
            model: Some(1),
            amino_acids: 10,
            atoms: 80,
        };
        assert_eq!(
            describe("First:", &summary),
            "First: a.pdb (PDB): chain A, model 1, 10 residues, 80 atoms"
        );
    }
}

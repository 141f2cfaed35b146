use crate::core::io::header::FixedWidthWriter;
use crate::core::io::ladder::{ParsedStructure, StructureFormat, read_structure};
use crate::core::io::pdb::PdbFile;
use crate::core::metadata::normalize::normalize;
use crate::core::models::chain::Chain;
use crate::engine::assembly::assemble;
use crate::engine::config::{InputSelection, Side, SuperposeConfig};
use crate::engine::error::EngineError;
use crate::engine::selection::{select_chain, selected_model_serial};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// What was taken from one input.
#[derive(Debug, Clone, PartialEq)]
pub struct SideSummary {
    pub input: String,
    pub format: StructureFormat,
    /// Chain id as found in the input, before renaming.
    pub chain: String,
    pub model: Option<i32>,
    pub amino_acids: usize,
    pub atoms: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuperposeSummary {
    pub first: Option<SideSummary>,
    pub second: SideSummary,
    pub transformed: Option<Side>,
    pub output: PathBuf,
}

struct SelectedInput {
    parsed: ParsedStructure,
    chain: Chain,
    summary: SideSummary,
}

fn load_side(selection: &InputSelection, side: &str) -> Result<SelectedInput, EngineError> {
    let parsed = read_structure(&selection.source)?;
    let chain = select_chain(
        &parsed.structure,
        selection.chain.as_deref(),
        selection.model,
    )?;
    let summary = SideSummary {
        input: selection.source.to_string(),
        format: parsed.format,
        chain: chain.id.clone(),
        model: selected_model_serial(&parsed.structure, selection.model),
        amino_acids: chain.amino_acid_count(),
        atoms: chain.atom_count(),
    };
    info!(
        "{} input {}: chain '{}' of model {:?} ({}, {} residues, {} atoms).",
        side,
        summary.input,
        summary.chain,
        summary.model,
        summary.format,
        summary.amino_acids,
        summary.atoms
    );
    Ok(SelectedInput {
        parsed,
        chain,
        summary,
    })
}

/// Writes the superposition of one or two chains to the configured output.
///
/// Both inputs are read and their chains selected before the output file is
/// created, so a failing run leaves no partial output behind. The header
/// metadata always comes from the second input.
///
/// # Errors
///
/// Returns [`EngineError`] when an input cannot be decoded, a chain cannot be
/// selected, or the output cannot be written.
#[instrument(skip_all, name = "superpose_workflow")]
pub fn run(config: &SuperposeConfig) -> Result<SuperposeSummary, EngineError> {
    let first = config
        .first
        .as_ref()
        .map(|selection| load_side(selection, "First"))
        .transpose()?;
    let second = load_side(&config.second, "Second")?;

    let mut first_chain = first.as_ref().map(|f| f.chain.clone());
    let mut second_chain = second.chain.clone();

    let transformed = config.transform_side();
    match (&config.transform, transformed) {
        (Some(transform), Some(Side::Second)) => {
            transform.apply(&mut second_chain);
            info!("Transformed the second chain.");
        }
        (Some(transform), Some(Side::First)) => {
            if let Some(chain) = first_chain.as_mut() {
                transform.apply(chain);
                info!("Transformed the first chain.");
            }
        }
        (Some(_), None) => {
            warn!("A transform was given but the first structure is not saved; it is ignored.");
        }
        (None, _) => {}
    }

    let structure = assemble(first_chain, second_chain);
    let fields = normalize(&second.parsed.metadata);

    let file = File::create(&config.output).map_err(|source| EngineError::OutputCreate {
        path: config.output.clone(),
        source,
    })?;
    let mut writer = FixedWidthWriter::new(BufWriter::new(file));
    writer.write::<PdbFile>(&fields, &structure)?;
    info!("Superposition written to {}.", config.output.display());

    Ok(SuperposeSummary {
        first: first.map(|f| f.summary),
        second: second.summary,
        transformed,
        output: config.output.clone(),
    })
}

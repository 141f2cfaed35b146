use super::raw::{MetadataKey, RawMetadata};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use MetadataKey::{Cif, PdbCompound, PdbCompoundLast, PdbField, PdbSource};

const CODE: &[MetadataKey] = &[PdbField("idcode"), Cif("_entry.id")];

const CLASSIFICATION: &[MetadataKey] = &[
    PdbField("head"),
    Cif("_struct_keywords.pdbx_keywords"),
];

const TITLE: &[MetadataKey] = &[
    PdbField("name"),
    Cif("_struct.title"),
    Cif("_entry.id"),
];

const COMPOUND: &[MetadataKey] = &[
    PdbCompound("molecule"),
    PdbCompoundLast("misc"),
    Cif("_entity.pdbx_description"),
];

const ORGANISM_SCIENTIFIC: &[MetadataKey] = &[
    PdbSource("organism_scientific"),
    Cif("_entity_src_nat.pdbx_organism_scientific"),
    Cif("_entity_src_gen.pdbx_gene_src_scientific_name"),
    Cif("_pdbx_entity_src_syn.organism_scientific"),
    Cif("_ma_target_ref_db_details.organism_scientific"),
];

const ORGANISM_COMMON: &[MetadataKey] = &[
    PdbSource("organism_common"),
    Cif("_entity_src_nat.common_name"),
    Cif("_entity_src_gen.gene_src_common_name"),
    Cif("_pdbx_entity_src_syn.organism_common_name"),
];

const TAXONOMY_ID: &[MetadataKey] = &[
    PdbSource("organism_taxid"),
    Cif("_entity_src_gen.pdbx_gene_src_ncbi_taxonomy_id"),
    Cif("_pdbx_entity_src_syn.ncbi_taxonomy_id"),
    Cif("_ma_target_ref_db_details.ncbi_taxonomy_id"),
];

const DEPOSITION_DATE: &[MetadataKey] = &[
    PdbField("deposition_date"),
    Cif("_database_PDB_rev.date_original"),
    Cif("_pdbx_database_status.recvd_initial_deposition_date"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Deposition date '{value}' is not in YYYY-MM-DD form")]
    DateUnparseable { value: String },
}

/// Descriptive fields shared by both source schemas, upper-cased and ready to
/// be laid out in fixed columns.
///
/// Every field is an empty string when no candidate produced a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub code: String,
    pub title: String,
    pub classification: String,
    pub compound: String,
    pub organism_scientific: String,
    pub organism_common: String,
    pub taxonomy_id: String,
    /// Rendered as `DD-MON-YY`.
    pub deposition_date: String,
}

/// Normalizes schema-specific metadata into [`HeaderFields`].
///
/// Each field walks its fixed candidate list and keeps the first present,
/// non-empty value. A deposition date that cannot be parsed degrades to an
/// empty field and is reported as a warning.
pub fn normalize(metadata: &RawMetadata) -> HeaderFields {
    let resolve = |candidates: &[MetadataKey]| {
        metadata
            .resolve(candidates)
            .map(|v| v.to_uppercase())
            .unwrap_or_default()
    };

    let deposition_date = match metadata.resolve(DEPOSITION_DATE) {
        Some(raw) => reformat_deposition_date(&raw).unwrap_or_else(|e| {
            warn!("{}; the header date is left empty.", e);
            String::new()
        }),
        None => String::new(),
    };

    let fields = HeaderFields {
        code: resolve(CODE),
        title: resolve(TITLE),
        classification: resolve(CLASSIFICATION),
        compound: resolve(COMPOUND),
        organism_scientific: resolve(ORGANISM_SCIENTIFIC),
        organism_common: resolve(ORGANISM_COMMON),
        taxonomy_id: resolve(TAXONOMY_ID),
        deposition_date,
    };
    debug!("Normalized header fields: {:?}", &fields);
    fields
}

/// Converts an ISO `YYYY-MM-DD` date into the legacy upper-cased `DD-MON-YY` form.
pub fn reformat_deposition_date(raw: &str) -> Result<String, MetadataError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%d-%b-%y").to_string().to_uppercase())
        .map_err(|_| MetadataError::DateUnparseable {
            value: raw.to_string(),
        })
}

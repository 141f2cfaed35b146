use std::collections::{BTreeMap, HashMap};

/// Descriptive header of a PDB-format file.
///
/// Scalar records (`idcode`, `head`, `name`, `deposition_date`) live in
/// `fields`; `COMPND` and `SOURCE` specifications are kept as one map per
/// `MOL_ID` entity, in file order, with lower-cased keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbHeader {
    pub fields: BTreeMap<String, String>,
    pub compound: Vec<BTreeMap<String, String>>,
    pub source: Vec<BTreeMap<String, String>>,
}

impl PdbHeader {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Flat mmCIF dictionary: data name to every value recorded for it, in order.
///
/// Data names are case-insensitive in CIF, so keys are stored lower-cased and
/// looked up the same way. Placeholder values `?` and `.` are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CifDictionary {
    block: Option<String>,
    items: HashMap<String, Vec<String>>,
}

impl CifDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self) -> Option<&str> {
        self.block.as_deref()
    }

    pub(crate) fn set_block(&mut self, name: &str) {
        if self.block.is_none() {
            self.block = Some(name.to_string());
        }
    }

    pub fn push(&mut self, key: &str, value: String) {
        self.items
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(value);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.items
            .get(&key.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(&key.to_ascii_lowercase())
    }

    /// Reports whether any data name of `category` (e.g. `_atom_site`) is present.
    pub fn has_category(&self, category: &str) -> bool {
        let prefix = format!("{}.", category.to_ascii_lowercase());
        self.items.keys().any(|key| key.starts_with(&prefix))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Returns `true` for the CIF placeholders meaning "not applicable" and "unknown".
pub fn is_cif_placeholder(value: &str) -> bool {
    matches!(value, "." | "?")
}

/// Schema-specific metadata as decoded by whichever reader succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMetadata {
    Pdb(PdbHeader),
    Cif(CifDictionary),
}

/// One candidate location of a descriptive field in one of the two schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey {
    /// Scalar PDB header field.
    PdbField(&'static str),
    /// Key of the first `COMPND` entity that carries it.
    PdbCompound(&'static str),
    /// Key of the last `COMPND` entity that carries it.
    PdbCompoundLast(&'static str),
    /// Key of the first `SOURCE` entity that carries it.
    PdbSource(&'static str),
    /// mmCIF data name; its first value is used.
    Cif(&'static str),
}

impl RawMetadata {
    /// Resolves a single candidate key.
    ///
    /// Returns `None` when the key belongs to the other schema, is absent, is
    /// blank, or is a CIF placeholder. Multi-line CIF text is folded onto one
    /// line.
    pub fn lookup(&self, key: MetadataKey) -> Option<String> {
        let value = match (self, key) {
            (RawMetadata::Pdb(header), MetadataKey::PdbField(name)) => {
                header.field(name).map(|v| v.trim().to_string())
            }
            (RawMetadata::Pdb(header), MetadataKey::PdbCompound(name)) => {
                first_entity_value(&header.compound, name)
            }
            (RawMetadata::Pdb(header), MetadataKey::PdbCompoundLast(name)) => {
                last_entity_value(&header.compound, name)
            }
            (RawMetadata::Pdb(header), MetadataKey::PdbSource(name)) => {
                first_entity_value(&header.source, name)
            }
            (RawMetadata::Cif(dict), MetadataKey::Cif(name)) => dict
                .first(name)
                .filter(|v| !is_cif_placeholder(v.trim()))
                .map(fold_whitespace),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Resolves an ordered candidate list: the first present, non-empty value wins.
    pub fn resolve(&self, candidates: &[MetadataKey]) -> Option<String> {
        candidates.iter().find_map(|&key| self.lookup(key))
    }
}

fn first_entity_value(entities: &[BTreeMap<String, String>], key: &str) -> Option<String> {
    entities
        .iter()
        .filter_map(|entity| entity.get(key))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

fn last_entity_value(entities: &[BTreeMap<String, String>], key: &str) -> Option<String> {
    entities
        .iter()
        .rev()
        .filter_map(|entity| entity.get(key))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

fn fold_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

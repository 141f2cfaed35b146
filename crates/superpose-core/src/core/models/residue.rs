use super::atom::Atom;
use phf::{Set, phf_set};

/// Three-letter codes recognised as amino acids, standard and common modified ones.
static AMINO_ACID_CODES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "SEC", "PYL", "ASX", "GLX", "XLE", "UNK",
    "MSE", "SEP", "TPO", "PTR", "HYP", "MLY", "CSO", "KCX", "LLP", "CME",
    "OCS", "CSD", "PCA", "M3L", "MLZ", "ALY", "CGU", "DAL", "DLE", "DVA",
    "HSD", "HSE", "HSP", "HID", "HIE", "HIP", "CYX", "ASH", "GLH", "LYN",
};

/// Distinguishes residues read from standard coordinate records from
/// heteroatom (non-standard, ligand or solvent) residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidueKind {
    /// Written as `ATOM` records.
    #[default]
    Standard,
    /// Written as `HETATM` records.
    Hetero,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub seq: isize,                   // Residue sequence number from source file
    pub insertion_code: Option<char>, // Insertion code, if any
    pub name: String,                 // Residue-type code (e.g., "ALA", "HOH")
    pub kind: ResidueKind,            // Standard or heteroatom residue
    pub(crate) atoms: Vec<Atom>,      // Atoms in file order, alternate locations included
}

impl Residue {
    pub fn new(seq: isize, insertion_code: Option<char>, name: &str, kind: ResidueKind) -> Self {
        Self {
            seq,
            insertion_code,
            name: name.to_string(),
            kind,
            atoms: Vec::new(),
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn is_hetero(&self) -> bool {
        self.kind == ResidueKind::Hetero
    }

    /// Reports whether the residue-type code names an amino acid, including
    /// common modified residues that are usually stored as heteroatoms.
    pub fn is_amino_acid(&self) -> bool {
        AMINO_ACID_CODES.contains(self.name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let residue = Residue::new(42, Some('A'), "GLY", ResidueKind::Standard);
        assert_eq!(residue.seq, 42);
        assert_eq!(residue.insertion_code, Some('A'));
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.kind, ResidueKind::Standard);
        assert!(residue.atoms().is_empty());
    }

    #[test]
    fn add_atom_keeps_file_order() {
        let mut residue = Residue::new(7, None, "SER", ResidueKind::Standard);
        residue.add_atom(Atom::new("CA", "C", Point3::origin()));
        residue.add_atom(Atom::new("CB", "C", Point3::origin()));
        let names: Vec<_> = residue.atoms().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["CA", "CB"]);
    }

    #[test]
    fn is_amino_acid_accepts_standard_and_modified_codes() {
        assert!(Residue::new(1, None, "ALA", ResidueKind::Standard).is_amino_acid());
        assert!(Residue::new(1, None, "MSE", ResidueKind::Hetero).is_amino_acid());
        assert!(!Residue::new(1, None, "HOH", ResidueKind::Hetero).is_amino_acid());
        assert!(!Residue::new(1, None, "DA", ResidueKind::Standard).is_amino_acid());
    }

    #[test]
    fn is_hetero_follows_kind() {
        assert!(Residue::new(1, None, "HEM", ResidueKind::Hetero).is_hetero());
        assert!(!Residue::new(1, None, "LYS", ResidueKind::Standard).is_hetero());
    }
}

use super::atom::Atom;
use super::residue::Residue;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: String,                    // Chain identifier (e.g., "A", or a multi-character mmCIF id)
    pub(crate) residues: Vec<Residue>, // Residues in file order
}

impl Chain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    pub fn add_residue(&mut self, residue: Residue) {
        self.residues.push(residue);
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.residues.iter().flat_map(|r| r.atoms.iter())
    }

    pub fn atoms_mut(&mut self) -> impl Iterator<Item = &mut Atom> {
        self.residues.iter_mut().flat_map(|r| r.atoms.iter_mut())
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atoms.len()).sum()
    }

    /// Number of residues whose type code names an amino acid.
    pub fn amino_acid_count(&self) -> usize {
        self.residues.iter().filter(|r| r.is_amino_acid()).count()
    }
}

use super::atom::Atom;
use super::chain::Chain;
use super::residue::{Residue, ResidueKind};
use super::structure::{ModelFrame, Structure};

/// Identifies the residue an atom record belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueSite<'a> {
    pub chain_id: &'a str,
    pub seq: isize,
    pub insertion_code: Option<char>,
    pub name: &'a str,
    pub kind: ResidueKind,
}

/// Incrementally assembles a [`Structure`] from atom records in file order.
///
/// Chains are found-or-created within the current frame, so a chain whose
/// records are interrupted by another chain keeps collecting atoms. A new
/// residue starts whenever the residue site differs from the chain's last one.
pub struct StructureBuilder {
    structure: Structure,

    // --- Builder-specific state for efficient construction ---
    current_frame_idx: Option<usize>,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            structure: Structure::new(),
            current_frame_idx: None,
        }
    }

    pub fn start_frame(&mut self, serial: i32) -> &mut Self {
        let frames = self.structure.frames_mut();
        frames.push(ModelFrame::new(serial));
        self.current_frame_idx = Some(frames.len() - 1);
        self
    }

    pub fn frame_count(&self) -> usize {
        self.structure.frames().len()
    }

    /// Closes the current frame; atoms that follow open an implicit frame.
    pub fn end_frame(&mut self) -> &mut Self {
        self.current_frame_idx = None;
        self
    }

    pub fn add_atom(&mut self, site: &ResidueSite<'_>, atom: Atom) -> &mut Self {
        let frame_idx = match self.current_frame_idx {
            Some(idx) => idx,
            None => {
                // Implicit frames take their position as serial.
                let serial = self.structure.frames().len() as i32;
                self.start_frame(serial);
                self.structure.frames().len() - 1
            }
        };
        let frame = &mut self.structure.frames_mut()[frame_idx];

        let chain_idx = match frame.chains.iter().position(|c| c.id == site.chain_id) {
            Some(idx) => idx,
            None => {
                frame.chains.push(Chain::new(site.chain_id));
                frame.chains.len() - 1
            }
        };
        let chain = &mut frame.chains[chain_idx];

        let continues_last = chain.residues.last().is_some_and(|r| {
            r.seq == site.seq
                && r.insertion_code == site.insertion_code
                && r.name == site.name
                && r.kind == site.kind
        });
        if !continues_last {
            chain.residues.push(Residue::new(
                site.seq,
                site.insertion_code,
                site.name,
                site.kind,
            ));
        }
        if let Some(residue) = chain.residues.last_mut() {
            residue.add_atom(atom);
        }
        self
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}

use super::chain::Chain;

/// One alternative conformation (model) of a structure with its own chains.
///
/// Chain identifiers are unique within a frame; the same identifier may
/// reappear in other frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFrame {
    /// The model serial number as recorded in the source file.
    pub serial: i32,
    pub(crate) chains: Vec<Chain>,
}

impl ModelFrame {
    pub fn new(serial: i32) -> Self {
        Self {
            serial,
            chains: Vec::new(),
        }
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Appends a chain, taking exclusive ownership of it.
    pub fn add_chain(&mut self, chain: Chain) {
        self.chains.push(chain);
    }

    pub fn find_chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }
}

/// Represents a parsed macromolecular structure as an ordered list of model frames.
///
/// Frame order is the order of appearance in the source; serial numbers are
/// neither required to be contiguous nor to start at any particular value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    frames: Vec<ModelFrame>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[ModelFrame] {
        &self.frames
    }

    pub fn add_frame(&mut self, frame: ModelFrame) {
        self.frames.push(frame);
    }

    pub(crate) fn frames_mut(&mut self) -> &mut Vec<ModelFrame> {
        &mut self.frames
    }

    /// Returns an iterator over every chain of every frame, in stored order.
    pub fn chains_iter(&self) -> impl Iterator<Item = &Chain> {
        self.frames.iter().flat_map(|f| f.chains.iter())
    }

    /// Counts chains across all frames.
    ///
    /// A structure without any chain is treated by the readers as an
    /// unsuccessful decode.
    pub fn chain_count(&self) -> usize {
        self.frames.iter().map(|f| f.chains.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_structure_is_empty() {
        let structure = Structure::new();
        assert!(structure.frames().is_empty());
        assert_eq!(structure.chain_count(), 0);
    }

    #[test]
    fn chain_count_spans_all_frames() {
        let mut structure = Structure::new();
        let mut first = ModelFrame::new(1);
        first.add_chain(Chain::new("A"));
        first.add_chain(Chain::new("B"));
        let mut second = ModelFrame::new(2);
        second.add_chain(Chain::new("A"));
        structure.add_frame(first);
        structure.add_frame(second);

        assert_eq!(structure.chain_count(), 3);
        let ids: Vec<_> = structure.chains_iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "A"]);
    }

    #[test]
    fn find_chain_matches_exact_identifier() {
        let mut frame = ModelFrame::new(0);
        frame.add_chain(Chain::new("AA"));
        frame.add_chain(Chain::new("A"));
        assert_eq!(frame.find_chain("A").map(|c| c.id.as_str()), Some("A"));
        assert!(frame.find_chain("a").is_none());
    }
}

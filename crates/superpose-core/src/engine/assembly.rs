use crate::core::models::chain::Chain;
use crate::core::models::structure::{ModelFrame, Structure};

pub const FIRST_CHAIN_ID: &str = "A";
pub const SECOND_CHAIN_ID: &str = "B";

/// Serial of the single frame of an assembled structure.
pub const ASSEMBLED_MODEL_SERIAL: i32 = 0;

/// Merges the selected chains into a new single-frame structure.
///
/// The first chain, when given, is renamed `A` and comes first; the second is
/// renamed `B`.
pub fn assemble(first: Option<Chain>, second: Chain) -> Structure {
    let mut frame = ModelFrame::new(ASSEMBLED_MODEL_SERIAL);
    if let Some(mut chain) = first {
        chain.id = FIRST_CHAIN_ID.to_string();
        frame.add_chain(chain);
    }
    let mut second = second;
    second.id = SECOND_CHAIN_ID.to_string();
    frame.add_chain(second);

    let mut structure = Structure::new();
    structure.add_frame(frame);
    structure
}

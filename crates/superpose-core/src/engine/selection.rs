use crate::core::models::chain::Chain;
use crate::core::models::structure::{ModelFrame, Structure};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{}", chain_not_found_message(.requested.as_deref(), .model))]
    ChainNotFound {
        requested: Option<String>,
        model: Option<i32>,
    },
}

fn chain_not_found_message(requested: Option<&str>, model: &Option<i32>) -> String {
    let frame = match model {
        Some(serial) => format!("model {}", serial),
        None => "the first model".to_string(),
    };
    match requested {
        Some(id) => format!("Chain '{}' not found in {}", id, frame),
        None => format!("No chain found in {}", frame),
    }
}

/// Picks the frame with the given serial, or the first frame.
///
/// An unknown serial is not an error: it falls back to the first frame the
/// same way an absent one does.
fn select_frame(structure: &Structure, model: Option<i32>) -> Option<&ModelFrame> {
    let frames = structure.frames();
    model
        .and_then(|serial| frames.iter().find(|f| f.serial == serial))
        .or_else(|| {
            if let Some(serial) = model {
                debug!("No model {} in structure; using the first model.", serial);
            }
            frames.first()
        })
}

/// Extracts one chain from a structure as an independent copy.
///
/// With a chain id the first exact match in the chosen frame is taken; without
/// one, the first chain of that frame.
///
/// # Errors
///
/// Returns [`SelectionError::ChainNotFound`] when the requested chain is not in
/// the chosen frame, or when that frame (or the structure) has no chain.
pub fn select_chain(
    structure: &Structure,
    chain: Option<&str>,
    model: Option<i32>,
) -> Result<Chain, SelectionError> {
    let not_found = || SelectionError::ChainNotFound {
        requested: chain.map(str::to_string),
        model,
    };
    let frame = select_frame(structure, model).ok_or_else(not_found)?;
    let selected = match chain {
        Some(id) => frame.find_chain(id),
        None => frame.chains().first(),
    };
    selected.cloned().ok_or_else(not_found)
}

/// The serial of the frame [`select_chain`] reads from.
pub fn selected_model_serial(structure: &Structure, model: Option<i32>) -> Option<i32> {
    select_frame(structure, model).map(|f| f.serial)
}

use nalgebra::Point3;

/// Represents an atom of a parsed macromolecular structure.
///
/// Coordinates are held at single precision so that every transform and every
/// serialized record sees the same numeric values as the legacy tools that
/// produced the input files.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "OXT"), without column padding.
    pub name: String,
    /// The element symbol (e.g., "C", "FE"); empty when unknown.
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f32>,
    /// The alternate-location indicator, if the atom has one.
    pub alt_loc: Option<char>,
    /// The occupancy; `None` when the source record left it blank.
    pub occupancy: Option<f32>,
    /// The isotropic temperature factor.
    pub b_factor: f32,
}

impl Atom {
    /// Creates a new `Atom` with full occupancy, no alternate location and a
    /// zero temperature factor.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `element` - The element symbol of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, element: &str, position: Point3<f32>) -> Self {
        Self {
            name: name.to_string(),
            element: element.to_string(),
            position,
            alt_loc: None,
            occupancy: Some(1.0),
            b_factor: 0.0,
        }
    }
}

/// Guesses an element symbol from an atom name when the source omitted it.
///
/// Leading digits (as in `1HB`) are skipped and the first alphabetic
/// character is taken as a one-letter element.
pub fn element_from_name(name: &str) -> String {
    name.trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

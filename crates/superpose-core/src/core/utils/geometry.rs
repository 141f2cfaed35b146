use crate::core::models::chain::Chain;
use nalgebra::{Matrix3, Point3, Vector3};
use std::fmt;
use thiserror::Error;

pub const ROTATION_LEN: usize = 9;
pub const TRANSLATION_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformComponent {
    Rotation,
    Translation,
}

impl fmt::Display for TransformComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformComponent::Rotation => write!(f, "rotation matrix"),
            TransformComponent::Translation => write!(f, "translation vector"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformSpecError {
    #[error("The {component} must have {expected} elements, got {found}")]
    MalformedArity {
        component: TransformComponent,
        expected: usize,
        found: usize,
    },
    #[error("Rotation and translation must be given together ({missing} is missing)")]
    Incomplete { missing: TransformComponent },
}

fn check_arity(
    values: Option<&[f64]>,
    component: TransformComponent,
    expected: usize,
) -> Result<(), TransformSpecError> {
    match values {
        Some(v) if v.len() != expected => Err(TransformSpecError::MalformedArity {
            component,
            expected,
            found: v.len(),
        }),
        _ => Ok(()),
    }
}

/// A rotation followed by a translation, held at single precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    rotation: Matrix3<f32>,
    translation: Vector3<f32>,
}

impl RigidTransform {
    pub fn new(rotation: Matrix3<f32>, translation: Vector3<f32>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Builds a transform from 9 rotation and 3 translation scalars.
    ///
    /// The rotation scalars are laid out column by column, so row 0 of the
    /// matrix is `[a0, a3, a6]`. Every scalar is narrowed to `f32` here,
    /// before any coordinate is touched.
    ///
    /// Points are multiplied as row vectors (`x·R`), so the scalars read
    /// row by row give the rotation that is actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`TransformSpecError::MalformedArity`] when either slice has
    /// the wrong length.
    pub fn from_column_major(
        rotation: &[f64],
        translation: &[f64],
    ) -> Result<Self, TransformSpecError> {
        check_arity(Some(rotation), TransformComponent::Rotation, ROTATION_LEN)?;
        check_arity(Some(translation), TransformComponent::Translation, TRANSLATION_LEN)?;

        let rotation: Vec<f32> = rotation.iter().map(|&v| v as f32).collect();
        let translation: Vec<f32> = translation.iter().map(|&v| v as f32).collect();
        Ok(Self::new(
            Matrix3::from_column_slice(&rotation),
            Vector3::from_column_slice(&translation),
        ))
    }

    /// Validates an optional rotation/translation pair.
    ///
    /// Arity is checked first (rotation, then translation), then that both or
    /// neither are present. Neither yields `Ok(None)`.
    pub fn from_components(
        rotation: Option<&[f64]>,
        translation: Option<&[f64]>,
    ) -> Result<Option<Self>, TransformSpecError> {
        check_arity(rotation, TransformComponent::Rotation, ROTATION_LEN)?;
        check_arity(translation, TransformComponent::Translation, TRANSLATION_LEN)?;
        match (rotation, translation) {
            (Some(r), Some(t)) => Self::from_column_major(r, t).map(Some),
            (None, None) => Ok(None),
            (Some(_), None) => Err(TransformSpecError::Incomplete {
                missing: TransformComponent::Translation,
            }),
            (None, Some(_)) => Err(TransformSpecError::Incomplete {
                missing: TransformComponent::Rotation,
            }),
        }
    }

    pub fn rotation(&self) -> &Matrix3<f32> {
        &self.rotation
    }

    pub fn translation(&self) -> &Vector3<f32> {
        &self.translation
    }

    /// Returns `x·R + t`, computed as `Rᵀ·x + t`.
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        Point3::from(self.rotation.tr_mul(&point.coords) + self.translation)
    }

    /// Moves every atom of `chain` in place.
    pub fn apply(&self, chain: &mut Chain) {
        for atom in chain.atoms_mut() {
            atom.position = self.transform_point(&atom.position);
        }
    }
}

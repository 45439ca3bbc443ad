//! Qubit circuit parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QubitError, QubitResult};
use crate::operator::check_truncation;
use crate::zpf::check_energy;

/// Default truncation dimension.
pub const DEFAULT_TRUNCATION: usize = 2;

/// Qubit family tag.
///
/// Tags are case-insensitive and normalized to trimmed lowercase. The three
/// built-in families always map to their own variants; any other tag is a
/// [`QubitVariant::Custom`] family whose availability is decided by the
/// registry at model construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QubitVariant {
    /// Flux qubit.
    Flux,
    /// Transmon.
    Transmon,
    /// Fluxonium.
    Fluxonium,
    /// Caller-registered family. Built through [`QubitVariant::custom`].
    Custom(CustomTag),
}

/// Normalized tag of a caller-registered family.
///
/// Never holds a built-in tag, so each family has exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomTag(String);

impl CustomTag {
    /// The tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl QubitVariant {
    /// Registry tag.
    pub fn tag(&self) -> &str {
        match self {
            QubitVariant::Flux => "flux",
            QubitVariant::Transmon => "transmon",
            QubitVariant::Fluxonium => "fluxonium",
            QubitVariant::Custom(tag) => tag.as_str(),
        }
    }

    /// Variant for a tag; built-in names map to the built-in variants.
    pub fn custom(tag: impl Into<String>) -> Self {
        QubitVariant::from(tag.into())
    }

    /// True for the three built-in families.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, QubitVariant::Custom(_))
    }

    fn builtin(tag: &str) -> Option<Self> {
        match tag {
            "flux" => Some(QubitVariant::Flux),
            "transmon" => Some(QubitVariant::Transmon),
            "fluxonium" => Some(QubitVariant::Fluxonium),
            _ => None,
        }
    }
}

impl From<String> for QubitVariant {
    fn from(tag: String) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        QubitVariant::builtin(&tag).unwrap_or(QubitVariant::Custom(CustomTag(tag)))
    }
}

impl From<QubitVariant> for String {
    fn from(variant: QubitVariant) -> Self {
        match variant {
            QubitVariant::Custom(tag) => tag.0,
            builtin => builtin.tag().to_string(),
        }
    }
}

impl FromStr for QubitVariant {
    type Err = QubitError;

    /// Parse a built-in tag; anything else is unsupported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QubitVariant::builtin(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| QubitError::UnsupportedQubitType(s.to_string()))
    }
}

impl fmt::Display for QubitVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn default_truncation() -> usize {
    DEFAULT_TRUNCATION
}

/// Circuit parameters of a single qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitSpec {
    /// Qubit family.
    pub variant: QubitVariant,
    /// Inductive energy.
    pub el: f64,
    /// Capacitive energy.
    pub ec: f64,
    /// External flux bias.
    #[serde(default)]
    pub phi_ext: f64,
    /// Number of basis levels kept.
    #[serde(default = "default_truncation")]
    pub truncation_dim: usize,
    /// Josephson energy, for families that model the junction explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ej: Option<f64>,
    /// Gate offset charge, for charge-basis families.
    #[serde(default)]
    pub ng: f64,
}

impl QubitSpec {
    /// Parameters with zero flux bias and the default truncation.
    pub fn new(variant: QubitVariant, el: f64, ec: f64) -> Self {
        Self {
            variant,
            el,
            ec,
            phi_ext: 0.0,
            truncation_dim: DEFAULT_TRUNCATION,
            ej: None,
            ng: 0.0,
        }
    }

    /// Set the external flux bias.
    #[must_use]
    pub fn with_phi_ext(mut self, phi_ext: f64) -> Self {
        self.phi_ext = phi_ext;
        self
    }

    /// Set the truncation dimension.
    #[must_use]
    pub fn with_truncation(mut self, dim: usize) -> Self {
        self.truncation_dim = dim;
        self
    }

    /// Set the Josephson energy.
    #[must_use]
    pub fn with_ej(mut self, ej: f64) -> Self {
        self.ej = Some(ej);
        self
    }

    /// Set the gate offset charge.
    #[must_use]
    pub fn with_ng(mut self, ng: f64) -> Self {
        self.ng = ng;
        self
    }

    /// Use a charge basis `-cutoff..=cutoff`, i.e. `2·cutoff + 1` levels.
    #[must_use]
    pub fn with_charge_cutoff(mut self, cutoff: usize) -> Self {
        self.truncation_dim = 2 * cutoff + 1;
        self
    }

    /// Charge cutoff implied by the truncation, `(dim − 1) / 2`.
    pub fn charge_cutoff(&self) -> usize {
        self.truncation_dim.saturating_sub(1) / 2
    }

    /// Check the family-independent invariants.
    ///
    /// # Errors
    /// [`QubitError::InvalidParameter`] for non-positive or non-finite
    /// energies, a non-finite flux bias or offset charge, or a truncation
    /// below 2.
    pub fn validate(&self) -> QubitResult<()> {
        check_energy("el", self.el)?;
        check_energy("ec", self.ec)?;
        if !self.phi_ext.is_finite() {
            return Err(QubitError::invalid(
                "phi_ext",
                self.phi_ext,
                "flux bias must be finite",
            ));
        }
        if !self.ng.is_finite() {
            return Err(QubitError::invalid("ng", self.ng, "offset charge must be finite"));
        }
        check_truncation(self.truncation_dim)?;
        if let Some(ej) = self.ej {
            check_energy("ej", ej)?;
        }
        Ok(())
    }
}

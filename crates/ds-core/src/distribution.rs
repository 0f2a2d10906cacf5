//! Random duration sampling.
//!
//! Every configured distribution is described by a family and a single
//! "shape" parameter, mapped as follows:
//!
//! | Family        | Meaning of `param`                                  |
//! |---------------|-----------------------------------------------------|
//! | `Exponential` | mean                                                |
//! | `Normal`      | mean; standard deviation is `param / 3`             |
//! | `Uniform`     | midpoint of `[0.5 × param, 1.5 × param)`            |
//! | `Constant`    | the value itself (deterministic)                    |
//!
//! Samples are durations, so they are clamped at zero: a normal draw below
//! zero would otherwise schedule an event in the past.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::{DsError, DsResult, SimRng};

/// Largest accepted distribution parameter, after lane scaling.
///
/// No family draws more than 37 × its parameter (the exponential tail at the
/// smallest representable uniform), so an event scheduled at
/// `horizon + 2 × sample` stays finite as long as the horizon is within
/// [`MAX_HORIZON`][crate::MAX_HORIZON].
pub const MAX_PARAMETER: f64 = f64::MAX / 256.0;

// ── DistributionKind ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistributionKind {
    Exponential,
    Normal,
    Uniform,
    Constant,
}

impl DistributionKind {
    pub const ALL: [DistributionKind; 4] = [
        DistributionKind::Exponential,
        DistributionKind::Normal,
        DistributionKind::Uniform,
        DistributionKind::Constant,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistributionKind::Exponential => "exponential",
            DistributionKind::Normal      => "normal",
            DistributionKind::Uniform     => "uniform",
            DistributionKind::Constant    => "constant",
        }
    }
}

impl FromStr for DistributionKind {
    type Err = DsError;

    fn from_str(s: &str) -> DsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exponential" | "exp" | "negexp" => Ok(DistributionKind::Exponential),
            "normal" | "gaussian"            => Ok(DistributionKind::Normal),
            "uniform"                        => Ok(DistributionKind::Uniform),
            "constant" | "fixed"             => Ok(DistributionKind::Constant),
            _ => Err(DsError::UnknownDistribution(s.to_owned())),
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── DistributionSpec ─────────────────────────────────────────────────────────

/// A distribution family plus its shape parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionSpec {
    pub kind:  DistributionKind,
    pub param: f64,
}

impl DistributionSpec {
    pub const fn new(kind: DistributionKind, param: f64) -> Self {
        Self { kind, param }
    }

    pub const fn exponential(mean: f64) -> Self {
        Self::new(DistributionKind::Exponential, mean)
    }

    pub const fn normal(mean: f64) -> Self {
        Self::new(DistributionKind::Normal, mean)
    }

    pub const fn uniform(mid: f64) -> Self {
        Self::new(DistributionKind::Uniform, mid)
    }

    pub const fn constant(value: f64) -> Self {
        Self::new(DistributionKind::Constant, value)
    }

    /// The same family with the parameter multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self { param: self.param * factor, ..self }
    }

    /// The parameter must be positive and at most [`MAX_PARAMETER`] for
    /// every family.
    pub fn validate(&self, field: &'static str) -> DsResult<()> {
        if !self.param.is_finite() || self.param <= 0.0 {
            return Err(DsError::invalid(
                field,
                format!("{} parameter must be positive and finite, got {}", self.kind, self.param),
            ));
        }
        if self.param > MAX_PARAMETER {
            return Err(DsError::invalid(
                field,
                format!("{} parameter {} exceeds the maximum {MAX_PARAMETER:e}", self.kind, self.param),
            ));
        }
        Ok(())
    }

    /// The long-run mean of a sample (before clamping).
    pub fn mean(&self) -> f64 {
        self.param
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.param)
    }
}

// ── Sampler ──────────────────────────────────────────────────────────────────

/// Draws non-negative durations from a validated [`DistributionSpec`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sampler {
    spec: DistributionSpec,
}

impl Sampler {
    /// Build a sampler, rejecting parameters the families cannot use.
    pub fn new(spec: DistributionSpec, field: &'static str) -> DsResult<Self> {
        spec.validate(field)?;
        Ok(Self { spec })
    }

    pub fn spec(&self) -> DistributionSpec {
        self.spec
    }

    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        let p = self.spec.param;
        let raw = match self.spec.kind {
            // Inverse CDF; 1 - u lies in (0, 1] so the log is finite.
            DistributionKind::Exponential => -p * (1.0 - rng.unit()).ln(),
            DistributionKind::Normal => p + (p / 3.0) * standard_normal(rng),
            DistributionKind::Uniform => rng.gen_range(p * 0.5..p * 1.5),
            DistributionKind::Constant => p,
        };
        raw.max(0.0)
    }
}

/// Box–Muller transform (one of the pair is discarded).
fn standard_normal(rng: &mut SimRng) -> f64 {
    let u1 = 1.0 - rng.unit();
    let u2 = rng.unit();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

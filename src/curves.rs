//! Curve resolution by canonical name
//!
//! Log files name the same physical measurement many ways ("DT", "DTCO",
//! "SONIC"...). Each canonical curve carries an ordered alias table; the
//! first alias present in a `CurveSet` wins, exact spelling before
//! case-insensitive. Nothing found resolves to the explicitly-empty curve,
//! so callers test `is_empty()` instead of handling a missing value.

use serde::{Deserialize, Serialize};

use crate::config::CurveAliasConfig;
use crate::types::{CurveSet, LogCurve};

static EMPTY_CURVE: LogCurve = LogCurve::empty();

/// Physical curves the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalCurve {
    Depth,
    Inclination,
    Azimuth,
    Sonic,
    Density,
    GammaRay,
}

impl CanonicalCurve {
    pub const ALL: [Self; 6] = [
        Self::Depth,
        Self::Inclination,
        Self::Azimuth,
        Self::Sonic,
        Self::Density,
        Self::GammaRay,
    ];

    /// Built-in aliases in priority order. The first entry is the canonical mnemonic.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Depth => &["DEPTH", "DEPT", "M_DEPTH", "MD"],
            Self::Inclination => &["INC", "INCL", "DEVI", "INCLINATION"],
            Self::Azimuth => &["AZI", "AZIM", "HAZI", "AZIMUTH"],
            Self::Sonic => &["DT", "DTCO", "DTC", "SONIC"],
            Self::Density => &["RHOB", "RHO", "DEN", "DENSITY"],
            Self::GammaRay => &["GR", "SGR", "CGR", "GAMMA"],
        }
    }

    pub const fn canonical_name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Built-in aliases followed by the site-specific ones from config.
    pub fn alias_list(self, extra: &CurveAliasConfig) -> Vec<&str> {
        let configured = match self {
            Self::Depth => &extra.depth,
            Self::Inclination => &extra.inclination,
            Self::Azimuth => &extra.azimuth,
            Self::Sonic => &extra.sonic,
            Self::Density => &extra.density,
            Self::GammaRay => &extra.gamma_ray,
        };
        self.aliases()
            .iter()
            .copied()
            .chain(configured.iter().map(String::as_str))
            .collect()
    }
}

impl std::fmt::Display for CanonicalCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Return the first curve matching `aliases`, or the empty curve.
///
/// For each alias in order, an exact key match is tried before a
/// case-insensitive one.
pub fn resolve<'a, S: AsRef<str>>(curves: &'a CurveSet, aliases: &[S]) -> &'a LogCurve {
    for alias in aliases {
        let alias = alias.as_ref();
        if let Some(curve) = curves.get(alias) {
            return curve;
        }
        if let Some((_, curve)) = curves
            .curves
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(alias))
        {
            return curve;
        }
    }
    &EMPTY_CURVE
}

/// Resolve a canonical curve through its alias table.
pub fn resolve_canonical<'a>(
    curves: &'a CurveSet,
    curve: CanonicalCurve,
    extra: &CurveAliasConfig,
) -> &'a LogCurve {
    let resolved = resolve(curves, &curve.alias_list(extra));
    if resolved.is_empty() {
        tracing::debug!(curve = %curve, "No curve matched alias table");
    } else {
        tracing::debug!(curve = %curve, mnemonic = %resolved.mnemonic, samples = resolved.len(), "Resolved curve");
    }
    resolved
}

/// Every canonical curve resolved once for one computation.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCurves<'a> {
    pub depth: &'a LogCurve,
    pub inclination: &'a LogCurve,
    pub azimuth: &'a LogCurve,
    pub sonic: &'a LogCurve,
    pub density: &'a LogCurve,
    pub gamma_ray: &'a LogCurve,
}

impl<'a> ResolvedCurves<'a> {
    pub fn resolve(curves: &'a CurveSet, extra: &CurveAliasConfig) -> Self {
        Self {
            depth: resolve_canonical(curves, CanonicalCurve::Depth, extra),
            inclination: resolve_canonical(curves, CanonicalCurve::Inclination, extra),
            azimuth: resolve_canonical(curves, CanonicalCurve::Azimuth, extra),
            sonic: resolve_canonical(curves, CanonicalCurve::Sonic, extra),
            density: resolve_canonical(curves, CanonicalCurve::Density, extra),
            gamma_ray: resolve_canonical(curves, CanonicalCurve::GammaRay, extra),
        }
    }

    /// True when both directional curves are present.
    pub fn has_survey(&self) -> bool {
        !self.inclination.is_empty() && !self.azimuth.is_empty()
    }
}

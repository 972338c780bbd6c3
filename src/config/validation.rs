//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `EngineConfig`.
///
/// Maintained by hand to match the struct hierarchy in engine_config.rs.
/// Any new field added to `EngineConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        "well.operator",
        // [risk]
        "risk",
        "risk.medium_dls",
        "risk.high_dls",
        "risk.critical_dls",
        // [risk.report]
        "risk.report",
        "risk.report.min_reported_dls",
        "risk.report.max_entries",
        // [trajectory]
        "trajectory",
        "trajectory.stride",
        "trajectory.method",
        // [trajectory.synthetic]
        "trajectory.synthetic",
        "trajectory.synthetic.kickoff_fraction",
        "trajectory.synthetic.build_rate_deg_per_100",
        "trajectory.synthetic.max_inclination_deg",
        "trajectory.synthetic.azimuth_deg",
        // [seismic]
        "seismic",
        "seismic.wavelet_frequency_hz",
        "seismic.sample_interval_s",
        "seismic.wavelet_duration_s",
        "seismic.polarity",
        "seismic.skip_threshold",
        // [section]
        "section",
        "section.lateral_count",
        "section.perturbation",
        "section.jitter_amplitude",
        "section.max_shift",
        "section.seed",
        // [curves]
        "curves",
        "curves.depth",
        "curves.inclination",
        "curves.azimuth",
        "curves.sonic",
        "curves.density",
        "curves.gamma_ray",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

/// Dotted paths of every float in the tree that is NaN or infinite.
pub fn non_finite_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    match value {
        toml::Value::Float(f) if !f.is_finite() => keys.push(prefix.to_string()),
        toml::Value::Table(table) => {
            for (k, v) in table {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                keys.extend(non_finite_keys(v, &path));
            }
        }
        _ => {}
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so suggestions are stable across runs
        let better = match best {
            None => true,
            Some((best_key, best_dist)) => dist < best_dist || (dist == best_dist && k < best_key),
        };
        if better {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns. Existing configs
/// always continue to work.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new(); // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed `EngineConfig`.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent startup; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::EngineConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let s = &config.seismic;

    // A wavelet above Nyquist aliases into garbage
    if s.sample_interval_s > 0.0 {
        let nyquist = 0.5 / s.sample_interval_s;
        if s.wavelet_frequency_hz >= nyquist {
            errors.push(format!(
                "seismic.wavelet_frequency_hz = {:.1} is at or above Nyquist ({:.1} Hz) for sample_interval_s = {}",
                s.wavelet_frequency_hz, nyquist, s.sample_interval_s
            ));
        }
    }

    // Dominant frequency: 5-120 Hz covers surface seismic bandwidth
    if s.wavelet_frequency_hz > 0.0 && !(5.0..=120.0).contains(&s.wavelet_frequency_hz) {
        warnings.push(ValidationWarning {
            field: "seismic.wavelet_frequency_hz".to_string(),
            message: format!(
                "wavelet_frequency_hz = {:.1} is outside typical seismic range (5-120 Hz)",
                s.wavelet_frequency_hz
            ),
            suggestion: None,
        });
    }

    // A wavelet shorter than one period gets truncated
    if s.wavelet_frequency_hz > 0.0 && s.wavelet_duration_s < 1.0 / s.wavelet_frequency_hz {
        warnings.push(ValidationWarning {
            field: "seismic.wavelet_duration_s".to_string(),
            message: format!(
                "wavelet_duration_s = {} is shorter than one period at {:.1} Hz, side lobes will be truncated",
                s.wavelet_duration_s, s.wavelet_frequency_hz
            ),
            suggestion: None,
        });
    }

    // A synthetic build steeper than the critical band flags every interval
    let synthetic = &config.trajectory.synthetic;
    if synthetic.build_rate_deg_per_100 >= config.risk.critical_dls {
        warnings.push(ValidationWarning {
            field: "trajectory.synthetic.build_rate_deg_per_100".to_string(),
            message: format!(
                "build_rate_deg_per_100 = {:.1} is at or above risk.critical_dls ({:.1}), every synthetic build interval will classify as Critical",
                synthetic.build_rate_deg_per_100, config.risk.critical_dls
            ),
            suggestion: None,
        });
    }

    if config.section.lateral_count > 1_000 {
        warnings.push(ValidationWarning {
            field: "section.lateral_count".to_string(),
            message: format!(
                "lateral_count = {} is unusually large for a schematic section",
                config.section.lateral_count
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

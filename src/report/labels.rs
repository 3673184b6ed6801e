//! Parameter display labels, keyed by table family.
//!
//! The estimation tables distinguish the GARCH `β` (`beta[1]`) from the
//! FIGARCH `β` (`beta`); every other table renders both as a plain `β`.
//!
//! | entry point        | family       |
//! |--------------------|--------------|
//! | `models-d1`        | `Estimation` |
//! | `models-d2`        | `Estimation` |
//! | `models-extended`  | `Estimation` |
//! | `descriptives`     | `Generic`    |
//!
//! A `<p>_std` identifier whose coefficient `<p>` is mapped renders as the
//! empty string, so the standard error sits beneath its coefficient.
//! Unmapped identifiers pass through unchanged.

use crate::report::format::STD_SUFFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelFamily {
    /// Model estimation tables (`beta[1]` → `β_G`, `beta` → `β_F`).
    Estimation,
    /// Everything else.
    Generic,
}

const LABELS: &[(LabelFamily, &str, &str)] = &[
    (LabelFamily::Estimation, "Const", r"$\mu$"),
    (LabelFamily::Estimation, "y[1]", r"$\rho$"),
    (LabelFamily::Estimation, "omega", r"$\eta$"),
    (LabelFamily::Estimation, "alpha[1]", r"$\alpha$"),
    (LabelFamily::Estimation, "beta[1]", r"$\beta_G$"),
    (LabelFamily::Estimation, "beta", r"$\beta_F$"),
    (LabelFamily::Estimation, "d", r"$d$"),
    (LabelFamily::Estimation, "phi", r"$\phi$"),
    (LabelFamily::Estimation, "gamma[1]", r"$\gamma$"),
    (LabelFamily::Estimation, "delta", r"$\delta$"),
    (LabelFamily::Generic, "Const", r"$\mu$"),
    (LabelFamily::Generic, "y[1]", r"$\rho$"),
    (LabelFamily::Generic, "omega", r"$\eta$"),
    (LabelFamily::Generic, "alpha[1]", r"$\alpha$"),
    (LabelFamily::Generic, "gamma[1]", r"$\gamma$"),
    (LabelFamily::Generic, "beta[1]", r"$\beta$"),
    (LabelFamily::Generic, "beta", r"$\beta$"),
    (LabelFamily::Generic, "d", r"$d$"),
    (LabelFamily::Generic, "phi[1]", r"$\phi$"),
    (LabelFamily::Generic, "phi", r"$\phi$"),
    (LabelFamily::Generic, "delta", r"$\delta$"),
];

fn lookup(family: LabelFamily, raw: &str) -> Option<&'static str> {
    LABELS
        .iter()
        .find(|(f, id, _)| *f == family && *id == raw)
        .map(|(_, _, label)| *label)
}

/// Display label for `raw` in `family`.
pub fn display_label(family: LabelFamily, raw: &str) -> &str {
    if let Some(label) = lookup(family, raw) {
        return label;
    }
    if let Some(base) = raw.strip_suffix(STD_SUFFIX) {
        if lookup(family, base).is_some() {
            return "";
        }
    }
    raw
}

//! Formatting of fit results into table cells, plus the terminal summary.
//!
//! Model tables are built in two steps: every fit is flattened into a
//! `name → "0.1234"`, `name_std → "(0.0056)"` map, then the union of keys is
//! filtered against `DESIRED_ORDER`. Keys outside the canonical order (the
//! `nu`/`lambda` shapes of non-normal errors, for example) never reach the
//! table.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::ModelFit;
use crate::report::table::{Cell, MISSING, Table};

/// Suffix distinguishing a standard-error row from its coefficient row.
pub const STD_SUFFIX: &str = "_std";

/// Decimals for coefficients and standard errors.
pub const PRECISION: usize = 4;

/// Canonical row order of the estimation tables.
pub const DESIRED_ORDER: [&str; 20] = [
    "Const",
    "Const_std",
    "y[1]",
    "y[1]_std",
    "omega",
    "omega_std",
    "alpha[1]",
    "alpha[1]_std",
    "beta[1]",
    "beta[1]_std",
    "gamma[1]",
    "gamma[1]_std",
    "delta",
    "delta_std",
    "beta",
    "beta_std",
    "d",
    "d_std",
    "phi",
    "phi_std",
];

/// Significance stars for a p-value: `***` below 1%, `**` below 5%, `*` below
/// 10%. The caller supplies a probability; NaN gets no stars.
pub fn stars(p_value: f64) -> &'static str {
    if p_value < 0.01 {
        "***"
    } else if p_value < 0.05 {
        "**"
    } else if p_value < 0.10 {
        "*"
    } else {
        ""
    }
}

pub fn std_key(name: &str) -> String {
    format!("{name}{STD_SUFFIX}")
}

/// Flatten one fit into coefficient and standard-error strings.
///
/// Every estimate must have a standard error; `FitRecord::validate` enforces
/// this at intake. A non-finite or absent value renders as `---`. With
/// `annotate`, coefficients carry significance stars.
pub fn format_coef_std(fit: &dyn ModelFit, annotate: bool) -> BTreeMap<String, String> {
    let estimates = fit.parameter_estimates();
    let std_errs = fit.standard_errors();
    let p_values = if annotate { fit.p_values() } else { BTreeMap::new() };

    let mut out = BTreeMap::new();
    for (name, est) in estimates {
        debug_assert!(std_errs.contains_key(name), "no standard error for {name}");
        let coef = if est.is_finite() {
            let marker = p_values.get(name).map(|p| stars(*p)).unwrap_or("");
            format!("{est:.PRECISION$}{marker}")
        } else {
            MISSING.to_string()
        };
        let se = match std_errs.get(name) {
            Some(se) if se.is_finite() => format!("({se:.PRECISION$})"),
            _ => MISSING.to_string(),
        };
        out.insert(name.clone(), coef);
        out.insert(std_key(name), se);
    }
    out
}

/// Keep the entries of `canonical` that are `present`, in canonical order.
pub fn select_order<'a>(canonical: &[&'a str], present: &BTreeSet<&str>) -> Vec<&'a str> {
    canonical.iter().copied().filter(|k| present.contains(k)).collect()
}

/// One column per fit, rows in canonical order, `---` where a model lacks a
/// parameter.
pub fn build_model_table(fits: &[(&str, &dyn ModelFit)], annotate: bool) -> Table {
    let columns: Vec<(String, BTreeMap<String, String>)> = fits
        .iter()
        .map(|(name, fit)| (name.to_string(), format_coef_std(*fit, annotate)))
        .collect();

    let present: BTreeSet<&str> = columns
        .iter()
        .flat_map(|(_, entries)| entries.keys().map(String::as_str))
        .collect();
    let order = select_order(&DESIRED_ORDER, &present);

    Table::from_columns(&columns, &order)
}

/// Append `AIC` and `BIC` rows at two decimals. `fits` must be in column order.
pub fn append_information_criteria(table: &mut Table, fits: &[(&str, &dyn ModelFit)]) {
    let criteria: Vec<_> = fits.iter().map(|(_, fit)| fit.information_criteria()).collect();
    table.push_row("AIC", criteria.iter().map(|ic| Cell::Text(format!("{:.2}", ic.aic))).collect());
    table.push_row("BIC", criteria.iter().map(|ic| Cell::Text(format!("{:.2}", ic.bic))).collect());
}

/// One line per model: log-likelihood, AIC, BIC.
pub fn format_fit_summary(title: &str, nobs: usize, fits: &[(&str, &dyn ModelFit)]) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== fxvol - {title} ===\n"));
    out.push_str(&format!("Sample: n={nobs}\n\n"));

    out.push_str(format!("{:<14} {:>12} {:>12} {:>12}\n", "model", "loglik", "AIC", "BIC").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<14} {:-<12} {:-<12} {:-<12}\n", "", "", "", "").trim_end());
    out.push('\n');

    for (name, fit) in fits {
        let ic = fit.information_criteria();
        let loglik = ic.log_likelihood.map(|v| format!("{v:.3}")).unwrap_or_else(|| "n/a".to_string());
        out.push_str(
            format!(
                "{:<14} {:>12} {:>12.3} {:>12.3}\n",
                truncate(name, 14),
                loglik,
                ic.aic,
                ic.bic
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fit::testing::record;

    #[test]
    fn star_thresholds_are_strict() {
        assert_eq!(stars(0.005), "***");
        assert_eq!(stars(0.03), "**");
        assert_eq!(stars(0.07), "*");
        assert_eq!(stars(0.5), "");
        assert_eq!(stars(0.01), "**");
        assert_eq!(stars(0.05), "*");
        assert_eq!(stars(0.10), "");
        assert_eq!(stars(f64::NAN), "");
    }

    #[test]
    fn coefficient_and_std_error_pair() {
        let fit = record(&[("X", 0.1234, 0.0056)], 0.0, 0.0);
        let out = format_coef_std(&fit, false);
        assert_eq!(out["X"], "0.1234");
        assert_eq!(out["X_std"], "(0.0056)");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn annotation_appends_stars_to_coefficients_only() {
        let fit = record(&[("omega", 0.05, 0.01), ("d", 0.01, 1.0)], 0.0, 0.0);
        let out = format_coef_std(&fit, true);
        assert_eq!(out["omega"], "0.0500***");
        assert_eq!(out["omega_std"], "(0.0100)");
        assert_eq!(out["d"], "0.0100");
    }

    #[test]
    fn non_finite_values_render_as_placeholder() {
        let fit = record(&[("d", 0.4, f64::NAN), ("phi", f64::INFINITY, 0.1)], 0.0, 0.0);
        let out = format_coef_std(&fit, true);
        assert_eq!(out["d"], "0.4000");
        assert_eq!(out["d_std"], MISSING);
        assert_eq!(out["phi"], MISSING);
        assert_eq!(out["phi_std"], "(0.1000)");
    }

    #[test]
    fn select_order_skips_absent_entries() {
        let canonical = ["A", "A_std", "B", "B_std", "C", "C_std"];
        let present: BTreeSet<&str> = ["C_std", "A", "C", "A_std"].into_iter().collect();
        assert_eq!(select_order(&canonical, &present), ["A", "A_std", "C", "C_std"]);
    }

    #[test]
    fn model_table_takes_union_in_canonical_order() {
        let garch = record(&[("omega", 0.01, 0.002), ("beta[1]", 0.9, 0.01)], 10.0, 12.0);
        let figarch = record(&[("d", 0.4, 0.05), ("omega", 0.02, 0.003), ("nu", 5.0, 1.0)], 11.0, 13.0);
        let fits: [(&str, &dyn ModelFit); 2] = [("GARCH", &garch), ("FIGARCH", &figarch)];

        let mut table = build_model_table(&fits, false);
        assert_eq!(table.columns, ["GARCH", "FIGARCH"]);
        assert_eq!(
            table.row_keys(),
            ["omega", "omega_std", "beta[1]", "beta[1]_std", "d", "d_std"]
        );
        assert_eq!(table.row("d").unwrap().cells[0], Cell::Missing);
        assert_eq!(table.row("d").unwrap().cells[1], Cell::from("0.4000"));

        append_information_criteria(&mut table, &fits);
        let aic = table.row("AIC").unwrap();
        assert_eq!(aic.cells, [Cell::from("10.00"), Cell::from("11.00")]);
    }

    #[test]
    fn fit_summary_lists_every_model() {
        let mut fit = record(&[("omega", 0.01, 0.002)], 9123.4, 9160.1);
        fit.loglikelihood = Some(-4555.7);
        let fits: [(&str, &dyn ModelFit); 1] = [("GARCH model", &fit)];
        let out = format_fit_summary("Dataset I", 4120, &fits);
        assert!(out.contains("Sample: n=4120"));
        assert!(out.contains("GARCH model"));
        assert!(out.contains("-4555.700"));
        assert!(out.contains("9160.100"));
    }
}

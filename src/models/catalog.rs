//! The fixed estimation tables of the study.

use crate::domain::DatasetId;
use crate::io::export::TableOutput;
use crate::models::spec::{ErrorDist, VolFamily, VolatilitySpec};

const ROBUST_SE_NOTE: &str =
    r"Standard errors in parentheses are \textcite{bollerslev_woolridge1996} robust standard errors.";

/// Which estimation table to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTableId {
    /// GARCH, APARCH and FIGARCH on Dataset I.
    D1,
    /// APARCH and asymmetric GARCH on Dataset II.
    D2,
    /// GARCH and FIGARCH under three error laws on the extended sample.
    Extended,
}

/// Everything needed to estimate and export one table.
#[derive(Debug, Clone)]
pub struct ModelTable {
    pub dataset: DatasetId,
    /// One spec per column, in column order.
    pub specs: Vec<VolatilitySpec>,
    pub output: TableOutput,
    /// Append `AIC`/`BIC` rows.
    pub append_ic: bool,
    /// Star coefficients by significance.
    pub annotate: bool,
}

impl ModelTableId {
    pub const ALL: [ModelTableId; 3] = [ModelTableId::D1, ModelTableId::D2, ModelTableId::Extended];

    pub fn table(self) -> ModelTable {
        match self {
            ModelTableId::D1 => ModelTable {
                dataset: DatasetId::DatasetI,
                specs: vec![
                    VolatilitySpec::ar1("GARCH model", VolFamily::Garch),
                    VolatilitySpec::ar1("APARCH model", VolFamily::Aparch).asymmetric(1),
                    VolatilitySpec::ar1("FIGARCH model", VolFamily::Figarch),
                ],
                output: TableOutput::estimation(
                    "replication_results_d1.tex",
                    "Replication Results for Dataset I (1978-1994)",
                    vec![
                        ROBUST_SE_NOTE.to_string(),
                        "All models estimated via QMLE assuming a normal likelihood.".to_string(),
                    ],
                ),
                append_ic: false,
                annotate: false,
            },
            ModelTableId::D2 => ModelTable {
                dataset: DatasetId::DatasetII,
                specs: vec![
                    VolatilitySpec::ar1("APARCH", VolFamily::Aparch).asymmetric(1),
                    VolatilitySpec::ar1("AGARCH", VolFamily::Garch).asymmetric(1),
                ],
                output: TableOutput::estimation(
                    "replication_results_d2.tex",
                    "Replication Results for Dataset II",
                    vec![
                        ROBUST_SE_NOTE.to_string(),
                        "All models estimated via QMLE assuming a normal likelihood.".to_string(),
                    ],
                ),
                append_ic: false,
                annotate: false,
            },
            ModelTableId::Extended => {
                let mut specs = Vec::with_capacity(6);
                for (family, vol) in [("GARCH", VolFamily::Garch), ("FIGARCH", VolFamily::Figarch)] {
                    for dist in [ErrorDist::Normal, ErrorDist::StudentsT, ErrorDist::Ged] {
                        specs.push(VolatilitySpec::ar1(format!("{family}-{}", dist.suffix()), vol).with_dist(dist));
                    }
                }
                ModelTable {
                    dataset: DatasetId::Extended,
                    specs,
                    output: TableOutput::estimation(
                        "estimation_results_extended.tex",
                        "Estimation Results for Extended Dataset (2003--2023)",
                        vec![
                            ROBUST_SE_NOTE.to_string(),
                            "All models estimated via QMLE alongside an AR(1) mean equation.".to_string(),
                            "Column suffixes denote the error distribution: -N (Gaussian), -t (Student's $t$), -G (GED)."
                                .to_string(),
                        ],
                    ),
                    append_ic: true,
                    annotate: false,
                }
            }
        }
    }
}

impl ModelTable {
    pub fn column_names(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::spec::MeanSpec;
    use crate::report::LabelFamily;

    #[test]
    fn d1_has_three_replication_models() {
        let t = ModelTableId::D1.table();
        assert_eq!(t.dataset, DatasetId::DatasetI);
        assert_eq!(t.column_names(), ["GARCH model", "APARCH model", "FIGARCH model"]);
        assert_eq!(t.specs[1].o, 1);
        assert!(t.specs.iter().all(|s| s.mean == MeanSpec::Ar { lags: 1 }));
        assert_eq!(t.output.filename, "replication_results_d1.tex");
        assert!(!t.append_ic);
    }

    #[test]
    fn d2_agarch_is_asymmetric_power_two() {
        let t = ModelTableId::D2.table();
        let agarch = &t.specs[1];
        assert_eq!(agarch.vol, VolFamily::Garch);
        assert_eq!((agarch.p, agarch.o, agarch.q), (1, 1, 1));
        assert_eq!(agarch.power, 2.0);
    }

    #[test]
    fn extended_crosses_families_and_distributions() {
        let t = ModelTableId::Extended.table();
        assert_eq!(
            t.column_names(),
            ["GARCH-N", "GARCH-t", "GARCH-G", "FIGARCH-N", "FIGARCH-t", "FIGARCH-G"]
        );
        assert_eq!(t.specs[4].dist, ErrorDist::StudentsT);
        assert!(t.append_ic);
        assert_eq!(t.output.notes.len(), 3);
    }

    #[test]
    fn every_table_uses_estimation_labels() {
        for id in ModelTableId::ALL {
            assert_eq!(id.table().output.family, LabelFamily::Estimation);
        }
    }
}

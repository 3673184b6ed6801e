//! Volatility model configurations handed to the estimator.

use serde::{Deserialize, Serialize};

/// Conditional mean equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MeanSpec {
    Constant,
    Ar { lags: usize },
}

/// Conditional variance family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VolFamily {
    /// GARCH; with `o > 0` and power 2 this is GJR/asymmetric GARCH.
    Garch,
    Aparch,
    Figarch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDist {
    Normal,
    /// Student's t.
    #[serde(rename = "t")]
    StudentsT,
    /// Generalized error distribution.
    Ged,
}

impl ErrorDist {
    pub fn name(self) -> &'static str {
        match self {
            ErrorDist::Normal => "normal",
            ErrorDist::StudentsT => "t",
            ErrorDist::Ged => "ged",
        }
    }

    /// Column-name suffix used in the extended tables.
    pub fn suffix(self) -> &'static str {
        match self {
            ErrorDist::Normal => "N",
            ErrorDist::StudentsT => "t",
            ErrorDist::Ged => "G",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovarianceType {
    /// Bollerslev–Wooldridge robust standard errors.
    Robust,
}

/// One model column of an estimation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySpec {
    /// Column header, e.g. `GARCH model` or `FIGARCH-t`.
    pub name: String,
    pub mean: MeanSpec,
    pub vol: VolFamily,
    pub p: usize,
    pub o: usize,
    pub q: usize,
    pub power: f64,
    pub dist: ErrorDist,
    pub cov_type: CovarianceType,
}

impl VolatilitySpec {
    /// AR(1) mean, `(p, o, q) = (1, 0, 1)`, power 2, normal errors, robust
    /// covariance.
    pub fn ar1(name: impl Into<String>, vol: VolFamily) -> Self {
        Self {
            name: name.into(),
            mean: MeanSpec::Ar { lags: 1 },
            vol,
            p: 1,
            o: 0,
            q: 1,
            power: 2.0,
            dist: ErrorDist::Normal,
            cov_type: CovarianceType::Robust,
        }
    }

    pub fn asymmetric(mut self, o: usize) -> Self {
        self.o = o;
        self
    }

    pub fn with_dist(mut self, dist: ErrorDist) -> Self {
        self.dist = dist;
        self
    }

    /// File-name form of `name`: `GARCH model` → `garch-model`.
    pub fn slug(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        for ch in self.name.chars().flat_map(char::to_lowercase) {
            if ch.is_ascii_alphanumeric() {
                out.push(ch);
            } else if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.trim_end_matches('-').to_string()
    }

    /// Short description for logs, e.g. `APARCH(1,1,1) normal`.
    pub fn describe(&self) -> String {
        let orders = match self.vol {
            VolFamily::Figarch => format!("({},d,{})", self.p, self.q),
            _ if self.o > 0 => format!("({},{},{})", self.p, self.o, self.q),
            _ => format!("({},{})", self.p, self.q),
        };
        let family = match (self.vol, self.o) {
            (VolFamily::Garch, o) if o > 0 => "GJR-GARCH",
            (VolFamily::Garch, _) => "GARCH",
            (VolFamily::Aparch, _) => "APARCH",
            (VolFamily::Figarch, _) => "FIGARCH",
        };
        format!("{family}{orders} {}", self.dist.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_names_family_and_orders() {
        let spec = VolatilitySpec::ar1("x", VolFamily::Figarch).with_dist(ErrorDist::Ged);
        assert_eq!(spec.describe(), "FIGARCH(1,d,1) ged");

        let gjr = VolatilitySpec::ar1("x", VolFamily::Garch).asymmetric(1);
        assert_eq!(gjr.describe(), "GJR-GARCH(1,1,1) normal");
    }

    #[test]
    fn slug_is_file_friendly() {
        assert_eq!(VolatilitySpec::ar1("GARCH model", VolFamily::Garch).slug(), "garch-model");
        assert_eq!(VolatilitySpec::ar1("FIGARCH-t", VolFamily::Figarch).slug(), "figarch-t");
        assert_eq!(VolatilitySpec::ar1(" A (x) ", VolFamily::Aparch).slug(), "a-x");
    }

    #[test]
    fn serializes_for_the_estimator() {
        let spec = VolatilitySpec::ar1("GARCH-t", VolFamily::Garch).with_dist(ErrorDist::StudentsT);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["vol"], "GARCH");
        assert_eq!(json["dist"], "t");
        assert_eq!(json["mean"]["kind"], "ar");
        assert_eq!(json["mean"]["lags"], 1);
        assert_eq!(json["cov_type"], "robust");
    }
}

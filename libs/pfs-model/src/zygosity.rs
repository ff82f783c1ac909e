use std::fmt;

use serde::Serialize;

/// Zygosity as reported in specimen manifests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Zygosity {
    #[serde(rename = "wild type")]
    WildType,
    #[serde(rename = "heterozygous")]
    Heterozygous,
    #[serde(rename = "homozygous")]
    Homozygous,
    #[serde(rename = "hemizygous")]
    Hemizygous,
    #[serde(rename = "?/?")]
    Unknown,
}

impl Zygosity {
    pub fn from_genotype(genotype: &str) -> Self {
        match genotype {
            "+/+" => Zygosity::WildType,
            "+/-" | "-/+" => Zygosity::Heterozygous,
            "-/-" => Zygosity::Homozygous,
            "-/Y" => Zygosity::Hemizygous,
            "" => Zygosity::Unknown,
            other => {
                tracing::warn!(genotype = other, "unrecognised genotype value");
                Zygosity::Unknown
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zygosity::WildType => "wild type",
            Zygosity::Heterozygous => "heterozygous",
            Zygosity::Homozygous => "homozygous",
            Zygosity::Hemizygous => "hemizygous",
            Zygosity::Unknown => "?/?",
        }
    }
}

impl fmt::Display for Zygosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn genotype_table() {
        for (genotype, expected) in [
            ("+/+", "wild type"),
            ("+/-", "heterozygous"),
            ("-/+", "heterozygous"),
            ("-/-", "homozygous"),
            ("-/Y", "hemizygous"),
            ("XYZ", "?/?"),
            ("", "?/?"),
            ("+/Y", "?/?"),
        ] {
            assert_eq!(Zygosity::from_genotype(genotype).as_str(), expected);
        }
    }

    #[test]
    #[traced_test]
    fn only_unrecognised_values_warn() {
        assert_eq!(Zygosity::from_genotype(""), Zygosity::Unknown);
        assert!(!logs_contain("unrecognised genotype value"));

        assert_eq!(Zygosity::from_genotype("n/a"), Zygosity::Unknown);
        assert!(logs_contain("unrecognised genotype value"));
    }

    #[test]
    fn serializes_as_report_label() {
        assert_eq!(
            serde_json::to_value(Zygosity::WildType).unwrap(),
            serde_json::json!("wild type")
        );
    }
}

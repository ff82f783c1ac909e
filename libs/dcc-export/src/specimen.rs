use pfs_model::{Sample, Zygosity};

use crate::ExportConfig;

/// Colony membership derived from an allele string such as
/// `C57BL/6NJ-Rnf217<em1(IMPC)J>/Mmjax (JR034213)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Colony {
    Baseline,
    Line(String),
}

/// Take the last parenthesised token of `allele` and classify it. The token
/// minus its two-letter prefix is compared with `baseline_stock`; any other
/// token becomes a colony id with its first `0` removed.
pub fn parse_colony(allele: &str, baseline_stock: &str) -> Colony {
    let tail = allele.rsplit_once('(').map_or(allele, |(_, tail)| tail);
    let stock = tail.split_once(')').map_or(tail, |(stock, _)| stock);

    let unprefixed: String = stock.chars().skip(2).collect();
    if unprefixed == baseline_stock {
        Colony::Baseline
    } else {
        Colony::Line(stock.replacen('0', "", 1))
    }
}

pub fn gender_of(sex: Option<&str>) -> &'static str {
    match sex {
        Some("M") => "male",
        _ => "female",
    }
}

/// One `mouse` element of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecimenRecord {
    pub pipeline: String,
    pub production_center: String,
    pub phenotyping_center: String,
    pub project: String,
    pub strain_id: String,
    pub specimen_id: String,
    pub dob: Option<String>,
    pub gender: &'static str,
    pub zygosity: Zygosity,
    pub litter_id: String,
    pub colony_id: Option<String>,
    pub is_baseline: bool,
}

impl SpecimenRecord {
    pub fn from_sample(sample: &Sample, config: &ExportConfig) -> Self {
        let (colony_id, is_baseline) = match sample.allele.as_deref() {
            Some(allele) => match parse_colony(allele, &config.baseline_stock) {
                Colony::Baseline => (None, true),
                Colony::Line(id) => (Some(id), false),
            },
            None => {
                tracing::debug!(sample = ?sample.entity.name, "sample has no allele");
                (None, false)
            }
        };

        Self {
            pipeline: config.pipeline.clone(),
            production_center: config.production_center.clone(),
            phenotyping_center: config.phenotyping_center.clone(),
            project: config.project.clone(),
            strain_id: config.strain_id.clone(),
            specimen_id: sample
                .customer_mouse_id
                .clone()
                .or_else(|| sample.entity.name.clone())
                .unwrap_or_default(),
            dob: sample
                .date_of_birth
                .as_deref()
                .map(|d| d.split_once('T').map_or(d, |(date, _)| date).to_string()),
            gender: gender_of(sample.sex.as_deref()),
            zygosity: sample.zygosity(),
            litter_id: sample
                .litter_number
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| " ".to_string()),
            colony_id,
            is_baseline,
        }
    }

    /// Attributes in document order; absent optional values are skipped.
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let mut attrs = vec![
            ("pipeline", self.pipeline.as_str()),
            ("productionCenter", self.production_center.as_str()),
            ("phenotypingCenter", self.phenotyping_center.as_str()),
            ("project", self.project.as_str()),
            ("strainID", self.strain_id.as_str()),
            ("specimenID", self.specimen_id.as_str()),
        ];
        if let Some(dob) = &self.dob {
            attrs.push(("DOB", dob.as_str()));
        }
        attrs.push(("gender", self.gender));
        attrs.push(("zygosity", self.zygosity.as_str()));
        attrs.push(("litterId", self.litter_id.as_str()));
        if let Some(colony) = &self.colony_id {
            attrs.push(("colonyID", colony.as_str()));
        }
        attrs.push(("isBaseline", if self.is_baseline { "true" } else { "false" }));
        attrs
    }
}

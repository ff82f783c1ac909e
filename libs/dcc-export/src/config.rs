use serde::{Deserialize, Serialize};

/// Fixed attributes stamped on every exported specimen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default = "default_centre")]
    pub centre_id: String,
    #[serde(default = "default_pipeline")]
    pub pipeline: String,
    #[serde(default = "default_centre")]
    pub production_center: String,
    #[serde(default = "default_centre")]
    pub phenotyping_center: String,
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default = "default_strain_id")]
    pub strain_id: String,
    /// Stock number (without its two-letter prefix) of the baseline strain.
    #[serde(default = "default_baseline_stock")]
    pub baseline_stock: String,
}

fn default_centre() -> String {
    "J".to_string()
}

fn default_pipeline() -> String {
    "JAX_001".to_string()
}

fn default_project() -> String {
    "JAX".to_string()
}

fn default_strain_id() -> String {
    "MGI:3056279".to_string()
}

fn default_baseline_stock() -> String {
    "005304".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            centre_id: default_centre(),
            pipeline: default_pipeline(),
            production_center: default_centre(),
            phenotyping_center: default_centre(),
            project: default_project(),
            strain_id: default_strain_id(),
            baseline_stock: default_baseline_stock(),
        }
    }
}

//! Enzyme type → biochemical function and cluster tables.

use serde::Serialize;

/// Function label for enzyme types missing from the table.
pub const FALLBACK_FUNCTION: &str = "Generic degradation";

const FUNCTION_TABLE: &[(&str, &str)] = &[
    ("cellulase", "Cellulose hydrolysis"),
    ("beta-glucosidase", "Cellulose hydrolysis"),
    ("laccase", "Lignin oxidation"),
    ("peroxidase", "Lignin degradation"),
    ("lignin_peroxidase", "Lignin degradation"),
    ("manganese_peroxidase", "Lignin degradation"),
    ("versatile_peroxidase", "Lignin degradation"),
    ("oxidase", "Oxidative degradation"),
    ("glyoxal_oxidase", "Oxidative degradation"),
    ("cellobiose_dehydrogenase", "Oxidative degradation"),
    ("xylanase", "Hemicellulose breakdown"),
    ("mannanase", "Hemicellulose breakdown"),
];

/// Inferred function of an enzyme type.
pub fn infer_function(enzyme_type: &str) -> &'static str {
    FUNCTION_TABLE
        .iter()
        .find(|(t, _)| *t == enzyme_type)
        .map(|(_, f)| *f)
        .unwrap_or(FALLBACK_FUNCTION)
}

/// Functional cluster. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Cluster {
    CelluloseDegradation,
    LigninDegradation,
    HemicelluloseDegradation,
    OxidativeEnzymes,
    Other,
}

const CLUSTER_TABLE: &[(&str, Cluster)] = &[
    ("cellulase", Cluster::CelluloseDegradation),
    ("beta-glucosidase", Cluster::CelluloseDegradation),
    ("laccase", Cluster::LigninDegradation),
    ("peroxidase", Cluster::LigninDegradation),
    ("lignin_peroxidase", Cluster::LigninDegradation),
    ("manganese_peroxidase", Cluster::LigninDegradation),
    ("versatile_peroxidase", Cluster::LigninDegradation),
    ("xylanase", Cluster::HemicelluloseDegradation),
    ("mannanase", Cluster::HemicelluloseDegradation),
    ("oxidase", Cluster::OxidativeEnzymes),
    ("glyoxal_oxidase", Cluster::OxidativeEnzymes),
    ("cellobiose_dehydrogenase", Cluster::OxidativeEnzymes),
];

impl Cluster {
    pub const ALL: [Cluster; 5] = [
        Cluster::CelluloseDegradation,
        Cluster::LigninDegradation,
        Cluster::HemicelluloseDegradation,
        Cluster::OxidativeEnzymes,
        Cluster::Other,
    ];

    pub fn for_enzyme(enzyme_type: &str) -> Self {
        CLUSTER_TABLE
            .iter()
            .find(|(t, _)| *t == enzyme_type)
            .map(|(_, c)| *c)
            .unwrap_or(Cluster::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cluster::CelluloseDegradation     => "Cellulose Degradation",
            Cluster::LigninDegradation        => "Lignin Degradation",
            Cluster::HemicelluloseDegradation => "Hemicellulose Degradation",
            Cluster::OxidativeEnzymes         => "Oxidative Enzymes",
            Cluster::Other                    => "Other",
        }
    }
}

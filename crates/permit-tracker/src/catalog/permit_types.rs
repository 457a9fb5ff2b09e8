use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermitCategory {
    Building,
    LandUse,
    Septic,
    Well,
    Tree,
}

impl PermitCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::LandUse => "Land Use",
            Self::Septic => "Septic",
            Self::Well => "Well",
            Self::Tree => "Tree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermitFees {
    pub base: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermitType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: PermitCategory,
    pub typical_processing_time: &'static str,
    pub required_documents: &'static [&'static str],
    pub fees: PermitFees,
    #[serde(skip_serializing_if = "no_notes")]
    pub notes: &'static [&'static str],
}

fn no_notes(notes: &&'static [&'static str]) -> bool {
    notes.is_empty()
}

pub fn permit_types() -> &'static [PermitType] {
    &PERMIT_TYPES
}

pub fn permit_type_by_id(id: &str) -> Option<&'static PermitType> {
    PERMIT_TYPES.iter().find(|permit| permit.id == id)
}

pub fn permit_types_by_category(category: PermitCategory) -> Vec<&'static PermitType> {
    PERMIT_TYPES
        .iter()
        .filter(|permit| permit.category == category)
        .collect()
}

static PERMIT_TYPES: [PermitType; 5] = [
    PermitType {
        id: "residential-building",
        name: "Residential Building Permit",
        description: "New construction, additions, or major renovations to residential structures",
        category: PermitCategory::Building,
        typical_processing_time: "6-12 weeks",
        required_documents: &[
            "Property Information Sheet",
            "Residential Building Permit Application",
            "Site plan showing setbacks",
            "Floor plans and elevations",
            "Structural calculations (if required)",
            "Critical Areas Review (if applicable)",
        ],
        fees: PermitFees {
            base: "Based on project valuation",
            description: "Use Building Permit Fee Chart to calculate fees",
        },
        notes: &[
            "Presubmission conference may be required",
            "Septic permit often required first",
            "Critical areas review required if within 400 feet of critical areas",
        ],
    },
    PermitType {
        id: "commercial-building",
        name: "Commercial Building Permit",
        description: "Commercial, industrial, or institutional building projects",
        category: PermitCategory::Building,
        typical_processing_time: "8-16 weeks",
        required_documents: &[
            "Property Information Sheet",
            "Non-Residential Building Permit Application",
            "Site plan with parking and utilities",
            "Architectural and engineering plans",
            "Fire department review",
            "Traffic impact analysis (if required)",
            "SEPA environmental review",
        ],
        fees: PermitFees {
            base: "Based on project valuation + plan review",
            description: "Higher fees due to complexity and multiple department reviews",
        },
        notes: &[],
    },
    PermitType {
        id: "adu",
        name: "Accessory Dwelling Unit (ADU)",
        description: "Guest house, family member unit, or granny flat",
        category: PermitCategory::Building,
        typical_processing_time: "4-8 weeks",
        required_documents: &[
            "Property Information Sheet",
            "ADU Application",
            "Site plan showing both structures",
            "Floor plans for ADU",
            "Septic adequacy verification",
        ],
        fees: PermitFees {
            base: "Reduced residential permit fees",
            description: "Special reduced fee structure for ADUs",
        },
        notes: &[],
    },
    PermitType {
        id: "septic",
        name: "Septic System Permit",
        description: "New septic installation or major repairs",
        category: PermitCategory::Septic,
        typical_processing_time: "2-4 weeks",
        required_documents: &[
            "Septic permit application",
            "Soil evaluation",
            "System design plans",
            "Installer certification",
        ],
        fees: PermitFees {
            base: "$500-2000 depending on system type",
            description: "Managed by Environmental Health division",
        },
        notes: &[
            "Often required before building permit",
            "Soil evaluation required first",
            "Licensed installer required",
        ],
    },
    PermitType {
        id: "critical-areas",
        name: "Critical Areas Review",
        description: "Environmental review for projects near sensitive areas",
        category: PermitCategory::LandUse,
        typical_processing_time: "4-12 weeks",
        required_documents: &[
            "Critical areas study",
            "Biological assessment (if required)",
            "Mitigation plan",
            "Habitat management plan",
        ],
        fees: PermitFees {
            base: "$1000-5000+ depending on complexity",
            description: "Requires expert environmental consultants",
        },
        notes: &[
            "Required for projects within 400 feet of wetlands, streams, or steep slopes",
            "Now required concurrently with building applications (SB5290)",
            "May require biological experts for assessment",
        ],
    },
];

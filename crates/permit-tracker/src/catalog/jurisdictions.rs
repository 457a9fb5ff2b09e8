use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessingTimes {
    pub basic: &'static str,
    pub complex: &'static str,
}

/// Permitting authority for a property: the county or one of its cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jurisdiction {
    pub id: &'static str,
    pub name: &'static str,
    pub website: &'static str,
    pub permit_office: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub requires_appointment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_url: Option<&'static str>,
    pub special_requirements: &'static [&'static str],
    pub processing_times: ProcessingTimes,
}

pub fn jurisdictions() -> &'static [Jurisdiction] {
    &JURISDICTIONS
}

pub fn jurisdiction_by_id(id: &str) -> Option<&'static Jurisdiction> {
    JURISDICTIONS.iter().find(|jurisdiction| jurisdiction.id == id)
}

/// Match a free-form name such as "Lacey" or "Thurston County".
///
/// A jurisdiction matches when its display name contains the query (ignoring
/// case) or when its id equals the query slugified with hyphens.
pub fn jurisdiction_by_name(name: &str) -> Option<&'static Jurisdiction> {
    let query = name.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    let slug = query.split_whitespace().collect::<Vec<_>>().join("-");

    JURISDICTIONS.iter().find(|jurisdiction| {
        jurisdiction.name.to_lowercase().contains(&query) || jurisdiction.id == slug
    })
}

/// Resolve by id first, then by name.
pub fn resolve_jurisdiction(value: &str) -> Option<&'static Jurisdiction> {
    jurisdiction_by_id(value.trim()).or_else(|| jurisdiction_by_name(value))
}

static JURISDICTIONS: [Jurisdiction; 7] = [
    Jurisdiction {
        id: "thurston-county",
        name: "Thurston County (Unincorporated)",
        website: "https://www.thurstoncountywa.gov/departments/community-planning-and-economic-development/permitting",
        permit_office: "Building Development Center",
        address: "3000 Pacific Ave SE, Suite 100, Olympia, WA 98501",
        phone: "(360) 786-5490",
        email: "permit@co.thurston.wa.us",
        requires_appointment: true,
        appointment_url: Some("https://www.thurstoncountywa.gov/departments/community-planning-and-economic-development/permitting/building-development-center-bdc-digest"),
        special_requirements: &[
            "SB5290 compliance - only complete application packets accepted (effective March 1, 2025)",
            "Concurrent Critical Areas Review required",
            "Intake appointments required for post-presubmission applications",
            "Applications must be checked at counter before intake",
        ],
        processing_times: ProcessingTimes {
            basic: "Up to 12 weeks for basic residential permits",
            complex: "Up to 1 year for complex projects and land-use reviews",
        },
    },
    Jurisdiction {
        id: "lacey",
        name: "City of Lacey",
        website: "https://cityoflacey.org/building/",
        permit_office: "Community Development",
        address: "420 College St SE, Lacey, WA 98503",
        phone: "(360) 491-3214",
        email: "permits@ci.lacey.wa.us",
        requires_appointment: false,
        appointment_url: None,
        special_requirements: &["Urban Growth Area rules apply"],
        processing_times: ProcessingTimes {
            basic: "2-4 weeks for residential permits",
            complex: "6-12 weeks for commercial projects",
        },
    },
    Jurisdiction {
        id: "olympia",
        name: "City of Olympia",
        website: "https://olympiawa.gov/building",
        permit_office: "Building & Planning Department",
        address: "601 4th Ave E, Olympia, WA 98501",
        phone: "(360) 753-8314",
        email: "planning@olympiawa.gov",
        requires_appointment: true,
        appointment_url: None,
        special_requirements: &[
            "Historic district reviews may apply",
            "Environmental review required for some projects",
        ],
        processing_times: ProcessingTimes {
            basic: "3-6 weeks for residential permits",
            complex: "8-16 weeks for commercial projects",
        },
    },
    Jurisdiction {
        id: "tumwater",
        name: "City of Tumwater",
        website: "https://www.tumwater.wa.gov/building",
        permit_office: "Community Development",
        address: "555 Israel Rd SW, Tumwater, WA 98501",
        phone: "(360) 754-4140",
        email: "permits@tumwater.wa.gov",
        requires_appointment: false,
        appointment_url: None,
        special_requirements: &[],
        processing_times: ProcessingTimes {
            basic: "2-3 weeks for residential permits",
            complex: "4-8 weeks for commercial projects",
        },
    },
    Jurisdiction {
        id: "yelm",
        name: "City of Yelm",
        website: "https://www.yelmwa.gov/building",
        permit_office: "Planning & Building Department",
        address: "105 Yelm Ave W, Yelm, WA 98597",
        phone: "(360) 458-8400",
        email: "building@yelmwa.gov",
        requires_appointment: false,
        appointment_url: None,
        special_requirements: &[],
        processing_times: ProcessingTimes {
            basic: "1-2 weeks for residential permits",
            complex: "3-6 weeks for commercial projects",
        },
    },
    Jurisdiction {
        id: "tenino",
        name: "City of Tenino",
        website: "https://www.tenino.org/building",
        permit_office: "City Hall",
        address: "149 Hodgden St S, Tenino, WA 98589",
        phone: "(360) 264-2368",
        email: "cityhall@tenino.org",
        requires_appointment: false,
        appointment_url: None,
        special_requirements: &[],
        processing_times: ProcessingTimes {
            basic: "1-2 weeks for residential permits",
            complex: "2-4 weeks for commercial projects",
        },
    },
    Jurisdiction {
        id: "bucoda",
        name: "City of Bucoda",
        website: "https://www.bucoda.wa.gov/",
        permit_office: "City Hall",
        address: "110 Main St, Bucoda, WA 98530",
        phone: "(360) 264-2410",
        email: "cityhall@bucoda.wa.gov",
        requires_appointment: false,
        appointment_url: None,
        special_requirements: &[],
        processing_times: ProcessingTimes {
            basic: "1-2 weeks for residential permits",
            complex: "2-3 weeks for commercial projects",
        },
    },
];

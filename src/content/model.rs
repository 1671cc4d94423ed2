//! Documents returned by the upstream content services.
//!
//! Every field defaults when absent so that partially populated documents
//! still map to a page.

use serde::{Deserialize, Serialize};

// =============================================================================
// Bulletins
// =============================================================================

/// A published statistical bulletin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletinDocument {
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Description,
    pub sections: Vec<Section>,
    pub accordion: Vec<Section>,
    pub related_bulletins: Vec<Link>,
    pub related_data: Vec<Link>,
    pub links: Vec<Link>,
    pub charts: Vec<FigureRef>,
    pub tables: Vec<FigureRef>,
    pub images: Vec<FigureRef>,
    pub equations: Vec<FigureRef>,
    pub versions: Vec<Version>,
    pub alerts: Vec<Alert>,
    pub latest_release_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Description {
    pub title: String,
    pub keywords: Vec<String>,
    pub meta_description: String,
    pub summary: String,
    pub edition: String,
    pub national_statistic: bool,
    pub release_date: String,
    pub next_release: String,
    pub latest_release: bool,
    pub dataset_id: String,
    pub survey: String,
    pub contact: Contact,
    pub unit: String,
    pub pre_unit: String,
    pub source: String,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub telephone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: String,
    pub markdown: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub title: String,
    pub uri: String,
}

/// A reference from a bulletin to one of its charts, tables, images or equations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureRef {
    pub title: String,
    pub filename: String,
    pub version: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Version {
    pub release_date: String,
    pub notice: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub date: String,
    pub markdown: String,
}

// =============================================================================
// Ad hoc releases
// =============================================================================

/// A one-off release made on request (`static_adhoc`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdHocDocument {
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Description,
    pub downloads: Vec<Download>,
    pub markdown: Vec<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Download {
    pub title: String,
    pub file: String,
}

// =============================================================================
// Navigation and site chrome
// =============================================================================

/// One ancestor of the requested page, root first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breadcrumb {
    pub uri: String,
    pub description: BreadcrumbDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbDescription {
    pub title: String,
}

impl Breadcrumb {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            description: BreadcrumbDescription {
                title: title.into(),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.description.title
    }
}

/// Site-wide messaging published on the homepage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomepageContent {
    pub service_message: String,
    pub emergency_banner: EmergencyBanner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyBanner {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub uri: String,
    pub link_text: String,
}

// =============================================================================
// Resource side-cars
// =============================================================================

/// Metadata describing an embedded chart, table, image or equation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Figure {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub subtitle: String,
    pub uri: String,
    pub filename: String,
    pub source: String,
    pub notes: String,
    pub alt_text: String,
    /// Equation source for equations
    pub content: String,
    pub files: Vec<FigureFile>,
}

/// A downloadable or displayable variant of a figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigureFile {
    #[serde(rename = "type")]
    pub kind: String,
    pub filename: String,
    pub file_type: String,
}

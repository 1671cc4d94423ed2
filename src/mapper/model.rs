//! Page view models handed to the templates.
//!
//! Field names are snake_case; templates address them directly, e.g.
//! `{{ page.metadata.title }}` or `{% for view in contents_view %}`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::content::model::{Alert, Contact, Download, EmergencyBanner, FigureRef, Link, Section, Version};

// =============================================================================
// Shared page chrome
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasePage {
    pub language: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub uri: String,
    pub metadata: Metadata,
    pub breadcrumb: Vec<Crumb>,
    pub pattern_library_assets_path: String,
    pub site_domain: String,
    pub beta_banner_enabled: bool,
    pub service_message: String,
    pub emergency_banner: Banner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Crumb {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Banner {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub uri: String,
    pub link_text: String,
}

impl From<&EmergencyBanner> for Banner {
    fn from(banner: &EmergencyBanner) -> Self {
        Self {
            kind: banner.kind.clone(),
            title: banner.title.clone(),
            description: banner.description.clone(),
            uri: banner.uri.clone(),
            link_text: banner.link_text.clone(),
        }
    }
}

// =============================================================================
// Bulletin page
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulletinPage {
    pub page: BasePage,
    pub language: String,

    pub release_date: String,
    pub summary: String,
    pub edition: String,
    pub national_statistic: bool,
    pub next_release: String,
    pub latest_release: bool,
    pub latest_release_uri: String,
    pub dataset_id: String,
    pub survey: String,
    pub contact: ContactDetails,

    /// `uri` without its final segment
    pub parent_path: String,
    /// Set when the page is an archived version under `.../previous/...`
    pub corrected_path: Option<String>,
    pub census_2021: bool,
    pub about_the_data: bool,

    pub sections: Vec<SectionView>,
    pub accordion: Vec<SectionView>,
    pub related_bulletins: Vec<LinkView>,
    pub related_data: Vec<LinkView>,
    pub links: Vec<LinkView>,
    pub charts: Vec<FigureView>,
    pub tables: Vec<FigureView>,
    pub images: Vec<FigureView>,
    pub equations: Vec<FigureView>,
    /// Newest first
    pub versions: Vec<VersionView>,
    /// Newest first
    pub alerts: Vec<AlertView>,

    pub contents_view: Vec<ContentView>,
    pub table_of_contents: TableOfContents,
    pub share_links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub telephone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub markdown: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkView {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FigureView {
    pub title: String,
    pub filename: String,
    pub version: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VersionView {
    pub release_date: String,
    pub notice: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertView {
    pub date: String,
    pub markdown: String,
}

impl From<&Contact> for ContactDetails {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            telephone: contact.telephone.clone(),
        }
    }
}

impl From<&Section> for SectionView {
    fn from(section: &Section) -> Self {
        Self {
            title: section.title.clone(),
            markdown: section.markdown.clone(),
        }
    }
}

impl From<&Link> for LinkView {
    fn from(link: &Link) -> Self {
        Self {
            title: link.title.clone(),
            uri: link.uri.clone(),
        }
    }
}

impl From<&FigureRef> for FigureView {
    fn from(figure: &FigureRef) -> Self {
        Self {
            title: figure.title.clone(),
            filename: figure.filename.clone(),
            version: figure.version.clone(),
            uri: figure.uri.clone(),
        }
    }
}

impl From<&Version> for VersionView {
    fn from(version: &Version) -> Self {
        Self {
            release_date: version.release_date.clone(),
            notice: version.notice.clone(),
            uri: version.uri.clone(),
        }
    }
}

impl From<&Alert> for AlertView {
    fn from(alert: &Alert) -> Self {
        Self {
            date: alert.date.clone(),
            markdown: alert.markdown.clone(),
        }
    }
}

// =============================================================================
// Contents
// =============================================================================

/// Which part of the bulletin a content view entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentList {
    Section,
    Accordion,
    Auxiliary,
}

impl ContentList {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentList::Section => "section",
            ContentList::Accordion => "accordion",
            ContentList::Auxiliary => "auxiliary",
        }
    }
}

/// One entry of the page body, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentView {
    pub list: ContentList,
    pub index: usize,
    pub id: String,
    pub title: String,
    pub markdown: String,
    pub back_to_contents: BackToContents,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackToContents {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableOfContents {
    pub id: String,
    pub title: String,
    pub aria_label: String,
    pub sections: BTreeMap<String, TocSection>,
    pub display_order: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TocSection {
    pub title: String,
}

// =============================================================================
// Ad hoc page
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdHocPage {
    pub page: BasePage,
    pub release_date: String,
    pub reference: String,
    pub body_markdown: Vec<String>,
    pub downloads: Vec<DownloadView>,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DownloadView {
    pub title: String,
    pub file: String,
}

impl From<&Download> for DownloadView {
    fn from(download: &Download) -> Self {
        Self {
            title: download.title.clone(),
            file: download.file.clone(),
        }
    }
}

//! Mapping of upstream documents to page view models.
//!
//! Mapping is pure: the same document, breadcrumbs and context always give the
//! same model, and nothing here performs I/O.

mod contents;
pub mod model;
mod paths;
mod share;

use crate::content::model::{AdHocDocument, Breadcrumb, BulletinDocument, EmergencyBanner};
use crate::locale::Localiser;

pub use contents::{build_contents_view, build_table_of_contents};
pub use model::{AdHocPage, BasePage, BulletinPage, Crumb, Metadata};
pub use paths::{corrected_path, is_previous_version, parent_path};
pub use share::{canonical_url, share_links};

use model::{AlertView, SectionView, VersionView};

const CENSUS_SURVEY: &str = "census";
const CANONICAL_HOME: &str = "Home";

/// Request details the bulletin model depends on.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub language: String,
    pub request_protocol: String,
    pub site_domain: String,
    pub service_message: String,
    pub emergency_banner: EmergencyBanner,
}

pub fn create_bulletin_model(
    base: BasePage,
    bulletin: &BulletinDocument,
    breadcrumbs: &[Breadcrumb],
    context: &PageContext,
    localiser: &Localiser,
) -> BulletinPage {
    let description = &bulletin.description;
    let language = context.language.as_str();

    let mut page = base;
    page.page_type = bulletin.kind.clone();
    page.uri = bulletin.uri.clone();
    page.metadata = Metadata {
        title: description.title.clone(),
        description: description.meta_description.clone(),
        keywords: description.keywords.clone(),
    };
    page.breadcrumb = map_breadcrumbs(breadcrumbs, language, localiser);
    page.service_message = context.service_message.clone();
    page.emergency_banner = (&context.emergency_banner).into();

    let census = description.survey == CENSUS_SURVEY;

    let sections: Vec<SectionView> = bulletin.sections.iter().map(Into::into).collect();
    let accordion: Vec<SectionView> = bulletin.accordion.iter().map(Into::into).collect();
    let contents_view = build_contents_view(&sections, &accordion, census, language, localiser);
    let table_of_contents = build_table_of_contents(&contents_view, language, localiser);

    let mut versions: Vec<VersionView> = bulletin.versions.iter().map(Into::into).collect();
    versions.sort_by(|a, b| b.release_date.cmp(&a.release_date));
    let mut alerts: Vec<AlertView> = bulletin.alerts.iter().map(Into::into).collect();
    alerts.sort_by(|a, b| b.date.cmp(&a.date));

    let url = canonical_url(
        &context.request_protocol,
        language,
        &context.site_domain,
        &bulletin.uri,
    );

    BulletinPage {
        page,
        language: context.language.clone(),
        release_date: description.release_date.clone(),
        summary: description.summary.clone(),
        edition: description.edition.clone(),
        national_statistic: description.national_statistic,
        next_release: description.next_release.clone(),
        latest_release: description.latest_release,
        latest_release_uri: bulletin.latest_release_uri.clone(),
        dataset_id: description.dataset_id.clone(),
        survey: description.survey.clone(),
        contact: (&description.contact).into(),
        parent_path: parent_path(&bulletin.uri).to_string(),
        corrected_path: corrected_path(&bulletin.uri),
        census_2021: census,
        about_the_data: census,
        sections,
        accordion,
        related_bulletins: project(&bulletin.related_bulletins),
        related_data: project(&bulletin.related_data),
        links: project(&bulletin.links),
        charts: project(&bulletin.charts),
        tables: project(&bulletin.tables),
        images: project(&bulletin.images),
        equations: project(&bulletin.equations),
        versions,
        alerts,
        contents_view,
        table_of_contents,
        share_links: share_links(&description.title, &url),
    }
}

pub fn create_adhoc_model(
    base: BasePage,
    adhoc: &AdHocDocument,
    breadcrumbs: &[Breadcrumb],
    localiser: &Localiser,
) -> AdHocPage {
    let description = &adhoc.description;

    let mut page = base;
    page.page_type = adhoc.kind.clone();
    page.uri = adhoc.uri.clone();
    page.metadata = Metadata {
        title: description.title.clone(),
        description: description.meta_description.clone(),
        keywords: description.keywords.clone(),
    };
    let language = page.language.clone();
    page.breadcrumb = map_breadcrumbs(breadcrumbs, &language, localiser);

    AdHocPage {
        page,
        release_date: description.release_date.clone(),
        reference: description.reference.clone(),
        body_markdown: adhoc.markdown.clone(),
        downloads: adhoc.downloads.iter().map(Into::into).collect(),
        links: project(&adhoc.links),
    }
}

/// Breadcrumbs as page crumbs, with a leading "Home" localised.
pub fn map_breadcrumbs(
    breadcrumbs: &[Breadcrumb],
    language: &str,
    localiser: &Localiser,
) -> Vec<Crumb> {
    breadcrumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            let title = if i == 0 && crumb.title() == CANONICAL_HOME {
                localiser.get(language, "BreadcrumbHome", 1)
            } else {
                crumb.title().to_string()
            };
            Crumb {
                title,
                uri: crumb.uri.clone(),
            }
        })
        .collect()
}

fn project<'a, T: 'a, V: From<&'a T>>(items: &'a [T]) -> Vec<V> {
    items.iter().map(V::from).collect()
}

#[cfg(test)]
mod tests {
    use crate::content::model::{Alert, Description, FigureRef, Section, Version};

    use super::*;

    fn localiser() -> Localiser {
        Localiser::embedded().unwrap()
    }

    fn context(language: &str) -> PageContext {
        PageContext {
            language: language.to_string(),
            request_protocol: "https".to_string(),
            site_domain: "site.test".to_string(),
            ..Default::default()
        }
    }

    fn base(language: &str) -> BasePage {
        BasePage {
            language: language.to_string(),
            site_domain: "site.test".to_string(),
            ..Default::default()
        }
    }

    fn bulletin() -> BulletinDocument {
        BulletinDocument {
            uri: "/economy/grossdomesticproduct/bulletins/gdp/2024".to_string(),
            kind: "bulletin".to_string(),
            description: Description {
                title: "GDP first quarterly estimate".to_string(),
                meta_description: "Latest GDP".to_string(),
                keywords: vec!["gdp".to_string()],
                release_date: "2024-05-10".to_string(),
                ..Default::default()
            },
            sections: vec![Section {
                title: "Main points".to_string(),
                markdown: "Up 0.6%".to_string(),
            }],
            accordion: vec![Section {
                title: "Glossary".to_string(),
                markdown: "Terms".to_string(),
            }],
            ..Default::default()
        }
    }

    fn version(date: &str, uri: &str) -> Version {
        Version {
            release_date: date.to_string(),
            uri: uri.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_versions_sorted_newest_first_stably() {
        let mut doc = bulletin();
        doc.versions = vec![
            version("2021-01-01", "/v1"),
            version("2023-01-01", "/v2"),
            version("2022-01-01", "/v3"),
            version("2023-01-01", "/v4"),
        ];
        doc.alerts = vec![
            Alert {
                date: "2020-01-01".to_string(),
                markdown: "old".to_string(),
            },
            Alert {
                date: "2024-01-01".to_string(),
                markdown: "new".to_string(),
            },
        ];

        let model = create_bulletin_model(base("en"), &doc, &[], &context("en"), &localiser());

        let uris: Vec<&str> = model.versions.iter().map(|v| v.uri.as_str()).collect();
        assert_eq!(uris, vec!["/v2", "/v4", "/v3", "/v1"]);
        assert_eq!(model.alerts[0].markdown, "new");
    }

    #[test]
    fn test_alerts_with_same_date_keep_input_order() {
        let alert = |date: &str, markdown: &str| Alert {
            date: date.to_string(),
            markdown: markdown.to_string(),
        };
        let mut doc = bulletin();
        doc.alerts = vec![
            alert("2023-06-01", "first"),
            alert("2022-01-01", "older"),
            alert("2023-06-01", "second"),
            alert("2023-06-01", "third"),
        ];

        let model = create_bulletin_model(base("en"), &doc, &[], &context("en"), &localiser());

        let order: Vec<&str> = model.alerts.iter().map(|a| a.markdown.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third", "older"]);
    }

    #[test]
    fn test_previous_version_path_is_corrected() {
        let mut doc = bulletin();
        doc.uri = "/a/b/previous/v1".to_string();

        let model = create_bulletin_model(base("en"), &doc, &[], &context("en"), &localiser());

        assert_eq!(model.parent_path, "/a/b/previous");
        assert_eq!(model.corrected_path.as_deref(), Some("/a/b"));

        let live = create_bulletin_model(base("en"), &bulletin(), &[], &context("en"), &localiser());
        assert_eq!(live.corrected_path, None);
    }

    #[test]
    fn test_contents_view_and_toc_order() {
        let mut doc = bulletin();
        doc.description.survey = "census".to_string();

        let model = create_bulletin_model(base("en"), &doc, &[], &context("en"), &localiser());

        assert!(model.census_2021);
        assert!(model.about_the_data);
        let ids: Vec<&str> = model.contents_view.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["section-0", "accordion-0", "about-the-data"]);
        assert_eq!(model.table_of_contents.display_order, ids);
    }

    #[test]
    fn test_two_sections_and_two_accordion_entries() {
        let section = |title: &str| Section {
            title: title.to_string(),
            markdown: format!("{} text", title),
        };
        let mut doc = bulletin();
        doc.sections = vec![section("Main points"), section("Growth")];
        doc.accordion = vec![section("Glossary"), section("Methods")];

        let model = create_bulletin_model(base("en"), &doc, &[], &context("en"), &localiser());

        assert!(!model.about_the_data);
        let ids: Vec<&str> = model.contents_view.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["section-0", "section-1", "accordion-0", "accordion-1"]);
        let titles: Vec<&str> = model
            .contents_view
            .iter()
            .map(|v| v.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Main points", "Growth", "Glossary", "Methods"]);
        assert_eq!(model.table_of_contents.display_order, ids);
        assert_eq!(model.table_of_contents.sections.len(), 4);
        assert_eq!(model.table_of_contents.sections["accordion-1"].title, "Methods");
    }

    #[test]
    fn test_home_breadcrumb_is_localised() {
        let crumbs = vec![
            Breadcrumb::new("Home", "/"),
            Breadcrumb::new("Economy", "/economy"),
        ];
        let localiser = localiser();

        let welsh = map_breadcrumbs(&crumbs, "cy", &localiser);
        let english = map_breadcrumbs(&crumbs, "en", &localiser);

        assert_eq!(welsh[0].title, "Hafan");
        assert_eq!(welsh[1].title, "Economy");
        assert_eq!(english[0].title, "Home");
        assert_eq!(english[1].uri, "/economy");
    }

    #[test]
    fn test_figures_are_projected_in_place() {
        let figure = |n: usize| FigureRef {
            title: format!("Figure {}", n),
            filename: format!("f{}", n),
            version: n.to_string(),
            uri: format!("/a/f{}", n),
        };
        let mut doc = bulletin();
        doc.charts = vec![figure(1), figure(2)];
        doc.tables = vec![figure(3)];
        doc.images = vec![figure(4)];
        doc.equations = vec![figure(5), figure(6)];

        let model = create_bulletin_model(base("en"), &doc, &[], &context("en"), &localiser());

        for (input, output) in [
            (&doc.charts, &model.charts),
            (&doc.tables, &model.tables),
            (&doc.images, &model.images),
            (&doc.equations, &model.equations),
        ] {
            assert_eq!(input.len(), output.len());
            for (i, o) in input.iter().zip(output) {
                assert_eq!(
                    (&i.title, &i.filename, &i.version, &i.uri),
                    (&o.title, &o.filename, &o.version, &o.uri)
                );
            }
        }
    }

    #[test]
    fn test_page_metadata_and_share_links() {
        let mut ctx = context("cy");
        ctx.service_message = "Maintenance tonight".to_string();
        ctx.emergency_banner.title = "Alert".to_string();

        let model = create_bulletin_model(base("cy"), &bulletin(), &[], &ctx, &localiser());

        assert_eq!(model.page.page_type, "bulletin");
        assert_eq!(model.page.metadata.title, "GDP first quarterly estimate");
        assert_eq!(model.page.metadata.description, "Latest GDP");
        assert_eq!(model.page.service_message, "Maintenance tonight");
        assert_eq!(model.page.emergency_banner.title, "Alert");
        assert_eq!(model.language, "cy");
        assert!(model.share_links["linkedin"].contains("cy.site.test"));
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let mut doc = bulletin();
        doc.versions = vec![version("2021-01-01", "/v1"), version("2021-01-01", "/v2")];
        let crumbs = vec![Breadcrumb::new("Home", "/")];

        let first = create_bulletin_model(base("en"), &doc, &crumbs, &context("en"), &localiser());
        let second = create_bulletin_model(base("en"), &doc, &crumbs, &context("en"), &localiser());

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_uri_without_slash_maps() {
        let mut doc = bulletin();
        doc.uri = "orphan".to_string();

        let model = create_bulletin_model(base("en"), &doc, &[], &context("en"), &localiser());

        assert_eq!(model.parent_path, "");
        assert_eq!(model.corrected_path, None);
    }

    #[test]
    fn test_adhoc_model() {
        let adhoc = AdHocDocument {
            uri: "/aboutus/adhocs/001234".to_string(),
            kind: "static_adhoc".to_string(),
            description: Description {
                title: "Deaths by region".to_string(),
                reference: "001234".to_string(),
                ..Default::default()
            },
            markdown: vec!["Body".to_string()],
            ..Default::default()
        };

        let model = create_adhoc_model(
            base("cy"),
            &adhoc,
            &[Breadcrumb::new("Home", "/")],
            &localiser(),
        );

        assert_eq!(model.page.page_type, "static_adhoc");
        assert_eq!(model.page.breadcrumb[0].title, "Hafan");
        assert_eq!(model.reference, "001234");
        assert_eq!(model.body_markdown, vec!["Body"]);
    }
}

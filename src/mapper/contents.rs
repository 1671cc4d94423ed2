//! Assembly of the page body and its table of contents.

use std::collections::BTreeMap;

use crate::locale::Localiser;

use super::model::{
    BackToContents, ContentList, ContentView, SectionView, TableOfContents, TocSection,
};

const TOC_ID: &str = "toc";
const ABOUT_THE_DATA_ID: &str = "about-the-data";

/// Sections, then accordion entries, then the census "about the data" entry.
pub fn build_contents_view(
    sections: &[SectionView],
    accordion: &[SectionView],
    census: bool,
    language: &str,
    localiser: &Localiser,
) -> Vec<ContentView> {
    let back_to_contents = BackToContents {
        href: format!("#{}", TOC_ID),
        label: localiser.get(language, "BackToContents", 1),
    };
    let entry = |list: ContentList, index: usize, section: &SectionView| ContentView {
        list,
        index,
        id: format!("{}-{}", list.as_str(), index),
        title: section.title.clone(),
        markdown: section.markdown.clone(),
        back_to_contents: back_to_contents.clone(),
    };

    let mut view: Vec<ContentView> = sections
        .iter()
        .enumerate()
        .map(|(i, section)| entry(ContentList::Section, i, section))
        .chain(
            accordion
                .iter()
                .enumerate()
                .map(|(i, section)| entry(ContentList::Accordion, i, section)),
        )
        .collect();

    if census {
        view.push(ContentView {
            list: ContentList::Auxiliary,
            index: 0,
            id: ABOUT_THE_DATA_ID.to_string(),
            title: localiser.get(language, "PageSectionAboutTheData", 1),
            markdown: localiser.get(language, "AboutTheDataMarkdown", 1),
            back_to_contents,
        });
    }

    view
}

/// Table of contents listing every content view entry in display order.
pub fn build_table_of_contents(
    view: &[ContentView],
    language: &str,
    localiser: &Localiser,
) -> TableOfContents {
    let sections: BTreeMap<String, TocSection> = view
        .iter()
        .map(|entry| {
            (
                entry.id.clone(),
                TocSection {
                    title: entry.title.clone(),
                },
            )
        })
        .collect();

    TableOfContents {
        id: TOC_ID.to_string(),
        title: localiser.get(language, "Contents", 1),
        aria_label: localiser.get(language, "TableOfContents", 1),
        sections,
        display_order: view.iter().map(|entry| entry.id.clone()).collect(),
    }
}

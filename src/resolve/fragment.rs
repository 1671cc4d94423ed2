//! HTML fragments substituted for resource tags.

use crate::config::MarkdownConfig;
use crate::content::{ContentError, Figure, FigureFile};
use crate::locale::Localiser;
use crate::mapper::parent_path;
use crate::render::markdown::render_markdown;
use crate::util::{html_escape, human_file_size, last_segment};

use super::ResourceReader;
use super::tags::TagKind;

/// Chart and table download formats: (query format, label).
const CHART_DOWNLOADS: &[(&str, &str)] = &[("csv", "CSV"), ("xls", "XLS")];
const TABLE_DOWNLOADS: &[(&str, &str)] = &[("csv", "CSV"), ("xlsx", "XLSX")];

/// Figure text in the language of the page being rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLabels {
    pub source: String,
    pub notes: String,
    pub download: String,
    pub download_as: String,
}

impl FigureLabels {
    pub fn new(localiser: &Localiser, language: &str) -> Self {
        Self {
            source: localiser.get(language, "FigureSource", 1),
            notes: localiser.get(language, "FigureNotes", 1),
            download: localiser.get(language, "DownloadFile", 1),
            download_as: localiser.get(language, "FigureDownloadAs", 1),
        }
    }
}

/// Render the fragment for one tag, fetching whatever the tag needs.
pub(crate) async fn render(
    kind: TagKind,
    path: &str,
    reader: &dyn ResourceReader,
    markdown: &MarkdownConfig,
    labels: &FigureLabels,
) -> Result<String, ContentError> {
    let html = match kind {
        TagKind::Equation => equation(path, reader).await?,
        TagKind::Image => image(path, reader, markdown, labels).await?,
        TagKind::Chart => chart(path, reader, markdown, labels).await?,
        TagKind::Table => table(path, reader, labels).await?,
    };
    Ok(without_blank_lines(&html))
}

async fn equation(path: &str, reader: &dyn ResourceReader) -> Result<String, ContentError> {
    let figure = reader.get_figure(path).await?;

    let body = match find_file(&figure, "generated-svg") {
        Some(svg) => {
            let bytes = reader.get_resource_body(&file_path(&figure, svg)).await?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        None => match find_file(&figure, "generated-png") {
            Some(png) => format!(
                "<img src=\"/resource?uri={}\" alt=\"{}\">",
                html_escape(&file_path(&figure, png)),
                html_escape(&figure.title)
            ),
            None => String::new(),
        },
    };

    let mut html = format!(
        "<figure class=\"figure figure--equation\" id=\"{}\">\n",
        anchor_id(TagKind::Equation, path)
    );
    if !figure.title.is_empty() {
        html.push_str(&format!(
            "<figcaption class=\"figure__title\">{}</figcaption>\n",
            html_escape(&figure.title)
        ));
    }
    html.push_str(&format!("<div class=\"figure__equation\">{}</div>\n", body));
    if !figure.content.is_empty() {
        html.push_str(&format!(
            "<span class=\"visuallyhidden\">{}</span>\n",
            html_escape(&figure.content)
        ));
    }
    html.push_str("</figure>");
    Ok(html)
}

async fn image(
    path: &str,
    reader: &dyn ResourceReader,
    markdown: &MarkdownConfig,
    labels: &FigureLabels,
) -> Result<String, ContentError> {
    let figure = reader.get_figure(path).await?;
    let alt = if figure.alt_text.is_empty() {
        &figure.title
    } else {
        &figure.alt_text
    };

    let mut html = format!(
        "<div class=\"figure figure--image\" id=\"{}\">\n",
        anchor_id(TagKind::Image, path)
    );
    push_heading(&mut html, &figure);
    for file in &figure.files {
        html.push_str(&format!(
            "<img class=\"figure__image\" src=\"/resource?uri={}\" alt=\"{}\">\n",
            html_escape(&file_path(&figure, file)),
            html_escape(alt)
        ));
    }
    push_source_and_notes(&mut html, &figure, markdown, labels);

    if !figure.files.is_empty() {
        html.push_str("<div class=\"figure__downloads\">\n");
        for file in &figure.files {
            let href = file_path(&figure, file);
            let size = reader.get_file_size(&href).await.ok().map(human_file_size);
            html.push_str(&download_button(
                labels,
                &format!("/file?uri={}", href),
                &figure.title,
                &file.file_type.to_uppercase(),
                size.as_deref(),
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>");
    Ok(html)
}

async fn chart(
    path: &str,
    reader: &dyn ResourceReader,
    markdown: &MarkdownConfig,
    labels: &FigureLabels,
) -> Result<String, ContentError> {
    let figure = reader.get_figure(path).await?;
    let uri = figure_uri(&figure, path);
    let alt = if figure.alt_text.is_empty() {
        &figure.title
    } else {
        &figure.alt_text
    };

    let mut html = format!(
        "<figure class=\"figure figure--chart\" id=\"{}\">\n",
        anchor_id(TagKind::Chart, path)
    );
    push_heading(&mut html, &figure);
    html.push_str(&format!(
        "<img class=\"figure__image\" src=\"/chartimage?uri={}\" alt=\"{}\">\n",
        html_escape(uri),
        html_escape(alt)
    ));
    push_source_and_notes(&mut html, &figure, markdown, labels);

    html.push_str("<div class=\"figure__downloads\">\n");
    html.push_str(&download_button(
        labels,
        &format!("/chartimage?uri={}", uri),
        &figure.title,
        "PNG",
        None,
    ));
    for (format, label) in CHART_DOWNLOADS {
        html.push_str(&download_button(
            labels,
            &format!("/generator?format={}&uri={}", format, uri),
            &figure.title,
            label,
            None,
        ));
    }
    html.push_str("</div>\n</figure>");
    Ok(html)
}

async fn table(
    path: &str,
    reader: &dyn ResourceReader,
    labels: &FigureLabels,
) -> Result<String, ContentError> {
    let figure = reader.get_figure(path).await?;
    let uri = figure_uri(&figure, path);

    let source = reader.get_resource_body(&format!("{}.json", uri)).await?;
    let rendered = reader.render_table(source).await?;

    let mut html = format!(
        "<div class=\"figure figure--table\" id=\"{}\">\n{}\n",
        anchor_id(TagKind::Table, path),
        rendered
    );
    html.push_str("<div class=\"figure__downloads\">\n");
    for (format, label) in TABLE_DOWNLOADS {
        html.push_str(&download_button(
            labels,
            &format!("/generator?format={}&uri={}", format, uri),
            &figure.title,
            label,
            None,
        ));
    }
    html.push_str("</div>\n</div>");
    Ok(html)
}

fn push_heading(html: &mut String, figure: &Figure) {
    if !figure.title.is_empty() {
        html.push_str(&format!(
            "<h4 class=\"figure__title\">{}</h4>\n",
            html_escape(&figure.title)
        ));
    }
    if !figure.subtitle.is_empty() {
        html.push_str(&format!(
            "<h5 class=\"figure__subtitle\">{}</h5>\n",
            html_escape(&figure.subtitle)
        ));
    }
}

fn push_source_and_notes(
    html: &mut String,
    figure: &Figure,
    markdown: &MarkdownConfig,
    labels: &FigureLabels,
) {
    if !figure.source.is_empty() {
        html.push_str(&format!(
            "<p class=\"figure__source\">{}: {}</p>\n",
            html_escape(&labels.source),
            html_escape(&figure.source)
        ));
    }
    if !figure.notes.is_empty() {
        let notes = render_markdown(&figure.notes, markdown)
            .unwrap_or_else(|_| format!("<p>{}</p>", html_escape(&figure.notes)));
        html.push_str(&format!(
            "<div class=\"figure__notes\">\n<h6 class=\"figure__notes-title\">{}</h6>\n{}</div>\n",
            html_escape(&labels.notes),
            notes
        ));
    }
}

fn download_button(
    labels: &FigureLabels,
    href: &str,
    title: &str,
    label: &str,
    size: Option<&str>,
) -> String {
    let aria = format!("{} {} {} {}", labels.download, title, labels.download_as, label);
    let (text, aria) = match size {
        Some(size) => (format!("{} ({})", label, size), format!("{} ({})", aria, size)),
        None => (label.to_string(), aria),
    };
    format!(
        "<a class=\"btn btn--secondary\" href=\"{}\" aria-label=\"{}\">{}</a>\n",
        html_escape(href),
        html_escape(&aria),
        html_escape(&text)
    )
}

fn find_file<'a>(figure: &'a Figure, kind: &str) -> Option<&'a FigureFile> {
    figure.files.iter().find(|file| file.kind == kind)
}

/// Files live next to the figure's own side-car.
fn file_path(figure: &Figure, file: &FigureFile) -> String {
    format!("{}/{}", parent_path(&figure.uri), file.filename)
}

fn figure_uri<'a>(figure: &'a Figure, path: &'a str) -> &'a str {
    if figure.uri.is_empty() {
        path
    } else {
        &figure.uri
    }
}

fn anchor_id(kind: TagKind, path: &str) -> String {
    format!("{}-{}", kind.as_str(), last_segment(path))
}

/// A blank line would end the HTML block the fragment sits in.
fn without_blank_lines(html: &str) -> String {
    html.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

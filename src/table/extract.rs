// src/table/extract.rs

use scraper::{ElementRef, Html};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use super::dom::{document_order, find_first, find_following, normalize_text};
use super::slug::slugify;
use super::{PageDataset, DATE_COLUMN, MIDPOINT_COLUMN};
use crate::config::Config;
use crate::error::{ScrapeError, Stage};
use crate::fetch::PageFetcher;
use crate::sources::SourceReference;

/// Fetch one projection page and pull out its dot-plot table.
#[instrument(level = "info", skip_all, fields(url = %reference.url, date = %reference.meeting_date))]
pub async fn extract_table(
    config: &Config,
    fetcher: &dyn PageFetcher,
    reference: &SourceReference,
) -> Result<PageDataset, ScrapeError> {
    let html = fetcher
        .fetch(&reference.url)
        .await
        .map_err(|source| ScrapeError::Fetch {
            stage: Stage::TableExtraction,
            url: reference.url.clone(),
            source,
        })?;

    let page = parse_page(config, reference, &html)?;
    info!(rows = page.len(), columns = page.columns.len(), "extracted table");
    Ok(page)
}

/// Parse an already-fetched projection page.
pub fn parse_page(
    config: &Config,
    reference: &SourceReference,
    html: &str,
) -> Result<PageDataset, ScrapeError> {
    let url = reference.url.as_str();
    let doc = Html::parse_document(html);
    let nodes = document_order(&doc);

    let phrase = normalize_text(&config.anchor_phrase);
    let anchor = find_first(&nodes, &config.heading_tags, |text| {
        normalize_text(text).contains(&phrase)
    })
    .ok_or_else(|| ScrapeError::AnchorNotFound {
        url: url.to_string(),
    })?;

    let table = find_following(&nodes, anchor, "table")
        .map(|i| nodes[i])
        .ok_or_else(|| ScrapeError::TableNotFound {
            url: url.to_string(),
        })?;

    let labels: Vec<String> = child(table, "thead")
        .and_then(|thead| child(thead, "tr"))
        .map(|tr| cells(tr).map(|c| cell_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();
    if labels.is_empty() {
        return Err(ScrapeError::HeaderRowNotFound {
            url: url.to_string(),
        });
    }
    debug!(?labels, "header row");
    let columns = column_names(&labels);

    let mut rows = Vec::new();
    if let Some(tbody) = child(table, "tbody") {
        for (i, tr) in children(tbody, "tr").enumerate() {
            let row: Vec<Option<String>> = cells(tr).map(cell_text).collect();
            if row.len() != columns.len() {
                return Err(ScrapeError::RowColumnMismatch {
                    url: url.to_string(),
                    row: i + 1,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }
    }
    if rows.is_empty() {
        warn!(%url, "projections table has no body rows");
    }

    Ok(PageDataset {
        url: url.to_string(),
        meeting_date: reference.meeting_date,
        columns,
        rows,
    })
}

/// Slugify header labels into column names. Position 0 becomes `midpoint`;
/// blanks become `column_<n>`; clashes (including with `date`) get `_2`, `_3`, ...
fn column_names(labels: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = [DATE_COLUMN, MIDPOINT_COLUMN]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut names = Vec::with_capacity(labels.len());

    for (i, label) in labels.iter().enumerate() {
        if i == 0 {
            names.push(MIDPOINT_COLUMN.to_string());
            continue;
        }
        let slug = slugify(label);
        let base = if slug.is_empty() {
            format!("column_{}", i + 1)
        } else {
            slug
        };
        let mut name = base.clone();
        let mut n = 2;
        while used.contains(&name) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        used.insert(name.clone());
        names.push(name);
    }
    names
}

fn children<'a>(el: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |c| c.value().name() == tag)
}

fn child<'a>(el: ElementRef<'a>, tag: &'a str) -> Option<ElementRef<'a>> {
    children(el, tag).next()
}

fn cells(tr: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "th" | "td"))
}

fn cell_text(cell: ElementRef<'_>) -> Option<String> {
    let text: String = cell.text().collect();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

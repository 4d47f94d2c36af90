use crate::models::{
    HeadingStats, ImageStats, LinkRef, LinkStats, PageMetrics, TextMetric, now_timestamp,
};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Recommended title length in characters
pub const TITLE_RANGE: RangeInclusive<usize> = 30..=60;
/// Recommended meta description length in characters
pub const META_DESCRIPTION_RANGE: RangeInclusive<usize> = 120..=160;

const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

// Cached selectors to avoid repeated parsing
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body selector should be valid"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector should be valid")
});
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("img selector should be valid"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("a[href] selector should be valid"));
static HEADING_SELECTORS: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    HEADING_LEVELS
        .iter()
        .map(|level| {
            (
                *level,
                Selector::parse(level).expect("heading selector should be valid"),
            )
        })
        .collect()
});

/// Scans a parsed document for on-page SEO signals. Every metric is computed
/// on its own; anything missing from the page shows up as an empty or zero value.
pub struct PageExtractor;

impl PageExtractor {
    /// Builds the metrics for `document`. `loading_time` is left at zero for the
    /// caller to fill in.
    pub fn extract(url: &str, document: &Html) -> PageMetrics {
        PageMetrics {
            url: url.to_string(),
            word_count: Self::word_count(document),
            title: Self::title(document),
            meta_description: Self::meta_description(document),
            images: Self::images(document),
            headings: Self::headings(document),
            links: Self::links(document),
            loading_time: 0,
            timestamp: now_timestamp(),
        }
    }

    pub fn word_count(document: &Html) -> usize {
        document
            .select(&BODY_SELECTOR)
            .map(|body| body.text().collect::<String>().split_whitespace().count())
            .sum()
    }

    pub fn title(document: &Html) -> TextMetric {
        let title: String = document
            .select(&TITLE_SELECTOR)
            .flat_map(|el| el.text())
            .collect();

        text_metric(title.trim(), &TITLE_RANGE)
    }

    pub fn meta_description(document: &Html) -> TextMetric {
        let description = document
            .select(&META_DESC_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("content"))
            .unwrap_or_default();

        text_metric(description, &META_DESCRIPTION_RANGE)
    }

    pub fn images(document: &Html) -> ImageStats {
        let mut total = 0;
        let mut missing_alt = 0;

        for image in document.select(&IMG_SELECTOR) {
            total += 1;
            let has_alt = image
                .value()
                .attr("alt")
                .is_some_and(|alt| !alt.trim().is_empty());
            if !has_alt {
                missing_alt += 1;
            }
        }

        let with_alt = total - missing_alt;
        ImageStats {
            total,
            missing_alt,
            with_alt,
            alt_percentage: alt_percentage(with_alt, total),
        }
    }

    pub fn headings(document: &Html) -> HeadingStats {
        let mut structure = BTreeMap::new();

        for (level, selector) in HEADING_SELECTORS.iter() {
            let texts: Vec<String> = document.select(selector).map(element_text).collect();
            structure.insert(level.to_string(), texts);
        }

        let h1_count = structure.get("h1").map_or(0, Vec::len);
        let total_count = structure.values().map(Vec::len).sum();

        HeadingStats {
            structure,
            h1_count,
            total_count,
        }
    }

    pub fn links(document: &Html) -> LinkStats {
        let mut total = 0;
        let mut internal_links = Vec::new();
        let mut external_links = Vec::new();

        for element in document.select(&LINK_SELECTOR) {
            total += 1;
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let link = LinkRef {
                href: href.to_string(),
                text: element_text(element),
            };
            match classify_href(href) {
                LinkKind::Internal => internal_links.push(link),
                LinkKind::External => external_links.push(link),
                LinkKind::Ignored => {}
            }
        }

        LinkStats {
            total,
            internal: internal_links.len(),
            external: external_links.len(),
            internal_links,
            external_links,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
    /// Empty, in-page fragment or `javascript:` links
    Ignored,
}

/// Partitions an href by prefix alone; no URL resolution happens here.
pub fn classify_href(href: &str) -> LinkKind {
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        LinkKind::Ignored
    } else if href.starts_with("http") || href.starts_with("//") {
        LinkKind::External
    } else {
        LinkKind::Internal
    }
}

/// Share of images with alt text, rounded to a whole percent. A page without
/// images counts as fully covered.
pub fn alt_percentage(with_alt: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((with_alt as f64 / total as f64) * 100.0).round() as u8
}

fn text_metric(content: &str, optimal: &RangeInclusive<usize>) -> TextMetric {
    let length = content.chars().count();
    TextMetric {
        content: content.to_string(),
        length,
        is_optimal: optimal.contains(&length),
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

//! Structural summaries of SVG and HTML strings.
//!
//! These are text scanners, not parsers. Tags are found by substring and
//! pattern matching on the raw input, which keeps them total over any string
//! and cheap to run, at the cost of precision:
//!
//! - An SVG is "valid" when the text contains both `<svg` and `</svg>`
//!   anywhere, in any order.
//! - Element counts are prefix counts: `<g` also counts `<glyph`, and `<p`
//!   also counts `<path` and `<pre`.
//! - Heading text is the raw inner text of a single-line `<hN>...</hN>` pair,
//!   markup included.
//!
//! ## Heading Order
//!
//! [`analyze_html`] lists headings grouped by level: every `h1`, then every
//! `h2`, then every `h3`, each group in document order. Pass
//! [`HeadingOrder::Document`] to [`analyze_html_with`] to get a single list in
//! document order instead.

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::LazyLock;

static VIEW_BOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"viewBox=["']([^"']*)["']"#).expect("static pattern compiles"));

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title[^>]*>(.*?)</title>").expect("static pattern compiles"));

static HEADINGS: LazyLock<[(u8, Regex); 3]> = LazyLock::new(|| {
    [1u8, 2, 3].map(|level| {
        let pattern = format!(r"<h{level}[^>]*>(.*?)</h{level}>");
        (level, Regex::new(&pattern).expect("static pattern compiles"))
    })
});

/// Outcome of analyzing one string: either not recognized, or a summary.
///
/// Serializes as `{"valid": false}` or as the summary's fields plus
/// `"valid": true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis<T> {
    Invalid,
    Valid(T),
}

impl<T> Analysis<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Analysis::Valid(_))
    }

    pub fn summary(&self) -> Option<&T> {
        match self {
            Analysis::Valid(summary) => Some(summary),
            Analysis::Invalid => None,
        }
    }

    pub fn into_summary(self) -> Option<T> {
        match self {
            Analysis::Valid(summary) => Some(summary),
            Analysis::Invalid => None,
        }
    }
}

impl<T: Serialize> Serialize for Analysis<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T> {
            valid: bool,
            #[serde(flatten)]
            summary: Option<&'a T>,
        }
        Tagged {
            valid: self.is_valid(),
            summary: self.summary(),
        }
        .serialize(serializer)
    }
}

pub type SvgAnalysis = Analysis<SvgSummary>;
pub type HtmlAnalysis = Analysis<HtmlSummary>;

/// Occurrences of each SVG element opener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub paths: usize,
    pub circles: usize,
    pub rects: usize,
    pub texts: usize,
    pub groups: usize,
}

impl ElementCounts {
    pub fn total(&self) -> usize {
        self.paths + self.circles + self.rects + self.texts + self.groups
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgSummary {
    /// First `viewBox` attribute value, verbatim.
    pub view_box: Option<String>,
    pub element_counts: ElementCounts,
    /// Inner text of the first `<title>`.
    pub title: Option<String>,
    /// Sum of all element counts.
    pub complexity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlSummary {
    pub headings: Vec<Heading>,
    pub paragraph_count: usize,
    pub image_count: usize,
    /// At least one heading or paragraph was found.
    pub has_structure: bool,
}

/// How [`analyze_html_with`] orders the headings it finds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingOrder {
    /// All `h1`, then all `h2`, then all `h3`.
    #[default]
    Grouped,
    /// As they appear in the text.
    Document,
}

/// Summarize an SVG string.
pub fn analyze_svg(content: &str) -> SvgAnalysis {
    if !(content.contains("<svg") && content.contains("</svg>")) {
        return Analysis::Invalid;
    }

    let view_box = VIEW_BOX
        .captures(content)
        .map(|caps| caps[1].to_string());

    let element_counts = ElementCounts {
        paths: content.matches("<path").count(),
        circles: content.matches("<circle").count(),
        rects: content.matches("<rect").count(),
        texts: content.matches("<text").count(),
        groups: content.matches("<g").count(),
    };

    let title = TITLE.captures(content).map(|caps| caps[1].to_string());

    Analysis::Valid(SvgSummary {
        view_box,
        element_counts,
        title,
        complexity: element_counts.total(),
    })
}

/// Summarize an HTML string, headings grouped by level.
pub fn analyze_html(content: &str) -> HtmlAnalysis {
    analyze_html_with(content, HeadingOrder::Grouped)
}

pub fn analyze_html_with(content: &str, order: HeadingOrder) -> HtmlAnalysis {
    if content.is_empty() {
        return Analysis::Invalid;
    }

    let mut found: Vec<(usize, Heading)> = Vec::new();
    for (level, pattern) in HEADINGS.iter() {
        for caps in pattern.captures_iter(content) {
            let start = caps.get(0).map_or(0, |m| m.start());
            found.push((
                start,
                Heading {
                    level: *level,
                    text: caps[1].to_string(),
                },
            ));
        }
    }
    if order == HeadingOrder::Document {
        found.sort_by_key(|(start, _)| *start);
    }
    let headings: Vec<Heading> = found.into_iter().map(|(_, h)| h).collect();

    let paragraph_count = content.matches("<p").count();
    let image_count = content.matches("<img").count();

    Analysis::Valid(HtmlSummary {
        has_structure: !headings.is_empty() || paragraph_count > 0,
        headings,
        paragraph_count,
        image_count,
    })
}

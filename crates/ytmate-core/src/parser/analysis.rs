//! Analysis results parser
//!
//! Parses the HTML fragment returned by the upstream analyze endpoint
//! and extracts the title, thumbnail and one [`DownloadOption`] per
//! recognizable results row.
//!
//! The markup contract is whatever the upstream currently serves:
//! - `#video_title` holds the title, `.img-thumbnail` the thumbnail
//! - each `table.table tr` with exactly three `td` cells is a candidate
//!   row: quality, size, action
//! - the action cell holds either an `<a href>` to `googlevideo.com`
//!   or an element with an inline `download(...)` handler
//! - rows carrying the `noaudio` class are video-only streams

use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{YtMateError, Result};
use crate::types::{AnalysisResult, ConversionParams, DownloadKind, DownloadOption};

/// Host fragment that marks a ready-to-use media link
pub const DIRECT_HOST_FRAGMENT: &str = "googlevideo.com";

/// Prefix an inline handler must start with to be considered
pub const CONVERSION_HANDLER_PREFIX: &str = "download";

/// Row class marking streams without an audio track
pub const NO_AUDIO_CLASS: &str = "noaudio";

/// Seven positional arguments: url, (unused), id, ext, unquoted, note, format
const CONVERSION_CALL_PATTERN: &str =
    r"download\(?'([^']*)','([^']*)','([^']*)','([^']*)',([^,]*),'([^']*)','([^']*)'";

static CONVERSION_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CONVERSION_CALL_PATTERN).expect("conversion call pattern is valid"));

/// Outcome of inspecting one row's action cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Link already points at the media host
    Direct(String),
    /// Inline handler carries conversion parameters
    Conversion(ConversionParams),
    /// Neither shape; the row is dropped
    Unrecognized,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| YtMateError::Parse(format!("Invalid selector {css}: {e:?}")))
}

/// Selectors compiled once per document
struct RowMatchers {
    cell: Selector,
    action: Selector,
}

impl RowMatchers {
    fn new() -> Result<Self> {
        Ok(Self {
            cell: selector("td")?,
            action: selector("a, button")?,
        })
    }
}

/// Parses the analyze HTML fragment into an [`AnalysisResult`]
///
/// # Arguments
/// * `html` - The `result` string of the upstream analyze envelope
///
/// # Returns
/// The title, optional thumbnail and downloads in row order. Rows that
/// do not have exactly three cells, or whose action matches neither
/// known shape, are skipped.
///
/// # Errors
/// Returns `Parse` only if a selector fails to compile
pub fn parse_analysis(html: &str) -> Result<AnalysisResult> {
    let document = Html::parse_document(html);

    let title_selector = selector("#video_title")?;
    let thumbnail_selector = selector(".img-thumbnail")?;
    let row_selector = selector("table.table tr")?;
    let matchers = RowMatchers::new()?;

    let video_title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let thumbnail = document
        .select(&thumbnail_selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(str::to_string);

    let downloads = document
        .select(&row_selector)
        .filter_map(|row| parse_row(&row, &video_title, &matchers))
        .collect();

    Ok(AnalysisResult {
        video_title,
        thumbnail,
        downloads,
    })
}

/// Parses a single `tr` element
///
/// Returns `None` for rows with a cell count other than three and for
/// rows whose action is [`RowAction::Unrecognized`].
fn parse_row(row: &ElementRef, title: &str, matchers: &RowMatchers) -> Option<DownloadOption> {
    let cells: Vec<ElementRef> = row.select(&matchers.cell).collect();
    if cells.len() != 3 {
        return None;
    }

    let quality = collapse_whitespace(&cells[0].text().collect::<String>());
    let size = cells[1].text().collect::<String>().trim().to_string();
    let has_audio = !row.value().classes().any(|class| class == NO_AUDIO_CLASS);

    let action = cells[2].select(&matchers.action).next();
    let href = action.and_then(|el| el.value().attr("href"));
    let onclick = action.and_then(|el| el.value().attr("onclick"));

    let kind = match classify_action(href, onclick, title) {
        RowAction::Direct(url) => DownloadKind::Direct { url },
        RowAction::Conversion(conversion_params) => {
            DownloadKind::ConversionRequired { conversion_params }
        }
        RowAction::Unrecognized => {
            debug!(quality = %quality, "dropping results row with unrecognized action");
            return None;
        }
    };

    Some(DownloadOption {
        kind,
        quality,
        size,
        has_audio,
    })
}

/// Classifies an action element by its `href` and `onclick` attributes
///
/// A `googlevideo.com` link wins over any inline handler on the same
/// element. `title` is copied into the conversion parameters, since the
/// handler itself does not carry it.
///
/// # Example
/// ```
/// use ytmate_core::parser::{RowAction, classify_action};
///
/// let action = classify_action(
///     None,
///     Some("download('https://youtu.be/x','x','id_x','mp3',0,'n1','140')"),
///     "Title",
/// );
/// match action {
///     RowAction::Conversion(params) => assert_eq!(params.id, "id_x"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn classify_action(href: Option<&str>, onclick: Option<&str>, title: &str) -> RowAction {
    if let Some(url) = href
        && url.contains(DIRECT_HOST_FRAGMENT)
    {
        return RowAction::Direct(url.to_string());
    }

    if let Some(handler) = onclick
        && handler.starts_with(CONVERSION_HANDLER_PREFIX)
        && let Some(caps) = CONVERSION_CALL_RE.captures(handler)
    {
        return RowAction::Conversion(params_from_captures(&caps, title));
    }

    RowAction::Unrecognized
}

fn params_from_captures(caps: &Captures, title: &str) -> ConversionParams {
    let arg = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();
    ConversionParams {
        youtube_url: arg(1),
        title: title.to_string(),
        id: arg(3),
        ext: arg(4),
        note: arg(6),
        format: arg(7),
    }
}

/// Trims and collapses runs of whitespace to a single space
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

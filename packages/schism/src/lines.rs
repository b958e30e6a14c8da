//! Grouping word units into visual rows.
//!
//! Rows are inferred from the measured top offset of each word rather than
//! from any line-break model: a word whose top lies at least `threshold` below
//! the first word of the open row starts a new row.

use schism_dom::{BaseDocument, DomError};
use tracing::{debug, trace, warn};

use crate::probe::GeometryProbe;
use crate::snapshot::SourceSnapshot;
use crate::units::UnitTemplates;
use crate::{Mutation, SplitResult};

/// Vertical distance between tops that separates two rows
pub fn line_threshold(font_size: f32, ratio: f32) -> f32 {
    font_size * ratio
}

/// Cluster items into rows by their top offsets, keeping reading order.
///
/// The comparison is signed, so a word that sits higher than the row's
/// first word stays on that row.
pub fn group_rows<T>(items: impl IntoIterator<Item = (T, f32)>, threshold: f32) -> Vec<Vec<T>> {
    let mut rows: Vec<Vec<T>> = Vec::new();
    let mut line_offset: Option<f32> = None;

    for (item, top) in items {
        match (line_offset, rows.last_mut()) {
            (Some(offset), Some(row)) if top - offset < threshold => row.push(item),
            _ => {
                line_offset = Some(top);
                rows.push(vec![item]);
            }
        }
    }
    rows
}

/// The font size row detection is calibrated against.
///
/// An attached host is read directly. A detached host has no computed style,
/// so a hidden copy of its pristine structure is attached under `<body>` (or
/// the document root) just long enough to resolve one.
pub fn reference_font_size(doc: &mut BaseDocument, host: usize, snapshot: &SourceSnapshot) -> f32 {
    if let Some(style) = doc.computed_style(host) {
        return style.font_size;
    }

    let parent = doc.body_id().unwrap_or_else(|| doc.root_id());
    let mut mutator = doc.mutate();
    let stand_in = mutator.instantiate_snapshot(snapshot.structure());
    if let Err(err) = mutator.set_style_property(stand_in, "display", "none") {
        warn!("could not hide stand-in for detached host {host}: {err}");
    }
    mutator.append_children(parent, &[stand_in]);

    let font_size = doc
        .computed_style(stand_in)
        .map(|style| style.font_size)
        .unwrap_or_else(|| doc.default_font_size());
    doc.mutate().remove_and_drop_node(stand_in);

    debug!(host, font_size, "resolved font size of detached host from a stand-in");
    font_size
}

/// Replace the word units under `host` with one unit per visual row.
///
/// Rows whose joined text is empty still get an outer boundary but produce no
/// line unit, so `outers` can be longer than `units`.
pub fn split_lines(
    doc: &mut BaseDocument,
    host: usize,
    words: &SplitResult,
    templates: &UnitTemplates,
    font_size: f32,
    threshold_ratio: f32,
    probe: &dyn GeometryProbe,
) -> Result<SplitResult, DomError> {
    if doc.is_attached(host) {
        doc.resolve_layout()?;
    }

    let threshold = line_threshold(font_size, threshold_ratio);
    let mut unmeasured = 0;
    let measured = words.units().iter().map(|&word| {
        let top = match probe.measure(doc, word, host) {
            Ok(rect) => rect.top,
            Err(err) => {
                if unmeasured == 0 {
                    warn!("measuring word units of host {host} failed, treating them as one row: {err}");
                }
                unmeasured += 1;
                0.0
            }
        };
        (word, top)
    });
    let rows = group_rows(measured, threshold);

    let texts: Vec<String> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|word| doc.inner_html(*word))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    doc.mutate().remove_and_drop_children(host);

    let mut result = SplitResult::new(Mutation::Lines);
    for text in &texts {
        let outer = templates.outer(doc)?;
        doc.mutate().append_children(host, &[outer]);
        result.push_outer(outer);

        if !text.is_empty() {
            let inner = templates.inner(doc, text)?;
            doc.mutate().append_children(outer, &[inner]);
            result.push_unit(inner);
        }
    }

    trace!(
        words = words.units().len(),
        rows = result.outers().len(),
        threshold,
        "grouped words into lines"
    );
    Ok(result)
}

// Copyright 2026 Moodmail Contributors
// SPDX-License-Identifier: Apache-2.0

//! Structural extraction of the mood record from portal HTML.
//!
//! The page is built from undocumented custom elements
//! (`kgr-profile-part`, `kgr-child-mood-picker`) with the day's entry
//! nested inside a `<template slot="content">`. Extraction uses the
//! `scraper` crate for CSS selector-based parsing and degrades gracefully:
//! only a missing mood barometer section is an error, every other absent
//! substructure yields an empty or partial record, because the page
//! legitimately varies day to day (no entry filled in yet, no remark).

use crate::error::{MoodError, MoodResult};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Heading attribute that identifies the mood barometer section.
pub const MOOD_SECTION_HEADING: &str = "Stimmungsbarometer";

/// One labeled mood dimension. The value comes from the mood picker
/// widget's `value` attribute and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodField {
    pub label: String,
    pub value: Option<String>,
}

/// The canonical extraction result for one day's entry.
///
/// `fields` preserves document encounter order. `date` and `remark` are
/// always present, possibly empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoodRecord {
    /// Entry date, taken verbatim from the section's `note` annotation
    /// with the outer parentheses stripped.
    pub date: String,
    pub fields: Vec<MoodField>,
    /// Free-text remark, empty if the entry has none.
    pub remark: String,
}

impl MoodRecord {
    /// Insert a field, overwriting the value of an earlier field with the
    /// same label in place. The page does not guarantee unique labels and
    /// last-one-wins is the established pairing behavior.
    fn push_field(&mut self, label: String, value: Option<String>) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.label == label) {
            existing.value = value;
        } else {
            self.fields.push(MoodField { label, value });
        }
    }

    /// Look up a field value by label, for callers and tests.
    pub fn field(&self, label: &str) -> Option<&MoodField> {
        self.fields.iter().find(|f| f.label == label)
    }
}

/// Pair labels with value containers by document position.
///
/// The source page emits `<dt>` and `<dd>` rows in matched order; there is
/// no key to join on, so position is the only available pairing. If the
/// two sequences differ in length the tail of the longer one is dropped.
/// Precondition on the page, not on this function: matched rows are
/// emitted in the same order.
pub fn pair_by_position<L, V>(labels: Vec<L>, values: Vec<V>) -> Vec<(L, V)> {
    labels.into_iter().zip(values).collect()
}

/// Extract the mood record from the raw child-profile page.
///
/// Fails only when the mood barometer section itself is missing; every
/// other absent substructure degrades to an empty or partial record.
pub fn extract_mood_record(html: &str) -> MoodResult<MoodRecord> {
    let document = Html::parse_document(html);

    let part_sel =
        Selector::parse(&format!(r#"kgr-profile-part[heading="{MOOD_SECTION_HEADING}"]"#))
            .unwrap();
    let part = document
        .select(&part_sel)
        .next()
        .ok_or(MoodError::SectionNotFound)?;

    let mut record = MoodRecord {
        date: strip_outer_parens(part.value().attr("note").unwrap_or("")).to_string(),
        ..MoodRecord::default()
    };

    // The filled-in entry lives inside a content-slot template. Its
    // absence is a valid state: no entry recorded for the day yet.
    let template_sel = Selector::parse(r#"template[slot="content"]"#).unwrap();
    let Some(template) = part.select(&template_sel).next() else {
        return Ok(record);
    };

    // Re-parse the template contents as a fragment so traversal does not
    // depend on how the parser files template children away.
    let content = Html::parse_fragment(&template.inner_html());

    let dl_sel = Selector::parse("dl.kgr-definitionList").unwrap();
    if let Some(dl) = content.select(&dl_sel).next() {
        let dt_sel = Selector::parse("dt").unwrap();
        let dd_sel = Selector::parse("dd").unwrap();

        let labels: Vec<String> = dl.select(&dt_sel).map(|dt| clean_label(dt)).collect();
        let values: Vec<Option<String>> =
            dl.select(&dd_sel).map(|dd| picker_value(dd)).collect();

        for (label, value) in pair_by_position(labels, values) {
            record.push_field(label, value);
        }
    }

    let p_sel = Selector::parse("p").unwrap();
    if let Some(p) = content.select(&p_sel).next() {
        record.remark = element_text(p);
    }

    Ok(record)
}

/// Strip exactly one leading and one trailing parenthesis. The page wraps
/// its date annotation as `(2024-05-01)`; this is not a general trim.
fn strip_outer_parens(s: &str) -> &str {
    let s = s.strip_prefix('(').unwrap_or(s);
    s.strip_suffix(')').unwrap_or(s)
}

/// Trimmed label text with a single trailing colon removed if present.
fn clean_label(dt: ElementRef<'_>) -> String {
    let text = element_text(dt);
    text.strip_suffix(':').unwrap_or(&text).to_string()
}

/// Value of the mood picker widget inside a `<dd>` container, if any.
fn picker_value(dd: ElementRef<'_>) -> Option<String> {
    let picker_sel = Selector::parse("kgr-child-mood-picker").unwrap();
    dd.select(&picker_sel)
        .next()
        .and_then(|picker| picker.value().attr("value"))
        .map(|v| v.to_string())
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

//! Labelled fields embedded in the free-text match header, e.g.
//! `Round: 1 Venue: M.C.G. Date: Thu, 26-Mar-2015 7:20 PM Attendance: 77770`.
//!
//! Every label that is present is located first. A field's value runs from
//! the end of its label to the start of the next label found in the text,
//! so an omitted or reordered field does not disturb its neighbours.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Round,
    Venue,
    Date,
    Attendance,
}

impl MetaField {
    pub const ALL: [MetaField; 4] = [
        MetaField::Round,
        MetaField::Venue,
        MetaField::Date,
        MetaField::Attendance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetaField::Round => "Round:",
            MetaField::Venue => "Venue:",
            MetaField::Date => "Date:",
            MetaField::Attendance => "Attendance:",
        }
    }
}

impl FromStr for MetaField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetaField::ALL
            .into_iter()
            .find(|field| field.label().trim_end_matches(':') == s)
            .ok_or_else(|| format!("Unknown header field '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLookup {
    Found(String),
    NotFound,
    InvalidElement,
}

/// The four header fields of a match page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchHeader {
    pub round: Option<String>,
    pub venue: Option<String>,
    pub date: Option<String>,
    pub attendance: Option<String>,
}

impl MatchHeader {
    pub fn parse(text: &str) -> Self {
        let labels = locate_labels(text);
        let value = |field| field_value(text, &labels, field);

        Self {
            round: value(MetaField::Round),
            venue: value(MetaField::Venue),
            date: value(MetaField::Date),
            attendance: value(MetaField::Attendance),
        }
    }
}

pub fn extract_field(text: &str, name: &str) -> FieldLookup {
    let Ok(field) = name.parse::<MetaField>() else {
        return FieldLookup::InvalidElement;
    };

    match field_value(text, &locate_labels(text), field) {
        Some(value) => FieldLookup::Found(value),
        None => FieldLookup::NotFound,
    }
}

/// (field, label start, label end), sorted by position in the text.
fn locate_labels(text: &str) -> Vec<(MetaField, usize, usize)> {
    let mut labels: Vec<_> = MetaField::ALL
        .into_iter()
        .filter_map(|field| {
            text.find(field.label())
                .map(|start| (field, start, start + field.label().len()))
        })
        .collect();
    labels.sort_by_key(|(_, start, _)| *start);
    labels
}

fn field_value(
    text: &str,
    labels: &[(MetaField, usize, usize)],
    field: MetaField,
) -> Option<String> {
    let position = labels.iter().position(|(f, _, _)| *f == field)?;
    let (_, _, value_start) = labels[position];
    let value_end = labels
        .get(position + 1)
        .map(|(_, start, _)| *start)
        .unwrap_or(text.len());

    let value = text[value_start..value_end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

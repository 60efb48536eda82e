//! Parsing of `key=value` tags embedded in free-text descriptions.
//!
//! Geographic-names records pack structured facts into their description
//! field, e.g. `"population=936; timezone=Europe/Berlin; a lakeside town"`.
//! Exactly two keys are recognized; anything else stays ordinary text, so an
//! unrelated `key=value` snippet in prose is never mis-parsed.

use serde::Serialize;

/// Recognized `key=` prefixes and their display labels.
const RECOGNIZED_MARKERS: [(&str, &str); 2] =
    [("population=", "Population"), ("timezone=", "Timezone")];

/// One structured fact lifted out of a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionTag {
    pub label: String,
    pub value: String,
}

/// Tags extracted from a description plus the residual free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionTags {
    pub tags: Vec<DescriptionTag>,
    pub text: String,
}

impl DescriptionTags {
    fn untagged(text: &str) -> Self {
        Self {
            tags: Vec::new(),
            text: text.to_owned(),
        }
    }
}

/// Split an already-unwrapped description into recognized tags and residual
/// text. Tag order follows the order markers appear in the source.
pub fn parse_description(text: &str) -> DescriptionTags {
    let has_marker = RECOGNIZED_MARKERS
        .iter()
        .any(|(marker, _)| text.contains(marker));
    if !has_marker {
        return DescriptionTags::untagged(text);
    }

    let mut tags = Vec::new();
    let mut residual: Vec<&str> = Vec::new();
    for segment in text.split(';').map(str::trim) {
        match RECOGNIZED_MARKERS
            .iter()
            .find(|(marker, _)| segment.starts_with(marker))
        {
            Some((marker, label)) => tags.push(DescriptionTag {
                label: (*label).to_owned(),
                value: segment[marker.len()..].to_owned(),
            }),
            None if !segment.is_empty() => residual.push(segment),
            None => {}
        }
    }

    DescriptionTags {
        tags,
        text: residual.join(" "),
    }
}

// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Course records as they appear in the data files.
//!
//! Only the fields the build itself reads are named; everything else a
//! record carries is kept, in source order, in its `extra` map so templates
//! still see it.

use crate::links::Link;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The three reference lists that roll up from topics into their event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceList {
    SlidesAndNotes,
    ReferencesPre,
    ReferencesSupplemental,
}

impl ReferenceList {
    pub const ALL: [ReferenceList; 3] = [
        ReferenceList::SlidesAndNotes,
        ReferenceList::ReferencesPre,
        ReferenceList::ReferencesSupplemental,
    ];

    /// Field name used in the data files and templates.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ReferenceList::SlidesAndNotes => "Slides and Notes",
            ReferenceList::ReferencesPre => "References (Pre)",
            ReferenceList::ReferencesSupplemental => "References (Supplemental)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecture {
    #[serde(rename = "Title")]
    pub title: String,

    /// Keyed by date, in declaration order.
    #[serde(rename = "Events", default)]
    pub events: IndexMap<String, Event>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "Topics", default)]
    pub topics: IndexMap<String, TopicEntry>,

    #[serde(rename = "Slides and Notes", default, deserialize_with = "nullable_list")]
    pub slides_and_notes: Vec<Link>,

    #[serde(rename = "References (Pre)", default, deserialize_with = "nullable_list")]
    pub references_pre: Vec<Link>,

    #[serde(
        rename = "References (Supplemental)",
        default,
        deserialize_with = "nullable_list"
    )]
    pub references_supplemental: Vec<Link>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    #[must_use]
    pub fn list(&self, which: ReferenceList) -> &[Link] {
        match which {
            ReferenceList::SlidesAndNotes => &self.slides_and_notes,
            ReferenceList::ReferencesPre => &self.references_pre,
            ReferenceList::ReferencesSupplemental => &self.references_supplemental,
        }
    }

    fn list_mut(&mut self, which: ReferenceList) -> &mut Vec<Link> {
        match which {
            ReferenceList::SlidesAndNotes => &mut self.slides_and_notes,
            ReferenceList::ReferencesPre => &mut self.references_pre,
            ReferenceList::ReferencesSupplemental => &mut self.references_supplemental,
        }
    }

    /// Append every topic's reference lists to this event's lists, topic by
    /// topic in declaration order. Topic lists are left in place.
    ///
    /// Returns the number of entries copied.
    pub fn absorb_topics(&mut self) -> usize {
        let mut copied = 0;
        for which in ReferenceList::ALL {
            let gathered: Vec<Link> = self
                .topics
                .values()
                .filter_map(TopicEntry::details)
                .filter_map(|topic| topic.list(which))
                .flatten()
                .cloned()
                .collect();
            copied += gathered.len();
            self.list_mut(which).extend(gathered);
        }
        copied
    }
}

/// A topic under an event.
///
/// Topics are usually mappings, but a bare note (`Intro: "warm-up"`) or an
/// empty entry (`Intro:`) is accepted too and contributes no references.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicEntry {
    Detailed(Topic),
    Bare(Value),
}

impl TopicEntry {
    #[must_use]
    pub fn details(&self) -> Option<&Topic> {
        match self {
            TopicEntry::Detailed(topic) => Some(topic),
            TopicEntry::Bare(_) => None,
        }
    }
}

impl Serialize for TopicEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TopicEntry::Detailed(topic) => topic.serialize(serializer),
            TopicEntry::Bare(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TopicEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Mappings must parse as topics; malformed links inside them are errors.
        match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(TopicEntry::Detailed)
                .map_err(D::Error::custom),
            other => Ok(TopicEntry::Bare(other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(
        rename = "Slides and Notes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub slides_and_notes: Option<Vec<Link>>,

    #[serde(
        rename = "References (Pre)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub references_pre: Option<Vec<Link>>,

    #[serde(
        rename = "References (Supplemental)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub references_supplemental: Option<Vec<Link>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Topic {
    #[must_use]
    pub fn list(&self, which: ReferenceList) -> Option<&Vec<Link>> {
        match which {
            ReferenceList::SlidesAndNotes => self.slides_and_notes.as_ref(),
            ReferenceList::ReferencesPre => self.references_pre.as_ref(),
            ReferenceList::ReferencesSupplemental => self.references_supplemental.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "Label")]
    pub label: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Names this week's lecture and assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFocus {
    #[serde(rename = "Lecture/Lab")]
    pub lecture_title: String,

    #[serde(rename = "Assignment")]
    pub assignment_label: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeeklyFocus {
    pub const LECTURE_FIELD: &'static str = "Lecture/Lab";
    pub const ASSIGNMENT_FIELD: &'static str = "Assignment";
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<Link>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Link>>::deserialize(deserializer)?.unwrap_or_default())
}

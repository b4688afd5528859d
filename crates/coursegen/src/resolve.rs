// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Load the three data files and link them into one template context.
//!
//! Lecture topics are rolled up into their events, the assignments file is
//! split into front matter and records, and the weekly-focus pointer is
//! matched against both sets. Any failure aborts the whole resolution.

use crate::config::{Layout, file_label};
use crate::error::{Error, PathContext, Result};
use crate::model::{Assignment, Lecture, WeeklyFocus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Fully resolved course data. Owns every record; [`CourseData::document`]
/// borrows them into the shape templates see.
#[derive(Debug, Clone)]
pub struct CourseData {
    lectures: Vec<Lecture>,
    assignments_frontmatter: Value,
    assignments: Vec<Assignment>,
    this_week: WeeklyFocus,
    lecture_index: usize,
    assignment_index: usize,
}

/// Root template context.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<'a> {
    pub lectures: &'a [Lecture],
    pub this_week: ThisWeek<'a>,
    pub assignments_frontmatter: &'a Value,
    pub assignments: &'a [Assignment],
}

/// The weekly-focus record plus the records it names.
#[derive(Debug, Serialize)]
pub struct ThisWeek<'a> {
    #[serde(flatten)]
    pub focus: &'a WeeklyFocus,
    pub lecture: &'a Lecture,
    pub assignment: &'a Assignment,
}

impl CourseData {
    #[must_use]
    pub fn lectures(&self) -> &[Lecture] {
        &self.lectures
    }

    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[must_use]
    pub fn assignments_frontmatter(&self) -> &Value {
        &self.assignments_frontmatter
    }

    #[must_use]
    pub fn this_week(&self) -> &WeeklyFocus {
        &self.this_week
    }

    #[must_use]
    pub fn this_week_lecture(&self) -> &Lecture {
        &self.lectures[self.lecture_index]
    }

    #[must_use]
    pub fn this_week_assignment(&self) -> &Assignment {
        &self.assignments[self.assignment_index]
    }

    #[must_use]
    pub fn document(&self) -> Document<'_> {
        Document {
            lectures: &self.lectures,
            this_week: ThisWeek {
                focus: &self.this_week,
                lecture: self.this_week_lecture(),
                assignment: self.this_week_assignment(),
            },
            assignments_frontmatter: &self.assignments_frontmatter,
            assignments: &self.assignments,
        }
    }
}

/// Read and resolve the data files named by an already-rooted layout.
pub fn resolve(layout: &Layout) -> Result<CourseData> {
    let lectures = parse_lectures(&read(&layout.lectures)?, &layout.lectures)?;
    let (assignments_frontmatter, assignments) =
        parse_assignments(&read(&layout.assignments)?, &layout.assignments)?;
    let this_week = parse_this_week(&read(&layout.this_week)?, &layout.this_week)?;

    let event_count: usize = lectures.iter().map(|l| l.events.len()).sum();
    let lecture_count = lectures.len();
    let assignment_count = assignments.len();
    diagnostics::log_info!(
        "Loaded {lecture_count} lectures with {event_count} events and {assignment_count} assignments",
        lecture_count: lecture_count,
        event_count: event_count,
        assignment_count: assignment_count
    );

    link_this_week(
        lectures,
        assignments_frontmatter,
        assignments,
        this_week,
        &Sources {
            lectures: &layout.lectures,
            assignments: &layout.assignments,
            this_week: &layout.this_week,
        },
    )
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).at(path)
}

/// Parse the lecture list and roll every topic's references up into its event.
pub fn parse_lectures(source: &str, path: &Path) -> Result<Vec<Lecture>> {
    let mut lectures: Vec<Lecture> = serde_yaml_ng::from_str(source).at(path)?;

    for lecture in &mut lectures {
        for (date, event) in &mut lecture.events {
            let copied = event.absorb_topics();
            if copied > 0 {
                let title = lecture.title.as_str();
                let date = date.as_str();
                diagnostics::log_debug!(
                    "Rolled {copied} topic references into {title} on {date}",
                    copied: copied,
                    title: title,
                    date: date
                );
            }
        }
    }

    Ok(lectures)
}

/// Split the assignments file into its front matter and its records.
///
/// The file holds exactly two YAML documents; a third is an error and so is
/// a missing second one.
pub fn parse_assignments(source: &str, path: &Path) -> Result<(Value, Vec<Assignment>)> {
    let mut frontmatter = None;
    let mut assignments = None;

    for (index, document) in serde_yaml_ng::Deserializer::from_str(source).enumerate() {
        match index {
            0 => frontmatter = Some(Value::deserialize(document).at(path)?),
            1 => assignments = Some(Vec::<Assignment>::deserialize(document).at(path)?),
            _ => {
                return Err(Error::TooManyDocuments {
                    path: path.to_path_buf(),
                });
            }
        }
    }

    let frontmatter = frontmatter.ok_or_else(|| Error::MissingDocument {
        path: path.to_path_buf(),
        expected: "front matter",
    })?;
    let assignments = assignments.ok_or_else(|| Error::MissingDocument {
        path: path.to_path_buf(),
        expected: "assignment list",
    })?;
    Ok((frontmatter, assignments))
}

pub fn parse_this_week(source: &str, path: &Path) -> Result<WeeklyFocus> {
    serde_yaml_ng::from_str(source).at(path)
}

/// File names used when a cross-reference fails.
pub struct Sources<'a> {
    pub lectures: &'a Path,
    pub assignments: &'a Path,
    pub this_week: &'a Path,
}

/// Find this week's lecture by `Title` and assignment by `Label`.
///
/// Both lookups are linear scans in file order; the first match wins.
pub fn link_this_week(
    lectures: Vec<Lecture>,
    assignments_frontmatter: Value,
    assignments: Vec<Assignment>,
    this_week: WeeklyFocus,
    sources: &Sources<'_>,
) -> Result<CourseData> {
    let lecture_index = lectures
        .iter()
        .position(|l| l.title == this_week.lecture_title)
        .ok_or_else(|| Error::UnresolvedLecture {
            title: this_week.lecture_title.clone(),
            field: WeeklyFocus::LECTURE_FIELD,
            lectures: file_label(sources.lectures),
            referrer: file_label(sources.this_week),
        })?;

    let assignment_index = assignments
        .iter()
        .position(|a| a.label == this_week.assignment_label)
        .ok_or_else(|| Error::UnresolvedAssignment {
            label: this_week.assignment_label.clone(),
            field: WeeklyFocus::ASSIGNMENT_FIELD,
            assignments: file_label(sources.assignments),
            referrer: file_label(sources.this_week),
        })?;

    Ok(CourseData {
        lectures,
        assignments_frontmatter,
        assignments,
        this_week,
        lecture_index,
        assignment_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::Link;
    use crate::model::ReferenceList;
    use serde_json::json;

    const LECTURES: &str = r#"
- Title: Intro to Systems
  Events:
    2019-03-04:
      Topics:
        Processes:
          Slides and Notes:
            - Slides: http://slides/processes
          References (Pre):
            - http://pre/processes
        Threads:
          Slides and Notes:
            - http://notes/threads
            - Demo: http://demo/threads
    2019-03-06:
      Topics:
        Review: "bring questions"
- Title: Intro to Systems
  Duplicate: true
  Events: {}
- Title: Memory
  Events:
    2019-03-11:
      Topics: {}
"#;

    const ASSIGNMENTS: &str = r#"
Term: Spring 2019
---
- Label: HW1
  Due: 2019-03-08
- Label: HW2
"#;

    fn sources() -> Sources<'static> {
        Sources {
            lectures: Path::new("data/lectures.yml"),
            assignments: Path::new("data/assignments.yml"),
            this_week: Path::new("data/this-week.yml"),
        }
    }

    fn resolve_with(this_week: &str) -> Result<CourseData> {
        let lectures = parse_lectures(LECTURES, Path::new("lectures.yml"))?;
        let (front, assignments) = parse_assignments(ASSIGNMENTS, Path::new("assignments.yml"))?;
        let focus = parse_this_week(this_week, Path::new("this-week.yml"))?;
        link_this_week(lectures, front, assignments, focus, &sources())
    }

    #[test]
    fn topics_roll_up_in_topic_then_entry_order() {
        let lectures = parse_lectures(LECTURES, Path::new("lectures.yml")).unwrap();
        let event = &lectures[0].events["2019-03-04"];
        assert_eq!(
            event.slides_and_notes,
            vec![
                Link::Anchor {
                    text: "Slides".to_string(),
                    url: "http://slides/processes".to_string()
                },
                Link::Plain("http://notes/threads".to_string()),
                Link::Anchor {
                    text: "Demo".to_string(),
                    url: "http://demo/threads".to_string()
                },
            ]
        );
        assert_eq!(
            event.references_pre,
            vec![Link::Plain("http://pre/processes".to_string())]
        );
    }

    #[test]
    fn events_without_topic_lists_have_empty_lists() {
        let lectures = parse_lectures(LECTURES, Path::new("lectures.yml")).unwrap();
        for event in [
            &lectures[0].events["2019-03-06"],
            &lectures[2].events["2019-03-11"],
        ] {
            for which in ReferenceList::ALL {
                assert!(event.list(which).is_empty(), "{}", which.key());
            }
        }
    }

    #[test]
    fn event_order_is_declaration_order() {
        let lectures = parse_lectures(LECTURES, Path::new("lectures.yml")).unwrap();
        let dates: Vec<&str> = lectures[0].events.keys().map(String::as_str).collect();
        assert_eq!(dates, vec!["2019-03-04", "2019-03-06"]);
    }

    #[test]
    fn this_week_links_first_match() {
        let data = resolve_with("Lecture/Lab: Intro to Systems\nAssignment: HW2\n").unwrap();
        assert_eq!(data.this_week_lecture().title, "Intro to Systems");
        assert!(data.this_week_lecture().extra.get("Duplicate").is_none());
        assert_eq!(data.this_week_assignment().label, "HW2");
    }

    #[test]
    fn document_shape() {
        let data = resolve_with("Lecture/Lab: Memory\nAssignment: HW1\nNote: quiz Friday\n").unwrap();
        let doc = serde_json::to_value(data.document()).unwrap();
        assert_eq!(doc["assignmentsFrontmatter"], json!({"Term": "Spring 2019"}));
        assert_eq!(doc["assignments"][0]["Due"], json!("2019-03-08"));
        assert_eq!(doc["thisWeek"]["Lecture/Lab"], json!("Memory"));
        assert_eq!(doc["thisWeek"]["Note"], json!("quiz Friday"));
        assert_eq!(doc["thisWeek"]["lecture"]["Title"], json!("Memory"));
        assert_eq!(doc["thisWeek"]["assignment"]["Label"], json!("HW1"));
        assert_eq!(doc["lectures"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn unknown_lecture_names_title_and_field() {
        let err = resolve_with("Lecture/Lab: Compilers\nAssignment: HW1\n").unwrap_err();
        assert!(matches!(err, Error::UnresolvedLecture { ref title, .. } if title == "Compilers"));
        let message = err.to_string();
        assert!(message.contains("\"Compilers\""), "{message}");
        assert!(message.contains("Lecture/Lab"), "{message}");
        assert!(message.contains("lectures.yml"), "{message}");
        assert!(message.contains("this-week.yml"), "{message}");
    }

    #[test]
    fn unknown_assignment_names_label_and_field() {
        let err = resolve_with("Lecture/Lab: Memory\nAssignment: HW9\n").unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::UnresolvedAssignment { .. }));
        assert!(message.contains("\"HW9\""), "{message}");
        assert!(message.contains("Assignment"), "{message}");
        assert!(message.contains("assignments.yml"), "{message}");
    }

    #[test]
    fn three_documents_is_an_error() {
        let source = "a: 1\n---\n- Label: X\n---\n- Label: Y\n";
        let err = parse_assignments(source, Path::new("assignments.yml")).unwrap_err();
        assert!(matches!(err, Error::TooManyDocuments { .. }));
        assert!(err.to_string().contains("more than two documents"));
    }

    #[test]
    fn single_document_is_an_error() {
        let err = parse_assignments("a: 1\n", Path::new("assignments.yml")).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingDocument { expected: "assignment list", .. }
        ));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = parse_lectures("- Title: [unclosed\n", Path::new("lectures.yml")).unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }));
    }

    #[test]
    fn this_week_requires_both_fields() {
        let err = parse_this_week("Lecture/Lab: Memory\n", Path::new("this-week.yml")).unwrap_err();
        assert!(err.to_string().contains("Assignment"), "{err}");
    }
}

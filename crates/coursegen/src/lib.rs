// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Coursegen — course website builder
//!
//! Loads lectures, assignments and this week's focus from YAML, links them
//! together, and renders one Tera template into a single output file.
//!
//! ```text
//! data/lectures.yml      lectures with dated events and topics
//! data/assignments.yml   front matter, then the assignment list
//! data/this-week.yml     Lecture/Lab + Assignment to feature
//! templates/             partials, one per file
//! ```
//!
//! ```no_run
//! use std::path::Path;
//! coursegen::render(Path::new("index.html.tera"), Path::new("dist/index.html"))?;
//! # Ok::<(), coursegen::Error>(())
//! ```

mod config;
mod error;
pub mod helpers;
pub mod links;
pub mod model;
mod render;
mod resolve;

pub use config::{CONFIG_FILE, Layout};
pub use error::{Error, Result};
pub use links::{Link, LinkError};
pub use model::{Assignment, Event, Lecture, ReferenceList, Topic, TopicEntry, WeeklyFocus};
pub use render::{build_engine, load_partials, render, render_document, render_with};
pub use resolve::{
    CourseData, Document, Sources, ThisWeek, link_this_week, parse_assignments, parse_lectures,
    parse_this_week, resolve,
};

//! Table of contents generation and active-link tracking.
//!
//! Headings without an id receive a positional fallback `section-<index>`.
//! A fallback may collide with an authored id elsewhere on the page; that
//! collision is reported through [`TocPlan::duplicate_ids`] but never rewritten.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::SECTION_ID_PREFIX;

/// A level-2 heading as read from the content area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub id: Option<String>,
    pub text: String,
}

impl Heading {
    #[must_use]
    pub fn new(id: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            id: id.map(str::to_string),
            text: text.into(),
        }
    }

    fn authored_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub label: String,
}

impl TocEntry {
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Id a heading must carry after the plan is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAssignment {
    pub index: usize,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocPlan {
    pub entries: Vec<TocEntry>,
    pub assignments: Vec<IdAssignment>,
}

impl TocPlan {
    /// Ids used by more than one entry, in first-seen order.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.id.as_str()).or_default() += 1;
        }
        let mut seen = Vec::new();
        for entry in &self.entries {
            if counts.get(entry.id.as_str()).copied().unwrap_or(0) > 1
                && !seen.contains(&entry.id)
            {
                seen.push(entry.id.clone());
            }
        }
        seen
    }
}

#[must_use]
pub fn fallback_id(index: usize) -> String {
    format!("{SECTION_ID_PREFIX}{index}")
}

/// Plan one TOC entry per heading, in document order.
#[must_use]
pub fn build_toc(headings: &[Heading]) -> TocPlan {
    let mut plan = TocPlan::default();
    for (index, heading) in headings.iter().enumerate() {
        let id = heading
            .authored_id()
            .map_or_else(|| fallback_id(index), str::to_string);
        if heading.authored_id().is_none() {
            plan.assignments.push(IdAssignment {
                index,
                id: id.clone(),
            });
        }
        plan.entries.push(TocEntry {
            id,
            label: heading.text.clone(),
        });
    }
    plan
}

/// Which generated link currently carries the active marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocState {
    entries: Vec<TocEntry>,
    active: Option<usize>,
}

impl TocState {
    #[must_use]
    pub const fn new(entries: Vec<TocEntry>) -> Self {
        Self {
            entries,
            active: None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.entries.get(i))
            .map(|e| e.id.as_str())
    }

    /// Clear every marker, then mark the first link targeting `id`.
    pub fn activate(&mut self, id: Option<&str>) -> Option<usize> {
        self.active = id.and_then(|id| self.entries.iter().position(|e| e.id == id));
        self.active
    }
}

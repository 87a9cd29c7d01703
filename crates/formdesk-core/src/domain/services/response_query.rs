//! Response table processing
//!
//! Search, filter, sort and paginate a form's full response set in memory.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::aggregates::FormResponse;
use crate::domain::value_objects::{DeviceType, FieldId, ResponseAnnotations};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Annotation-based status filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Starred,
    Flagged,
    Unflagged,
    Noted,
}

impl StatusFilter {
    pub fn accepts(&self, response: &FormResponse, annotations: &ResponseAnnotations) -> bool {
        let id = response.id();
        match self {
            Self::All => true,
            Self::Starred => annotations.is_starred(id),
            Self::Flagged => annotations.is_flagged(id),
            Self::Unflagged => !annotations.is_flagged(id),
            Self::Noted => annotations.note(id).is_some(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "starred" => Ok(Self::Starred),
            "flagged" => Ok(Self::Flagged),
            "unflagged" => Ok(Self::Unflagged),
            "noted" => Ok(Self::Noted),
            other => Err(format!("unknown status filter: {}", other)),
        }
    }
}

/// Column to sort by
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    SubmittedAt,
    Id,
    Field(FieldId),
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubmittedAt => f.write_str("submitted_at"),
            Self::Id => f.write_str("id"),
            Self::Field(id) => write!(f, "field:{}", id),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// `submitted_at`, `id`, `field:<field id>`; a bare field id also works
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("empty sort key".to_string()),
            "submitted_at" | "timestamp" => Ok(Self::SubmittedAt),
            "id" => Ok(Self::Id),
            other => {
                let field = other.strip_prefix("field:").unwrap_or(other);
                if field.is_empty() {
                    Err("empty field id in sort key".to_string())
                } else {
                    Ok(Self::Field(FieldId::from_string(field)))
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// Full set of table controls
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseQuery {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub device: Option<DeviceType>,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub page: usize,
    pub per_page: usize,
}

impl Default for ResponseQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: StatusFilter::All,
            device: None,
            sort: SortKey::SubmittedAt,
            direction: SortDirection::Desc,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ResponseQuery {
    /// Whether a response passes search, status and device filters
    pub fn accepts(&self, response: &FormResponse, annotations: &ResponseAnnotations) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |term| response.matches(term));
        let device_ok = self.device.map_or(true, |device| response.device() == device);
        search_ok && device_ok && self.status.accepts(response, annotations)
    }

    /// Filtered and sorted responses, before pagination
    pub fn filter_and_sort(
        &self,
        responses: Vec<FormResponse>,
        annotations: &ResponseAnnotations,
    ) -> Vec<FormResponse> {
        let mut rows: Vec<FormResponse> = responses
            .into_iter()
            .filter(|r| self.accepts(r, annotations))
            .collect();
        sort_responses(&mut rows, &self.sort, self.direction);
        rows
    }

    /// Filter, sort and cut out the requested page
    pub fn run(
        &self,
        responses: Vec<FormResponse>,
        annotations: &ResponseAnnotations,
    ) -> Page<FormResponse> {
        let rows = self.filter_and_sort(responses, annotations);
        paginate(rows, self.page, self.per_page)
    }
}

/// Stable sort; timestamps compare chronologically, everything else as text
pub fn sort_responses(rows: &mut [FormResponse], key: &SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &FormResponse, b: &FormResponse, key: &SortKey) -> Ordering {
    match key {
        SortKey::SubmittedAt => a.submitted_at().cmp(&b.submitted_at()),
        SortKey::Id => a.id().as_str().cmp(b.id().as_str()),
        SortKey::Field(field) => a.answer_text(field).cmp(&b.answer_text(field)),
    }
}

/// One page of results
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// Number of pages needed for `total` items
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Slice out 1-based page `page`; pages past the end are empty
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(per_page);

    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages: page_count(total, per_page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::EntityId;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    const DESKTOP: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) Safari/605.1.15";
    const MOBILE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
    const TABLET: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)";

    fn response(name: &str, user_agent: &str, minutes: i64) -> FormResponse {
        let mut answers = BTreeMap::new();
        answers.insert(FieldId::from_string("name"), json!(name));
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        FormResponse::create(EntityId::from_string("form"), answers, user_agent)
            .with_submitted_at(base + Duration::minutes(minutes))
    }

    fn sample() -> Vec<FormResponse> {
        vec![
            response("Charlie", DESKTOP, 3),
            response("alice", MOBILE, 1),
            response("Bob", TABLET, 2),
            response("Dana", MOBILE, 0),
        ]
    }

    fn names(rows: &[FormResponse]) -> Vec<String> {
        rows.iter().map(|r| r.answer_text(&FieldId::from_string("name"))).collect()
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let rows = ResponseQuery::default().filter_and_sort(sample(), &ResponseAnnotations::new());
        assert_eq!(names(&rows), vec!["Charlie", "Bob", "alice", "Dana"]);
    }

    #[test]
    fn test_sort_by_field_is_lexicographic() {
        let query = ResponseQuery {
            sort: SortKey::Field(FieldId::from_string("name")),
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let rows = query.filter_and_sort(sample(), &ResponseAnnotations::new());
        assert_eq!(names(&rows), vec!["Bob", "Charlie", "Dana", "alice"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = ResponseQuery { search: Some("ALI".into()), ..Default::default() };
        let rows = query.filter_and_sort(sample(), &ResponseAnnotations::new());
        assert_eq!(names(&rows), vec!["alice"]);
    }

    #[test]
    fn test_status_filters_use_annotations() {
        let responses = sample();
        let mut annotations = ResponseAnnotations::new();
        annotations.set_starred(responses[0].id(), true);
        annotations.set_flagged(responses[1].id(), true);
        annotations.set_note(responses[2].id(), Some("call back".into()));

        let run = |status| {
            let query = ResponseQuery { status, ..Default::default() };
            names(&query.filter_and_sort(responses.clone(), &annotations))
        };

        assert_eq!(run(StatusFilter::Starred), vec!["Charlie"]);
        assert_eq!(run(StatusFilter::Flagged), vec!["alice"]);
        assert_eq!(run(StatusFilter::Noted), vec!["Bob"]);
        assert_eq!(run(StatusFilter::Unflagged).len(), 3);
    }

    #[test]
    fn test_device_filter_partitions_responses() {
        let responses = sample();
        let annotations = ResponseAnnotations::new();
        let mut seen = Vec::new();

        for device in DeviceType::ALL {
            let query = ResponseQuery { device: Some(device), ..Default::default() };
            for row in query.filter_and_sort(responses.clone(), &annotations) {
                assert_eq!(row.device(), device);
                seen.push(row.id().clone());
            }
        }

        seen.sort();
        let mut all: Vec<_> = responses.iter().map(|r| r.id().clone()).collect();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_paginate() {
        let page = paginate((1..=23).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);

        let past_end = paginate((1..=5).collect::<Vec<_>>(), 4, 2);
        assert!(past_end.items.is_empty());

        let empty = paginate(Vec::<u8>::new(), 1, 10);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("submitted_at".parse::<SortKey>().unwrap(), SortKey::SubmittedAt);
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Id);
        assert_eq!(
            "field:field_abc".parse::<SortKey>().unwrap(),
            SortKey::Field(FieldId::from_string("field_abc"))
        );
        assert!("field:".parse::<SortKey>().is_err());
    }

    proptest! {
        #[test]
        fn prop_pages_reassemble_input(len in 0usize..200, per_page in 1usize..30) {
            let items: Vec<usize> = (0..len).collect();
            let pages = page_count(len, per_page);
            prop_assert_eq!(pages, (len + per_page - 1) / per_page);

            let mut rebuilt = Vec::new();
            for page in 1..=pages {
                let p = paginate(items.clone(), page, per_page);
                prop_assert!(p.items.len() <= per_page);
                rebuilt.extend(p.items);
            }
            prop_assert_eq!(rebuilt, items);
        }
    }
}

//! Query parameters shared by every list endpoint.
//!
//! Parsing is lenient: an unknown category, sort key, or threshold falls back
//! to its default rather than rejecting the request, so a stale bookmark
//! still renders a screen.

use std::str::FromStr;

use mc_core::view::{SortKey, ViewConfig};
use serde::Deserialize;

/// `?category=&include_archived=&q=&threshold=&sort=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewParams {
  pub category:         Option<String>,
  pub include_archived: Option<String>,
  /// Free-text search term.
  pub q:                Option<String>,
  pub threshold:        Option<String>,
  pub sort:             Option<String>,
}

impl ViewParams {
  /// Build a view configuration, starting from `default_sort` when no valid
  /// sort key was supplied.
  pub fn config<C: FromStr>(&self, default_sort: SortKey) -> ViewConfig<C> {
    let mut config = ViewConfig::sorted_by(parse_or(self.sort.as_deref(), default_sort))
      .with_category(self.category.as_deref().and_then(|c| c.parse().ok()))
      .with_archived(parse_flag(self.include_archived.as_deref()))
      .with_search(self.q.clone().unwrap_or_default());
    if let Some(threshold) = self.threshold.as_deref().and_then(|t| t.parse().ok()) {
      config = config.with_threshold(threshold);
    }
    config
  }
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
  raw.and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Accepts `true`/`1`/`yes`; anything else is false.
pub(crate) fn parse_flag(raw: Option<&str>) -> bool {
  matches!(
    raw.map(str::to_ascii_lowercase).as_deref(),
    Some("true" | "1" | "yes")
  )
}

#[cfg(test)]
mod tests {
  use mc_core::{task::TaskStatus, view::DEFAULT_SEARCH_THRESHOLD};

  use super::*;

  fn params(pairs: &[(&str, &str)]) -> ViewParams {
    let mut p = ViewParams::default();
    for (k, v) in pairs {
      let v = Some((*v).to_owned());
      match *k {
        "category" => p.category = v,
        "include_archived" => p.include_archived = v,
        "q" => p.q = v,
        "threshold" => p.threshold = v,
        "sort" => p.sort = v,
        _ => {}
      }
    }
    p
  }

  #[test]
  fn empty_params_give_defaults() {
    let config: ViewConfig<TaskStatus> = params(&[]).config(SortKey::CreatedAtDesc);
    assert_eq!(config, ViewConfig::default());
  }

  #[test]
  fn valid_values_are_applied() {
    let config: ViewConfig<TaskStatus> = params(&[
      ("category", "in_progress"),
      ("include_archived", "true"),
      ("q", "robot"),
      ("threshold", "2"),
      ("sort", "viewCount-desc"),
    ])
    .config(SortKey::CreatedAtDesc);

    assert_eq!(config.category, Some(TaskStatus::InProgress));
    assert!(config.include_archived);
    assert_eq!(config.search_term, "robot");
    assert_eq!(config.search_threshold, 2);
    assert_eq!(config.sort_by, SortKey::ViewCountDesc);
  }

  #[test]
  fn unknown_values_fall_back_to_defaults() {
    let config: ViewConfig<TaskStatus> = params(&[
      ("category", "someday"),
      ("include_archived", "perhaps"),
      ("threshold", "-4"),
      ("sort", "random"),
    ])
    .config(SortKey::ScheduledForAsc);

    assert_eq!(config.category, None);
    assert!(!config.include_archived);
    assert_eq!(config.search_threshold, DEFAULT_SEARCH_THRESHOLD);
    assert_eq!(config.sort_by, SortKey::ScheduledForAsc);
  }
}

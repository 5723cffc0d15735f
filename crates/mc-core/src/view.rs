//! The filtered view engine.
//!
//! Given the records of one collection and the user's current view settings,
//! [`compute_view`] returns exactly the ordered sequence a screen renders.
//! It is pure: no I/O, no mutation of its input, and no error path.
//!
//! Two mutually exclusive modes exist:
//!
//! - **Search mode** is entered once the trimmed search term reaches the
//!   configured threshold. Category and archived settings are ignored and
//!   archived records are always eligible.
//! - **Filter mode** applies the archived-visibility flag and then the
//!   optional category.
//!
//! Both modes finish with a stable sort on the configured [`SortKey`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::record::Timestamp;

/// Minimum trimmed search-term length that switches on search mode.
pub const DEFAULT_SEARCH_THRESHOLD: usize = 3;

// ─── Capability trait ────────────────────────────────────────────────────────

/// What the view engine needs to know about a record.
///
/// Implemented once per module record type; the engine never names a
/// concrete module.
pub trait Viewable {
  /// The enumerated field category filtering compares against.
  type Category: PartialEq + Copy;

  /// Ordering a screen for this record type starts with.
  const DEFAULT_SORT: SortKey = SortKey::CreatedAtDesc;

  fn category(&self) -> Option<Self::Category>;

  fn created_at(&self) -> Timestamp;

  /// Primary display text; always searched.
  fn title(&self) -> &str;

  /// Secondary free text (content, description, details); searched when
  /// present.
  fn body(&self) -> Option<&str>;

  fn tags(&self) -> &[String] { &[] }

  /// Hidden from filter mode unless archived records are requested.
  fn archived(&self) -> bool { false }

  fn scheduled_for(&self) -> Option<Timestamp> { None }

  fn view_count(&self) -> Option<u64> { None }
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// Ordering applied to the visible records.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
)]
pub enum SortKey {
  /// Newest created first.
  #[default]
  #[serde(rename = "createdAt-desc")]
  #[strum(serialize = "createdAt-desc")]
  CreatedAtDesc,
  /// Soonest scheduled first; unscheduled records last.
  #[serde(rename = "scheduledFor-asc")]
  #[strum(serialize = "scheduledFor-asc")]
  ScheduledForAsc,
  /// Most viewed first; a missing count is zero.
  #[serde(rename = "viewCount-desc")]
  #[strum(serialize = "viewCount-desc")]
  ViewCountDesc,
}

/// Which path [`compute_view`] takes for a given configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
  Filter,
  Search,
}

/// The user's current selections for one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig<C> {
  /// Keep only this category in filter mode; `None` keeps all.
  pub category:         Option<C>,
  /// Keep archived records in filter mode.
  pub include_archived: bool,
  pub search_term:      String,
  /// Minimum trimmed length of `search_term` that activates search mode.
  pub search_threshold: usize,
  pub sort_by:          SortKey,
}

impl<C> Default for ViewConfig<C> {
  fn default() -> Self {
    Self {
      category:         None,
      include_archived: false,
      search_term:      String::new(),
      search_threshold: DEFAULT_SEARCH_THRESHOLD,
      sort_by:          SortKey::default(),
    }
  }
}

impl<C> ViewConfig<C> {
  pub fn sorted_by(sort_by: SortKey) -> Self {
    Self { sort_by, ..Self::default() }
  }

  pub fn with_category(mut self, category: Option<C>) -> Self {
    self.category = category;
    self
  }

  pub fn with_archived(mut self, include_archived: bool) -> Self {
    self.include_archived = include_archived;
    self
  }

  pub fn with_search(mut self, term: impl Into<String>) -> Self {
    self.search_term = term.into();
    self
  }

  pub fn with_threshold(mut self, threshold: usize) -> Self {
    self.search_threshold = threshold;
    self
  }

  pub fn with_sort(mut self, sort_by: SortKey) -> Self {
    self.sort_by = sort_by;
    self
  }

  pub fn mode(&self) -> ViewMode {
    if self.search_term.trim().chars().count() >= self.search_threshold {
      ViewMode::Search
    } else {
      ViewMode::Filter
    }
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Compute the visible, ordered records for one screen.
pub fn compute_view<'a, R>(
  records: &'a [R],
  config: &ViewConfig<R::Category>,
) -> Vec<&'a R>
where
  R: Viewable,
{
  let mut visible: Vec<&R> = match config.mode() {
    ViewMode::Search => {
      // Trimming only gates the mode; the term is matched as typed.
      let needle = config.search_term.to_lowercase();
      records.iter().filter(|r| matches_search(*r, &needle)).collect()
    }
    ViewMode::Filter => records
      .iter()
      .filter(|r| config.include_archived || !r.archived())
      .filter(|r| match config.category {
        Some(wanted) => r.category() == Some(wanted),
        None => true,
      })
      .collect(),
  };

  sort_records(&mut visible, config.sort_by);
  visible
}

/// `needle` must already be lowercased.
fn matches_search<R: Viewable>(record: &R, needle: &str) -> bool {
  let hit = |text: &str| text.to_lowercase().contains(needle);

  hit(record.title())
    || record.body().is_some_and(hit)
    || record.tags().iter().any(|t| hit(t.as_str()))
}

/// Stable sort; ties keep their incoming relative order.
pub fn sort_records<R: Viewable>(records: &mut [&R], key: SortKey) {
  match key {
    SortKey::CreatedAtDesc => {
      records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    }
    SortKey::ScheduledForAsc => records.sort_by(|a, b| {
      match (a.scheduled_for(), b.scheduled_for()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
      }
    }),
    SortKey::ViewCountDesc => records.sort_by(|a, b| {
      b.view_count().unwrap_or(0).cmp(&a.view_count().unwrap_or(0))
    }),
  }
}

// ─── Grouping ────────────────────────────────────────────────────────────────

/// One column of a board view.
#[derive(Debug, Clone, Serialize)]
pub struct Column<'a, C, R> {
  pub category: C,
  pub count:    usize,
  pub records:  Vec<&'a R>,
}

/// Group `records` into one column per entry of `categories`, in that order.
/// Records whose category is not listed are dropped; within a column the
/// incoming order is kept.
pub fn board<'a, R, I>(records: &[&'a R], categories: I) -> Vec<Column<'a, R::Category, R>>
where
  R: Viewable,
  I: IntoIterator<Item = R::Category>,
{
  categories
    .into_iter()
    .map(|category| {
      let records: Vec<&R> = records
        .iter()
        .copied()
        .filter(|r| r.category() == Some(category))
        .collect();
      Column { category, count: records.len(), records }
    })
    .collect()
}

/// Count records per category, in the order `categories` yields them.
pub fn count_by_category<R, I>(records: &[R], categories: I) -> Vec<(R::Category, usize)>
where
  R: Viewable,
  I: IntoIterator<Item = R::Category>,
{
  categories
    .into_iter()
    .map(|c| {
      let n = records.iter().filter(|r| r.category() == Some(c)).count();
      (c, n)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  enum Kind {
    Red,
    Blue,
  }

  #[derive(Debug, Clone, PartialEq)]
  struct Item {
    name:       &'static str,
    body:       Option<&'static str>,
    tags:       Vec<String>,
    kind:       Option<Kind>,
    archived:   bool,
    created_at: Timestamp,
    scheduled:  Option<Timestamp>,
    views:      Option<u64>,
  }

  impl Item {
    fn new(name: &'static str, created_at: Timestamp) -> Self {
      Self {
        name,
        body: None,
        tags: Vec::new(),
        kind: None,
        archived: false,
        created_at,
        scheduled: None,
        views: None,
      }
    }
  }

  impl Viewable for Item {
    type Category = Kind;

    fn category(&self) -> Option<Kind> { self.kind }

    fn created_at(&self) -> Timestamp { self.created_at }

    fn title(&self) -> &str { self.name }

    fn body(&self) -> Option<&str> { self.body }

    fn tags(&self) -> &[String] { &self.tags }

    fn archived(&self) -> bool { self.archived }

    fn scheduled_for(&self) -> Option<Timestamp> { self.scheduled }

    fn view_count(&self) -> Option<u64> { self.views }
  }

  fn names(view: &[&Item]) -> Vec<&'static str> {
    view.iter().map(|i| i.name).collect()
  }

  // ─── Filter mode ─────────────────────────────────────────────────────────

  #[test]
  fn default_config_drops_exactly_the_archived_records() {
    let mut b = Item::new("b", 2);
    b.archived = true;
    let records = vec![Item::new("a", 1), b, Item::new("c", 3)];

    let view = compute_view(&records, &ViewConfig::default());

    assert_eq!(names(&view), ["c", "a"]);
    assert!(view.iter().all(|i| !i.archived));
  }

  #[test]
  fn include_archived_keeps_everything() {
    let mut b = Item::new("b", 2);
    b.archived = true;
    let records = vec![Item::new("a", 1), b];

    let view = compute_view(&records, &ViewConfig::default().with_archived(true));

    assert_eq!(names(&view), ["b", "a"]);
  }

  #[test]
  fn category_filter_keeps_only_matching_records() {
    let mut red = Item::new("red", 1);
    red.kind = Some(Kind::Red);
    let mut blue = Item::new("blue", 2);
    blue.kind = Some(Kind::Blue);
    let records = vec![red, blue, Item::new("none", 3)];

    let view = compute_view(
      &records,
      &ViewConfig::default().with_category(Some(Kind::Red)),
    );

    assert_eq!(names(&view), ["red"]);
  }

  #[test]
  fn short_search_term_stays_in_filter_mode() {
    let mut beta = Item::new("Beta", 2);
    beta.archived = true;
    let records = vec![Item::new("Alpha surf trip", 1), beta];

    let config = ViewConfig::default().with_search("a");
    assert_eq!(config.mode(), ViewMode::Filter);

    let view = compute_view(&records, &config);
    assert_eq!(names(&view), ["Alpha surf trip"]);
  }

  #[test]
  fn threshold_counts_trimmed_characters() {
    let config = ViewConfig::<Kind>::default().with_search("  ab  ");
    assert_eq!(config.mode(), ViewMode::Filter);

    let config = ViewConfig::<Kind>::default().with_search(" éàü ");
    assert_eq!(config.mode(), ViewMode::Search);

    let config = ViewConfig::<Kind>::default().with_search("ab").with_threshold(2);
    assert_eq!(config.mode(), ViewMode::Search);
  }

  // ─── Search mode ─────────────────────────────────────────────────────────

  #[test]
  fn search_matches_title_body_and_tags_case_insensitively() {
    let mut by_body = Item::new("Plain", 2);
    by_body.body = Some("went SURFING today");
    let mut by_tag = Item::new("Other", 3);
    by_tag.tags = vec!["Surf".into()];
    let records = vec![
      Item::new("Alpha surf trip", 1),
      by_body,
      by_tag,
      Item::new("Nothing", 4),
    ];

    let view = compute_view(&records, &ViewConfig::default().with_search("surf"));

    assert_eq!(names(&view), ["Other", "Plain", "Alpha surf trip"]);
  }

  #[test]
  fn search_matches_the_untrimmed_term() {
    let records = vec![Item::new("rust lang", 1), Item::new("rustacean", 2)];

    let view = compute_view(&records, &ViewConfig::default().with_search("rust "));

    assert_eq!(names(&view), ["rust lang"]);
  }

  #[test]
  fn search_includes_archived_and_ignores_category() {
    let mut archived = Item::new("old surf log", 1);
    archived.archived = true;
    archived.kind = Some(Kind::Blue);
    let records = vec![archived];

    let config = ViewConfig::default()
      .with_search("surf")
      .with_category(Some(Kind::Red))
      .with_archived(false);
    let view = compute_view(&records, &config);

    assert_eq!(names(&view), ["old surf log"]);
  }

  #[test]
  fn alpha_beta_scenario() {
    let mut alpha = Item::new("Alpha surf trip", 1);
    alpha.tags = vec!["surf".into()];
    let mut beta = Item::new("Beta", 2);
    beta.archived = true;
    let records = vec![alpha, beta];

    let searched = compute_view(&records, &ViewConfig::default().with_search("surf"));
    assert_eq!(names(&searched), ["Alpha surf trip"]);

    let filtered = compute_view(&records, &ViewConfig::default().with_search("a"));
    assert_eq!(names(&filtered), ["Alpha surf trip"]);
  }

  // ─── Sorting ─────────────────────────────────────────────────────────────

  #[test]
  fn created_at_desc_puts_newest_first() {
    let records = vec![Item::new("100", 100), Item::new("300", 300), Item::new("200", 200)];

    let view = compute_view(&records, &ViewConfig::default());

    assert_eq!(names(&view), ["300", "200", "100"]);
  }

  #[test]
  fn scheduled_for_asc_puts_unscheduled_last() {
    let mut soon = Item::new("soon", 1);
    soon.scheduled = Some(10);
    let mut later = Item::new("later", 2);
    later.scheduled = Some(20);
    let records = vec![Item::new("never", 0), later, soon];

    let view = compute_view(&records, &ViewConfig::sorted_by(SortKey::ScheduledForAsc));

    assert_eq!(names(&view), ["soon", "later", "never"]);
  }

  #[test]
  fn view_count_desc_treats_missing_as_zero() {
    let mut popular = Item::new("popular", 1);
    popular.views = Some(7);
    let mut seen_once = Item::new("seen once", 2);
    seen_once.views = Some(1);
    let records = vec![Item::new("unseen", 3), popular, seen_once];

    let view = compute_view(&records, &ViewConfig::sorted_by(SortKey::ViewCountDesc));

    assert_eq!(names(&view), ["popular", "seen once", "unseen"]);
  }

  #[test]
  fn sort_is_stable_for_ties() {
    let records = vec![Item::new("first", 5), Item::new("second", 5), Item::new("third", 5)];

    let view = compute_view(&records, &ViewConfig::sorted_by(SortKey::ViewCountDesc));

    assert_eq!(names(&view), ["first", "second", "third"]);
  }

  #[test]
  fn sort_keys_parse_from_their_wire_names() {
    assert_eq!("viewCount-desc".parse::<SortKey>().unwrap(), SortKey::ViewCountDesc);
    assert_eq!(SortKey::ScheduledForAsc.as_ref(), "scheduledFor-asc");
    assert!("newest".parse::<SortKey>().is_err());
  }

  // ─── Purity ──────────────────────────────────────────────────────────────

  #[test]
  fn empty_input_yields_empty_output() {
    let records: Vec<Item> = Vec::new();
    assert!(compute_view(&records, &ViewConfig::default().with_search("anything")).is_empty());
  }

  #[test]
  fn repeated_calls_are_identical_and_leave_input_untouched() {
    let mut archived = Item::new("b", 2);
    archived.archived = true;
    let records = vec![Item::new("a", 1), archived, Item::new("c", 3)];
    let before = records.clone();
    let config = ViewConfig::sorted_by(SortKey::CreatedAtDesc);

    let first = compute_view(&records, &config);
    let second = compute_view(&records, &config);

    assert_eq!(first, second);
    assert_eq!(records, before);
  }

  // ─── Grouping ────────────────────────────────────────────────────────────

  #[test]
  fn board_groups_in_column_order() {
    let mut r1 = Item::new("r1", 1);
    r1.kind = Some(Kind::Red);
    let mut b1 = Item::new("b1", 2);
    b1.kind = Some(Kind::Blue);
    let mut r2 = Item::new("r2", 3);
    r2.kind = Some(Kind::Red);
    let records = vec![r1, b1, r2];
    let refs: Vec<&Item> = records.iter().collect();

    let columns = board(&refs, [Kind::Blue, Kind::Red]);

    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].category, Kind::Blue);
    assert_eq!(names(&columns[0].records), ["b1"]);
    assert_eq!(columns[1].count, 2);
    assert_eq!(names(&columns[1].records), ["r1", "r2"]);
  }

  #[test]
  fn counts_follow_requested_categories() {
    let mut r1 = Item::new("r1", 1);
    r1.kind = Some(Kind::Red);
    let records = vec![r1, Item::new("x", 2)];

    let counts = count_by_category(&records, [Kind::Red, Kind::Blue]);

    assert_eq!(counts, vec![(Kind::Red, 1), (Kind::Blue, 0)]);
  }
}

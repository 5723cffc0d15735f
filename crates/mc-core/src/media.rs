//! Media library records: photos and videos with star ratings.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Error, Result,
  record::{
    Collection, Document, IndexKey, IndexValue, RecordId, Timestamp, Validate,
    double_option, require_non_empty, set,
  },
  view::Viewable,
};

/// Lowest and highest star rating.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Most records returned by a media listing.
pub const LIST_LIMIT: usize = 100;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MediaType {
  Image,
  Video,
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Project {
  SingularityKiwi,
  SolarSurf,
  SunshineHealing,
  Sass,
  Business,
  Personal,
  #[default]
  Uncategorized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
  pub id:             RecordId,
  pub filename:       String,
  /// Full path to the file on disk.
  pub original_path:  String,
  #[serde(rename = "type")]
  pub media_type:     MediaType,
  /// Vision analysis text.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:    Option<String>,
  /// Auto-categorised folder name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category:       Option<String>,
  pub project:        Project,
  /// 1–5 stars; `None` until rated.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rating:         Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:           Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thumbnail_path: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub size_bytes:     Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub captured_at:    Option<Timestamp>,
  pub created_at:     Timestamp,
}

impl MediaItem {
  pub fn is_rated(&self) -> bool { self.rating.is_some_and(|r| r > 0) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedia {
  pub filename:       String,
  pub original_path:  String,
  #[serde(rename = "type")]
  pub media_type:     MediaType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category:       Option<String>,
  /// Defaults to [`Project::Uncategorized`].
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub project:        Option<Project>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rating:         Option<u8>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:           Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thumbnail_path: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub size_bytes:     Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub captured_at:    Option<Timestamp>,
}

impl NewMedia {
  pub fn new(
    filename: impl Into<String>,
    original_path: impl Into<String>,
    media_type: MediaType,
  ) -> Self {
    Self {
      filename: filename.into(),
      original_path: original_path.into(),
      media_type,
      description: None,
      category: None,
      project: None,
      rating: None,
      tags: None,
      thumbnail_path: None,
      size_bytes: None,
      captured_at: None,
    }
  }
}

pub fn validate_rating(rating: u8) -> Result<()> {
  if RATING_RANGE.contains(&rating) {
    Ok(())
  } else {
    Err(Error::invalid("rating", format!("{rating} is outside 1-5")))
  }
}

impl Validate for NewMedia {
  fn validate(&self) -> Result<()> {
    require_non_empty("filename", &self.filename)?;
    require_non_empty("originalPath", &self.original_path)?;
    self.rating.map(validate_rating).transpose()?;
    Ok(())
  }
}

/// Partial update. A JSON `null` rating, or `clearRating: true`, leaves the
/// item unrated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filename:       Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub description:    Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub category:       Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub project:        Option<Project>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub rating:         Option<Option<u8>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:           Option<Vec<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub thumbnail_path: Option<Option<String>>,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub clear_rating:   bool,
}

impl MediaPatch {
  pub fn rate(rating: u8) -> Self {
    Self { rating: Some(Some(rating)), ..Self::default() }
  }

  pub fn unrate() -> Self {
    Self { rating: Some(None), ..Self::default() }
  }
}

impl Validate for MediaPatch {
  fn validate(&self) -> Result<()> {
    if let Some(filename) = &self.filename {
      require_non_empty("filename", filename)?;
    }
    if let Some(Some(rating)) = self.rating {
      validate_rating(rating)?;
    }
    Ok(())
  }
}

/// Secondary indexes on the media collection.
#[derive(Debug, Clone, Copy)]
pub enum MediaIndex {
  ByProject(Project),
  ByRating(u8),
  ByType(MediaType),
}

impl IndexKey for MediaIndex {
  fn field(&self) -> &'static str {
    match self {
      Self::ByProject(_) => "project",
      Self::ByRating(_) => "rating",
      Self::ByType(_) => "type",
    }
  }

  fn value(&self) -> IndexValue {
    match self {
      Self::ByProject(p) => IndexValue::Text(p.as_ref().to_owned()),
      Self::ByRating(r) => IndexValue::Integer(i64::from(*r)),
      Self::ByType(t) => IndexValue::Text(t.as_ref().to_owned()),
    }
  }
}

impl Document for MediaItem {
  const COLLECTION: Collection = Collection::Media;

  type Draft = NewMedia;
  type Index = MediaIndex;
  type Patch = MediaPatch;

  fn id(&self) -> RecordId { self.id }

  fn from_draft(id: RecordId, now: Timestamp, draft: NewMedia) -> Self {
    Self {
      id,
      filename: draft.filename,
      original_path: draft.original_path,
      media_type: draft.media_type,
      description: draft.description,
      category: draft.category,
      project: draft.project.unwrap_or_default(),
      rating: draft.rating,
      tags: draft.tags,
      thumbnail_path: draft.thumbnail_path,
      size_bytes: draft.size_bytes,
      captured_at: draft.captured_at,
      created_at: now,
    }
  }

  fn apply_patch(&mut self, patch: MediaPatch, _now: Timestamp) {
    set(&mut self.filename, patch.filename);
    set(&mut self.description, patch.description);
    set(&mut self.category, patch.category);
    set(&mut self.project, patch.project);
    set(&mut self.rating, patch.rating);
    if let Some(tags) = patch.tags {
      self.tags = Some(tags);
    }
    set(&mut self.thumbnail_path, patch.thumbnail_path);
    if patch.clear_rating {
      self.rating = None;
    }
  }
}

impl Viewable for MediaItem {
  type Category = Project;

  fn category(&self) -> Option<Project> { Some(self.project) }

  fn created_at(&self) -> Timestamp { self.created_at }

  fn title(&self) -> &str { &self.filename }

  fn body(&self) -> Option<&str> { self.description.as_deref() }

  fn tags(&self) -> &[String] { self.tags.as_deref().unwrap_or(&[]) }
}

/// Narrowing applied by the media listing on top of the view engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaFilter {
  pub media_type: Option<MediaType>,
  pub min_rating: Option<u8>,
}

impl MediaFilter {
  /// Unrated items never satisfy a minimum rating.
  pub fn matches(&self, item: &MediaItem) -> bool {
    if self.media_type.is_some_and(|t| t != item.media_type) {
      return false;
    }
    match self.min_rating {
      Some(min) => item.rating.is_some_and(|r| r >= min),
      None => true,
    }
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn photo() -> MediaItem {
    MediaItem::from_draft(
      Uuid::new_v4(),
      1,
      NewMedia::new("beach.jpg", "/photos/beach.jpg", MediaType::Image),
    )
  }

  #[test]
  fn new_media_is_uncategorized_and_unrated() {
    let item = photo();
    assert_eq!(item.project, Project::Uncategorized);
    assert_eq!(item.rating, None);
    assert!(!item.is_rated());
  }

  #[test]
  fn rating_outside_range_is_rejected() {
    assert!(MediaPatch::rate(0).validate().is_err());
    assert!(MediaPatch::rate(6).validate().is_err());
    assert!(MediaPatch::rate(5).validate().is_ok());

    let mut draft = NewMedia::new("a.jpg", "/a.jpg", MediaType::Image);
    draft.rating = Some(9);
    assert!(draft.validate().is_err());
  }

  #[test]
  fn null_rating_and_clear_flag_both_unrate() {
    let mut item = photo();
    item.apply_patch(MediaPatch::rate(4), 2);
    assert_eq!(item.rating, Some(4));

    let patch: MediaPatch = serde_json::from_str(r#"{"rating":null}"#).unwrap();
    item.apply_patch(patch, 3);
    assert_eq!(item.rating, None);

    item.apply_patch(MediaPatch::rate(3), 4);
    let patch: MediaPatch = serde_json::from_str(r#"{"clearRating":true}"#).unwrap();
    item.apply_patch(patch, 5);
    assert_eq!(item.rating, None);
  }

  #[test]
  fn absent_rating_is_left_alone() {
    let mut item = photo();
    item.apply_patch(MediaPatch::rate(2), 2);

    let patch: MediaPatch = serde_json::from_str(r#"{"project":"solar-surf"}"#).unwrap();
    item.apply_patch(patch, 3);

    assert_eq!(item.rating, Some(2));
    assert_eq!(item.project, Project::SolarSurf);
  }

  #[test]
  fn project_names_are_kebab_case() {
    assert_eq!(Project::SingularityKiwi.as_ref(), "singularity-kiwi");
    assert_eq!("sunshine-healing".parse::<Project>().unwrap(), Project::SunshineHealing);
  }

  #[test]
  fn filter_by_type_and_min_rating() {
    let mut rated = photo();
    rated.rating = Some(4);
    let unrated = photo();
    let filter = MediaFilter { media_type: Some(MediaType::Image), min_rating: Some(3) };

    assert!(filter.matches(&rated));
    assert!(!filter.matches(&unrated));

    let videos = MediaFilter { media_type: Some(MediaType::Video), ..MediaFilter::default() };
    assert!(!videos.matches(&rated));
  }
}

//! The `Category` aggregate.
//!
//! Validation is notification-based: [`Category::create`] and the mutators
//! record rule violations in the category's [`Notification`] instead of
//! failing, so all problems can be reported together. Callers that want a hard
//! failure use [`Category::create_strict`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::{
  Error, Result,
  entity::Entity,
  id::Uuid,
  notification::Notification,
  validator::{self, FieldRules, Rule},
};

pub const NAME_MAX_LENGTH: usize = 255;

/// Rule table for the persisted fields of a [`Category`].
pub const CATEGORY_RULES: &[FieldRules] = &[
  FieldRules {
    field:    "name",
    optional: false,
    rules:    &[Rule::NotEmpty, Rule::IsString, Rule::MaxLength(NAME_MAX_LENGTH)],
  },
  FieldRules {
    field:    "description",
    optional: true,
    rules:    &[Rule::IsString],
  },
  FieldRules {
    field:    "is_active",
    optional: true,
    rules:    &[Rule::IsBoolean],
  },
];

// ─── Props ───────────────────────────────────────────────────────────────────

/// Input to [`Category::new`] and [`Category::create`].
///
/// Also the shape of [`Category::to_json`], so a serialised category can be
/// read straight back.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryProps {
  pub category_id: Option<Uuid>,
  pub name:        String,
  pub description: Option<String>,
  pub is_active:   Option<bool>,
  pub created_at:  Option<DateTime<Utc>>,
}

impl CategoryProps {
  /// Convenience constructor with all optional fields unset.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      category_id: None,
      name:        name.into(),
      description: None,
      is_active:   None,
      created_at:  None,
    }
  }
}

// ─── Category ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Category {
  pub(crate) category_id: Uuid,
  pub(crate) name:        String,
  pub(crate) description: Option<String>,
  pub(crate) is_active:   bool,
  pub(crate) created_at:  DateTime<Utc>,
  notification:           Notification,
}

impl Category {
  /// Build a category from `props`, filling defaults. Does not validate.
  pub fn new(props: CategoryProps) -> Self {
    Self {
      category_id:  props.category_id.unwrap_or_default(),
      name:         props.name,
      description:  props.description,
      is_active:    props.is_active.unwrap_or(true),
      created_at:   props.created_at.unwrap_or_else(Utc::now),
      notification: Notification::new(),
    }
  }

  /// Build a category and validate every field once. Violations are recorded
  /// in [`notification`](Entity::notification); the category is returned
  /// either way.
  pub fn create(props: CategoryProps) -> Self {
    let mut category = Self::new(props);
    category.validate(None);
    category
  }

  /// Like [`create`](Self::create), but fails with
  /// [`Error::EntityValidation`] if any rule was violated.
  pub fn create_strict(props: CategoryProps) -> Result<Self> {
    Self::create(props).into_valid()
  }

  /// Rebuild a category from the map produced by [`Entity::to_json`].
  pub fn from_json(value: serde_json::Value) -> Result<Self> {
    let props: CategoryProps = serde_json::from_value(value)?;
    Ok(Self::new(props))
  }

  // ── Accessors ───────────────────────────────────────────────────────────

  pub fn category_id(&self) -> &Uuid { &self.category_id }

  pub fn name(&self) -> &str { &self.name }

  pub fn description(&self) -> Option<&str> { self.description.as_deref() }

  pub fn is_active(&self) -> bool { self.is_active }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  // ── Mutators ────────────────────────────────────────────────────────────

  pub fn change_name(&mut self, name: impl Into<String>) {
    self.name = name.into();
    self.validate(Some(&["name"][..]));
  }

  pub fn change_description(&mut self, description: Option<String>) {
    self.description = description;
    self.validate(Some(&["description"][..]));
  }

  pub fn activate(&mut self) { self.is_active = true; }

  pub fn deactivate(&mut self) { self.is_active = false; }

  // ── Validation ──────────────────────────────────────────────────────────

  /// Run the category rules over `fields` (all of them when `None`),
  /// appending any violations to the notification. Returns `true` when this
  /// run found nothing wrong.
  pub fn validate(&mut self, fields: Option<&[&str]>) -> bool {
    let data = self.to_json();
    validator::validate(CATEGORY_RULES, &mut self.notification, &data, fields)
  }

  /// Turn recorded violations into [`Error::EntityValidation`].
  pub fn into_valid(self) -> Result<Self> {
    if self.notification.has_errors() {
      Err(Error::EntityValidation(self.notification))
    } else {
      Ok(self)
    }
  }
}

impl Entity for Category {
  type Id = Uuid;

  fn entity_id(&self) -> &Uuid { &self.category_id }

  fn to_json(&self) -> serde_json::Value {
    json!({
      "category_id": self.category_id.id(),
      "name":        self.name,
      "description": self.description,
      "is_active":   self.is_active,
      "created_at":  self.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    })
  }

  fn notification(&self) -> &Notification { &self.notification }

  fn notification_mut(&mut self) -> &mut Notification { &mut self.notification }
}

//! The `Entity` contract shared by every aggregate.

use crate::{notification::Notification, value_object::ValueObject};

/// A domain object with an identity that outlives changes to its fields.
///
/// Every instance owns its own [`Notification`]; validation performed by the
/// entity records into it. The notification is never part of [`to_json`].
///
/// [`to_json`]: Entity::to_json
pub trait Entity {
  type Id: ValueObject;

  fn entity_id(&self) -> &Self::Id;

  /// A plain map of every public field.
  fn to_json(&self) -> serde_json::Value;

  fn notification(&self) -> &Notification;

  fn notification_mut(&mut self) -> &mut Notification;
}

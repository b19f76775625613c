//! [`Notification`], an ordered sink for validation errors.
//!
//! Errors are collected rather than raised so that every violated rule can be
//! reported at once. Each entry is either a field bucket holding one or more
//! messages, or a general message not tied to any field.

use serde::{Serialize, Serializer, ser::SerializeMap};

/// A single element of a [`Notification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEntry {
  Field {
    field:    String,
    messages: Vec<String>,
  },
  General(String),
}

/// Serialises as `{"<field>": [...]}` or as a bare message string.
impl Serialize for NotificationEntry {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Field { field, messages } => {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(field, messages)?;
        map.end()
      }
      Self::General(message) => serializer.serialize_str(message),
    }
  }
}

/// Accumulates validation errors in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Notification {
  entries: Vec<NotificationEntry>,
}

impl Notification {
  pub fn new() -> Self { Self::default() }

  /// Append `message` to `field`'s bucket, or record it as a general message
  /// when `field` is `None`.
  pub fn add_error(&mut self, message: impl Into<String>, field: Option<&str>) {
    let message = message.into();
    let Some(field) = field else {
      self.entries.push(NotificationEntry::General(message));
      return;
    };

    match self.bucket_mut(field) {
      Some(messages) => messages.push(message),
      None => self.entries.push(NotificationEntry::Field {
        field:    field.to_owned(),
        messages: vec![message],
      }),
    }
  }

  /// [`add_error`](Self::add_error) for each of `messages`, in order.
  pub fn set_error<I>(&mut self, messages: I, field: Option<&str>)
  where
    I: IntoIterator,
    I::Item: Into<String>,
  {
    for message in messages {
      self.add_error(message, field);
    }
  }

  pub fn has_errors(&self) -> bool {
    self.entries.iter().any(|entry| match entry {
      NotificationEntry::Field { messages, .. } => !messages.is_empty(),
      NotificationEntry::General(_) => true,
    })
  }

  /// Merge every entry of `other` into `self`. Nothing is dropped or
  /// de-duplicated on either side.
  pub fn copy_errors(&mut self, other: &Notification) {
    self.extend(other.entries.iter().cloned());
  }

  /// Messages recorded for `field`, if any.
  pub fn messages(&self, field: &str) -> Option<&[String]> {
    self.entries.iter().find_map(|entry| match entry {
      NotificationEntry::Field { field: f, messages } if f == field => {
        Some(messages.as_slice())
      }
      _ => None,
    })
  }

  pub fn entries(&self) -> &[NotificationEntry] { &self.entries }

  /// Every message, field buckets flattened, in insertion order.
  pub fn all_messages(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().flat_map(|entry| match entry {
      NotificationEntry::Field { messages, .. } => {
        messages.iter().map(String::as_str).collect::<Vec<_>>()
      }
      NotificationEntry::General(message) => vec![message.as_str()],
    })
  }

  /// The serialisable view: `[{"name": [...]}, "general message", ...]`.
  pub fn to_json(&self) -> serde_json::Value {
    serde_json::Value::Array(
      self
        .entries
        .iter()
        .map(|entry| match entry {
          NotificationEntry::Field { field, messages } => {
            let mut bucket = serde_json::Map::new();
            bucket.insert(field.clone(), messages.clone().into());
            serde_json::Value::Object(bucket)
          }
          NotificationEntry::General(message) => {
            serde_json::Value::String(message.clone())
          }
        })
        .collect(),
    )
  }

  fn bucket_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
    self.entries.iter_mut().find_map(|entry| match entry {
      NotificationEntry::Field { field: f, messages } if f == field => {
        Some(messages)
      }
      _ => None,
    })
  }
}

impl Extend<NotificationEntry> for Notification {
  fn extend<T: IntoIterator<Item = NotificationEntry>>(&mut self, iter: T) {
    for entry in iter {
      match entry {
        NotificationEntry::Field { field, messages } => {
          self.set_error(messages, Some(&field));
        }
        NotificationEntry::General(message) => self.add_error(message, None),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn empty_notification_has_no_errors() {
    let n = Notification::new();
    assert!(!n.has_errors());
    assert_eq!(n.to_json(), json!([]));
  }

  #[test]
  fn add_error_accumulates_per_field() {
    let mut n = Notification::new();
    n.add_error("name should not be empty", Some("name"));
    n.add_error("name must be a string", Some("name"));
    n.add_error("description must be a string", Some("description"));
    n.add_error("name should not be empty", Some("name"));

    assert!(n.has_errors());
    assert_eq!(
      n.messages("name").unwrap(),
      &[
        "name should not be empty",
        "name must be a string",
        "name should not be empty",
      ]
    );
    assert_eq!(n.messages("description").unwrap().len(), 1);
    assert!(n.messages("is_active").is_none());
  }

  #[test]
  fn general_messages_have_no_field() {
    let mut n = Notification::new();
    n.add_error("something went wrong", None);
    n.add_error("name must be a string", Some("name"));
    n.add_error("another problem", None);

    assert_eq!(
      n.to_json(),
      json!([
        "something went wrong",
        { "name": ["name must be a string"] },
        "another problem",
      ])
    );
  }

  #[test]
  fn set_error_appends_a_sequence() {
    let mut n = Notification::new();
    n.add_error("first", Some("name"));
    n.set_error(["second", "third"], Some("name"));
    n.set_error(vec!["loose".to_string()], None);

    assert_eq!(n.messages("name").unwrap(), &["first", "second", "third"]);
    assert_eq!(n.to_json(), json!([{ "name": ["first", "second", "third"] }, "loose"]));
  }

  #[test]
  fn to_json_follows_field_insertion_order() {
    let mut n = Notification::new();
    n.add_error("b1", Some("b"));
    n.add_error("a1", Some("a"));
    n.add_error("b2", Some("b"));

    assert_eq!(n.to_json(), json!([{ "b": ["b1", "b2"] }, { "a": ["a1"] }]));
    assert_eq!(serde_json::to_value(&n).unwrap(), n.to_json());
  }

  #[test]
  fn copy_errors_keeps_both_sides() {
    let mut left = Notification::new();
    left.add_error("left name", Some("name"));
    left.add_error("left general", None);

    let mut right = Notification::new();
    right.add_error("left name", Some("name"));
    right.add_error("right description", Some("description"));

    left.copy_errors(&right);

    assert_eq!(left.messages("name").unwrap(), &["left name", "left name"]);
    assert_eq!(left.messages("description").unwrap(), &["right description"]);
    assert_eq!(
      left.all_messages().collect::<Vec<_>>(),
      ["left name", "left name", "left general", "right description"]
    );
    // The source is untouched.
    assert_eq!(right.entries().len(), 2);
  }
}

//! Domain model of the category catalog: value objects, the notification
//! used to collect validation errors, the `Category` aggregate, and the
//! repository contract that storage backends implement.
//!
//! Nothing here knows about HTTP or SQL.

pub mod category;
pub mod entity;
pub mod error;
pub mod id;
pub mod notification;
pub mod repository;
pub mod search;
pub mod validator;
pub mod value_object;

pub use error::{Error, Result};

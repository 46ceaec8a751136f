use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::movie::Movie;

/// Dates travel as `yyyy-MM-dd`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Actor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub dead_date: Option<NaiveDate>,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub country: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub movies: Vec<Movie>,
}

impl Actor {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

use serde::{Deserialize, Serialize};

use crate::actor::Actor;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Movie {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub title: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub country: String,
    /// Release year.
    pub release_date: Option<i32>,
    /// Running time in minutes.
    pub duration: Option<i32>,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub director: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub genre: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub synopsis: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub actors: Vec<Actor>,
}

impl Movie {
    /// No identifier yet: the remote service has never stored it.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

//! Favorite jokes organized in named collections
use crate::jokes::Joke;
use chrono::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLLECTION_ID: &str = "default";
const DEFAULT_COLLECTION_NAME: &str = "All Favorites";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub joke_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    fn new(id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            joke_ids: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn push_joke(&mut self, joke_id: &str) -> bool {
        if self.joke_ids.iter().any(|id| id == joke_id) {
            return false;
        }
        self.joke_ids.push(joke_id.to_owned());
        self.updated_at = Utc::now();
        true
    }

    fn remove_joke(&mut self, joke_id: &str) -> bool {
        let len = self.joke_ids.len();
        self.joke_ids.retain(|id| id != joke_id);

        let removed = self.joke_ids.len() != len;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

/// Favorite jokes of the user. There is always a default collection that
/// can't be deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorites {
    favorites: Vec<Joke>,
    collections: Vec<Collection>,
}

impl Default for Favorites {
    fn default() -> Self {
        Self {
            favorites: vec![],
            collections: vec![Collection::new(
                DEFAULT_COLLECTION_ID.to_owned(),
                DEFAULT_COLLECTION_NAME.to_owned(),
            )],
        }
    }
}

impl Favorites {
    pub fn favorites(&self) -> &[Joke] {
        &self.favorites
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|collection| collection.id == id)
    }

    fn collection_mut(&mut self, id: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|collection| collection.id == id)
    }

    pub fn is_favorite(&self, joke_id: &str) -> bool {
        self.favorites.iter().any(|joke| joke.id == joke_id)
    }

    /// Returns `false` if the joke is already a favorite or there is no
    /// collection with the given id. Nothing is changed in this case.
    pub fn add_favorite(&mut self, joke: Joke, collection_id: &str) -> bool {
        if self.is_favorite(&joke.id) {
            return false;
        }

        let Some(collection) = self.collection_mut(collection_id) else {
            return false;
        };

        collection.push_joke(&joke.id);
        self.favorites.push(joke);
        true
    }

    /// Removes the joke from the favorites and from every collection
    pub fn remove_favorite(&mut self, joke_id: &str) {
        self.favorites.retain(|joke| joke.id != joke_id);

        for collection in &mut self.collections {
            collection.remove_joke(joke_id);
        }
    }

    pub fn create_collection(&mut self, name: impl Into<String>) -> Collection {
        let collection = Collection::new(nanoid::nanoid!(10), name.into());
        self.collections.push(collection.clone());
        collection
    }

    /// Returns `false` if the collection doesn't exist or it is the default one
    pub fn delete_collection(&mut self, collection_id: &str) -> bool {
        if collection_id == DEFAULT_COLLECTION_ID {
            return false;
        }

        let len = self.collections.len();
        self.collections.retain(|collection| collection.id != collection_id);
        self.collections.len() != len
    }

    /// Returns `false` if the collection doesn't exist or already contains the joke
    pub fn add_joke_to_collection(&mut self, joke_id: &str, collection_id: &str) -> bool {
        self.collection_mut(collection_id)
            .is_some_and(|collection| collection.push_joke(joke_id))
    }

    pub fn remove_joke_from_collection(&mut self, joke_id: &str, collection_id: &str) -> bool {
        self.collection_mut(collection_id)
            .is_some_and(|collection| collection.remove_joke(joke_id))
    }
}

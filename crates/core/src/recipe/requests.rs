//! Request payloads for user and recipe operations.
//!
//! Pure data types shared by every storage backend. Identifier generation
//! and timestamping happen in the `into_*` conversions so that all backends
//! stamp entities identically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Credentials, Difficulty, Recipe, User};

/// Payload for registering a new user.
///
/// `password_hash` is produced by the external hashing capability before it
/// reaches the storage layer; the raw password never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub name: String,
}

impl NewUser {
    /// Convert into stored credentials, assigning a fresh user id and
    /// stamping both timestamps with `now`. Allergy and dietary lists start
    /// empty.
    pub fn into_credentials(self, now: DateTime<Utc>) -> Credentials {
        Credentials {
            user: User {
                id: Uuid::new_v4(),
                username: self.username,
                email: self.email,
                name: self.name,
                allergies: Vec::new(),
                dietary_restrictions: Vec::new(),
                created_at: now,
                updated_at: now,
            },
            password_hash: self.password_hash,
        }
    }
}

/// Payload for a profile update.
///
/// Exactly these three fields are mutable on a user; username, email and id
/// are immutable after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

/// Payload for creating a new recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub category: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl NewRecipe {
    /// Convert into a recipe owned by `user_id`, assigning a fresh recipe id
    /// and stamping both timestamps with `now`. The version counter starts
    /// at 1.
    pub fn into_recipe(self, user_id: Uuid, now: DateTime<Utc>) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            user_id,
            title: self.title,
            description: self.description,
            ingredients: self.ingredients,
            steps: self.steps,
            category: self.category,
            difficulty: self.difficulty,
            cooking_time_minutes: self.cooking_time_minutes,
            servings: self.servings,
            tags: self.tags,
            image_url: self.image_url,
            youtube_url: self.youtube_url,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a recipe.
///
/// Absent fields are left completely untouched by the update; there is no
/// "clear" form. Key attributes and ownership are never part of a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl RecipePatch {
    /// Create an empty patch. Applying it still refreshes `updated_at` and
    /// bumps the version counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.steps.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
            && self.cooking_time_minutes.is_none()
            && self.servings.is_none()
            && self.tags.is_none()
            && self.image_url.is_none()
            && self.youtube_url.is_none()
    }

    /// Set the recipe title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the recipe description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the ingredient list.
    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = Some(ingredients);
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Apply this patch to a recipe, refreshing `updated_at` and bumping the
    /// version counter. Used by backends that rewrite whole values instead
    /// of issuing expression-based updates.
    pub fn apply(self, recipe: &mut Recipe, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            recipe.title = title;
        }
        if let Some(description) = self.description {
            recipe.description = Some(description);
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(steps) = self.steps {
            recipe.steps = steps;
        }
        if let Some(category) = self.category {
            recipe.category = category;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(cooking_time) = self.cooking_time_minutes {
            recipe.cooking_time_minutes = cooking_time;
        }
        if let Some(servings) = self.servings {
            recipe.servings = Some(servings);
        }
        if let Some(tags) = self.tags {
            recipe.tags = tags;
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = Some(image_url);
        }
        if let Some(youtube_url) = self.youtube_url {
            recipe.youtube_url = Some(youtube_url);
        }
        recipe.version += 1;
        recipe.updated_at = now;
    }
}

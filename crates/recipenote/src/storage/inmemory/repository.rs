//! In-memory repository implementation.
//!
//! Behavior-equivalent to the DynamoDB backend: identical stamping,
//! sort-key-descending pagination with opaque cursors, idempotent delete,
//! and a conditional create keyed on the generated id only. Data is not
//! persisted and is lost when the repository is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use recipenote_core::recipe::{
    validate_new_recipe, validate_new_user, validate_profile_update, validate_recipe_patch,
    Credentials, NewRecipe, NewUser, ProfileUpdate, Recipe, RecipePatch, User,
};
use recipenote_core::storage::{
    Page, PageRequest, RecipeRepository, RepositoryError, Result, UserRepository,
};

/// In-memory storage backend for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<Uuid, Credentials>>>,
    recipes: Arc<RwLock<HashMap<(Uuid, Uuid), Recipe>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store credentials only if no user with the same id exists.
    ///
    /// This mirrors the backend's conditional-write primitive exactly: the
    /// predicate is on the primary key alone, so it does not (and cannot)
    /// enforce username uniqueness. `create_user` layers the username
    /// pre-check on top.
    pub async fn put_user_if_absent(&self, credentials: Credentials) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&credentials.user.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: credentials.user.id.to_string(),
            });
        }
        users.insert(credentials.user.id, credentials);
        Ok(())
    }
}

fn encode_cursor(recipe_id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(recipe_id.to_string())
}

fn decode_cursor(cursor: &str) -> Result<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| RepositoryError::InvalidData("Malformed pagination cursor".to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| RepositoryError::InvalidData("Malformed pagination cursor".to_string()))
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        validate_new_user(&new_user).map_err(|e| RepositoryError::Validation(e.to_string()))?;

        if self.get_user_by_username(&new_user.username).await?.is_some() {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: new_user.username,
            });
        }

        let credentials = new_user.into_credentials(Utc::now());
        let user = credentials.user.clone();
        self.put_user_if_absent(credentials).await?;
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(|c| c.user.clone()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|c| c.user.username == username)
            .map(|c| c.user.clone()))
    }

    async fn get_credentials(&self, username: &str) -> Result<Option<Credentials>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|c| c.user.username == username)
            .cloned())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User> {
        validate_profile_update(&update)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let mut users = self.users.write().await;
        let credentials = users.get_mut(&id).ok_or_else(|| RepositoryError::NotFound {
            entity_type: "User",
            id: id.to_string(),
        })?;

        let user = &mut credentials.user;
        user.name = update.name;
        user.allergies = update.allergies;
        user.dietary_restrictions = update.dietary_restrictions;
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRepository {
    async fn create_recipe(&self, user_id: Uuid, new_recipe: NewRecipe) -> Result<Recipe> {
        validate_new_recipe(&new_recipe)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let recipe = new_recipe.into_recipe(user_id, Utc::now());
        let mut recipes = self.recipes.write().await;
        recipes.insert((user_id, recipe.id), recipe.clone());
        Ok(recipe)
    }

    async fn get_recipe(&self, recipe_id: Uuid) -> Result<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes.values().find(|r| r.id == recipe_id).cloned())
    }

    async fn list_recipes(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Recipe>> {
        if page.limit == 0 {
            return Err(RepositoryError::Validation(
                "limit: must be at least 1".to_string(),
            ));
        }

        let after = page.cursor.as_deref().map(decode_cursor).transpose()?;

        let recipes = self.recipes.read().await;
        let mut owned: Vec<&Recipe> = recipes
            .values()
            .filter(|r| r.user_id == user_id)
            .collect();
        // Sort keys are RECIPE#<id> with a constant prefix, so descending
        // id-string order matches the backend's newest-first SK ordering.
        owned.sort_by(|a, b| b.id.to_string().cmp(&a.id.to_string()));

        let remaining: Vec<&Recipe> = match after {
            Some(after) => owned
                .into_iter()
                .skip_while(|r| r.id.to_string() >= after)
                .collect(),
            None => owned,
        };

        let limit = page.limit as usize;
        let items: Vec<Recipe> = remaining.iter().take(limit).map(|r| (*r).clone()).collect();

        Ok(if remaining.len() > limit {
            let cursor = encode_cursor(items[items.len() - 1].id);
            Page::with_cursor(items, cursor)
        } else {
            Page::last(items)
        })
    }

    async fn update_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        patch: RecipePatch,
    ) -> Result<Recipe> {
        validate_recipe_patch(&patch)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let mut recipes = self.recipes.write().await;
        let recipe =
            recipes
                .get_mut(&(user_id, recipe_id))
                .ok_or_else(|| RepositoryError::NotFound {
                    entity_type: "Recipe",
                    id: recipe_id.to_string(),
                })?;

        patch.apply(recipe, Utc::now());
        Ok(recipe.clone())
    }

    async fn delete_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<()> {
        let mut recipes = self.recipes.write().await;
        // Deleting an absent recipe is not an error.
        recipes.remove(&(user_id, recipe_id));
        Ok(())
    }

    async fn search_recipes(&self, user_id: Uuid, query: &str) -> Result<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        let mut matches: Vec<Recipe> = recipes
            .values()
            .filter(|r| r.user_id == user_id && r.title.contains(query))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string()));
        Ok(matches)
    }
}

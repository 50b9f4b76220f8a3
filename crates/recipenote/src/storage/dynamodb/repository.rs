//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `recipenote_core::storage` on top
//! of the [`Gateway`], the key codec and the update-expression builder.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use uuid::Uuid;

use recipenote_core::recipe::{
    validate_new_recipe, validate_new_user, validate_profile_update, validate_recipe_patch,
    Credentials, NewRecipe, NewUser, ProfileUpdate, Recipe, RecipePatch, User,
};
use recipenote_core::storage::{
    Page, PageRequest, RecipeRepository, RepositoryError, Result, UserRepository,
};

use super::conversions::{
    item_to_credentials, item_to_recipe, item_to_user, recipe_to_item, string_list_to_attr,
    user_to_item,
};
use super::gateway::Gateway;
use super::keys;
use super::update::UpdateBuilder;

/// Page size used when walking a whole partition internally.
const SCAN_PAGE_SIZE: u32 = 100;

/// DynamoDB-based repository for users and recipes.
///
/// Holds a single client handle constructed once at process start; clones
/// share it. There is no ambient global client; the handle is injected.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    gateway: Gateway,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table
    /// name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            gateway: Gateway::new(client, table_name),
        }
    }

    /// Creates a new repository from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain and reads the table name
    /// from `DYNAMODB_TABLE_NAME` (defaults to "recipenote-main").
    pub async fn from_env() -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);
        let table_name =
            std::env::var("DYNAMODB_TABLE_NAME").unwrap_or_else(|_| "recipenote-main".to_string());

        Ok(Self::new(client, table_name))
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        self.gateway.table_name()
    }
}

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        validate_new_user(&new_user).map_err(|e| RepositoryError::Validation(e.to_string()))?;

        // Read-before-write rejects every sequential duplicate. The
        // conditional put below only guards the freshly generated id, and
        // GSI1 is eventually consistent, so two concurrent registrations of
        // the same username can still both land.
        if self.get_user_by_username(&new_user.username).await?.is_some() {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: new_user.username,
            });
        }

        let credentials = new_user.into_credentials(Utc::now());
        let user = credentials.user.clone();

        self.gateway
            .put_item_if_absent(user_to_item(&credentials), "User", user.username.clone())
            .await?;

        tracing::debug!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let item = self
            .gateway
            .get_item(keys::user_pk(id), keys::user_sk().to_string())
            .await?;

        match item {
            Some(item) => Ok(Some(item_to_user(&item)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let items = self
            .gateway
            .query_index(keys::user_gsi1_pk(username), Some(keys::user_gsi1_sk()))
            .await?;

        match items.first() {
            Some(item) => Ok(Some(item_to_user(item)?)),
            None => Ok(None),
        }
    }

    async fn get_credentials(&self, username: &str) -> Result<Option<Credentials>> {
        let items = self
            .gateway
            .query_index(keys::user_gsi1_pk(username), Some(keys::user_gsi1_sk()))
            .await?;

        match items.first() {
            Some(item) => Ok(Some(item_to_credentials(item)?)),
            None => Ok(None),
        }
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User> {
        validate_profile_update(&update)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let expression = UpdateBuilder::new()
            .set("name", AttributeValue::S(update.name))
            .set("allergies", string_list_to_attr(&update.allergies))
            .set(
                "dietaryRestrictions",
                string_list_to_attr(&update.dietary_restrictions),
            )
            .build(Utc::now());

        let item = self
            .gateway
            .update_item(
                keys::user_pk(id),
                keys::user_sk().to_string(),
                expression,
                "User",
                id.to_string(),
            )
            .await?;

        item_to_user(&item)
    }
}

#[async_trait]
impl RecipeRepository for DynamoDbRepository {
    async fn create_recipe(&self, user_id: Uuid, new_recipe: NewRecipe) -> Result<Recipe> {
        validate_new_recipe(&new_recipe)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        // Unconditional write: recipe ids are drawn from a space large
        // enough that collisions are not guarded against.
        let recipe = new_recipe.into_recipe(user_id, Utc::now());
        self.gateway
            .put_item(recipe_to_item(&recipe), "Recipe", recipe.id.to_string())
            .await?;

        tracing::debug!(recipe_id = %recipe.id, user_id = %user_id, "Recipe created");
        Ok(recipe)
    }

    async fn get_recipe(&self, recipe_id: Uuid) -> Result<Option<Recipe>> {
        let items = self
            .gateway
            .query_index(keys::recipe_gsi1_pk(recipe_id), None)
            .await?;

        match items.first() {
            Some(item) => Ok(Some(item_to_recipe(item)?)),
            None => Ok(None),
        }
    }

    async fn list_recipes(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Recipe>> {
        if page.limit == 0 {
            return Err(RepositoryError::Validation(
                "limit: must be at least 1".to_string(),
            ));
        }

        let query_page = self
            .gateway
            .query_by_prefix(
                keys::recipe_pk(user_id),
                keys::recipe_sk_prefix(),
                page.limit,
                page.cursor.as_deref(),
                true,
            )
            .await?;

        let recipes = query_page
            .items
            .iter()
            .map(item_to_recipe)
            .collect::<Result<Vec<_>>>()?;

        Ok(match query_page.next_cursor {
            Some(cursor) => Page::with_cursor(recipes, cursor),
            None => Page::last(recipes),
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

        let expression = patch_to_builder(patch).increment("version").build(Utc::now());

        // Keyed by the owner's partition: an update under the wrong owner
        // fails the existence condition and surfaces as NotFound.
        let item = self
            .gateway
            .update_item(
                keys::recipe_pk(user_id),
                keys::recipe_sk(recipe_id),
                expression,
                "Recipe",
                recipe_id.to_string(),
            )
            .await?;

        item_to_recipe(&item)
    }

    async fn delete_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<()> {
        self.gateway
            .delete_item(keys::recipe_pk(user_id), keys::recipe_sk(recipe_id))
            .await?;

        tracing::debug!(recipe_id = %recipe_id, user_id = %user_id, "Recipe deleted");
        Ok(())
    }

    async fn search_recipes(&self, user_id: Uuid, query: &str) -> Result<Vec<Recipe>> {
        // Linear scan of the owner's partition. Fine while per-user recipe
        // counts stay small; an index-backed search is out of scope.
        let mut matches = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .gateway
                .query_by_prefix(
                    keys::recipe_pk(user_id),
                    keys::recipe_sk_prefix(),
                    SCAN_PAGE_SIZE,
                    cursor.as_deref(),
                    false,
                )
                .await?;

            for item in &page.items {
                let recipe = item_to_recipe(item)?;
                if recipe.title.contains(query) {
                    matches.push(recipe);
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(matches)
    }
}

/// Translate a patch into builder entries. Unset fields never reach the
/// expression.
fn patch_to_builder(patch: RecipePatch) -> UpdateBuilder {
    UpdateBuilder::new()
        .set_opt("title", patch.title.map(AttributeValue::S))
        .set_opt("description", patch.description.map(AttributeValue::S))
        .set_opt(
            "ingredients",
            patch.ingredients.as_deref().map(string_list_to_attr),
        )
        .set_opt("steps", patch.steps.as_deref().map(string_list_to_attr))
        .set_opt("category", patch.category.map(AttributeValue::S))
        .set_opt(
            "difficulty",
            patch
                .difficulty
                .map(|d| AttributeValue::S(d.as_str().to_string())),
        )
        .set_opt(
            "cookingTime",
            patch
                .cooking_time_minutes
                .map(|m| AttributeValue::N(m.to_string())),
        )
        .set_opt(
            "servings",
            patch.servings.map(|s| AttributeValue::N(s.to_string())),
        )
        .set_opt("tags", patch.tags.as_deref().map(string_list_to_attr))
        .set_opt("imageUrl", patch.image_url.map(AttributeValue::S))
        .set_opt("youtubeUrl", patch.youtube_url.map(AttributeValue::S))
}

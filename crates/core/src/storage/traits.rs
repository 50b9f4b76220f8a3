use async_trait::async_trait;
use uuid::Uuid;

use crate::recipe::{
    Credentials, NewRecipe, NewUser, ProfileUpdate, Recipe, RecipePatch, User,
};

use super::{Page, PageRequest, Result};

/// Repository for user operations.
///
/// Implementations validate inputs before touching the backend and never
/// expose the stored password hash on a [`User`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Registers a new user.
    ///
    /// Sequential registrations with a taken username fail with
    /// `AlreadyExists`. The underlying conditional write guards the freshly
    /// generated user id, not the username, so two concurrent registrations
    /// of the same username are not guaranteed to be mutually exclusive.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Gets a user by their id.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their username, via the secondary index.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Gets a user together with their stored password hash, for the
    /// external credential-verification capability.
    async fn get_credentials(&self, username: &str) -> Result<Option<Credentials>>;

    /// Updates exactly the mutable profile fields (name, allergies, dietary
    /// restrictions) plus the `updated_at` stamp. Fails with `NotFound` if
    /// the user does not exist.
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User>;
}

/// Repository for recipe operations.
///
/// All authorization is the caller's responsibility: `get_recipe` resolves
/// any recipe id regardless of owner, and callers must compare
/// `recipe.user_id` against the acting user. Write operations are keyed by
/// the owner's partition, so a wrong-owner update or delete fails closed as
/// `NotFound` or a no-op.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Creates a recipe owned by `user_id`.
    async fn create_recipe(&self, user_id: Uuid, new_recipe: NewRecipe) -> Result<Recipe>;

    /// Gets a recipe by its id, via the secondary index. Performs no
    /// ownership check.
    async fn get_recipe(&self, recipe_id: Uuid) -> Result<Option<Recipe>>;

    /// Lists the owner's recipes newest-first, paginated by opaque cursor.
    async fn list_recipes(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Recipe>>;

    /// Applies a partial update to the recipe at `(user_id, recipe_id)`.
    /// Unnamed fields are untouched; `updated_at` is refreshed and the
    /// version counter incremented. Fails with `NotFound` if that exact
    /// composite key does not exist.
    async fn update_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        patch: RecipePatch,
    ) -> Result<Recipe>;

    /// Deletes the recipe at `(user_id, recipe_id)`. Deleting an absent
    /// recipe is not an error.
    async fn delete_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<()>;

    /// Linear scan of the owner's recipes, filtered by case-sensitive
    /// substring containment on the title. Not index-backed; acceptable
    /// only because per-user recipe counts stay small.
    async fn search_recipes(&self, user_id: Uuid, query: &str) -> Result<Vec<Recipe>>;
}

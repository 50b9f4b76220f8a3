//! Recipe and user domain types.

mod requests;
mod types;
mod validation;

pub use requests::{NewRecipe, NewUser, ProfileUpdate, RecipePatch};
pub use types::{Credentials, Difficulty, Recipe, User};
pub use validation::{
    validate_new_recipe, validate_new_user, validate_profile_update, validate_recipe_patch,
    ValidationError,
};

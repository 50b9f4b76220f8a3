//! Input validation for user and recipe payloads.
//!
//! Pure functions, run before any backend call. Limits mirror the ones the
//! HTTP layer advertises to clients.

use thiserror::Error;

use super::requests::{NewRecipe, NewUser, ProfileUpdate, RecipePatch};

/// A rejected input, with a caller-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

type Result = std::result::Result<(), ValidationError>;

fn check_username(username: &str) -> Result {
    let len = username.chars().count();
    if !(4..=20).contains(&len) {
        return Err(ValidationError::new(
            "username",
            "must be between 4 and 20 characters",
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new(
            "username",
            "must contain only letters and digits",
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result {
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(ValidationError::new("email", "is not a valid address")),
    }
}

fn check_name(name: &str) -> Result {
    let len = name.chars().count();
    if !(2..=50).contains(&len) {
        return Err(ValidationError::new(
            "name",
            "must be between 2 and 50 characters",
        ));
    }
    Ok(())
}

fn check_title(title: &str) -> Result {
    let len = title.chars().count();
    if !(2..=100).contains(&len) {
        return Err(ValidationError::new(
            "title",
            "must be between 2 and 100 characters",
        ));
    }
    Ok(())
}

fn check_description(description: &str) -> Result {
    if description.chars().count() > 500 {
        return Err(ValidationError::new(
            "description",
            "must be at most 500 characters",
        ));
    }
    Ok(())
}

fn check_cooking_time(minutes: u32) -> Result {
    if minutes == 0 {
        return Err(ValidationError::new(
            "cookingTime",
            "must be at least 1 minute",
        ));
    }
    Ok(())
}

fn check_servings(servings: u32) -> Result {
    if servings == 0 {
        return Err(ValidationError::new("servings", "must be at least 1"));
    }
    Ok(())
}

/// Validate a registration payload.
pub fn validate_new_user(new_user: &NewUser) -> Result {
    check_username(&new_user.username)?;
    check_email(&new_user.email)?;
    check_name(&new_user.name)?;
    if new_user.password_hash.is_empty() {
        return Err(ValidationError::new("passwordHash", "must not be empty"));
    }
    Ok(())
}

/// Validate a profile update payload.
pub fn validate_profile_update(update: &ProfileUpdate) -> Result {
    check_name(&update.name)
}

/// Validate a new recipe payload.
pub fn validate_new_recipe(new_recipe: &NewRecipe) -> Result {
    check_title(&new_recipe.title)?;
    if let Some(description) = &new_recipe.description {
        check_description(description)?;
    }
    if new_recipe.ingredients.is_empty() {
        return Err(ValidationError::new(
            "ingredients",
            "must contain at least one item",
        ));
    }
    if new_recipe.steps.is_empty() {
        return Err(ValidationError::new(
            "steps",
            "must contain at least one item",
        ));
    }
    if new_recipe.category.is_empty() {
        return Err(ValidationError::new("category", "must not be empty"));
    }
    check_cooking_time(new_recipe.cooking_time_minutes)?;
    if let Some(servings) = new_recipe.servings {
        check_servings(servings)?;
    }
    Ok(())
}

/// Validate a recipe patch. Only set fields are checked; an empty patch is
/// valid.
pub fn validate_recipe_patch(patch: &RecipePatch) -> Result {
    if let Some(title) = &patch.title {
        check_title(title)?;
    }
    if let Some(description) = &patch.description {
        check_description(description)?;
    }
    if let Some(ingredients) = &patch.ingredients {
        if ingredients.is_empty() {
            return Err(ValidationError::new(
                "ingredients",
                "must contain at least one item",
            ));
        }
    }
    if let Some(steps) = &patch.steps {
        if steps.is_empty() {
            return Err(ValidationError::new(
                "steps",
                "must contain at least one item",
            ));
        }
    }
    if let Some(category) = &patch.category {
        if category.is_empty() {
            return Err(ValidationError::new("category", "must not be empty"));
        }
    }
    if let Some(minutes) = patch.cooking_time_minutes {
        check_cooking_time(minutes)?;
    }
    if let Some(servings) = patch.servings {
        check_servings(servings)?;
    }
    Ok(())
}

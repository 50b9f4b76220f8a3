//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types, testable in isolation without DynamoDB access. Attribute
//! names are camelCase to stay compatible with existing stored data.
//!
//! The stored `passwordHash` attribute is only surfaced by
//! [`item_to_credentials`]; [`item_to_user`] drops it so the hash can never
//! leak through an ordinary lookup.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use recipenote_core::recipe::{Credentials, Difficulty, Recipe, User};
use recipenote_core::storage::RepositoryError;

use super::keys;

pub type Item = HashMap<String, AttributeValue>;

pub const ENTITY_TYPE_USER: &str = "USER";
pub const ENTITY_TYPE_RECIPE: &str = "RECIPE";

/// Convert stored user credentials to a DynamoDB item.
pub fn user_to_item(credentials: &Credentials) -> Item {
    let user = &credentials.user;
    let mut item = HashMap::new();

    // Keys
    item.insert("PK".to_string(), AttributeValue::S(keys::user_pk(user.id)));
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::user_sk().to_string()),
    );
    item.insert(
        "GSI1PK".to_string(),
        AttributeValue::S(keys::user_gsi1_pk(&user.username)),
    );
    item.insert(
        "GSI1SK".to_string(),
        AttributeValue::S(keys::user_gsi1_sk().to_string()),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_USER.to_string()),
    );

    // Data
    item.insert(
        "userId".to_string(),
        AttributeValue::S(user.id.to_string()),
    );
    item.insert(
        "username".to_string(),
        AttributeValue::S(user.username.clone()),
    );
    item.insert(
        "passwordHash".to_string(),
        AttributeValue::S(credentials.password_hash.clone()),
    );
    item.insert("email".to_string(), AttributeValue::S(user.email.clone()));
    item.insert("name".to_string(), AttributeValue::S(user.name.clone()));
    item.insert(
        "allergies".to_string(),
        string_list_to_attr(&user.allergies),
    );
    item.insert(
        "dietaryRestrictions".to_string(),
        string_list_to_attr(&user.dietary_restrictions),
    );
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(user.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(user.updated_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to a User. The stored password hash is ignored.
pub fn item_to_user(item: &Item) -> Result<User, RepositoryError> {
    Ok(User {
        id: get_uuid(item, "userId")?,
        username: get_string(item, "username")?,
        email: get_string(item, "email")?,
        name: get_string(item, "name")?,
        allergies: get_string_list(item, "allergies")?,
        dietary_restrictions: get_string_list(item, "dietaryRestrictions")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

/// Convert a DynamoDB item to Credentials, including the stored hash.
pub fn item_to_credentials(item: &Item) -> Result<Credentials, RepositoryError> {
    Ok(Credentials {
        user: item_to_user(item)?,
        password_hash: get_string(item, "passwordHash")?,
    })
}

/// Convert a Recipe to a DynamoDB item.
pub fn recipe_to_item(recipe: &Recipe) -> Item {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "PK".to_string(),
        AttributeValue::S(keys::recipe_pk(recipe.user_id)),
    );
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::recipe_sk(recipe.id)),
    );
    item.insert(
        "GSI1PK".to_string(),
        AttributeValue::S(keys::recipe_gsi1_pk(recipe.id)),
    );
    item.insert(
        "GSI1SK".to_string(),
        AttributeValue::S(keys::recipe_gsi1_sk(recipe.user_id)),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_RECIPE.to_string()),
    );

    // Data
    item.insert(
        "recipeId".to_string(),
        AttributeValue::S(recipe.id.to_string()),
    );
    item.insert(
        "userId".to_string(),
        AttributeValue::S(recipe.user_id.to_string()),
    );
    item.insert("title".to_string(), AttributeValue::S(recipe.title.clone()));
    if let Some(description) = &recipe.description {
        item.insert(
            "description".to_string(),
            AttributeValue::S(description.clone()),
        );
    }
    item.insert(
        "ingredients".to_string(),
        string_list_to_attr(&recipe.ingredients),
    );
    item.insert("steps".to_string(), string_list_to_attr(&recipe.steps));
    item.insert(
        "category".to_string(),
        AttributeValue::S(recipe.category.clone()),
    );
    item.insert(
        "difficulty".to_string(),
        AttributeValue::S(recipe.difficulty.as_str().to_string()),
    );
    item.insert(
        "cookingTime".to_string(),
        AttributeValue::N(recipe.cooking_time_minutes.to_string()),
    );
    if let Some(servings) = recipe.servings {
        item.insert("servings".to_string(), AttributeValue::N(servings.to_string()));
    }
    item.insert("tags".to_string(), string_list_to_attr(&recipe.tags));
    if let Some(image_url) = &recipe.image_url {
        item.insert("imageUrl".to_string(), AttributeValue::S(image_url.clone()));
    }
    if let Some(youtube_url) = &recipe.youtube_url {
        item.insert(
            "youtubeUrl".to_string(),
            AttributeValue::S(youtube_url.clone()),
        );
    }
    item.insert(
        "version".to_string(),
        AttributeValue::N(recipe.version.to_string()),
    );
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(recipe.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(recipe.updated_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to a Recipe.
pub fn item_to_recipe(item: &Item) -> Result<Recipe, RepositoryError> {
    Ok(Recipe {
        id: get_uuid(item, "recipeId")?,
        user_id: get_uuid(item, "userId")?,
        title: get_string(item, "title")?,
        description: get_optional_string(item, "description"),
        ingredients: get_string_list(item, "ingredients")?,
        steps: get_string_list(item, "steps")?,
        category: get_string(item, "category")?,
        difficulty: parse_difficulty(&get_string(item, "difficulty")?)?,
        cooking_time_minutes: get_number(item, "cookingTime")?,
        servings: get_optional_number(item, "servings")?,
        tags: get_string_list(item, "tags")?,
        image_url: get_optional_string(item, "imageUrl"),
        youtube_url: get_optional_string(item, "youtubeUrl"),
        // Items written before the counter existed read as version 1.
        version: get_optional_number(item, "version")?.unwrap_or(1),
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

/// Parse a stored difficulty string.
pub fn parse_difficulty(s: &str) -> Result<Difficulty, RepositoryError> {
    s.parse::<Difficulty>().map_err(RepositoryError::InvalidData)
}

/// Encode a list of strings as a DynamoDB list attribute. String sets are
/// avoided because they cannot be empty.
pub fn string_list_to_attr(values: &[String]) -> AttributeValue {
    AttributeValue::L(
        values
            .iter()
            .map(|v| AttributeValue::S(v.clone()))
            .collect(),
    )
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required UUID attribute.
fn get_uuid(item: &Item, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

/// Get a required list-of-strings attribute.
fn get_string_list(item: &Item, key: &str) -> Result<Vec<String>, RepositoryError> {
    let values = item
        .get(key)
        .and_then(|v| v.as_l().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;

    values
        .iter()
        .map(|v| {
            v.as_s().map(|s| s.to_string()).map_err(|_| {
                RepositoryError::InvalidData(format!("Non-string element in list: {}", key))
            })
        })
        .collect()
}

/// Get a required numeric attribute.
fn get_number<T: std::str::FromStr>(item: &Item, key: &str) -> Result<T, RepositoryError> {
    let s = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;

    s.parse::<T>()
        .map_err(|_| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, s)))
}

/// Get an optional numeric attribute.
fn get_optional_number<T: std::str::FromStr>(
    item: &Item,
    key: &str,
) -> Result<Option<T>, RepositoryError> {
    match item.get(key) {
        Some(_) => get_number(item, key).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_credentials() -> Credentials {
        Credentials {
            user: User {
                id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                name: "Alice".to_string(),
                allergies: vec!["peanut".to_string()],
                dietary_restrictions: vec![],
                created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
                updated_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
            },
            password_hash: "$2b$10$secret-hash".to_string(),
        }
    }

    fn sample_recipe() -> Recipe {
        Recipe {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap(),
            user_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            title: "Kimchi Stew".to_string(),
            description: Some("Spicy and warming".to_string()),
            ingredients: vec!["kimchi".to_string(), "pork belly".to_string()],
            steps: vec!["Fry pork".to_string(), "Simmer".to_string()],
            category: "Korean".to_string(),
            difficulty: Difficulty::Normal,
            cooking_time_minutes: 40,
            servings: Some(2),
            tags: vec!["stew".to_string()],
            image_url: None,
            youtube_url: Some("https://youtu.be/abc".to_string()),
            version: 3,
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339("2024-02-01T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn test_user_item_has_correct_keys() {
        let item = user_to_item(&sample_credentials());

        assert_eq!(
            item.get("PK").unwrap().as_s().unwrap(),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(item.get("SK").unwrap().as_s().unwrap(), "PROFILE");
        assert_eq!(
            item.get("GSI1PK").unwrap().as_s().unwrap(),
            "USERNAME#alice"
        );
        assert_eq!(item.get("GSI1SK").unwrap().as_s().unwrap(), "USER");
        assert_eq!(item.get("entityType").unwrap().as_s().unwrap(), "USER");
    }

    #[test]
    fn test_item_to_user_drops_password_hash() {
        let credentials = sample_credentials();
        let item = user_to_item(&credentials);
        let user = item_to_user(&item).unwrap();

        assert_eq!(user, credentials.user);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }

    #[test]
    fn test_credentials_round_trip() {
        let credentials = sample_credentials();
        let item = user_to_item(&credentials);
        let parsed = item_to_credentials(&item).unwrap();

        assert_eq!(parsed, credentials);
    }

    #[test]
    fn test_recipe_round_trip() {
        let recipe = sample_recipe();
        let item = recipe_to_item(&recipe);
        let parsed = item_to_recipe(&item).unwrap();

        assert_eq!(parsed, recipe);
    }

    #[test]
    fn test_recipe_item_has_correct_keys() {
        let item = recipe_to_item(&sample_recipe());

        assert_eq!(
            item.get("PK").unwrap().as_s().unwrap(),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(
            item.get("SK").unwrap().as_s().unwrap(),
            "RECIPE#550e8400-e29b-41d4-a716-446655440002"
        );
        assert_eq!(
            item.get("GSI1PK").unwrap().as_s().unwrap(),
            "RECIPE#550e8400-e29b-41d4-a716-446655440002"
        );
        assert_eq!(
            item.get("GSI1SK").unwrap().as_s().unwrap(),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(item.get("entityType").unwrap().as_s().unwrap(), "RECIPE");
    }

    #[test]
    fn test_recipe_without_optional_fields() {
        let mut recipe = sample_recipe();
        recipe.description = None;
        recipe.servings = None;
        recipe.youtube_url = None;

        let item = recipe_to_item(&recipe);
        assert!(!item.contains_key("description"));
        assert!(!item.contains_key("servings"));
        assert!(!item.contains_key("youtubeUrl"));

        let parsed = item_to_recipe(&item).unwrap();
        assert_eq!(parsed, recipe);
    }

    #[test]
    fn test_missing_version_defaults_to_one() {
        let mut item = recipe_to_item(&sample_recipe());
        item.remove("version");
        assert_eq!(item_to_recipe(&item).unwrap().version, 1);
    }

    #[test]
    fn test_item_with_missing_field_is_invalid() {
        let mut item = recipe_to_item(&sample_recipe());
        item.remove("title");
        assert!(matches!(
            item_to_recipe(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_unknown_difficulty_is_invalid() {
        let mut item = recipe_to_item(&sample_recipe());
        item.insert(
            "difficulty".to_string(),
            AttributeValue::S("legendary".to_string()),
        );
        assert!(matches!(
            item_to_recipe(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }
}

//! DynamoDB key generation functions.
//!
//! Pure functions producing the physical keys of the single-table design.
//! For stored-data interop, the key shapes are fixed:
//!
//! - User: `PK = USER#<user_id>`, `SK = PROFILE`,
//!   `GSI1PK = USERNAME#<username>`, `GSI1SK = USER`
//! - Recipe: `PK = USER#<user_id>`, `SK = RECIPE#<recipe_id>`,
//!   `GSI1PK = RECIPE#<recipe_id>`, `GSI1SK = USER#<user_id>`

use uuid::Uuid;

pub const USER_PREFIX: &str = "USER#";
pub const RECIPE_PREFIX: &str = "RECIPE#";
pub const USERNAME_PREFIX: &str = "USERNAME#";

/// Sort key of the single profile item each user has.
pub const PROFILE_SK: &str = "PROFILE";

/// GSI1 sort key of every user item, making the username lookup an exact
/// match.
pub const USER_GSI1_SK: &str = "USER";

/// Generate primary partition key for a User.
///
/// Pattern: `USER#<user_id>`
pub fn user_pk(user_id: Uuid) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate sort key for a User profile.
///
/// Pattern: `PROFILE` (one profile item per user partition)
pub fn user_sk() -> &'static str {
    PROFILE_SK
}

/// Generate GSI1 partition key for username lookup.
///
/// Pattern: `USERNAME#<username>`
pub fn user_gsi1_pk(username: &str) -> String {
    format!("{USERNAME_PREFIX}{username}")
}

/// Generate GSI1 sort key for username lookup.
///
/// Pattern: `USER`
pub fn user_gsi1_sk() -> &'static str {
    USER_GSI1_SK
}

/// Generate primary partition key for a Recipe.
///
/// Pattern: `USER#<user_id>` (recipes live in their owner's partition)
pub fn recipe_pk(user_id: Uuid) -> String {
    user_pk(user_id)
}

/// Generate sort key for a Recipe.
///
/// Pattern: `RECIPE#<recipe_id>`
pub fn recipe_sk(recipe_id: Uuid) -> String {
    format!("{RECIPE_PREFIX}{recipe_id}")
}

/// Generate GSI1 partition key for recipe-id lookup.
///
/// Pattern: `RECIPE#<recipe_id>`
pub fn recipe_gsi1_pk(recipe_id: Uuid) -> String {
    format!("{RECIPE_PREFIX}{recipe_id}")
}

/// Generate GSI1 sort key for recipe-id lookup, resolving the owner.
///
/// Pattern: `USER#<user_id>`
pub fn recipe_gsi1_sk(user_id: Uuid) -> String {
    user_pk(user_id)
}

/// Generate the sort-key prefix for listing all recipes in a partition.
///
/// Pattern: `RECIPE#`
pub fn recipe_sk_prefix() -> &'static str {
    RECIPE_PREFIX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_pk() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();
        assert_eq!(user_pk(id), "USER#550e8400-e29b-41d4-a716-446655440001");
    }

    #[test]
    fn test_user_sk_is_profile() {
        assert_eq!(user_sk(), "PROFILE");
    }

    #[test]
    fn test_user_gsi1_keys() {
        assert_eq!(user_gsi1_pk("alice"), "USERNAME#alice");
        assert_eq!(user_gsi1_sk(), "USER");
    }

    #[test]
    fn test_recipe_keys_are_owner_scoped() {
        let user_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();
        let recipe_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap();

        assert_eq!(
            recipe_pk(user_id),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(
            recipe_sk(recipe_id),
            "RECIPE#550e8400-e29b-41d4-a716-446655440002"
        );
    }

    #[test]
    fn test_recipe_gsi1_keys_invert_the_primary_key() {
        let user_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();
        let recipe_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap();

        assert_eq!(
            recipe_gsi1_pk(recipe_id),
            "RECIPE#550e8400-e29b-41d4-a716-446655440002"
        );
        assert_eq!(
            recipe_gsi1_sk(user_id),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
    }

    #[test]
    fn test_recipe_sk_prefix() {
        assert_eq!(recipe_sk_prefix(), "RECIPE#");
    }
}

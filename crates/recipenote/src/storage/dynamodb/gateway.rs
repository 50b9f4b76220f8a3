//! Storage gateway over the DynamoDB client.
//!
//! Normalizes the handful of single-table operations the repositories need
//! and owns the error translation for each. The gateway knows nothing about
//! entities or ownership; it works in terms of physical keys and attribute
//! maps. One gateway wraps one client handle and one table name, both fixed
//! at construction.

use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use recipenote_core::storage::Result;

use super::conversions::Item;
use super::cursor::{decode_cursor, encode_cursor};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_update_item_error,
};
use super::update::UpdateExpression;

/// Secondary index name for username and recipe-id lookups.
pub const GSI1: &str = "GSI1";

/// Caller-supplied limits are u32; the query API takes i32. Clamp instead
/// of casting so an oversized limit cannot wrap negative.
fn page_limit(limit: u32) -> i32 {
    i32::try_from(limit).unwrap_or(i32::MAX)
}

/// One page of raw items from a prefix query.
#[derive(Debug, Clone)]
pub struct QueryPage {
    pub items: Vec<Item>,
    /// Opaque continuation token, present when the backend reports more
    /// items beyond this page.
    pub next_cursor: Option<String>,
}

/// Thin wrapper over one DynamoDB client and table.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    table_name: String,
}

impl Gateway {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fetch a single item by its composite primary key.
    pub async fn get_item(&self, pk: String, sk: String) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk))
            .key("SK", AttributeValue::S(sk))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    /// Write an item unconditionally, replacing any existing item at its
    /// key.
    pub async fn put_item(&self, item: Item, entity_type: &'static str, id: String) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, entity_type, id))?;

        Ok(())
    }

    /// Write an item only if its primary key does not already exist.
    ///
    /// The condition is expressed against the item's own primary key, the
    /// only predicate the backend can enforce atomically. It cannot stand
    /// in for uniqueness of secondary-index attributes.
    pub async fn put_item_if_absent(
        &self,
        item: Item,
        entity_type: &'static str,
        id: String,
    ) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, entity_type, id))?;

        Ok(())
    }

    /// Apply a partial update to an existing item, returning the full item
    /// after the update. Touches only the attributes named by the
    /// expression. Fails with `NotFound` when the key does not exist.
    pub async fn update_item(
        &self,
        pk: String,
        sk: String,
        update: UpdateExpression,
        entity_type: &'static str,
        id: String,
    ) -> Result<Item> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk))
            .key("SK", AttributeValue::S(sk))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .condition_expression("attribute_exists(PK)")
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, entity_type, id))?;

        Ok(result.attributes.unwrap_or_default())
    }

    /// Delete an item by its composite primary key. Deleting an absent key
    /// succeeds.
    pub async fn delete_item(&self, pk: String, sk: String) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(pk))
            .key("SK", AttributeValue::S(sk))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    /// Query a partition for items whose sort key begins with `sk_prefix`,
    /// ordered by sort key (descending when `newest_first`), resuming from
    /// an opaque cursor when given.
    pub async fn query_by_prefix(
        &self,
        pk: String,
        sk_prefix: &str,
        limit: u32,
        cursor: Option<&str>,
        newest_first: bool,
    ) -> Result<QueryPage> {
        let exclusive_start_key = cursor.map(decode_cursor).transpose()?;

        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
            .expression_attribute_values(":pk", AttributeValue::S(pk))
            .expression_attribute_values(":sk_prefix", AttributeValue::S(sk_prefix.to_string()))
            .limit(page_limit(limit))
            .scan_index_forward(!newest_first)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(map_query_error)?;

        let next_cursor = result
            .last_evaluated_key
            .as_ref()
            .map(encode_cursor)
            .transpose()?;

        Ok(QueryPage {
            items: result.items.unwrap_or_default(),
            next_cursor,
        })
    }

    /// Query the secondary index by partition key, with an optional exact
    /// match on the index sort key.
    pub async fn query_index(
        &self,
        gsi1_pk: String,
        gsi1_sk: Option<&str>,
    ) -> Result<Vec<Item>> {
        let mut query = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(GSI1)
            .expression_attribute_values(":pk", AttributeValue::S(gsi1_pk));

        query = match gsi1_sk {
            Some(sk) => query
                .key_condition_expression("GSI1PK = :pk AND GSI1SK = :sk")
                .expression_attribute_values(":sk", AttributeValue::S(sk.to_string())),
            None => query.key_condition_expression("GSI1PK = :pk"),
        };

        let result = query.send().await.map_err(map_query_error)?;
        Ok(result.items.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_limit_clamps_instead_of_wrapping() {
        assert_eq!(page_limit(20), 20);
        assert_eq!(page_limit(i32::MAX as u32), i32::MAX);
        assert_eq!(page_limit(u32::MAX), i32::MAX);
    }
}

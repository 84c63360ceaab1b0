//! Group endpoints.
//!
//! ref: <https://developer.zendesk.com/api-reference/ticketing/groups/groups/>

use crate::client::Client;
use crate::envelope;
use crate::error::ZendeskError;
use crate::models::{Group, GroupListOptions};
use crate::pagination::{
    CursorOptions, CursorPaginationMeta, OffsetOptions, Page, PageIterator, PaginationOptions,
};

const GROUPS_PATH: &str = "/groups.json";

fn group_path(group_id: i64) -> String {
    format!("/groups/{}.json", group_id)
}

impl Client {
    /// Lists groups one page at a time.
    pub async fn get_groups(
        &self,
        opts: Option<&GroupListOptions>,
    ) -> Result<(Vec<Group>, Page), ZendeskError> {
        self.list_offset(GROUPS_PATH, "groups", &opts).await
    }

    /// Lists groups with offset pagination and sorting.
    pub async fn get_groups_offset(
        &self,
        opts: Option<&OffsetOptions>,
    ) -> Result<(Vec<Group>, Page), ZendeskError> {
        self.list_offset(GROUPS_PATH, "groups", &opts).await
    }

    /// Lists groups with cursor pagination.
    pub async fn get_groups_cursor(
        &self,
        opts: Option<&CursorOptions>,
    ) -> Result<(Vec<Group>, CursorPaginationMeta), ZendeskError> {
        self.list_cursor(GROUPS_PATH, "groups", &opts).await
    }

    /// Walks every group, fetching pages lazily.
    ///
    /// ```ignore
    /// let mut groups = client.groups_iter(PaginationOptions::default());
    /// while let Some(group) = groups.next().await? {
    ///     println!("{}", group.name);
    /// }
    /// ```
    pub fn groups_iter(&self, opts: PaginationOptions) -> PageIterator<'_, Group> {
        PageIterator::new(self, GROUPS_PATH, "groups", opts)
    }

    /// Gets a single group.
    pub async fn get_group(&self, group_id: i64) -> Result<Group, ZendeskError> {
        let body = self.get(&group_path(group_id)).await?;
        envelope::unwrap("group", &body)
    }

    /// Creates a group and returns it as stored by the server.
    pub async fn create_group(&self, group: &Group) -> Result<Group, ZendeskError> {
        let data = envelope::wrap("group", group)?;
        let body = self.post(GROUPS_PATH, &data).await?;

        let created: Group = envelope::unwrap("group", &body)?;
        tracing::info!(group_id = ?created.id, "Created group");
        Ok(created)
    }

    /// Updates a group and returns the new state.
    pub async fn update_group(&self, group_id: i64, group: &Group) -> Result<Group, ZendeskError> {
        let data = envelope::wrap("group", group)?;
        let body = self.put(&group_path(group_id), &data).await?;
        envelope::unwrap("group", &body)
    }

    /// Deletes a group.
    pub async fn delete_group(&self, group_id: i64) -> Result<(), ZendeskError> {
        self.delete(&group_path(group_id), None::<&()>).await?;
        tracing::info!(group_id, "Deleted group");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_path() {
        assert_eq!(group_path(42), "/groups/42.json");
    }
}

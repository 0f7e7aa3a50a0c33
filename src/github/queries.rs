//! GraphQL documents and wire payloads for the GitHub API.

use serde::{Deserialize, Serialize};

use crate::types::{BranchRef, Divergence, Fork, ParentRepo, PullRequestSummary};

pub(super) const OPEN_PULL_REQUESTS_QUERY: &str = r#"
query($first: Int!, $after: String) {
  viewer {
    pullRequests(states: [OPEN], first: $first, after: $after) {
      nodes {
        headRepository { nameWithOwner }
        number
        title
        url
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

pub(super) const FORKS_QUERY: &str = r#"
query($first: Int!, $after: String) {
  viewer {
    repositories(first: $first, after: $after, isFork: true, orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        name
        nameWithOwner
        updatedAt
        isArchived
        owner { login id }
        parent {
          nameWithOwner
          defaultBranchRef { name target { oid } }
        }
        defaultBranchRef { name target { oid } }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
pub(super) struct GraphQlRequest<'a> {
    pub(super) query: &'a str,
    pub(super) variables: PageVariables,
}

#[derive(Debug, Serialize)]
pub(super) struct PageVariables {
    pub(super) first: u32,
    pub(super) after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlResponse<T> {
    pub(super) data: Option<T>,
    #[serde(default)]
    pub(super) errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlErrorEntry {
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PageInfo {
    pub(super) has_next_page: bool,
    pub(super) end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the next page, if one exists.
    pub(super) fn next_cursor(self) -> Option<String> {
        if self.has_next_page {
            self.end_cursor
        } else {
            None
        }
    }
}

/// One page of a GraphQL connection. Nodes may be null for entities the
/// viewer can no longer see.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub(super) nodes: Vec<Option<T>>,
    pub(super) page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PullRequestsData {
    pub(super) viewer: PullRequestsViewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PullRequestsViewer {
    pub(super) pull_requests: Connection<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoriesData {
    pub(super) viewer: RepositoriesViewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoriesViewer {
    pub(super) repositories: Connection<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NameWithOwner {
    pub(super) name_with_owner: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PullRequestNode {
    /// Null when the head fork has been deleted.
    pub(super) head_repository: Option<NameWithOwner>,
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) url: String,
}

impl PullRequestNode {
    /// Split into the head repository key and the summary; `None` when the
    /// head repository is gone.
    pub(super) fn into_keyed_summary(self) -> Option<(String, PullRequestSummary)> {
        let head = self.head_repository?.name_with_owner;
        if head.is_empty() {
            return None;
        }
        Some((
            head,
            PullRequestSummary {
                number: self.number,
                title: self.title,
                url: self.url,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OwnerNode {
    pub(super) login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TargetNode {
    pub(super) oid: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct BranchRefNode {
    pub(super) name: String,
    pub(super) target: Option<TargetNode>,
}

impl From<BranchRefNode> for BranchRef {
    fn from(node: BranchRefNode) -> Self {
        BranchRef {
            name: node.name,
            oid: node.target.map(|target| target.oid).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ParentNode {
    pub(super) name_with_owner: String,
    pub(super) default_branch_ref: Option<BranchRefNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoryNode {
    pub(super) name: String,
    pub(super) name_with_owner: String,
    #[serde(default)]
    pub(super) updated_at: String,
    #[serde(default)]
    pub(super) is_archived: bool,
    pub(super) owner: OwnerNode,
    pub(super) parent: Option<ParentNode>,
    pub(super) default_branch_ref: Option<BranchRefNode>,
}

impl From<RepositoryNode> for Fork {
    fn from(node: RepositoryNode) -> Self {
        Fork {
            name_with_owner: node.name_with_owner,
            name: node.name,
            owner_login: node.owner.login,
            parent: node.parent.map(|parent| ParentRepo {
                name_with_owner: parent.name_with_owner,
                default_branch: parent.default_branch_ref.map(BranchRef::from),
            }),
            default_branch: node.default_branch_ref.map(BranchRef::from),
            is_archived: node.is_archived,
            updated_at: node.updated_at,
            pull_requests: Vec::new(),
        }
    }
}

/// REST `compare` response subset.
#[derive(Debug, Deserialize)]
pub(super) struct CompareResponse {
    pub(super) ahead_by: u64,
    pub(super) behind_by: u64,
}

impl From<CompareResponse> for Divergence {
    fn from(resp: CompareResponse) -> Self {
        Divergence {
            ahead_by: resp.ahead_by,
            behind_by: resp.behind_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_node_converts_to_fork() {
        let json = r#"{
            "viewer": {"repositories": {
                "nodes": [{
                    "name": "widget",
                    "nameWithOwner": "octo/widget",
                    "updatedAt": "2024-01-02T03:04:05Z",
                    "isArchived": true,
                    "owner": {"login": "octo", "id": "U_1"},
                    "parent": {
                        "nameWithOwner": "up/widget",
                        "defaultBranchRef": {"name": "main", "target": {"oid": "abc"}}
                    },
                    "defaultBranchRef": {"name": "main", "target": {"oid": "def"}}
                }, null],
                "pageInfo": {"hasNextPage": false, "endCursor": null}
            }}
        }"#;
        let data: RepositoriesData = serde_json::from_str(json).expect("parse");
        let forks: Vec<Fork> = data
            .viewer
            .repositories
            .nodes
            .into_iter()
            .flatten()
            .map(Fork::from)
            .collect();
        assert_eq!(forks.len(), 1);
        let fork = &forks[0];
        assert_eq!(fork.owner_login, "octo");
        assert!(fork.is_archived);
        assert_eq!(fork.parent_name(), "up/widget");
        assert_eq!(
            fork.parent.as_ref().and_then(|p| p.default_branch.clone()),
            Some(BranchRef::new("main", "abc"))
        );
        assert_eq!(fork.default_branch, Some(BranchRef::new("main", "def")));
    }

    #[test]
    fn pull_request_without_head_is_dropped() {
        let node = PullRequestNode {
            head_repository: None,
            number: 1,
            title: "t".to_string(),
            url: "u".to_string(),
        };
        assert!(node.into_keyed_summary().is_none());
    }

    #[test]
    fn page_info_cursor_only_when_more_pages() {
        let more = PageInfo {
            has_next_page: true,
            end_cursor: Some("c1".to_string()),
        };
        assert_eq!(more.next_cursor().as_deref(), Some("c1"));
        let done = PageInfo {
            has_next_page: false,
            end_cursor: Some("c2".to_string()),
        };
        assert_eq!(done.next_cursor(), None);
    }
}

use tracing::debug;

use crate::error::FetchError;
use crate::model::issue::IssuesByAssignee;
use crate::providers::Provider;

/// Fetch from every provider in order and group the results by assignee.
///
/// Stops at the first failing provider; no partial result is returned.
pub async fn aggregate(providers: &[Box<dyn Provider>]) -> Result<IssuesByAssignee, FetchError> {
    let mut combined = IssuesByAssignee::new();

    for provider in providers {
        let issues = provider.fetch_items().await?;
        debug!(source = %provider.name(), count = issues.len(), "merging issues");
        combined.extend(issues);
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::providers::tests::{make_issue, MockProvider};

    #[tokio::test]
    async fn fetches_each_source_once_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let providers: Vec<Box<dyn Provider>> = vec![
            Box::new(MockProvider::new("a", calls.clone())),
            Box::new(MockProvider::new("b", calls.clone())),
            Box::new(MockProvider::new("c", calls.clone())),
        ];

        aggregate(&providers).await.unwrap();
        assert_eq!(calls.lock().unwrap().as_slice(), &["a", "b", "c"]);
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let providers: Vec<Box<dyn Provider>> = vec![
            Box::new(
                MockProvider::new("a", calls.clone())
                    .with_issues(vec![make_issue(1, "Alice", "a/")]),
            ),
            Box::new(MockProvider::new("b", calls.clone()).with_failure()),
            Box::new(MockProvider::new("c", calls.clone())),
        ];

        let err = aggregate(&providers).await.unwrap_err();
        assert!(err.to_string().starts_with("b:"));
        assert_eq!(calls.lock().unwrap().as_slice(), &["a", "b"]);
    }

    #[tokio::test]
    async fn same_assignee_across_sources_in_fetch_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let providers: Vec<Box<dyn Provider>> = vec![
            Box::new(MockProvider::new("a", calls.clone()).with_issues(vec![
                make_issue(1, "Alice", "a/"),
                make_issue(2, "Bob", "a/"),
            ])),
            Box::new(MockProvider::new("b", calls.clone()).with_issues(vec![
                make_issue(1, "Alice", "b/"),
                make_issue(9, "", "b/"),
            ])),
        ];

        let map = aggregate(&providers).await.unwrap();

        let alice: Vec<(u64, &str)> = map
            .get("Alice")
            .unwrap()
            .iter()
            .map(|i| (i.ticket_id, i.source_link.as_str()))
            .collect();
        assert_eq!(alice, vec![(1, "a/"), (1, "b/")]);
        assert_eq!(map.get("").unwrap().len(), 1);
        assert_eq!(map.issue_count(), 4);
    }

    #[tokio::test]
    async fn no_sources_gives_empty_map() {
        let map = aggregate(&[]).await.unwrap();
        assert!(map.is_empty());
    }
}

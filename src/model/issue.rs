use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub ticket_id: u64,
    pub project: String,
    pub tracker: String,
    pub status: String,
    /// Empty when the issue is unassigned.
    pub assignee: String,
    pub subject: String,
    /// Base URL of the Redmine instance the issue came from.
    pub source_link: String,
}

impl Issue {
    pub fn url(&self) -> String {
        format!("{}issues/{}", self.source_link, self.ticket_id)
    }
}

/// Issues grouped by assignee name.
///
/// Assignees keep the order in which they were first seen, and each group keeps
/// the order in which its issues were pushed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IssuesByAssignee {
    groups: Vec<(String, Vec<Issue>)>,
    index: HashMap<String, usize>,
}

impl IssuesByAssignee {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        match self.index.get(&issue.assignee) {
            Some(&i) => self.groups[i].1.push(issue),
            None => {
                self.index.insert(issue.assignee.clone(), self.groups.len());
                self.groups.push((issue.assignee.clone(), vec![issue]));
            }
        }
    }

    pub fn get(&self, assignee: &str) -> Option<&[Issue]> {
        self.index
            .get(assignee)
            .map(|&i| self.groups[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Issue])> {
        self.groups
            .iter()
            .map(|(name, issues)| (name.as_str(), issues.as_slice()))
    }

    /// Number of distinct assignees.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.groups.iter().map(|(_, issues)| issues.len()).sum()
    }
}

impl Extend<Issue> for IssuesByAssignee {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        for issue in iter {
            self.push(issue);
        }
    }
}

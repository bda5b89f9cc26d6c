use crate::error::TemplateError;
use crate::model::issue::{Issue, IssuesByAssignee};

const ROWS_PLACEHOLDER: &str = "{{rows}}";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>今日の活動</title>
    <link rel="icon" href="data:,">
    <meta charset="utf-8">
</head>
<body>
    <table border="1">
    <tr>
    <th>チケット</th>
    <th>プロジェクト</th>
    <th>トラッカー</th>
    <th>ステータス</th>
    <th>題名</th>
    <th>担当者</th>
    </tr>
{{rows}}    </table>
</body>
</html>
"#;

/// A page split around its single `{{rows}}` placeholder.
#[derive(Debug, Clone)]
pub struct Template {
    head: String,
    tail: String,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let (head, tail) = source
            .split_once(ROWS_PLACEHOLDER)
            .ok_or(TemplateError::MissingPlaceholder)?;
        if tail.contains(ROWS_PLACEHOLDER) {
            return Err(TemplateError::DuplicatePlaceholder);
        }
        Ok(Self {
            head: head.to_string(),
            tail: tail.to_string(),
        })
    }

    /// The built-in issue table page.
    pub fn page() -> Result<Self, TemplateError> {
        Self::parse(PAGE_TEMPLATE)
    }

    /// One table row per issue, assignees in map order.
    pub fn render(&self, issues: &IssuesByAssignee) -> String {
        let mut out = String::with_capacity(
            self.head.len() + self.tail.len() + issues.issue_count() * 256,
        );
        out.push_str(&self.head);
        for (name, group) in issues.iter() {
            for issue in group {
                out.push_str(&render_row(name, issue));
            }
        }
        out.push_str(&self.tail);
        out
    }
}

fn render_row(assignee: &str, issue: &Issue) -> String {
    format!(
        concat!(
            "    <tr>\n",
            "        <td><a href=\"{url}\">{id}</a></td>\n",
            "        <td>{project}</td>\n",
            "        <td>{tracker}</td>\n",
            "        <td>{status}</td>\n",
            "        <td>{subject}</td>\n",
            "        <td>{assignee}</td>\n",
            "    </tr>\n",
        ),
        url = escape_html(&issue.url()),
        id = issue.ticket_id,
        project = escape_html(&issue.project),
        tracker = escape_html(&issue.tracker),
        status = escape_html(&issue.status),
        subject = escape_html(&issue.subject),
        assignee = escape_html(assignee),
    )
}

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: u64, assignee: &str, subject: &str) -> Issue {
        Issue {
            ticket_id: id,
            project: "Website".into(),
            tracker: "Bug".into(),
            status: "New".into(),
            assignee: assignee.into(),
            subject: subject.into(),
            source_link: "https://redmine.example.com/".into(),
        }
    }

    fn row_count(html: &str) -> usize {
        html.matches("<tr>").count() - 1
    }

    #[test]
    fn built_in_page_parses() {
        assert!(Template::page().is_ok());
    }

    #[test]
    fn parse_rejects_missing_placeholder() {
        assert_eq!(
            Template::parse("<html></html>").unwrap_err(),
            TemplateError::MissingPlaceholder
        );
    }

    #[test]
    fn parse_rejects_duplicate_placeholder() {
        assert_eq!(
            Template::parse("{{rows}}{{rows}}").unwrap_err(),
            TemplateError::DuplicatePlaceholder
        );
    }

    #[test]
    fn empty_map_renders_header_only() {
        let html = Template::page().unwrap().render(&IssuesByAssignee::new());
        assert_eq!(row_count(&html), 0);
        assert!(html.contains("<th>チケット</th>"));
        assert!(!html.contains("{{rows}}"));
    }

    #[test]
    fn row_shows_every_field() {
        let mut map = IssuesByAssignee::new();
        map.push(issue(101, "Alice", "Login page broken"));

        let html = Template::page().unwrap().render(&map);
        assert!(html.contains(r#"<a href="https://redmine.example.com/issues/101">101</a>"#));
        assert!(html.contains("<td>Website</td>"));
        assert!(html.contains("<td>Bug</td>"));
        assert!(html.contains("<td>New</td>"));
        assert!(html.contains("<td>Login page broken</td>"));
        assert!(html.contains("<td>Alice</td>"));
    }

    #[test]
    fn rows_follow_group_order() {
        let mut map = IssuesByAssignee::new();
        map.extend([
            issue(1, "Alice", "first"),
            issue(3, "", "third"),
            issue(2, "Alice", "second"),
        ]);

        let html = Template::page().unwrap().render(&map);
        assert_eq!(row_count(&html), 3);
        let first = html.find("<td>first</td>").unwrap();
        let second = html.find("<td>second</td>").unwrap();
        let third = html.find("<td>third</td>").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn markup_in_fields_is_escaped() {
        let mut map = IssuesByAssignee::new();
        let mut evil = issue(1, "<b>Mallory</b>", "<script>alert('x')</script>");
        evil.status = "Done & \"closed\"".into();
        evil.source_link = "https://x.example.com/\"><script>".into();
        map.push(evil);

        let html = Template::page().unwrap().render(&map);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("<td>&lt;b&gt;Mallory&lt;/b&gt;</td>"));
        assert!(html.contains("<td>Done &amp; &quot;closed&quot;</td>"));
        assert!(html.contains("href=\"https://x.example.com/&quot;&gt;&lt;script&gt;issues/1\""));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("担当者 Alice"), "担当者 Alice");
    }
}

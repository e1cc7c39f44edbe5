use chrono::Utc;
use console::style;
use std::time::Duration;

use crate::common::Comment;

const SNIPPET_CHARS: usize = 72;

fn format_time_ago(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (value, unit) = if secs < 60 {
        (secs, "second")
    } else if secs < 3_600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3_600, "hour")
    } else if secs < 2_592_000 {
        (secs / 86_400, "day")
    } else if secs < 31_104_000 {
        (secs / 2_592_000, "month")
    } else {
        (secs / 31_104_000, "year")
    };
    format!("{} {}{}", value, unit, if value == 1 { "" } else { "s" })
}

/// First line of the content, truncated for one-line listings.
fn content_snippet(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let mut snippet: String = first_line.chars().take(SNIPPET_CHARS).collect();
    if first_line.chars().count() > SNIPPET_CHARS || content.lines().count() > 1 {
        snippet.push('…');
    }
    snippet
}

pub fn format_comment_compact(comment: &Comment) -> String {
    let age = Utc::now() - comment.created_at;
    let marker = if comment.is_root() { "·" } else { "↳" };

    format!(
        "{} {} {} {}",
        style(comment.id).cyan(),
        marker,
        style(format!(
            "{} ago",
            format_time_ago(age.to_std().unwrap_or_default())
        ))
        .dim(),
        content_snippet(&comment.content)
    )
}

pub fn format_comment_detailed(comment: &Comment) -> String {
    let mut output = String::new();

    output.push_str(&format!("Comment {}\n", style(comment.id).bold().cyan()));

    match comment.parent_id {
        Some(parent_id) => {
            output.push_str(&format!("Reply to: {}\n", style(parent_id).cyan()));
        }
        None => output.push_str("Reply to: (root comment)\n"),
    }

    let created_since = Utc::now() - comment.created_at;
    output.push_str(&format!(
        "Created: {} ago ({})\n",
        format_time_ago(created_since.to_std().unwrap_or_default()),
        comment.created_at.format("%Y-%m-%d %H:%M:%S")
    ));

    if comment.updated_at != comment.created_at {
        let updated_since = Utc::now() - comment.updated_at;
        output.push_str(&format!(
            "Updated: {} ago ({})\n",
            format_time_ago(updated_since.to_std().unwrap_or_default()),
            comment.updated_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }

    output.push_str(&format!("\n{}\n", comment.content));

    output
}

pub fn success_message(message: &str) -> String {
    format!("{} {}", style("✓").green().bold(), message)
}

pub fn error_message(message: &str) -> String {
    format!("{} {}", style("✗").red().bold(), message)
}

pub fn info_message(message: &str) -> String {
    format!("{} {}", style("ℹ").blue().bold(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_comment(content: &str) -> Comment {
        Comment::new(None, content.to_string())
    }

    #[test]
    fn test_format_compact_contains_id_and_content() {
        let comment = test_comment("A short remark");
        let formatted = format_comment_compact(&comment);

        assert!(formatted.contains(&comment.id.to_string()));
        assert!(formatted.contains("A short remark"));
    }

    #[test]
    fn test_format_compact_marks_replies() {
        let root = test_comment("root");
        let reply = Comment::new(Some(root.id), "a reply".to_string());

        assert!(format_comment_compact(&root).contains('·'));
        assert!(format_comment_compact(&reply).contains('↳'));
    }

    #[test]
    fn test_content_snippet_truncates_long_lines() {
        let long = "x".repeat(SNIPPET_CHARS + 20);
        let snippet = content_snippet(&long);
        assert_eq!(snippet.chars().count(), SNIPPET_CHARS + 1);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn test_content_snippet_keeps_only_first_line() {
        let snippet = content_snippet("first line\nsecond line");
        assert!(snippet.starts_with("first line"));
        assert!(!snippet.contains("second"));
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn test_format_detailed_root_and_reply() {
        let root = test_comment("body text");
        let formatted = format_comment_detailed(&root);
        assert!(formatted.contains("(root comment)"));
        assert!(formatted.contains("body text"));

        let reply = Comment::new(Some(root.id), "answer".to_string());
        let formatted = format_comment_detailed(&reply);
        assert!(formatted.contains(&root.id.to_string()));
    }

    #[test]
    fn test_format_time_ago_units() {
        assert_eq!(format_time_ago(Duration::from_secs(1)), "1 second");
        assert_eq!(format_time_ago(Duration::from_secs(90)), "1 minute");
        assert_eq!(format_time_ago(Duration::from_secs(7_200)), "2 hours");
        assert_eq!(format_time_ago(Duration::from_secs(172_800)), "2 days");
    }
}

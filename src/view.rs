//! Pure projection of the task list into displayable rows.
//!
//! Nothing here touches the store; the view is rebuilt in full from the
//! current tasks and filter on every render.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::fields::{Filter, Status};
use crate::task::Task;

/// Message shown in place of the table when nothing matches.
pub const EMPTY_STATE: &str = "No tasks yet. Add one above!";

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub text: String,
    pub due: String,
    pub status: Status,
    pub toggle_icon: &'static str,
    pub toggle_title: &'static str,
}

impl RowView {
    pub fn from_task(task: &Task) -> Self {
        let status = Status::of(task);
        let (toggle_icon, toggle_title) = if task.completed {
            ("↩", "Mark as pending")
        } else {
            ("✓", "Mark as completed")
        };
        RowView {
            id: task.id.clone(),
            text: task.text.clone(),
            due: format_due_date(task.due_date),
            status,
            toggle_icon,
            toggle_title,
        }
    }

    pub fn completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty,
    Rows(Vec<RowView>),
}

impl ListView {
    pub fn rows(&self) -> &[RowView] {
        match self {
            ListView::Empty => &[],
            ListView::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty)
    }
}

/// Project `tasks` through `filter`, preserving order.
pub fn project(tasks: &[Task], filter: Filter) -> ListView {
    let rows: Vec<RowView> = tasks
        .iter()
        .filter(|t| filter.matches(t))
        .map(RowView::from_task)
        .collect();
    if rows.is_empty() {
        ListView::Empty
    } else {
        ListView::Rows(rows)
    }
}

/// Format a due date as e.g. "Jan 5, 2025", or "-" when absent.
pub fn format_due_date(due: Option<NaiveDate>) -> String {
    match due {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "-".into(),
    }
}

/// Escape text so it renders literally inside HTML.
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

/// Render the projection as HTML table rows, or the empty-state paragraph.
pub fn render_html(view: &ListView) -> String {
    let rows = match view {
        ListView::Empty => {
            return format!("<p class=\"empty-state\">{}</p>\n", escape_html(EMPTY_STATE));
        }
        ListView::Rows(rows) => rows,
    };

    let mut out = String::from("<table class=\"todo-table\">\n<tbody>\n");
    for row in rows {
        let text = escape_html(&row.text);
        let task_class = if row.completed() { "task-text completed" } else { "task-text" };
        let _ = write!(
            out,
            concat!(
                "<tr data-id=\"{id}\">\n",
                "  <td><span class=\"{task_class}\" title=\"{text}\">{text}</span></td>\n",
                "  <td><span class=\"due-date\">{due}</span></td>\n",
                "  <td><span class=\"status-badge {status_class}\">{status}</span></td>\n",
                "  <td><div class=\"action-buttons\">",
                "<button class=\"action-btn complete-btn\" title=\"{toggle_title}\" data-action=\"complete\">{icon}</button>",
                "<button class=\"action-btn delete-btn\" title=\"Delete task\" data-action=\"delete\">✕</button>",
                "</div></td>\n",
                "</tr>\n",
            ),
            id = escape_html(&row.id),
            task_class = task_class,
            text = text,
            due = escape_html(&row.due),
            status_class = row.status.class(),
            status = row.status.label(),
            toggle_title = row.toggle_title,
            icon = row.toggle_icon,
        );
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(text: &str, completed: bool) -> Task {
        let mut t = Task::new(text.into(), NaiveDate::from_ymd_opt(2025, 1, 5));
        t.completed = completed;
        t
    }

    #[test]
    fn formats_due_dates() {
        assert_eq!(format_due_date(NaiveDate::from_ymd_opt(2025, 1, 5)), "Jan 5, 2025");
        assert_eq!(format_due_date(NaiveDate::from_ymd_opt(2024, 12, 25)), "Dec 25, 2024");
        assert_eq!(format_due_date(None), "-");
    }

    #[test]
    fn empty_projection_shows_placeholder() {
        let tasks = vec![task("done already", true)];
        assert_eq!(project(&tasks, Filter::Pending), ListView::Empty);
        assert!(render_html(&ListView::Empty).contains(EMPTY_STATE));
    }

    #[test]
    fn rows_follow_list_order_and_state() {
        let tasks = vec![task("one", true), task("two", false), task("three", true)];
        let view = project(&tasks, Filter::All);
        let rows = view.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, tasks[0].id);
        assert_eq!(rows[0].status.label(), "Completed");
        assert_eq!(rows[0].toggle_icon, "↩");
        assert_eq!(rows[1].toggle_title, "Mark as completed");
        assert_eq!(project(&tasks, Filter::Completed).rows().len(), 2);
    }

    #[test]
    fn projection_does_not_touch_tasks() {
        let tasks = vec![task("one", false)];
        let before = tasks.clone();
        let _ = project(&tasks, Filter::Completed);
        assert_eq!(tasks, before);
    }

    #[test]
    fn markup_renders_literally() {
        assert_eq!(escape_html("<b>bold</b> & \"q\""), "&lt;b&gt;bold&lt;/b&gt; &amp; &quot;q&quot;");
        let tasks = vec![task("<b>urgent</b>", false)];
        let html = render_html(&project(&tasks, Filter::All));
        assert!(html.contains("&lt;b&gt;urgent&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains(&format!("data-id=\"{}\"", tasks[0].id)));
        assert!(html.contains("status-badge pending"));
    }
}

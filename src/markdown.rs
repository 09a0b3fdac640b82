// Markdown rendering of a report, for the clipboard and `--print`.

use crate::models::Report;

pub fn report_markdown(report: &Report, source_name: Option<&str>) -> String {
    let mut out = String::new();
    match source_name {
        Some(name) => out.push_str(&format!("# Notes: {}\n\n", name)),
        None => out.push_str("# Notes\n\n"),
    }

    out.push_str("## Summary\n\n");
    out.push_str(report.summary.trim());
    out.push_str("\n\n## Key Points\n\n");
    for point in &report.key_points {
        out.push_str(&format!("- {}\n", point));
    }

    out.push_str("\n## Quiz\n");
    for (i, item) in report.quiz.iter().enumerate() {
        out.push_str(&format!("\n**Q{}: {}**\n\n", i + 1, item.question));
        for option in &item.options {
            out.push_str(&format!("- {}\n", option));
        }
        out.push_str(&format!("\n<details><summary>Answer</summary>{}</details>\n", item.answer));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizItem;

    #[test]
    fn test_report_markdown_layout() {
        let report = Report {
            summary: " S ".into(),
            key_points: vec!["A".into(), "B".into()],
            quiz: vec![QuizItem {
                question: "Q?".into(),
                options: vec!["X".into(), "Y".into()],
                answer: "Y".into(),
            }],
        };
        let md = report_markdown(&report, Some("notes.pdf"));
        assert!(md.starts_with("# Notes: notes.pdf\n\n## Summary\n\nS\n\n## Key Points\n\n- A\n- B\n"));
        assert!(md.contains("**Q1: Q?**\n\n- X\n- Y\n"));
        assert!(md.contains("<details><summary>Answer</summary>Y</details>"));
    }

    #[test]
    fn test_report_markdown_without_source() {
        let report = Report { summary: "S".into(), key_points: vec![], quiz: vec![] };
        assert!(report_markdown(&report, None).starts_with("# Notes\n\n"));
    }
}

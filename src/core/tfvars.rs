use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::domain::model::ProjectParams;

/// The service catalog reports generation time in Bangkok local time.
const CATALOG_UTC_OFFSET_HOURS: i32 = 7;

/// Keys are padded to a fixed column so the values line up.
const KEY_COLUMN_WIDTH: usize = 21;

pub fn catalog_now() -> DateTime<FixedOffset> {
    let offset =
        FixedOffset::east_opt(CATALOG_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset)
}

/// Repository-relative path of the generated variable file.
pub fn relative_path(project: &str) -> String {
    format!("projects/{}.tfvars", project)
}

/// Render the variable file: a timestamped comment header, then one
/// `key = value` line per parameter. Scalars are quoted; lists become
/// bracketed, quoted, comma-separated strings.
pub fn render(params: &ProjectParams, generated_at: DateTime<FixedOffset>) -> String {
    let mut content = format!(
        "# Auto-generated via service catalog at {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S%.6f%:z")
    );
    for (key, value) in entries(params) {
        content.push_str(&format!(
            "{:<width$}= {}\n",
            key,
            value,
            width = KEY_COLUMN_WIDTH
        ));
    }
    content
}

fn entries(params: &ProjectParams) -> Vec<(&'static str, String)> {
    vec![
        ("aws_account_id", quote(&params.aws_account_id)),
        ("project", quote(&params.project)),
        ("environments", quote_list(&params.environments)),
        ("stacks", quote_list(&params.stacks)),
        (
            "initial_environments",
            quote_list(&params.initial_environments),
        ),
        ("initial_stacks", quote_list(&params.initial_stacks)),
        ("approver_email", quote(&params.approver_email)),
    ]
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

fn quote_list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
            .unwrap()
    }

    fn demo_params() -> ProjectParams {
        ProjectParams {
            aws_account_id: "123456789012".to_string(),
            project: "demo".to_string(),
            environments: vec!["dev".to_string(), "prod".to_string()],
            stacks: vec!["network".to_string(), "compute".to_string()],
            initial_environments: vec!["dev".to_string()],
            initial_stacks: vec!["network".to_string()],
            approver_email: "approver@example.com".to_string(),
        }
    }

    #[test]
    fn test_render_exact_content() {
        let expected = "\
# Auto-generated via service catalog at 2024-05-01 12:30:00.000000+07:00

aws_account_id       = \"123456789012\"
project              = \"demo\"
environments         = [\"dev\", \"prod\"]
stacks               = [\"network\", \"compute\"]
initial_environments = [\"dev\"]
initial_stacks       = [\"network\"]
approver_email       = \"approver@example.com\"
";
        assert_eq!(render(&demo_params(), fixed_timestamp()), expected);
    }

    #[test]
    fn test_render_empty_list() {
        let mut params = demo_params();
        params.initial_stacks.clear();
        let content = render(&params, fixed_timestamp());
        assert!(content.contains("initial_stacks       = []\n"));
    }

    #[test]
    fn test_render_ends_with_newline() {
        let content = render(&demo_params(), fixed_timestamp());
        assert!(content.ends_with("\"approver@example.com\"\n"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("demo"), "projects/demo.tfvars");
    }

    #[test]
    fn test_catalog_now_uses_catalog_offset() {
        let now = catalog_now();
        assert_eq!(now.offset().local_minus_utc(), 7 * 3600);
    }
}

//! Outcome rendering for the terminal.

use colored::*;
use serde_json::Value;

use screenctl::domain::Outcome;
use screenctl::pipeline::OutputFormat;

/// Render an outcome in the requested format
pub fn render(outcome: &Outcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(outcome).unwrap_or_else(|e| e.to_string()),
        OutputFormat::Raw => match outcome {
            Outcome::Success(data) => compact(data),
            Outcome::Failure(err) => format!("{}: {}", err.code, err.message),
        },
        OutputFormat::Pretty => match outcome {
            Outcome::Success(data) => format!("{}\n{}", "Success".green().bold(), pretty(data)),
            Outcome::Failure(err) => format!("{} [{}] {}", "Error".red().bold(), err.code.to_string().yellow(), err.message),
        },
    }
}

fn compact(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenctl::domain::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_json_format_wraps_outcome() {
        let rendered = render(&Outcome::success(json!({"a": 1})), OutputFormat::Json);
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!({"success": true, "data": {"a": 1}}));
    }

    #[test]
    fn test_json_format_failure() {
        let outcome = Outcome::failure(ErrorCode::InvalidArgs, "bad");
        let parsed: Value = serde_json::from_str(&render(&outcome, OutputFormat::Json)).unwrap();
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"]["code"], "INVALID_ARGS");
        assert_eq!(parsed["error"]["recoverable"], false);
    }

    #[test]
    fn test_raw_format() {
        assert_eq!(render(&Outcome::success(json!({"a": 1})), OutputFormat::Raw), r#"{"a":1}"#);
        assert_eq!(render(&Outcome::success(json!("<html/>")), OutputFormat::Raw), "<html/>");
        assert_eq!(
            render(&Outcome::failure(ErrorCode::FetchFailed, "down"), OutputFormat::Raw),
            "FETCH_FAILED: down"
        );
    }

    #[test]
    fn test_pretty_format() {
        colored::control::set_override(false);
        let rendered = render(&Outcome::success(json!({"a": 1})), OutputFormat::Pretty);
        assert!(rendered.starts_with("Success\n"));
        let rendered = render(&Outcome::failure(ErrorCode::UnknownTool, "nope"), OutputFormat::Pretty);
        assert_eq!(rendered, "Error [UNKNOWN_TOOL] nope");
    }
}

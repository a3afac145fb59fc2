use std::fmt;

use serde::Serialize;

/// Renders a report as pretty JSON or with its `Display` impl.
pub fn render<T>(report: &T, json: bool) -> anyhow::Result<String>
where
    T: Serialize + fmt::Display,
{
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_string())
    }
}

/// Joins items for single-line display, with a dash for an empty list.
pub(crate) fn join_or_dash<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() { "-".to_string() } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_or_dash() {
        assert_eq!(join_or_dash(["a", "b"]), "a, b");
        assert_eq!(join_or_dash(Vec::<String>::new()), "-");
    }
}

//! Property list parsing

/// Split a comma separated property value into trimmed, non-empty entries.
///
/// `" PRIMARY , SECONDARY,"` yields `["PRIMARY", "SECONDARY"]`.
pub fn parse_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_list() {
        assert_eq!(parse_comma_list("PRIMARY"), vec!["PRIMARY"]);
        assert_eq!(
            parse_comma_list(" PRIMARY , SECONDARY,"),
            vec!["PRIMARY", "SECONDARY"]
        );
        assert!(parse_comma_list("").is_empty());
        assert!(parse_comma_list(" , ").is_empty());
    }
}

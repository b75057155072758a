use std::sync::LazyLock;

use regex::Regex;

use nodeswitch_backend::SemanticVersion;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+").expect("version pattern is valid")
});

/// Pull every `X.Y.Z` out of raw version manager output, in order.
///
/// Banners, `(currently using ...)` markers, arrows and indentation are
/// ignored. Repeats are kept as-is; output with no versions yields an empty
/// list.
#[must_use]
pub fn parse_versions(raw: &str) -> Vec<SemanticVersion> {
    VERSION_PATTERN
        .find_iter(raw)
        .filter_map(|found| SemanticVersion::parse(found.as_str()).ok())
        .collect()
}

/// Last non-blank line of `output`. Interactive shells can print rc-file
/// noise ahead of the command's own answer.
pub(crate) fn last_line(output: &str) -> &str {
    output
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> Vec<String> {
        parse_versions(raw).into_iter().map(String::from).collect()
    }

    #[test]
    fn windows_list_with_current_marker() {
        let raw = "v18.19.0\nv20.11.0   (currently using 64-bit executable)\n";
        assert_eq!(parsed(raw), vec!["18.19.0", "20.11.0"]);
    }

    #[test]
    fn indented_unix_listing() {
        let raw = "
            v16.20.0
            v18.19.0
        ->  v20.11.0
            v21.5.0
            system
        ";
        assert_eq!(
            parsed(raw),
            vec!["16.20.0", "18.19.0", "20.11.0", "21.5.0"]
        );
    }

    #[test]
    fn nvm_windows_star_marker() {
        let raw = "\n    21.5.0\n  * 20.11.0 (Currently using 64-bit executable)\n    18.19.0\n";
        assert_eq!(parsed(raw), vec!["21.5.0", "20.11.0", "18.19.0"]);
    }

    #[test]
    fn no_versions_is_empty_not_error() {
        assert!(parse_versions("No versions installed").is_empty());
        assert!(parse_versions("").is_empty());
        assert!(parse_versions("N/A\n\n  ").is_empty());
    }

    #[test]
    fn duplicates_are_preserved() {
        let raw = "default -> 20.11.0 (-> v20.11.0)";
        assert_eq!(parsed(raw), vec!["20.11.0", "20.11.0"]);
    }

    #[test]
    fn parsing_is_repeatable() {
        let raw = "nvm banner 0.39.7\n  v18.19.0\n";
        assert_eq!(parse_versions(raw), parse_versions(raw));
        assert_eq!(parsed(raw), vec!["0.39.7", "18.19.0"]);
    }

    #[test]
    fn last_line_skips_trailing_blank_lines() {
        assert_eq!(last_line("welcome!\nv20.11.0\n\n"), "v20.11.0");
        assert_eq!(last_line("  0.39.7  "), "0.39.7");
        assert_eq!(last_line("\n \n"), "");
    }
}

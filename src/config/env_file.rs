//! Environment file (`KEY=VALUE`) loading

use super::read_optional;
use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

/// Upper-cased variable name to trimmed value.
pub type EnvMap = HashMap<String, String>;

static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("valid env key regex"));

/// Read an environment file into an [`EnvMap`].
///
/// Returns `Ok(None)` when the file does not exist. Keys are upper-cased and
/// trimmed, values trimmed; a repeated key keeps its last value.
pub fn load_env_file(path: &Path) -> Result<Option<EnvMap>, ConfigError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    parse_env_contents(&content, path).map(Some)
}

/// Parse dotenv-style content. `path` is only used for error reporting.
pub fn parse_env_contents(content: &str, path: &Path) -> Result<EnvMap, ConfigError> {
    let mut map = EnvMap::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let syntax = |message: &str| ConfigError::EnvSyntax {
            path: path.to_path_buf(),
            line: idx + 1,
            message: message.to_string(),
        };

        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").map_or(line, str::trim_start);

        // `KEY: value` is accepted alongside `KEY=value`; the first separator wins.
        let Some((key, value)) = line.split_once(|c| c == '=' || c == ':') else {
            return Err(syntax("expected KEY=VALUE"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(syntax("empty variable name"));
        }
        if !KEY_RE.is_match(key) {
            return Err(syntax(&format!("invalid variable name '{key}'")));
        }

        let value = parse_value(value.trim()).map_err(syntax)?;
        map.insert(key.to_ascii_uppercase(), value.trim().to_string());
    }

    Ok(map)
}

fn parse_value(raw: &str) -> Result<String, &'static str> {
    if let Some(rest) = raw.strip_prefix('"') {
        let mut out = String::with_capacity(rest.len());
        let mut chars = rest.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(other) => out.push(other),
                    None => break,
                },
                '"' => {
                    return if only_comment(chars.as_str()) {
                        Ok(out)
                    } else {
                        Err("unexpected characters after closing quote")
                    };
                }
                _ => out.push(c),
            }
        }
        return Err("unterminated double-quoted value");
    }

    if let Some(rest) = raw.strip_prefix('\'') {
        let Some((value, trailing)) = rest.split_once('\'') else {
            return Err("unterminated single-quoted value");
        };
        return if only_comment(trailing) {
            Ok(value.to_string())
        } else {
            Err("unexpected characters after closing quote")
        };
    }

    Ok(strip_inline_comment(raw).to_string())
}

fn only_comment(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with('#')
}

/// `#` starts a comment in a bare value only when preceded by whitespace.
fn strip_inline_comment(raw: &str) -> &str {
    raw.char_indices()
        .find(|&(i, c)| c == '#' && raw[..i].ends_with(char::is_whitespace))
        .map_or(raw, |(i, _)| raw[..i].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> EnvMap {
        parse_env_contents(content, Path::new("test.env")).expect("parse")
    }

    #[test]
    fn test_missing_file_is_none() {
        let tmp = TempDir::new().expect("tmp");
        let map = load_env_file(&tmp.path().join(".env")).expect("load");
        assert!(map.is_none());
    }

    #[test]
    fn test_load_env_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(".env");
        fs::write(&path, "# logging\nLOG_PATH=/env-log.log\n\nOTHER=1\n").expect("write");

        let map = load_env_file(&path).expect("load").expect("present");
        assert_eq!(map.get("LOG_PATH").map(String::as_str), Some("/env-log.log"));
        assert_eq!(map.get("OTHER").map(String::as_str), Some("1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_keys_are_uppercased_and_values_trimmed() {
        let map = parse("  appname_log =   /var/tmp/a.log   \n");
        assert_eq!(map.get("APPNAME_LOG").map(String::as_str), Some("/var/tmp/a.log"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let map = parse("LOG=/first.log\nlog=/second.log\n");
        assert_eq!(map.get("LOG").map(String::as_str), Some("/second.log"));
    }

    #[test]
    fn test_export_prefix_and_inline_comments() {
        let map = parse("export LOG_PATH=/a.log # trailing\nTAG=a#b\n");
        assert_eq!(map.get("LOG_PATH").map(String::as_str), Some("/a.log"));
        assert_eq!(map.get("TAG").map(String::as_str), Some("a#b"));
    }

    #[test]
    fn test_colon_separator() {
        let map = parse("LOG_PATH: /colon.log\nURL=http://example.com:8080\nHOST: a=b\n");
        assert_eq!(map.get("LOG_PATH").map(String::as_str), Some("/colon.log"));
        assert_eq!(map.get("URL").map(String::as_str), Some("http://example.com:8080"));
        assert_eq!(map.get("HOST").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn test_quoted_values() {
        let map = parse(
            "DOUBLE=\"  /with space.log  \" # note\nSINGLE='/lit\\n.log'\nESC=\"a\\\"b\\nc\"\n",
        );
        assert_eq!(map.get("DOUBLE").map(String::as_str), Some("/with space.log"));
        assert_eq!(map.get("SINGLE").map(String::as_str), Some("/lit\\n.log"));
        assert_eq!(map.get("ESC").map(String::as_str), Some("a\"b\nc"));
    }

    #[test]
    fn test_empty_value_is_kept_as_empty() {
        let map = parse("LOG=\n");
        assert_eq!(map.get("LOG").map(String::as_str), Some(""));
    }

    #[test]
    fn test_line_without_separator_returns_err() {
        let err = parse_env_contents("LOG=/ok.log\nnot a pair\n", Path::new("bad.env"))
            .expect_err("should fail");
        match err {
            ConfigError::EnvSyntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_quote_returns_err() {
        assert!(parse_env_contents("LOG=\"/open.log\n", Path::new("bad.env")).is_err());
        assert!(parse_env_contents("LOG='/open.log\n", Path::new("bad.env")).is_err());
    }

    #[test]
    fn test_invalid_key_returns_err() {
        assert!(parse_env_contents("BAD KEY=1\n", Path::new("bad.env")).is_err());
        assert!(parse_env_contents("=1\n", Path::new("bad.env")).is_err());
    }
}

use crate::domain::model::SecretValue;
use crate::utils::error::Result;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

pub const SESSION_SECRET_KEY: &str = "SESSION_SECRET";

/// Literal, match-all pattern for the template placeholder.
#[derive(Debug, Clone)]
pub struct PlaceholderPattern {
    regex: Regex,
}

impl PlaceholderPattern {
    pub fn new(token: &str) -> Result<Self> {
        let regex = Regex::new(&regex::escape(token))?;
        Ok(Self { regex })
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// `NoExpand` keeps a `$` in the project name from being read as a group reference.
    pub fn replace_all<'a>(&self, text: &'a str, project_name: &str) -> Cow<'a, str> {
        self.regex.replace_all(text, NoExpand(project_name))
    }
}

/// Matches the whole `SESSION_SECRET=...` assignment line. `R` keeps a
/// trailing `\r` out of the match on CRLF files.
#[derive(Debug, Clone)]
pub struct SessionSecretLine {
    regex: Regex,
}

impl SessionSecretLine {
    pub fn new() -> Result<Self> {
        let regex = Regex::new(&format!(r"(?mR)^{}=.*$", regex::escape(SESSION_SECRET_KEY)))?;
        Ok(Self { regex })
    }

    /// Replaces the first assignment line only. Returns `None` when the
    /// template has no such line.
    pub fn inject(&self, env: &str, secret: &SecretValue) -> Option<String> {
        if !self.regex.is_match(env) {
            return None;
        }

        let line = format!("{}=\"{}\"", SESSION_SECRET_KEY, secret.expose());
        Some(self.regex.replace(env, NoExpand(&line)).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SecretSource;

    struct FixedSource;

    impl SecretSource for FixedSource {
        fn fill_bytes(&self, buf: &mut [u8]) -> Result<()> {
            for (i, byte) in buf.iter_mut().enumerate() {
                *byte = i as u8;
            }
            Ok(())
        }
    }

    fn secret() -> SecretValue {
        SecretValue::generate(&FixedSource, 16).unwrap()
    }

    #[test]
    fn test_replaces_every_placeholder_occurrence() {
        let pattern = PlaceholderPattern::new("techno-stack-template").unwrap();
        let readme = "# techno-stack-template\n\ncd techno-stack-template && npm i\n";

        let replaced = pattern.replace_all(readme, "my-app");

        assert_eq!(replaced, "# my-app\n\ncd my-app && npm i\n");
        assert_eq!(pattern.count(&replaced), 0);
    }

    #[test]
    fn test_leaves_other_text_untouched() {
        let pattern = PlaceholderPattern::new("techno-stack-template").unwrap();
        let text = "techno-stack templates are not techno-stack-templat";

        assert_eq!(pattern.count(text), 0);
        assert!(matches!(pattern.replace_all(text, "my-app"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_special_characters_in_placeholder_match_literally() {
        let pattern = PlaceholderPattern::new("app.(name)+[*]?$").unwrap();
        let text = "a app.(name)+[*]?$ b appX(name)+[*]?$ c app.(name)+[*]?$";

        assert_eq!(pattern.count(text), 2);
        assert_eq!(
            pattern.replace_all(text, "my-app"),
            "a my-app b appX(name)+[*]?$ c my-app"
        );
    }

    #[test]
    fn test_dot_in_placeholder_is_not_a_wildcard() {
        let pattern = PlaceholderPattern::new("stack.template").unwrap();

        assert_eq!(pattern.count("stack-template stackXtemplate"), 0);
        assert_eq!(pattern.count("stack.template"), 1);
    }

    #[test]
    fn test_dollar_in_project_name_is_inserted_literally() {
        let pattern = PlaceholderPattern::new("techno-stack-template").unwrap();

        let replaced = pattern.replace_all("name: techno-stack-template", "app$1${0}");

        assert_eq!(replaced, "name: app$1${0}");
    }

    #[test]
    fn test_injects_secret_into_assignment_line_only() {
        let line = SessionSecretLine::new().unwrap();
        let env = "DATABASE_URL=\"postgres://localhost/db\"\nSESSION_SECRET=\"super-duper-s3cret\"\nPORT=3000\n";

        let injected = line.inject(env, &secret()).unwrap();

        let before: Vec<&str> = env.lines().collect();
        let after: Vec<&str> = injected.lines().collect();
        assert_eq!(before.len(), after.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(
            after[1],
            "SESSION_SECRET=\"000102030405060708090a0b0c0d0e0f\""
        );
        assert_eq!(after[2], before[2]);
        assert!(injected.ends_with('\n'));
    }

    #[test]
    fn test_injects_secret_when_value_is_empty() {
        let line = SessionSecretLine::new().unwrap();

        let injected = line.inject("SESSION_SECRET=\"\"", &secret()).unwrap();

        assert_eq!(injected, "SESSION_SECRET=\"000102030405060708090a0b0c0d0e0f\"");
    }

    #[test]
    fn test_injection_preserves_crlf_line_endings() {
        let line = SessionSecretLine::new().unwrap();
        let env = "A=1\r\nSESSION_SECRET=old\r\nB=2\r\n";

        let injected = line.inject(env, &secret()).unwrap();

        assert_eq!(
            injected,
            "A=1\r\nSESSION_SECRET=\"000102030405060708090a0b0c0d0e0f\"\r\nB=2\r\n"
        );
    }

    #[test]
    fn test_key_must_start_the_line() {
        let line = SessionSecretLine::new().unwrap();

        assert!(line.inject("# SESSION_SECRET=old\nOTHER_SESSION_SECRET=x\n", &secret()).is_none());
    }

    #[test]
    fn test_only_first_assignment_is_replaced() {
        let line = SessionSecretLine::new().unwrap();
        let env = "SESSION_SECRET=one\nSESSION_SECRET=two\n";

        let injected = line.inject(env, &secret()).unwrap();

        assert_eq!(
            injected,
            "SESSION_SECRET=\"000102030405060708090a0b0c0d0e0f\"\nSESSION_SECRET=two\n"
        );
    }
}

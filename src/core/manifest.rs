use crate::domain::model::ProjectName;
use crate::domain::ports::KeyOrdering;
use crate::utils::error::{InitError, Result};
use serde_json::Value;

/// Sets `name`, reorders keys, and re-serializes with 2-space indentation
/// and a single trailing newline.
pub fn rewrite_manifest(
    path: &str,
    text: &str,
    project_name: &ProjectName,
    ordering: &dyn KeyOrdering,
) -> Result<String> {
    let document: Value =
        serde_json::from_str(text).map_err(|source| InitError::ManifestParseError {
            path: path.to_string(),
            source,
        })?;

    let Value::Object(mut manifest) = document else {
        return Err(InitError::ManifestShapeError {
            path: path.to_string(),
        });
    };

    // 已存在的 name 保留原位置
    manifest.insert(
        "name".to_string(),
        Value::String(project_name.as_str().to_string()),
    );

    let ordered = ordering.reorder(manifest);

    let mut output = serde_json::to_string_pretty(&Value::Object(ordered))?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ordering::{PackageJsonOrder, PreserveOrder};
    use serde_json::{json, Map};
    use std::path::Path;

    fn name(value: &str) -> ProjectName {
        ProjectName::from_target_dir(Path::new(value)).unwrap()
    }

    /// Reverses key order, so tests can tell the strategy was applied.
    struct ReverseOrder;

    impl KeyOrdering for ReverseOrder {
        fn reorder(&self, manifest: Map<String, Value>) -> Map<String, Value> {
            let mut entries: Vec<(String, Value)> = manifest.into_iter().collect();
            entries.reverse();
            entries.into_iter().collect()
        }
    }

    #[test]
    fn test_sets_name_and_uses_two_space_indent() {
        let output = rewrite_manifest(
            "package.json",
            r#"{"name":"techno-stack-template","version":"1.0.0"}"#,
            &name("my-app"),
            &PreserveOrder,
        )
        .unwrap();

        assert_eq!(output, "{\n  \"name\": \"my-app\",\n  \"version\": \"1.0.0\"\n}\n");
    }

    #[test]
    fn test_adds_name_when_missing() {
        let output =
            rewrite_manifest("package.json", r#"{"version":"1.0.0"}"#, &name("my-app"), &PackageJsonOrder)
                .unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["name"], "my-app");
        assert!(output.starts_with("{\n  \"name\": \"my-app\""));
    }

    #[test]
    fn test_key_order_comes_from_strategy() {
        let text = r#"{"scripts":{"dev":"remix dev"},"version":"1.0.0","name":"old","private":true}"#;

        let output = rewrite_manifest("package.json", text, &name("my-app"), &ReverseOrder).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        let keys: Vec<&str> = parsed.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["private", "name", "version", "scripts"]);
    }

    #[test]
    fn test_no_data_loss() {
        let original = json!({
            "devDependencies": {"vitest": "^1"},
            "name": "techno-stack-template",
            "prisma": {"seed": "tsx prisma/seed.ts"},
            "version": "1.0.0",
            "sideEffects": false
        });

        let output = rewrite_manifest(
            "package.json",
            &original.to_string(),
            &name("my-app"),
            &PackageJsonOrder,
        )
        .unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        let parsed = parsed.as_object().unwrap();
        let original = original.as_object().unwrap();
        assert_eq!(parsed.len(), original.len());
        assert_eq!(parsed["name"], "my-app");
        for (key, value) in original.iter().filter(|(key, _)| key.as_str() != "name") {
            assert_eq!(&parsed[key], value);
        }
    }

    #[test]
    fn test_output_ends_with_single_newline() {
        let output =
            rewrite_manifest("package.json", "{}\n\n", &name("my-app"), &PackageJsonOrder).unwrap();

        assert!(output.ends_with("}\n"));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_malformed_manifest_is_rejected() {
        let result = rewrite_manifest("package.json", "{\"name\": ", &name("my-app"), &PackageJsonOrder);

        assert!(matches!(result, Err(InitError::ManifestParseError { path, .. }) if path == "package.json"));
    }

    #[test]
    fn test_non_object_manifest_is_rejected() {
        let result = rewrite_manifest("package.json", "[1, 2, 3]", &name("my-app"), &PackageJsonOrder);

        assert!(matches!(result, Err(InitError::ManifestShapeError { .. })));
    }
}

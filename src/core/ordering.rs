use crate::domain::ports::KeyOrdering;
use serde_json::{Map, Value};

/// Conventional package.json field order. Keys not listed here follow in
/// alphabetical order, with `_`-prefixed keys last.
pub const PACKAGE_JSON_FIELDS: &[&str] = &[
    "$schema",
    "name",
    "displayName",
    "version",
    "private",
    "description",
    "categories",
    "keywords",
    "homepage",
    "bugs",
    "repository",
    "funding",
    "license",
    "qna",
    "author",
    "maintainers",
    "contributors",
    "publisher",
    "sideEffects",
    "type",
    "imports",
    "exports",
    "main",
    "svelte",
    "umd:main",
    "jsdelivr",
    "unpkg",
    "module",
    "source",
    "jsnext:main",
    "browser",
    "react-native",
    "types",
    "typesVersions",
    "typings",
    "style",
    "example",
    "examplestyle",
    "assets",
    "bin",
    "man",
    "directories",
    "files",
    "workspaces",
    "binary",
    "scripts",
    "betterScripts",
    "contributes",
    "activationEvents",
    "husky",
    "simple-git-hooks",
    "pre-commit",
    "commitlint",
    "lint-staged",
    "nano-staged",
    "config",
    "nodemonConfig",
    "browserify",
    "babel",
    "browserslist",
    "xo",
    "prettier",
    "eslintConfig",
    "eslintIgnore",
    "npmpackagejsonlint",
    "release",
    "remarkConfig",
    "stylelint",
    "ava",
    "jest",
    "mocha",
    "nyc",
    "tap",
    "oclif",
    "resolutions",
    "overrides",
    "dependencies",
    "devDependencies",
    "dependenciesMeta",
    "peerDependencies",
    "peerDependenciesMeta",
    "optionalDependencies",
    "bundledDependencies",
    "bundleDependencies",
    "extensionPack",
    "extensionDependencies",
    "flat",
    "packageManager",
    "engines",
    "engineStrict",
    "volta",
    "languageName",
    "os",
    "cpu",
    "preferGlobal",
    "publishConfig",
    "icon",
    "badges",
    "galleryBanner",
    "preview",
    "markdown",
    "pnpm",
];

/// Fields whose object values are themselves sorted by key.
const ALPHABETIZED_FIELDS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
    "bundledDependencies",
    "resolutions",
    "overrides",
    "engines",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonOrder;

impl KeyOrdering for PackageJsonOrder {
    fn reorder(&self, mut manifest: Map<String, Value>) -> Map<String, Value> {
        let mut ordered = Map::with_capacity(manifest.len());

        for field in PACKAGE_JSON_FIELDS {
            if let Some(value) = manifest.remove(*field) {
                let value = if ALPHABETIZED_FIELDS.contains(field) {
                    alphabetize(value)
                } else {
                    value
                };
                ordered.insert((*field).to_string(), value);
            }
        }

        let mut rest: Vec<(String, Value)> = manifest.into_iter().collect();
        rest.sort_by(|(a, _), (b, _)| {
            a.starts_with('_')
                .cmp(&b.starts_with('_'))
                .then_with(|| a.cmp(b))
        });
        ordered.extend(rest);

        ordered
    }
}

/// Identity strategy: keeps the manifest's own key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreserveOrder;

impl KeyOrdering for PreserveOrder {
    fn reorder(&self, manifest: Map<String, Value>) -> Map<String, Value> {
        manifest
    }
}

fn alphabetize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().collect())
        }
        other => other,
    }
}

//! Stack detection: languages, frameworks, runtime, package manager, test
//! framework and CI system.
//!
//! Every classification is drawn from a fixed table below; nothing outside
//! those vocabularies is ever reported. All resolutions are absent-safe: a
//! repository with no recognizable signal yields empty lists and `None`s.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::context::ServiceContext;
use crate::files;
use crate::manifest::PackageManifest;

/// Declares a closed vocabulary enum that serializes to its display name.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $label:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )*
        }

        impl $name {
            /// Display name used in reports.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }
    };
}

vocabulary! {
    /// Source language recognized by file extension.
    Language {
        /// `.ts`, `.tsx`
        TypeScript => "TypeScript",
        /// `.js`, `.jsx`
        JavaScript => "JavaScript",
        /// `.py`
        Python => "Python",
        /// `.go`
        Go => "Go",
        /// `.rs`
        Rust => "Rust",
    }
}

vocabulary! {
    /// Application framework recognized from manifest dependencies.
    Framework {
        /// `next`
        NextJs => "Next.js",
        /// `react`
        React => "React",
        /// `vue`
        Vue => "Vue",
        /// `svelte`
        Svelte => "Svelte",
        /// `express`
        Express => "Express",
        /// `fastapi`
        FastApi => "FastAPI",
        /// `django`
        Django => "Django",
    }
}

vocabulary! {
    /// Test runner recognized from manifest dependencies.
    TestFramework {
        /// `vitest`
        Vitest => "Vitest",
        /// `jest`
        Jest => "Jest",
        /// `mocha`
        Mocha => "Mocha",
        /// `pytest`
        Pytest => "Pytest",
    }
}

vocabulary! {
    /// Package manager recognized from its lock file.
    PackageManager {
        /// `pnpm-lock.yaml`
        Pnpm => "pnpm",
        /// `yarn.lock`
        Yarn => "yarn",
        /// `package-lock.json`
        Npm => "npm",
    }
}

vocabulary! {
    /// Continuous integration system recognized from its config files.
    CiSystem {
        /// `.github/workflows/*.yml`
        GitHubActions => "GitHub Actions",
        /// `.gitlab-ci.yml`
        GitLabCi => "GitLab CI",
        /// `.circleci/config.yml`
        CircleCi => "CircleCI",
    }
}

const EXTENSIONS: &[(&str, Language)] = &[
    (".ts", Language::TypeScript),
    (".tsx", Language::TypeScript),
    (".js", Language::JavaScript),
    (".jsx", Language::JavaScript),
    (".py", Language::Python),
    (".go", Language::Go),
    (".rs", Language::Rust),
];

const FRAMEWORKS: &[(&str, Framework)] = &[
    ("next", Framework::NextJs),
    ("react", Framework::React),
    ("vue", Framework::Vue),
    ("svelte", Framework::Svelte),
    ("express", Framework::Express),
    ("fastapi", Framework::FastApi),
    ("django", Framework::Django),
];

/// Ordered by priority; only the first match is reported.
const TEST_FRAMEWORKS: &[(&str, TestFramework)] = &[
    ("vitest", TestFramework::Vitest),
    ("jest", TestFramework::Jest),
    ("mocha", TestFramework::Mocha),
    ("pytest", TestFramework::Pytest),
];

const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

const RUNTIME_VERSION_FILES: &[&str] = &[".nvmrc", ".node-version"];

const WORKFLOW_DIR: &str = ".github/workflows/";

const CI_CONFIG_FILES: &[(&str, CiSystem)] =
    &[(".gitlab-ci.yml", CiSystem::GitLabCi), (".circleci/config.yml", CiSystem::CircleCi)];

/// Detected technology stack of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackProfile {
    /// Languages by descending file count.
    pub languages: Vec<Language>,
    /// Frameworks in table order.
    pub frameworks: Vec<Framework>,
    /// Runtime and version, e.g. `Node 20.11.0`.
    pub runtime: Option<String>,
    /// Package manager inferred from the lock file.
    pub package_manager: Option<PackageManager>,
    /// Highest-priority test framework among the dependencies.
    pub test_framework: Option<TestFramework>,
    /// CI system.
    pub ci: Option<CiSystem>,
}

/// Detects the stack of the repository at `root`.
pub fn detect_stack(ctx: &ServiceContext, root: &Path) -> StackProfile {
    let files = files::list_repo_files(ctx, root);
    let manifest = PackageManifest::load(ctx, root);

    let profile = StackProfile {
        languages: rank_languages(&files),
        frameworks: detect_frameworks(manifest.as_ref()),
        runtime: resolve_runtime(ctx, root, manifest.as_ref()),
        package_manager: resolve_package_manager(ctx, root),
        test_framework: detect_test_framework(manifest.as_ref()),
        ci: resolve_ci(ctx, root, &files),
    };
    debug!(
        files = files.len(),
        languages = profile.languages.len(),
        frameworks = profile.frameworks.len(),
        "stack detected"
    );
    profile
}

/// Maps a path to a language by the suffix after its last `.`.
#[must_use]
pub fn language_for(path: &str) -> Option<Language> {
    let ext = &path[path.rfind('.')?..];
    EXTENSIONS.iter().find(|(e, _)| *e == ext).map(|(_, language)| *language)
}

/// Ranks languages by descending file count.
///
/// Equal counts keep the order in which each language was first seen.
#[must_use]
pub fn rank_languages<S: AsRef<str>>(files: &[S]) -> Vec<Language> {
    let mut counts: Vec<(Language, usize)> = Vec::new();
    for language in files.iter().filter_map(|f| language_for(f.as_ref())) {
        match counts.iter_mut().find(|(seen, _)| *seen == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(language, _)| language).collect()
}

/// Frameworks whose dependency appears in the manifest, in table order.
#[must_use]
pub fn detect_frameworks(manifest: Option<&PackageManifest>) -> Vec<Framework> {
    let Some(manifest) = manifest else {
        return Vec::new();
    };
    let mut frameworks = Vec::new();
    for (dep, framework) in FRAMEWORKS {
        if manifest.has_dependency(dep) && !frameworks.contains(framework) {
            frameworks.push(*framework);
        }
    }
    frameworks
}

/// The first test framework in priority order whose dependency is declared.
#[must_use]
pub fn detect_test_framework(manifest: Option<&PackageManifest>) -> Option<TestFramework> {
    let manifest = manifest?;
    TEST_FRAMEWORKS
        .iter()
        .find(|(dep, _)| manifest.has_dependency(dep))
        .map(|(_, framework)| *framework)
}

/// Extracts the version from a runtime version file.
///
/// Only the first line counts; a leading `v` is stripped. Blank files
/// yield `None`.
#[must_use]
pub fn parse_version_file(text: &str) -> Option<String> {
    let line = text.trim().lines().next()?.trim();
    let version = line.strip_prefix('v').unwrap_or(line);
    (!version.is_empty()).then(|| version.to_string())
}

/// Resolves the runtime: version files first, then `engines.node`.
pub fn resolve_runtime(
    ctx: &ServiceContext,
    root: &Path,
    manifest: Option<&PackageManifest>,
) -> Option<String> {
    for file in RUNTIME_VERSION_FILES {
        let path = root.join(file);
        if !ctx.fs.exists(&path) {
            continue;
        }
        match ctx.fs.read_to_string(&path) {
            Ok(text) => {
                if let Some(version) = parse_version_file(&text) {
                    return Some(format!("Node {version}"));
                }
            }
            Err(err) => debug!(path = %path.display(), error = %err, "version file unreadable"),
        }
    }
    manifest?.node_engine.as_ref().map(|engine| format!("Node {engine}"))
}

/// Resolves the package manager from the first lock file present.
pub fn resolve_package_manager(ctx: &ServiceContext, root: &Path) -> Option<PackageManager> {
    LOCK_FILES.iter().find(|(file, _)| ctx.fs.exists(&root.join(file))).map(|(_, pm)| *pm)
}

/// Resolves the CI system: workflow YAML in `files`, then well-known config paths.
pub fn resolve_ci<S: AsRef<str>>(ctx: &ServiceContext, root: &Path, files: &[S]) -> Option<CiSystem> {
    let has_workflow = files.iter().map(AsRef::as_ref).any(|f| {
        f.starts_with(WORKFLOW_DIR) && (f.ends_with(".yml") || f.ends_with(".yaml"))
    });
    if has_workflow {
        return Some(CiSystem::GitHubActions);
    }
    CI_CONFIG_FILES.iter().find(|(file, _)| ctx.fs.exists(&root.join(file))).map(|(_, ci)| *ci)
}

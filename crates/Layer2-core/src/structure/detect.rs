//! Language / framework heuristic
//!
//! [`ManifestDetector`] looks for well-known manifest files in the root and
//! greps their text for framework dependencies. Without a manifest it falls
//! back to the most common source extension near the top of the tree.

use ignore::WalkBuilder;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Best-guess language and framework of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectType {
    pub language: String,
    pub framework: Option<String>,
}

impl ProjectType {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            framework: None,
        }
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn unknown() -> Self {
        Self::new("Unknown")
    }
}

/// `Rust` or `PHP / Laravel`
impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.framework {
            Some(framework) => write!(f, "{} / {}", self.language, framework),
            None => f.write_str(&self.language),
        }
    }
}

/// Pluggable project-type guess used by the summarizer
pub trait ProjectDetector: Send + Sync {
    fn detect(&self, root: &Path) -> ProjectType;
}

/// Manifest check: file name, language, and (needle, framework) pairs
/// checked against the manifest text in order
struct Manifest {
    file: &'static str,
    language: &'static str,
    frameworks: &'static [(&'static str, &'static str)],
}

const MANIFESTS: &[Manifest] = &[
    Manifest {
        file: "Cargo.toml",
        language: "Rust",
        frameworks: &[
            ("axum", "Axum"),
            ("actix-web", "Actix Web"),
            ("rocket", "Rocket"),
            ("tauri", "Tauri"),
            ("leptos", "Leptos"),
        ],
    },
    Manifest {
        file: "package.json",
        language: "JavaScript",
        frameworks: &[
            ("\"next\"", "Next.js"),
            ("\"nuxt\"", "Nuxt"),
            ("\"@angular/core\"", "Angular"),
            ("\"svelte\"", "Svelte"),
            ("\"vue\"", "Vue"),
            ("\"react\"", "React"),
            ("\"@nestjs/core\"", "NestJS"),
            ("\"express\"", "Express"),
        ],
    },
    Manifest {
        file: "composer.json",
        language: "PHP",
        frameworks: &[
            ("laravel/framework", "Laravel"),
            ("symfony/framework-bundle", "Symfony"),
            ("slim/slim", "Slim"),
        ],
    },
    Manifest {
        file: "artisan",
        language: "PHP",
        frameworks: &[("", "Laravel")],
    },
    Manifest {
        file: "pyproject.toml",
        language: "Python",
        frameworks: PYTHON_FRAMEWORKS,
    },
    Manifest {
        file: "requirements.txt",
        language: "Python",
        frameworks: PYTHON_FRAMEWORKS,
    },
    Manifest {
        file: "setup.py",
        language: "Python",
        frameworks: PYTHON_FRAMEWORKS,
    },
    Manifest {
        file: "go.mod",
        language: "Go",
        frameworks: &[
            ("gin-gonic/gin", "Gin"),
            ("labstack/echo", "Echo"),
            ("gofiber/fiber", "Fiber"),
        ],
    },
    Manifest {
        file: "pom.xml",
        language: "Java",
        frameworks: &[("spring-boot", "Spring Boot"), ("quarkus", "Quarkus")],
    },
    Manifest {
        file: "build.gradle",
        language: "Java",
        frameworks: &[("spring-boot", "Spring Boot")],
    },
    Manifest {
        file: "build.gradle.kts",
        language: "Kotlin",
        frameworks: &[("spring-boot", "Spring Boot"), ("ktor", "Ktor")],
    },
    Manifest {
        file: "Gemfile",
        language: "Ruby",
        frameworks: &[("rails", "Rails"), ("sinatra", "Sinatra")],
    },
    Manifest {
        file: "mix.exs",
        language: "Elixir",
        frameworks: &[(":phoenix", "Phoenix")],
    },
];

const PYTHON_FRAMEWORKS: &[(&str, &str)] = &[
    ("django", "Django"),
    ("fastapi", "FastAPI"),
    ("flask", "Flask"),
];

/// Extensions counted by the fallback scan
const SOURCE_EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "Rust"),
    ("py", "Python"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("php", "PHP"),
    ("go", "Go"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("rb", "Ruby"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("cs", "C#"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("hpp", "C++"),
    ("cc", "C++"),
    ("swift", "Swift"),
];

/// How deep the fallback scan looks
const SCAN_DEPTH: usize = 3;

/// Default heuristic
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestDetector;

impl ManifestDetector {
    pub fn new() -> Self {
        Self
    }

    fn from_manifest(root: &Path) -> Option<ProjectType> {
        for manifest in MANIFESTS {
            let path = root.join(manifest.file);
            if !path.is_file() {
                continue;
            }
            let text = fs::read_to_string(&path).unwrap_or_default().to_lowercase();

            let mut language = manifest.language;
            if manifest.file == "package.json" && root.join("tsconfig.json").is_file() {
                language = "TypeScript";
            }

            let framework = manifest
                .frameworks
                .iter()
                .find(|(needle, _)| text.contains(&needle.to_lowercase()))
                .map(|(_, name)| *name);

            let project = ProjectType::new(language);
            return Some(match framework {
                Some(name) => project.with_framework(name),
                None => project,
            });
        }

        // .NET projects name their manifest after the project
        let csproj = fs::read_dir(root).ok()?.flatten().any(|entry| {
            entry
                .path()
                .extension()
                .map_or(false, |ext| ext == "csproj" || ext == "sln")
        });
        csproj.then(|| ProjectType::new("C#").with_framework(".NET"))
    }

    fn from_extensions(root: &Path) -> Option<ProjectType> {
        let lookup: HashMap<&str, &str> = SOURCE_EXTENSIONS.iter().copied().collect();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        let walker = WalkBuilder::new(root)
            .hidden(true)
            .max_depth(Some(SCAN_DEPTH))
            .build();
        for entry in walker.flatten() {
            if !entry.file_type().map_or(false, |t| t.is_file()) {
                continue;
            }
            let ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase());
            if let Some(language) = ext.as_deref().and_then(|e| lookup.get(e).copied()) {
                *counts.entry(language).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .max_by(|(a_lang, a), (b_lang, b)| a.cmp(b).then_with(|| b_lang.cmp(a_lang)))
            .map(|(language, _)| ProjectType::new(language))
    }
}

impl ProjectDetector for ManifestDetector {
    fn detect(&self, root: &Path) -> ProjectType {
        Self::from_manifest(root)
            .or_else(|| Self::from_extensions(root))
            .unwrap_or_else(ProjectType::unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn detect(files: &[(&str, &str)]) -> ProjectType {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            let path = temp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        ManifestDetector::new().detect(temp.path())
    }

    #[test]
    fn test_rust_with_framework() {
        let project = detect(&[(
            "Cargo.toml",
            "[package]\nname = \"api\"\n[dependencies]\naxum = \"0.7\"\n",
        )]);
        assert_eq!(project, ProjectType::new("Rust").with_framework("Axum"));
        assert_eq!(project.to_string(), "Rust / Axum");
    }

    #[test]
    fn test_laravel() {
        let project = detect(&[(
            "composer.json",
            r#"{"require": {"php": "^8.2", "laravel/framework": "^11.0"}}"#,
        )]);
        assert_eq!(project.to_string(), "PHP / Laravel");
    }

    #[test]
    fn test_typescript_react() {
        let project = detect(&[
            ("package.json", r#"{"dependencies": {"react": "^18"}}"#),
            ("tsconfig.json", "{}"),
        ]);
        assert_eq!(project.to_string(), "TypeScript / React");
    }

    #[test]
    fn test_python_without_framework() {
        let project = detect(&[("requirements.txt", "requests==2.31\n")]);
        assert_eq!(project, ProjectType::new("Python"));
        assert_eq!(project.to_string(), "Python");
    }

    #[test]
    fn test_extension_fallback() {
        let project = detect(&[
            ("main.go", "package main"),
            ("pkg/a.go", "package pkg"),
            ("scripts/run.py", ""),
        ]);
        assert_eq!(project, ProjectType::new("Go"));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(detect(&[("notes.txt", "hi")]), ProjectType::unknown());
        assert_eq!(detect(&[]).to_string(), "Unknown");
    }
}

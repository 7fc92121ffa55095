// ABOUTME: Environment variable names and fixed defaults shared across Stackforge
// ABOUTME: Centralized so packages never hardcode configuration keys or fallback values

// Output Configuration
pub const STACKFORGE_OUTPUT_DIR: &str = "STACKFORGE_OUTPUT_DIR";

// Model Configuration
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_MODEL: &str = "ANTHROPIC_MODEL";
pub const STACKFORGE_MAX_STEPS: &str = "STACKFORGE_MAX_STEPS";

/// Default output directory name, resolved relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Maximum collaborator reasoning steps per task unless overridden.
pub const DEFAULT_MAX_STEPS: u32 = 15;

/// Project name used when extraction cannot recover one.
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// Resource name used when no keyword matches a description.
pub const DEFAULT_RESOURCE_NAME: &str = "Item";

/// Resource-type keywords scanned by the extraction fallback. This list is
/// configuration, not contract: callers may inject their own.
pub const FALLBACK_RESOURCE_KEYWORDS: &[&str] =
    &["user", "post", "product", "article", "task", "item"];

/// Files the deployment stage is allowed to place at the output root.
/// Everything else must live at least one directory below the root.
pub const ROOT_LEVEL_ALLOWLIST: &[&str] =
    &["docker-compose.yml", "README.md", ".gitignore", ".env.example"];

/// How much of a free-text description the fallback specification keeps.
pub const FALLBACK_DESCRIPTION_LIMIT: usize = 100;

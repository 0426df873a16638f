//! Language metadata for display and highlighting.
//!
//! Snippet languages are free-form strings in the dataset. The helpers here
//! map the common ones to the token syntect uses to find a syntax definition
//! and to a short badge label. Unknown languages fall back to their own name.

/// Token handed to `SyntaxSet::find_syntax_by_token`.
pub fn syntax_token(language: &str) -> String {
    let lower = language.to_lowercase();
    let token = match lower.as_str() {
        "rust" => "rs",
        "javascript" => "js",
        "typescript" => "ts",
        "python" => "py",
        "golang" => "go",
        "c++" | "cpp" => "cpp",
        "c#" | "csharp" => "cs",
        "ruby" => "rb",
        "bash" | "shell" => "sh",
        "powershell" => "ps1",
        "markdown" => "md",
        "yaml" => "yaml",
        _ => return lower,
    };
    token.to_string()
}

/// Get short name for the language
pub fn short_name(language: &str) -> &str {
    match language {
        "JavaScript" => "JS",
        "TypeScript" => "TS",
        "Python" => "Py",
        "PowerShell" => "PS",
        "Markdown" => "MD",
        "Dockerfile" => "Docker",
        other => other,
    }
}

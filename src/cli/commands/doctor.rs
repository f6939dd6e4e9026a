//! Doctor command - verify API keys, directories and configuration.

use crate::cli::Output;
use crate::config::{ApiKeys, Settings, KINDO_API_KEY_ENV, TWELVELABS_API_KEY_ENV};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, keys: &ApiKeys) -> anyhow::Result<()> {
    Output::section("vidbrief Doctor");

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    let key_checks = vec![
        check_api_key(TWELVELABS_API_KEY_ENV, keys.twelvelabs.as_deref(), true),
        check_api_key(KINDO_API_KEY_ENV, keys.kindo.as_deref(), false),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    println!("{}", style("Directories").bold());
    let dir_checks = check_directories(settings);
    for check in &dir_checks {
        check.print();
    }
    checks.extend(dir_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![check_config_file(), check_settings(settings)];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using vidbrief.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! vidbrief is ready to use.");
    }

    Ok(())
}

/// Check an API key. Missing required keys are errors, missing optional keys warnings.
fn check_api_key(name: &str, key: Option<&str>, required: bool) -> CheckResult {
    let hint = format!("Set with: export {}='...'", name);
    match key.map(str::trim) {
        Some(key) if key.chars().count() > 8 => {
            CheckResult::ok(name, &format!("configured ({})", mask_key(key)))
        }
        Some(key) if !key.is_empty() => CheckResult::ok(name, "configured"),
        _ if required => CheckResult::error(name, "not set", &hint),
        _ => CheckResult::warning(name, "not set (follow-up questions disabled)", &hint),
    }
}

/// First and last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check output and video directories.
fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let output_dir = settings.output_dir();
    if output_dir.is_dir() {
        results.push(CheckResult::ok(
            "Output directory",
            &format!("{}", output_dir.display()),
        ));
    } else {
        results.push(CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", output_dir.display()),
            "Directory will be created on first report",
        ));
    }

    let videos_dir = settings.videos_dir();
    match std::fs::read_dir(&videos_dir) {
        Ok(entries) => {
            let indexes = entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .count();
            results.push(CheckResult::ok(
                "Videos directory",
                &format!("{} ({} index folder(s))", videos_dir.display(), indexes),
            ));
        }
        Err(_) => results.push(CheckResult::warning(
            "Videos directory",
            &format!("{} (missing)", videos_dir.display()),
            "Put videos in <videos_dir>/<index_name>/*.mp4 before indexing",
        )),
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            &format!(
                "Write the defaults with: vidbrief config show > {}",
                config_path.display()
            ),
        )
    }
}

/// Validate loaded settings.
fn check_settings(settings: &Settings) -> CheckResult {
    match settings.validate() {
        Ok(()) => CheckResult::ok(
            "Settings",
            &format!(
                "engine {} / model {}",
                settings.twelvelabs.engine, settings.kindo.model
            ),
        ),
        Err(e) => CheckResult::error(
            "Settings",
            &e.to_string(),
            "Fix the file shown by: vidbrief config path",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_check_api_key() {
        let result = check_api_key("TWELVELABS_API_KEY", Some("tlk_1234567890abcd"), true);
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "configured (tlk_...abcd)");

        let result = check_api_key("TWELVELABS_API_KEY", None, true);
        assert_eq!(result.status, CheckStatus::Error);

        let result = check_api_key("KINDO_API_KEY", Some(""), false);
        assert_eq!(result.status, CheckStatus::Warning);
    }

    #[test]
    fn test_check_api_key_with_multibyte_characters() {
        let result = check_api_key("KINDO_API_KEY", Some("ключ-секрет-éèà"), false);
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "configured (ключ...-éèà)");

        let result = check_api_key("KINDO_API_KEY", Some("ééééé"), false);
        assert_eq!(result.message, "configured");
    }

    #[test]
    fn test_check_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("videos").join("shopify")).unwrap();

        let mut settings = Settings::default();
        settings.general.videos_dir = dir.path().join("videos").display().to_string();
        settings.general.output_dir = dir.path().join("out").display().to_string();

        let results = check_directories(&settings);
        assert_eq!(results[0].status, CheckStatus::Warning);
        assert_eq!(results[1].status, CheckStatus::Ok);
        assert!(results[1].message.contains("1 index folder"));
    }
}

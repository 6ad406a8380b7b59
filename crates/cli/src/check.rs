//! Health check for the contributor pipeline.

use anyhow::Result;

use git_contributors_core::canonical::{IdentityCanonicalizer, MappingSource};
use git_contributors_core::config::ContributorsConfig;
use git_contributors_core::HistoryReader;

use super::style;

/// Report whether every stage of the pipeline can run with `config`.
pub async fn run_check(config: &ContributorsConfig) -> Result<()> {
    println!();
    println!("{}", style::header("git-contributors check"));
    println!("{}", "═".repeat(22));
    println!();

    let mut issues = Vec::new();

    // 1. Configuration
    match config.validate() {
        Ok(()) => println!("  {}", style::success("Configuration     Valid")),
        Err(e) => {
            println!("  {}", style::error(&format!("Configuration     {}", e)));
            issues.push("Fix configuration errors".to_string());
        }
    }

    // 2. Git binary
    let reader = HistoryReader::new(&config.history);
    if reader.is_available().await {
        println!(
            "  {}",
            style::success(&format!("Git               {}", config.history.git_binary))
        );
    } else {
        println!(
            "  {}",
            style::warn(&format!(
                "Git               {} not found (extraction will be skipped)",
                config.history.git_binary
            ))
        );
        issues.push("Install git or set history.git_binary".to_string());
    }

    // 3. Repository
    let repo_path = &config.history.repo_path;
    if repo_path.is_dir() {
        println!(
            "  {}",
            style::success(&format!("Repository        {}", repo_path.display()))
        );
    } else {
        println!(
            "  {}",
            style::error(&format!("Repository        {} (missing)", repo_path.display()))
        );
        issues.push(format!(
            "Point history.repo_path or --repo at a checkout (currently {})",
            repo_path.display()
        ));
    }

    // 4. Canonical mapping
    let source = MappingSource::from_config(&config.canonical);
    let label = match &source {
        MappingSource::Bundled => "bundled".to_string(),
        MappingSource::File(path) => path.display().to_string(),
    };
    match IdentityCanonicalizer::load(&source) {
        Ok(canon) => println!(
            "  {}",
            style::success(&format!("Canonical map     {} ({} aliases)", label, canon.len()))
        ),
        Err(e) => {
            println!("  {}", style::error(&format!("Canonical map     {}", e)));
            issues.push("Fix or remove canonical.mapping_file".to_string());
        }
    }

    // 5. Declared authors
    println!(
        "  {}",
        style::success(&format!(
            "Declared authors  {}",
            config.project.authors.len()
        ))
    );

    // Summary
    println!();
    if issues.is_empty() {
        println!(
            "  {} All checks passed!",
            console::style("✓").green().bold()
        );
    } else {
        println!(
            "  {} {} issue(s) found:",
            console::style("!").yellow().bold(),
            issues.len()
        );
        for (i, issue) in issues.iter().enumerate() {
            println!("    {}. {}", i + 1, issue);
        }
    }
    println!();

    Ok(())
}

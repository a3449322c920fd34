//! Rules command - list trigger categories and their cues

use super::extract::resolve_config;
use crate::triggers::RuleSet;
use anyhow::Result;
use console::style;
use std::path::Path;

/// Run the rules command
pub fn run(path: &Path, json: bool, config: Option<&Path>) -> Result<()> {
    let rules = resolve_config(config_dir(path), config)?.rule_set()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
    } else {
        print!("{}", render(&rules));
    }
    Ok(())
}

/// Directory whose config applies: PATH itself, or the parent of an email file.
fn config_dir(path: &Path) -> &Path {
    if path.is_dir() {
        path
    } else {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

fn render(rules: &RuleSet) -> String {
    let mut out = String::new();
    for rule in rules.iter() {
        out.push_str(&format!(
            "\n{} {}\n",
            style(rule.category.name()).bold(),
            style(format!(
                "({} tokens, {} phrases)",
                rule.tokens.len(),
                rule.phrases.len()
            ))
            .dim()
        ));
        if !rule.tokens.is_empty() {
            out.push_str(&format!("  tokens:  {}\n", rule.tokens.join(", ")));
        }
        for phrase in &rule.phrases {
            out.push_str(&format!("  phrase:  \"{}\"\n", phrase));
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_builtin() {
        let out = render(&RuleSet::builtin());
        assert!(out.contains("urgency"));
        assert!(out.contains("\"verify your account\""));
        assert!(out.contains("reward_gain"));
    }

    #[test]
    fn test_file_path_uses_parent_config() {
        let dir = tempfile::tempdir().unwrap();
        let email = dir.path().join("email_01.txt");
        std::fs::write(&email, "Header: Hi").unwrap();
        std::fs::write(
            dir.path().join("phishlex.toml"),
            "[triggers.urgency]\ntokens = [\"hurry\"]\n",
        )
        .unwrap();

        assert_eq!(config_dir(&email), dir.path());
        assert_eq!(config_dir(dir.path()), dir.path());

        let rules = resolve_config(config_dir(&email), None)
            .unwrap()
            .rule_set()
            .unwrap();
        assert_eq!(
            rules.rule(crate::triggers::TriggerCategory::Urgency).tokens,
            vec!["hurry".to_string()]
        );
    }
}

use anyhow::Context;
use std::path::{Component, Path};

use pbls_core::{apply_edits, format_all, FormattingOptions, Settings};

use crate::analyzer::PbAnalyzer;

const USAGE: &str = "Usage: pbls-lsp --analyze <relative-file-path>\n       pbls-lsp --format <relative-file-path> [--tab-size N] [--tabs]\n  --analyze <file>     : Symbols and diagnostics as JSON\n  --format <file>      : Formatted source on stdout";

pub(crate) fn try_cli() -> anyhow::Result<Option<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_cli(&args)
}

/// Handles the command-line modes; `None` means the server should start.
pub fn run_cli(args: &[String]) -> anyhow::Result<Option<String>> {
    if args.is_empty() {
        return Ok(None);
    }

    let analyze = args.iter().any(|a| a == "--analyze");
    let format = args.iter().any(|a| a == "--format");
    if !analyze && !format {
        return Ok(None);
    }

    let path = positional_args(args)
        .next()
        .ok_or_else(|| anyhow::anyhow!("{USAGE}"))?;
    let content = read_file_content(path)?;

    if analyze {
        let analysis = PbAnalyzer::new().analyze(&content);
        let output = serde_json::json!({
            "symbols": analysis.symbols,
            "diagnostics": analysis.diagnostics,
        });
        return Ok(Some(format!("{}\n", serde_json::to_string_pretty(&output)?)));
    }

    let options = formatting_options(args)?;
    let edits = format_all(&content, &options, &Settings::default());
    Ok(Some(apply_edits(&content, &edits)))
}

fn formatting_options(args: &[String]) -> anyhow::Result<FormattingOptions> {
    let mut options = FormattingOptions {
        insert_spaces: !args.iter().any(|a| a == "--tabs"),
        ..FormattingOptions::default()
    };
    if let Some(i) = args.iter().position(|a| a == "--tab-size") {
        let value = args
            .get(i + 1)
            .ok_or_else(|| anyhow::anyhow!("--tab-size needs a value\n{USAGE}"))?;
        options.tab_size = value
            .parse::<u32>()
            .with_context(|| format!("Invalid tab size '{value}'"))?
            .max(1);
    }
    Ok(options)
}

/// Arguments that are neither flags nor flag values.
fn positional_args(args: &[String]) -> impl Iterator<Item = &str> {
    args.iter().enumerate().filter_map(|(i, arg)| {
        let is_flag_value = i > 0 && args[i - 1] == "--tab-size";
        (!arg.starts_with("--") && !is_flag_value).then_some(arg.as_str())
    })
}

pub(crate) fn is_safe_path(path: &str) -> bool {
    let path = Path::new(path);

    if path.as_os_str().is_empty() || path.is_absolute() {
        return false;
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return false;
    }

    let s = path.to_string_lossy();
    let suspicious = ['\0', '\n', '\r', '\t'];
    if s.chars().any(|c| suspicious.contains(&c)) {
        return false;
    }
    // Windows drive prefix such as `C:`
    !(s.len() >= 2 && s.as_bytes()[1] == b':')
}

pub(crate) fn read_file_content(path: &str) -> anyhow::Result<String> {
    if !is_safe_path(path) {
        return Err(anyhow::anyhow!("Unsafe file path: {}", path));
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path))
}

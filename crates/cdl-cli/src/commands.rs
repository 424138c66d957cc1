//! Subcommand handlers.
//!
//! Each handler loads its input, runs one library step, writes its artifact
//! and prints a short summary to `out`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use cdl::report::artifact::{
    write_classification, CoreClassesArtifact, RevisionArtifact, TableArtifact, TokenReport,
    UtilityPropsArtifact,
};
use cdl::report::{build_table, classify, collect_classes, revise};
use cdl::{lint, snapshot, Registry, ResolveOptions, Selection};

use crate::config::PipelineConfig;

fn load_registry(config: &PipelineConfig) -> Result<Registry> {
    let registry = snapshot::load(config.snapshot())
        .with_context(|| format!("loading snapshot {}", config.snapshot().display()))?;
    debug!(definitions = registry.len(), "loaded registry");
    Ok(registry)
}

fn wrote(out: &mut dyn Write, what: &str, path: &Path) -> Result<()> {
    writeln!(
        out,
        "{} {} -> {}",
        style("✓").green(),
        what,
        style(path.display()).cyan()
    )?;
    Ok(())
}

pub fn resolve(
    config: &PipelineConfig,
    namespace: &str,
    name: &str,
    choices: Vec<(String, String)>,
    lenient: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let registry = load_registry(config)?;
    let selection: Selection = choices.into_iter().collect();
    let options = if lenient {
        ResolveOptions::LENIENT
    } else {
        ResolveOptions::STRICT
    };

    let classes = registry.resolve(namespace, name, &selection, options)?;
    writeln!(out, "{classes}")?;
    Ok(())
}

pub fn classify_options(config: &PipelineConfig, out: &mut dyn Write) -> Result<()> {
    let registry = load_registry(config)?;
    let classification = classify(&registry);
    let (single, multi) = (
        classification.single_token.len(),
        classification.multi_token.len(),
    );

    let paths = write_classification(classification, config.snapshot(), &config.reports_dir)
        .context("writing token reports")?;
    wrote(out, &format!("{multi} multi-token options"), &paths.multi_token)?;
    wrote(out, &format!("{single} single-token options"), &paths.single_token)?;
    Ok(())
}

pub fn table(config: &PipelineConfig, out: &mut dyn Write) -> Result<()> {
    let input = config.table_source();
    let report = TokenReport::read(&input)?;
    let artifact = TableArtifact::new(&input, build_table(&report.items));

    let path = config.table();
    artifact
        .write(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    wrote(
        out,
        &format!(
            "{} prefixes, {} tokens",
            artifact.prefix_count, artifact.total_unique_tokens
        ),
        &path,
    )
}

pub fn classes(
    config: &PipelineConfig,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let registry = load_registry(config)?;
    let artifact = CoreClassesArtifact::new(config.snapshot(), collect_classes(&registry));

    let path = output.map_or_else(|| config.core_classes(), Path::to_path_buf);
    artifact
        .write(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    wrote(out, &format!("{} classes", artifact.count), &path)
}

pub fn revise_axes(config: &PipelineConfig, out: &mut dyn Write) -> Result<()> {
    let registry = load_registry(config)?;
    let artifact = RevisionArtifact::new(config.snapshot(), revise(&registry));

    let path = config.revision_report();
    artifact
        .write(&path)
        .with_context(|| format!("writing {}", path.display()))?;

    let summary = artifact.report.summary;
    wrote(out, "revision report", &path)?;
    writeln!(
        out,
        "  definitions: {}  axes: {}  utility: {}  variant: {}  unique tokens: {}",
        summary.total_variant_defs,
        summary.total_axes,
        style(summary.axes_utility).green(),
        style(summary.axes_variant).yellow(),
        summary.unique_tokens
    )?;
    Ok(())
}

pub fn lint_tokens(config: &PipelineConfig, json: bool, out: &mut dyn Write) -> Result<()> {
    let registry = load_registry(config)?;
    let findings = lint::lint_registry(&registry);

    if json {
        let value = serde_json::json!({
            "input": config.snapshot().display().to_string(),
            "count": findings.len(),
            "findings": findings,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    if findings.is_empty() {
        writeln!(
            out,
            "{} no modifier or arbitrary tokens in {}",
            style("✓").green(),
            config.snapshot().display()
        )?;
        return Ok(());
    }

    let mut current: Option<(&str, &str)> = None;
    for finding in &findings {
        let key = (finding.namespace.as_str(), finding.variant.as_str());
        if current != Some(key) {
            writeln!(out, "\n{}", style(format!("{}.{}", key.0, key.1)).bold())?;
            current = Some(key);
        }
        writeln!(out, "- {}", finding.location)?;
        writeln!(out, "  {}", style(finding.tokens.join(" ")).yellow())?;
    }
    writeln!(out, "\nTotal findings: {}", findings.len())?;
    Ok(())
}

pub fn props(config: &PipelineConfig, out: &mut dyn Write) -> Result<()> {
    let input = config.props_source();
    let table = TableArtifact::read(&input)?;
    let artifact = UtilityPropsArtifact::from_table(&input, &table.table);

    let path = config.utility_props();
    artifact
        .write(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    wrote(
        out,
        &format!("{} utility props", artifact.utility_props.len()),
        &path,
    )
}

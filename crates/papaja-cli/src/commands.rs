// SPDX-License-Identifier: AGPL-3.0-or-later
//! Subcommand implementations

use crate::Global;
use anyhow::Context;
use papaja_core::{
    print_anova, print_htest, AnovaOptions, HtestOptions, HypothesisTest, PapajaConfig,
    RenderConfig, VarianceTable,
};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Args)]
pub struct AnovaArgs {
    /// Variance table as JSON (`-` reads stdin)
    pub input: PathBuf,

    /// Effect sizes to report: pes, ges, es
    #[clap(long, value_delimiter = ',')]
    pub es: Vec<String>,

    /// Measured (non-manipulated) factors for generalized eta-squared
    #[clap(long, value_delimiter = ',')]
    pub observed: Vec<String>,

    /// Keep the intercept row
    #[clap(long)]
    pub intercept: bool,

    /// Leave out the mean squared error
    #[clap(long)]
    pub no_mse: bool,

    /// Citations go inside parentheses
    #[clap(long)]
    pub in_paren: bool,

    /// Sort terms by interaction order
    #[clap(long)]
    pub sort_effects: bool,

    /// Table caption
    #[clap(long)]
    pub caption: Option<String>,
}

impl AnovaArgs {
    /// Command-line flags override configuration values
    fn apply(&self, mut options: AnovaOptions) -> AnovaOptions {
        if !self.es.is_empty() {
            options.es = self.es.clone();
        }
        if !self.observed.is_empty() {
            options.observed = self.observed.clone();
        }
        options.intercept |= self.intercept;
        options.in_paren |= self.in_paren;
        options.sort_effects |= self.sort_effects;
        if self.no_mse {
            options.mse = false;
        }
        options
    }
}

#[derive(Debug, clap::Args)]
pub struct HtestArgs {
    /// Test result as JSON (`-` reads stdin)
    pub input: PathBuf,

    /// Citation goes inside parentheses
    #[clap(long)]
    pub in_paren: bool,
}

fn load_config(global: &Global) -> anyhow::Result<PapajaConfig> {
    match &global.config {
        Some(path) => PapajaConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("resolving working directory")?;
            Ok(PapajaConfig::discover(cwd)?)
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading stdin")?;
        Ok(input)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

pub fn anova(args: &AnovaArgs, global: &Global) -> anyhow::Result<String> {
    let config = load_config(global)?;
    let options = args.apply(config.anova);
    let render = RenderConfig {
        caption: args.caption.clone().or(config.render.caption),
        ..config.render
    };

    let input = read_input(&args.input)?;
    let table = VarianceTable::from_json(&input)
        .with_context(|| format!("parsing variance table {}", args.input.display()))?;
    tracing::info!(rows = table.len(), es = ?options.es, "formatting ANOVA");

    let results = print_anova(&table, &options)?;
    if global.json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }

    let mut output = String::new();
    for (term, citation) in results.full_result.iter() {
        output.push_str(&format!("{term}: {citation}\n"));
    }
    output.push('\n');
    output.push_str(&results.table.render(global.format, &render)?);
    Ok(output)
}

pub fn htest(args: &HtestArgs, global: &Global) -> anyhow::Result<String> {
    let config = load_config(global)?;
    let options = HtestOptions {
        in_paren: config.htest.in_paren || args.in_paren,
        ..config.htest
    };

    let input = read_input(&args.input)?;
    let test: HypothesisTest = serde_json::from_str(&input)
        .with_context(|| format!("parsing test result {}", args.input.display()))?;

    let result = print_htest(&test, &options)?;
    if global.json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }
    Ok(result.full_result)
}

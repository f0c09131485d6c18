use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use crate::logging::LogDestination;

/// Submit trading ideas for analysis and watch for generated strategies.
#[derive(Debug, Parser)]
#[command(name = "foundry", version, about)]
pub struct Cli {
    /// Base URL of the analysis service.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub server: String,

    /// One idea: a link to source material or free-form text. Repeat for
    /// a batch.
    #[arg(long = "idea", value_name = "IDEA")]
    pub ideas: Vec<String>,

    /// File with one idea per line. Blank lines and lines starting with
    /// '#' are skipped.
    #[arg(long, value_name = "PATH")]
    pub ideas_file: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "file")]
    pub log: LogArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    Term,
    File,
    Both,
}

impl Cli {
    pub fn collect_ideas(&self) -> anyhow::Result<Vec<String>> {
        let mut ideas: Vec<String> = self
            .ideas
            .iter()
            .map(|idea| idea.trim().to_string())
            .filter(|idea| !idea.is_empty())
            .collect();
        if let Some(path) = &self.ideas_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ideas.extend(parse_ideas_file(&text));
        }
        Ok(ideas)
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogArg::Term => LogDestination::Terminal,
            LogArg::File => LogDestination::File,
            LogArg::Both => LogDestination::Both,
        }
    }
}

fn parse_ideas_file(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

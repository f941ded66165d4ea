//! Command-line options for the terminal runner.

use anyhow::{anyhow, Result};

use blockfall::core::config::GameConfig;
use blockfall::core::{BagSupplier, HistorySupplier, PieceSupplier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierKind {
    Bag,
    History,
}

impl SupplierKind {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "bag" => Ok(SupplierKind::Bag),
            "history" => Ok(SupplierKind::History),
            other => Err(anyhow!("invalid --supplier value: {} (expected bag|history)", other)),
        }
    }

    pub fn build(self, seed: u32) -> Box<dyn PieceSupplier> {
        match self {
            SupplierKind::Bag => Box::new(BagSupplier::new(seed)),
            SupplierKind::History => Box::new(HistorySupplier::new(seed)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub level: u32,
    pub seed: u32,
    pub supplier: SupplierKind,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            level: GameConfig::default().start_level,
            seed: 1,
            supplier: SupplierKind::Bag,
        }
    }
}

impl RunOptions {
    pub fn config(&self) -> GameConfig {
        GameConfig::default().with_start_level(self.level)
    }
}

/// Parse `--level N`, `--seed N` and `--supplier bag|history`.
pub fn parse_args(args: &[String]) -> Result<RunOptions> {
    let mut options = RunOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--level" | "--seed" | "--supplier" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                match flag {
                    "--level" => {
                        options.level = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("invalid --level value: {}", v))?;
                    }
                    "--seed" => {
                        options.seed = v
                            .parse::<u32>()
                            .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                    }
                    _ => options.supplier = SupplierKind::parse(v)?,
                }
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(options)
}

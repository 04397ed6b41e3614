use anyhow::{Context, Result};
use minestake_core::{CellCount, DEFAULT_CURRENCY, MAX_MINES, PlacementStrategy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Settings read from an optional TOML file, command line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub wallet: WalletConfig,
    pub game: GameConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletConfig {
    pub starting_balance: Decimal,
    pub currency: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: Decimal::new(15000, 2),
            currency: DEFAULT_CURRENCY.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub default_mines: CellCount,
    pub strategy: PlacementStrategy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_mines: 3,
            strategy: PlacementStrategy::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.wallet.starting_balance.is_sign_negative(),
            "starting_balance cannot be negative"
        );
        anyhow::ensure!(
            (1..=MAX_MINES).contains(&self.game.default_mines),
            "default_mines must be between 1 and {MAX_MINES}"
        );
        Ok(())
    }
}

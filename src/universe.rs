// =============================================================================
// Symbol universe — ordered tickers plus join metadata
// =============================================================================
//
// The universe file is a JSON array of constituents (symbol, security name,
// sector, sub-industry), S&P 500 in the default setup. Symbols are
// normalised to the history provider's identifier format on load ('.' becomes
// '-', e.g. BRK.B -> BRK-B); a mismatch here would silently drop rows at the
// metadata join rather than fail the pipeline.
// =============================================================================

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Display metadata for one constituent, keyed by its normalised symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMeta {
    pub symbol: String,
    pub security: String,
    pub sector: String,
    pub sub_industry: String,
}

/// Ordered symbol list plus a metadata lookup for the join stage.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    symbols: Vec<String>,
    meta: HashMap<String, SymbolMeta>,
}

/// Rewrite a listing-style identifier into the history provider's format.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase().replace('.', "-")
}

impl Universe {
    /// Build a universe from constituent rows, normalising symbols and keeping
    /// the first occurrence of any duplicate.
    pub fn from_constituents(rows: Vec<SymbolMeta>) -> Self {
        let mut symbols = Vec::with_capacity(rows.len());
        let mut meta = HashMap::with_capacity(rows.len());

        for mut row in rows {
            row.symbol = normalize_symbol(&row.symbol);
            if meta.contains_key(&row.symbol) {
                continue;
            }
            symbols.push(row.symbol.clone());
            meta.insert(row.symbol.clone(), row);
        }

        Self { symbols, meta }
    }

    /// Load a universe from a JSON constituents file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read universe file {}", path.display()))?;

        let rows: Vec<SymbolMeta> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse universe file {}", path.display()))?;

        let universe = Self::from_constituents(rows);
        info!(
            path = %path.display(),
            symbols = universe.len(),
            "universe loaded"
        );
        Ok(universe)
    }

    /// Bare symbol list with no metadata (explicit symbol overrides).
    pub fn from_symbols(symbols: impl IntoIterator<Item = String>) -> Self {
        let rows = symbols
            .into_iter()
            .map(|s| SymbolMeta {
                symbol: s,
                security: String::new(),
                sector: String::new(),
                sub_industry: String::new(),
            })
            .collect();
        Self::from_constituents(rows)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn meta(&self) -> &HashMap<String, SymbolMeta> {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str) -> SymbolMeta {
        SymbolMeta {
            symbol: symbol.to_string(),
            security: format!("{symbol} Inc."),
            sector: "Information Technology".to_string(),
            sub_industry: "Systems Software".to_string(),
        }
    }

    #[test]
    fn normalizes_listing_punctuation() {
        assert_eq!(normalize_symbol("BRK.B"), "BRK-B");
        assert_eq!(normalize_symbol(" bf.b "), "BF-B");
        assert_eq!(normalize_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn preserves_input_order() {
        let universe = Universe::from_constituents(vec![row("MSFT"), row("AAPL"), row("NVDA")]);
        assert_eq!(universe.symbols(), ["MSFT", "AAPL", "NVDA"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let mut second = row("AAPL");
        second.security = "shadow".to_string();
        let universe = Universe::from_constituents(vec![row("AAPL"), second]);
        assert_eq!(universe.len(), 1);
        assert_eq!(universe.meta()["AAPL"].security, "AAPL Inc.");
    }

    #[test]
    fn metadata_keyed_by_normalized_symbol() {
        let universe = Universe::from_constituents(vec![row("BRK.B")]);
        assert_eq!(universe.symbols(), ["BRK-B"]);
        assert_eq!(universe.meta()["BRK-B"].symbol, "BRK-B");
    }

    #[test]
    fn from_symbols_has_empty_metadata_fields() {
        let universe = Universe::from_symbols(vec!["aapl".to_string()]);
        assert_eq!(universe.symbols(), ["AAPL"]);
        assert!(universe.meta()["AAPL"].sector.is_empty());
    }

    #[test]
    fn load_parses_constituents_json() {
        let dir = std::env::temp_dir().join("atlas-universe-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("universe.json");
        std::fs::write(
            &path,
            r#"[
                { "symbol": "AAPL", "security": "Apple Inc.", "sector": "Information Technology", "sub_industry": "Technology Hardware" },
                { "symbol": "BRK.B", "security": "Berkshire Hathaway", "sector": "Financials", "sub_industry": "Multi-Sector Holdings" }
            ]"#,
        )
        .unwrap();

        let universe = Universe::load(&path).unwrap();
        assert_eq!(universe.symbols(), ["AAPL", "BRK-B"]);
        assert_eq!(universe.meta()["BRK-B"].sector, "Financials");
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(Universe::load("/nonexistent/universe.json").is_err());
    }
}

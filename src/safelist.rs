use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

// Include the default safelist at compile time
const DEFAULT_SAFELIST_BYTES: &[u8] = include_bytes!("../default_safelist.txt");

/// Known-legitimate domains and full query strings, excluded from
/// aggregation by exact match.
#[derive(Debug, Default, Clone)]
pub struct Safelist {
    entries: HashSet<String>,
}

impl Safelist {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse safelist text: one entry per line, `#` comments and blank
    /// lines ignored.
    pub fn from_text(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn contains(&self, s: &str) -> bool {
        self.entries.contains(s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load the safelist: explicit file if given (missing is an error),
/// otherwise `./safelist.txt` if present, otherwise the embedded defaults.
pub fn load_safelist(safelist_path: Option<&Path>) -> Result<Safelist> {
    if let Some(path) = safelist_path {
        info!(action = "load", component = "safelist", file_path = ?path, "Loading safelist from specified file");
        if !path.exists() {
            anyhow::bail!("Safelist file not found: {:?}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read safelist file {:?}", path))?;
        let safelist = Safelist::from_text(&content);
        info!(action = "loaded", component = "safelist", entry_count = safelist.len(), file_path = ?path, "Loaded safelist from file");
        return Ok(safelist);
    }

    let default_file = Path::new("safelist.txt");
    if default_file.exists() {
        info!(action = "load", component = "safelist", file_path = ?default_file, "Loading safelist from default file");
        let content = fs::read_to_string(default_file)
            .context("Failed to read safelist.txt")?;
        let safelist = Safelist::from_text(&content);
        info!(action = "loaded", component = "safelist", entry_count = safelist.len(), "Loaded safelist from default file");
        return Ok(safelist);
    }

    info!(
        action = "load",
        component = "safelist",
        "Using embedded default safelist"
    );
    let default_content = std::str::from_utf8(DEFAULT_SAFELIST_BYTES)
        .context("Failed to decode embedded default safelist")?;
    let safelist = Safelist::from_text(default_content);
    info!(
        action = "loaded",
        component = "safelist",
        entry_count = safelist.len(),
        "Loaded embedded default safelist"
    );
    Ok(safelist)
}

/// Write the embedded defaults to `./safelist.txt` for customisation.
pub fn init_default_safelist() -> Result<()> {
    let default_file = Path::new("safelist.txt");

    if default_file.exists() {
        anyhow::bail!("safelist.txt already exists. Remove it first if you want to reinitialize.");
    }

    let default_content = std::str::from_utf8(DEFAULT_SAFELIST_BYTES)
        .context("Failed to decode embedded default safelist")?;

    fs::write(default_file, default_content)?;
    println!("Created safelist.txt with default entries");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_skipping_comments_and_blanks() {
        let safelist = Safelist::from_text(
            "# corporate infrastructure\nexample.com\n\n  wpad.corp.local  \n# trailing comment\n",
        );
        assert_eq!(safelist.len(), 2);
        assert!(safelist.contains("example.com"));
        assert!(safelist.contains("wpad.corp.local"));
        assert!(!safelist.contains("# corporate infrastructure"));
    }

    #[test]
    fn matching_is_exact_not_substring() {
        let safelist = Safelist::from_text("example.com\n");
        assert!(safelist.contains("example.com"));
        assert!(!safelist.contains("notexample.com"));
        assert!(!safelist.contains("mail.example.com"));
    }

    #[test]
    fn embedded_defaults_are_valid_utf8_and_non_empty() {
        let content = std::str::from_utf8(DEFAULT_SAFELIST_BYTES).unwrap();
        let safelist = Safelist::from_text(content);
        assert!(!safelist.is_empty());
    }
}

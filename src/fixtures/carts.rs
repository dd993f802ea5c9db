//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in order
    pub lines: Vec<LineFixture>,
}

/// One cart line in YAML, referencing a product by its fixture key.
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Product fixture key
    pub product: String,

    /// Units in the cart
    pub quantity: u32,

    /// Whether the line is checked for checkout (defaults to true)
    #[serde(default = "selected_default")]
    pub selected: bool,
}

fn selected_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_defaults_to_true() -> Result<(), serde_norway::Error> {
        let yaml = r"
lines:
  - product: netflix-1m
    quantity: 2
  - product: spotify-1y
    quantity: 1
    selected: false
";
        let fixture: CartFixture = serde_norway::from_str(yaml)?;

        assert_eq!(fixture.lines.len(), 2);
        assert!(fixture.lines.first().is_some_and(|l| l.selected));
        assert!(fixture.lines.get(1).is_some_and(|l| !l.selected));

        Ok(())
    }
}

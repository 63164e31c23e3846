//! Shared output layer: human text or stable JSON, selected by `--json`.
//!
//! Every command handler builds a `Serialize` output value and passes a
//! human-rendering closure; JSON mode writes the value verbatim so scripts
//! get a stable contract regardless of how the human text evolves.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

use pragati_core::EngineError;

/// Shared width for human output separators.
pub const RULE_WIDTH: usize = 64;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Write a horizontal separator used by human output.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    rule(w)
}

/// Render a left-aligned key/value line.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<18} {}", format!("{key}:"), value.as_ref())
}

/// Whole rupees rendered in lakh, the chart display unit (`₹32.0L`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rupees_lakh(amount: i64) -> String {
    format!("₹{:.1}L", amount as f64 / 100_000.0)
}

/// Whole rupees rendered in crore, used by the fund-flow header cards
/// (`₹0.75 Cr`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rupees_crore(amount: i64) -> String {
    format!("₹{:.2} Cr", amount as f64 / 10_000_000.0)
}

/// Render `value` in the selected mode.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut w, value)?;
            writeln!(w)?;
        }
        OutputMode::Human => human(value, &mut w)?,
    }
    Ok(())
}

/// JSON envelope for a rejected action.
#[derive(Debug, Serialize)]
struct ErrorOutput<'a> {
    ok: bool,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'a str>,
}

/// Render an engine error to stderr with its taxonomy code and hint.
pub fn render_engine_error(mode: OutputMode, err: &EngineError) {
    let code = err.code();
    if mode.is_json() {
        let payload = ErrorOutput {
            ok: false,
            code: code.code(),
            message: err.to_string(),
            hint: code.hint(),
        };
        if let Ok(json) = serde_json::to_string_pretty(&payload) {
            eprintln!("{json}");
        }
    } else {
        eprintln!("error [{code}]: {err}");
        if let Some(hint) = code.hint() {
            eprintln!("hint: {hint}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, rupees_crore, rupees_lakh};

    #[test]
    fn lakh_and_crore_formatting() {
        assert_eq!(rupees_lakh(5_000_000), "₹50.0L");
        assert_eq!(rupees_lakh(3_200_000), "₹32.0L");
        assert_eq!(rupees_crore(7_500_000), "₹0.75 Cr");
        assert_eq!(rupees_crore(125_000_000), "₹12.50 Cr");
    }

    #[test]
    fn mode_flags() {
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Human.is_json());
    }
}

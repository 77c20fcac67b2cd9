//! Line-oriented batch checking: `TYPE<TAB>VALUE` per line.

use crate::token_for;
use anyhow::Result;
use ferrum_primitives::{decode_named_with, ParseConfig, PrimitiveKind};
use std::io::{BufRead, Write};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub checked: usize,
    pub failed: usize,
}

/// Writes `ok` or `error` per value line and a closing summary line.
/// Blank lines and `#` comments are skipped.
pub fn check_lines<R: BufRead, W: Write>(
    reader: R,
    mut out: W,
    config: &ParseConfig,
) -> Result<Summary> {
    let mut summary = Summary::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        summary.checked += 1;

        match check_line(&line, config) {
            Ok(canonical) => writeln!(out, "ok\t{}\t{}", line_no, canonical)?,
            Err(reason) => {
                summary.failed += 1;
                tracing::debug!(line = line_no, %reason, "value rejected");
                writeln!(out, "error\t{}\t{}", line_no, reason)?;
            }
        }
    }
    writeln!(
        out,
        "{} checked, {} failed",
        summary.checked, summary.failed
    )?;
    Ok(summary)
}

fn check_line(line: &str, config: &ParseConfig) -> std::result::Result<String, String> {
    let (type_name, raw) = line
        .split_once('\t')
        .ok_or_else(|| "expected TYPE<TAB>VALUE".to_string())?;
    let kind: PrimitiveKind = type_name.parse().map_err(|e| format!("{}", e))?;
    decode_named_with(kind.type_name(), &token_for(kind, raw), config)
        .map(|value| value.encode().to_string())
        .map_err(|e| e.to_string())
}

//! Parser for the CLI's textual request-script format.
//!
//! One operation per line: `fetch <hex-addr>`, `load <hex-addr>`, or
//! `store <hex-addr> <hex-data> <width>` where `<width>` is `b`, `h`, or
//! `w`. Blank lines and lines starting with `#` are ignored.

use rv_memsys_core::core::Func3;

/// A single scripted CPU-side request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// An instruction fetch at the given byte address.
    Fetch(u32),
    /// A data load at the given byte address.
    Load(u32),
    /// A data store of `data` (masked to `width`) at `addr`.
    Store { addr: u32, data: u32, width: Func3 },
}

/// Parses a request script, one [`Op`] per non-blank, non-comment line.
///
/// # Errors
///
/// Returns a message identifying the offending line on a malformed
/// operation, missing field, or unparseable hex literal.
pub fn parse(text: &str) -> Result<Vec<Op>, String> {
    let mut ops = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        ops.push(parse_line(line).map_err(|e| format!("line {}: {e}", line_no + 1))?);
    }
    Ok(ops)
}

fn parse_line(line: &str) -> Result<Op, String> {
    let mut fields = line.split_whitespace();
    let op = fields.next().ok_or("empty operation")?;
    match op {
        "fetch" => Ok(Op::Fetch(parse_hex(next_field(&mut fields, "address")?)?)),
        "load" => Ok(Op::Load(parse_hex(next_field(&mut fields, "address")?)?)),
        "store" => {
            let addr = parse_hex(next_field(&mut fields, "address")?)?;
            let data = parse_hex(next_field(&mut fields, "data")?)?;
            let width = match next_field(&mut fields, "width")? {
                "b" => Func3::Byte,
                "h" => Func3::Half,
                "w" => Func3::Word,
                other => return Err(format!("unknown width '{other}'")),
            };
            Ok(Op::Store { addr, data, width })
        }
        other => Err(format!("unknown operation '{other}'")),
    }
}

fn next_field<'a>(
    fields: &mut std::str::SplitWhitespace<'a>,
    what: &str,
) -> Result<&'a str, String> {
    fields.next().ok_or_else(|| format!("missing {what}"))
}

fn parse_hex(field: &str) -> Result<u32, String> {
    let digits = field.strip_prefix("0x").unwrap_or(field);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex literal '{field}': {e}"))
}

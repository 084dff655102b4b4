//! y/N の確認プロンプト

use std::io::{BufRead, Write};

/// question を表示して 1 行読み、y / yes（大文字小文字を問わない）なら true。EOF は false
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> std::io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

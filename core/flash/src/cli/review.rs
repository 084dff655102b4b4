//! 復習のコンソールループ
//!
//! Enter で答えを表示、もう一度 Enter で次のカード。s で並べ直し、q（または EOF）で終了。

use crate::domain::{CardFace, Collection, FlashError, ReviewSession};
use common::error::Error;
use rand::Rng;
use std::io::{BufRead, Write};

pub const EMPTY_MESSAGE: &str = "Your collection is empty. Add words with `flash add <word>`.";
const KEYS_HINT: &str = "Enter: reveal / next, s: shuffle again, q: quit";

/// 1 行入力の解釈
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Next,
    Shuffle,
    Quit,
    Unknown,
}

fn parse_key(line: &str) -> Key {
    match line.trim() {
        "" => Key::Next,
        "s" | "S" => Key::Shuffle,
        "q" | "Q" => Key::Quit,
        _ => Key::Unknown,
    }
}

fn io_err(e: std::io::Error) -> FlashError {
    Error::io_msg(format!("console I/O failed: {}", e)).into()
}

fn render<W: Write>(session: &ReviewSession, output: &mut W) -> std::io::Result<()> {
    let card = session.current();
    match session.face() {
        CardFace::Hidden => writeln!(
            output,
            "[{}/{}] {}",
            session.position() + 1,
            session.len(),
            card.word
        ),
        CardFace::Revealed => writeln!(output, "      {} : {}", card.reading, card.translation),
    }
}

/// 単語帳のスナップショットで復習する。表示したカードの枚数を返す
///
/// 空の単語帳ならメッセージを出して 0 を返す。
pub fn run_review<R, W, G>(
    collection: &Collection,
    input: &mut R,
    output: &mut W,
    rng: &mut G,
) -> Result<usize, FlashError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut session = match ReviewSession::start_with_rng(collection, &mut *rng) {
        Ok(s) => s,
        Err(FlashError::EmptyCollection) => {
            writeln!(output, "{}", EMPTY_MESSAGE).map_err(io_err)?;
            return Ok(0);
        }
        Err(e) => return Err(e),
    };
    writeln!(output, "{}", KEYS_HINT).map_err(io_err)?;
    render(&session, output).map_err(io_err)?;
    let mut shown = 1;

    let mut line = String::new();
    loop {
        output.flush().map_err(io_err)?;
        line.clear();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            break;
        }
        match parse_key(&line) {
            Key::Quit => break,
            Key::Next if session.is_revealed() => {
                session = session.advance();
                shown += 1;
            }
            Key::Next => session = session.reveal(),
            Key::Shuffle => {
                session = ReviewSession::reset_with_rng(collection, &mut *rng)?;
                writeln!(output, "Shuffled.").map_err(io_err)?;
                shown += 1;
            }
            Key::Unknown => {
                writeln!(output, "{}", KEYS_HINT).map_err(io_err)?;
                continue;
            }
        }
        render(&session, output).map_err(io_err)?;
    }
    Ok(shown)
}

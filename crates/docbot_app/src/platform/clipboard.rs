//! Clipboard copy via the OSC 52 terminal escape, which most terminal
//! emulators (and tmux with `set-clipboard on`) forward to the system
//! clipboard without any platform library.

use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text.as_bytes()))
}

pub fn copy<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())
}

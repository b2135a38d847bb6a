use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use docbot_core::chat::{self, ChatState, FileKind, PendingFile};
use docbot_core::contract::{self, ContractState};
use docbot_engine::{EngineEvent, EngineEvents};
use docbot_logging::{docbot_debug, docbot_info, docbot_warn};

use super::effects::EffectRunner;
use super::input::{self, ChatInput, ContractInput};
use super::render::{self, ChatRenderer};

/// Everything the main loop reacts to, merged into one channel.
pub enum AppEvent {
    Line(String),
    InputClosed,
    Engine(EngineEvent),
}

pub fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("docbot-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(AppEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        docbot_warn!("stdin read failed: {}", err);
                        break;
                    }
                }
            }
            let _ = tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

pub fn spawn_event_pump(events: EngineEvents, tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("docbot-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if tx.send(AppEvent::Engine(event)).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

pub fn run_chat<W: Write>(
    mut state: ChatState,
    mut runner: EffectRunner,
    rx: mpsc::Receiver<AppEvent>,
    out: &mut W,
) -> io::Result<()> {
    let mut renderer = ChatRenderer::default();
    let mut confirming = false;
    let mut input_closed = false;

    write_lines(out, renderer.render(&state.view()))?;
    writeln!(out, "{}", input::CHAT_COMMANDS)?;

    for event in rx.iter() {
        let msg = match event {
            AppEvent::Line(line) if confirming => {
                confirming = false;
                Some(chat::Msg::ConfirmationAnswered(input::is_affirmative(&line)))
            }
            AppEvent::Line(line) => match input::parse_chat_line(&line) {
                ChatInput::Msg(msg) => Some(msg),
                ChatInput::Attach { kind, paths } => match pending_files(kind, &paths) {
                    Ok(files) => Some(chat::Msg::FilesAttached(files)),
                    Err(error) => {
                        writeln!(out, "{}", error)?;
                        None
                    }
                },
                ChatInput::Usage(text) => {
                    writeln!(out, "{}", text)?;
                    None
                }
                ChatInput::Quit => break,
            },
            AppEvent::InputClosed => {
                input_closed = true;
                // An unanswered prompt counts as declined.
                if confirming {
                    confirming = false;
                    Some(chat::Msg::ConfirmationAnswered(false))
                } else {
                    None
                }
            }
            AppEvent::Engine(event) => runner.chat_msg(event),
        };

        if let Some(msg) = msg {
            docbot_debug!("chat msg {:?}", msg);
            let (next, effects) = chat::update(state, msg);
            state = next;
            let prompts = runner.run_chat(effects);

            if state.consume_dirty() {
                write_lines(out, renderer.render(&state.view()))?;
            }
            for notice in state.take_notices() {
                writeln!(out, "{}", render::notice_line(&notice))?;
            }
            for prompt in prompts {
                confirming = true;
                write!(out, "{} [y/N] ", prompt)?;
            }
            out.flush()?;
        }

        // Piped input: finish the running workflow before leaving.
        if input_closed && !state.is_busy() {
            break;
        }
    }
    docbot_info!("chat session ended");
    Ok(())
}

pub fn run_contract<W: Write>(
    mut state: ContractState,
    mut runner: EffectRunner,
    rx: mpsc::Receiver<AppEvent>,
    out: &mut W,
) -> io::Result<()> {
    let mut input_closed = false;
    let mut pending = vec![contract::Msg::Started];
    writeln!(out, "{}", input::CONTRACT_COMMANDS)?;

    loop {
        while let Some(msg) = pending.pop() {
            docbot_debug!("contract msg {:?}", msg);
            let (next, effects) = contract::update(state, msg);
            state = next;
            // Local effects answer synchronously; feed those back in order.
            let mut replies = runner.run_contract(effects);
            replies.reverse();
            pending.extend(replies);

            if state.consume_dirty() {
                write_lines(out, render::render_contract(&state.view()))?;
            }
            for notice in state.take_notices() {
                writeln!(out, "{}", render::notice_line(&notice))?;
            }
            out.flush()?;
        }

        if input_closed && !state.is_loading() {
            break;
        }
        let Ok(event) = rx.recv() else {
            break;
        };
        match event {
            AppEvent::Line(line) => match input::parse_contract_line(&line) {
                ContractInput::Msg(msg) => pending.push(msg),
                ContractInput::Usage(text) => writeln!(out, "{}", text)?,
                ContractInput::Quit => break,
            },
            AppEvent::InputClosed => input_closed = true,
            AppEvent::Engine(event) => pending.extend(runner.contract_msg(event)),
        }
    }
    docbot_info!("contract session ended");
    Ok(())
}

/// Stats local files so they can be queued with their size.
pub fn pending_files(kind: FileKind, paths: &[PathBuf]) -> Result<Vec<PendingFile>, String> {
    paths
        .iter()
        .map(|path| {
            let meta = fs::metadata(path)
                .map_err(|err| format!("Cannot attach {}: {}", path.display(), err))?;
            if !meta.is_file() {
                return Err(format!("Cannot attach {}: not a file", path.display()));
            }
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(PendingFile {
                name,
                size_bytes: meta.len(),
                kind,
                path: path.clone(),
            })
        })
        .collect()
}

fn write_lines<W: Write>(out: &mut W, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::pending_files;
    use docbot_core::chat::FileKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn attaching_reads_file_size() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("terms.pdf");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let files = pending_files(FileKind::Pdf, &[path.clone()]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "terms.pdf");
        assert_eq!(files[0].size_bytes, 2048);
        assert_eq!(files[0].path, path);
    }

    #[test]
    fn missing_or_directory_paths_are_refused() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.pdf");
        let err = pending_files(FileKind::Pdf, &[missing]).unwrap_err();
        assert!(err.starts_with("Cannot attach"));

        let err = pending_files(FileKind::Text, &[temp.path().to_path_buf()]).unwrap_err();
        assert!(err.ends_with("not a file"));
    }
}

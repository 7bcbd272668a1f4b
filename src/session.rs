//! Command session over a text stream
//!
//! A session reads whitespace-separated tokens, drives a [`SkewHeap`] of
//! integer keys, and writes a transcript. The first command must be
//! `CREAR <int>`; afterwards the following are accepted until `FIN` or the
//! end of the input:
//!
//! | Command                  | Effect                                    |
//! |--------------------------|-------------------------------------------|
//! | `INSERTAR <int>`         | insert a key                              |
//! | `BORRAR`                 | remove the minimum                        |
//! | `MIN`                    | print the minimum                         |
//! | `MODIFICAR <int> I/D… P` | replace the key at a path from the root   |
//! | `FIN`                    | end the session                           |
//!
//! Unknown tokens are reported and skipped. After every command the tree is
//! printed (see the `Display` impl of [`SkewHeap`]) and followed by a blank
//! line, or two when the heap is empty, unless rendering is off.
//!
//! # Example
//!
//! ```rust
//! use rust_skew_heap::config::SessionConfig;
//! use rust_skew_heap::session;
//!
//! let mut transcript = Vec::new();
//! let heap = session::run(&b"CREAR 5 INSERTAR 3 MIN FIN"[..], &mut transcript, SessionConfig::default()).unwrap();
//! assert_eq!(heap.peek_min(), Ok(&3));
//! assert!(String::from_utf8(transcript).unwrap().contains("El minimo del monticulo es 3."));
//! ```

use crate::config::SessionConfig;
use crate::path::{Direction, Path};
use crate::skew::SkewHeap;
use crate::traits::HeapError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Key type handled by sessions
pub type Key = i64;

/// Errors that end a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session must start with CREAR, found {found:?}")]
    MissingCreate { found: Option<String> },
    #[error("{command} expects an argument, found {found:?}")]
    InvalidArgument {
        command: &'static str,
        found: Option<String>,
    },
    #[error("transcript I/O failed")]
    Io(#[from] io::Error),
}

/// A command after `CREAR`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(Key),
    DeleteMin,
    Min,
    Modify { value: Key, path: Path },
    End,
    Unknown(String),
}

/// Splits a buffered reader into whitespace-separated tokens, a line at a time
pub struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(input: R) -> Self {
        Tokens {
            input,
            pending: VecDeque::new(),
        }
    }

    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    /// Reads the next command, or `None` at the end of the input
    ///
    /// `CREAR` is only meaningful as the first command; here it is an
    /// unknown token like any other.
    pub fn next_command(&mut self) -> Result<Option<Command>, SessionError> {
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        let command = match token.as_str() {
            "INSERTAR" => Command::Insert(self.next_key("INSERTAR")?),
            "BORRAR" => Command::DeleteMin,
            "MIN" => Command::Min,
            "MODIFICAR" => {
                let value = self.next_key("MODIFICAR")?;
                let path = self.next_path()?;
                Command::Modify { value, path }
            }
            "FIN" => Command::End,
            _ => Command::Unknown(token),
        };
        Ok(Some(command))
    }

    fn next_key(&mut self, command: &'static str) -> Result<Key, SessionError> {
        match self.next_token()? {
            Some(token) => match token.parse() {
                Ok(key) => Ok(key),
                Err(_) => Err(SessionError::InvalidArgument {
                    command,
                    found: Some(token),
                }),
            },
            None => Err(SessionError::InvalidArgument {
                command,
                found: None,
            }),
        }
    }

    /// Reads `I`/`D` steps up to the terminating `P`; steps may be separate
    /// tokens or run together, and other characters are skipped. Text after
    /// the `P` in the same token is handed back as the next token.
    fn next_path(&mut self) -> Result<Path, SessionError> {
        let mut path = Path::root();
        loop {
            let token = self
                .next_token()?
                .ok_or(SessionError::InvalidArgument {
                    command: "MODIFICAR",
                    found: None,
                })?;
            for (i, c) in token.char_indices() {
                match c {
                    'I' => path.push(Direction::Left),
                    'D' => path.push(Direction::Right),
                    'P' => {
                        let rest = &token[i + c.len_utf8()..];
                        if !rest.is_empty() {
                            self.pending.push_front(rest.to_owned());
                        }
                        return Ok(path);
                    }
                    _ => {}
                }
            }
        }
    }
}

/// A running session: the heap plus the transcript it writes to
pub struct Session<W> {
    heap: SkewHeap<Key>,
    out: W,
    config: SessionConfig,
}

impl<W: Write> Session<W> {
    /// Reads the opening `CREAR <int>` and creates the heap
    ///
    /// # Errors
    /// Returns `SessionError::MissingCreate` (after saying so in the
    /// transcript) if the first token is anything else.
    pub fn start<R: BufRead>(
        tokens: &mut Tokens<R>,
        mut out: W,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let first = tokens.next_token()?;
        if first.as_deref() != Some("CREAR") {
            writeln!(out, "La primera instruccion del caso de prueba no es CREAR.")?;
            out.flush()?;
            return Err(SessionError::MissingCreate { found: first });
        }

        let key = tokens.next_key("CREAR")?;
        let mut session = Session {
            heap: SkewHeap::singleton(key),
            out,
            config,
        };
        tracing::debug!(key, "created heap");
        writeln!(session.out, "Monticulo creado.")?;
        session.render()?;
        Ok(session)
    }

    /// Runs one command and writes its part of the transcript
    ///
    /// Heap errors are reported in the transcript and do not end the
    /// session; only I/O failures are returned.
    pub fn execute(&mut self, command: &Command) -> Result<(), SessionError> {
        tracing::debug!(?command, "executing command");
        match command {
            Command::Insert(key) => {
                self.heap.insert(*key);
                writeln!(self.out, "Se ha insertado {key} con exito.")?;
            }
            Command::DeleteMin => match self.heap.extract_min() {
                Ok(()) => writeln!(self.out, "Se ha eliminado el minimo con exito.")?,
                Err(err) => self.report(err)?,
            },
            Command::Min => match self.heap.peek_min() {
                Ok(min) => writeln!(self.out, "El minimo del monticulo es {min}.")?,
                Err(err) => self.report(err)?,
            },
            Command::Modify { value, path } => self.modify(*value, path)?,
            Command::Unknown(_) => writeln!(self.out, "Operacion no reconocida.")?,
            Command::End => return Ok(()),
        }
        self.render()
    }

    pub fn heap(&self) -> &SkewHeap<Key> {
        &self.heap
    }

    pub fn into_heap(self) -> SkewHeap<Key> {
        self.heap
    }

    fn modify(&mut self, value: Key, path: &Path) -> Result<(), SessionError> {
        let path = if self.config.mirror_right_steps {
            path.iter().map(|_| Direction::Left).collect()
        } else {
            path.clone()
        };

        let old = self
            .heap
            .navigate(&path)
            .and_then(|node| node.key().copied().ok_or(HeapError::EmptyHeap));
        let old = match old {
            Ok(old) => old,
            Err(err) => return self.report(err),
        };

        writeln!(
            self.out,
            "Se va a modificar el valor {old} por el valor {value}"
        )?;
        match self.heap.update_key(&path, value) {
            Ok(()) => writeln!(self.out, "Valor modificado.")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn report(&mut self, err: HeapError) -> Result<(), SessionError> {
        tracing::warn!(%err, "command failed");
        match err {
            HeapError::EmptyHeap => writeln!(self.out, "Error: el monticulo esta vacio.")?,
            HeapError::InvalidPath { depth } => writeln!(
                self.out,
                "Error: la posicion no existe en el monticulo (paso {depth})."
            )?,
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), SessionError> {
        if self.config.render_state {
            writeln!(self.out, "{}", self.heap)?;
            writeln!(self.out)?;
            if self.heap.is_empty() {
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Runs a whole session and returns the final heap
///
/// # Errors
/// Returns `SessionError::MissingCreate` if the input does not open with
/// `CREAR`, `SessionError::InvalidArgument` on a missing or malformed
/// argument, and `SessionError::Io` if reading or writing fails.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: W,
    config: SessionConfig,
) -> Result<SkewHeap<Key>, SessionError> {
    let mut tokens = Tokens::new(input);
    let mut session = Session::start(&mut tokens, out, config)?;
    while let Some(command) = tokens.next_command()? {
        if command == Command::End {
            break;
        }
        session.execute(&command)?;
    }
    tracing::debug!(len = session.heap().len(), "session ended");
    Ok(session.into_heap())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(input: &str) -> Vec<Command> {
        let mut tokens = Tokens::new(input.as_bytes());
        let mut commands = Vec::new();
        while let Some(command) = tokens.next_command().unwrap() {
            commands.push(command);
        }
        commands
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            commands("INSERTAR 4\nBORRAR MIN\n  FIN otro"),
            vec![
                Command::Insert(4),
                Command::DeleteMin,
                Command::Min,
                Command::End,
                Command::Unknown("otro".to_owned()),
            ]
        );
    }

    #[test]
    fn test_parse_modify_paths() {
        assert_eq!(
            commands("MODIFICAR -3 I D I P MODIFICAR 7 IDP MODIFICAR 1 P"),
            vec![
                Command::Modify {
                    value: -3,
                    path: Path::root().left().right().left(),
                },
                Command::Modify {
                    value: 7,
                    path: Path::root().left().right(),
                },
                Command::Modify {
                    value: 1,
                    path: Path::root(),
                },
            ]
        );
    }

    #[test]
    fn test_text_after_path_end_is_next_token() {
        assert_eq!(
            commands("MODIFICAR 9 IPMIN MODIFICAR 4 DPP FIN"),
            vec![
                Command::Modify {
                    value: 9,
                    path: Path::root().left(),
                },
                Command::Min,
                Command::Modify {
                    value: 4,
                    path: Path::root().right(),
                },
                Command::Unknown("P".to_owned()),
                Command::End,
            ]
        );
    }

    #[test]
    fn test_crear_is_unknown_after_start() {
        assert_eq!(
            commands("CREAR 5"),
            vec![
                Command::Unknown("CREAR".to_owned()),
                Command::Unknown("5".to_owned()),
            ]
        );
    }

    #[test]
    fn test_bad_arguments() {
        let mut tokens = Tokens::new("INSERTAR tres".as_bytes());
        assert!(matches!(
            tokens.next_command(),
            Err(SessionError::InvalidArgument {
                command: "INSERTAR",
                found: Some(ref found),
            }) if found == "tres"
        ));

        let mut tokens = Tokens::new("MODIFICAR 3 I D".as_bytes());
        assert!(matches!(
            tokens.next_command(),
            Err(SessionError::InvalidArgument {
                command: "MODIFICAR",
                found: None,
            })
        ));
    }

    #[test]
    fn test_execute_reports_heap_errors() {
        let mut tokens = Tokens::new("CREAR 2".as_bytes());
        let mut out = Vec::new();
        let mut session = Session::start(&mut tokens, &mut out, SessionConfig::default()).unwrap();
        session.execute(&Command::DeleteMin).unwrap();
        session.execute(&Command::Min).unwrap();
        assert!(session.heap().is_empty());
        drop(session);

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Monticulo creado.\nRAIZ(2)\n\n\
             Se ha eliminado el minimo con exito.\nMonticulo vacio\n\n\n\
             Error: el monticulo esta vacio.\nMonticulo vacio\n\n\n"
        );
    }
}

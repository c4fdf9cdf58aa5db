//! Thin client for an external UCI chess engine process.
//!
//! Spawns the engine binary with piped stdio and speaks the line-based
//! UCI protocol: `uci`/`isready` handshake at startup, then
//! `position fen ...` + `go movetime ...` per query, reading until the
//! engine answers with a `bestmove` line.
//!
//! One [`UciEngine`] owns one engine process and one pipe pair. The
//! handle is not safe to share between in-flight searches; callers that
//! serve concurrent requests must serialize access (e.g. behind a
//! mutex), since interleaved writes on the same pipe corrupt both
//! exchanges.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

/// Allowance for the `uci`/`isready` handshake at startup.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Slack on top of the requested movetime before a search is declared
/// lost. Engines finish a `go movetime` search slightly late, never
/// this late.
const SEARCH_GRACE: Duration = Duration::from_secs(2);

/// Errors from spawning or talking to the engine process.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine executable could not be started.
    #[error("failed to start engine `{path}`: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the engine pipes failed.
    #[error("engine i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine closed its output pipe (process exited or crashed).
    #[error("engine closed its output pipe")]
    Closed,

    /// The engine did not produce the expected reply in time.
    #[error("engine did not answer within {0:?}")]
    Timeout(Duration),

    /// The engine answered with something the protocol does not allow
    /// here, including `bestmove (none)` for a position with no moves.
    #[error("unexpected engine reply: {0}")]
    Protocol(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Handle to a running UCI engine process.
///
/// The child is killed when the handle is dropped; there is no
/// graceful `quit`, reconnect, or respawn logic.
pub struct UciEngine {
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl UciEngine {
    /// Spawn the engine at `path` and complete the UCI handshake.
    pub async fn spawn(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(EngineError::Closed)?;
        let stdout = child.stdout.take().ok_or(EngineError::Closed)?;

        let mut engine = UciEngine {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        };

        engine.send("uci").await?;
        engine.wait_for("uciok", HANDSHAKE_TIMEOUT).await?;
        engine.send("isready").await?;
        engine.wait_for("readyok", HANDSHAKE_TIMEOUT).await?;

        tracing::debug!(path = %path.display(), "uci handshake complete");
        Ok(engine)
    }

    /// Ask the engine for its best move from `fen`, searching for
    /// `movetime` of wall-clock time. Returns the move in coordinate
    /// (UCI) notation, e.g. `e2e4` or `e7e8q`.
    pub async fn best_move(&mut self, fen: &str, movetime: Duration) -> EngineResult<String> {
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go movetime {}", movetime.as_millis()))
            .await?;

        let budget = movetime + SEARCH_GRACE;
        let line = self.wait_for("bestmove", budget).await?;
        match parse_bestmove(&line) {
            Some("(none)") | None => Err(EngineError::Protocol(line)),
            Some(mv) => Ok(mv.to_string()),
        }
    }

    async fn send(&mut self, command: &str) -> EngineResult<()> {
        self.stdin.write_all(command.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Read lines until one starts with `token`, or the budget runs
    /// out. Intermediate `id`/`option`/`info` chatter is skipped.
    async fn wait_for(&mut self, token: &str, budget: Duration) -> EngineResult<String> {
        let read = async {
            loop {
                match self.stdout.next_line().await? {
                    Some(line) if line.starts_with(token) => return Ok(line),
                    Some(_) => continue,
                    None => return Err(EngineError::Closed),
                }
            }
        };
        timeout(budget, read)
            .await
            .map_err(|_| EngineError::Timeout(budget))?
    }
}

/// Extract the move token from a `bestmove ...` line.
pub fn parse_bestmove(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("bestmove") => parts.next(),
        _ => None,
    }
}

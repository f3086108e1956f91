//! Shared line input
//!
//! The session loop and the terminal permission dialog both read lines from
//! the same input. `Console` is a cheap clonable handle onto it.

use crate::error::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

type LineSource = Box<dyn AsyncBufRead + Send + Unpin>;

/// Line-oriented input shared between readers
#[derive(Clone)]
pub struct Console {
    lines: Arc<Mutex<Lines<LineSource>>>,
}

impl Console {
    /// Console reading from the process's standard input
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    /// Console reading from any buffered reader
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        let source: LineSource = Box::new(reader);
        Self {
            lines: Arc::new(Mutex::new(source.lines())),
        }
    }

    /// Read the next line, trimmed; `None` at end of input
    pub async fn read_line(&self) -> Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        let line = lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

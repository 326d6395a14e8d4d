//! Console Presenter - asks questions on the terminal
//!
//! All interactive println!/colored output of a game is concentrated here.
//! Replies are read from async stdin so the answer timeout can cancel a
//! pending read.

use async_trait::async_trait;
use colored::Colorize;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use twentyq_application::{Presenter, PresenterError};

/// Presenter backed by the terminal
pub struct ConsolePresenter<R = BufReader<Stdin>> {
    lines: Mutex<Lines<R>>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncBufRead + Unpin> ConsolePresenter<R> {
    /// Read replies from `reader` instead of stdin
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Presenter for ConsolePresenter<R> {
    async fn ask(&self, prompt: &str) -> Result<String, PresenterError> {
        print!("{} ", prompt.bold());
        io::stdout()
            .flush()
            .map_err(|e| PresenterError::IoError(format!("Failed to flush stdout: {}", e)))?;

        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => {
                println!();
                Err(PresenterError::InputClosed)
            }
            Err(e) => Err(PresenterError::IoError(format!("Failed to read input: {}", e))),
        }
    }

    fn show(&self, text: &str) {
        if text.starts_with("  ") {
            println!("{}", text.dimmed());
        } else {
            println!("{}", text.cyan());
        }
    }
}

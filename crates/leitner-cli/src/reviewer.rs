//! Terminal reviewer: shows a card, reveals the answer, reads y/n.

use std::io::IsTerminal;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use leitner_core::{Card, Judgment, Reviewer};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Reviewer that talks to a line-oriented terminal.
pub struct TerminalReviewer<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
    watch_ctrl_c: bool,
    padding: usize,
}

impl TerminalReviewer<BufReader<Stdin>, Stdout> {
    /// Reviewer on the process's stdin/stdout. Ctrl-C cancels the session.
    pub fn stdio() -> Self {
        TerminalReviewer::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .with_clear_screen(std::io::stdout().is_terminal())
            .with_ctrl_c()
    }
}

impl<R, W> TerminalReviewer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: false,
            watch_ctrl_c: false,
            padding: 15,
        }
    }

    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Treat Ctrl-C while waiting for input as a cancellation.
    pub fn with_ctrl_c(mut self) -> Self {
        self.watch_ctrl_c = true;
        self
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Next trimmed line, or `None` on end of input or Ctrl-C.
    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = if self.watch_ctrl_c {
            tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => return Ok(None),
                read = self.input.read_line(&mut line) => read?,
            }
        } else {
            self.input.read_line(&mut line).await?
        };

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn display_front(&mut self, card: &Card) -> Result<()> {
        let rule = "=".repeat(self.padding);
        let clear = if self.clear_screen { CLEAR_SCREEN } else { "" };
        self.write(&format!(
            "{clear}{rule}\n CARD FRONT: {}\n{rule}\n\nPress [Enter] to see the answer",
            card.front
        ))
        .await
    }

    async fn display_back(&mut self, card: &Card) -> Result<()> {
        let rule = "=".repeat(self.padding);
        self.write(&format!("\n CARD BACK: {}\n{rule}\n", card.back))
            .await
    }
}

/// Map a typed answer to a judgment. `None` means the input was not understood.
fn parse_answer(input: &str) -> Option<Judgment> {
    match input.to_lowercase().as_str() {
        "y" | "yes" => Some(Judgment::Correct),
        "n" | "no" => Some(Judgment::Incorrect),
        "q" | "quit" => Some(Judgment::Cancelled),
        _ => None,
    }
}

#[async_trait]
impl<R, W> Reviewer for TerminalReviewer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn present_and_judge(&mut self, card: &Card) -> Result<Judgment> {
        self.display_front(card).await?;
        if self.read_line().await?.is_none() {
            return Ok(Judgment::Cancelled);
        }
        self.display_back(card).await?;

        loop {
            self.write("Did you get it right? (y/n) ").await?;
            let Some(answer) = self.read_line().await? else {
                return Ok(Judgment::Cancelled);
            };
            match parse_answer(&answer) {
                Some(judgment) => return Ok(judgment),
                None => self.write("Please answer y or n (q to stop).\n").await?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn judge(input: &'static str) -> (Judgment, String) {
        let mut reviewer = TerminalReviewer::new(input.as_bytes(), Vec::new());
        let judgment = reviewer
            .present_and_judge(&Card::new("Gatto", "Cat"))
            .await
            .unwrap();
        let output = String::from_utf8(reviewer.into_output()).unwrap();
        (judgment, output)
    }

    #[test]
    fn parse_answers() {
        assert_eq!(parse_answer("y"), Some(Judgment::Correct));
        assert_eq!(parse_answer("YES"), Some(Judgment::Correct));
        assert_eq!(parse_answer("n"), Some(Judgment::Incorrect));
        assert_eq!(parse_answer("q"), Some(Judgment::Cancelled));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[tokio::test]
    async fn shows_both_sides_and_reads_yes() {
        let (judgment, output) = judge("\ny\n").await;
        assert_eq!(judgment, Judgment::Correct);
        assert!(output.contains("CARD FRONT: Gatto"));
        assert!(output.contains("CARD BACK: Cat"));
        assert!(!output.contains(CLEAR_SCREEN));
    }

    #[tokio::test]
    async fn reprompts_on_unknown_answer() {
        let (judgment, output) = judge("\nperhaps\nn\n").await;
        assert_eq!(judgment, Judgment::Incorrect);
        assert_eq!(output.matches("Did you get it right?").count(), 2);
    }

    #[tokio::test]
    async fn end_of_input_cancels() {
        let (judgment, output) = judge("").await;
        assert_eq!(judgment, Judgment::Cancelled);
        assert!(!output.contains("CARD BACK"));

        let (judgment, _) = judge("\n").await;
        assert_eq!(judgment, Judgment::Cancelled);
    }

    #[tokio::test]
    async fn quit_cancels() {
        let (judgment, _) = judge("\nq\n").await;
        assert_eq!(judgment, Judgment::Cancelled);
    }

    #[tokio::test]
    async fn clears_screen_when_asked() {
        let mut reviewer =
            TerminalReviewer::new("\ny\n".as_bytes(), Vec::new()).with_clear_screen(true);
        reviewer
            .present_and_judge(&Card::new("a", "b"))
            .await
            .unwrap();
        let output = String::from_utf8(reviewer.into_output()).unwrap();
        assert!(output.starts_with(CLEAR_SCREEN));
    }
}

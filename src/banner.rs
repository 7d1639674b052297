use crossterm::{
    QueueableCommand,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::config::ServerConfig;

const CORNER: char = '+';
const HORIZONTAL: char = '-';
const VERTICAL: char = '|';
const LINE_END: &str = "\r\n";

/// Renders the welcome message inside an ASCII box
///
/// Telnet clients expect CRLF, so every line ends with `\r\n` regardless of
/// how the message text itself is broken up.
pub struct WelcomeBanner {
    frame_color: Option<Color>,
    title_color: Option<Color>,
}

impl WelcomeBanner {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                frame_color: Some(Color::Cyan),
                title_color: Some(Color::Yellow),
            }
        } else {
            Self {
                frame_color: None,
                title_color: None,
            }
        }
    }

    pub fn render<W: Write>(&self, writer: &mut W, title: &str, message: &str) -> io::Result<()> {
        let lines: Vec<&str> = message.lines().collect();
        let content_width = lines
            .iter()
            .map(|line| line.chars().count())
            .chain(std::iter::once(title.chars().count() + 2))
            .max()
            .unwrap_or(0);
        // Inner width: one space of padding on each side
        let inner = content_width + 2;

        self.render_top(writer, title, inner)?;
        for line in &lines {
            self.render_line(writer, line, inner)?;
        }
        self.render_bottom(writer, inner)?;

        Ok(())
    }

    fn render_top<W: Write>(&self, writer: &mut W, title: &str, inner: usize) -> io::Result<()> {
        let decorated = format!(" {} ", title);
        let title_len = decorated.chars().count();
        let left = inner.saturating_sub(title_len) / 2;
        let right = inner.saturating_sub(title_len + left);

        self.frame(writer, &format!("{}{}", CORNER, fill(left)))?;
        match self.title_color {
            Some(c) => {
                writer.queue(SetForegroundColor(c))?;
                writer.queue(Print(&decorated))?;
                writer.queue(ResetColor)?;
            }
            None => {
                writer.queue(Print(&decorated))?;
            }
        }
        self.frame(writer, &format!("{}{}", fill(right), CORNER))?;
        writer.queue(Print(LINE_END))?;

        Ok(())
    }

    fn render_line<W: Write>(&self, writer: &mut W, content: &str, inner: usize) -> io::Result<()> {
        self.frame(writer, &VERTICAL.to_string())?;
        writer.queue(Print(format!(
            " {:<width$} ",
            content,
            width = inner.saturating_sub(2)
        )))?;
        self.frame(writer, &VERTICAL.to_string())?;
        writer.queue(Print(LINE_END))?;

        Ok(())
    }

    fn render_bottom<W: Write>(&self, writer: &mut W, inner: usize) -> io::Result<()> {
        self.frame(writer, &format!("{}{}{}", CORNER, fill(inner), CORNER))?;
        writer.queue(Print(LINE_END))?;

        Ok(())
    }

    fn frame<W: Write>(&self, writer: &mut W, text: &str) -> io::Result<()> {
        if let Some(c) = self.frame_color {
            writer.queue(SetForegroundColor(c))?;
            writer.queue(Print(text))?;
            writer.queue(ResetColor)?;
        } else {
            writer.queue(Print(text))?;
        }
        Ok(())
    }
}

fn fill(count: usize) -> String {
    std::iter::repeat_n(HORIZONTAL, count).collect()
}

/// Render the greeting banner once for the whole server
pub fn render_welcome(config: &ServerConfig) -> io::Result<Vec<u8>> {
    let mut output = Vec::new();
    WelcomeBanner::new(config.banner.use_colors).render(
        &mut output,
        &config.banner.title,
        &config.welcome_message,
    )?;
    output.flush()?;
    Ok(output)
}

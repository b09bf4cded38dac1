use crossterm::style::{Color, Stylize};
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Success,
    Info,
    Warning,
    Danger,
    Muted,
}

impl Severity {
    fn color(self) -> Option<Color> {
        match self {
            Severity::Normal => None,
            Severity::Success => Some(Color::Green),
            Severity::Info => Some(Color::Rgb {
                r: 0x00,
                g: 0x60,
                b: 0xa0,
            }),
            Severity::Warning => Some(Color::Yellow),
            Severity::Danger => Some(Color::Red),
            Severity::Muted => Some(Color::Rgb {
                r: 0x6a,
                g: 0x6a,
                b: 0x6a,
            }),
        }
    }
}

/// A piece of a line with its own severity.
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub severity: Severity,
}

pub fn seg(text: impl Display, severity: Severity) -> Segment {
    Segment {
        text: text.to_string(),
        severity,
    }
}

/// Terminal sink for user-facing messages. Severity only changes the color.
pub struct Output<W: Write> {
    out: W,
    color: bool,
}

impl Output<io::Stdout> {
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(io::stdout(), color)
    }
}

impl Output<io::Stderr> {
    pub fn stderr() -> Self {
        let color = io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(io::stderr(), color)
    }
}

impl<W: Write> Output<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Render segments on one line, separated by spaces.
    pub fn line(&mut self, segments: &[Segment]) {
        let rendered: Vec<String> = segments.iter().map(|s| self.paint(s)).collect();
        // A closed stdout (e.g. piped into `head`) is not worth failing over.
        let _ = writeln!(self.out, "{}", rendered.join(" "));
    }

    pub fn write(&mut self, message: impl Display, severity: Severity) {
        self.line(&[seg(message, severity)]);
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    pub fn normal(&mut self, message: impl Display) {
        self.write(message, Severity::Normal);
    }

    pub fn success(&mut self, message: impl Display) {
        self.write(message, Severity::Success);
    }

    pub fn info(&mut self, message: impl Display) {
        self.write(message, Severity::Info);
    }

    pub fn warning(&mut self, message: impl Display) {
        self.write(message, Severity::Warning);
    }

    pub fn danger(&mut self, message: impl Display) {
        self.write(message, Severity::Danger);
    }

    /// Write without a newline and flush, for interactive prompts.
    pub fn inline(&mut self, text: &str) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn paint(&self, segment: &Segment) -> String {
        match segment.severity.color() {
            Some(color) if self.color => segment.text.as_str().with(color).to_string(),
            _ => segment.text.clone(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

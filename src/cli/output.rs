//! Terminal output for the Planner subcommands.
//!
//! Every line is written in one of a few tones. With colors off each tone
//! falls back to a bracketed tag so the output stays greppable.

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Ok,
    Info,
    Warn,
    Error,
    Skip,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Ok => "[OK]",
            Tone::Info => "[INFO]",
            Tone::Warn => "[WARN]",
            Tone::Error => "[ERROR]",
            Tone::Skip => "[SKIPPED]",
        }
    }

    fn symbol(self) -> String {
        match self {
            Tone::Ok => "✓".green().bold().to_string(),
            Tone::Info => "•".blue().to_string(),
            Tone::Warn => "⚠".yellow().bold().to_string(),
            Tone::Error => "✗".red().bold().to_string(),
            Tone::Skip => "○".yellow().to_string(),
        }
    }
}

/// Writes CLI status lines, colored unless disabled.
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Colored output
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Plain output (`--no-color`)
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    fn render(&self, tone: Tone, message: &str) -> String {
        if !self.colored {
            return format!("  {} {}", tone.tag(), message);
        }
        let body = match tone {
            Tone::Ok => message.green().to_string(),
            Tone::Warn => message.yellow().to_string(),
            Tone::Error => message.red().to_string(),
            Tone::Skip => message.dimmed().to_string(),
            Tone::Info => message.to_string(),
        };
        format!("  {} {}", tone.symbol(), body)
    }

    /// Product name and version
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!("\n   {} {}\n", "Planner".bright_cyan().bold(), version.dimmed());
        } else {
            println!("\n   Planner {}\n", version);
        }
    }

    /// Completed step
    pub fn success(&self, message: &str) {
        println!("{}", self.render(Tone::Ok, message));
    }

    /// Neutral status line
    pub fn info(&self, message: &str) {
        println!("{}", self.render(Tone::Info, message));
    }

    /// Non-fatal problem
    pub fn warning(&self, message: &str) {
        println!("{}", self.render(Tone::Warn, message));
    }

    /// Written to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render(Tone::Error, message));
    }

    /// A file `init` wrote, e.g. `created("config", "planner.toml")`.
    pub fn created(&self, kind: &str, path: &str) {
        self.success(&format!("{} {}", kind, path));
    }

    /// A file `init` left alone.
    pub fn skipped(&self, path: &str, reason: &str) {
        println!("{}", self.render(Tone::Skip, &format!("{} ({})", path, reason)));
    }

    /// Section title
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Indented `key: value` line of a summary
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Dimmed tip below a section
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Shell command the user can run next
    pub fn command(&self, cmd: &str) {
        let line = format!("$ {}", cmd);
        if self.colored {
            println!("     {}", line.bright_cyan());
        } else {
            println!("     {}", line);
        }
    }
}

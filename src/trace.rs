use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Verbosity of the diagnostic trace. A message is shown when the configured
/// level is at least the message's level.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Level {
    Error,
    Eval,
    Parser,
    Tokenizer,
    All,
}

impl Level {
    pub const ALL: &'static [Self] = &[
        Self::Error,
        Self::Eval,
        Self::Parser,
        Self::Tokenizer,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Eval => "eval",
            Self::Parser => "parser",
            Self::Tokenizer => "tokenizer",
            Self::All => "all",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Self::Error => "[ERROR] ",
            Self::Eval => "[EVALUATION] ",
            Self::Parser => "[PARSER] ",
            Self::Tokenizer => "[TOKENIZER] ",
            Self::All => "",
        }
    }

    fn target(&self) -> &'static str {
        match self {
            Self::Error | Self::All => "autoroll",
            Self::Eval => "autoroll::eval",
            Self::Parser => "autoroll::parser",
            Self::Tokenizer => "autoroll::tokenizer",
        }
    }

    pub fn as_log_level(&self) -> log::Level {
        match self {
            Self::Error => log::Level::Error,
            Self::Eval => log::Level::Info,
            Self::Parser => log::Level::Debug,
            Self::Tokenizer | Self::All => log::Level::Trace,
        }
    }

    /// The `log` filter that lets through exactly the messages this level enables.
    pub fn as_level_filter(&self) -> log::LevelFilter {
        self.as_log_level().to_level_filter()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Error
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("unknown trace level {0:?}; expected one of error, eval, parser, tokenizer, all")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLevel(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Leveled diagnostic context threaded through the tokenizer, parser and
/// evaluator. Output is forwarded to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    level: Level,
    depth: usize,
}

impl Trace {
    pub fn new(level: Level) -> Self {
        Self { level, depth: 0 }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.level >= level
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn unindent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Formats `msg` the way it will be emitted, or `None` if `level` is filtered out.
    pub fn render(&self, msg: impl fmt::Display, level: Level) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }
        Some(format!(
            "{}{}{}",
            level.prefix(),
            "    ".repeat(self.depth),
            msg
        ))
    }

    pub fn log(&self, msg: impl fmt::Display, level: Level) {
        if let Some(line) = self.render(msg, level) {
            log::log!(target: level.target(), level.as_log_level(), "{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert!(Level::Error < Level::Eval);
        assert!(Level::Eval < Level::Parser);
        assert!(Level::Parser < Level::Tokenizer);
        assert!(Level::Tokenizer < Level::All);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("parser".parse::<Level>(), Ok(Level::Parser));
        assert_eq!("ALL".parse::<Level>(), Ok(Level::All));
        assert_eq!(
            "verbose".parse::<Level>(),
            Err(UnknownLevel("verbose".to_string()))
        );
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>(), Ok(*level));
        }
    }

    #[test]
    fn test_filtering() {
        let trace = Trace::new(Level::Error);
        assert_eq!(
            trace.render("boom", Level::Error).as_deref(),
            Some("[ERROR] boom")
        );
        assert_eq!(trace.render("3 + 4 = 7", Level::Eval), None);

        let trace = Trace::new(Level::All);
        assert!(trace.render("d", Level::Tokenizer).is_some());
        assert!(trace.render("{", Level::Parser).is_some());
    }

    #[test]
    fn test_indentation() {
        let mut trace = Trace::new(Level::Parser);
        trace.indent();
        trace.indent();
        assert_eq!(
            trace.render("plus", Level::Parser).as_deref(),
            Some("[PARSER]         plus")
        );
        trace.unindent();
        trace.unindent();
        trace.unindent();
        assert_eq!(trace.depth(), 0);
        assert_eq!(
            trace.render("}", Level::Parser).as_deref(),
            Some("[PARSER] }")
        );
    }

    #[test]
    fn test_log_filters() {
        assert_eq!(Level::Error.as_level_filter(), log::LevelFilter::Error);
        assert_eq!(Level::Eval.as_level_filter(), log::LevelFilter::Info);
        assert_eq!(Level::All.as_level_filter(), log::LevelFilter::Trace);
    }
}

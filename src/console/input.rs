use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::utils::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Message carried by the `Io` error raised when the input reaches end of file.
pub const INPUT_CLOSED: &str = "input closed";

/// Line-oriented prompts over any async reader and blocking writer.
///
/// Typed prompts keep asking until the answer parses; only I/O failures escape.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    async fn read_line(&mut self, label: &str) -> AppResult<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(AppError::Io(INPUT_CLOSED.into()));
        }
        Ok(line.trim().to_string())
    }

    /// Free text; blank answers are returned as-is for the services to judge.
    pub async fn text(&mut self, label: &str) -> AppResult<String> {
        self.read_line(label).await
    }

    async fn parsed<T>(
        &mut self,
        label: &str,
        hint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> AppResult<T> {
        loop {
            let answer = self.read_line(label).await?;
            match parse(&answer) {
                Some(value) => return Ok(value),
                None => self.say(format!("Invalid value '{}', expected {}", answer, hint))?,
            }
        }
    }

    pub async fn integer(&mut self, label: &str) -> AppResult<i32> {
        self.parsed(label, "a whole number", |s| i32::from_str(s).ok())
            .await
    }

    pub async fn decimal(&mut self, label: &str) -> AppResult<Decimal> {
        self.parsed(label, "an amount such as 120.50", |s| {
            Decimal::from_str(s).ok()
        })
        .await
    }

    pub async fn date(&mut self, label: &str) -> AppResult<NaiveDate> {
        self.parsed(label, "a date as YYYY-MM-DD", |s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
        })
        .await
    }

    pub async fn datetime(&mut self, label: &str) -> AppResult<NaiveDateTime> {
        self.parsed(label, "a time as YYYY-MM-DD HH:MM", |s| {
            NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok()
        })
        .await
    }

    /// Numbered pick from a list of labels; returns the 1-based choice, 0 for `back`.
    pub async fn menu(&mut self, title: &str, options: &[&str], back: &str) -> AppResult<usize> {
        self.say(format!("\n== {} ==", title))?;
        for (index, option) in options.iter().enumerate() {
            self.say(format!("{}. {}", index + 1, option))?;
        }
        self.say(format!("0. {}", back))?;

        let count = options.len();
        self.parsed("Option", "one of the listed numbers", |s| {
            usize::from_str(s).ok().filter(|choice| *choice <= count)
        })
        .await
    }

    /// Pick one variant of an enum, listed by its description.
    pub async fn choice<E>(&mut self, label: &str) -> AppResult<E>
    where
        E: IntoEnumIterator + Display + Copy,
    {
        let variants: Vec<E> = E::iter().collect();
        for (index, variant) in variants.iter().enumerate() {
            self.say(format!("  {}. {}", index + 1, variant))?;
        }
        self.parsed(label, "one of the listed numbers", |s| {
            usize::from_str(s)
                .ok()
                .and_then(|choice| choice.checked_sub(1))
                .and_then(|index| variants.get(index).copied())
        })
        .await
    }
}

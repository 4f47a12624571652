//! Line-based input helpers for the terminal wizard.

use std::io::{self, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// What the user typed at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A non-empty line.
    Value(String),
    /// Empty line: keep whatever the field already holds.
    Keep,
    /// The `back` keyword.
    Back,
}

/// Prints `label` and reads one line from stdin.
///
/// `current` is shown as the value an empty answer keeps.
pub fn ask(
    label: &str,
    current: &str,
) -> io::Result<Answer> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let line = line.trim();

    Ok(match line {
        "" => Answer::Keep,
        "back" => Answer::Back,
        value => Answer::Value(value.to_string()),
    })
}

/// Asks a yes/no question; empty keeps `current`.
pub fn ask_bool(
    label: &str,
    current: bool,
) -> io::Result<Answer> {
    let shown = if current { "y" } else { "n" };
    loop {
        match ask(&format!("{label} (y/n)"), shown)? {
            Answer::Value(v) => match v.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Answer::Value("y".into())),
                "n" | "no" => return Ok(Answer::Value("n".into())),
                _ => println!("  please answer y or n"),
            },
            other => return Ok(other),
        }
    }
}

pub fn answer_is_yes(answer: &Answer) -> bool {
    matches!(answer, Answer::Value(v) if v == "y")
}

/// Parses a date answer as `YYYY-MM-DD`, re-prompting on bad input.
pub fn ask_date(
    label: &str,
    current: Option<NaiveDate>,
) -> io::Result<Option<NaiveDate>> {
    let shown = current.map(|d| d.to_string()).unwrap_or_default();
    loop {
        match ask(&format!("{label} (YYYY-MM-DD)"), &shown)? {
            Answer::Keep | Answer::Back => return Ok(current),
            Answer::Value(v) => match NaiveDate::from_str(&v) {
                Ok(date) => return Ok(Some(date)),
                Err(_) => println!("  enter a date as YYYY-MM-DD"),
            },
        }
    }
}

/// Parses a dollar-amount answer, tolerating commas and a leading `$`.
pub fn ask_amount(
    label: &str,
    current: Decimal,
) -> io::Result<Decimal> {
    let shown = if current == Decimal::ZERO {
        String::new()
    } else {
        current.to_string()
    };
    loop {
        match ask(label, &shown)? {
            Answer::Keep | Answer::Back => return Ok(current),
            Answer::Value(v) => {
                let cleaned = v.trim_start_matches('$').replace(',', "");
                match Decimal::from_str(&cleaned) {
                    Ok(amount) => return Ok(amount),
                    Err(_) => println!("  enter a dollar amount, e.g. 45000"),
                }
            }
        }
    }
}

/// Picks one item from a numbered list; empty keeps `current`.
pub fn ask_choice<T: Copy>(
    label: &str,
    options: &[(T, &str)],
    current: Option<T>,
) -> io::Result<Option<T>> {
    println!("{label}:");
    for (i, (_, name)) in options.iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }
    loop {
        match ask("choice", "")? {
            Answer::Keep | Answer::Back => return Ok(current),
            Answer::Value(v) => match v.parse::<usize>() {
                Ok(n) if n >= 1 && n <= options.len() => return Ok(Some(options[n - 1].0)),
                _ => println!("  enter a number between 1 and {}", options.len()),
            },
        }
    }
}

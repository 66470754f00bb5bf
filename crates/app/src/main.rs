//! Headless presenter: a line-oriented terminal front end for the quiz
//! services. Rendering images is left to a richer UI; this one prints the
//! resolved URL and alt text.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use quiz_core::QuizSession;
use services::{
    HttpQuestionBank, ImagePrefetcher, QuestionSource, SessionConfig, SessionRunner, StartError,
    question_view, score_view, session_title,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug)]
struct Args {
    config: SessionConfig,
    base_url: String,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, ArgsError> {
    let mut config = SessionConfig::default();
    let mut base_url = "http://localhost:8000".to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mode" => config.mode = require_value(&mut args, "--mode")?,
            "--category" => config.category = Some(require_value(&mut args, "--category")?),
            "--year" => config.exam_year = require_value(&mut args, "--year")?,
            "--type" => config.exam_type = require_value(&mut args, "--type")?,
            "--base-url" => base_url = require_value(&mut args, "--base-url")?,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(ArgsError::UnknownArg(other.to_string())),
        }
    }

    Ok(Args { config, base_url })
}

fn print_usage() {
    println!(
        "usage: quiz [--mode random|category|exam] [--category SLUG] \
         [--year YYYY] [--type local|national] [--base-url URL]\n\n\
         commands: a-d or 1-4 answer, n next, p previous, g N jump, s score, q quit"
    );
}

/// Maps presenter input to an answer letter: `a`-`d` directly, digits
/// `1`-`4` as on the keyboard shortcuts.
fn answer_letter(input: &str) -> Option<&'static str> {
    match input {
        "a" | "A" | "1" => Some("A"),
        "b" | "B" | "2" => Some("B"),
        "c" | "C" | "3" => Some("C"),
        "d" | "D" | "4" => Some("D"),
        _ => None,
    }
}

fn print_question(session: &QuizSession) {
    let view = question_view(session);
    println!();
    println!("{} ({})", view.position, view.counter);
    if let Some(details) = &view.details {
        println!("{details}");
    }
    println!("[{}]", view.alt_text);
    match &view.image_url {
        Some(url) => println!("image: {url}"),
        None => println!("image: (no source)"),
    }
    if view.locked {
        let answer = view.correct_answer.unwrap_or_default();
        println!("already answered (correct answer: {answer})");
    }
}

fn print_score(session: &QuizSession) {
    let view = score_view(session);
    match view.percentage {
        Some(pct) => println!("{} ({pct})", view.summary),
        None => println!("{}", view.summary),
    }
}

async fn run(args: Args) -> Result<(), StartError> {
    let source = QuestionSource::new(Arc::new(HttpQuestionBank::new(&args.base_url)));
    let runner = SessionRunner::new(source, ImagePrefetcher::http());

    let mode = args.config.resolve()?;
    let mut session = runner.start(&args.config).await?;

    println!("{}", session_title(&mode));
    print_question(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let input = line.trim();

        if let Some(letter) = answer_letter(input) {
            match runner.submit(&mut session, letter) {
                Some(feedback) if feedback.is_correct => println!("Correct!"),
                Some(feedback) => println!(
                    "Incorrect. The correct answer is {}.",
                    feedback.correct_answer
                ),
                // Locked questions ignore further keypresses.
                None => {}
            }
            print_score(&session);
            continue;
        }

        match input {
            "n" => {
                if runner.next(&mut session) {
                    print_question(&session);
                }
            }
            "p" => {
                if runner.previous(&mut session) {
                    print_question(&session);
                }
            }
            "s" => print_score(&session),
            "q" | "quit" => break,
            "" => {}
            other => {
                if let Some(index) = other
                    .strip_prefix("g ")
                    .and_then(|n| n.parse::<usize>().ok())
                {
                    // One-based for humans.
                    if index > 0 && runner.go_to(&mut session, index - 1) {
                        print_question(&session);
                    }
                } else {
                    println!("unrecognized command: {other} (try --help)");
                }
            }
        }
    }

    print_score(&session);
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args).await {
        log::error!("session start failed: {err}");
        eprintln!("Failed to load questions. Please try again.");
        std::process::exit(1);
    }
}

use reshi_assist::{
    intent::{interpret, Intent},
    pipeline::{parse, run},
    preprocess::preprocess,
};
use reshi_compute::symbolic::{simplify_with_steps, simplify::Step};
use reshi_error::Error;
use reshi_parser::symbols::SymbolTable;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufRead, BufReader, IsTerminal}};

/// What a single line of input produced.
#[derive(Debug, PartialEq)]
struct Answer {
    steps: Vec<String>,

    /// The simplification rules applied to the expression, in the order first applied. Empty for
    /// equations and directly answered requests.
    rules: Vec<Step>,

    result: String,
}

/// A failure, along with the text its spans point into.
#[derive(Debug)]
struct Failure {
    error: Error,
    source: String,
}

/// Returns the rules applied while simplifying the expression, without repeats.
fn applied_rules(cleaned: &str, symbols: &SymbolTable) -> Vec<Step> {
    let Ok(expr) = parse(cleaned, symbols) else {
        return Vec::new();
    };

    let (_, steps) = simplify_with_steps(&expr);
    let mut rules = Vec::new();
    for step in steps {
        if !rules.contains(&step) {
            rules.push(step);
        }
    }
    rules
}

/// Processes a single line of input.
fn process(input: &str, symbols: &SymbolTable) -> Result<Answer, Failure> {
    let mut steps = Vec::new();
    let expression = match interpret(input) {
        Some(Intent::Answer { steps, result }) => {
            return Ok(Answer { steps, rules: Vec::new(), result });
        },
        Some(Intent::Rewrite { expression, steps: intent_steps }) => {
            steps.extend(intent_steps);
            expression
        },
        None => input.to_string(),
    };

    let cleaned = preprocess(&expression);
    match run(&expression, symbols, &mut steps) {
        Ok(result) => {
            let rules = if cleaned.contains('=') {
                Vec::new()
            } else {
                applied_rules(&cleaned, symbols)
            };
            Ok(Answer { steps, rules, result })
        },
        Err(error) => Err(Failure { error, source: cleaned }),
    }
}

/// Renders the error report of a failure, naming the input it came from as `src_id`.
fn render_failure(failure: &Failure, src_id: &str) -> String {
    failure.error
        .report_to_string(src_id, &failure.source)
        .unwrap_or_else(|_| format!("{}: {}\n", src_id, failure.error))
}

/// Prints the steps and result of an answer to stdout.
fn print_answer(Answer { steps, rules, result }: Answer) {
    for (i, step) in steps.iter().enumerate() {
        println!("{:>3}. {}", i + 1, step);
    }
    for rule in rules {
        println!("     [{}]", rule);
    }
    println!("= {}", result);
}

/// Processes the line and prints the outcome: the steps and result to stdout, or an error report
/// to stderr.
fn process_and_print(input: &str, symbols: &SymbolTable) {
    match process(input, symbols) {
        Ok(answer) => print_answer(answer),
        Err(Failure { error, source }) => {
            if let Err(err) = error.report_to_stderr("input", &source) {
                eprintln!("{}: {}", error, err);
            }
        },
    }
}

/// Processes every non-empty line of the reader. Error reports name the line they came from.
fn process_lines(reader: impl BufRead, symbols: &SymbolTable) -> io::Result<()> {
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match process(&line, symbols) {
            Ok(answer) => print_answer(answer),
            Err(failure) => eprint!("{}", render_failure(&failure, &format!("line {}", number + 1))),
        }
    }
    Ok(())
}

fn main() -> Result<(), ReadlineError> {
    let symbols = SymbolTable::standard();
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // process each line of the file
        process_lines(BufReader::new(File::open(filename)?), &symbols)?;
    } else if !io::stdin().is_terminal() {
        // process each line piped to stdin
        process_lines(io::stdin().lock(), &symbols)?;
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new()?;

        fn process_line(rl: &mut DefaultEditor, symbols: &SymbolTable) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            process_and_print(&input, symbols);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &symbols) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    Ok(())
}

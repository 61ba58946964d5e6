mod highlighter;

use clap::Parser;
use core::cell::Cell;
use keycalc::{
    Binding, CompilationOptions, Engine, EngineOptions, Session, SessionOptions, render_error,
};
use miette::{IntoDiagnostic, Result};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, Emacs, IdeMenu,
    KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu,
    Signal, default_emacs_keybindings,
};
use std::io::BufRead;
use std::io::BufReader;
use thiserror::Error;
use tracing::debug;

/// keycalc - a keypad calculator
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(about = "Evaluate calculator formulas", long_about = None)]
struct Args {
    /// Print the compiled tree (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Keep constant subtrees instead of folding them
    #[arg(long)]
    no_fold: bool,

    /// Decimal places shown in answers
    #[arg(long, default_value_t = 2)]
    precision: usize,

    /// Bind a variable, e.g. --var x=2.5 (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    vars: Vec<(String, f64)>,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

#[derive(Debug, Error)]
enum VarError {
    #[error("expected NAME=VALUE, got '{0}'")]
    MissingEquals(String),

    #[error("invalid value for '{name}': {source}")]
    InvalidValue {
        name: String,
        source: std::num::ParseFloatError,
    },
}

#[derive(Debug, Error, PartialEq)]
#[error("input is longer than the {max_len}-byte buffer, not evaluated")]
struct InputTooLong {
    max_len: usize,
}

fn parse_var(arg: &str) -> Result<(String, f64), VarError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| VarError::MissingEquals(arg.to_string()))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|source| VarError::InvalidValue {
            name: name.to_string(),
            source,
        })?;
    Ok((name.trim().to_string(), value))
}

const COMMANDS: &[&str] = &[":ans", ":clear"];

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
}

fn setup_reedline(engine: &Engine<'_>, args: &Args) -> (Reedline, DefaultPrompt) {
    let mut words: Vec<String> = COMMANDS.iter().map(|c| c.to_string()).collect();
    words.extend(engine.environment().iter().map(|b| b.name.to_string()));
    words.extend(args.vars.iter().map(|(name, _)| name.clone()));

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&[':', '_']);
        completions.insert(words);
        completions
    });

    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_correct_cursor_pos(false);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let highlighter = highlighter::Highlighter::new(args.vars.iter().map(|(name, _)| name.clone()));

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(highlighter))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(ide_menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("calc".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Type `input` into the session key by key. A line that does not fit is
/// discarded whole rather than evaluated truncated.
fn type_line(session: &mut Session, input: &str) -> Result<(), InputTooLong> {
    for c in input.chars() {
        if !session.push(c) {
            session.clear_input();
            return Err(InputTooLong {
                max_len: session.options().capacity.saturating_sub(1),
            });
        }
    }
    Ok(())
}

/// Feed one line to the session, the way keypresses reach the calculator.
fn interpret_input<'env>(
    session: &mut Session,
    engine: &Engine<'env>,
    bindings: &[Binding<'env>],
    input: &str,
    debug_parse: bool,
) {
    match input.trim() {
        ":ans" => {
            if let Some(answer) = session.recall() {
                println!("{}", answer);
            }
            return;
        }
        ":clear" => {
            session.reset();
            return;
        }
        _ => {}
    }

    if let Err(e) = type_line(session, input) {
        debug!(len = input.len(), "Input rejected");
        eprintln!("Error: {}", e);
        return;
    }

    if debug_parse {
        if let Ok(expr) = engine.compile(session.input(), bindings) {
            println!("=== Compiled Tree ===");
            println!("{}", expr);
            println!();
        }
    }

    match session.equals_with(engine, bindings) {
        Ok(_) => println!("{}", session.display()),
        Err(e) => render_error(&e),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG to control log level, default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = EngineOptions {
        default_compilation_options: CompilationOptions {
            optimize: !args.no_fold,
            ..CompilationOptions::default()
        },
    };
    let engine = Engine::new(options, |_| Ok(())).into_diagnostic()?;

    let cells: Vec<(String, Cell<f64>)> = args
        .vars
        .iter()
        .map(|(name, value)| (name.clone(), Cell::new(*value)))
        .collect();
    let bindings: Vec<Binding<'_>> = cells
        .iter()
        .map(|(name, cell)| Binding::variable(name, cell))
        .collect();

    let mut session = Session::new(SessionOptions {
        precision: args.precision,
        ..SessionOptions::default()
    });

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        interpret_input(&mut session, &engine, &bindings, expr, args.debug_parse);
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        let (mut line_editor, prompt) = setup_reedline(&engine, &args);

        println!("keycalc - type a formula and press Enter (:ans, :clear, Ctrl+D to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    interpret_input(&mut session, &engine, &bindings, &buffer, args.debug_parse);
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };

            interpret_input(&mut session, &engine, &bindings, &line, args.debug_parse);
        }
    }

    Ok(())
}

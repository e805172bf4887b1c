extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::{Colour, Style};
use intlang::lang::{lex, Error, ErrorCode, Token};
use intlang::mach::{compile, Address, Event, Input, Opcode, Printer, Runtime, Silent};
use intlang::mach::{SymbolTable, Trace};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::collections::VecDeque;
use std::io::{BufRead, IsTerminal, StdinLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const USAGE: &str = "\
usage: intlang [OPTIONS] FILE

options:
    --trace     log tokens, emitted code and every step to stderr
    --tokens    print the tokens of FILE and stop
    --ops       print the compiled program before running it
    --symbols   print the symbol table after running
    -h, --help  print this message";

#[derive(Debug, Default)]
struct Options {
    trace: bool,
    tokens: bool,
    ops: bool,
    symbols: bool,
    help: bool,
    path: Option<String>,
}

impl Options {
    fn from_args<I: Iterator<Item = String>>(args: I) -> Result<Options, String> {
        let mut options = Options::default();
        for arg in args {
            match arg.as_str() {
                "--trace" => options.trace = true,
                "--tokens" => options.tokens = true,
                "--ops" => options.ops = true,
                "--symbols" => options.symbols = true,
                "-h" | "--help" => options.help = true,
                s if s.starts_with('-') => return Err(format!("unknown option {}", s)),
                _ => {
                    if options.path.is_some() {
                        return Err("only one FILE may be given".to_string());
                    }
                    options.path = Some(arg);
                }
            }
        }
        if options.path.is_none() && !options.help {
            return Err("no FILE given".to_string());
        }
        Ok(options)
    }
}

pub fn main() {
    let options = match Options::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{}\n{}", report(&msg), USAGE);
            std::process::exit(2);
        }
    };
    if options.help {
        println!("{}", USAGE);
        return;
    }
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", report(&error.to_string()));
    }
    if let Err(msg) = main_loop(&options, interrupted) {
        eprintln!("{}", report(&msg));
        std::process::exit(1);
    }
}

fn report(msg: &str) -> String {
    Colour::Red.bold().paint(msg).to_string()
}

fn main_loop(options: &Options, interrupted: Arc<AtomicBool>) -> Result<(), String> {
    let path = options.path.as_deref().unwrap_or_default();
    let source = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;

    if options.tokens {
        let tokens = lex(&source).map_err(|e| e.to_string())?;
        for token in tokens {
            println!("{}", token);
        }
        return Ok(());
    }

    let mut trace: Box<dyn Trace> = if options.trace {
        Box::new(StderrTrace)
    } else {
        Box::new(Silent)
    };
    let mut symbols = SymbolTable::new();
    let program = compile(&source, &mut symbols, &mut *trace).map_err(|e| e.to_string())?;
    if options.ops {
        print!("{}", program);
    }

    let mut runtime = Runtime::new(program, symbols);
    runtime.set_trace(trace);
    let mut input = Console::stdin();
    let mut output = Printer::new(std::io::stdout());
    let result = loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        match runtime.execute(5000, &mut input, &mut output) {
            Event::Running => {}
            Event::Stopped => break Ok(()),
            Event::Errors(error) => break Err(error.to_string()),
        }
    };
    if options.symbols {
        print!("{}", runtime.symbols());
    }
    result
}

/// Dimmed log lines on stderr.
struct StderrTrace;

impl Trace for StderrTrace {
    fn token(&mut self, token: &Token) {
        eprintln!("{}", Style::new().dimmed().paint(format!("token {}", token)));
    }
    fn emit(&mut self, addr: Address, op: &Opcode) {
        eprintln!("{}", Style::new().dimmed().paint(format!("emit {}: {}", addr, op)));
    }
    fn step(&mut self, pc: Address, op: &Opcode, stack: &[i32]) {
        eprintln!(
            "{}",
            Style::new()
                .dimmed()
                .paint(format!("step {}: {} {:?}", pc, op, stack))
        );
    }
}

/// Integers for `read`. A `? ` prompt is opened on first use when
/// stdin is a terminal; otherwise lines come straight from `reader`
/// so nothing but the program's output reaches stdout.
struct Console<R: BufRead> {
    interactive: bool,
    interface: Option<Interface<DefaultTerminal>>,
    reader: R,
    pending: VecDeque<String>,
}

impl Console<StdinLock<'static>> {
    fn stdin() -> Console<StdinLock<'static>> {
        let stdin = std::io::stdin();
        Console::new(stdin.is_terminal(), stdin.lock())
    }
}

impl<R: BufRead> Console<R> {
    fn new(interactive: bool, reader: R) -> Console<R> {
        Console {
            interactive,
            interface: None,
            reader,
            pending: VecDeque::new(),
        }
    }

    fn prompt(&mut self) -> Option<&Interface<DefaultTerminal>> {
        if self.interactive && self.interface.is_none() {
            self.interface = Interface::new("intlang").ok().and_then(|interface| {
                interface.set_report_signal(Signal::Interrupt, true);
                interface.set_prompt("? ").ok().map(|_| interface)
            });
            // Fall back to plain reads from here on.
            self.interactive = self.interface.is_some();
        }
        self.interface.as_ref()
    }

    fn next_word(&mut self) -> Result<String, Error> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Ok(word);
            }
            let line = match self.prompt() {
                Some(interface) => match interface.read_line() {
                    Ok(ReadResult::Input(line)) => line,
                    Ok(ReadResult::Signal(Signal::Interrupt)) => {
                        return Err(Error::new(ErrorCode::Interrupted))
                    }
                    Ok(_) => return Err(end_of_input()),
                    Err(e) => return Err(Error::new(ErrorCode::MalformedInput).message(e.to_string())),
                },
                None => {
                    let mut line = String::new();
                    match self.reader.read_line(&mut line) {
                        Ok(0) => return Err(end_of_input()),
                        Ok(_) => line,
                        Err(e) => {
                            return Err(Error::new(ErrorCode::MalformedInput).message(e.to_string()))
                        }
                    }
                }
            };
            self.pending
                .extend(line.split_whitespace().map(|s| s.to_string()));
        }
    }
}

fn end_of_input() -> Error {
    Error::new(ErrorCode::MalformedInput).message("end of input")
}

impl<R: BufRead> Input for Console<R> {
    fn read_integer(&mut self) -> Result<i32, Error> {
        let word = self.next_word()?;
        match word.parse::<i32>() {
            Ok(n) => Ok(n),
            Err(_) => Err(Error::new(ErrorCode::MalformedInput).message(format!("'{}'", word))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_piped_input_never_opens_a_prompt() {
        let mut console = Console::new(false, Cursor::new("21 4\n-3\n"));
        assert_eq!(console.read_integer().unwrap(), 21);
        assert_eq!(console.read_integer().unwrap(), 4);
        assert_eq!(console.read_integer().unwrap(), -3);
        assert!(console.interface.is_none());
        let e = console.read_integer().unwrap_err();
        assert_eq!(e.to_string(), "Runtime error: malformed input: end of input");
    }

    #[test]
    fn test_bad_word() {
        let mut console = Console::new(false, Cursor::new("x"));
        assert_eq!(
            console.read_integer().unwrap_err().code(),
            ErrorCode::MalformedInput
        );
    }

    #[test]
    fn test_options() {
        let args = |a: &[&str]| Options::from_args(a.iter().map(|s| s.to_string()));
        let options = args(&["--ops", "p.il"]).unwrap();
        assert!(options.ops && !options.trace);
        assert_eq!(options.path.as_deref(), Some("p.il"));
        assert!(args(&["-h"]).unwrap().help);
        assert!(args(&[]).is_err());
        assert!(args(&["a", "b"]).is_err());
        assert!(args(&["--bogus", "a"]).is_err());
    }
}

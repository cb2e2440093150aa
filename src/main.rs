use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    iter,
    path::Path,
};

use anyhow::{anyhow, Context};
use clap::{App, Arg};
use log::LevelFilter;
use meowlang::{
    compiler::compiler::Compiler,
    display_error,
    driver::driver::{Driver, Event},
    session::config::SessionConfig,
};
use simple_logger::SimpleLogger;

fn main() -> anyhow::Result<()> {
    let matches = App::new("meowlang")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive read-eval-print loop for meowlang")
        .arg(
            Arg::with_name("FILE")
                .help("Source file to run instead of reading stdin")
                .index(1),
        )
        .arg(
            Arg::with_name("operator")
                .short("o")
                .long("operator")
                .value_name("OP=PREC")
                .help("Sets the precedence of a binary operator, 0 removes it")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Logs every definition and evaluation"),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))?;

    let mut config = SessionConfig::default();
    if let Some(operators) = matches.values_of("operator") {
        for operator in operators {
            let (op, precedence) = SessionConfig::parse_operator(operator)?;
            config = config.with_operator(op, precedence);
        }
    }

    let backend = Compiler::new().with_max_call_depth(config.max_call_depth);

    match matches.value_of("FILE") {
        Some(file) => {
            let source = read_to_string(file).with_context(|| format!("failed to read {}", file))?;
            let name = Path::new(file)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| String::from(file));

            let config = config.with_source_name(&name);
            let mut driver = Driver::from_source(&source, backend, &config);
            repl(&mut driver, false)?;
            driver.finish()?;
        }
        None => {
            let stdin = io::stdin();
            let chars = stdin
                .lock()
                .lines()
                .map_while(Result::ok)
                .flat_map(|line| line.chars().chain(iter::once('\n')).collect::<Vec<char>>());

            // The driver reads the first token as soon as it is built
            eprint!("ready> ");
            let mut driver = Driver::from_chars(chars, backend, &config);
            repl(&mut driver, true)?;
            driver.finish()?;
        }
    }

    Ok(())
}

fn repl<I: Iterator<Item = char>>(
    driver: &mut Driver<I, Compiler>,
    interactive: bool,
) -> anyhow::Result<()> {
    let stdout = io::stdout();

    while let Some(event) = driver.step() {
        match event {
            Event::Evaluated(value) => {
                let mut out = stdout.lock();
                writeln!(out, "{}", value)?;
                out.flush()?;
            }
            Event::Defined(name) => eprintln!("Read function definition: {}", name),
            Event::Declared(name) => eprintln!("Read extern: {}", name),
            Event::Failed(error) => display_error(&error),
            Event::Skipped => {}
        }

        if interactive {
            eprint!("ready> ");
        }
    }

    if interactive {
        eprintln!();
    }
    Ok(())
}

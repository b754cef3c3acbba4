use std::env;
use std::process::ExitCode;

use chainsh::config::ShellConfig;
use chainsh::error::ShellError;
use chainsh::flags::Flags;
use chainsh::highlight::SyntaxHighlighter;
use chainsh::input::{LineHelper, LineReader};
use chainsh::logging;
use chainsh::shell::Shell;

fn main() -> ExitCode {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "chainsh".to_string());
    let args: Vec<String> = args.collect();

    match run(&program, &args) {
        Ok(status) => ExitCode::from((status & 0xff) as u8),
        Err(e) => {
            eprintln!("{}: {}", program, e);
            ExitCode::from((e.exit_code() & 0xff) as u8)
        }
    }
}

fn run(program: &str, args: &[String]) -> Result<i32, ShellError> {
    let mut flags = Flags::new();
    flags.parse(args)?;

    if flags.is_set("help") {
        flags.print_help(program);
        return Ok(0);
    }

    if flags.is_set("version") {
        println!("chainsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let config = ShellConfig::from_flags(program, &flags);
    logging::init(config.debug, config.quiet);

    let reader = match &config.script {
        Some(path) => LineReader::open_script(path)?,
        None if stdin_is_terminal() => {
            LineReader::interactive(LineHelper::new(SyntaxHighlighter::new()))?
        }
        None => LineReader::stdin(),
    };

    let mut shell = Shell::new(&config, reader);
    shell.run()
}

fn stdin_is_terminal() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

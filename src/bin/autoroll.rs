use autoroll::{Config, Error, Level, Trace};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

const USAGE: &str = "usage: autoroll [[SEED] EXPRESSION]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    env_logger::Builder::new()
        .filter_level(config.trace.as_level_filter())
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
    let mut trace = Trace::new(config.trace);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => repl(&mut StdRng::seed_from_u64(clock_seed()), &config, &mut trace)?,
        [input] => run(input, &mut StdRng::seed_from_u64(clock_seed()), &config, &mut trace),
        [seed, input] => match seed.parse() {
            Ok(seed) => run(input, &mut StdRng::seed_from_u64(seed), &config, &mut trace),
            Err(_) => usage_error(&trace, &format!("Invalid seed: {}", seed)),
        },
        _ => usage_error(&trace, "Too many arguments!"),
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

fn usage_error(trace: &Trace, msg: &str) -> ! {
    trace.log(msg, Level::Error);
    eprintln!("{}", USAGE);
    process::exit(1)
}

fn run(input: &str, rng: &mut StdRng, config: &Config, trace: &mut Trace) {
    match autoroll::roll(input, rng, config.max_rolls, trace) {
        Ok(total) => println!("{}", total),
        // Tokenizer and parser failures are already traced where they happen.
        Err(Error::Roll(why)) => trace.log(why, Level::Error),
        Err(_) => {}
    }
}

fn repl(rng: &mut StdRng, config: &Config, trace: &mut Trace) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        if line == "exit" {
            return Ok(());
        }
        run(&line, rng, config, trace);
    }
}

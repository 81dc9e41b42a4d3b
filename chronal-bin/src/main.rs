use chronal_core::{count_ambiguous, Executor, Order, Result};
use chronal_core::resolve::{resolve, OpcodeMapping};
use chronal_parse::{parse_input, Input, Named};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

mod repl;

/// Works out the opcodes of a four-register machine from observed
/// samples and runs programs written in its numbering.
#[derive(Parser)]
#[command(name = "chronal", version)]
struct Cli {
    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// Report the ambiguous-sample count and register 0 after running the program
    Solve {
        file: PathBuf,
        /// How many matching operations make a sample ambiguous
        #[arg(long, default_value_t = 3)]
        threshold: usize
    },
    /// Count samples that behave like several operations
    Classify {
        file: PathBuf,
        #[arg(long, default_value_t = 3)]
        threshold: usize,
        /// Print every sample's matching operations
        #[arg(short, long)]
        verbose: bool
    },
    /// Print the resolved opcode mapping
    Resolve {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OrderArg::Lowest)]
        order: OrderArg
    },
    /// Run the program and print the final registers
    Run {
        file: PathBuf
    },
    /// Print the program with operation names in place of opcodes
    Decode {
        file: PathBuf
    },
    /// Interactive machine
    Repl {
        /// Resolve a mapping from this file so numeric instructions work too
        #[arg(long)]
        samples: Option<PathBuf>
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Lowest,
    Highest
}

impl From<OrderArg> for Order {
    fn from(o: OrderArg) -> Order {
        match o {
            OrderArg::Lowest => Order::Lowest,
            OrderArg::Highest => Order::Highest
        }
    }
}

fn load(path: &Path) -> Result<Input> {
    let src = std::fs::read_to_string(path)?;
    let input = parse_input(&src)?;
    log::info!("loaded {}: {} samples, {} instructions",
        path.display(), input.samples.len(), input.program.len());
    Ok(input)
}

fn load_mapping(path: &Path, order: Order) -> Result<(Input, OpcodeMapping)> {
    let input = load(path)?;
    let mapping = resolve(&input.samples, order)?;
    Ok((input, mapping))
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::Solve { file, threshold } => {
            let (input, mapping) = load_mapping(&file, Order::default())?;
            let ambiguous = count_ambiguous(&input.samples, threshold);
            let regs = Executor::new(&mapping).run(&input.program)?;
            println!("samples behaving like {} or more opcodes: {}", threshold, ambiguous);
            println!("register 0 after running the program: {}", regs[0]);
        },
        Command::Classify { file, threshold, verbose } => {
            let input = load(&file)?;
            if verbose {
                for (idx, sample) in input.samples.iter().enumerate() {
                    let ops = sample.matching_ops();
                    println!("#{:<4} opcode {:>2}: {:>2} {}", idx, sample.instruction.opcode, ops.len(), ops);
                }
            }
            println!("{}", count_ambiguous(&input.samples, threshold));
        },
        Command::Resolve { file, order } => {
            let (_, mapping) = load_mapping(&file, order.into())?;
            print!("{}", mapping);
        },
        Command::Run { file } => {
            let (input, mapping) = load_mapping(&file, Order::default())?;
            let regs = Executor::new(&mapping).run(&input.program)?;
            println!("{}", regs);
        },
        Command::Decode { file } => {
            let (input, mapping) = load_mapping(&file, Order::default())?;
            let exec = Executor::new(&mapping);
            for inst in &input.program {
                println!("{}", Named::new(exec.decode(inst)?, inst));
            }
        },
        Command::Repl { samples } => {
            let mapping = match samples {
                Some(path) => Some(load_mapping(&path, Order::default())?.1),
                None => None
            };
            repl::interactive(mapping)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
    let cli = Cli::parse();
    if let Err(e) = execute(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use chronal_core::{Error, ErrorKind, Executor, Registers, Result};
use chronal_core::exec;
use chronal_core::resolve::OpcodeMapping;
use chronal_parse::{parse_statement, Statement};

use directories::ProjectDirs;
use rustyline::error::ReadlineError;
use rustyline::Editor;

const HELP: &str = "\
<op> <a> <b> <c>        run a named operation, e.g. `addi 0 7 3`
<opcode> <a> <b> <c>    run a numbered instruction (needs --samples)
:regs                   show the registers
:reset                  zero the registers
:map                    show the opcode mapping
:quit                   leave";

#[derive(Debug)]
pub enum Reply {
    Regs(Registers),
    Text(String),
    Quit
}

// Machine state carried between repl lines
pub struct Session {
    regs: Registers,
    mapping: Option<OpcodeMapping>
}

impl Session {
    pub fn new(mapping: Option<OpcodeMapping>) -> Self {
        Self { regs: Registers::zero(), mapping }
    }

    pub fn eval(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        if let Some(cmd) = line.strip_prefix(':') {
            return Ok(match cmd {
                "regs" => Reply::Regs(self.regs),
                "reset" => {
                    self.regs = Registers::zero();
                    Reply::Regs(self.regs)
                },
                "map" => match &self.mapping {
                    Some(m) => Reply::Text(m.to_string()),
                    None => Reply::Text("no mapping loaded".to_string())
                },
                "help" => Reply::Text(HELP.to_string()),
                "q" | "quit" => Reply::Quit,
                _ => return Err(Error::new(format!("unknown command :{}", cmd)))
            });
        }
        self.regs = match parse_statement(line)? {
            Statement::Named(named) => exec::apply(named.op, &named.operands(), &self.regs)?,
            Statement::Raw(inst) => {
                let mapping = self.mapping.as_ref().ok_or(Error::new_const(
                    ErrorKind::UnmappedOpcode, "numbered instructions need a mapping, start with --samples"))?;
                Executor::new(mapping).step(&self.regs, &inst)?
            }
        };
        Ok(Reply::Regs(self.regs))
    }
}

pub fn interactive(mapping: Option<OpcodeMapping>) -> Result<()> {
    let dirs = ProjectDirs::from("org", "chronal", "chronal");
    let history = match &dirs {
        Some(d) => {
            std::fs::create_dir_all(d.config_dir())?;
            Some(d.config_dir().join("history.txt"))
        },
        None => None
    };

    let mut rl = Editor::<()>::new();
    if let Some(path) = &history {
        rl.load_history(path).ok();
    }

    let mut session = Session::new(mapping);
    println!("type :help for commands");
    loop {
        let line = match rl.readline(">> ") {
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(Error::with_kind(ErrorKind::IO, e.to_string())),
            Ok(s) => s
        };
        if line.trim().is_empty() { continue; }
        rl.add_history_entry(line.as_str());

        match session.eval(&line) {
            Ok(Reply::Regs(regs)) => println!("{}", regs),
            Ok(Reply::Text(text)) => println!("{}", text.trim_end()),
            Ok(Reply::Quit) => break,
            Err(e) => println!("{}", e)
        }
    }
    if let Some(path) = &history {
        rl.save_history(path).ok();
    }
    Ok(())
}

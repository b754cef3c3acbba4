use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("Illegal option {0}")]
    Unknown(String),
    #[error("unexpected argument: {0}")]
    ExtraOperand(String),
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub name: &'static str,
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub set: bool,
}

#[derive(Debug, Clone)]
pub struct Flags {
    flags: Vec<Flag>,
    script: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let table = [
            ("help", "-h", "--help", "Print this help message"),
            ("version", "-v", "--version", "Show version information"),
            ("quiet", "-q", "--quiet", "Only log errors"),
            ("debug", "-d", "--debug", "Enable debug logging"),
            ("no-history", "-n", "--no-history", "Do not read or write the history file"),
        ];

        let flags = table
            .into_iter()
            .map(|(name, short, long, description)| Flag {
                name,
                short,
                long,
                description,
                set: false,
            })
            .collect();

        Flags {
            flags,
            script: None,
        }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), FlagError> {
        for arg in args {
            if arg.len() > 1 && arg.starts_with('-') {
                let flag = self
                    .flags
                    .iter_mut()
                    .find(|flag| arg == flag.short || arg == flag.long)
                    .ok_or_else(|| FlagError::Unknown(arg.clone()))?;
                flag.set = true;
            } else if self.script.is_none() {
                self.script = Some(arg.clone());
            } else {
                return Err(FlagError::ExtraOperand(arg.clone()));
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag.name == name && flag.set)
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn print_help(&self, program: &str) {
        println!("Usage: {} [OPTIONS] [scriptfile]", program);
        println!("\nOptions:");
        for flag in &self.flags {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}

//! Line validator: source words → typed instructions, plus symbol, label
//! and function table construction.
//!
//! Every operand a line references is registered as a side effect. A name
//! belongs to the function that references it first; names first seen in
//! `main` get a permanent offset, all others are placed per call by the VM.

use std::collections::HashMap;

use crate::error::LoadError;
use crate::lexer::SourceLine;
use irsim_common::{
    ArithOp, Dest, Instruction, Operand, OperandError, RelOp, Statement, Symbol, WORD_SIZE,
};

/// Name of the entry function.
pub(crate) const ENTRY: &str = "main";

/// Tables produced by a successful validation pass, before resolution.
#[derive(Debug, Default)]
pub(crate) struct Parsed {
    pub statements: Vec<Statement>,
    pub symbols: HashMap<String, Symbol>,
    pub labels: HashMap<String, usize>,
    pub functions: HashMap<String, Vec<String>>,
    pub entry: Option<usize>,
    pub static_size: i32,
}

/// Incremental validator. Feed lines in order, then call [`Parser::finish`].
#[derive(Debug, Default)]
pub(crate) struct Parser {
    parsed: Parsed,
    current: Option<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate one line and append its instruction.
    pub fn parse_line(&mut self, line: &SourceLine) -> Result<(), LoadError> {
        let instruction = match line.words[0] {
            "LABEL" => self.parse_label(line, false)?,
            "FUNCTION" => self.parse_label(line, true)?,
            keyword => {
                if self.current.is_none() {
                    return Err(LoadError::OutsideFunction {
                        line: line.number,
                        text: line.trimmed(),
                    });
                }
                match keyword {
                    "GOTO" => {
                        expect_len(line, 2, "GOTO takes one label")?;
                        Instruction::Goto {
                            target: line.words[1].to_string(),
                        }
                    }
                    "RETURN" | "READ" | "WRITE" | "ARG" | "PARAM" => self.parse_unary(line)?,
                    "DEC" => self.parse_dec(line)?,
                    "IF" => self.parse_if(line)?,
                    _ => self.parse_assignment(line)?,
                }
            }
        };

        self.parsed.statements.push(Statement {
            instruction,
            line: line.number,
            text: line.text.to_string(),
        });
        Ok(())
    }

    pub fn finish(self) -> Parsed {
        self.parsed
    }

    fn parse_label(&mut self, line: &SourceLine, function: bool) -> Result<Instruction, LoadError> {
        if !function && self.current.is_none() {
            return Err(LoadError::OutsideFunction {
                line: line.number,
                text: line.trimmed(),
            });
        }
        if line.words.len() != 3 || line.words[2] != ":" {
            return Err(syntax(line, "expected '<keyword> NAME :'"));
        }

        let name = line.words[1];
        if self.parsed.labels.contains_key(name) {
            return Err(LoadError::DuplicateLabel {
                name: name.to_string(),
                line: line.number,
                text: line.trimmed(),
            });
        }
        if name == ENTRY && !function {
            return Err(syntax(line, "'main' must be declared with FUNCTION"));
        }

        let index = self.parsed.statements.len();
        self.parsed.labels.insert(name.to_string(), index);
        if function {
            if name == ENTRY {
                self.parsed.entry = Some(index);
            }
            self.parsed.functions.insert(name.to_string(), Vec::new());
            self.current = Some(name.to_string());
        }

        Ok(Instruction::Label {
            name: name.to_string(),
            function,
        })
    }

    fn parse_unary(&mut self, line: &SourceLine) -> Result<Instruction, LoadError> {
        let keyword = line.words[0];
        expect_len(line, 2, "expected '<keyword> operand'")?;

        let token = line.words[1];
        let target_only = matches!(keyword, "READ" | "PARAM");
        if target_only && !token.chars().next().is_some_and(char::is_alphabetic) {
            return Err(syntax(line, "target must be a variable name"));
        }

        let operand = parse_operand(line, token)?;
        self.register(&operand);

        Ok(match (keyword, operand) {
            ("READ", Operand::Var(dst)) => Instruction::Read { dst },
            ("PARAM", Operand::Var(dst)) => Instruction::Param { dst },
            ("RETURN", value) => Instruction::Return { value },
            ("WRITE", value) => Instruction::Write { value },
            ("ARG", value) => Instruction::Arg { value },
            _ => return Err(syntax(line, "target must be a variable name")),
        })
    }

    fn parse_dec(&mut self, line: &SourceLine) -> Result<Instruction, LoadError> {
        expect_len(line, 3, "expected 'DEC NAME size'")?;

        let size: i32 = line.words[2]
            .parse()
            .map_err(|_| syntax(line, "size is not an integer"))?;
        if size <= 0 || size % WORD_SIZE != 0 {
            return Err(syntax(line, "size must be a positive multiple of 4"));
        }

        let name = match parse_operand(line, line.words[1])? {
            Operand::Var(name) => name,
            _ => return Err(syntax(line, "DEC needs a plain variable name")),
        };
        if self.parsed.symbols.contains_key(&name) {
            return Err(LoadError::DuplicateVariable {
                name,
                line: line.number,
                text: line.trimmed(),
            });
        }

        self.insert(&name, size, true);
        Ok(Instruction::Dec { name, size })
    }

    fn parse_if(&mut self, line: &SourceLine) -> Result<Instruction, LoadError> {
        if line.words.len() != 6 || line.words[4] != "GOTO" {
            return Err(syntax(line, "expected 'IF a relop b GOTO label'"));
        }

        let op: RelOp = line.words[2].parse().map_err(|e| token_error(line, e))?;
        let lhs = parse_operand(line, line.words[1])?;
        let rhs = parse_operand(line, line.words[3])?;
        self.register(&lhs);
        self.register(&rhs);

        Ok(Instruction::If {
            lhs,
            op,
            rhs,
            target: line.words[5].to_string(),
        })
    }

    fn parse_assignment(&mut self, line: &SourceLine) -> Result<Instruction, LoadError> {
        let words = &line.words;
        if words.len() < 3 || words[1] != ":=" {
            return Err(syntax(line, "unknown instruction"));
        }

        let dst: Dest = words[0].parse().map_err(|e| token_error(line, e))?;
        self.insert(dst.name(), WORD_SIZE, false);

        if words[2] == "CALL" {
            expect_len(line, 4, "expected 'x := CALL f'")?;
            return Ok(Instruction::Call {
                dst,
                function: words[3].to_string(),
            });
        }

        match words.len() {
            3 => {
                let src = parse_operand(line, words[2])?;
                self.register(&src);
                Ok(Instruction::Mov { dst, src })
            }
            5 => {
                let op: ArithOp = words[3].parse().map_err(|e| token_error(line, e))?;
                let lhs = parse_operand(line, words[2])?;
                let rhs = parse_operand(line, words[4])?;
                self.register(&lhs);
                self.register(&rhs);
                Ok(Instruction::Arith { dst, lhs, op, rhs })
            }
            _ => Err(syntax(line, "malformed assignment")),
        }
    }

    /// Register the variable behind an operand. Immediates are skipped.
    fn register(&mut self, operand: &Operand) {
        if let Some(name) = operand.name() {
            self.insert(name, WORD_SIZE, false);
        }
    }

    /// First-reference insertion into the symbol and function tables.
    fn insert(&mut self, name: &str, size: i32, is_array: bool) {
        if self.parsed.symbols.contains_key(name) {
            return;
        }
        let Some(function) = self.current.as_deref() else {
            return;
        };
        if let Some(locals) = self.parsed.functions.get_mut(function) {
            locals.push(name.to_string());
        }

        let offset = if function == ENTRY {
            let offset = self.parsed.static_size;
            self.parsed.static_size = offset.saturating_add(size);
            offset
        } else {
            Symbol::UNASSIGNED
        };
        let symbol = if is_array {
            Symbol::array(offset, size)
        } else {
            Symbol::scalar(offset)
        };
        self.parsed.symbols.insert(name.to_string(), symbol);
    }
}

fn syntax(line: &SourceLine, reason: &str) -> LoadError {
    LoadError::Syntax {
        line: line.number,
        text: line.trimmed(),
        reason: reason.to_string(),
    }
}

fn token_error(line: &SourceLine, err: OperandError) -> LoadError {
    syntax(line, &err.to_string())
}

fn parse_operand(line: &SourceLine, token: &str) -> Result<Operand, LoadError> {
    token.parse().map_err(|e| token_error(line, e))
}

fn expect_len(line: &SourceLine, len: usize, reason: &str) -> Result<(), LoadError> {
    if line.words.len() == len {
        Ok(())
    } else {
        Err(syntax(line, reason))
    }
}

//! Candidate model names from the command line, a file, or an interactive prompt.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use colored::*;
use log::info;

use crate::error::{CascadeError, Result};

/// Answer to the "how do you want to enter models?" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    Manual,
    File,
}

impl InputMethod {
    pub fn parse(choice: &str) -> Result<Self> {
        match choice.trim() {
            "1" => Ok(InputMethod::Manual),
            "2" => Ok(InputMethod::File),
            other => Err(CascadeError::InvalidChoice(other.to_string())),
        }
    }
}

/// Where this run takes its model names from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// Names given directly on the command line
    Names(Vec<String>),
    /// A file with one name per line
    File(PathBuf),
    /// Ask the operator
    Interactive,
}

impl ItemSource {
    /// Produce raw candidates. Interactive prompts are read from `reader` and
    /// written to `writer`.
    pub fn candidates<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<Vec<String>> {
        match self {
            ItemSource::Names(names) => Ok(names.iter().map(|n| n.trim().to_string()).collect()),
            ItemSource::File(path) => read_file(path),
            ItemSource::Interactive => match prompt_input_method(reader, writer)? {
                InputMethod::Manual => read_interactive(reader, writer),
                InputMethod::File => {
                    let path = prompt_line(reader, writer, "Enter the path to the file: ")?;
                    read_file(Path::new(&path))
                }
            },
        }
    }
}

fn prompt_line<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String> {
    write!(writer, "{}", prompt.cyan())?;
    writer.flush()?;
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Show the input-method menu and read the answer.
pub fn prompt_input_method<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<InputMethod> {
    writeln!(writer, "{}", "Choose an input method:".cyan())?;
    writeln!(writer, "{}", "1. Enter model names manually".cyan())?;
    writeln!(writer, "{}", "2. Provide a file containing model names".cyan())?;
    let choice = prompt_line(reader, writer, "Enter your choice (1 or 2): ")?;
    InputMethod::parse(&choice)
}

/// Read names one per line until a blank line or end of input.
pub fn read_interactive<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<Vec<String>> {
    writeln!(
        writer,
        "{}",
        "Enter model names (one per line). Press Enter twice to finish:".cyan()
    )?;
    writer.flush()?;

    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if name.is_empty() {
            break;
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Read a model list file: one name per non-blank line, whitespace trimmed.
pub fn read_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| CascadeError::ItemFile {
        path: path.to_path_buf(),
        source,
    })?;
    let names = parse_lines(&content);
    info!("Read {} model names from {}", names.len(), path.display());
    Ok(names)
}

pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

use crate::form::state::ConversionForm;
use crate::units::{format_quantity, Unit};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// A line-oriented front end for [`ConversionForm`].
///
/// Every line either changes one piece of form state or is taken as the new
/// input text. After each change the freshly computed output is written.
///
/// Commands:
/// - `in <selector|unit>` / `out <selector|unit>`: pick a unit
/// - `swap`: exchange input and output units
/// - `show`: print the current state
/// - `quit` / `exit`: stop reading
pub struct Session<R, W> {
    form: ConversionForm,
    reader: R,
    writer: W,
}

#[derive(Debug, PartialEq)]
enum Command<'a> {
    InputUnit(&'a str),
    OutputUnit(&'a str),
    Swap,
    Show,
    Quit,
    Text(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some(("in", arg)) => Command::InputUnit(arg.trim()),
        Some(("out", arg)) => Command::OutputUnit(arg.trim()),
        _ => match trimmed {
            "swap" => Command::Swap,
            "show" => Command::Show,
            "quit" | "exit" => Command::Quit,
            _ => Command::Text(line),
        },
    }
}

/// Resolve a picker argument: an integer selector or a unit label/name
fn resolve_selector(arg: &str) -> Result<i64, String> {
    if let Ok(selector) = arg.parse::<i64>() {
        return Ok(selector);
    }
    arg.parse::<Unit>()
        .map(|unit| unit.index() as i64)
        .map_err(|e| e.to_string())
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(form: ConversionForm, reader: R, writer: W) -> Self {
        Self {
            form,
            reader,
            writer,
        }
    }

    pub fn form(&self) -> &ConversionForm {
        &self.form
    }

    /// Read lines until end of input or `quit`, returning the final form
    pub fn run(mut self) -> io::Result<ConversionForm> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let text = line.trim_end_matches(['\n', '\r']);
            debug!(line = text, "session input");

            match parse_command(text) {
                Command::Quit => break,
                Command::Show => self.write_state()?,
                Command::Swap => {
                    self.form.swap_units();
                    self.write_output()?;
                }
                Command::InputUnit(arg) => match resolve_selector(arg) {
                    Ok(selector) => {
                        self.form.set_input_unit(selector);
                        self.write_output()?;
                    }
                    Err(e) => writeln!(self.writer, "error: {}", e)?,
                },
                Command::OutputUnit(arg) => match resolve_selector(arg) {
                    Ok(selector) => {
                        self.form.set_output_unit(selector);
                        self.write_output()?;
                    }
                    Err(e) => writeln!(self.writer, "error: {}", e)?,
                },
                Command::Text(raw) => {
                    self.form.set_input_text(raw);
                    self.write_output()?;
                }
            }
        }
        info!("session ended");
        Ok(self.form)
    }

    fn write_output(&mut self) -> io::Result<()> {
        match self.form.evaluate() {
            Ok(conversion) => writeln!(
                self.writer,
                "{}",
                format_quantity(conversion.output, conversion.to, self.form.precision)
            ),
            Err(validation) => {
                for issue in validation.errors() {
                    writeln!(self.writer, "error: {}", issue.message)?;
                }
                Ok(())
            }
        }
    }

    fn write_state(&mut self) -> io::Result<()> {
        let form = &self.form;
        writeln!(
            self.writer,
            "input: '{}' [{}] -> output [{}]",
            form.input_text,
            form.input(),
            form.output()
        )?;
        self.write_output()
    }
}

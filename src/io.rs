//! Interactive shell around the simulator.
//!
//! All prompting, input validation and printing lives here; the core only
//! ever sees validated integers. The shell is generic over its input and
//! output so tests can script a whole session.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use log::debug;

use crate::constants::*;
use crate::error::SimError;
use crate::geometry::{
    Geometry, validate_max_process_size, validate_memory_size, validate_page_size,
    validate_process_size,
};
use crate::vm_manager::PagingSimulator;

const MENU: &str = "\
+------------------------------------------+
|                MAIN MENU                 |
+------------------------------------------+
| 1. View Physical Memory                  |
| 2. View Process Page Table               |
| 3. Create Process                        |
| 4. Exit                                  |
+------------------------------------------+";

enum Answer {
    Value(i64),
    Invalid,
    Eof,
}

/// Geometry values supplied up front (e.g. on the command line).
///
/// Missing or invalid entries are prompted for.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeometryPreset {
    pub memory_size: Option<i64>,
    pub page_size: Option<i64>,
    pub max_process_size: Option<i64>,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Shell { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one trimmed line, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_int(&mut self, prompt: &str) -> io::Result<Answer> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        Ok(match self.read_line()? {
            None => Answer::Eof,
            Some(line) => line.parse().map_or(Answer::Invalid, Answer::Value),
        })
    }

    /// Prompt until `validate` accepts the answer, `None` at end of input
    fn prompt_until<T, E: Display>(
        &mut self,
        prompt: &str,
        mut validate: impl FnMut(i64) -> Result<T, E>,
    ) -> io::Result<Option<T>> {
        loop {
            match self.read_int(prompt)? {
                Answer::Eof => return Ok(None),
                Answer::Invalid => {
                    writeln!(self.output, "Invalid input. Please enter a valid integer.")?;
                }
                Answer::Value(value) => match validate(value) {
                    Ok(accepted) => return Ok(Some(accepted)),
                    Err(e) => writeln!(self.output, "Error: {}", e)?,
                },
            }
        }
    }

    /// Use the preset value if it validates, otherwise prompt for one
    fn preset_or_prompt<T, E: Display>(
        &mut self,
        preset: Option<i64>,
        prompt: &str,
        mut validate: impl FnMut(i64) -> Result<T, E>,
    ) -> io::Result<Option<T>> {
        if let Some(value) = preset {
            match validate(value) {
                Ok(accepted) => return Ok(Some(accepted)),
                Err(e) => writeln!(self.output, "Error: {} (got {})", e, value)?,
            }
        }
        self.prompt_until(prompt, validate)
    }

    /// Collect memory size, page size and max process size.
    pub fn configure(&mut self, preset: GeometryPreset) -> io::Result<Option<Geometry>> {
        writeln!(self.output, "=== Memory Paging Simulator ===")?;
        writeln!(self.output)?;
        writeln!(self.output, "Initial Configuration:")?;

        let Some(memory) = self.preset_or_prompt(
            preset.memory_size,
            "Enter the size of physical memory in bytes (power of 2): ",
            validate_memory_size,
        )?
        else {
            return Ok(None);
        };
        let Some(page) = self.preset_or_prompt(
            preset.page_size,
            "Enter the size of a page/frame in bytes (power of 2): ",
            |page| validate_page_size(page, memory),
        )?
        else {
            return Ok(None);
        };
        let Some(max) = self.preset_or_prompt(
            preset.max_process_size,
            "Enter the maximum size of a process in bytes (power of 2): ",
            |max| validate_max_process_size(max, memory),
        )?
        else {
            return Ok(None);
        };

        // Each value already passed its own check, so this cannot fail
        Geometry::new(memory as i64, page as i64, max as i64)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    /// Menu loop; returns on Exit or end of input.
    pub fn run(&mut self, sim: &mut PagingSimulator) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", MENU)?;
            let choice = match self.read_int("Select an option: ")? {
                Answer::Eof => break,
                Answer::Invalid => {
                    writeln!(self.output, "Invalid input. Please enter a valid option.")?;
                    continue;
                }
                Answer::Value(choice) => choice,
            };
            debug!("menu choice {}", choice);

            let keep_going = match choice {
                MENU_VIEW_MEMORY => self.view_physical_memory(sim)?,
                MENU_VIEW_PAGE_TABLE => self.view_page_table(sim)?,
                MENU_CREATE_PROCESS => self.create_process(sim)?,
                MENU_EXIT => {
                    writeln!(self.output, "Exiting the simulator...")?;
                    return Ok(());
                }
                _ => {
                    writeln!(
                        self.output,
                        "Invalid option. Please select a valid option from the menu."
                    )?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.output)?;
        writeln!(self.output, "Exiting the simulator...")?;
        Ok(())
    }

    fn view_physical_memory(&mut self, sim: &PagingSimulator) -> io::Result<bool> {
        writeln!(self.output)?;
        write!(self.output, "{}", sim.memory_view())?;
        Ok(true)
    }

    /// Returns `false` when input ran out mid-command
    fn create_process(&mut self, sim: &mut PagingSimulator) -> io::Result<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Create New Process ===")?;

        let unique_pid = |pid: i64| -> Result<i32, &'static str> {
            let pid = i32::try_from(pid).map_err(|_| "Process ID is out of range.")?;
            if sim.contains_process(pid) {
                return Err("Process ID must be unique. Please enter a different ID.");
            }
            Ok(pid)
        };
        let Some(pid) = self.prompt_until("Enter Process ID (integer): ", unique_pid)? else {
            return Ok(false);
        };

        let max = sim.geometry().max_process_size();
        let prompt = format!("Enter Process Size in bytes (power of 2, max {}): ", max);
        let Some(size) = self.prompt_until(&prompt, |size| validate_process_size(size, max))?
        else {
            return Ok(false);
        };

        match sim.create_process(pid, size) {
            Ok(summary) => write!(self.output, "{}", summary)?,
            Err(SimError::InsufficientPhysicalMemory { .. }) => writeln!(
                self.output,
                "Error: Insufficient physical memory to allocate the process."
            )?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(true)
    }

    fn view_page_table(&mut self, sim: &PagingSimulator) -> io::Result<bool> {
        writeln!(self.output)?;
        if !sim.has_processes() {
            writeln!(self.output, "No processes available to display.")?;
            return Ok(true);
        }

        writeln!(self.output, "=== View Process Page Table ===")?;
        let pid = match self.read_int("Enter Process ID: ")? {
            Answer::Eof => return Ok(false),
            Answer::Value(pid) => i32::try_from(pid).ok(),
            Answer::Invalid => None,
        };
        // Unlike the create prompts, a bad id here returns to the menu
        let Some(pid) = pid else {
            writeln!(self.output, "Invalid input. Please enter a valid integer.")?;
            return Ok(true);
        };

        match sim.page_table_view(pid) {
            Ok(view) => {
                writeln!(self.output)?;
                write!(self.output, "{}", view)?;
            }
            Err(SimError::ProcessNotFound(pid)) => {
                writeln!(self.output, "Error: Process with ID {} not found.", pid)?
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(true)
    }
}

//! Interactive root directory selection

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Chooses the directory to scan. `Ok(None)` means the user cancelled.
pub trait DirectoryPicker {
    fn pick(&mut self, start: &Path) -> io::Result<Option<PathBuf>>;
}

/// Line-based picker: lists subdirectories with numbers and reads a choice.
///
/// - a number opens that subdirectory
/// - `..` goes to the parent
/// - `.` or an empty line selects the current directory
/// - `q` or end of input cancels
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
    show_hidden: bool,
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            show_hidden: false,
        }
    }

    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> DirectoryPicker for PromptPicker<R, W> {
    fn pick(&mut self, start: &Path) -> io::Result<Option<PathBuf>> {
        let mut current = start.canonicalize()?;
        loop {
            let dirs = match subdirectories(&current, self.show_hidden) {
                Ok(dirs) => dirs,
                Err(e) => {
                    writeln!(self.output, "cannot read {}: {}", current.display(), e)?;
                    Vec::new()
                }
            };

            writeln!(self.output)?;
            writeln!(self.output, "{}", current.display())?;
            for (i, dir) in dirs.iter().enumerate() {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                writeln!(self.output, "  {:>3}) {}/", i + 1, name)?;
            }
            write!(
                self.output,
                "Number to open, '..' up, '.' or Enter to select, 'q' to cancel: "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim() {
                "" | "." => return Ok(Some(current)),
                "q" | "Q" => return Ok(None),
                ".." => {
                    if let Some(parent) = current.parent() {
                        current = parent.to_path_buf();
                    }
                }
                choice => match choice.parse::<usize>() {
                    Ok(n) if (1..=dirs.len()).contains(&n) => current = dirs[n - 1].clone(),
                    _ => writeln!(self.output, "invalid choice: {}", choice)?,
                },
            }
        }
    }
}

/// Immediate subdirectories sorted by name. Symlinks are not listed.
fn subdirectories(dir: &Path, show_hidden: bool) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if !show_hidden && entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        dirs.push(entry.path());
    }
    dirs.sort();
    Ok(dirs)
}

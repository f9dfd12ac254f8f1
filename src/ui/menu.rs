use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::core::config::{Action, OutputFormat};
use crate::pages::explorer::Explorer;

const OPTIONS: &str = "
Options:
 [C] Change directory
 [B] Go back
 [1] Copy file
 [2] Move file
 [3] Delete file
 [4] Create file
 [5] Search file/folder
 [6] View permissions
 [7] Change permissions
 [Q] Quit";

/// Whitespace-separated words read from a line-oriented input.
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Next word, or `None` at end of input.
    fn next_word(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

/// Runs the interactive menu until `Q` or end of input. Every pass shows the
/// current directory listing, then performs the chosen operation.
pub fn run_menu<R: BufRead, W: Write>(explorer: &mut Explorer, input: R, out: &mut W) -> io::Result<()> {
    let mut tokens = Tokens::new(input);
    writeln!(out, "=== Terminal File Explorer ===")?;

    loop {
        explorer.execute(&Action::Ls, out, OutputFormat::Text)?;
        writeln!(out, "{OPTIONS}")?;

        let Some(choice) = prompt(&mut tokens, out, "Enter choice: ")? else {
            break;
        };

        let action = match choice.as_str() {
            "C" | "c" => prompt(&mut tokens, out, "Enter directory name: ")?
                .map(|path| Action::Cd { path }),
            "B" | "b" => {
                match explorer.go_back() {
                    Ok(dir) => writeln!(out, "Changed directory to: {}", dir.display())?,
                    Err(err) => writeln!(out, "Failed to change directory: {err}")?,
                }
                continue;
            }
            "1" | "2" => {
                let Some(source) = prompt(&mut tokens, out, "Enter source file: ")? else {
                    break;
                };
                let Some(target) = prompt(&mut tokens, out, "Enter destination file: ")? else {
                    break;
                };
                Some(if choice == "1" {
                    Action::Cp { source, target }
                } else {
                    Action::Mv {
                        from: source,
                        to: target,
                    }
                })
            }
            "3" => prompt(&mut tokens, out, "Enter file to delete: ")?
                .map(|path| Action::Rm { path }),
            "4" => prompt(&mut tokens, out, "Enter new file name: ")?
                .map(|path| Action::Touch { path }),
            "5" => prompt(&mut tokens, out, "Enter name to search: ")?
                .map(|needle| Action::Find { needle }),
            "6" => prompt(&mut tokens, out, "Enter file name: ")?
                .map(|path| Action::Perms { path }),
            "7" => {
                let Some(path) = prompt(&mut tokens, out, "Enter file name: ")? else {
                    break;
                };
                prompt(&mut tokens, out, "Enter permission string (rwxr-xr--): ")?
                    .map(|symbolic| Action::Chmod { path, symbolic })
            }
            "Q" | "q" => break,
            _ => {
                writeln!(out, "Invalid choice. Try again.")?;
                continue;
            }
        };

        // input ran out mid-command
        let Some(action) = action else {
            break;
        };
        explorer.execute(&action, out, OutputFormat::Text)?;
    }

    writeln!(out, "Exiting File Explorer. Goodbye!")?;
    out.flush()
}

fn prompt<R: BufRead, W: Write>(
    tokens: &mut Tokens<R>,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    tokens.next_word()
}

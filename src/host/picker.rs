// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Destination pickers

use super::DestinationPicker;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Picker with a preset answer, used verbatim. `None` always cancels.
#[derive(Debug, Clone, Default)]
pub struct FixedDestination(pub Option<PathBuf>);

impl FixedDestination {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(Some(path.into()))
    }

    pub fn cancelled() -> Self {
        Self(None)
    }
}

impl DestinationPicker for FixedDestination {
    fn pick(&mut self, _initial_folder: &Path) -> std::io::Result<Option<PathBuf>> {
        Ok(self.0.clone())
    }
}

/// Interactive picker: asks for a file name on `output`, reads one line from `input`.
///
/// A blank line or end of input cancels.
pub struct PromptDestination<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptDestination<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> DestinationPicker for PromptDestination<R, W> {
    fn pick(&mut self, initial_folder: &Path) -> std::io::Result<Option<PathBuf>> {
        write!(
            self.output,
            "Save OBJ file as (in {}, blank to cancel): ",
            initial_folder.display()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        // Relative answers are taken from the offered folder
        Ok(Some(initial_folder.join(answer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fixed_ignores_offered_folder() {
        let mut relative = FixedDestination::new("model.obj");
        let path = relative.pick(Path::new("/tmp/out")).unwrap();
        assert_eq!(path, Some(PathBuf::from("model.obj")));

        let mut absolute = FixedDestination::new("/srv/model.obj");
        let path = absolute.pick(Path::new("/tmp/out")).unwrap();
        assert_eq!(path, Some(PathBuf::from("/srv/model.obj")));
    }

    #[test]
    fn test_fixed_cancelled() {
        let mut picker = FixedDestination::cancelled();
        assert_eq!(picker.pick(Path::new("/tmp")).unwrap(), None);
    }

    #[test]
    fn test_prompt_reads_answer() {
        let mut shown = Vec::new();
        let mut picker = PromptDestination::new(Cursor::new("house.obj\n"), &mut shown);
        let path = picker.pick(Path::new("/data")).unwrap();
        assert_eq!(path, Some(PathBuf::from("/data/house.obj")));
        drop(picker);

        let prompt = String::from_utf8(shown).unwrap();
        assert!(prompt.contains("/data"));
    }

    #[test]
    fn test_prompt_keeps_absolute_answer() {
        let mut sink: Vec<u8> = Vec::new();
        let mut picker = PromptDestination::new(Cursor::new("/srv/house.obj\n"), &mut sink);
        let path = picker.pick(Path::new("/data")).unwrap();
        assert_eq!(path, Some(PathBuf::from("/srv/house.obj")));
    }

    #[test]
    fn test_prompt_blank_or_eof_cancels() {
        let mut sink: Vec<u8> = Vec::new();
        let mut blank = PromptDestination::new(Cursor::new("   \n"), &mut sink);
        assert_eq!(blank.pick(Path::new("/data")).unwrap(), None);

        let mut eof = PromptDestination::new(Cursor::new(""), &mut sink);
        assert_eq!(eof.pick(Path::new("/data")).unwrap(), None);
    }
}

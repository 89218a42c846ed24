use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentDirection {
    Left,
    Right,
}

/// Column alignment attached to a property, written `{Name,10}` or `{Name,-10}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    direction: AlignmentDirection,
    width: usize,
}

impl Alignment {
    pub(crate) fn new(direction: AlignmentDirection, width: usize) -> Self {
        Self { direction, width }
    }

    pub fn direction(&self) -> AlignmentDirection {
        self.direction
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Write `value` padded with spaces to the alignment width.
    ///
    /// Values already at or beyond the width are written unchanged. Width is
    /// measured in characters, not bytes.
    pub fn pad<W: Write + ?Sized>(&self, output: &mut W, value: &str) -> fmt::Result {
        let len = value.chars().count();
        if len >= self.width {
            return output.write_str(value);
        }

        let padding = self.width - len;
        match self.direction {
            AlignmentDirection::Right => {
                write_spaces(output, padding)?;
                output.write_str(value)
            }
            AlignmentDirection::Left => {
                output.write_str(value)?;
                write_spaces(output, padding)
            }
        }
    }
}

fn write_spaces<W: Write + ?Sized>(output: &mut W, count: usize) -> fmt::Result {
    const SPACES: &str = "                                ";
    let mut remaining = count;
    while remaining > 0 {
        let chunk = remaining.min(SPACES.len());
        output.write_str(&SPACES[..chunk])?;
        remaining -= chunk;
    }
    Ok(())
}

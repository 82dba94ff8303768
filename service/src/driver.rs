//! Output drivers available to the service.

use std::io::{self, Write};

use lighthaus_composer::{OutputDriver, RenderError, Rgb};

/// Draws the strip as a row of colored cells on an ANSI truecolor terminal
///
/// Only every `frame_interval`-th frame is drawn to keep the terminal usable.
pub struct TerminalDriver<W: Write> {
    out: W,
    pixel_count: usize,
    frame_interval: u32,
    frame: u32,
    line: String,
}

impl<W: Write> TerminalDriver<W> {
    pub fn new(out: W, pixel_count: usize, frame_interval: u32) -> Self {
        Self {
            out,
            pixel_count,
            frame_interval: frame_interval.max(1),
            frame: 0,
            line: String::with_capacity(pixel_count * 20),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, colors: &[Rgb]) -> io::Result<()> {
        use std::fmt::Write as _;

        self.line.clear();
        self.line.push('\r');
        for color in colors {
            let _ = write!(self.line, "\x1b[48;2;{};{};{}m ", color.r, color.g, color.b);
        }
        self.line.push_str("\x1b[0m");
        self.out.write_all(self.line.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> OutputDriver for TerminalDriver<W> {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), RenderError> {
        if colors.len() != self.pixel_count {
            return Err(RenderError::LengthMismatch {
                expected: self.pixel_count,
                actual: colors.len(),
            });
        }
        let frame = self.frame;
        self.frame = self.frame.wrapping_add(1);
        if frame % self.frame_interval != 0 {
            return Ok(());
        }
        self.draw(colors).map_err(|error| match error.kind() {
            io::ErrorKind::BrokenPipe => RenderError::Disconnected,
            _ => RenderError::Io,
        })
    }
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDriver;

impl OutputDriver for NullDriver {
    fn write(&mut self, _colors: &[Rgb]) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Driver selected by the configuration
pub enum Output {
    Terminal(TerminalDriver<io::Stdout>),
    Null(NullDriver),
}

impl OutputDriver for Output {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), RenderError> {
        match self {
            Self::Terminal(driver) => driver.write(colors),
            Self::Null(driver) => driver.write(colors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_driver_writes_one_cell_per_pixel() {
        let mut driver = TerminalDriver::new(Vec::new(), 2, 1);
        driver
            .write(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)])
            .unwrap();
        let written = String::from_utf8(driver.into_inner()).unwrap();
        assert_eq!(
            written,
            "\r\x1b[48;2;255;0;0m \x1b[48;2;0;0;255m \x1b[0m"
        );
    }

    #[test]
    fn terminal_driver_rejects_wrong_length() {
        let mut driver = TerminalDriver::new(Vec::new(), 3, 1);
        assert_eq!(
            driver.write(&[Rgb::default()]),
            Err(RenderError::LengthMismatch {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn terminal_driver_skips_frames() {
        let mut driver = TerminalDriver::new(Vec::new(), 1, 3);
        for _ in 0..6 {
            driver.write(&[Rgb::default()]).unwrap();
        }
        let written = String::from_utf8(driver.into_inner()).unwrap();
        assert_eq!(written.matches('\r').count(), 2);
    }
}

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Writer that sleeps after every character, for a typing effect on a
/// terminal. Spaces and newlines use their own delay.
pub struct Paced<W: Write> {
    inner: W,
    char_delay: Duration,
    space_delay: Duration,
}

impl<W: Write> Paced<W> {
    pub fn new(inner: W, char_delay: Duration, space_delay: Duration) -> Paced<W> {
        Paced {
            inner,
            char_delay,
            space_delay,
        }
    }

    fn is_instant(&self) -> bool {
        self.char_delay.is_zero() && self.space_delay.is_zero()
    }
}

impl<W: Write> Write for Paced<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.is_instant() {
            return self.inner.write(buf);
        }

        for byte in buf {
            self.inner.write_all(std::slice::from_ref(byte))?;
            // utf8 continuation bytes belong to the character already paused on
            if (0x80..0xC0).contains(byte) {
                continue;
            }
            self.inner.flush()?;
            match byte {
                b' ' | b'\n' => thread::sleep(self.space_delay),
                _ => thread::sleep(self.char_delay),
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

//! Concurrent line reading from one or more inputs
//!
//! One reader thread per input, all handing lines over a single rendezvous
//! channel. Consumers pull lines one at a time through [`Iterator`].
//!
//! Lines are raw bytes with the terminator removed. No encoding is assumed.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, info};

use crate::error::StatsError;

type Item = Result<Vec<u8>, StatsError>;

/// Lazy, finite stream of lines from several inputs read in parallel
///
/// Lines from one input keep their order; lines from different inputs
/// interleave arbitrarily. The stream ends once every input is exhausted.
/// A failing input yields one `Err` and stops reading that input.
///
/// Dropping the source disconnects the channel, which stops every reader.
///
/// # Example
///
/// ```
/// use linestats::pipeline::LineSource;
///
/// let source = LineSource::from_readers([
///     ("a", "one\ntwo\n".as_bytes()),
///     ("b", "three".as_bytes()),
/// ]);
/// let mut lines: Vec<Vec<u8>> = source.map(Result::unwrap).collect();
/// lines.sort();
/// assert_eq!(lines, [&b"one"[..], b"three", b"two"]);
/// ```
#[derive(Debug)]
pub struct LineSource {
    receiver: Option<Receiver<Item>>,
    readers: Vec<JoinHandle<()>>,
}

impl LineSource {
    /// Read each file on its own thread
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::spawn(paths.into_iter().map(|path| {
            let path: PathBuf = path.into();
            let open = {
                let path = path.clone();
                move || File::open(path)
            };
            (path, open)
        }))
    }

    /// Read already-open inputs, each on its own thread
    ///
    /// `label` names the input in errors and logs.
    pub fn from_readers<I, L, R>(readers: I) -> Self
    where
        I: IntoIterator<Item = (L, R)>,
        L: Into<PathBuf>,
        R: Read + Send + 'static,
    {
        Self::spawn(
            readers
                .into_iter()
                .map(|(label, reader)| (label.into(), move || Ok::<_, io::Error>(reader))),
        )
    }

    fn spawn<I, F, R>(inputs: I) -> Self
    where
        I: IntoIterator<Item = (PathBuf, F)>,
        F: FnOnce() -> io::Result<R> + Send + 'static,
        R: Read,
    {
        // Zero capacity: each send waits for the consumer
        let (sender, receiver) = channel::bounded(0);
        let readers = inputs
            .into_iter()
            .map(|(path, open)| {
                let sender = sender.clone();
                thread::spawn(move || read_input(path, open, sender))
            })
            .collect();

        Self {
            receiver: Some(receiver),
            readers,
        }
    }

    /// Number of reader threads started
    pub fn inputs(&self) -> usize {
        self.readers.len()
    }
}

impl Iterator for LineSource {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        // Disconnects once every reader has dropped its sender
        self.receiver.as_ref()?.recv().ok()
    }
}

impl Drop for LineSource {
    fn drop(&mut self) {
        drop(self.receiver.take());
        for reader in self.readers.drain(..) {
            let _ = reader.join();
        }
    }
}

fn read_input<F, R>(path: PathBuf, open: F, sender: Sender<Item>)
where
    F: FnOnce() -> io::Result<R>,
    R: Read,
{
    let reader = match open() {
        Ok(reader) => BufReader::new(reader),
        Err(e) => {
            let _ = sender.send(Err(StatsError::io(path, e)));
            return;
        }
    };
    debug!(input = %path.display(), "reading input");

    match forward_lines(reader, &sender) {
        Ok(Some(lines)) => info!(input = %path.display(), lines, "finished input"),
        Ok(None) => debug!(input = %path.display(), "consumer gone, stopped reading"),
        Err(e) => {
            let _ = sender.send(Err(StatsError::io(path, e)));
        }
    }
}

/// Send every line; `None` if the consumer hung up first
fn forward_lines<R: BufRead>(mut reader: R, sender: &Sender<Item>) -> io::Result<Option<u64>> {
    let mut buf = Vec::new();
    let mut lines = 0u64;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(Some(lines));
        }
        if sender.send(Ok(strip_terminator(&buf).to_vec())).is_err() {
            return Ok(None);
        }
        lines += 1;
    }
}

/// Line without its `\n` or `\r\n` terminator
fn strip_terminator(raw: &[u8]) -> &[u8] {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    line.strip_suffix(b"\r").unwrap_or(line)
}

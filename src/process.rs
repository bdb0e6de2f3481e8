use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::command;
use crate::converter::{Conversion, Converter, Request, normalize_newlines};
use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs sass-convert (or a compatible command) as a child process.
///
/// The source is written to the child's stdin on its own thread while stdout
/// and stderr are drained on two more, so neither side can stall on a full
/// pipe. On timeout only the direct child is killed; the pipe threads are
/// left to finish whenever the last holder of the pipes exits.
#[derive(Debug, Clone)]
pub struct SassConvert {
    command: Vec<String>,
    timeout: Option<Duration>,
}

impl SassConvert {
    pub fn new(command: Vec<String>) -> Result<Self> {
        if command.is_empty() {
            return Err(Error::Config("command must name a program".to_string()));
        }
        Ok(Self {
            command,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn(&self, request: &Request) -> Result<Child> {
        let (program, mut args) = command::program_and_args(&self.command)?;
        args.extend(command::arguments(request.format, &request.options));

        tracing::debug!(program = %program, args = ?args, "running converter");

        let mut cmd = Command::new(&program);
        cmd.args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(extra) = &request.options.extra_path {
            cmd.env("PATH", command::search_path(std::env::var_os("PATH"), extra)?);
        }

        cmd.spawn().map_err(|source| Error::LaunchFailure {
            program: self.program().to_string(),
            source,
        })
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::Timeout {
                    program: self.program().to_string(),
                    after: timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Converter for SassConvert {
    fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or("sass-convert")
    }

    fn convert(&self, request: &Request) -> Result<Conversion> {
        let mut child = self.spawn(request)?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let input = request.source_text.clone().into_bytes();

        // Not scoped: a grandchild can keep the pipes open after a timeout
        // kills the child, and the threads must not hold up the return.
        let writer = thread::spawn(move || write_input(stdin, &input));
        let out_reader = thread::spawn(move || read_output(stdout));
        let err_reader = thread::spawn(move || read_output(stderr));

        let status = self.wait(&mut child)?;

        join(writer)?;
        let output = join(out_reader)?;
        let error = join(err_reader)?;

        let error_text = String::from_utf8_lossy(&error).into_owned();

        if !status.success() {
            return Err(Error::ConversionFailure {
                status,
                stderr: error_text,
            });
        }

        if !error_text.trim().is_empty() {
            tracing::warn!(program = %self.program(), "{}", error_text.trim_end());
        }

        let output_text = normalize_newlines(&String::from_utf8(output)?);

        Ok(Conversion {
            exit_code: status.code().unwrap_or(0),
            output_text,
            error_text,
        })
    }
}

fn write_input(stdin: Option<impl Write>, input: &[u8]) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin.write_all(input) {
        // The child stopped reading; its exit status tells the rest.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
    // stdin is dropped here, closing the pipe
}

fn read_output(stream: Option<impl Read>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

fn join<T>(handle: thread::JoinHandle<io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe thread panicked")))
}

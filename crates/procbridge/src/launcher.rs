use crate::{OutputStreamer, StreamSession, WhichResolver};
use procbridge_core::{
    BridgeError, EventSink, ExecOutcome, ExecRequest, LossyConverter, OutputConverter,
    PathResolver, ProcessId,
};
use std::io::{PipeReader, Read};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{info, warn};

/// Spawns external processes in blocking or background mode.
///
/// The event sink, path resolver, and output converter are injected at
/// construction; per-execution behavior (arguments, environment overlay,
/// stop keyword, conversion directive) comes from the [`ExecRequest`].
pub struct Launcher {
    sink: Arc<dyn EventSink>,
    resolver: Arc<dyn PathResolver>,
    converter: Arc<dyn OutputConverter>,
}

impl Launcher {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            resolver: Arc::new(WhichResolver),
            converter: Arc::new(LossyConverter),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn PathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn OutputConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Run the process to completion and capture its combined
    /// stdout/stderr output.
    ///
    /// Both streams write into one shared pipe, so the captured bytes keep
    /// the order the process produced them in. Blocks the calling task for
    /// the full process lifetime. Spawn errors and abnormal exits are
    /// returned as `Failure` with the OS error text; nothing panics on a
    /// missing executable or permission problem.
    pub async fn run(&self, request: &ExecRequest) -> ExecOutcome {
        if let Err(e) = request.validate() {
            return ExecOutcome::failure(e.to_string());
        }

        info!(command = %request.command, args = ?request.args, "Running process to completion");

        let mut cmd = self.command_for(request);
        cmd.stdin(Stdio::null());

        let mut reader = match Self::share_output_pipe(&mut cmd) {
            Ok(reader) => reader,
            Err(e) => return ExecOutcome::failure(e.to_string()),
        };

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(command = %request.command, error = %e, "Failed to run process");
                return ExecOutcome::failure(e.to_string());
            }
        };
        // The command still holds the write ends; close them so the reader
        // sees end-of-data once the child exits
        drop(cmd);

        let collector = tokio::task::spawn_blocking(move || {
            let mut combined = Vec::new();
            reader.read_to_end(&mut combined).map(|_| combined)
        });

        let status = match child.wait().await {
            Ok(status) => status,
            Err(e) => {
                warn!(command = %request.command, error = %e, "Failed waiting for process");
                return ExecOutcome::failure(e.to_string());
            }
        };

        let combined = match collector.await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => return ExecOutcome::failure(e.to_string()),
            Err(e) => return ExecOutcome::failure(e.to_string()),
        };

        if !status.success() {
            warn!(command = %request.command, %status, "Process exited abnormally");
            return ExecOutcome::failure(status.to_string());
        }

        let text = if request.convert_output {
            self.converter.convert(&combined)
        } else {
            String::from_utf8_lossy(&combined).into_owned()
        };

        ExecOutcome::success(text)
    }

    /// Start the process in the background and return its pid as text.
    ///
    /// Output lines are delivered to the sink under `out_event` (subject to
    /// the request's stop keyword), and `end_event` fires exactly once when
    /// the process exits. An empty `out_event` discards output; an empty
    /// `end_event` skips the completion event while the exit is still
    /// reaped. Returns as soon as the spawn is confirmed; the stream
    /// session runs detached.
    pub async fn run_background(
        &self,
        request: &ExecRequest,
        out_event: &str,
        end_event: &str,
    ) -> ExecOutcome {
        match self.start_background(request, out_event, end_event).await {
            Ok((pid, session)) => {
                session.detach();
                ExecOutcome::success(pid.to_string())
            }
            Err(e) => ExecOutcome::failure(e.to_string()),
        }
    }

    /// Start a background execution and hand back the [`StreamSession`] for
    /// callers that want to await the output drainer and exit waiter
    /// themselves.
    pub async fn start_background(
        &self,
        request: &ExecRequest,
        out_event: &str,
        end_event: &str,
    ) -> Result<(ProcessId, StreamSession), BridgeError> {
        request
            .validate()
            .map_err(|e| BridgeError::InvalidRequest(e.to_string()))?;

        info!(
            command = %request.command,
            args = ?request.args,
            out_event,
            end_event,
            "Starting background process"
        );

        let streaming = !out_event.is_empty();

        let mut cmd = self.command_for(request);
        cmd.stdin(Stdio::null());

        let reader = if streaming {
            Some(Self::share_output_pipe(&mut cmd)?)
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
            None
        };

        let mut child = cmd.spawn().map_err(|e| {
            warn!(command = %request.command, error = %e, "Failed to start background process");
            BridgeError::SpawnFailed(e.to_string())
        })?;
        drop(cmd);

        let Some(pid) = child.id() else {
            let _ = child.wait().await;
            return Err(BridgeError::SpawnFailed(
                "process exited before its pid could be observed".to_string(),
            ));
        };

        let drainer = reader.map(|reader| {
            let streamer =
                OutputStreamer::new(self.sink.clone(), out_event, request.stop_keyword.as_str());
            tokio::task::spawn_blocking(move || {
                streamer.stream(std::io::BufReader::new(reader));
            })
        });

        let sink = self.sink.clone();
        let end_event = end_event.to_string();
        let exit_waiter = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => info!(pid, %status, "Background process exited"),
                Err(e) => warn!(pid, error = %e, "Failed waiting for background process"),
            }
            if !end_event.is_empty() {
                sink.emit(&end_event, "");
            }
        });

        info!(pid, command = %request.command, "Background process started");
        Ok((
            pid,
            StreamSession {
                drainer,
                exit_waiter,
            },
        ))
    }

    /// Point both stdout and stderr of `cmd` at the write end of one pipe
    /// and return the read end. Interleaving then happens in the kernel, in
    /// the order the process writes.
    fn share_output_pipe(cmd: &mut Command) -> std::io::Result<PipeReader> {
        let (reader, writer) = std::io::pipe()?;
        let stderr_writer = writer.try_clone()?;
        cmd.stdout(writer).stderr(stderr_writer);
        Ok(reader)
    }

    fn command_for(&self, request: &ExecRequest) -> Command {
        let mut cmd = Command::new(self.resolve_program(&request.command));
        cmd.args(&request.args);

        if let Some(dir) = &request.working_directory {
            cmd.current_dir(dir);
        }

        // Additive overlay onto the inherited environment
        for (key, value) in &request.env {
            cmd.env(key, value);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW - no console popup for background processes
            cmd.creation_flags(0x08000000);
        }

        cmd
    }

    fn resolve_program(&self, command: &str) -> PathBuf {
        match self.resolver.resolve(command) {
            Some(path) if path.exists() => path,
            // Fall back to the original reference and let the OS loader
            // resolve it
            _ => PathBuf::from(command),
        }
    }
}

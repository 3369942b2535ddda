//! Background characterization for interactive hosts.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use pc_assay::AssaySpec;
use pc_flowsheet::SharedSimulation;

use crate::config::CharacterizationConfig;
use crate::error::AppResult;
use crate::progress::ProgressEvent;
use crate::service::{
    CharacterizationOutcome, CharacterizationRequest, run_characterization_with_progress,
};

/// Runs one characterization on its own thread and reports over a channel.
///
/// The host keeps editing through its own [`SharedSimulation`] handle; a structural edit
/// in progress when the merge starts makes the worker report an error instead.
pub struct CharacterizationWorker {
    pub progress_rx: Receiver<WorkerMessage>,
    _handle: JoinHandle<()>,
}

#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Progress(ProgressEvent),
    Complete(Box<CharacterizationOutcome>),
    Error { message: String },
}

impl CharacterizationWorker {
    pub fn start(
        spec: AssaySpec,
        simulation: SharedSimulation,
        config: CharacterizationConfig,
        export_path: Option<PathBuf>,
        accept_closest: bool,
    ) -> Self {
        let (tx, rx) = channel();

        let handle = thread::spawn(move || {
            let request = CharacterizationRequest {
                spec: &spec,
                export_path: export_path.as_deref(),
                accept_closest,
            };
            if let Err(e) = Self::run(&request, &simulation, &config, &tx) {
                let _ = tx.send(WorkerMessage::Error {
                    message: format!("Worker error: {}", e),
                });
            }
        });

        Self {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run(
        request: &CharacterizationRequest,
        simulation: &SharedSimulation,
        config: &CharacterizationConfig,
        tx: &Sender<WorkerMessage>,
    ) -> AppResult<()> {
        let mut forward = |event: ProgressEvent| {
            // the host may have stopped listening
            let _ = tx.send(WorkerMessage::Progress(event));
        };
        let outcome =
            run_characterization_with_progress(request, simulation, config, Some(&mut forward))?;
        let _ = tx.send(WorkerMessage::Complete(Box::new(outcome)));
        Ok(())
    }

    /// Block until the worker finishes, returning its final message.
    pub fn wait(self) -> Option<WorkerMessage> {
        self.progress_rx
            .iter()
            .find(|msg| !matches!(msg, WorkerMessage::Progress(_)))
    }
}

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Steps of one fetch cycle, as shown on the spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    ResolvingTime,
    Downloading,
    Joining,
    Encoding,
    Writing,
}

impl FetchStage {
    pub fn message(&self) -> &'static str {
        match self {
            FetchStage::ResolvingTime => "Resolving latest observation time...",
            FetchStage::Downloading => "Downloading station table and snapshot...",
            FetchStage::Joining => "Joining stations with observations...",
            FetchStage::Encoding => "Encoding measurements...",
            FetchStage::Writing => "Writing output...",
        }
    }
}

pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    reached: Mutex<Vec<FetchStage>>,
}

impl ProgressReporter {
    pub fn new_spinner(message: &str, silent: bool) -> Self {
        if silent {
            return Self::silent();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            spinner: Some(pb),
            reached: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            spinner: None,
            reached: Mutex::new(Vec::new()),
        }
    }

    pub fn stage(&self, stage: FetchStage) {
        if let Ok(mut reached) = self.reached.lock() {
            reached.push(stage);
        }
        self.set_message(stage.message());
    }

    /// Stages reported so far, in order
    pub fn stages(&self) -> Vec<FetchStage> {
        self.reached
            .lock()
            .map(|reached| reached.clone())
            .unwrap_or_default()
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}

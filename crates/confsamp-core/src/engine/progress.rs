/// Events emitted while a batch of string jobs is prepared and run.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A batch of `total_jobs` independent string jobs is starting.
    BatchStart { total_jobs: u64 },
    /// One job of the current batch finished (successfully or not).
    JobFinished,
    BatchFinish,

    /// A job failed; the batch continues with its siblings.
    JobFailed { index: usize, message: String },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// A do-nothing-by-default reporter the workflows thread through the engine;
/// front ends attach a callback to drive progress bars or logs.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

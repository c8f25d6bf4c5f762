use tracing::{debug, warn};

use crate::{
    Execution, config::Limits, error::RuntimeError, execute, hardware::PadHardware,
    interpreter::environment::Environment,
};

/// Runs successive submissions against one global environment.
///
/// Declarations from earlier submissions stay visible to later ones. A fatal
/// error throws the environment away: the next submission starts from a fresh
/// global scope, as the device would after a restart.
///
/// # Example
/// ```
/// use padscript::{
///     config::Limits, hardware::simulated::SimulatedRig, interpreter::value::Value,
///     session::Session,
/// };
///
/// let mut rig = SimulatedRig::default();
/// let mut session = Session::new(Limits::default());
///
/// session.submit(b"let lives = 3;", &mut rig).unwrap();
/// let execution = session.submit(b"lives - 1;", &mut rig).unwrap();
/// assert_eq!(execution.value, Value::Number(2));
///
/// assert!(session.submit(b"lives = 1 / 0;", &mut rig).is_err());
/// assert!(session.submit(b"lives;", &mut rig).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    env:         Environment,
    limits:      Limits,
    submissions: usize,
}

impl Session {
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self { env: Environment::global(),
               limits,
               submissions: 0 }
    }

    /// Parses and runs one submission.
    ///
    /// # Errors
    /// The fatal error that aborted the submission. The session has already
    /// been reset when this returns.
    pub fn submit(&mut self,
                  source: &[u8],
                  hardware: &mut dyn PadHardware)
                  -> Result<Execution, RuntimeError> {
        self.submissions += 1;
        debug!(submission = self.submissions, "running submission");

        let result = execute(source, hardware, self.limits, &mut self.env);
        if result.is_err() {
            warn!(submission = self.submissions, "fatal error, resetting the global environment");
            self.reset();
        }
        result
    }

    /// Drops every binding made by earlier submissions.
    pub fn reset(&mut self) {
        self.env = Environment::global();
    }

    /// The global environment shared by submissions.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

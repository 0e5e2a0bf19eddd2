use std::fmt;

/// Process exit code reported for any bootstrap failure.
pub const EXIT_FAILURE: i32 = -1;

/// Process exit code reported after the window was closed normally.
pub const EXIT_SUCCESS: i32 = 0;

/// Fatal bootstrap failure.
///
/// Each variant maps to one initialization step. None of them is retried;
/// the process reports [`message`](Self::message) on stderr and exits with
/// [`exit_code`](Self::exit_code). The carried string is the underlying cause,
/// kept for the log.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BootstrapError {
    /// The windowing library (event loop) could not be initialized.
    PlatformInit(String),
    /// The window, its GL context or its surface could not be created.
    WindowCreation(String),
    /// GL entry points could not be resolved.
    LoaderInit(String),
}

impl BootstrapError {
    /// Fixed, user-facing line printed on stderr.
    pub fn message(&self) -> &'static str {
        match self {
            BootstrapError::PlatformInit(_) => "Windowing library initialization failed!",
            BootstrapError::WindowCreation(_) => "Failed to open window!",
            BootstrapError::LoaderInit(_) => "OpenGL function loader initialization failed!",
        }
    }

    /// Underlying cause as reported by winit/glutin/gl.
    pub fn detail(&self) -> &str {
        match self {
            BootstrapError::PlatformInit(d)
            | BootstrapError::WindowCreation(d)
            | BootstrapError::LoaderInit(d) => d,
        }
    }

    #[inline]
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }

    pub(crate) fn platform(err: impl fmt::Display) -> Self {
        BootstrapError::PlatformInit(format!("{err:#}"))
    }

    pub(crate) fn window(err: impl fmt::Display) -> Self {
        BootstrapError::WindowCreation(format!("{err:#}"))
    }

    pub(crate) fn loader(err: impl fmt::Display) -> Self {
        BootstrapError::LoaderInit(format!("{err:#}"))
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.detail();
        if detail.is_empty() {
            f.write_str(self.message())
        } else {
            write!(f, "{} ({detail})", self.message())
        }
    }
}

impl std::error::Error for BootstrapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_exits_with_minus_one() {
        let errors = [
            BootstrapError::PlatformInit(String::new()),
            BootstrapError::WindowCreation(String::new()),
            BootstrapError::LoaderInit(String::new()),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), -1);
        }
    }

    #[test]
    fn messages_are_fixed_per_step() {
        assert_eq!(
            BootstrapError::PlatformInit("no display".into()).message(),
            "Windowing library initialization failed!"
        );
        assert_eq!(
            BootstrapError::WindowCreation("no config".into()).message(),
            "Failed to open window!"
        );
        assert_eq!(
            BootstrapError::LoaderInit("glClear".into()).message(),
            "OpenGL function loader initialization failed!"
        );
    }

    #[test]
    fn display_appends_detail_when_present() {
        let err = BootstrapError::WindowCreation("no matching config".into());
        assert_eq!(err.to_string(), "Failed to open window! (no matching config)");

        let err = BootstrapError::LoaderInit(String::new());
        assert_eq!(err.to_string(), "OpenGL function loader initialization failed!");
    }

    #[test]
    fn constructors_keep_anyhow_context_chain() {
        let cause = anyhow::anyhow!("EGL_BAD_CONFIG").context("failed to create GL context");
        let err = BootstrapError::window(cause);
        assert_eq!(err.detail(), "failed to create GL context: EGL_BAD_CONFIG");
    }
}

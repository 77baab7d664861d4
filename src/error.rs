/// Error carried up to `main`, paired with the process exit code it maps to.
///
/// Exit codes:
/// - `2`: the input is unreadable or does not follow the tagging conventions
///   (bad headers, malformed dates, non-numeric cells)
/// - `3`: the batch finished but one or more files failed
/// - `4`: outputs could not be created or written
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input that does not follow the conventions, or cannot be read.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// One or more files of a batch failed.
    pub fn batch(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Output files or directories could not be written.
    pub fn output(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with where the error happened (e.g. a file name).
    pub fn context(self, what: impl std::fmt::Display) -> Self {
        Self {
            exit_code: self.exit_code,
            message: format!("{what}: {}", self.message),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_exit_code() {
        let err = AppError::input("bad date '2021/1'").context("T_weather.csv");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "T_weather.csv: bad date '2021/1'");
    }
}

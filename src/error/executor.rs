use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Executor has been stopped.")]
    Stopped,
    #[error("Executor {context} lock poisoned.")]
    LockPoisoned { context: &'static str },
    #[error("Dispatcher task failed: {source}")]
    Dispatcher {
        #[source]
        source: tokio::task::JoinError,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

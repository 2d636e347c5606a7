use super::{
    AppError, ConfigError, ExecutorError, HttpError, MetricsError, SinkError, ValidationError,
};

macro_rules! test_expectation_from {
    ($($error:ident),+ $(,)?) => {
        $(
            impl From<&'static str> for $error {
                fn from(message: &'static str) -> Self {
                    $error::TestExpectation { message }
                }
            }

            impl From<String> for $error {
                fn from(value: String) -> Self {
                    $error::TestExpectationValue {
                        message: "Test expectation failed",
                        value,
                    }
                }
            }
        )+
    };
}

test_expectation_from!(
    ValidationError,
    ConfigError,
    ExecutorError,
    HttpError,
    MetricsError,
    SinkError,
);

impl From<&'static str> for AppError {
    fn from(message: &'static str) -> Self {
        AppError::Validation(ValidationError::TestExpectation { message })
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        })
    }
}

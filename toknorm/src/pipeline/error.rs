use crate::file_processor::FileProcessorError;
use crate::normalize::NormalizeError;
use crate::raw_stream::RawStreamError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Raw stream parsing failed: {0}")]
    RawStream(#[from] RawStreamError),

    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifyError;

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        match error {
            PipelineError::Pipeline { message } => {
                assert_eq!(message, "Test error");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_stage_error_conversion() {
        let classify_error = ClassifyError::UnsupportedOperator {
            operator: "@".to_string(),
        };
        let pipeline_error: PipelineError = NormalizeError::from(classify_error).into();
        assert!(pipeline_error
            .to_string()
            .contains("unsupported operator '@'"));
    }
}

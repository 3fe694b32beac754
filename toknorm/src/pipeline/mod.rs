mod error;
mod info;
pub mod output;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::NormalizePreferences;
use crate::logging;
use std::path::PathBuf;
use std::time::Instant;

/// Process a single token dump through the complete pipeline
/// (file -> raw stream -> normalization)
///
/// Processing one input is atomic: on any stage failure the whole file's
/// output is discarded, there is no partial emission.
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_preferences(file_path, &NormalizePreferences::default())
}

/// Process a single token dump with custom normalization preferences
pub fn process_file_with_preferences(
    file_path: &str,
    preferences: &NormalizePreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    // Set up file context for global logging
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting token stream normalization pipeline", "file" => file_path);

        // Stage 1: File processing
        let file_result = crate::file_processor::process_file(file_path)?;

        // Stage 2: Raw stream parsing
        let raw_tokens = crate::raw_stream::parse_stream(&file_result.source)?;
        let raw_token_count = raw_tokens.len();

        // Stage 3: Normalization
        let mut normalizer = crate::normalize::Normalizer::with_preferences(preferences.clone());
        let tokens = normalizer.normalize(&raw_tokens)?;
        let normalize_metrics = normalizer.metrics().clone();

        let total_duration = start_time.elapsed();
        let result = PipelineResult::new(
            tokens,
            file_result.metadata,
            normalize_metrics,
            raw_token_count,
            total_duration,
        );

        result.log_success(file_path);

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_dump(content: &str) -> (tempfile::TempDir, String) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tokens.json");
        fs::write(&file_path, content).unwrap();
        let path = file_path.to_str().unwrap().to_string();
        (dir, path)
    }

    #[test]
    fn test_validate_pipeline() {
        let _ = crate::logging::init_global_logging();
        let result = validate_pipeline();
        assert!(result.is_ok());
    }

    #[test]
    fn test_process_file_end_to_end() {
        // x = "hi\n" lexed by the upstream lexer
        let (_dir, path) = write_dump(
            r#"[
                [[1, 0], "on_ident", "x"],
                [[1, 1], "on_sp", " "],
                [[1, 2], "on_op", "="],
                [[1, 3], "on_sp", " "],
                [[1, 4], "on_tstring_beg", "\""],
                [[1, 5], "on_tstring_content", "hi\\n"],
                [[1, 9], "on_tstring_end", "\""]
            ]"#,
        );

        let result = process_file(&path).unwrap();
        assert_eq!(result.raw_token_count, 7);
        assert_eq!(result.token_count(), 5);

        let rendered = output::render_tokens(&result.tokens);
        assert_eq!(
            rendered,
            "tIDENTIFIER [120] 1:0\n\
             tEQL 1:2\n\
             tSTRING_BEG 1:4\n\
             tSTRING_CONTENT [104, 105, 10] 1:5\n\
             tSTRING_END 1:9\n"
        );
    }

    #[test]
    fn test_process_file_unsupported_operator() {
        let (_dir, path) = write_dump(r#"[[[1, 0], "on_op", "@"]]"#);

        let error = process_file(&path).unwrap_err();
        match error {
            PipelineError::Normalize(e) => {
                assert!(e.to_string().contains("unsupported operator '@'"));
            }
            other => panic!("Expected normalization error, got {:?}", other),
        }
    }

    #[test]
    fn test_process_file_missing() {
        let error = process_file("no-such-file.json").unwrap_err();
        assert!(matches!(error, PipelineError::FileProcessing(_)));
    }

    #[test]
    fn test_process_file_invalid_json() {
        let (_dir, path) = write_dump("definitely not json");
        let error = process_file(&path).unwrap_err();
        assert!(matches!(error, PipelineError::RawStream(_)));
    }
}

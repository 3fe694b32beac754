//! File processor module with compile-time constants and global logging integration

mod processor;

use crate::config::constants::compile_time::file_processing::MAX_FILE_SIZE;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

/// Create a file processor with default settings
pub fn create_processor() -> FileProcessor {
    processor::create_processor()
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Initialize file processor logging validation (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::file_processing::FILE_NOT_FOUND,
        crate::logging::codes::file_processing::INVALID_EXTENSION,
        crate::logging::codes::file_processing::FILE_TOO_LARGE,
        crate::logging::codes::file_processing::EMPTY_FILE,
        crate::logging::codes::file_processing::PERMISSION_DENIED,
        crate::logging::codes::file_processing::INVALID_ENCODING,
        crate::logging::codes::file_processing::IO_ERROR,
        crate::logging::codes::file_processing::INVALID_PATH,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");
        fs::write(&file_path, "[[[1, 0], \"on_int\", \"1\"]]").unwrap();

        let result = process_file(file_path.to_str().unwrap());
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_processor() {
        let _processor = create_processor();
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
        assert_eq!(get_max_file_size(), MAX_FILE_SIZE);
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
